//! Composition of the alarm-to-webhook stack.
//!
//! `compose` builds the stack's descriptors top to bottom, each referencing
//! descriptors declared before it:
//!
//! 1. The instance to alarm upon (optionally a provisioned network and instance).
//! 2. An alarm on the instance's CPU utilization.
//! 3. The webhook connection (and the managed secret of its API key).
//! 4. The webhook destination.
//! 5. A rule routing the alarm's state changes to the destination.

mod alarm;
mod auth;
mod builder;
mod config;
mod destination;
mod identifier;
mod network;
mod rule;

pub use alarm::{compose_alarm, ALARM_ID};
pub use auth::{compose_connection, CONNECTION_ID, SECRET_ID};
pub use builder::StackBuilder;
pub use config::{
    AuthMode, StackConfig, CHATWORK_TOKEN_HEADER, DEFAULT_INSTANCE_ID, DEFAULT_STACK_NAME,
    INLINE_PLACEHOLDER_HEADER, INLINE_PLACEHOLDER_VALUE,
};
pub use destination::{compose_destination, DESTINATION_ID};
pub use identifier::{provider_for, IdentifierProvider, LiteralInstance, ProvisionedInstance};
pub use network::{compose_network, INSTANCE_ID, NETWORK_ID};
pub use rule::{compose_rule, MESSAGE_TEMPLATE, RULE_ID};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{kind} {id} is declared more than once in the stack")]
    DuplicateResource { id: String, kind: &'static str },
    #[error("invalid payload template")]
    Template(#[from] models::TemplateError),
    #[error("failed to read stack config {path:?}")]
    ReadConfig {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse stack config {path:?}")]
    ParseConfig {
        path: std::path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Compose the stack described by `config`.
#[tracing::instrument(skip_all, fields(stack = %config.stack_name))]
pub fn compose(config: &StackConfig) -> Result<models::Stack, Error> {
    let mut builder = StackBuilder::new(&config.stack_name);

    let instance_id = provider_for(config).instance_id(&mut builder)?;
    let alarm = compose_alarm(&mut builder, instance_id)?;
    let connection = compose_connection(&mut builder, config)?;
    let destination = compose_destination(&mut builder, &connection, &config.endpoint)?;
    compose_rule(&mut builder, &alarm, &destination)?;

    tracing::info!(resources = builder.len(), "composed stack");
    Ok(builder.build())
}
