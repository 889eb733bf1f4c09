//! Synthesis of a composed Stack into a CloudFormation template.
//!
//! Each descriptor becomes one or more template resources. Their logical
//! ids are derived from construct paths (see `logical_id`), so that a stack
//! always synthesizes to byte-identical output.

use models::{ResourceSpec, Stack};

mod alarm;
mod assembly;
mod auth;
mod destination;
mod intrinsic;
mod logical_id;
mod network;
mod rule;
mod template;

pub use assembly::{primary_id, Assembly};
pub use logical_id::logical_id;
pub use rule::{InputTransformer, MAX_INPUT_PATHS};
pub use template::{CfnResource, Parameter, Template, FORMAT_VERSION};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{this_thing} references {target}, which is not declared in the stack")]
    UnresolvedReference { this_thing: String, target: String },
    #[error("{this_thing} references {target}, which is a {actual} and not a {expected}")]
    WrongKind {
        this_thing: String,
        target: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{this_thing} uses comparator {comparator:?}, which cannot be expressed by a metric alarm")]
    UnsupportedComparator {
        this_thing: String,
        comparator: models::Comparator,
    },
    #[error("{this_thing} cannot divide {cidr} into {max_azs} subnets of /{cidr_mask}")]
    InvalidNetwork {
        this_thing: String,
        cidr: String,
        max_azs: u8,
        cidr_mask: u8,
    },
    #[error("{this_thing} extracts {count} event fields into its input, but at most {max} are supported")]
    TooManyInputPaths {
        this_thing: String,
        count: usize,
        max: usize,
    },
    #[error("construct {path} synthesizes to logical id {logical_id}, which is already in use")]
    LogicalIdCollision { path: String, logical_id: String },
    #[error(transparent)]
    Template(#[from] models::TemplateError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Synthesize the CloudFormation Template of `stack`.
#[tracing::instrument(skip_all, fields(stack = %stack.name))]
pub fn synthesize(stack: &Stack) -> Result<Template, Error> {
    let mut assembly = Assembly::new(stack);

    for resource in &stack.resources {
        let this_thing = format!("{} {}", resource.spec.kind(), resource.id);

        match &resource.spec {
            ResourceSpec::Alarm(spec) => alarm::walk_alarm(&mut assembly, &this_thing, resource, spec),
            ResourceSpec::Secret(spec) => auth::walk_secret(&mut assembly, resource, spec),
            ResourceSpec::Connection(spec) => {
                auth::walk_connection(&mut assembly, &this_thing, resource, spec)
            }
            ResourceSpec::Destination(spec) => {
                destination::walk_destination(&mut assembly, &this_thing, resource, spec)
            }
            ResourceSpec::Rule(spec) => rule::walk_rule(&mut assembly, &this_thing, resource, spec),
            ResourceSpec::Network(spec) => {
                network::walk_network(&mut assembly, &this_thing, resource, spec)
            }
            ResourceSpec::Instance(spec) => {
                network::walk_instance(&mut assembly, &this_thing, resource, spec)
            }
        }?;
    }

    let template = assembly.template;
    tracing::debug!(
        resources = template.resources.len(),
        parameters = template.parameters.len(),
        "synthesized template"
    );
    Ok(template)
}
