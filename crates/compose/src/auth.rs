use super::{AuthMode, Error, StackBuilder, StackConfig};
use models::{
    AuthSpec, ConnectionSpec, HeaderName, LogicalId, Reference, ResourceSpec, SecretName,
    SecretSpec, ValueSource,
};

pub const SECRET_ID: &str = "Secret";
pub const CONNECTION_ID: &str = "Connection";

const SECRET_NAME: &str = "ChatWorkApiKey";
const SECRET_FIELD: &str = "apiKey";

/// Declare the webhook connection, along with the managed secret
/// holding its API key if the config's AuthMode calls for one.
pub fn compose_connection(
    builder: &mut StackBuilder,
    config: &StackConfig,
) -> Result<LogicalId, Error> {
    let header_name = HeaderName::new(config.effective_header_name());

    let value = match config.auth {
        AuthMode::ManagedSecret => {
            if config.api_key.is_empty() {
                tracing::warn!("APIKEY is not set; the managed secret will be seeded with an empty key");
            }
            let secret = builder.add(
                SECRET_ID,
                ResourceSpec::Secret(SecretSpec {
                    secret_name: SecretName::new(SECRET_NAME),
                    seed_field: SECRET_FIELD.to_string(),
                    seed_value: config.api_key.clone(),
                    generate_string_key: Some("password".to_string()),
                }),
            )?;

            ValueSource::SecretField {
                secret: Reference::to_ref(&secret),
                json_field: SECRET_FIELD.to_string(),
            }
        }
        AuthMode::InlineLiteral => ValueSource::Literal(config.inline_value.clone()),
    };

    let description = format!("Connection with API Key {header_name}");

    builder.add(
        CONNECTION_ID,
        ResourceSpec::Connection(ConnectionSpec {
            description: Some(description),
            authorization: AuthSpec { header_name, value },
        }),
    )
}
