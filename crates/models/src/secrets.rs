use super::{HeaderName, Reference, SecretName};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A SecretSpec declares a credential holder in the managed secret service.
/// Its stored value is a JSON object with a single `seedField` property
/// holding `seedValue`. When `generateStringKey` is set, the secret service
/// additionally generates a random string under that key.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "SecretSpec::example")]
pub struct SecretSpec {
    /// # Name of the secret.
    pub secret_name: SecretName,
    /// # Property of the secret's JSON value which holds the seed.
    #[validate(length(min = 1))]
    pub seed_field: String,
    /// # Seed value stored in the secret.
    /// An empty value is accepted, and will be rejected only by
    /// the webhook receiver once the secret is used.
    #[serde(default)]
    pub seed_value: String,
    /// # Property under which a random string is generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_string_key: Option<String>,
}

impl SecretSpec {
    pub fn example() -> Self {
        Self {
            secret_name: SecretName::example(),
            seed_field: "apiKey".to_string(),
            seed_value: String::new(),
            generate_string_key: Some("password".to_string()),
        }
    }
}

/// Source of an API key value.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub enum ValueSource {
    /// # A JSON field of a managed secret, resolved at deployment.
    #[serde(rename_all = "camelCase")]
    SecretField {
        secret: Reference,
        json_field: String,
    },
    /// # A literal value, embedded into the template as-is.
    Literal(String),
}

/// An AuthSpec is an API key authorization: the key's value is sent
/// in the named header of every outbound request.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AuthSpec {
    /// # Header which carries the API key.
    pub header_name: HeaderName,
    /// # Value of the API key.
    pub value: ValueSource,
}

/// A ConnectionSpec is a named bundle of authorization
/// used by outbound HTTP destinations.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ConnectionSpec {
    /// # Description of the connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Authorization applied to requests made over this connection.
    pub authorization: AuthSpec,
}

impl ConnectionSpec {
    /// Reference to the managed secret used by this connection, if any.
    pub fn secret(&self) -> Option<&Reference> {
        match &self.authorization.value {
            ValueSource::SecretField { secret, .. } => Some(secret),
            ValueSource::Literal(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::LogicalId;
    use serde_json::json;

    #[test]
    fn test_value_source_shapes() {
        let secret = ValueSource::SecretField {
            secret: Reference::to_ref(&LogicalId::new("Secret")),
            json_field: "apiKey".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&secret).unwrap(),
            json!({"secretField": {"secret": {"target": "Secret"}, "jsonField": "apiKey"}}),
        );
        assert_eq!(
            serde_json::to_value(&ValueSource::Literal("hoge".to_string())).unwrap(),
            json!({"literal": "hoge"}),
        );
    }

    #[test]
    fn test_connection_secret_lookup() {
        let conn = ConnectionSpec {
            description: None,
            authorization: AuthSpec {
                header_name: HeaderName::new("Token if Nedded"),
                value: ValueSource::Literal("hoge".to_string()),
            },
        };
        assert!(conn.secret().is_none());
    }

    #[test]
    fn test_empty_seed_is_defaulted() {
        let spec: SecretSpec = serde_json::from_value(json!({
            "secretName": "ChatWorkApiKey",
            "seedField": "apiKey",
        }))
        .unwrap();
        assert_eq!(spec.seed_value, "");
        assert_eq!(spec.generate_string_key, None);
    }
}
