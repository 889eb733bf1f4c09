use super::Reference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// HTTP method used to invoke a destination.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Put,
    Patch,
    Get,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Get => "GET",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

/// A DestinationSpec is an outbound HTTP endpoint, together with
/// the connection whose authorization is applied to each request.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "DestinationSpec::example")]
pub struct DestinationSpec {
    /// # Connection used to authorize requests.
    pub connection: Reference,
    /// # URL of the endpoint.
    /// An empty endpoint is carried through to the template unchanged.
    #[serde(default)]
    pub endpoint: String,
    /// # HTTP method of requests.
    #[serde(default)]
    pub http_method: HttpMethod,
    /// # Description of the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Maximum invocations per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_second: Option<u32>,
}

impl DestinationSpec {
    pub fn example() -> Self {
        Self {
            connection: Reference::attr(
                &super::LogicalId::new("Connection"),
                super::Attribute::Arn,
            ),
            endpoint: "https://api.chatwork.com/v2/rooms/123/messages".to_string(),
            http_method: HttpMethod::Post,
            description: None,
            rate_limit_per_second: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_endpoint_defaults_to_empty() {
        let dest: DestinationSpec = serde_json::from_value(json!({
            "connection": {"target": "Connection", "attribute": "Arn"},
        }))
        .unwrap();

        assert_eq!(dest.endpoint, "");
        assert_eq!(dest.http_method, HttpMethod::Post);
    }
}
