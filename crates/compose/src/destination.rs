use super::{Error, StackBuilder};
use models::{Attribute, DestinationSpec, HttpMethod, LogicalId, Reference, ResourceSpec};

pub const DESTINATION_ID: &str = "Destination";

/// Declare the webhook destination, bound to `connection`.
/// An empty `endpoint` is declared as-is.
pub fn compose_destination(
    builder: &mut StackBuilder,
    connection: &LogicalId,
    endpoint: &str,
) -> Result<LogicalId, Error> {
    if endpoint.is_empty() {
        tracing::warn!("ENDPOINT is not set; the destination will have an empty endpoint");
    }

    builder.add(
        DESTINATION_ID,
        ResourceSpec::Destination(DestinationSpec {
            connection: Reference::attr(connection, Attribute::Arn),
            endpoint: endpoint.to_string(),
            http_method: HttpMethod::Post,
            description: Some("Calling example.com with API key x-api-key".to_string()),
            rate_limit_per_second: None,
        }),
    )
}
