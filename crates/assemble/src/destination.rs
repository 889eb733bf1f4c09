use super::{intrinsic, Assembly, CfnResource, Error};
use models::{DestinationSpec, Resource};
use serde_json::json;

pub fn walk_destination(
    assembly: &mut Assembly,
    this_thing: &str,
    resource: &Resource,
    destination: &DestinationSpec,
) -> Result<(), Error> {
    let mut properties = json!({
        "ConnectionArn": assembly.resolve(this_thing, &destination.connection)?,
        "HttpMethod": destination.http_method.as_str(),
        "InvocationEndpoint": destination.endpoint,
    });
    intrinsic::extend_properties(
        &mut properties,
        [
            ("Description", destination.description.as_ref().map(|d| json!(d))),
            (
                "InvocationRateLimitPerSecond",
                destination.rate_limit_per_second.map(|r| json!(r)),
            ),
        ],
    );

    assembly.insert(
        &[resource.id.as_str(), "Resource"],
        CfnResource::new("AWS::Events::ApiDestination", properties),
    )?;
    Ok(())
}
