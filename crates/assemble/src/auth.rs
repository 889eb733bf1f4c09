use super::{intrinsic, Assembly, CfnResource, Error};
use models::{ConnectionSpec, Resource, SecretSpec, ValueSource};
use serde_json::{json, Value};

pub fn walk_secret(
    assembly: &mut Assembly,
    resource: &Resource,
    secret: &SecretSpec,
) -> Result<(), Error> {
    let SecretSpec {
        secret_name,
        seed_field,
        seed_value,
        generate_string_key,
    } = secret;

    let seed = serde_json::to_string(&json!({ seed_field: seed_value }))?;

    let properties = match generate_string_key {
        Some(key) => json!({
            "GenerateSecretString": {
                "GenerateStringKey": key,
                "SecretStringTemplate": seed,
            },
            "Name": secret_name,
        }),
        None => json!({
            "Name": secret_name,
            "SecretString": seed,
        }),
    };

    assembly.insert(
        &[resource.id.as_str(), "Resource"],
        CfnResource::new("AWS::SecretsManager::Secret", properties).delete_on_removal(),
    )?;
    Ok(())
}

pub fn walk_connection(
    assembly: &mut Assembly,
    this_thing: &str,
    resource: &Resource,
    connection: &ConnectionSpec,
) -> Result<(), Error> {
    let auth = &connection.authorization;

    let value = match &auth.value {
        ValueSource::SecretField { secret, json_field } => {
            intrinsic::secret_field(assembly.resolve(this_thing, secret)?, json_field)
        }
        ValueSource::Literal(value) => Value::String(value.clone()),
    };

    let mut properties = json!({
        "AuthParameters": {
            "ApiKeyAuthParameters": {
                "ApiKeyName": auth.header_name,
                "ApiKeyValue": value,
            },
        },
        "AuthorizationType": "API_KEY",
    });
    intrinsic::extend_properties(
        &mut properties,
        [("Description", connection.description.as_ref().map(|d| json!(d)))],
    );

    assembly.insert(
        &[resource.id.as_str(), "Resource"],
        CfnResource::new("AWS::Events::Connection", properties),
    )?;
    Ok(())
}
