use serde_json::{json, Value};

pub fn ref_(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}

/// Concatenate `parts` into a single string at deployment.
pub fn join(parts: Vec<Value>) -> Value {
    json!({ "Fn::Join": ["", parts] })
}

/// The `index`'th availability zone of the deployment region.
pub fn select_az(index: u8) -> Value {
    json!({ "Fn::Select": [index, { "Fn::GetAZs": "" }] })
}

/// Dynamic reference to `json_field` of the secret string of `secret_arn`,
/// which the deployment engine resolves without revealing it in the template.
pub fn secret_field(secret_arn: Value, json_field: &str) -> Value {
    join(vec![
        Value::String("{{resolve:secretsmanager:".to_string()),
        secret_arn,
        Value::String(format!(":SecretString:{json_field}::}}}}")),
    ])
}

/// Policy document which allows `service` to assume a role.
pub fn assume_role_policy(service: &str) -> Value {
    json!({
        "Statement": [{
            "Action": "sts:AssumeRole",
            "Effect": "Allow",
            "Principal": { "Service": service },
        }],
        "Version": "2012-10-17",
    })
}

/// Insert each of the `optional` properties which are present into `properties`.
pub fn extend_properties<I>(properties: &mut Value, optional: I)
where
    I: IntoIterator<Item = (&'static str, Option<Value>)>,
{
    if let Value::Object(map) = properties {
        for (name, value) in optional {
            if let Some(value) = value {
                map.insert(name.to_string(), value);
            }
        }
    }
}

pub fn name_tag(name: &str) -> Value {
    json!({ "Key": "Name", "Value": name })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_secret_field_reference() {
        assert_eq!(
            secret_field(ref_("SecretA720EF05"), "apiKey"),
            json!({"Fn::Join": ["", [
                "{{resolve:secretsmanager:",
                {"Ref": "SecretA720EF05"},
                ":SecretString:apiKey::}}",
            ]]})
        );
    }
}
