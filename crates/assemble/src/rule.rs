use super::{intrinsic, Assembly, CfnResource, Error};
use models::{EventField, PayloadTemplate, Resource, RuleSpec, TemplateError};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Maximum number of input paths of a single target.
pub const MAX_INPUT_PATHS: usize = 100;

/// InputTransformer maps the fields of a matched event into a target's input.
/// Each event field is extracted under a key, and keys are substituted into
/// the template as `<key>` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTransformer {
    pub input_paths_map: BTreeMap<String, String>,
    pub input_template: String,
}

impl InputTransformer {
    /// Build the InputTransformer of a PayloadTemplate.
    ///
    /// Fields are keyed by their final path component. Where distinct fields
    /// share a final component, later fields are suffixed with a counter
    /// beginning at 2 (`reason`, `reason2`, `reason3`, ...).
    pub fn from_payload(payload: &PayloadTemplate) -> Result<Self, TemplateError> {
        let mut keys: BTreeMap<&EventField, String> = BTreeMap::new();
        let mut input_paths_map = BTreeMap::new();

        for field in payload.fields() {
            let base = field.name();
            let mut key = base.to_string();

            let mut suffix = 2;
            while input_paths_map.contains_key(&key) {
                key = format!("{base}{suffix}");
                suffix += 1;
            }
            input_paths_map.insert(key.clone(), field.to_string());
            keys.insert(field, key);
        }

        let placeholder = |field: &EventField| -> Result<String, TemplateError> {
            match keys.get(field) {
                Some(key) => Ok(format!("<{key}>")),
                None => Err(TemplateError::NoSuchField {
                    path: field.to_string(),
                }),
            }
        };

        let input = match payload {
            PayloadTemplate::Text(text) => Value::String(text.map_fields(placeholder)?),
            PayloadTemplate::Object(fields) => {
                let mut out = serde_json::Map::with_capacity(fields.len());
                for (property, text) in fields {
                    out.insert(property.clone(), Value::String(text.map_fields(placeholder)?));
                }
                Value::Object(out)
            }
        };

        Ok(Self {
            input_paths_map,
            input_template: input.to_string(),
        })
    }

    fn to_target_properties(&self) -> (&'static str, Value) {
        if self.input_paths_map.is_empty() {
            // Without fields, the input is delivered as-is.
            ("Input", Value::String(self.input_template.clone()))
        } else {
            (
                "InputTransformer",
                json!({
                    "InputPathsMap": self.input_paths_map,
                    "InputTemplate": self.input_template,
                }),
            )
        }
    }
}

pub fn walk_rule<'a>(
    assembly: &mut Assembly<'a>,
    this_thing: &str,
    resource: &Resource,
    rule: &RuleSpec,
) -> Result<(), Error> {
    let RuleSpec {
        rule_name,
        description,
        enabled,
        pattern,
        targets,
    } = rule;

    let mut resources = Vec::with_capacity(pattern.resources.len());
    for value in &pattern.resources {
        resources.push(assembly.resolve_string(this_thing, value)?);
    }
    let mut event_pattern = json!({
        "detail-type": pattern.detail_type,
        "source": pattern.source,
    });
    intrinsic::extend_properties(
        &mut event_pattern,
        [("resources", (!resources.is_empty()).then(|| Value::Array(resources)))],
    );

    let mut cfn_targets = Vec::with_capacity(targets.len());
    for (index, target) in targets.iter().enumerate() {
        let destination = assembly.target(this_thing, &target.destination)?;
        let arn = assembly.resolve(this_thing, &target.destination)?;
        let role = assembly.events_role(&destination.id)?;

        let transformer = InputTransformer::from_payload(&target.input)?;
        if transformer.input_paths_map.len() > MAX_INPUT_PATHS {
            return Err(Error::TooManyInputPaths {
                this_thing: this_thing.to_string(),
                count: transformer.input_paths_map.len(),
                max: MAX_INPUT_PATHS,
            });
        }
        let (input_property, input) = transformer.to_target_properties();

        let mut cfn_target = json!({
            "Arn": arn,
            "Id": format!("Target{index}"),
            "RoleArn": intrinsic::get_att(&role, "Arn"),
        });
        intrinsic::extend_properties(&mut cfn_target, [(input_property, Some(input))]);
        cfn_targets.push(cfn_target);
    }

    let state = if *enabled { "ENABLED" } else { "DISABLED" };
    let mut properties = json!({
        "EventPattern": event_pattern,
        "State": state,
        "Targets": cfn_targets,
    });
    intrinsic::extend_properties(
        &mut properties,
        [
            ("Name", rule_name.as_ref().map(|n| json!(n))),
            ("Description", description.as_ref().map(|d| json!(d))),
        ],
    );

    assembly.insert(
        &[resource.id.as_str(), "Resource"],
        CfnResource::new("AWS::Events::Rule", properties),
    )?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use models::TemplateText;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> TemplateText {
        TemplateText::parse(s).unwrap()
    }

    #[test]
    fn test_alarm_message_transformer() {
        let transformer = InputTransformer::from_payload(&PayloadTemplate::example()).unwrap();

        assert_eq!(
            serde_json::to_value(&transformer.input_paths_map).unwrap(),
            json!({
                "alarmName": "$.detail.alarmName",
                "reason": "$.detail.state.reason",
            })
        );
        insta::assert_snapshot!(transformer.input_template, @r###"{"content":":loudspeaker:<alarmName>\n:new: <reason>"}"###);
    }

    #[test]
    fn test_colliding_keys_are_suffixed() {
        let payload = PayloadTemplate::Text(text(
            "<$.detail.state.reason> was <$.detail.previousState.reason>, \
             then <$.other.reason> and <$.detail.state.reason> again",
        ));
        let transformer = InputTransformer::from_payload(&payload).unwrap();

        assert_eq!(
            transformer.input_paths_map,
            [
                ("reason", "$.detail.state.reason"),
                ("reason2", "$.detail.previousState.reason"),
                ("reason3", "$.other.reason"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>()
        );
        assert_eq!(
            transformer.input_template,
            r#""<reason> was <reason2>, then <reason3> and <reason> again""#
        );
    }

    #[test]
    fn test_template_without_fields_is_plain_input() {
        let payload = PayloadTemplate::Text(text("static text"));
        let transformer = InputTransformer::from_payload(&payload).unwrap();

        assert!(transformer.input_paths_map.is_empty());
        assert_eq!(
            transformer.to_target_properties(),
            ("Input", json!("\"static text\""))
        );
    }
}
