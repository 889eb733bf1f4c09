use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// Payload templates are authored as text with embedded `<$.path.to.field>`
// placeholders. Placeholders are never resolved during composition: the
// event router substitutes them as each matched event is delivered.
// `render` performs the same substitution locally, for previews and tests.

lazy_static! {
    // EVENT_FIELD_RE is the root `$`, followed by zero or more `.component`s.
    static ref EVENT_FIELD_RE: Regex = Regex::new(r"^\$(\.[A-Za-z0-9_\-]+)*$").unwrap();
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("{path:?} is not a valid event field path (expected `$` followed by `.field` components)")]
    InvalidPath { path: String },
    #[error("placeholder at offset {offset} of template {text:?} is not closed with '>'")]
    UnclosedPlaceholder { text: String, offset: usize },
    #[error("event field {path} does not exist in the event")]
    NoSuchField { path: String },
}

/// EventField is a JSON-path-like reference into the payload of a matched event,
/// such as `$.detail.alarmName`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct EventField(String);

impl EventField {
    pub fn from_path(path: impl Into<String>) -> Result<Self, TemplateError> {
        let path = path.into();

        if EVENT_FIELD_RE.is_match(&path) {
            Ok(Self(path))
        } else {
            Err(TemplateError::InvalidPath { path })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Property components of the path, with the leading `$` removed.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').skip(1)
    }

    /// Short name of the field: its final component, or "event" for the root.
    pub fn name(&self) -> &str {
        self.components().last().unwrap_or("event")
    }

    /// Resolve the field within `event`, returning None if any component is missing.
    pub fn resolve<'v>(&self, event: &'v Value) -> Option<&'v Value> {
        self.components()
            .try_fold(event, |node, component| node.as_object()?.get(component))
    }
}

impl TryFrom<String> for EventField {
    type Error = TemplateError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::from_path(path)
    }
}

impl From<EventField> for String {
    fn from(field: EventField) -> Self {
        field.0
    }
}

impl std::fmt::Display for EventField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Segment is a parsed component of a TemplateText.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(EventField),
}

/// TemplateText is text with embedded `<$.field.path>` placeholders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateText(Vec<Segment>);

impl TemplateText {
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = text;
        let mut offset = 0;

        while let Some(begin) = rest.find("<$") {
            let Some(end) = rest[begin..].find('>') else {
                return Err(TemplateError::UnclosedPlaceholder {
                    text: text.to_string(),
                    offset: offset + begin,
                });
            };
            let end = begin + end;

            if begin != 0 {
                segments.push(Segment::Literal(rest[..begin].to_string()));
            }
            segments.push(Segment::Field(EventField::from_path(&rest[begin + 1..end])?));

            offset += end + 1;
            rest = &rest[end + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Event fields referenced by this text, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &EventField> {
        self.0.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(field),
            Segment::Literal(_) => None,
        })
    }

    /// Map each segment to text, using `placeholder` for event fields.
    pub fn map_fields<F>(&self, mut placeholder: F) -> Result<String, TemplateError>
    where
        F: FnMut(&EventField) -> Result<String, TemplateError>,
    {
        let mut out = String::new();
        for segment in &self.0 {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&placeholder(field)?),
            }
        }
        Ok(out)
    }

    /// Substitute each placeholder with its value from `event`.
    /// String values are substituted verbatim; others as their JSON text.
    pub fn render(&self, event: &Value) -> Result<String, TemplateError> {
        self.map_fields(|field| match field.resolve(event) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(TemplateError::NoSuchField {
                path: field.to_string(),
            }),
        })
    }
}

impl TryFrom<String> for TemplateText {
    type Error = TemplateError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<TemplateText> for String {
    fn from(text: TemplateText) -> Self {
        text.to_string()
    }
}

impl std::fmt::Display for TemplateText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.0 {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Field(field) => write!(f, "<{field}>")?,
            }
        }
        Ok(())
    }
}

impl JsonSchema for TemplateText {
    fn schema_name() -> String {
        String::from("TemplateText")
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

/// PayloadTemplate is the input delivered to a rule target: either a single
/// text, or a JSON object of texts (keys are ordered by name).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
#[schemars(example = "PayloadTemplate::example")]
pub enum PayloadTemplate {
    Text(TemplateText),
    Object(BTreeMap<String, TemplateText>),
}

impl PayloadTemplate {
    pub fn example() -> Self {
        Self::Object(
            [(
                "content".to_string(),
                TemplateText::parse(":loudspeaker:<$.detail.alarmName>\n:new: <$.detail.state.reason>")
                    .unwrap(),
            )]
            .into_iter()
            .collect(),
        )
    }

    /// Distinct event fields of the template, in order of first appearance.
    pub fn fields(&self) -> Vec<&EventField> {
        let mut out: Vec<&EventField> = Vec::new();

        let texts: Box<dyn Iterator<Item = &TemplateText> + '_> = match self {
            Self::Text(text) => Box::new(std::iter::once(text)),
            Self::Object(fields) => Box::new(fields.values()),
        };
        for field in texts.flat_map(TemplateText::fields) {
            if !out.contains(&field) {
                out.push(field);
            }
        }
        out
    }

    /// Render the template against `event`, as the event router would at delivery.
    pub fn render(&self, event: &Value) -> Result<Value, TemplateError> {
        match self {
            Self::Text(text) => Ok(Value::String(text.render(event)?)),
            Self::Object(fields) => {
                let mut out = serde_json::Map::with_capacity(fields.len());
                for (property, text) in fields {
                    out.insert(property.clone(), Value::String(text.render(event)?));
                }
                Ok(Value::Object(out))
            }
        }
    }

    /// Render the HTTP request body delivered for `event`.
    pub fn render_body(&self, event: &Value) -> Result<String, TemplateError> {
        match self.render(event)? {
            Value::String(body) => Ok(body),
            other => Ok(other.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn sample_event() -> Value {
        json!({
            "source": "aws.cloudwatch",
            "detail-type": "CloudWatch Alarm State Change",
            "detail": {
                "alarmName": "cpu-high",
                "state": {"reason": "threshold breached", "value": "ALARM"},
                "previousState": {"value": "OK"},
                "configuration": {"metrics": []},
            }
        })
    }

    #[test]
    fn test_event_field_paths() {
        for (case, expect) in [
            ("$", true),
            ("$.detail", true),
            ("$.detail.state.reason", true),
            ("$.detail-type", true),
            ("detail.alarmName", false),
            ("$.", false),
            ("$..detail", false),
            ("$.detail.", false),
            ("$.has space", false),
        ] {
            assert_eq!(EventField::from_path(case).is_ok(), expect, "{case}");
        }

        let field = EventField::from_path("$.detail.state.reason").unwrap();
        assert_eq!(field.name(), "reason");
        assert_eq!(EventField::from_path("$").unwrap().name(), "event");
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let source = ":loudspeaker:<$.detail.alarmName>\n:new: <$.detail.state.reason>";
        let text = TemplateText::parse(source).unwrap();

        assert_eq!(
            text.segments(),
            &[
                Segment::Literal(":loudspeaker:".to_string()),
                Segment::Field(EventField::from_path("$.detail.alarmName").unwrap()),
                Segment::Literal("\n:new: ".to_string()),
                Segment::Field(EventField::from_path("$.detail.state.reason").unwrap()),
            ]
        );
        assert_eq!(text.to_string(), source);

        // A '<' which doesn't open a placeholder is literal text.
        let text = TemplateText::parse("a < b <$.x> c").unwrap();
        assert_eq!(text.fields().count(), 1);
        assert_eq!(text.to_string(), "a < b <$.x> c");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            TemplateText::parse("hello <$.detail.alarmName").unwrap_err(),
            TemplateError::UnclosedPlaceholder {
                text: "hello <$.detail.alarmName".to_string(),
                offset: 6,
            }
        );
        assert_eq!(
            TemplateText::parse("<$.ok> then <$bad>").unwrap_err(),
            TemplateError::InvalidPath {
                path: "$bad".to_string()
            }
        );
    }

    #[test]
    fn test_render_sample_event() {
        let template = PayloadTemplate::example();
        let body = template.render_body(&sample_event()).unwrap();

        assert!(body.contains("cpu-high"));
        assert!(body.contains("threshold breached"));

        let rendered = template.render(&sample_event()).unwrap();
        assert_eq!(
            rendered,
            json!({"content": ":loudspeaker:cpu-high\n:new: threshold breached"})
        );
    }

    #[test]
    fn test_render_text_and_non_string_values() {
        let template = PayloadTemplate::Text(
            TemplateText::parse("alarm <$.detail.alarmName> metrics=<$.detail.configuration.metrics>")
                .unwrap(),
        );
        assert_eq!(
            template.render_body(&sample_event()).unwrap(),
            "alarm cpu-high metrics=[]"
        );
    }

    #[test]
    fn test_render_missing_field() {
        let template = PayloadTemplate::Text(TemplateText::parse("<$.detail.nope>").unwrap());
        assert_eq!(
            template.render(&sample_event()).unwrap_err(),
            TemplateError::NoSuchField {
                path: "$.detail.nope".to_string()
            }
        );
    }

    #[test]
    fn test_fields_are_distinct_and_ordered() {
        let template: PayloadTemplate = serde_json::from_value(json!({
            "a": "<$.detail.state.reason> <$.detail.alarmName>",
            "b": "<$.detail.alarmName>",
        }))
        .unwrap();

        let fields: Vec<&str> = template.fields().into_iter().map(EventField::as_str).collect();
        assert_eq!(fields, vec!["$.detail.state.reason", "$.detail.alarmName"]);
    }

    #[test]
    fn test_serde_untagged_text() {
        let template: PayloadTemplate = serde_json::from_value(json!("plain <$.id>")).unwrap();
        assert!(matches!(template, PayloadTemplate::Text(_)));
        assert_eq!(serde_json::to_value(&template).unwrap(), json!("plain <$.id>"));
    }
}
