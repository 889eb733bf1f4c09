//! Declarative descriptors of an alarm-to-webhook stack.
//!
//! Descriptors are plain values: composing them has no side effects, and
//! references between them are resolved by the deployment engine.

mod alarms;
mod destinations;
mod names;
mod network;
mod rules;
mod secrets;
mod stack;
mod template;

use schemars::JsonSchema;
use serde_json::{from_value, json};

pub use alarms::{AlarmSpec, Comparator, MetricSpec, MissingData, Statistic};
pub use destinations::{DestinationSpec, HttpMethod};
pub use names::{
    unmatched, Attribute, HeaderName, LogicalId, Reference, RuleName, SecretName, StringValue,
};
pub use network::{InstanceSpec, MachineImage, NetworkSpec, SubnetGroupSpec, SubnetKind};
pub use rules::{EventPattern, RuleSpec, RuleTarget, ALARM_EVENT_SOURCE, ALARM_STATE_CHANGE};
pub use secrets::{AuthSpec, ConnectionSpec, SecretSpec, ValueSource};
pub use stack::{Resource, ResourceKind, ResourceSpec, Stack};
pub use template::{EventField, PayloadTemplate, Segment, TemplateError, TemplateText};

fn duration_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    from_value(json!({
        "type": "string",
        "pattern": "^\\d+(s|m|h)$"
    }))
    .unwrap()
}

/// Generate the JSON schema of a stack.
pub fn stack_schema() -> serde_json::Value {
    schema_of::<Stack>()
}

/// Generate the JSON schema of any model type.
pub fn schema_of<T: JsonSchema>() -> serde_json::Value {
    let settings = schemars::gen::SchemaSettings::draft2019_09();
    let generator = schemars::gen::SchemaGenerator::new(settings);
    serde_json::to_value(generator.into_root_schema_for::<T>()).unwrap()
}
