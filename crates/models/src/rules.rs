use super::{PayloadTemplate, Reference, RuleName, StringValue};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Source of alarm state-change events.
pub const ALARM_EVENT_SOURCE: &str = "aws.cloudwatch";
/// Detail-type of alarm state-change events.
pub const ALARM_STATE_CHANGE: &str = "CloudWatch Alarm State Change";

/// An EventPattern filters the stream of bus events. An event matches if
/// its source, detail-type, and resources each match one of the listed values.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "EventPattern::example")]
pub struct EventPattern {
    /// # Matched event sources.
    pub source: BTreeSet<String>,
    /// # Matched event detail-types.
    pub detail_type: BTreeSet<String>,
    /// # Matched resource ARNs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<StringValue>,
}

impl EventPattern {
    /// Pattern matching state changes of exactly the alarm having `alarm_arn`.
    pub fn alarm_state_change(alarm_arn: StringValue) -> Self {
        Self {
            source: [ALARM_EVENT_SOURCE.to_string()].into_iter().collect(),
            detail_type: [ALARM_STATE_CHANGE.to_string()].into_iter().collect(),
            resources: vec![alarm_arn],
        }
    }

    pub fn example() -> Self {
        Self::alarm_state_change(StringValue::Ref(Reference::attr(
            &super::LogicalId::example(),
            super::Attribute::Arn,
        )))
    }
}

/// A RuleTarget invokes a destination with the given input.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RuleTarget {
    /// # Destination which is invoked.
    pub destination: Reference,
    /// # Input delivered to the destination.
    pub input: PayloadTemplate,
}

/// A RuleSpec matches bus events against a pattern,
/// and invokes each of its targets for every matched event.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RuleSpec {
    /// # Physical name of the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<RuleName>,
    /// # Description of the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Is the rule enabled?
    #[serde(default = "RuleSpec::default_enabled")]
    pub enabled: bool,
    /// # Pattern of matched events.
    pub pattern: EventPattern,
    /// # Targets invoked for each matched event, in order.
    #[validate(length(min = 1))]
    pub targets: Vec<RuleTarget>,
}

impl RuleSpec {
    pub fn default_enabled() -> bool {
        true
    }
}
