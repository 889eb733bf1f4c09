use super::{Error, StackBuilder};
use models::{
    Attribute, EventPattern, LogicalId, PayloadTemplate, Reference, ResourceSpec, RuleName,
    RuleSpec, RuleTarget, StringValue, TemplateText,
};

pub const RULE_ID: &str = "testAlarmRule";

/// Chat message posted for each alarm state change.
pub const MESSAGE_TEMPLATE: &str =
    ":loudspeaker:<$.detail.alarmName>\n:new: <$.detail.state.reason>";

/// Declare the rule which routes state changes of `alarm` to `destination`.
pub fn compose_rule(
    builder: &mut StackBuilder,
    alarm: &LogicalId,
    destination: &LogicalId,
) -> Result<LogicalId, Error> {
    let content = TemplateText::parse(MESSAGE_TEMPLATE)?;

    let target = RuleTarget {
        destination: Reference::attr(destination, Attribute::Arn),
        input: PayloadTemplate::Object([("content".to_string(), content)].into_iter().collect()),
    };

    builder.add(
        RULE_ID,
        ResourceSpec::Rule(RuleSpec {
            rule_name: Some(RuleName::new(RULE_ID)),
            description: None,
            enabled: true,
            pattern: EventPattern::alarm_state_change(StringValue::Ref(Reference::attr(
                alarm,
                Attribute::Arn,
            ))),
            targets: vec![target],
        }),
    )
}
