use compose::{compose, StackConfig};
use models::{Attribute, Comparator, LogicalId, Reference, ResourceSpec, Stack, StringValue};
use pretty_assertions::assert_eq;
use std::time::Duration;
use validation::{validate, Error};

const ENDPOINT: &str = "https://api.chatwork.com/v2/rooms/123/messages";

fn minimal() -> Stack {
    compose(&StackConfig::minimal("key-123", ENDPOINT)).unwrap()
}

fn resource_mut<'s>(stack: &'s mut Stack, id: &str) -> &'s mut ResourceSpec {
    &mut stack
        .resources
        .iter_mut()
        .find(|r| r.id.as_str() == id)
        .unwrap()
        .spec
}

fn errors_of(stack: &Stack) -> Vec<Error> {
    validate(stack).into_iter().map(|e| e.error).collect()
}

#[test]
fn test_composed_stacks_are_valid() {
    for config in [
        StackConfig::default(),
        StackConfig::minimal("key-123", ENDPOINT),
        StackConfig::extended(ENDPOINT),
    ] {
        let stack = compose(&config).unwrap();
        let errors = validate(&stack);
        assert!(errors.is_empty(), "{errors}");
    }
}

#[test]
fn test_dangling_reference_with_suggestion() {
    let mut stack = minimal();
    let ResourceSpec::Rule(rule) = resource_mut(&mut stack, "testAlarmRule") else {
        panic!("expected a rule");
    };
    rule.targets[0].destination = Reference::attr(&LogicalId::new("Destinaton"), Attribute::Arn);

    let errors = validate(&stack);
    insta::assert_snapshot!(errors.to_string(), @"/resources/4: destination Destinaton, referenced by rule testAlarmRule, is not defined; did you mean destination Destination?");
}

#[test]
fn test_dangling_reference_without_suggestion() {
    let mut stack = minimal();
    let ResourceSpec::Destination(destination) = resource_mut(&mut stack, "Destination") else {
        panic!("expected a destination");
    };
    destination.connection = Reference::attr(&LogicalId::new("SomethingElse"), Attribute::Arn);

    assert_eq!(
        errors_of(&stack),
        vec![Error::NoSuchEntity {
            this_thing: "destination Destination".to_string(),
            ref_entity: "connection",
            ref_name: "SomethingElse".to_string(),
        }]
    );
}

#[test]
fn test_forward_reference() {
    let mut stack = minimal();
    // Declare the rule before the destination it targets.
    stack.resources.swap(3, 4);

    assert_eq!(
        errors_of(&stack),
        vec![Error::ForwardReference {
            this_thing: "rule testAlarmRule".to_string(),
            ref_entity: "destination",
            ref_name: "Destination".to_string(),
        }]
    );
}

#[test]
fn test_wrong_entity_kind() {
    let mut stack = minimal();
    let ResourceSpec::Destination(destination) = resource_mut(&mut stack, "Destination") else {
        panic!("expected a destination");
    };
    destination.connection = Reference::to_ref(&LogicalId::new("Secret"));

    assert_eq!(
        errors_of(&stack),
        vec![Error::WrongEntityKind {
            this_thing: "destination Destination".to_string(),
            ref_name: "Secret".to_string(),
            expected: "connection",
            actual: "secret",
        }]
    );
}

#[test]
fn test_rule_pattern_must_reference_an_alarm() {
    let mut stack = minimal();
    let ResourceSpec::Rule(rule) = resource_mut(&mut stack, "testAlarmRule") else {
        panic!("expected a rule");
    };
    rule.pattern.resources = vec![StringValue::Ref(Reference::attr(
        &LogicalId::new("Connection"),
        Attribute::Arn,
    ))];

    assert_eq!(
        errors_of(&stack),
        vec![Error::WrongEntityKind {
            this_thing: "rule testAlarmRule".to_string(),
            ref_name: "Connection".to_string(),
            expected: "alarm",
            actual: "connection",
        }]
    );
}

#[test]
fn test_unsupported_attribute() {
    let mut stack = minimal();
    let ResourceSpec::Rule(rule) = resource_mut(&mut stack, "testAlarmRule") else {
        panic!("expected a rule");
    };
    rule.pattern.resources = vec![StringValue::Ref(Reference::attr(
        &LogicalId::new("testEC2CpuAlarm"),
        Attribute::Name,
    ))];

    let errors = validate(&stack);
    insta::assert_snapshot!(errors.to_string(), @"/resources/4: alarm testEC2CpuAlarm, referenced by rule testAlarmRule, has no attribute Name");
}

#[test]
fn test_duplicate_and_invalid_names() {
    let mut stack = minimal();
    let secret = stack.resources[1].clone();
    stack.resources.push(secret);
    stack.name = "bad name".to_string();

    assert_eq!(
        errors_of(&stack),
        vec![
            Error::NameRegex {
                entity: "stack",
                name: "bad name".to_string(),
                unmatched: " name".to_string(),
            },
            Error::Duplicate {
                entity: "secret",
                name: "Secret".to_string(),
                first_entity: "secret",
            },
        ]
    );
}

#[test]
fn test_invalid_alarm_fields() {
    let mut stack = minimal();
    let ResourceSpec::Alarm(alarm) = resource_mut(&mut stack, "testEC2CpuAlarm") else {
        panic!("expected an alarm");
    };
    alarm.evaluation_periods = 0;
    alarm.metric.period = Duration::from_secs(45);

    let errors = errors_of(&stack);
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert!(matches!(
        &errors[0],
        Error::InvalidField { field, .. } if field == "evaluation_periods"
    ));
    assert_eq!(
        errors[1],
        Error::InvalidPeriod {
            this_thing: "alarm testEC2CpuAlarm".to_string(),
            period: "45s".to_string(),
        }
    );
}

#[test]
fn test_equal_to_threshold_comparator() {
    let mut stack = minimal();
    let ResourceSpec::Alarm(alarm) = resource_mut(&mut stack, "testEC2CpuAlarm") else {
        panic!("expected an alarm");
    };
    alarm.comparator = Comparator::EqualToThreshold;

    let errors = validate(&stack);
    insta::assert_snapshot!(errors.to_string(), @"/resources/0: alarm testEC2CpuAlarm field comparator is invalid: EqualToThreshold cannot be expressed by a metric alarm");
}

#[test]
fn test_invalid_network_and_rule() {
    let mut stack = compose(&StackConfig::extended(ENDPOINT)).unwrap();

    let ResourceSpec::Network(network) = resource_mut(&mut stack, "Vpc") else {
        panic!("expected a network");
    };
    network.max_azs = 3;

    let ResourceSpec::Rule(rule) = resource_mut(&mut stack, "testAlarmRule") else {
        panic!("expected a rule");
    };
    rule.targets.clear();
    rule.pattern.source.clear();

    let fields: Vec<String> = errors_of(&stack)
        .into_iter()
        .map(|err| match err {
            Error::InvalidField { field, .. } => field,
            other => panic!("unexpected error {other}"),
        })
        .collect();

    assert_eq!(fields, vec!["max_azs", "targets", "source"]);
}
