use super::{Error, Errors};
use models::{Comparator, ResourceSpec, ValueSource};
use std::collections::BTreeMap;
use std::time::Duration;
use validator::{Validate, ValidationError, ValidationErrors};

pub fn walk_fields(scope: &str, this_thing: &str, spec: &ResourceSpec, errors: &mut Errors) {
    match spec {
        ResourceSpec::Alarm(alarm) => {
            push_invalid_fields(scope, this_thing, alarm.validate(), errors);
            push_invalid_fields(scope, this_thing, alarm.metric.validate(), errors);

            if !is_valid_period(alarm.metric.period) {
                Error::InvalidPeriod {
                    this_thing: this_thing.to_string(),
                    period: humantime::format_duration(alarm.metric.period).to_string(),
                }
                .push(scope, errors);
            }
            if alarm.comparator == Comparator::EqualToThreshold {
                invalid_field(
                    scope,
                    this_thing,
                    "comparator",
                    "EqualToThreshold cannot be expressed by a metric alarm",
                    errors,
                );
            }
        }
        ResourceSpec::Secret(secret) => {
            push_invalid_fields(scope, this_thing, secret.validate(), errors);
            push_invalid_name(
                scope,
                "secret",
                &secret.secret_name,
                secret.secret_name.validate(),
                errors,
            );
        }
        ResourceSpec::Connection(connection) => {
            let header_name = &connection.authorization.header_name;
            push_invalid_name(scope, "header", header_name, header_name.validate(), errors);

            if let ValueSource::SecretField { json_field, .. } = &connection.authorization.value {
                if json_field.is_empty() {
                    invalid_field(scope, this_thing, "json_field", "must not be empty", errors);
                }
            }
        }
        ResourceSpec::Destination(destination) => {
            if destination.rate_limit_per_second == Some(0) {
                invalid_field(
                    scope,
                    this_thing,
                    "rate_limit_per_second",
                    "must be at least 1",
                    errors,
                );
            }
        }
        ResourceSpec::Rule(rule) => {
            push_invalid_fields(scope, this_thing, rule.validate(), errors);

            if let Some(rule_name) = &rule.rule_name {
                push_invalid_name(scope, "rule", rule_name, rule_name.validate(), errors);
            }
            if rule.pattern.source.is_empty() {
                invalid_field(scope, this_thing, "source", "must not be empty", errors);
            }
            if rule.pattern.detail_type.is_empty() {
                invalid_field(scope, this_thing, "detail_type", "must not be empty", errors);
            }
        }
        ResourceSpec::Network(network) => {
            push_invalid_fields(scope, this_thing, network.validate(), errors);
            push_invalid_fields(scope, this_thing, network.subnet_group.validate(), errors);

            // Each availability zone must be able to hold its subnet.
            if (0..network.max_azs).any(|index| network.subnet_cidr(index).is_none()) {
                invalid_field(
                    scope,
                    this_thing,
                    "cidr",
                    &format!(
                        "{} cannot be divided into {} subnets of /{}",
                        network.cidr, network.max_azs, network.subnet_group.cidr_mask
                    ),
                    errors,
                );
            }
        }
        ResourceSpec::Instance(instance) => {
            push_invalid_fields(scope, this_thing, instance.validate(), errors);
        }
    }
}

/// Alarm periods are 10 or 30 seconds (high resolution), or whole minutes.
pub fn is_valid_period(period: Duration) -> bool {
    let secs = period.as_secs();
    period.subsec_nanos() == 0 && (secs == 10 || secs == 30 || (secs != 0 && secs % 60 == 0))
}

fn invalid_field(scope: &str, this_thing: &str, field: &str, detail: &str, errors: &mut Errors) {
    Error::InvalidField {
        this_thing: this_thing.to_string(),
        field: field.to_string(),
        detail: detail.to_string(),
    }
    .push(scope, errors);
}

fn push_invalid_fields(
    scope: &str,
    this_thing: &str,
    result: Result<(), ValidationErrors>,
    errors: &mut Errors,
) {
    let Err(invalid) = result else {
        return;
    };
    // Order by field name, for stable output.
    let fields: BTreeMap<_, _> = invalid.field_errors().into_iter().collect();

    for (field, field_errors) in fields {
        for err in field_errors.iter() {
            invalid_field(scope, this_thing, &field, &describe(err), errors);
        }
    }
}

pub fn push_invalid_name(
    scope: &str,
    entity: &'static str,
    name: &str,
    result: Result<(), ValidationErrors>,
    errors: &mut Errors,
) {
    let Err(invalid) = result else {
        return;
    };
    let unmatched = invalid
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.params.get("unmatched")?.as_str().map(str::to_string))
        .unwrap_or_else(|| name.to_string());

    Error::NameRegex {
        entity,
        name: name.to_string(),
        unmatched,
    }
    .push(scope, errors);
}

fn describe(err: &ValidationError) -> String {
    let bound = |name: &str| err.params.get(name).map(ToString::to_string);

    match (&*err.code, bound("min"), bound("max")) {
        ("range", Some(min), Some(max)) => format!("must be between {min} and {max}"),
        ("range", Some(min), None) => format!("must be at least {min}"),
        ("range", None, Some(max)) => format!("must be at most {max}"),
        ("length", Some(min), _) => format!("must have a length of at least {min}"),
        (code, _, _) => format!("failed the {code} check"),
    }
}
