use super::{intrinsic, Assembly, CfnResource, Error};
use models::{AlarmSpec, Comparator, Resource};
use serde_json::{json, Value};

pub fn walk_alarm(
    assembly: &mut Assembly,
    this_thing: &str,
    resource: &Resource,
    alarm: &AlarmSpec,
) -> Result<(), Error> {
    let AlarmSpec {
        alarm_name,
        metric,
        evaluation_periods,
        threshold,
        comparator,
        treat_missing_data,
    } = alarm;

    let comparison_operator = match comparator {
        Comparator::GreaterThanOrEqualToThreshold => "GreaterThanOrEqualToThreshold",
        Comparator::GreaterThanThreshold => "GreaterThanThreshold",
        Comparator::LessThanOrEqualToThreshold => "LessThanOrEqualToThreshold",
        Comparator::LessThanThreshold => "LessThanThreshold",
        Comparator::EqualToThreshold => {
            return Err(Error::UnsupportedComparator {
                this_thing: this_thing.to_string(),
                comparator: *comparator,
            })
        }
    };

    let mut dimensions = Vec::with_capacity(metric.dimensions.len());
    for (name, value) in &metric.dimensions {
        dimensions.push(json!({
            "Name": name,
            "Value": assembly.resolve_string(this_thing, value)?,
        }));
    }

    let mut properties = json!({
        "ComparisonOperator": comparison_operator,
        "EvaluationPeriods": evaluation_periods,
        "MetricName": metric.metric_name,
        "Namespace": metric.namespace,
        "Period": metric.period.as_secs(),
        "Statistic": metric.statistic.as_str(),
        "Threshold": threshold,
    });
    intrinsic::extend_properties(
        &mut properties,
        [
            (
                "Dimensions",
                (!dimensions.is_empty()).then(|| Value::Array(dimensions)),
            ),
            ("AlarmName", alarm_name.as_ref().map(|n| json!(n))),
            (
                "TreatMissingData",
                treat_missing_data.map(|m| json!(m.as_str())),
            ),
        ],
    );

    assembly.insert(
        &[resource.id.as_str(), "Resource"],
        CfnResource::new("AWS::CloudWatch::Alarm", properties),
    )?;
    Ok(())
}
