use super::{Error, StackBuilder};
use models::{AlarmSpec, Comparator, LogicalId, MetricSpec, ResourceSpec, Statistic, StringValue};
use std::time::Duration;

pub const ALARM_ID: &str = "testEC2CpuAlarm";

/// Declare an alarm on the average CPU utilization of `instance_id`,
/// which fires once a single one-minute period reaches 0.005%.
pub fn compose_alarm(
    builder: &mut StackBuilder,
    instance_id: StringValue,
) -> Result<LogicalId, Error> {
    let metric = MetricSpec {
        namespace: "AWS/EC2".to_string(),
        metric_name: "CPUUtilization".to_string(),
        dimensions: [("InstanceId".to_string(), instance_id)]
            .into_iter()
            .collect(),
        statistic: Statistic::Average,
        period: Duration::from_secs(60),
    };

    builder.add(
        ALARM_ID,
        ResourceSpec::Alarm(AlarmSpec {
            alarm_name: None,
            metric,
            evaluation_periods: 1,
            threshold: 0.005,
            comparator: Comparator::GreaterThanOrEqualToThreshold,
            treat_missing_data: None,
        }),
    )
}
