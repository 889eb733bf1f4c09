use super::StringValue;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use validator::Validate;

/// A MetricSpec identifies a single metric time series, and how its
/// data points are aggregated over each evaluation period.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "MetricSpec::example")]
pub struct MetricSpec {
    /// # Namespace of the metric.
    #[validate(length(min = 1))]
    pub namespace: String,
    /// # Name of the metric.
    #[validate(length(min = 1))]
    pub metric_name: String,
    /// # Dimensions which select the metric's time series.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dimensions: BTreeMap<String, StringValue>,
    /// # Statistic applied over each period.
    pub statistic: Statistic,
    /// # Length of each evaluation period.
    #[serde(with = "humantime_serde")]
    #[schemars(schema_with = "super::duration_schema")]
    pub period: Duration,
}

impl MetricSpec {
    pub fn example() -> Self {
        Self {
            namespace: "AWS/EC2".to_string(),
            metric_name: "CPUUtilization".to_string(),
            dimensions: [(
                "InstanceId".to_string(),
                StringValue::literal("i-0a51f37c60f7ba142"),
            )]
            .into_iter()
            .collect(),
            statistic: Statistic::Average,
            period: Duration::from_secs(60),
        }
    }
}

/// Statistic used to aggregate metric data points within a period.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
pub enum Statistic {
    Average,
    Sum,
    Minimum,
    Maximum,
    SampleCount,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Average => "Average",
            Self::Sum => "Sum",
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
            Self::SampleCount => "SampleCount",
        }
    }
}

/// Comparison of the aggregated statistic against the alarm threshold.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
pub enum Comparator {
    /// ≥
    GreaterThanOrEqualToThreshold,
    /// >
    GreaterThanThreshold,
    /// ≤
    LessThanOrEqualToThreshold,
    /// <
    LessThanThreshold,
    /// =
    EqualToThreshold,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::GreaterThanOrEqualToThreshold => ">=",
            Self::GreaterThanThreshold => ">",
            Self::LessThanOrEqualToThreshold => "<=",
            Self::LessThanThreshold => "<",
            Self::EqualToThreshold => "=",
        }
    }
}

/// How the alarm treats periods which have no data points.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MissingData {
    Breaching,
    NotBreaching,
    Ignore,
    Missing,
}

impl MissingData {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breaching => "breaching",
            Self::NotBreaching => "notBreaching",
            Self::Ignore => "ignore",
            Self::Missing => "missing",
        }
    }
}

/// An AlarmSpec binds a metric to a threshold. The monitoring service
/// evaluates it continuously and emits a state-change event whenever the
/// alarm moves between OK, ALARM, and INSUFFICIENT_DATA.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "AlarmSpec::example")]
pub struct AlarmSpec {
    /// # Physical name of the alarm.
    /// If not set, the deployment engine generates one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_name: Option<String>,
    /// # Metric evaluated by the alarm.
    pub metric: MetricSpec,
    /// # Number of most-recent periods compared to the threshold.
    #[validate(range(min = 1))]
    pub evaluation_periods: u32,
    /// # Threshold against which the statistic is compared.
    pub threshold: f64,
    /// # Comparison applied between statistic and threshold.
    pub comparator: Comparator,
    /// # Treatment of periods which are missing data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_missing_data: Option<MissingData>,
}

impl AlarmSpec {
    pub fn example() -> Self {
        Self {
            alarm_name: None,
            metric: MetricSpec::example(),
            evaluation_periods: 1,
            threshold: 0.005,
            comparator: Comparator::GreaterThanOrEqualToThreshold,
            treat_missing_data: None,
        }
    }
}
