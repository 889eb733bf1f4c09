use super::{
    AlarmSpec, Attribute, ConnectionSpec, DestinationSpec, InstanceSpec, LogicalId, NetworkSpec,
    Reference, RuleSpec, SecretSpec, StringValue, ValueSource,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ResourceKind enumerates the kinds of stack descriptors.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Alarm,
    Secret,
    Connection,
    Destination,
    Rule,
    Network,
    Instance,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alarm => "alarm",
            Self::Secret => "secret",
            Self::Connection => "connection",
            Self::Destination => "destination",
            Self::Rule => "rule",
            Self::Network => "network",
            Self::Instance => "instance",
        }
    }

    /// Attributes which descriptors of this kind expose to references.
    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            Self::Alarm => &[Attribute::Arn],
            Self::Secret => &[],
            Self::Connection => &[Attribute::Arn, Attribute::Name],
            Self::Destination => &[Attribute::Arn, Attribute::Name],
            Self::Rule => &[Attribute::Arn],
            Self::Network => &[],
            Self::Instance => &[Attribute::Id],
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specification of a single stack descriptor.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub enum ResourceSpec {
    Alarm(AlarmSpec),
    Secret(SecretSpec),
    Connection(ConnectionSpec),
    Destination(DestinationSpec),
    Rule(RuleSpec),
    Network(NetworkSpec),
    Instance(InstanceSpec),
}

impl ResourceSpec {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Alarm(_) => ResourceKind::Alarm,
            Self::Secret(_) => ResourceKind::Secret,
            Self::Connection(_) => ResourceKind::Connection,
            Self::Destination(_) => ResourceKind::Destination,
            Self::Rule(_) => ResourceKind::Rule,
            Self::Network(_) => ResourceKind::Network,
            Self::Instance(_) => ResourceKind::Instance,
        }
    }

    /// References made by this descriptor, each with the kind
    /// of descriptor it's required to point at (if constrained).
    pub fn references(&self) -> Vec<(&Reference, Option<ResourceKind>)> {
        let mut out = Vec::new();

        match self {
            Self::Alarm(spec) => {
                out.extend(
                    spec.metric
                        .dimensions
                        .values()
                        .filter_map(StringValue::reference)
                        .map(|r| (r, None)),
                );
            }
            Self::Secret(_) | Self::Network(_) => (),
            Self::Connection(spec) => {
                if let ValueSource::SecretField { secret, .. } = &spec.authorization.value {
                    out.push((secret, Some(ResourceKind::Secret)));
                }
            }
            Self::Destination(spec) => {
                out.push((&spec.connection, Some(ResourceKind::Connection)));
            }
            Self::Rule(spec) => {
                out.extend(
                    spec.pattern
                        .resources
                        .iter()
                        .filter_map(StringValue::reference)
                        .map(|r| (r, Some(ResourceKind::Alarm))),
                );
                for target in &spec.targets {
                    out.push((&target.destination, Some(ResourceKind::Destination)));
                }
            }
            Self::Instance(spec) => {
                out.push((&spec.network, Some(ResourceKind::Network)));
            }
        }
        out
    }
}

/// A Resource is a descriptor of the stack, named by its logical id.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    /// # Logical id of the resource.
    pub id: LogicalId,
    /// # Specification of the resource.
    pub spec: ResourceSpec,
}

/// A Stack is the complete, ordered graph of declared descriptors.
/// Descriptors may only reference those declared before them.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Stack {
    /// # Name of the stack.
    pub name: String,
    /// # Description of the stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// # Resources of the stack, in declaration order.
    pub resources: Vec<Resource>,
}

impl Stack {
    pub fn get(&self, id: &LogicalId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    /// Resources of the given kind, in declaration order.
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(move |r| r.spec.kind() == kind)
    }

    /// Every reference of the stack, with its referencing resource.
    pub fn references(&self) -> impl Iterator<Item = (&Resource, &Reference, Option<ResourceKind>)> {
        self.resources.iter().flat_map(|resource| {
            resource
                .spec
                .references()
                .into_iter()
                .map(move |(r, kind)| (resource, r, kind))
        })
    }
}
