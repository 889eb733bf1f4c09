use super::Reference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of a subnet group. Only isolated subnets, having no route
/// to or from the internet, are currently supported.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SubnetKind {
    #[default]
    Isolated,
}

/// A group of subnets, one in each availability zone of the network.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SubnetGroupSpec {
    /// # Name of the subnet group.
    #[validate(length(min = 1))]
    pub name: String,
    /// # Kind of the subnet group.
    #[serde(default)]
    pub kind: SubnetKind,
    /// # Prefix length of each subnet's CIDR block.
    #[validate(range(min = 16, max = 28))]
    pub cidr_mask: u8,
}

/// A NetworkSpec declares a virtual network spanning up to two availability zones.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "NetworkSpec::example")]
pub struct NetworkSpec {
    /// # CIDR block of the network.
    pub cidr: String,
    /// # Maximum number of availability zones used.
    #[validate(range(min = 1, max = 2))]
    pub max_azs: u8,
    /// # The network's subnet group.
    pub subnet_group: SubnetGroupSpec,
}

impl NetworkSpec {
    pub fn example() -> Self {
        Self {
            cidr: "10.0.0.0/16".to_string(),
            max_azs: 2,
            subnet_group: SubnetGroupSpec {
                name: "Isolated".to_string(),
                kind: SubnetKind::Isolated,
                cidr_mask: 24,
            },
        }
    }

    /// CIDR block of the subnet in the `index`'th availability zone.
    /// Subnets are laid out consecutively from the start of the network block.
    pub fn subnet_cidr(&self, index: u8) -> Option<String> {
        let (addr, prefix) = self.cidr.split_once('/')?;
        let prefix: u8 = prefix.parse().ok()?;
        let mask = self.subnet_group.cidr_mask;

        if mask < prefix || mask > 32 {
            return None;
        }
        let base: std::net::Ipv4Addr = addr.parse().ok()?;
        let step = 1u64 << (32 - mask as u32);
        let offset = step.checked_mul(index as u64)?;

        // The subnet must remain within the network block.
        if offset + step > 1u64 << (32 - prefix as u32) {
            return None;
        }
        let start = u32::from(base) as u64 + offset;
        let start = u32::try_from(start).ok()?;

        Some(format!("{}/{}", std::net::Ipv4Addr::from(start), mask))
    }
}

/// Machine image from which an instance is launched.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub enum MachineImage {
    /// # Latest Amazon Linux 2 image, resolved at deployment.
    LatestAmazonLinux2,
    /// # A specific image id.
    Id(String),
}

impl MachineImage {
    /// Public parameter which resolves to the latest Amazon Linux 2 image.
    pub const AMAZON_LINUX_2_PARAMETER: &'static str =
        "/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2";
}

/// An InstanceSpec declares a compute instance placed within a network.
/// Only provisioning is declared: there's no lifecycle management.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct InstanceSpec {
    /// # Network in which the instance is placed.
    pub network: Reference,
    /// # Instance type, such as "t3.micro".
    #[validate(length(min = 1))]
    pub instance_type: String,
    /// # Machine image of the instance.
    pub machine_image: MachineImage,
}
