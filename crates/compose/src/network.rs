use super::{Error, ProvisionedInstance, StackBuilder};
use models::{InstanceSpec, LogicalId, Reference, ResourceSpec};

pub const NETWORK_ID: &str = "Vpc";
pub const INSTANCE_ID: &str = "Instance";

/// Declare the isolated network and the instance placed within it.
/// Returns the logical id of the instance.
pub fn compose_network(
    builder: &mut StackBuilder,
    provisioned: &ProvisionedInstance,
) -> Result<LogicalId, Error> {
    let network = builder.add(NETWORK_ID, ResourceSpec::Network(provisioned.network.clone()))?;

    builder.add(
        INSTANCE_ID,
        ResourceSpec::Instance(InstanceSpec {
            network: Reference::to_ref(&network),
            instance_type: provisioned.instance_type.clone(),
            machine_image: provisioned.machine_image.clone(),
        }),
    )
}
