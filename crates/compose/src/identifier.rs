use super::{network, Error, StackBuilder, StackConfig};
use models::{MachineImage, NetworkSpec, StringValue};

/// IdentifierProvider supplies the id of the instance which is alarmed upon.
/// Providers may declare descriptors of their own in order to do so.
pub trait IdentifierProvider {
    fn instance_id(&self, builder: &mut StackBuilder) -> Result<StringValue, Error>;
}

/// LiteralInstance is an instance which exists outside of the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralInstance(pub String);

impl IdentifierProvider for LiteralInstance {
    fn instance_id(&self, _builder: &mut StackBuilder) -> Result<StringValue, Error> {
        Ok(StringValue::literal(&self.0))
    }
}

/// ProvisionedInstance declares an isolated network and an instance within it,
/// and identifies the instance by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionedInstance {
    pub network: NetworkSpec,
    pub instance_type: String,
    pub machine_image: MachineImage,
}

impl Default for ProvisionedInstance {
    fn default() -> Self {
        Self {
            network: NetworkSpec::example(),
            instance_type: "t3.micro".to_string(),
            machine_image: MachineImage::LatestAmazonLinux2,
        }
    }
}

impl IdentifierProvider for ProvisionedInstance {
    fn instance_id(&self, builder: &mut StackBuilder) -> Result<StringValue, Error> {
        let instance = network::compose_network(builder, self)?;
        Ok(StringValue::Ref(models::Reference::to_ref(&instance)))
    }
}

/// Select the IdentifierProvider of the `config`.
pub fn provider_for(config: &StackConfig) -> Box<dyn IdentifierProvider> {
    if config.include_compute_instance {
        Box::new(ProvisionedInstance::default())
    } else {
        Box::new(LiteralInstance(config.instance_id.clone()))
    }
}
