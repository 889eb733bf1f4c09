use super::{intrinsic, Assembly, CfnResource, Error, Parameter};
use models::{
    InstanceSpec, MachineImage, NetworkSpec, Resource, ResourceKind, ResourceSpec, SubnetKind,
};
use serde_json::{json, Value};

/// Construct id of the `index`'th subnet of the network's subnet group.
pub fn subnet_id(network: &NetworkSpec, index: u8) -> String {
    format!("{}Subnet{}", network.subnet_group.name, index + 1)
}

pub fn walk_network(
    assembly: &mut Assembly,
    this_thing: &str,
    resource: &Resource,
    network: &NetworkSpec,
) -> Result<(), Error> {
    let id = resource.id.as_str();
    let name = assembly.construct_path(&[id]);

    let vpc = assembly.insert(
        &[id, "Resource"],
        CfnResource::new(
            "AWS::EC2::VPC",
            json!({
                "CidrBlock": network.cidr,
                "EnableDnsHostnames": true,
                "EnableDnsSupport": true,
                "InstanceTenancy": "default",
                "Tags": [intrinsic::name_tag(&name)],
            }),
        ),
    )?;

    let subnet_type = match network.subnet_group.kind {
        SubnetKind::Isolated => "Isolated",
    };

    for index in 0..network.max_azs {
        let Some(cidr) = network.subnet_cidr(index) else {
            return Err(Error::InvalidNetwork {
                this_thing: this_thing.to_string(),
                cidr: network.cidr.clone(),
                max_azs: network.max_azs,
                cidr_mask: network.subnet_group.cidr_mask,
            });
        };
        let construct = subnet_id(network, index);
        let subnet_name = assembly.construct_path(&[id, construct.as_str()]);

        let subnet = assembly.insert(
            &[id, construct.as_str(), "Subnet"],
            CfnResource::new(
                "AWS::EC2::Subnet",
                json!({
                    "AvailabilityZone": intrinsic::select_az(index),
                    "CidrBlock": cidr,
                    "MapPublicIpOnLaunch": false,
                    "Tags": [
                        {"Key": "aws-cdk:subnet-name", "Value": network.subnet_group.name},
                        {"Key": "aws-cdk:subnet-type", "Value": subnet_type},
                        intrinsic::name_tag(&subnet_name),
                    ],
                    "VpcId": intrinsic::ref_(&vpc),
                }),
            ),
        )?;

        let route_table = assembly.insert(
            &[id, construct.as_str(), "RouteTable"],
            CfnResource::new(
                "AWS::EC2::RouteTable",
                json!({
                    "Tags": [intrinsic::name_tag(&subnet_name)],
                    "VpcId": intrinsic::ref_(&vpc),
                }),
            ),
        )?;

        assembly.insert(
            &[id, construct.as_str(), "RouteTableAssociation"],
            CfnResource::new(
                "AWS::EC2::SubnetRouteTableAssociation",
                json!({
                    "RouteTableId": intrinsic::ref_(&route_table),
                    "SubnetId": intrinsic::ref_(&subnet),
                }),
            ),
        )?;
    }
    Ok(())
}

pub fn walk_instance(
    assembly: &mut Assembly,
    this_thing: &str,
    resource: &Resource,
    instance: &InstanceSpec,
) -> Result<(), Error> {
    let id = resource.id.as_str();

    let target = assembly.target(this_thing, &instance.network)?;
    let ResourceSpec::Network(network) = &target.spec else {
        return Err(Error::WrongKind {
            this_thing: this_thing.to_string(),
            target: instance.network.to_string(),
            expected: ResourceKind::Network.as_str(),
            actual: target.spec.kind().as_str(),
        });
    };
    let vpc = assembly.resolve(this_thing, &instance.network)?;
    // Instances are placed in the network's first subnet.
    let first_subnet = subnet_id(network, 0);
    let subnet = super::logical_id(&[target.id.as_str(), first_subnet.as_str(), "Subnet"]);

    let name = assembly.construct_path(&[id]);
    let group_description = assembly.construct_path(&[id, "InstanceSecurityGroup"]);
    let security_group = assembly.insert(
        &[id, "InstanceSecurityGroup", "Resource"],
        CfnResource::new(
            "AWS::EC2::SecurityGroup",
            json!({
                "GroupDescription": group_description,
                "SecurityGroupEgress": [{
                    "CidrIp": "0.0.0.0/0",
                    "Description": "Allow all outbound traffic by default",
                    "IpProtocol": "-1",
                }],
                "Tags": [intrinsic::name_tag(&name)],
                "VpcId": vpc,
            }),
        ),
    )?;

    let role = assembly.insert(
        &[id, "InstanceRole", "Resource"],
        CfnResource::new(
            "AWS::IAM::Role",
            json!({
                "AssumeRolePolicyDocument": intrinsic::assume_role_policy("ec2.amazonaws.com"),
                "Tags": [intrinsic::name_tag(&name)],
            }),
        ),
    )?;

    let profile = assembly.insert(
        &[id, "InstanceProfile"],
        CfnResource::new(
            "AWS::IAM::InstanceProfile",
            json!({ "Roles": [intrinsic::ref_(&role)] }),
        ),
    )?;

    let image_id = match &instance.machine_image {
        MachineImage::LatestAmazonLinux2 => {
            let parameter = assembly.insert_parameter(
                &format!(
                    "SsmParameterValue:{}:Parameter",
                    MachineImage::AMAZON_LINUX_2_PARAMETER
                ),
                Parameter {
                    type_: "AWS::SSM::Parameter::Value<AWS::EC2::Image::Id>".to_string(),
                    default: MachineImage::AMAZON_LINUX_2_PARAMETER.to_string(),
                },
            );
            intrinsic::ref_(&parameter)
        }
        MachineImage::Id(image) => Value::String(image.clone()),
    };

    assembly.insert(
        &[id, "Resource"],
        CfnResource::new(
            "AWS::EC2::Instance",
            json!({
                "AvailabilityZone": intrinsic::select_az(0),
                "IamInstanceProfile": intrinsic::ref_(&profile),
                "ImageId": image_id,
                "InstanceType": instance.instance_type,
                "SecurityGroupIds": [intrinsic::get_att(&security_group, "GroupId")],
                "SubnetId": intrinsic::ref_(&subnet),
                "Tags": [intrinsic::name_tag(&name)],
            }),
        )
        .depends_on(role),
    )?;
    Ok(())
}
