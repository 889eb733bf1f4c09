use assemble::{synthesize, Error, Template};
use compose::{compose, StackConfig};
use models::{Comparator, LogicalId, Reference, Resource, ResourceSpec, Stack};
use pretty_assertions::assert_eq;
use serde_json::json;

const ENDPOINT: &str = "https://api.chatwork.com/v2/rooms/123/messages";

fn minimal() -> Stack {
    compose(&StackConfig::minimal("key-123", ENDPOINT)).unwrap()
}

fn properties(template: &Template, logical_id: &str) -> serde_json::Value {
    template
        .resources
        .get(logical_id)
        .unwrap_or_else(|| panic!("template has no resource {logical_id}"))
        .properties
        .clone()
}

#[test]
fn test_minimal_template_resources() {
    let template = synthesize(&minimal()).unwrap();

    let ids: Vec<(&str, &str)> = template
        .resources
        .iter()
        .map(|(id, r)| (id.as_str(), r.type_.as_str()))
        .collect();

    assert_eq!(
        ids,
        vec![
            ("Connection89AD5CF5", "AWS::Events::Connection"),
            ("Destination920A3C57", "AWS::Events::ApiDestination"),
            ("DestinationEventsRole7DA63556", "AWS::IAM::Role"),
            ("DestinationEventsRoleDefaultPolicy798A1E31", "AWS::IAM::Policy"),
            ("SecretA720EF05", "AWS::SecretsManager::Secret"),
            ("testAlarmRule8DAE3C3C", "AWS::Events::Rule"),
            ("testEC2CpuAlarm17773337", "AWS::CloudWatch::Alarm"),
        ]
    );
    assert!(template.parameters.is_empty());
    assert_eq!(template.format_version, "2010-09-09");
}

#[test]
fn test_alarm_and_secret_properties() {
    let template = synthesize(&minimal()).unwrap();

    assert_eq!(
        properties(&template, "testEC2CpuAlarm17773337"),
        json!({
            "ComparisonOperator": "GreaterThanOrEqualToThreshold",
            "Dimensions": [{"Name": "InstanceId", "Value": "i-0a51f37c60f7ba142"}],
            "EvaluationPeriods": 1,
            "MetricName": "CPUUtilization",
            "Namespace": "AWS/EC2",
            "Period": 60,
            "Statistic": "Average",
            "Threshold": 0.005,
        })
    );

    let secret = &template.resources["SecretA720EF05"];
    assert_eq!(
        secret.properties,
        json!({
            "GenerateSecretString": {
                "GenerateStringKey": "password",
                "SecretStringTemplate": "{\"apiKey\":\"key-123\"}",
            },
            "Name": "ChatWorkApiKey",
        })
    );
    assert_eq!(secret.deletion_policy.as_deref(), Some("Delete"));
    assert_eq!(
        secret.metadata["aws:cdk:path"],
        json!("EventbridgeChatworkStack/Secret/Resource")
    );
}

#[test]
fn test_connection_and_destination_properties() {
    let template = synthesize(&minimal()).unwrap();

    assert_eq!(
        properties(&template, "Connection89AD5CF5"),
        json!({
            "AuthParameters": {
                "ApiKeyAuthParameters": {
                    "ApiKeyName": "X-ChatWorkToken",
                    "ApiKeyValue": {"Fn::Join": ["", [
                        "{{resolve:secretsmanager:",
                        {"Ref": "SecretA720EF05"},
                        ":SecretString:apiKey::}}",
                    ]]},
                },
            },
            "AuthorizationType": "API_KEY",
            "Description": "Connection with API Key X-ChatWorkToken",
        })
    );
    assert_eq!(
        properties(&template, "Destination920A3C57"),
        json!({
            "ConnectionArn": {"Fn::GetAtt": ["Connection89AD5CF5", "Arn"]},
            "Description": "Calling example.com with API key x-api-key",
            "HttpMethod": "POST",
            "InvocationEndpoint": ENDPOINT,
        })
    );
}

#[test]
fn test_rule_properties() {
    let template = synthesize(&minimal()).unwrap();

    assert_eq!(
        properties(&template, "testAlarmRule8DAE3C3C"),
        json!({
            "EventPattern": {
                "detail-type": ["CloudWatch Alarm State Change"],
                "resources": [{"Fn::GetAtt": ["testEC2CpuAlarm17773337", "Arn"]}],
                "source": ["aws.cloudwatch"],
            },
            "Name": "testAlarmRule",
            "State": "ENABLED",
            "Targets": [{
                "Arn": {"Fn::GetAtt": ["Destination920A3C57", "Arn"]},
                "Id": "Target0",
                "InputTransformer": {
                    "InputPathsMap": {
                        "alarmName": "$.detail.alarmName",
                        "reason": "$.detail.state.reason",
                    },
                    "InputTemplate": "{\"content\":\":loudspeaker:<alarmName>\\n:new: <reason>\"}",
                },
                "RoleArn": {"Fn::GetAtt": ["DestinationEventsRole7DA63556", "Arn"]},
            }],
        })
    );
    assert_eq!(
        properties(&template, "DestinationEventsRoleDefaultPolicy798A1E31"),
        json!({
            "PolicyDocument": {
                "Statement": [{
                    "Action": "events:InvokeApiDestination",
                    "Effect": "Allow",
                    "Resource": {"Fn::GetAtt": ["Destination920A3C57", "Arn"]},
                }],
                "Version": "2012-10-17",
            },
            "PolicyName": "DestinationEventsRoleDefaultPolicy798A1E31",
            "Roles": [{"Ref": "DestinationEventsRole7DA63556"}],
        })
    );
}

#[test]
fn test_inline_literal_connection() {
    let config = StackConfig {
        auth: compose::AuthMode::InlineLiteral,
        ..StackConfig::minimal("", ENDPOINT)
    };
    let template = synthesize(&compose(&config).unwrap()).unwrap();

    assert_eq!(
        template.of_type("AWS::SecretsManager::Secret").count(),
        0
    );
    assert_eq!(
        properties(&template, "Connection89AD5CF5")["AuthParameters"],
        json!({"ApiKeyAuthParameters": {"ApiKeyName": "Token if Nedded", "ApiKeyValue": "hoge"}})
    );
}

#[test]
fn test_extended_template() {
    let template = synthesize(&compose(&StackConfig::extended(ENDPOINT)).unwrap()).unwrap();

    assert_eq!(template.resources.len(), 17);
    assert_eq!(template.of_type("AWS::EC2::Subnet").count(), 2);
    assert_eq!(template.of_type("AWS::EC2::RouteTable").count(), 2);
    assert_eq!(
        template
            .of_type("AWS::EC2::SubnetRouteTableAssociation")
            .count(),
        2
    );

    assert_eq!(
        properties(&template, "VpcIsolatedSubnet1SubnetE48C5737")["CidrBlock"],
        json!("10.0.0.0/24")
    );
    assert_eq!(
        properties(&template, "VpcIsolatedSubnet2Subnet16364B91")["CidrBlock"],
        json!("10.0.1.0/24")
    );

    let instance = &template.resources["InstanceC1063A87"];
    assert_eq!(instance.depends_on, vec!["InstanceInstanceRoleE9785DE5"]);
    assert_eq!(
        instance.properties["SubnetId"],
        json!({"Ref": "VpcIsolatedSubnet1SubnetE48C5737"})
    );
    assert_eq!(
        instance.properties["ImageId"],
        json!({"Ref": "SsmParameterValueawsserviceamiamazonlinuxlatestamzn2amihvmx8664gp2Parameter"})
    );
    assert_eq!(instance.properties["InstanceType"], json!("t3.micro"));

    let parameter =
        &template.parameters["SsmParameterValueawsserviceamiamazonlinuxlatestamzn2amihvmx8664gp2Parameter"];
    assert_eq!(
        parameter.default,
        "/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2"
    );

    assert_eq!(
        properties(&template, "testEC2CpuAlarm17773337")["Dimensions"],
        json!([{"Name": "InstanceId", "Value": {"Ref": "InstanceC1063A87"}}])
    );
}

#[test]
fn test_synthesis_is_deterministic() {
    for config in [
        StackConfig::minimal("key-123", ENDPOINT),
        StackConfig::extended(ENDPOINT),
    ] {
        let one = synthesize(&compose(&config).unwrap()).unwrap();
        let two = synthesize(&compose(&config).unwrap()).unwrap();

        assert_eq!(one.to_json_pretty().unwrap(), two.to_json_pretty().unwrap());
        assert_eq!(one.to_yaml().unwrap(), two.to_yaml().unwrap());
    }
}

#[test]
fn test_targets_of_a_destination_share_its_role() {
    let mut stack = minimal();
    let mut second = stack.resources[4].clone();
    second.id = LogicalId::new("secondRule");
    if let ResourceSpec::Rule(rule) = &mut second.spec {
        rule.rule_name = None;
    }
    stack.resources.push(second);

    let template = synthesize(&stack).unwrap();

    assert_eq!(template.of_type("AWS::IAM::Role").count(), 1);
    assert_eq!(template.of_type("AWS::Events::Rule").count(), 2);
    for (_, rule) in template.of_type("AWS::Events::Rule") {
        assert_eq!(
            rule.properties["Targets"][0]["RoleArn"],
            json!({"Fn::GetAtt": ["DestinationEventsRole7DA63556", "Arn"]})
        );
    }
}

#[test]
fn test_equal_to_threshold_is_rejected() {
    let mut stack = minimal();
    if let ResourceSpec::Alarm(alarm) = &mut stack.resources[0].spec {
        alarm.comparator = Comparator::EqualToThreshold;
    }

    let err = synthesize(&stack).unwrap_err();
    assert!(matches!(err, Error::UnsupportedComparator { .. }));
    insta::assert_snapshot!(err.to_string(), @"alarm testEC2CpuAlarm uses comparator EqualToThreshold, which cannot be expressed by a metric alarm");
}

#[test]
fn test_unresolved_reference() {
    let mut stack = minimal();
    stack.resources.retain(|r: &Resource| r.id.as_str() != "Connection");

    let err = synthesize(&stack).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"destination Destination references Connection.Arn, which is not declared in the stack");

    let mut stack = minimal();
    if let ResourceSpec::Destination(destination) = &mut stack.resources[3].spec {
        destination.connection = Reference::to_ref(&LogicalId::new("Secret"));
    }
    // Kinds aren't checked by synthesis, only that references resolve.
    synthesize(&stack).unwrap();
}
