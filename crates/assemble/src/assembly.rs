use super::{intrinsic, logical_id, CfnResource, Error, Parameter, Template};
use models::{Attribute, LogicalId, Reference, Resource, ResourceKind, Stack, StringValue};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Assembly is the in-progress synthesis of a Stack into its Template.
pub struct Assembly<'a> {
    pub stack: &'a Stack,
    pub template: Template,
    // Roles assumed by the event router to invoke each destination,
    // keyed on the destination's id.
    events_roles: BTreeMap<&'a LogicalId, String>,
}

impl<'a> Assembly<'a> {
    pub fn new(stack: &'a Stack) -> Self {
        Self {
            stack,
            template: Template::new(stack.description.clone()),
            events_roles: BTreeMap::new(),
        }
    }

    /// Insert `resource` at construct `path`, returning its logical id.
    pub fn insert(&mut self, path: &[&str], mut resource: CfnResource) -> Result<String, Error> {
        let id = logical_id(path);

        if self.template.resources.contains_key(&id) {
            return Err(Error::LogicalIdCollision {
                path: path.join("/"),
                logical_id: id,
            });
        }
        resource.metadata.insert(
            "aws:cdk:path".to_string(),
            Value::String(self.construct_path(path)),
        );
        tracing::trace!(%id, type_ = %resource.type_, "synthesized resource");

        self.template.resources.insert(id.clone(), resource);
        Ok(id)
    }

    /// Insert parameter `name`, returning its logical id.
    /// Parameters are idempotent: inserting an existing parameter is a no-op.
    pub fn insert_parameter(&mut self, name: &str, parameter: Parameter) -> String {
        let id = logical_id(&[name]);
        self.template
            .parameters
            .entry(id.clone())
            .or_insert(parameter);
        id
    }

    /// Fully-qualified construct path of `path`, rooted at the stack.
    pub fn construct_path(&self, path: &[&str]) -> String {
        let mut out = self.stack.name.clone();
        for component in path {
            out.push('/');
            out.push_str(component);
        }
        out
    }

    /// Resolve the Resource referenced by `reference`.
    pub fn target(&self, this_thing: &str, reference: &Reference) -> Result<&'a Resource, Error> {
        self.stack
            .get(&reference.target)
            .ok_or_else(|| Error::UnresolvedReference {
                this_thing: this_thing.to_string(),
                target: reference.to_string(),
            })
    }

    /// Resolve `reference` into its template intrinsic.
    pub fn resolve(&self, this_thing: &str, reference: &Reference) -> Result<Value, Error> {
        let target = self.target(this_thing, reference)?;
        let id = primary_id(&target.id);

        Ok(match (target.spec.kind(), reference.attribute) {
            (_, None) => intrinsic::ref_(&id),
            // The `Ref` of these kinds is their name or id.
            (ResourceKind::Connection | ResourceKind::Destination, Some(Attribute::Name))
            | (ResourceKind::Instance, Some(Attribute::Id)) => intrinsic::ref_(&id),
            (_, Some(attribute)) => intrinsic::get_att(&id, attribute.as_str()),
        })
    }

    pub fn resolve_string(&self, this_thing: &str, value: &StringValue) -> Result<Value, Error> {
        match value {
            StringValue::Literal(s) => Ok(Value::String(s.clone())),
            StringValue::Ref(reference) => self.resolve(this_thing, reference),
        }
    }

    /// Logical id of the role assumed to invoke `destination`,
    /// inserting the role and its policy if they don't yet exist.
    pub fn events_role(&mut self, destination: &'a LogicalId) -> Result<String, Error> {
        if let Some(role) = self.events_roles.get(destination) {
            return Ok(role.clone());
        }
        let role = self.insert(
            &[destination.as_str(), "EventsRole", "Resource"],
            CfnResource::new(
                "AWS::IAM::Role",
                json!({
                    "AssumeRolePolicyDocument":
                        intrinsic::assume_role_policy("events.amazonaws.com"),
                }),
            ),
        )?;

        let policy_path = [destination.as_str(), "EventsRole", "DefaultPolicy", "Resource"];
        let policy_name = logical_id(&policy_path);
        self.insert(
            &policy_path,
            CfnResource::new(
                "AWS::IAM::Policy",
                json!({
                    "PolicyDocument": {
                        "Statement": [{
                            "Action": "events:InvokeApiDestination",
                            "Effect": "Allow",
                            "Resource": intrinsic::get_att(&primary_id(destination), "Arn"),
                        }],
                        "Version": "2012-10-17",
                    },
                    "PolicyName": policy_name,
                    "Roles": [intrinsic::ref_(&role)],
                }),
            ),
        )?;

        self.events_roles.insert(destination, role.clone());
        Ok(role)
    }
}

/// Logical id of the primary template resource of descriptor `id`.
pub fn primary_id(id: &LogicalId) -> String {
    logical_id(&[id.as_str(), "Resource"])
}
