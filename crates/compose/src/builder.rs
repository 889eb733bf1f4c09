use super::Error;
use models::{LogicalId, Resource, ResourceSpec, Stack};

/// StackBuilder accumulates descriptors in declaration order.
/// Descriptors are write-once: there's no way to modify or remove
/// a descriptor after it's been added.
#[derive(Debug)]
pub struct StackBuilder {
    name: String,
    description: Option<String>,
    resources: Vec<Resource>,
}

impl StackBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            resources: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a descriptor under construct `id`, returning its logical id.
    pub fn add(&mut self, id: &str, spec: ResourceSpec) -> Result<LogicalId, Error> {
        let id = LogicalId::new(id);

        if self.resources.iter().any(|r| r.id == id) {
            return Err(Error::DuplicateResource {
                id: id.to_string(),
                kind: spec.kind().as_str(),
            });
        }
        tracing::debug!(%id, kind = %spec.kind(), "declared resource");

        self.resources.push(Resource {
            id: id.clone(),
            spec,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn build(self) -> Stack {
        let Self {
            name,
            description,
            resources,
        } = self;

        Stack {
            name,
            description,
            resources,
        }
    }
}
