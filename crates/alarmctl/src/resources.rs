use crate::{output, CliContext, StackArgs};
use models::{Resource, ResourceKind};
use serde::Serialize;

#[derive(Debug, clap::Args)]
pub struct Resources {
    #[clap(flatten)]
    stack: StackArgs,
}

/// A row of the `resources` listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRow {
    id: String,
    kind: ResourceKind,
    /// Logical id of the resource's primary template resource.
    template_id: String,
    references: Vec<String>,
}

impl ResourceRow {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id.to_string(),
            kind: resource.spec.kind(),
            template_id: assemble::primary_id(&resource.id),
            references: resource
                .spec
                .references()
                .into_iter()
                .map(|(reference, _)| reference.to_string())
                .collect(),
        }
    }
}

impl output::CliOutput for ResourceRow {
    type CellValue = output::JsonCell;

    fn table_headers() -> Vec<&'static str> {
        vec!["Id", "Kind", "Template Id", "References"]
    }

    fn into_table_row(self) -> Vec<Self::CellValue> {
        output::to_table_row(self, &["/id", "/kind", "/templateId", "/references"])
    }
}

impl Resources {
    pub fn run(&self, ctx: &mut CliContext) -> anyhow::Result<()> {
        let stack = self.stack.compose()?;
        ctx.write_all(stack.resources.iter().map(ResourceRow::from_resource))
    }
}
