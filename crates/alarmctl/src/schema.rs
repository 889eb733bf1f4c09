use crate::CliContext;
use compose::StackConfig;

#[derive(Debug, clap::Args)]
pub struct Schema {}

impl Schema {
    pub fn run(&self, _ctx: &mut CliContext) -> anyhow::Result<()> {
        let schemas = serde_json::json!({
            "stackConfig": models::schema_of::<StackConfig>(),
            "stack": models::stack_schema(),
        });
        crate::write_content(None, &serde_json::to_string_pretty(&schemas)?)
    }
}
