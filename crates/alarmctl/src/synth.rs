use crate::{CliContext, StackArgs};
use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct Synth {
    #[clap(flatten)]
    stack: StackArgs,
    /// Serialization of the written template.
    #[clap(long = "format", value_enum, default_value = "json")]
    template_format: TemplateFormat,
    /// File to write the template to. Defaults to stdout.
    #[clap(long)]
    out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq)]
pub enum TemplateFormat {
    Json,
    Yaml,
}

impl Synth {
    pub fn run(&self, _ctx: &mut CliContext) -> anyhow::Result<()> {
        let stack = self.stack.compose()?;
        let template = assemble::synthesize(&stack)
            .with_context(|| format!("synthesizing stack {}", stack.name))?;

        let content = match self.template_format {
            TemplateFormat::Json => template.to_json_pretty()?,
            TemplateFormat::Yaml => template.to_yaml()?,
        };
        crate::write_content(self.out.as_deref(), &content)?;

        tracing::info!(
            stack = %stack.name,
            resources = template.resources.len(),
            "wrote template"
        );
        Ok(())
    }
}
