use crate::{output, CliContext, StackArgs};
use anyhow::Context;
use models::ResourceSpec;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct Render {
    #[clap(flatten)]
    stack: StackArgs,
    /// JSON file of the bus event to render, or `-` to read it from stdin.
    #[clap(long)]
    event: PathBuf,
}

/// A webhook request body, as rendered for one target of a rule.
#[derive(Debug, Serialize)]
pub struct RenderedBody {
    rule: String,
    destination: String,
    body: String,
}

impl output::CliOutput for RenderedBody {
    type CellValue = String;

    fn table_headers() -> Vec<&'static str> {
        vec!["Rule", "Destination", "Body"]
    }

    fn into_table_row(self) -> Vec<Self::CellValue> {
        vec![self.rule, self.destination, self.body]
    }
}

impl Render {
    pub fn run(&self, ctx: &mut CliContext) -> anyhow::Result<()> {
        let event = self.read_event()?;
        let stack = self.stack.compose()?;

        let mut rendered = Vec::new();
        for resource in &stack.resources {
            let ResourceSpec::Rule(rule) = &resource.spec else {
                continue;
            };
            for target in &rule.targets {
                let body = target.input.render_body(&event).with_context(|| {
                    format!(
                        "rendering input of rule {} for {}",
                        resource.id, target.destination
                    )
                })?;

                rendered.push(RenderedBody {
                    rule: resource.id.to_string(),
                    destination: target.destination.target.to_string(),
                    body,
                });
            }
        }
        tracing::debug!(bodies = rendered.len(), "rendered targets");

        ctx.write_all(rendered)
    }

    fn read_event(&self) -> anyhow::Result<serde_json::Value> {
        let content = if self.event.as_os_str() == "-" {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("reading event from stdin")?;
            content
        } else {
            std::fs::read_to_string(&self.event)
                .with_context(|| format!("reading event {}", self.event.display()))?
        };

        serde_json::from_str(&content).context("event is not valid JSON")
    }
}
