use clap::{Parser, Subcommand};
use std::io::Write;

mod output;
mod render;
mod resources;
mod schema;
mod stack_args;
mod synth;

pub use output::{Output, OutputType};
use output::CliOutput;
pub use stack_args::StackArgs;

/// A command-line tool for composing and synthesizing alarm notification stacks.
///
/// A stack routes state changes of a metric alarm to a webhook, through a rule
/// of the event bus. Stacks are composed from flags, environment variables
/// (`APIKEY`, `ENDPOINT`), or a YAML `--config-file`.
#[derive(Debug, Parser)]
#[clap(author, about, version)]
pub struct Cli {
    #[clap(subcommand)]
    pub cmd: Command,

    #[clap(flatten)]
    pub log_args: cli_common::LogArgs,

    #[clap(flatten)]
    pub output: Output,
}

#[derive(Debug, Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Compose and validate the stack, and write its deployment template.
    Synth(synth::Synth),
    /// List the resources of the composed stack.
    Resources(resources::Resources),
    /// Render the webhook payloads which the stack sends for an event.
    Render(render::Render),
    /// Print JSON schemas of the stack configuration and stack model.
    Schema(schema::Schema),
}

#[derive(Debug)]
pub struct CliContext {
    output: Output,
}

impl CliContext {
    pub fn write_all<I, T>(&mut self, items: I) -> anyhow::Result<()>
    where
        T: CliOutput,
        I: IntoIterator<Item = T>,
    {
        match self.get_output_type() {
            OutputType::Json => output::print_json(items),
            OutputType::Yaml => output::print_yaml(items),
            OutputType::Table => output::print_table(items),
        }
    }

    pub fn get_output_type(&self) -> OutputType {
        if let Some(ty) = self.output.output {
            ty
        } else if atty::is(atty::Stream::Stdout) {
            OutputType::Table
        } else {
            OutputType::Yaml
        }
    }
}

impl Cli {
    pub fn run(&self) -> anyhow::Result<()> {
        let mut context = CliContext {
            output: self.output.clone(),
        };

        match &self.cmd {
            Command::Synth(synth) => synth.run(&mut context),
            Command::Resources(resources) => resources.run(&mut context),
            Command::Render(render) => render.run(&mut context),
            Command::Schema(schema) => schema.run(&mut context),
        }
    }
}

/// Write `content` to `path`, or to stdout if `path` is None.
fn write_content(path: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    use anyhow::Context;

    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
