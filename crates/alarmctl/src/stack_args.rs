use anyhow::Context;
use compose::StackConfig;
use std::path::PathBuf;

/// Arguments which select the configuration of the composed stack.
#[derive(Debug, Clone, clap::Args)]
pub struct StackArgs {
    #[clap(flatten)]
    pub config: StackConfig,
    /// YAML file of the stack configuration.
    /// When given, it replaces configuration flags. An API key or endpoint
    /// which the file leaves empty is taken from `APIKEY` or `ENDPOINT`.
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

impl StackArgs {
    pub fn load(&self) -> anyhow::Result<StackConfig> {
        match &self.config_file {
            Some(path) => {
                let mut config = StackConfig::from_yaml_file(path)?;

                if config.api_key.is_empty() {
                    config.api_key = self.config.api_key.clone();
                }
                if config.endpoint.is_empty() {
                    config.endpoint = self.config.endpoint.clone();
                }
                Ok(config)
            }
            None => Ok(self.config.clone()),
        }
    }

    /// Compose the configured stack and validate it.
    pub fn compose(&self) -> anyhow::Result<models::Stack> {
        let config = self.load()?;
        let stack = compose::compose(&config).context("composing stack")?;

        if let Err(errors) = validation::validate(&stack).into_result() {
            for err in errors.iter() {
                tracing::error!(scope = %err.scope, error = %err.error, "validation error");
            }
            anyhow::bail!("stack {} has {} validation error(s)", stack.name, errors.len());
        }
        Ok(stack)
    }
}
