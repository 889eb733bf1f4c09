use super::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STACK_NAME: &str = "EventbridgeChatworkStack";
/// Instance which is alarmed upon when no instance is provisioned by the stack.
pub const DEFAULT_INSTANCE_ID: &str = "i-0a51f37c60f7ba142";
/// Header expected by the Chatwork webhook API.
pub const CHATWORK_TOKEN_HEADER: &str = "X-ChatWorkToken";
/// Header and value of the inline-literal authorization, which are
/// placeholders rather than credentials the webhook receiver accepts.
pub const INLINE_PLACEHOLDER_HEADER: &str = "Token if Nedded";
pub const INLINE_PLACEHOLDER_VALUE: &str = "hoge";

/// AuthMode selects how the webhook connection obtains its API key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// Store the API key in a managed secret, seeded from `APIKEY`,
    /// and send it in the `X-ChatWorkToken` header.
    #[default]
    ManagedSecret,
    /// Embed a literal API key value into the connection.
    /// No secret is declared.
    InlineLiteral,
}

impl AuthMode {
    pub fn default_header(&self) -> &'static str {
        match self {
            Self::ManagedSecret => CHATWORK_TOKEN_HEADER,
            Self::InlineLiteral => INLINE_PLACEHOLDER_HEADER,
        }
    }
}

/// StackConfig is the complete input of stack composition.
/// Composition never consults the process environment: `APIKEY` and
/// `ENDPOINT` are read into this struct by the command-line layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, clap::Args)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
#[clap(rename_all = "kebab-case")]
pub struct StackConfig {
    /// Name of the composed stack.
    #[clap(long, default_value = DEFAULT_STACK_NAME)]
    pub stack_name: String,
    /// Seed value of the managed API key secret.
    /// Defaults to an empty string when unset.
    #[clap(long, env = "APIKEY", default_value = "", hide_env_values = true)]
    pub api_key: String,
    /// URL of the webhook endpoint.
    /// Defaults to an empty string when unset.
    #[clap(long, env = "ENDPOINT", default_value = "")]
    pub endpoint: String,
    /// Id of an existing instance to alarm upon.
    /// Ignored if --include-compute-instance is set.
    #[clap(long, default_value = DEFAULT_INSTANCE_ID)]
    pub instance_id: String,
    /// Provision an isolated network and compute instance,
    /// and alarm upon the provisioned instance.
    #[clap(long)]
    pub include_compute_instance: bool,
    /// Authorization of the webhook connection.
    #[clap(long, value_enum, default_value = "managed-secret")]
    pub auth: AuthMode,
    /// Header which carries the API key.
    /// Defaults to the header of the selected --auth mode.
    #[clap(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
    /// Literal API key value, used when --auth=inline-literal.
    #[clap(long, default_value = INLINE_PLACEHOLDER_VALUE)]
    pub inline_value: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            api_key: String::new(),
            endpoint: String::new(),
            instance_id: DEFAULT_INSTANCE_ID.to_string(),
            include_compute_instance: false,
            auth: AuthMode::ManagedSecret,
            header_name: None,
            inline_value: INLINE_PLACEHOLDER_VALUE.to_string(),
        }
    }
}

impl StackConfig {
    /// Configuration which alarms on an existing instance, and
    /// authorizes with a managed secret seeded by `api_key`.
    pub fn minimal(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Configuration which provisions its own network and instance,
    /// and authorizes with the inline placeholder key.
    pub fn extended(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            include_compute_instance: true,
            auth: AuthMode::InlineLiteral,
            ..Default::default()
        }
    }

    /// Effective header name of the API key.
    pub fn effective_header_name(&self) -> &str {
        self.header_name
            .as_deref()
            .unwrap_or_else(|| self.auth.default_header())
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(Debug, clap::Parser)]
    struct Args {
        #[clap(flatten)]
        config: StackConfig,
    }

    fn clear_env() {
        std::env::remove_var("APIKEY");
        std::env::remove_var("ENDPOINT");
    }

    #[test]
    #[serial_test::serial]
    fn test_unset_environment_defaults_to_empty_strings() {
        clear_env();
        let Args { config } = Args::try_parse_from(["test"]).unwrap();

        assert_eq!(config.api_key, "");
        assert_eq!(config.endpoint, "");
        assert_eq!(config, StackConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn test_environment_is_read_into_config() {
        clear_env();
        std::env::set_var("APIKEY", "secret-key");
        std::env::set_var("ENDPOINT", "https://api.chatwork.com/v2/rooms/1/messages");

        let Args { config } = Args::try_parse_from(["test"]).unwrap();
        clear_env();

        assert_eq!(config.api_key, "secret-key");
        assert_eq!(
            config.endpoint,
            "https://api.chatwork.com/v2/rooms/1/messages"
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_flags_override_environment() {
        clear_env();
        std::env::set_var("ENDPOINT", "https://from-env");

        let Args { config } = Args::try_parse_from([
            "test",
            "--endpoint",
            "https://from-flag",
            "--include-compute-instance",
            "--auth",
            "inline-literal",
            "--header-name",
            "X-Other",
        ])
        .unwrap();
        clear_env();

        assert_eq!(config.endpoint, "https://from-flag");
        assert!(config.include_compute_instance);
        assert_eq!(config.auth, AuthMode::InlineLiteral);
        assert_eq!(config.effective_header_name(), "X-Other");
    }

    #[test]
    fn test_effective_header_names() {
        assert_eq!(
            StackConfig::minimal("k", "e").effective_header_name(),
            "X-ChatWorkToken"
        );
        assert_eq!(
            StackConfig::extended("e").effective_header_name(),
            "Token if Nedded"
        );
    }

    #[test]
    fn test_yaml_config() {
        let config = StackConfig::from_yaml(
            r#"
endpoint: https://example.com/hook
includeComputeInstance: true
auth: inline-literal
"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://example.com/hook");
        assert_eq!(config.api_key, "");
        assert_eq!(config.stack_name, DEFAULT_STACK_NAME);
        assert_eq!(config.inline_value, "hoge");
        assert_eq!(config.auth, AuthMode::InlineLiteral);

        StackConfig::from_yaml("unknownField: 1").unwrap_err();
    }
}
