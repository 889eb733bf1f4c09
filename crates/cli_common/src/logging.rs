use tracing_subscriber::EnvFilter;

/// Arguments controlling the logging of an executable.
#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// The log verbosity. `RUST_LOG`, if set, takes precedence.
    #[clap(
        long = "log.level",
        value_enum,
        default_value = "warn",
        env = "LOG_LEVEL",
        global = true
    )]
    pub level: LogLevel,
    /// The format for log output. Defaults to `color` if stderr
    /// is a terminal, and `json` otherwise.
    #[clap(long = "log.format", value_enum, global = true)]
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Off => "off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Json,
    Text,
    Color,
}

impl LogArgs {
    /// The format which is used, after applying defaults.
    pub fn effective_format(&self) -> LogFormat {
        self.format.unwrap_or_else(|| {
            if atty::is(atty::Stream::Stderr) {
                LogFormat::Color
            } else {
                LogFormat::Json
            }
        })
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }
}

/// Initialize the global tracing subscriber, which writes to stderr.
/// Stdout is reserved for the output of the executable.
pub fn init_logging(args: &LogArgs) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(args.env_filter());

    match args.effective_format() {
        LogFormat::Json => builder
            .json()
            // Without flattening, the message and fields nest under a `"fields"` object.
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .init(),
        LogFormat::Text => builder.with_ansi(false).init(),
        LogFormat::Color => builder.with_ansi(true).init(),
    }
}
