//! Contains helpers and things that are used by all alarmctl executables.
mod logging;

pub use logging::{init_logging, LogArgs, LogFormat, LogLevel};

/// A return type indicating that a function cannot return.
pub enum Never {}

/// Executes the given `run_fn` and handles the result by exiting. This
/// function will never return, so a typical `fn main` will have this as
/// the last line. Argument parsing is left up to the caller.
/// Returning an `Err` will cause the error to be logged and the application
/// will exit with a code of `1`.
pub fn run_cli_main<A, S, F>(args: A, run_fn: F) -> Never
where
    F: FnOnce(A) -> Result<S, anyhow::Error>,
    S: Into<Success>,
{
    let error = match run_fn(args).map(Into::<Success>::into) {
        Ok(Success::Exit(code)) => {
            std::process::exit(code);
        }
        Err(err) => err,
    };

    tracing::error!(error = ?error, "execution failed");
    std::process::exit(1);
}

/// Represents the successful execution of a program or subcommand.
#[derive(Debug, PartialEq)]
pub enum Success {
    /// Program should immediately exit with the given code.
    Exit(i32),
}

impl From<()> for Success {
    fn from(_: ()) -> Self {
        Success::Exit(0)
    }
}
