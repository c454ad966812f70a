//! GitHub Actions implementation of [`ResultReporter`].
//!
//! Outputs go to the file named by `GITHUB_OUTPUT`; failures and secret masks
//! are workflow commands written to stdout, where the runner picks them up.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use locator::{LocatorError, ResultReporter};
use tracing::warn;
use uuid::Uuid;

/// Reports results to the Actions runner.
///
/// `W` receives workflow commands; it is stdout in production.
pub struct ActionsReporter<W> {
    output_file: Option<PathBuf>,
    commands: Mutex<W>,
}

impl ActionsReporter<std::io::Stdout> {
    /// Writes outputs to `$GITHUB_OUTPUT` and commands to stdout.
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Self::new(output_file, std::io::stdout())
    }
}

impl<W: Write> ActionsReporter<W> {
    pub fn new(output_file: Option<PathBuf>, commands: W) -> Self {
        Self {
            output_file,
            commands: Mutex::new(commands),
        }
    }

    /// Asks the runner to redact `secret` from all subsequent log output.
    pub fn add_mask(&self, secret: &str) {
        self.command(&format!("::add-mask::{}", escape_data(secret)));
    }

    fn command(&self, line: &str) {
        let mut out = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %e, "Failed to write workflow command");
        }
    }

    fn append_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")?;
        file.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_commands(self) -> W {
        self.commands.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> ResultReporter for ActionsReporter<W> {
    fn set_output(&self, name: &str, value: &str) -> Result<(), LocatorError> {
        match &self.output_file {
            Some(path) => {
                Self::append_output(path, name, value).map_err(|e| LocatorError::Output {
                    message: format!("cannot append to {}: {e}", path.display()),
                })
            }
            None => {
                self.command(&format!(
                    "::set-output name={}::{}",
                    escape_property(name),
                    escape_data(value)
                ));
                Ok(())
            }
        }
    }

    fn set_failed(&self, message: &str) {
        self.command(&format!("::error::{}", escape_data(message)));
    }
}

/// Escapes a workflow command message.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow command property value.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
