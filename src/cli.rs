//! Command-line surface and the process exit-code contract.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::AsyncBufRead;
use tracing::error;

use crate::archive::load_vfs;
use crate::config::{ErrorPolicy, ShellConfig};
use crate::error::EXIT_FATAL;
use crate::shell::{read_script, Shell};

#[derive(Parser, Debug)]
#[command(name = "vfs-shell")]
#[command(about = "A teaching shell over a zip-backed virtual filesystem")]
#[command(version)]
pub struct Cli {
    /// Zip archive to load as the filesystem
    #[arg(long = "vfs-zip", value_name = "ZIP")]
    pub vfs_zip: PathBuf,

    /// Script to run at startup (plain text, or base64 if it ends in .b64)
    #[arg(long = "startup", value_name = "SCRIPT")]
    pub startup: Option<PathBuf>,

    /// What to do when a startup-script line fails
    #[arg(long = "on-error", value_enum, default_value_t = ErrorPolicy::Halt)]
    pub on_error: ErrorPolicy,

    /// Enter the interactive shell after the startup script
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,
}

impl Cli {
    pub fn into_config(self) -> ShellConfig {
        ShellConfig {
            vfs_zip: self.vfs_zip,
            startup: self.startup,
            on_error: self.on_error,
            interactive: self.interactive,
        }
    }
}

/// Load the archive, run the startup script and/or the REPL, and return the
/// process exit code.
///
/// Without `--startup` the REPL runs directly. With it, the REPL only follows
/// when `--interactive` is set and the script succeeded without `exit`.
pub async fn run<R, W, E>(config: ShellConfig, input: R, out: &mut W, err: &mut E) -> i32
where
    R: AsyncBufRead + Unpin,
    W: Write,
    E: Write,
{
    let loaded = match load_vfs(&config.vfs_zip).await {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(path = %config.vfs_zip.display(), "failed to load archive");
            let _ = writeln!(err, "VFS load error: {}", e);
            return EXIT_FATAL;
        }
    };

    let script = match &config.startup {
        Some(path) => match read_script(path).await {
            Ok(source) => Some(source),
            Err(e) => {
                let _ = writeln!(err, "{}", e);
                return EXIT_FATAL;
            }
        },
        None => None,
    };

    let policy = config.on_error;
    let interactive = config.interactive || script.is_none();
    let mut shell = Shell::new(loaded, config);

    if let Some(source) = script {
        let outcome = match shell.run_script(&source, policy, out, err).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "cannot write script output");
                return EXIT_FATAL;
            }
        };
        if outcome.exited || outcome.exit_code != 0 || !interactive {
            return outcome.exit_code;
        }
    }

    match shell.run_repl(input, out, err).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "interactive session failed");
            EXIT_FATAL
        }
    }
}
