//! Startup script runner.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::{info, warn};

use super::dispatcher::{is_command_line, Dispatch};
use super::Shell;
use crate::config::ErrorPolicy;
use crate::error::EXIT_OK;

/// Script files with this extension hold base64-encoded text.
pub const BASE64_EXTENSION: &str = "b64";

/// Failures loading a startup script. All are fatal.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("startup script not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read startup script '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base64 in startup script '{}': {source}", path.display())]
    Base64 {
        path: PathBuf,
        #[source]
        source: base64::DecodeError,
    },

    #[error("startup script '{}' is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

/// Read a script, decoding it first when the extension is `.b64`.
pub async fn read_script(path: &Path) -> Result<String, ScriptError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScriptError::NotFound { path: path.to_path_buf() });
        }
        Err(source) => return Err(ScriptError::Io { path: path.to_path_buf(), source }),
    };

    let is_base64 = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(BASE64_EXTENSION));
    let bytes = if is_base64 {
        decode_base64(&raw).map_err(|source| ScriptError::Base64 { path: path.to_path_buf(), source })?
    } else {
        raw
    };

    String::from_utf8(bytes).map_err(|_| ScriptError::Encoding { path: path.to_path_buf() })
}

fn decode_base64(raw: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    let text: Vec<u8> = raw.iter().copied().filter(|b| !b.is_ascii_whitespace()).collect();
    STANDARD.decode(text)
}

/// How a script run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Process exit status for this run.
    pub exit_code: i32,
    /// Lines dispatched, failed ones included.
    pub executed: usize,
    pub failures: usize,
    /// The script ran `exit`.
    pub exited: bool,
}

impl Shell {
    /// Run `source` line by line, echoing each command after the prompt.
    ///
    /// Under [`ErrorPolicy::Halt`] the first failure stops the run and its
    /// exit code is returned. Under [`ErrorPolicy::Continue`] every line
    /// runs and the first failure's exit code is returned. `exit` stops the
    /// run without changing that code.
    pub async fn run_script<W: Write, E: Write>(
        &mut self,
        source: &str,
        policy: ErrorPolicy,
        out: &mut W,
        err: &mut E,
    ) -> std::io::Result<ScriptOutcome> {
        let mut outcome = ScriptOutcome { exit_code: EXIT_OK, executed: 0, failures: 0, exited: false };
        let mut first_failure: Option<i32> = None;
        info!(lines = source.lines().count(), %policy, "running startup script");

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if !is_command_line(line) {
                continue;
            }
            writeln!(out, "{}{}", self.session.prompt(), line.trim())?;
            outcome.executed += 1;

            match self.exec(line).await {
                Ok(Dispatch::Output(text)) => out.write_all(text.as_bytes())?,
                Ok(Dispatch::Skipped) => {}
                Ok(Dispatch::Exit) => {
                    outcome.exited = true;
                    break;
                }
                Err(e) => {
                    writeln!(err, "{}", e)?;
                    outcome.failures += 1;
                    let code = e.exit_code();
                    first_failure.get_or_insert(code);
                    if policy == ErrorPolicy::Halt {
                        warn!(line = idx + 1, code, "startup script halted");
                        writeln!(err, "startup halted: line {} failed (rc={})", idx + 1, code)?;
                        break;
                    }
                }
            }
        }

        out.flush()?;
        outcome.exit_code = first_failure.unwrap_or(EXIT_OK);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::session::test_support::session_with;

    fn shell(paths: &[&str]) -> Shell {
        Shell::from_session(session_with(paths))
    }

    async fn run(shell: &mut Shell, source: &str, policy: ErrorPolicy) -> (ScriptOutcome, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = shell.run_script(source, policy, &mut out, &mut err).await.unwrap();
        (outcome, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vfs-shell-script-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[tokio::test]
    async fn test_successful_script_runs_every_line() {
        let mut sh = shell(&["docs/readme.txt"]);
        let script = "# comment\r\nls\r\n\r\ncd docs\r\npwd\r\n";
        let (outcome, out, err) = run(&mut sh, script, ErrorPolicy::Halt).await;
        assert_eq!(outcome, ScriptOutcome { exit_code: 0, executed: 3, failures: 0, exited: false });
        assert!(err.is_empty());
        assert!(out.contains("[test] /$ ls\n"));
        assert!(out.contains("[test] /docs$ pwd\n/docs\n"));
        assert_eq!(sh.session.history, vec!["ls", "cd docs", "pwd"]);
    }

    #[tokio::test]
    async fn test_halt_policy_stops_at_first_failure() {
        let mut sh = shell(&["docs/"]);
        let script = "pwd\ncd nowhere\npwd\n";
        let (outcome, out, err) = run(&mut sh, script, ErrorPolicy::Halt).await;
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.executed, 2);
        assert_eq!(outcome.failures, 1);
        assert_eq!(out.matches("$ pwd").count(), 1);
        assert!(err.contains("cd: no such file or directory: nowhere"));
        assert!(err.contains("startup halted: line 2 failed (rc=1)"));
    }

    #[tokio::test]
    async fn test_continue_policy_reports_every_failure() {
        let mut sh = shell(&["docs/"]);
        let script = "bogus\ncd nowhere\ncd docs\npwd\n";
        let (outcome, out, err) = run(&mut sh, script, ErrorPolicy::Continue).await;
        assert_eq!(outcome.exit_code, 127);
        assert_eq!(outcome.executed, 4);
        assert_eq!(outcome.failures, 2);
        assert!(err.contains("unknown command: bogus"));
        assert!(err.contains("cd: no such file or directory: nowhere"));
        assert!(!err.contains("startup halted"));
        assert!(out.ends_with("/docs\n"));
    }

    #[tokio::test]
    async fn test_exit_stops_script() {
        let mut sh = shell(&[]);
        let (outcome, out, _) = run(&mut sh, "pwd\nexit\nbogus\n", ErrorPolicy::Halt).await;
        assert!(outcome.exited);
        assert_eq!(outcome.exit_code, 0);
        assert!(!out.contains("bogus"));
    }

    #[tokio::test]
    async fn test_read_plain_and_base64_scripts() {
        let plain = temp_path("start.script");
        std::fs::write(&plain, "ls\npwd\n").unwrap();
        assert_eq!(read_script(&plain).await.unwrap(), "ls\npwd\n");

        let encoded = temp_path("start.b64");
        std::fs::write(&encoded, "bHMK\ncHdkCg==\n").unwrap();
        assert_eq!(read_script(&encoded).await.unwrap(), "ls\npwd\n");
    }

    fn demo(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
    }

    async fn demo_run(zip: &str, script: &str, policy: ErrorPolicy) -> (ScriptOutcome, String, String) {
        let loaded = crate::archive::load_vfs(&demo(zip)).await.unwrap();
        let mut sh = Shell::new(loaded, crate::config::ShellConfig::default());
        let source = read_script(&demo(script)).await.unwrap();
        run(&mut sh, &source, policy).await
    }

    #[tokio::test]
    async fn test_demo_start_ok() {
        let (outcome, out, err) = demo_run("vfs_minimal.zip", "start_ok.script", ErrorPolicy::Halt).await;
        assert_eq!(outcome.exit_code, 0, "stderr: {}", err);
        assert!(err.is_empty());
        assert!(out.starts_with("[vfs_minimal] /$ pwd\n/\n"));
        assert!(out.contains("-rw-------  txt"));
        assert!(out.contains("bin"));
    }

    #[tokio::test]
    async fn test_demo_start_ok_base64_matches_plain() {
        let (_, plain, _) = demo_run("vfs_minimal.zip", "start_ok.script", ErrorPolicy::Halt).await;
        let (outcome, encoded, _) = demo_run("vfs_minimal.zip", "start_ok.script.b64", ErrorPolicy::Halt).await;
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(plain, encoded);
    }

    #[tokio::test]
    async fn test_demo_start_error_under_both_policies() {
        let (halted, _, err) = demo_run("vfs_minimal.zip", "start_error.script", ErrorPolicy::Halt).await;
        assert_eq!(halted.exit_code, 1);
        assert!(err.contains("cd: no such file or directory: missing"));
        assert!(err.contains("startup halted: line 3 failed (rc=1)"));

        let (cont, _, err) = demo_run("vfs_minimal.zip", "start_error.script", ErrorPolicy::Continue).await;
        assert_eq!(cont.exit_code, 1);
        assert_eq!(cont.failures, 2);
        assert!(err.contains("unknown command: frobnicate"));
    }

    #[tokio::test]
    async fn test_demo_deep_tree() {
        let loaded = crate::archive::load_vfs(&demo("vfs_deep.zip")).await.unwrap();
        let mut sh = Shell::new(loaded, crate::config::ShellConfig::default());
        let (outcome, out, _) = run(&mut sh, "tree\n", ErrorPolicy::Halt).await;
        assert_eq!(outcome.exit_code, 0);
        assert!(out.contains("|   |   |   `-- level4\n"));
        assert!(out.contains("5 directories, 3 files\n"));
    }

    #[tokio::test]
    async fn test_read_script_errors() {
        let missing = temp_path("missing.script");
        assert!(matches!(read_script(&missing).await, Err(ScriptError::NotFound { .. })));

        let bad = temp_path("bad.b64");
        std::fs::write(&bad, "%%%").unwrap();
        assert!(matches!(read_script(&bad).await, Err(ScriptError::Base64 { .. })));

        let binary = temp_path("binary.script");
        std::fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_script(&binary).await, Err(ScriptError::Encoding { .. })));
    }
}
