use async_trait::async_trait;
use serde::Serialize;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::config::ErrorPolicy;
use crate::error::ShellError;
use crate::shell::Session;

pub struct ConfDumpCommand;

const HELP: &str = "conf-dump - print the effective shell configuration

Usage: conf-dump [--json]

Options:
  --json  print a JSON object instead of key=value lines";

#[derive(Serialize)]
struct ConfDump {
    vfs_zip: String,
    startup: String,
    vfs_name: String,
    cwd: String,
    on_error: ErrorPolicy,
}

impl ConfDump {
    fn from_session(session: &Session) -> Self {
        let config = &session.config;
        Self {
            vfs_zip: config.vfs_zip.display().to_string(),
            startup: config
                .startup
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            vfs_name: session.vfs_name.clone(),
            cwd: session.cwd_path(),
            on_error: config.on_error,
        }
    }
}

#[async_trait]
impl Command for ConfDumpCommand {
    fn name(&self) -> &'static str { "conf-dump" }

    fn help(&self) -> &'static str { HELP }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let dump = ConfDump::from_session(ctx.session);
        match ctx.args.as_slice() {
            [] => Ok(format!(
                "vfs_zip={}\nstartup={}\nvfs_name={}\ncwd={}\non_error={}\n",
                dump.vfs_zip, dump.startup, dump.vfs_name, dump.cwd, dump.on_error
            )),
            [flag] if flag == "--json" => serde_json::to_string_pretty(&dump)
                .map(|json| format!("{}\n", json))
                .map_err(|e| ShellError::usage("conf-dump", e.to_string())),
            _ => Err(ShellError::usage("conf-dump", "expected no arguments or --json")),
        }
    }
}
