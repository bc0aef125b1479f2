use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::ShellError;

pub struct HistoryCommand;

const HELP: &str = "history - display command history

Usage: history [n]

Options:
  -c      clear the history list";

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &'static str { "history" }

    fn help(&self) -> &'static str { HELP }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let CommandContext { args, session } = ctx;
        let history = &mut session.history;

        let count = match args.as_slice() {
            [] => history.len(),
            [flag] if flag == "-c" => {
                history.clear();
                return Ok(String::new());
            }
            [n] => match n.parse::<usize>() {
                Ok(n) => n.min(history.len()),
                Err(_) => {
                    return Err(ShellError::usage("history", format!("{}: numeric argument required", n)));
                }
            },
            _ => return Err(ShellError::usage("history", "too many arguments")),
        };

        let start = history.len().saturating_sub(count);
        let mut stdout = String::new();
        for (i, cmd) in history.iter().enumerate().skip(start) {
            stdout.push_str(&format!("{:5}  {}\n", i + 1, cmd));
        }

        Ok(stdout)
    }
}
