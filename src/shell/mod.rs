//! Shell Environment
//!
//! Ties together the loaded tree, the session state and the command
//! dispatcher. Scripts and the interactive loop both drive a [`Shell`].

pub mod dispatcher;
pub mod repl;
pub mod script;
pub mod session;
pub mod words;

pub use dispatcher::{is_command_line, Dispatch, Dispatcher};
pub use script::{read_script, ScriptError, ScriptOutcome};
pub use session::Session;
pub use words::split_words;

use crate::archive::LoadedVfs;
use crate::config::ShellConfig;
use crate::error::ShellError;

pub struct Shell {
    dispatcher: Dispatcher,
    pub session: Session,
}

impl Shell {
    /// Create a shell rooted at the loaded tree with the default commands.
    pub fn new(loaded: LoadedVfs, config: ShellConfig) -> Self {
        Self::from_session(Session::new(loaded, config))
    }

    pub fn from_session(session: Session) -> Self {
        Self { dispatcher: Dispatcher::default(), session }
    }

    /// Run a single line against the session.
    pub async fn exec(&mut self, line: &str) -> Result<Dispatch, ShellError> {
        self.dispatcher.execute(line, &mut self.session).await
    }

    pub fn prompt(&self) -> String {
        self.session.prompt()
    }
}
