// src/commands/mod.rs
pub mod cd_cmd;
pub mod chmod;
pub mod conf_dump_cmd;
pub mod history_cmd;
pub mod ls;
pub mod mv;
pub mod pwd;
pub mod registry;
pub mod tree_cmd;
pub mod types;

pub use registry::{create_default_registry, CommandRegistry};
pub use types::{Command, CommandContext, CommandResult};
