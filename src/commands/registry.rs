// src/commands/registry.rs
use std::collections::HashMap;
use super::types::Command;

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::cd_cmd::CdCommand;
use super::chmod::ChmodCommand;
use super::conf_dump_cmd::ConfDumpCommand;
use super::history_cmd::HistoryCommand;
use super::ls::LsCommand;
use super::mv::MvCommand;
use super::pwd::PwdCommand;
use super::tree_cmd::TreeCommand;

/// Register the navigation command set.
pub fn register_navigation(registry: &mut CommandRegistry) {
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(CdCommand));
    registry.register(Box::new(PwdCommand));
    registry.register(Box::new(TreeCommand));
    registry.register(Box::new(HistoryCommand));
    registry.register(Box::new(ChmodCommand));
    registry.register(Box::new(MvCommand));
    registry.register(Box::new(ConfDumpCommand));
}

/// Registry holding every built-in command.
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_navigation(&mut registry);
    registry
}
