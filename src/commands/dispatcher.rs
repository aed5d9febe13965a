use super::{
    ChatState,
    handler::{
        AttachCommand, ClearCommand, DetachCommand, HelpCommand, HistoryCommand, ModeCommand,
        QuitCommand, StatusCommand,
    },
    registry::CommandRegistry,
};
use crate::core::error::SiakError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut ChatState,
    ) -> Result<Option<String>, SiakError> {
        self.registry.execute(command, args, state)
    }

    /// Splits `/name arg...` and runs it. `None` when `line` is not a command.
    pub fn execute_line(
        &self,
        line: &str,
        state: &mut ChatState,
    ) -> Option<Result<Option<String>, SiakError>> {
        let rest = line.trim().strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let command = parts.next()?;
        let args: Vec<&str> = parts.collect();
        Some(self.execute(command, &args, state))
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("mode", ModeCommand);
    registry.register("attach", AttachCommand);
    registry.register("detach", DetachCommand);
    registry.register("clear", ClearCommand);
    registry.register("history", HistoryCommand);
    registry.register("status", StatusCommand);

    CommandDispatcher::new(Arc::new(registry))
}
