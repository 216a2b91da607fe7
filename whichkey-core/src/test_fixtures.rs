//! Registry snapshot shared by tests.

use crate::command::{parse_registry, Command};

const COMMANDS_JSON: &str = include_str!("../fixtures/commands.json");

/// The bundled 207-command registry, in document order.
pub fn fixture_commands() -> Vec<Command> {
    parse_registry(COMMANDS_JSON).expect("fixture registry should parse")
}
