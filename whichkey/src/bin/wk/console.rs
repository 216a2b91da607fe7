//! Stdout stand-ins for the menu and the command host.

use whichkey::{CommandDisplay, CommandHost};
use whichkey_core::{format_sequence, KeyCode, PossibleCommand};

/// Prints each menu update as an indented list.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl CommandDisplay for ConsoleDisplay {
    #[allow(clippy::print_stdout)]
    fn show_commands(&mut self, commands: &[PossibleCommand], sequence: Option<&[KeyCode]>) {
        let header = sequence.map_or_else(|| "leader".to_string(), format_sequence);
        println!("[{header}]");
        for option in commands {
            let marker = if option.command.id.is_some() { ' ' } else { '+' };
            println!("  {:>5} {marker}{}", option.key.to_string(), option.command.name);
        }
    }

    #[allow(clippy::print_stdout)]
    fn hide_commands(&mut self) {
        println!("(menu closed)");
    }
}

/// Reports the command that would run instead of running it.
#[derive(Debug, Default)]
pub struct DryRunHost {
    pub executed: Vec<String>,
}

impl CommandHost for DryRunHost {
    #[allow(clippy::print_stdout)]
    fn execute_command(&mut self, id: &str) -> bool {
        println!("=> {id}");
        self.executed.push(id.to_string());
        true
    }
}
