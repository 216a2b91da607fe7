//! Test doubles for the session collaborators.
//!
//! `RecordingDisplay` keeps every show/hide call so tests can assert the
//! exact sequence of menu updates; `ScriptedHost` records executed ids.

use whichkey_core::{KeyCode, PossibleCommand};

use crate::session::{CommandDisplay, CommandHost};

/// One call made on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Show {
        keys: Vec<KeyCode>,
        sequence: Option<Vec<KeyCode>>,
    },
    Hide,
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<DisplayEvent>,
    /// Full payload of the most recent show call.
    pub last_shown: Vec<PossibleCommand>,
}

impl CommandDisplay for RecordingDisplay {
    fn show_commands(&mut self, commands: &[PossibleCommand], sequence: Option<&[KeyCode]>) {
        self.events.push(DisplayEvent::Show {
            keys: commands.iter().map(|c| c.key).collect(),
            sequence: sequence.map(<[KeyCode]>::to_vec),
        });
        self.last_shown = commands.to_vec();
    }

    fn hide_commands(&mut self) {
        self.events.push(DisplayEvent::Hide);
    }
}

#[derive(Debug)]
pub struct ScriptedHost {
    pub executed: Vec<String>,
    allow_recording: bool,
    succeed: bool,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            executed: Vec::new(),
            allow_recording: true,
            succeed: true,
        }
    }
}

impl ScriptedHost {
    /// Host whose focus check refuses to start recordings (e.g. insert mode).
    pub fn disallow_recording(mut self) -> Self {
        self.allow_recording = false;
        self
    }

    /// Host that reports every execution as failed.
    pub fn failing(mut self) -> Self {
        self.succeed = false;
        self
    }
}

impl CommandHost for ScriptedHost {
    fn execute_command(&mut self, id: &str) -> bool {
        self.executed.push(id.to_string());
        self.succeed
    }

    fn recording_allowed(&self) -> bool {
        self.allow_recording
    }
}

const COMMANDS_JSON: &str = include_str!("../../whichkey-core/fixtures/commands.json");

/// The bundled registry snapshot, parsed.
pub fn fixture_commands() -> Vec<whichkey_core::Command> {
    whichkey_core::parse_registry(COMMANDS_JSON).expect("fixture registry should parse")
}
