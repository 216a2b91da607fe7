//! Key-sequence recording session.
//!
//! The session is either idle or recording. The leader key starts a
//! recording, every further key extends the sequence and is looked up in the
//! active trie, and the session returns to idle as soon as a command runs,
//! the sequence dead-ends, or the cancel key is pressed.

use whichkey_core::{format_sequence, CommandTrie, KeyCode, KeySequence, PossibleCommand};

/// Where "what can I type next" menus are shown.
pub trait CommandDisplay {
    /// Show the options reachable from the current sequence (`None` at the root).
    fn show_commands(&mut self, commands: &[PossibleCommand], sequence: Option<&[KeyCode]>);
    fn hide_commands(&mut self);
}

/// The application that owns the commands.
pub trait CommandHost {
    /// Run a command by id. The return value is only logged.
    fn execute_command(&mut self, id: &str) -> bool;

    /// Polled when the leader key is seen; recording starts only if true.
    fn recording_allowed(&self) -> bool {
        true
    }
}

/// Result of feeding one key to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key was not for us (idle and not the leader, or a bare modifier).
    Ignored,
    /// Leader pressed, recording started.
    Started,
    /// Sequence is a prefix of something, more keys needed.
    Pending,
    /// Sequence resolved and the command was run.
    Executed(String),
    /// Sequence leads nowhere, recording dropped.
    Abandoned,
    /// Cancel key pressed while recording.
    Cancelled,
}

impl KeyOutcome {
    /// Whether the host should swallow the key instead of applying it.
    #[must_use]
    pub fn suppresses_default(&self) -> bool {
        matches!(
            self,
            Self::Started | Self::Pending | Self::Executed(_) | Self::Abandoned
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Recording(KeySequence),
}

/// Stateful dispatcher driving a `CommandTrie` one key at a time.
#[derive(Debug, Clone)]
pub struct KeySession {
    leader: KeyCode,
    cancel: KeyCode,
    state: State,
}

impl Default for KeySession {
    fn default() -> Self {
        Self::new(KeyCode::Char(' '), KeyCode::Esc)
    }
}

impl KeySession {
    #[must_use]
    pub fn new(leader: KeyCode, cancel: KeyCode) -> Self {
        Self {
            leader,
            cancel,
            state: State::Idle,
        }
    }

    #[must_use]
    pub fn leader(&self) -> KeyCode {
        self.leader
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.state, State::Recording(_))
    }

    /// Keys typed since the leader; empty when idle.
    #[must_use]
    pub fn sequence(&self) -> &[KeyCode] {
        match &self.state {
            State::Idle => &[],
            State::Recording(sequence) => sequence,
        }
    }

    /// Feed one key.
    pub fn handle_key(
        &mut self,
        trie: &CommandTrie,
        key: KeyCode,
        host: &mut impl CommandHost,
        display: &mut impl CommandDisplay,
    ) -> KeyOutcome {
        if !self.is_recording() {
            if key == self.leader && host.recording_allowed() {
                self.state = State::Recording(Vec::new());
                display.show_commands(&trie.possible_commands(&[]), None);
                return KeyOutcome::Started;
            }
            return KeyOutcome::Ignored;
        }
        let State::Recording(sequence) = &mut self.state else {
            return KeyOutcome::Ignored;
        };

        if key == self.cancel {
            self.stop(display);
            return KeyOutcome::Cancelled;
        }

        // Shift and friends arrive on their own before the shifted character
        if key.is_modifier() {
            return KeyOutcome::Ignored;
        }

        sequence.push(key);
        let options = trie.possible_commands(sequence);
        display.show_commands(&options, Some(sequence.as_slice()));

        if let Some(id) = trie.get_command_id(sequence) {
            let id = id.to_string();
            log::debug!("[{}] → {id}", format_sequence(sequence));
            if !host.execute_command(&id) {
                log::warn!("host declined to run `{id}`");
            }
            self.stop(display);
            return KeyOutcome::Executed(id);
        }

        if options.is_empty() {
            log::debug!("[{}] leads nowhere, recording dropped", format_sequence(sequence));
            self.stop(display);
            return KeyOutcome::Abandoned;
        }

        KeyOutcome::Pending
    }

    /// Drop any recording in progress.
    pub fn reset(&mut self, display: &mut impl CommandDisplay) {
        if self.is_recording() {
            self.stop(display);
        }
    }

    fn stop(&mut self, display: &mut impl CommandDisplay) {
        self.state = State::Idle;
        display.hide_commands();
    }
}
