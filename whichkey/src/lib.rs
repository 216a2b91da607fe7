//! Which-key - leader-key command dispatch
//!
//! Ties the pure trie building in `whichkey-core` to an input loop: a
//! registry snapshot is curated into a trie, the trie is published through
//! an atomically swappable handle, and a `KeySession` resolves keys against
//! whatever trie is active.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use whichkey::{WhichKey, WhichKeyConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = WhichKeyConfig::load_default()?;
//!     let which_key = WhichKey::from_registry_file(Path::new("commands.json"), &config)?;
//!     println!("{} bindings", which_key.trie().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Rebuilding
//!
//! Changing strategy or registry builds a brand new trie and swaps it in.
//! Any recording in progress is reset first, since a half-typed sequence
//! may not mean the same thing in the new trie.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use whichkey_core::{build_trie, parse_registry, Command, CommandTrie, CurationStrategy, KeyCode};

pub mod config;
pub mod session;

#[cfg(test)]
mod test_helpers;

// Convenience re-exports
pub use config::WhichKeyConfig;
pub use session::{CommandDisplay, CommandHost, KeyOutcome, KeySession};

/// The trie currently used for resolution.
///
/// Readers get a cheap `Arc` snapshot; `replace` publishes a new trie in one
/// step without disturbing snapshots already handed out.
#[derive(Debug)]
pub struct ActiveTrie(ArcSwap<CommandTrie>);

impl ActiveTrie {
    #[must_use]
    pub fn new(trie: CommandTrie) -> Self {
        Self(ArcSwap::from_pointee(trie))
    }

    #[must_use]
    pub fn load(&self) -> Arc<CommandTrie> {
        self.0.load_full()
    }

    /// Publish `trie`, returning the one it replaced.
    pub fn replace(&self, trie: CommandTrie) -> Arc<CommandTrie> {
        self.0.swap(Arc::new(trie))
    }
}

/// Registry snapshot, active trie and recording session in one place.
#[derive(Debug)]
pub struct WhichKey {
    commands: Vec<Command>,
    strategy: CurationStrategy,
    trie: ActiveTrie,
    session: KeySession,
}

impl WhichKey {
    /// Curate `commands` with the configured strategy and keys.
    #[must_use]
    pub fn new(commands: Vec<Command>, config: &config::WhichKeyConfig) -> Self {
        let strategy = config.curation.strategy;
        let trie = build_trie(strategy, &commands);
        Self {
            commands,
            strategy,
            trie: ActiveTrie::new(trie),
            session: KeySession::new(config.keys.leader, config.keys.cancel),
        }
    }

    /// Read a JSON registry snapshot from disk and curate it.
    pub fn from_registry_file(path: &Path, config: &config::WhichKeyConfig) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read registry {}", path.display()))?;
        let commands = parse_registry(&json)
            .with_context(|| format!("failed to load registry {}", path.display()))?;
        log::info!("loaded {} commands from {}", commands.len(), path.display());
        Ok(Self::new(commands, config))
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[must_use]
    pub fn strategy(&self) -> CurationStrategy {
        self.strategy
    }

    /// Snapshot of the active trie.
    #[must_use]
    pub fn trie(&self) -> Arc<CommandTrie> {
        self.trie.load()
    }

    #[must_use]
    pub fn active_trie(&self) -> &ActiveTrie {
        &self.trie
    }

    #[must_use]
    pub fn session(&self) -> &KeySession {
        &self.session
    }

    /// Feed one key to the session against the active trie.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        host: &mut impl CommandHost,
        display: &mut impl CommandDisplay,
    ) -> KeyOutcome {
        let trie = self.trie.load();
        self.session.handle_key(&trie, key, host, display)
    }

    /// Re-derive the trie with `strategy` and make it active.
    pub fn rebuild(&mut self, strategy: CurationStrategy, display: &mut impl CommandDisplay) {
        self.session.reset(display);
        self.trie.replace(build_trie(strategy, &self.commands));
        self.strategy = strategy;
    }

    /// Replace the registry snapshot and rebuild with the current strategy.
    pub fn update_registry(&mut self, commands: Vec<Command>, display: &mut impl CommandDisplay) {
        self.commands = commands;
        self.rebuild(self.strategy, display);
    }

    /// Registry commands the active trie has no sequence for.
    #[must_use]
    pub fn unassigned(&self) -> Vec<&Command> {
        let trie = self.trie.load();
        let bound: HashSet<String> = trie.actions().into_iter().map(|(_, id)| id).collect();
        self.commands
            .iter()
            .filter(|command| !bound.contains(&command.id))
            .collect()
    }
}
