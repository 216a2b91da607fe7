//! Which-key core - mnemonic leader-key sequences for large command sets
//!
//! Given a flat registry of commands, this crate derives short, collision
//! free key sequences for them and stores the result in a trie that can be
//! queried one key at a time.
//!
//! ## Quick Start
//!
//! ```
//! use whichkey_core::{build_trie, key, parse_registry, CurationStrategy};
//!
//! let commands = parse_registry(
//!     r#"[{"id": "editor:save-file", "name": "Save current file"}]"#,
//! )?;
//! let trie = build_trie(CurationStrategy::Intent, &commands);
//! assert_eq!(trie.get_command_id(&[key('f'), key('s')]), Some("editor:save-file"));
//! # Ok::<(), whichkey_core::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. `letters` extracts candidate symbols from a command's id and name
//! 2. `mnemonic` turns a bucket of commands into unique one-key extensions
//!    of a parent sequence
//! 3. `curate` decides the buckets (by intent or by id namespace)
//! 4. `trie` stores the result for incremental lookup

pub mod command;
pub mod curate;
pub mod error;
pub mod key;
pub mod letters;
pub mod mnemonic;
pub mod trie;

#[cfg(test)]
mod test_fixtures;

// Convenience re-exports
pub use command::{parse_registry, Command, Hotkey};
pub use curate::{build_trie, CurationStrategy};
pub use error::{Error, Result};
pub use key::{format_sequence, key, KeyCode, KeySequence};
pub use mnemonic::{determine_prefixes, Assignment, RemainingSymbols};
pub use trie::{Binding, CommandInfo, CommandTrie, PossibleCommand};
