//! Curation strategies: partition a registry into buckets and build a trie.
//!
//! Both strategies are pure functions of the registry snapshot. Switching
//! strategy means building a fresh trie, never editing the old one.

mod category;
mod intent;

use serde::{Deserialize, Serialize};

pub use category::{
    assign_category_prefixes, categorize_commands, category_buckets, category_prefix_options,
    display_name, CategoryBucket,
};
pub use intent::{
    curate_commands, filter_by_intent, IntentMapping, IntentRule, TopLevelMapping, INTENT_MAPPINGS,
    OVERFLOW_KEY, OVERFLOW_NAME, TOP_LEVEL_MAPPINGS,
};

use crate::command::Command;
use crate::trie::CommandTrie;

/// Which curation strategy produces the active trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurationStrategy {
    /// Hand-picked shortcuts plus intent buckets.
    #[default]
    Intent,
    /// One branch per id namespace.
    Category,
}

impl std::fmt::Display for CurationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Intent => "intent",
            Self::Category => "category",
        })
    }
}

/// Build the trie for `strategy` from the registry snapshot.
#[must_use]
pub fn build_trie(strategy: CurationStrategy, commands: &[Command]) -> CommandTrie {
    let trie = match strategy {
        CurationStrategy::Intent => curate_commands(commands, &TOP_LEVEL_MAPPINGS, &INTENT_MAPPINGS),
        CurationStrategy::Category => categorize_commands(commands),
    };
    log::info!(
        "built {strategy} trie: {} bindings from {} commands",
        trie.len(),
        commands.len()
    );
    trie
}
