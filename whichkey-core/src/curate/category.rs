//! Category-based curation: one top-level key per id namespace.

use std::collections::{BTreeMap, HashSet};

use crate::command::Command;
use crate::key::KeyCode;
use crate::mnemonic::determine_prefixes;
use crate::trie::{Binding, CommandTrie};

/// A category that won a top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub key: KeyCode,
    pub category: String,
    pub display_name: String,
    pub commands: Vec<Command>,
}

/// Group commands by namespace, alphabetically.
#[must_use]
pub fn category_buckets(commands: &[Command]) -> BTreeMap<String, Vec<Command>> {
    let mut buckets: BTreeMap<String, Vec<Command>> = BTreeMap::new();
    for command in commands {
        buckets
            .entry(command.category().to_string())
            .or_default()
            .push(command.clone());
    }
    buckets
}

fn both_cases(ch: char) -> [char; 2] {
    [
        ch.to_lowercase().next().unwrap_or(ch),
        ch.to_uppercase().next().unwrap_or(ch),
    ]
}

/// Keys a category may claim, in order of preference.
///
/// Initials of each hyphen word come first, then the remaining letters of
/// the first word, each in lower then upper case.
#[must_use]
pub fn category_prefix_options(category: &str) -> Vec<char> {
    let initials = category
        .split('-')
        .filter_map(|word| word.chars().next())
        .flat_map(both_cases);
    let rest = category
        .split('-')
        .next()
        .unwrap_or_default()
        .chars()
        .skip(1)
        .flat_map(both_cases);
    initials.chain(rest).collect()
}

/// `file-explorer` → `File explorer`.
#[must_use]
pub fn display_name(category: &str) -> String {
    let spaced = category.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hand out top-level keys first come, first served.
///
/// A category whose options are all taken is dropped.
#[must_use]
pub fn assign_category_prefixes(buckets: BTreeMap<String, Vec<Command>>) -> Vec<CategoryBucket> {
    let mut taken: HashSet<char> = HashSet::new();
    let mut assigned = Vec::with_capacity(buckets.len());

    for (category, commands) in buckets {
        let Some(symbol) = category_prefix_options(&category)
            .into_iter()
            .find(|symbol| !taken.contains(symbol))
        else {
            log::debug!("category `{category}` dropped, no free key");
            continue;
        };
        taken.insert(symbol);
        assigned.push(CategoryBucket {
            key: KeyCode::Char(symbol),
            display_name: display_name(&category),
            category,
            commands,
        });
    }
    assigned
}

/// Build a trie with one labelled branch per category.
#[must_use]
pub fn categorize_commands(commands: &[Command]) -> CommandTrie {
    let mut trie = CommandTrie::new();
    for bucket in assign_category_prefixes(category_buckets(commands)) {
        trie.insert_command(&[bucket.key], Binding::label(bucket.display_name, None));
        let members = bucket
            .commands
            .into_iter()
            .map(|command| Command { prefix: None, ..command })
            .collect();
        for command in determine_prefixes(&[bucket.key], members).commands() {
            trie.insert_assigned(command);
        }
    }
    trie
}
