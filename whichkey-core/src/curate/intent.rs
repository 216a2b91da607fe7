//! Intent-based curation: hand-picked top-level keys plus regex buckets.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::key::{key, KeyCode};
use crate::mnemonic::determine_prefixes;
use crate::trie::{Binding, CommandTrie, TrieNode};

/// Key under which commands matched by no intent are collected.
pub const OVERFLOW_KEY: KeyCode = KeyCode::Char('o');
pub const OVERFLOW_NAME: &str = "Other";

/// A direct one-key binding to a frequently used command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelMapping {
    pub key: KeyCode,
    pub name: String,
    pub id: String,
    pub icon: Option<String>,
}

impl TopLevelMapping {
    #[must_use]
    pub fn new(key: KeyCode, name: &str, id: &str, icon: &str) -> Self {
        Self {
            key,
            name: name.to_string(),
            id: id.to_string(),
            icon: Some(icon.to_string()),
        }
    }
}

/// One clause of an intent: ids matching `include` but not `exclude`.
#[derive(Debug, Clone)]
pub struct IntentRule {
    include: Regex,
    exclude: Option<Regex>,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl IntentRule {
    pub fn new(include: &str, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: exclude.map(compile).transpose()?,
        })
    }

    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.include.is_match(id) && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(id))
    }
}

/// A bucket rooted at a fixed key, collecting every command whose id
/// satisfies any of its rules.
#[derive(Debug, Clone)]
pub struct IntentMapping {
    pub key: KeyCode,
    pub name: String,
    pub icon: Option<String>,
    rules: Vec<IntentRule>,
}

impl IntentMapping {
    #[must_use]
    pub fn new(key: KeyCode, name: &str, icon: Option<&str>) -> Self {
        Self {
            key,
            name: name.to_string(),
            icon: icon.map(str::to_string),
            rules: Vec::new(),
        }
    }

    /// Add a clause matching `include`.
    pub fn matching(mut self, include: &str) -> Result<Self> {
        self.rules.push(IntentRule::new(include, None)?);
        Ok(self)
    }

    /// Add a clause matching `include` unless `exclude` also matches.
    pub fn matching_except(mut self, include: &str, exclude: &str) -> Result<Self> {
        self.rules.push(IntentRule::new(include, Some(exclude))?);
        Ok(self)
    }

    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(id))
    }
}

/// Single-key shortcuts bound before any bucket.
pub static TOP_LEVEL_MAPPINGS: Lazy<Vec<TopLevelMapping>> = Lazy::new(|| {
    vec![
        TopLevelMapping::new(key(' '), "Open Quick Switcher", "switcher:open", "square-chevron-right"),
        TopLevelMapping::new(key('/'), "Open Global Search", "global-search:open", "globe"),
        TopLevelMapping::new(key('e'), "Toggle left sidebar", "app:toggle-left-sidebar", "panel-left"),
        TopLevelMapping::new(key('p'), "Open command palette", "command-palette:open", "square-terminal"),
        TopLevelMapping::new(key('|'), "Split right", "workspace:split-vertical", "separator-vertical"),
        TopLevelMapping::new(key('-'), "Split down", "workspace:split-horizontal", "separator-horizontal"),
    ]
});

fn builtin_intents() -> Result<Vec<IntentMapping>> {
    Ok(vec![
        IntentMapping::new(key('s'), "Search", Some("search")).matching_except("search", "bookmarks")?,
        IntentMapping::new(key('f'), "File", Some("file"))
            .matching_except("file|attach", "canvas")?
            .matching("template")?,
        IntentMapping::new(key('l'), "Links", Some("link")).matching("link")?,
        IntentMapping::new(key('B'), "Bookmarks", Some("bookmark")).matching("bookmarks")?,
        IntentMapping::new(KeyCode::Tab, "Tab navigation", Some("arrow-right-to-line"))
            .matching_except("tab", "table|bookmarks|file-explorer")?
            .matching_except("workspace.*close|close.*workspace", "window")?
            .matching("focus")?
            .matching("^workspace:toggle-pin$")?,
        IntentMapping::new(key('v'), "Vault", Some("vault")).matching("vault")?,
        IntentMapping::new(key('t'), "Text", Some("text"))
            .matching("editor.*toggle|toggle.*editor")?
            .matching("heading")?
            .matching_except("fold", "file")?
            .matching(
                "clear-formatting|cycle-list-checklist|swap-line|add-cursor|delete-paragraph|context-menu",
            )?,
        IntentMapping::new(key('T'), "Table", Some("table")).matching("table")?,
        IntentMapping::new(key('n'), "Navigate", Some("navigation")).matching("^app:go-(back|forward)$")?,
        IntentMapping::new(key('m'), "Markdown", Some("a-large-small")).matching("markdown")?,
        IntentMapping::new(key('w'), "Windows", Some("app-window")).matching("window")?,
        IntentMapping::new(key('u'), "UI", Some("palette")).matching("theme")?,
        IntentMapping::new(key('a'), "App", Some("dock"))
            .matching_except("app", "vault|go")?
            .matching_except("export", "canvas")?
            .matching("workspace.*copy|copy.*workspace")?
            .matching("^workspace:show-trash$")?
            .matching("editor.*focus|focus.*editor")?
            .matching("tag-pane")?
            .matching("outline")?,
        IntentMapping::new(key('i'), "Insert", Some("between-horizontal-start")).matching("insert")?,
        IntentMapping::new(key('c'), "Canvas", Some("brush")).matching("canvas")?,
        IntentMapping::new(key('d'), "Daily notes", Some("calendar")).matching("daily-notes")?,
        IntentMapping::new(key('g'), "Graph", Some("brain-circuit")).matching_except("graph", "editor")?,
        IntentMapping::new(key('S'), "Sync", Some("folder-sync")).matching("sync")?,
    ])
}

/// Buckets processed after the top-level shortcuts, in order.
pub static INTENT_MAPPINGS: Lazy<Vec<IntentMapping>> =
    Lazy::new(|| builtin_intents().expect("built-in intent patterns are valid"));

/// Commands whose id satisfies `mapping`, in registry order.
#[must_use]
pub fn filter_by_intent(commands: &[Command], mapping: &IntentMapping) -> Vec<Command> {
    commands
        .iter()
        .filter(|command| mapping.matches(&command.id))
        .cloned()
        .collect()
}

/// Whether `root` already carries a shortcut or an earlier bucket.
fn root_is_bound(trie: &CommandTrie, root: KeyCode) -> bool {
    trie.node(&[root]).and_then(TrieNode::binding).is_some()
}

/// Assign one bucket under `root` and bind the results.
///
/// A root that is already bound is left alone and `false` is returned.
fn insert_bucket(
    trie: &mut CommandTrie,
    root: KeyCode,
    name: &str,
    icon: Option<&str>,
    bucket: Vec<Command>,
) -> bool {
    if root_is_bound(trie, root) {
        log::warn!("bucket `{name}` skipped, [{root}] is already bound");
        return false;
    }
    trie.insert_command(&[root], Binding::label(name, icon));
    let assignment = determine_prefixes(&[root], bucket);
    for command in assignment.commands() {
        trie.insert_assigned(command);
    }
    true
}

/// Build a trie from top-level shortcuts and intent buckets.
///
/// A command may land in several buckets and gets an independent key in
/// each. Commands no intent claims go to the overflow bucket.
#[must_use]
pub fn curate_commands(
    commands: &[Command],
    top_level: &[TopLevelMapping],
    intents: &[IntentMapping],
) -> CommandTrie {
    let mut trie = CommandTrie::new();

    for mapping in top_level {
        trie.insert_command(
            &[mapping.key],
            Binding::Action {
                name: mapping.name.clone(),
                icon: mapping.icon.clone(),
                id: mapping.id.clone(),
            },
        );
    }

    let mut claimed: HashSet<&str> = HashSet::new();
    for intent in intents {
        let members: Vec<&Command> = commands
            .iter()
            .filter(|command| intent.matches(&command.id))
            .collect();
        if members.is_empty() {
            log::debug!("intent `{}` matched no commands", intent.name);
            continue;
        }
        log::debug!("intent `{}` under [{}]: {} commands", intent.name, intent.key, members.len());
        let bucket = members
            .iter()
            .map(|command| Command {
                prefix: None,
                ..(*command).clone()
            })
            .collect();
        // members of a skipped bucket stay unclaimed and fall through to overflow
        if insert_bucket(&mut trie, intent.key, &intent.name, intent.icon.as_deref(), bucket) {
            claimed.extend(members.into_iter().map(|command| command.id.as_str()));
        }
    }

    let overflow: Vec<Command> = commands
        .iter()
        .filter(|command| !claimed.contains(command.id.as_str()))
        .map(|command| Command {
            prefix: None,
            ..command.clone()
        })
        .collect();
    if !overflow.is_empty()
        && !insert_bucket(&mut trie, OVERFLOW_KEY, OVERFLOW_NAME, Some("ellipsis"), overflow)
    {
        log::warn!("unclaimed commands have no overflow key and stay unbound");
    }

    trie
}
