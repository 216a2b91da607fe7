//! Key trie mapping key sequences to commands.
//!
//! Every node may carry a `Binding`: a `Label` names a group (a category or
//! intent bucket) and an `Action` names a command that runs when the
//! sequence ends there. Children keep insertion order so a menu of
//! "what can I type next" reads the way it was built.

use std::collections::HashMap;

use serde::Serialize;

use crate::command::Command;
use crate::key::{format_sequence, KeyCode, KeySequence};

/// What a trie node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A group heading with no command of its own.
    Label { name: String, icon: Option<String> },
    /// A resolvable command.
    Action {
        name: String,
        icon: Option<String>,
        id: String,
    },
}

impl Binding {
    #[must_use]
    pub fn label(name: impl Into<String>, icon: Option<&str>) -> Self {
        Self::Label {
            name: name.into(),
            icon: icon.map(str::to_string),
        }
    }

    /// Action for `command`; a nameless command is shown by its id.
    #[must_use]
    pub fn action(command: &Command) -> Self {
        let name = if command.name.trim().is_empty() {
            &command.id
        } else {
            &command.name
        };
        Self::Action {
            name: name.clone(),
            icon: command.icon.clone(),
            id: command.id.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Label { name, .. } | Self::Action { name, .. } => name,
        }
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        match self {
            Self::Label { icon, .. } | Self::Action { icon, .. } => icon.as_deref(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Label { .. } => None,
            Self::Action { id, .. } => Some(id),
        }
    }
}

/// A single trie node.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    binding: Option<Binding>,
    /// Map of key → child node.
    map: HashMap<KeyCode, TrieNode>,
    /// Insertion order for display purposes.
    order: Vec<KeyCode>,
}

impl TrieNode {
    #[must_use]
    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    #[must_use]
    pub fn get(&self, key: &KeyCode) -> Option<&Self> {
        self.map.get(key)
    }

    /// Children in the order their keys were first inserted.
    pub fn children(&self) -> impl Iterator<Item = (KeyCode, &Self)> {
        self.order
            .iter()
            .filter_map(|key| self.map.get(key).map(|child| (*key, child)))
    }

    /// Existing child for `key`, or a fresh empty one.
    fn child_mut(&mut self, key: KeyCode) -> &mut Self {
        if !self.map.contains_key(&key) {
            self.order.push(key);
        }
        self.map.entry(key).or_default()
    }

    fn collect_actions(&self, path: &mut KeySequence, out: &mut Vec<(KeySequence, String)>) {
        for (key, child) in self.children() {
            path.push(key);
            if let Some(id) = child.binding().and_then(Binding::id) {
                out.push((path.clone(), id.to_string()));
            }
            child.collect_actions(path, out);
            path.pop();
        }
    }
}

/// Display payload for one entry of a "what next" menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A key that can be typed next and what it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PossibleCommand {
    pub key: KeyCode,
    pub command: CommandInfo,
}

#[derive(Debug, Clone, Default)]
pub struct CommandTrie {
    root: TrieNode,
}

impl CommandTrie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Bind `binding` at the node reached by `prefix`, creating the path.
    ///
    /// An empty prefix binds the root. Existing children are never removed,
    /// so a label node keeps everything inserted below it.
    pub fn insert_command(&mut self, prefix: &[KeyCode], binding: Binding) {
        let node = prefix.iter().fold(&mut self.root, |node, key| node.child_mut(*key));

        if let Some(Binding::Action { id: previous, .. }) = &node.binding {
            if binding.id() != Some(previous.as_str()) {
                log::warn!(
                    "sequence [{}] rebound from `{previous}` to `{}`",
                    format_sequence(prefix),
                    binding.id().unwrap_or(binding.name())
                );
            }
        }
        node.binding = Some(binding);
    }

    /// Insert a command under its assigned prefix.
    ///
    /// Returns `false` for commands that never received a prefix; they stay
    /// out of the trie.
    pub fn insert_assigned(&mut self, command: &Command) -> bool {
        match &command.prefix {
            Some(prefix) => {
                self.insert_command(prefix, Binding::action(command));
                true
            }
            None => {
                log::debug!("`{}` has no key sequence, not bound", command.id);
                false
            }
        }
    }

    /// Node reached by walking `keys` from the root.
    #[must_use]
    pub fn node(&self, keys: &[KeyCode]) -> Option<&TrieNode> {
        keys.iter().try_fold(&self.root, |node, key| node.get(key))
    }

    /// The id bound at `keys`, if the whole sequence resolves to a command.
    #[must_use]
    pub fn get_command_id(&self, keys: &[KeyCode]) -> Option<&str> {
        let id = self.node(keys).and_then(TrieNode::binding).and_then(Binding::id);
        if id.is_none() {
            log::trace!("no command at [{}]", format_sequence(keys));
        }
        id
    }

    /// Named children of the node at `prefix`, in insertion order.
    ///
    /// Empty when the prefix leads nowhere.
    #[must_use]
    pub fn possible_commands(&self, prefix: &[KeyCode]) -> Vec<PossibleCommand> {
        let Some(node) = self.node(prefix) else {
            return Vec::new();
        };
        node.children()
            .filter_map(|(key, child)| {
                let binding = child.binding()?;
                (!binding.name().is_empty()).then(|| PossibleCommand {
                    key,
                    command: CommandInfo {
                        name: binding.name().to_string(),
                        id: binding.id().map(str::to_string),
                        icon: binding.icon().map(str::to_string),
                    },
                })
            })
            .collect()
    }

    /// Every resolvable `(sequence, id)` pair, depth first in insertion order.
    #[must_use]
    pub fn actions(&self) -> Vec<(KeySequence, String)> {
        let mut out = Vec::new();
        if let Some(id) = self.root.binding().and_then(Binding::id) {
            out.push((Vec::new(), id.to_string()));
        }
        self.root.collect_actions(&mut Vec::new(), &mut out);
        out
    }

    /// Number of resolvable actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
