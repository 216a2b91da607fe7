//! Command descriptors as supplied by the host's action registry.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::key::KeySequence;

/// A host hotkey, carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hotkey {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub key: String,
}

/// One entry of the action registry.
///
/// `id` is namespaced as `<category>:<action>`; `name` may itself carry a
/// `Category: ` prefix. `prefix` stays `None` until assignment gives the
/// command a key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Command {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hotkeys: Vec<Hotkey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<KeySequence>,
}

impl Command {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: KeySequence) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// The namespace before the first colon, or the whole id for legacy ids.
    #[must_use]
    pub fn category(&self) -> &str {
        self.id
            .split_once(':')
            .map_or(self.id.as_str(), |(category, _)| category)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryShape {
    List(Vec<Command>),
    ById(indexmap::IndexMap<String, Command>),
}

/// Parse a registry snapshot from JSON.
///
/// Accepts a plain array of descriptors or an object keyed by command id,
/// in which case the keys are dropped and values kept in document order.
pub fn parse_registry(json: &str) -> Result<Vec<Command>> {
    let shape: RegistryShape = serde_json::from_str(json)?;
    Ok(match shape {
        RegistryShape::List(commands) => commands,
        RegistryShape::ById(map) => map.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::key;

    #[test]
    fn category_is_segment_before_first_colon() {
        assert_eq!(Command::new("editor:save-file", "Save").category(), "editor");
        assert_eq!(Command::new("a:b:c", "x").category(), "a");
        assert_eq!(Command::new("daily-notes", "Open today").category(), "daily-notes");
    }

    #[test]
    fn parse_registry_from_array() {
        let json = r#"[
            {"id": "app:reload", "name": "Reload app without saving"},
            {"id": "graph:open", "name": "Graph view: Open graph view", "icon": "lucide-git-fork"}
        ]"#;
        let commands = parse_registry(json).expect("should parse");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].icon.as_deref(), Some("lucide-git-fork"));
        assert!(commands.iter().all(|c| c.prefix.is_none()));
    }

    #[test]
    fn parse_registry_from_object_keeps_document_order() {
        let json = r#"{
            "zk-prefixer": {"id": "zk-prefixer", "name": "Create new unique note"},
            "app:go-back": {"id": "app:go-back", "name": "Navigate back",
                            "hotkeys": [{"modifiers": ["Mod", "Alt"], "key": "ArrowLeft"}]}
        }"#;
        let commands = parse_registry(json).expect("should parse");
        let ids: Vec<_> = commands.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["zk-prefixer", "app:go-back"]);
        assert_eq!(commands[1].hotkeys[0].key, "ArrowLeft");
    }

    #[test]
    fn parse_registry_tolerates_missing_fields() {
        let commands = parse_registry(r#"[{"id": "x:y"}, {}]"#).expect("should parse");
        assert_eq!(commands[0].name, "");
        assert_eq!(commands[1].id, "");
    }

    #[test]
    fn parse_registry_with_existing_prefix() {
        let commands =
            parse_registry(r#"[{"id": "x:y", "name": "Y", "prefix": ["x", "Tab"]}]"#).expect("parse");
        assert_eq!(commands[0].prefix, Some(vec![key('x'), crate::KeyCode::Tab]));
    }

    #[test]
    fn parse_registry_rejects_garbage() {
        assert!(parse_registry("42").is_err());
        assert!(parse_registry("[{\"id\": 3}]").is_err());
    }
}
