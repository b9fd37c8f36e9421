//! Server definitions and the case-insensitive registry

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::Protocol;

/// A named server with its opaque configuration.
///
/// The configuration keeps key order from the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDefinition {
    pub name: String,
    pub config: Map<String, Value>,
}

impl ServerDefinition {
    pub fn new(name: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Launched as a local process.
    pub fn is_stdio(&self) -> bool {
        self.config.contains_key("command")
    }

    /// Reached over a URL.
    pub fn is_http(&self) -> bool {
        self.config.contains_key("url")
    }

    /// Carries both `command` and `url`.
    pub fn is_ambiguous(&self) -> bool {
        self.is_stdio() && self.is_http()
    }

    /// Transport classification. `command` wins over `url` when both exist.
    pub fn transport(&self) -> Option<Protocol> {
        if self.is_stdio() {
            Some(Protocol::Stdio)
        } else if self.is_http() {
            Some(Protocol::Http)
        } else {
            None
        }
    }

    /// Whether this server passes an allow-list. An empty list allows all.
    ///
    /// Each listed protocol is checked on its own, so a server carrying both
    /// `command` and `url` passes either one.
    pub fn allowed_by(&self, protocols: &[Protocol]) -> bool {
        protocols.is_empty()
            || protocols.iter().any(|protocol| match protocol {
                Protocol::Stdio => self.is_stdio(),
                Protocol::Http => self.is_http(),
            })
    }
}

/// Servers keyed by lowercase identity, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerRegistry {
    servers: IndexMap<String, ServerDefinition>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry key for a server name.
    pub fn identity(name: &str) -> String {
        name.to_lowercase()
    }

    /// Insert or replace by identity.
    ///
    /// A replaced entry keeps its position; the new definition (and its
    /// casing) is stored. Returns the definition that was replaced.
    pub fn insert(&mut self, definition: ServerDefinition) -> Option<ServerDefinition> {
        self.servers
            .insert(Self::identity(&definition.name), definition)
    }

    pub fn get(&self, name: &str) -> Option<&ServerDefinition> {
        self.servers.get(&Self::identity(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(&Self::identity(name))
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// `(identity, definition)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServerDefinition)> {
        self.servers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Lowercase identities in registry order.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    /// A new registry holding only the entries `keep` accepts.
    pub fn filtered(&self, mut keep: impl FnMut(&str, &ServerDefinition) -> bool) -> Self {
        Self {
            servers: self
                .servers
                .iter()
                .filter(|(k, v)| keep(k, v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl FromIterator<ServerDefinition> for ServerRegistry {
    fn from_iter<I: IntoIterator<Item = ServerDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.insert(definition);
        }
        registry
    }
}

impl<'a> IntoIterator for &'a ServerRegistry {
    type Item = (&'a String, &'a ServerDefinition);
    type IntoIter = indexmap::map::Iter<'a, String, ServerDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.servers.iter()
    }
}
