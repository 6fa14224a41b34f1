//! Attribute tree used to persist slot state.
//!
//! An [`Element`] is a tag, a flat string map of attributes and an ordered
//! list of child elements. Hosts embed it in whatever project document they
//! write; standalone files are TOML.
//!
//! # TOML Format
//!
//! ```toml
//! tag = "slot"
//!
//! [attributes]
//! autoquit = "100"
//! gate = "0"
//! on = "1"
//! wet = "0.75"
//!
//! [[children]]
//! tag = "echocontrols"
//!
//! [children.attributes]
//! echo_feedback = "40"
//! echo_time = "250"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// A tagged node with string attributes and nested children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Node name.
    pub tag: String,

    /// Attribute map. Values are kept as strings and parsed by the reader.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder form of [`push_child`](Self::push_child).
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        self.attributes.insert(key.into(), value.to_string());
    }

    /// Raw attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First child with the given tag, if any.
    pub fn first_child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Load an element from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let element = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), tag = %element.tag, "loaded element");
        Ok(element)
    }

    /// Parse an element from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the element to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), tag = %self.tag, "saved element");
        Ok(())
    }

    /// Serialize the element to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("slot")
            .with_attribute("on", 1)
            .with_attribute("wet", 0.75)
            .with_child(Element::new("echocontrols").with_attribute("echo_time", 250))
            .with_child(Element::new("echocontrols").with_attribute("echo_time", 500))
    }

    #[test]
    fn attributes_are_strings() {
        let e = sample();
        assert_eq!(e.attribute("on"), Some("1"));
        assert_eq!(e.attribute("wet"), Some("0.75"));
        assert_eq!(e.attribute("gate"), None);
    }

    #[test]
    fn set_attribute_replaces() {
        let mut e = sample();
        e.set_attribute("wet", "0.1");
        assert_eq!(e.attribute("wet"), Some("0.1"));
        assert_eq!(e.attributes.len(), 2);
    }

    #[test]
    fn first_child_takes_earliest_match() {
        let e = sample();
        let child = e.first_child("echocontrols").unwrap();
        assert_eq!(child.attribute("echo_time"), Some("250"));
        assert!(e.first_child("ampcontrols").is_none());
    }

    #[test]
    fn toml_roundtrip_keeps_nesting() {
        let e = sample();
        let text = e.to_toml().unwrap();
        assert!(text.contains("[[children]]"));
        assert_eq!(Element::from_toml(&text).unwrap(), e);
    }

    #[test]
    fn minimal_toml() {
        let e = Element::from_toml("tag = \"slot\"").unwrap();
        assert_eq!(e, Element::new("slot"));
    }

    #[test]
    fn missing_tag_is_error() {
        assert!(matches!(
            Element::from_toml("[attributes]\non = \"1\""),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
