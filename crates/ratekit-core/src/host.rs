#![forbid(unsafe_code)]

//! Mount point model and the attribute mirror.
//!
//! A rating control is attached to a [`HostElement`]. The control reflects its
//! state onto the host's ARIA attributes after every mutation, and treats an
//! external write of [`aria::VALUE_NOW`] as a direct value assignment.

use std::collections::BTreeMap;

/// Attribute carrying a declarative JSON option object.
pub const OPTIONS_ATTRIBUTE: &str = "data-rating-options";

/// ARIA attribute names the control reflects.
pub mod aria {
    pub const ROLE: &str = "role";
    pub const VALUE_MIN: &str = "aria-valuemin";
    pub const VALUE_MAX: &str = "aria-valuemax";
    pub const VALUE_NOW: &str = "aria-valuenow";
    pub const DISABLED: &str = "aria-disabled";
    pub const READONLY: &str = "aria-readonly";

    /// Role written to the host.
    pub const SLIDER_ROLE: &str = "slider";
}

/// Kind of document node offered as a mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
}

impl NodeKind {
    /// Only elements can host a control.
    #[must_use]
    pub const fn is_mountable(self) -> bool {
        matches!(self, Self::Element)
    }

    /// Returns the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::Document => "document",
        }
    }
}

/// A node a rating control may be mounted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostElement {
    kind: NodeKind,
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl HostElement {
    /// An element node with the given tag name.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element, tag)
    }

    /// A text node. Not mountable.
    #[must_use]
    pub fn text() -> Self {
        Self::with_kind(NodeKind::Text, "#text")
    }

    /// A comment node. Not mountable.
    #[must_use]
    pub fn comment() -> Self {
        Self::with_kind(NodeKind::Comment, "#comment")
    }

    /// The document node. Not mountable.
    #[must_use]
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, "#document")
    }

    fn with_kind(kind: NodeKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for HostElement {
    fn default() -> Self {
        Self::element("div")
    }
}
