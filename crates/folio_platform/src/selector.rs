//! Minimal selector support
//!
//! Supports the selector shapes the motion layer needs: `tag`, `.class`,
//! `#id`, `[attribute]`, and comma-separated lists of those.

use smallvec::SmallVec;

use crate::dom::{Element, ElementKind};
use crate::error::{PlatformError, Result};

/// One compound-free selector
#[derive(Clone, Debug, PartialEq, Eq)]
enum Simple {
    Kind(ElementKind),
    Class(String),
    Id(String),
    Attribute(String),
}

impl Simple {
    fn parse(part: &str) -> Result<Self> {
        let invalid = || PlatformError::InvalidSelector(part.to_string());

        if let Some(class) = part.strip_prefix('.') {
            return valid_ident(class).then(|| Simple::Class(class.to_string())).ok_or_else(invalid);
        }
        if let Some(id) = part.strip_prefix('#') {
            return valid_ident(id).then(|| Simple::Id(id.to_string())).ok_or_else(invalid);
        }
        if let Some(attr) = part.strip_prefix('[') {
            let name = attr.strip_suffix(']').ok_or_else(invalid)?;
            return valid_ident(name)
                .then(|| Simple::Attribute(name.to_string()))
                .ok_or_else(invalid);
        }
        ElementKind::from_tag(part).map(Simple::Kind).ok_or_else(invalid)
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Simple::Kind(kind) => element.kind() == *kind,
            Simple::Class(class) => element.has_class(class),
            Simple::Id(id) => element.id() == Some(id.as_str()),
            Simple::Attribute(name) => element.has_attribute(name),
        }
    }
}

fn valid_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A selector list; matches when any alternative matches
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    alternatives: SmallVec<[Simple; 4]>,
}

impl Selector {
    /// Parse a selector list such as `"a, button, [data-cursor-hover]"`
    pub fn parse(input: &str) -> Result<Self> {
        let alternatives = input
            .split(',')
            .map(str::trim)
            .map(|part| {
                if part.is_empty() {
                    Err(PlatformError::InvalidSelector(input.to_string()))
                } else {
                    Simple::parse(part)
                }
            })
            .collect::<Result<SmallVec<[Simple; 4]>>>()?;

        Ok(Self { alternatives })
    }

    /// Selector matching a single class
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            alternatives: SmallVec::from_elem(Simple::Class(name.into()), 1),
        }
    }

    /// Selector matching a single `id` attribute
    pub fn id(name: impl Into<String>) -> Self {
        Self {
            alternatives: SmallVec::from_elem(Simple::Id(name.into()), 1),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives.iter().any(|s| s.matches(element))
    }
}
