//! The document envelope exchanged with the library store.

use crate::abstraction::AbstractionDefinition;
use crate::busdef::BusDefinition;
use crate::component::Component;
use crate::design::Design;
use crate::vlnv::Vlnv;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a library document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// A component document.
    Component,
    /// A design document.
    Design,
    /// A bus definition document.
    BusDefinition,
    /// An abstraction definition document.
    AbstractionDefinition,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Component => write!(f, "component"),
            DocumentKind::Design => write!(f, "design"),
            DocumentKind::BusDefinition => write!(f, "bus definition"),
            DocumentKind::AbstractionDefinition => write!(f, "abstraction definition"),
        }
    }
}

/// Any document the library store can resolve a [`Vlnv`] to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Document {
    /// A component document.
    Component(Component),
    /// A design document.
    Design(Design),
    /// A bus definition document.
    BusDefinition(BusDefinition),
    /// An abstraction definition document.
    AbstractionDefinition(AbstractionDefinition),
}

impl Document {
    /// Returns the identity of the wrapped document.
    pub fn vlnv(&self) -> &Vlnv {
        match self {
            Document::Component(c) => &c.vlnv,
            Document::Design(d) => &d.vlnv,
            Document::BusDefinition(b) => &b.vlnv,
            Document::AbstractionDefinition(a) => &a.vlnv,
        }
    }

    /// Returns the kind of the wrapped document.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Component(_) => DocumentKind::Component,
            Document::Design(_) => DocumentKind::Design,
            Document::BusDefinition(_) => DocumentKind::BusDefinition,
            Document::AbstractionDefinition(_) => DocumentKind::AbstractionDefinition,
        }
    }

    /// Returns the wrapped component, if this is one.
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Document::Component(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the wrapped design, if this is one.
    pub fn as_design(&self) -> Option<&Design> {
        match self {
            Document::Design(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the wrapped abstraction definition, if this is one.
    pub fn as_abstraction(&self) -> Option<&AbstractionDefinition> {
        match self {
            Document::AbstractionDefinition(a) => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::DocRevision;

    #[test]
    fn kind_and_vlnv_accessors() {
        let vlnv = Vlnv::new("tut.fi", "ip", "cpu", "1.0");
        let doc = Document::Component(Component::new(vlnv.clone(), DocRevision::Std22));
        assert_eq!(doc.kind(), DocumentKind::Component);
        assert_eq!(doc.vlnv(), &vlnv);
        assert!(doc.as_component().is_some());
        assert!(doc.as_design().is_none());
    }

    #[test]
    fn kind_display() {
        assert_eq!(DocumentKind::BusDefinition.to_string(), "bus definition");
        assert_eq!(
            DocumentKind::AbstractionDefinition.to_string(),
            "abstraction definition"
        );
    }
}
