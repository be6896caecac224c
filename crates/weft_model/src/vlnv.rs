//! Vendor-library-name-version document references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A four-part document reference: vendor, library, name, version.
///
/// Every document in a library is identified by exactly one `Vlnv`.
/// The textual form is colon-separated: `tut.fi:flat:interconnect:1.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vlnv {
    /// The vendor domain (e.g., `tut.fi`).
    pub vendor: String,
    /// The library within the vendor namespace.
    pub library: String,
    /// The document name.
    pub name: String,
    /// The document version string.
    pub version: String,
}

impl Vlnv {
    /// Creates a reference from its four parts.
    pub fn new(
        vendor: impl Into<String>,
        library: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            library: library.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parses a colon-separated reference (`vendor:library:name:version`).
    pub fn parse(text: &str) -> Result<Self, VlnvParseError> {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() != 4 {
            return Err(VlnvParseError {
                text: text.to_string(),
            });
        }
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(VlnvParseError {
                text: text.to_string(),
            });
        }
        Ok(Self::new(
            parts[0].trim(),
            parts[1].trim(),
            parts[2].trim(),
            parts[3].trim(),
        ))
    }

    /// Returns a copy of this reference with a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            vendor: self.vendor.clone(),
            library: self.library.clone(),
            name: name.into(),
            version: self.version.clone(),
        }
    }
}

impl fmt::Display for Vlnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

/// Error returned when a textual reference is not a four-part VLNV.
#[derive(Debug, thiserror::Error)]
#[error("invalid VLNV reference '{text}' (expected vendor:library:name:version)")]
pub struct VlnvParseError {
    /// The text that failed to parse.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_four_parts() {
        let v = Vlnv::parse("tut.fi:flat:interconnect:1.0").unwrap();
        assert_eq!(v.vendor, "tut.fi");
        assert_eq!(v.library, "flat");
        assert_eq!(v.name, "interconnect");
        assert_eq!(v.version, "1.0");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert!(Vlnv::parse("a:b:c").is_err());
        assert!(Vlnv::parse("a:b:c:d:e").is_err());
    }

    #[test]
    fn parse_rejects_empty_part() {
        assert!(Vlnv::parse("a::c:d").is_err());
    }

    #[test]
    fn display_roundtrip() {
        let text = "pulp:protocol:axi4:r0p0";
        let v = Vlnv::parse(text).unwrap();
        assert_eq!(v.to_string(), text);
    }

    #[test]
    fn with_name_keeps_other_parts() {
        let v = Vlnv::new("pulp", "protocol", "axi4.abs", "1.0");
        let renamed = v.with_name("axi4");
        assert_eq!(renamed.name, "axi4");
        assert_eq!(renamed.vendor, "pulp");
        assert_eq!(renamed.version, "1.0");
    }

    #[test]
    fn serde_roundtrip() {
        let v = Vlnv::new("a", "b", "c", "d");
        let json = serde_json::to_string(&v).unwrap();
        let restored: Vlnv = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, v);
    }
}
