//! Term parser registry

use jwxt_core::{Course, RecordError, RegistryError, TermCalendar};
use serde_json::Value;
use tracing::debug;

use crate::strategies::{LegacyListParser, Snapshot2025Parser};

/// One generation of the portal's raw course-record shape.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait TermParser: Send + Sync {
    /// Stable identifier, unique within a registry.
    fn id(&self) -> &str;

    /// Term labels this parser claims verbatim.
    fn term_labels(&self) -> &[&str];

    /// Revision of the record mapping.
    fn version(&self) -> &str;

    /// Whether a label follows one of this generation's naming conventions.
    fn matches_label(&self, label: &str) -> bool;

    /// Transform one raw record into a course with a single section.
    ///
    /// A time pattern that fails to parse rejects the whole record.
    fn parse(&self, record: &Value, calendar: &TermCalendar) -> Result<Course, RecordError>;
}

/// Outcome of looking up a term label.
#[derive(Clone, Copy)]
pub enum Resolution<'r> {
    /// The label was blank; nothing to resolve yet.
    Unresolved,
    Resolved(&'r dyn TermParser),
    /// No registered parser claims the label.
    Unsupported,
}

impl<'r> Resolution<'r> {
    pub fn parser(&self) -> Option<&'r dyn TermParser> {
        match self {
            Resolution::Resolved(parser) => Some(*parser),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl std::fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Unresolved => f.write_str("Unresolved"),
            Resolution::Resolved(parser) => f.debug_tuple("Resolved").field(&parser.id()).finish(),
            Resolution::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Registry of term parsers.
/// Parsers must be explicitly registered; an unknown label never falls back
/// to a default parser.
///
/// # Example
/// ```ignore
/// let registry = ParserRegistry::with_defaults();
/// let parser = registry.require("2025-2026 春")?;
/// let course = parser.parse(&record, &calendar)?;
/// ```
pub struct ParserRegistry {
    parsers: Vec<Box<dyn TermParser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry holding the snapshot-2025 and legacy list parsers.
    pub fn with_defaults() -> Self {
        Self {
            parsers: vec![
                Box::new(Snapshot2025Parser::new()),
                Box::new(LegacyListParser::new()),
            ],
        }
    }

    /// Register a parser. Ids must be unique.
    pub fn register(&mut self, parser: Box<dyn TermParser>) -> Result<(), RegistryError> {
        if self.parsers.iter().any(|p| p.id() == parser.id()) {
            return Err(RegistryError::DuplicateParser {
                id: parser.id().to_string(),
            });
        }
        self.parsers.push(parser);
        Ok(())
    }

    /// Look up the parser for `label`.
    ///
    /// Exact labels of every parser are checked before any naming pattern;
    /// patterns are tried in registration order.
    pub fn resolve(&self, label: &str) -> Resolution<'_> {
        let label = label.trim();
        if label.is_empty() {
            return Resolution::Unresolved;
        }

        let exact = self
            .parsers
            .iter()
            .find(|p| p.term_labels().iter().any(|known| *known == label));
        let found = exact.or_else(|| self.parsers.iter().find(|p| p.matches_label(label)));

        match found {
            Some(parser) => Resolution::Resolved(parser.as_ref()),
            None => {
                debug!(label, registered = self.parsers.len(), "no term parser for label");
                Resolution::Unsupported
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but a blank or unknown label is an error.
    pub fn require(&self, label: &str) -> Result<&dyn TermParser, RegistryError> {
        self.resolve(label)
            .parser()
            .ok_or_else(|| RegistryError::UnsupportedTerm {
                label: label.trim().to_string(),
            })
    }

    pub fn get(&self, id: &str) -> Option<&dyn TermParser> {
        self.parsers
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.as_ref())
    }

    /// Registered parser ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedParser {
        id: &'static str,
        labels: &'static [&'static str],
        prefix: &'static str,
    }

    impl TermParser for FixedParser {
        fn id(&self) -> &str {
            self.id
        }

        fn term_labels(&self) -> &[&str] {
            self.labels
        }

        fn version(&self) -> &str {
            "test"
        }

        fn matches_label(&self, label: &str) -> bool {
            label.starts_with(self.prefix)
        }

        fn parse(&self, _record: &Value, _calendar: &TermCalendar) -> Result<Course, RecordError> {
            Err(RecordError::NotAnObject)
        }
    }

    fn registry() -> ParserRegistry {
        let mut registry = ParserRegistry::new();
        registry
            .register(Box::new(FixedParser {
                id: "pattern-first",
                labels: &[],
                prefix: "2030",
            }))
            .unwrap();
        registry
            .register(Box::new(FixedParser {
                id: "exact",
                labels: &["2030 Autumn"],
                prefix: "never",
            }))
            .unwrap();
        registry
    }

    #[test]
    fn test_exact_label_beats_earlier_pattern() {
        let registry = registry();
        let resolved = registry.resolve("2030 Autumn");
        assert_eq!(resolved.parser().map(|p| p.id()), Some("exact"));
        assert_eq!(
            registry.resolve("2030 Spring").parser().map(|p| p.id()),
            Some("pattern-first")
        );
    }

    #[test]
    fn test_blank_and_unknown_labels() {
        let registry = registry();
        assert!(matches!(registry.resolve("   "), Resolution::Unresolved));
        assert!(matches!(registry.resolve("1999"), Resolution::Unsupported));
        assert_eq!(
            registry.require("1999").err(),
            Some(RegistryError::UnsupportedTerm {
                label: "1999".to_string()
            })
        );
        assert!(ParserRegistry::new().require("2030 Autumn").is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = registry();
        let err = registry
            .register(Box::new(FixedParser {
                id: "exact",
                labels: &[],
                prefix: "x",
            }))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateParser {
                id: "exact".to_string()
            }
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_defaults_registered() {
        let registry = ParserRegistry::with_defaults();
        assert_eq!(registry.ids(), vec!["snapshot-2025", "jwxt-legacy"]);
        assert!(registry.get("jwxt-legacy").is_some());
        assert_eq!(format!("{:?}", registry.resolve("2025 Spring")), r#"Resolved("snapshot-2025")"#);
    }
}
