//! Selection-page context and round navigation types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operational identifiers forwarded to subsequent portal queries.
///
/// `xnm` mirrors `xkxnm` and `xqm` mirrors `xkxqm`; downstream query
/// construction reads the short aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionContext {
    fields: BTreeMap<String, String>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of `key`, treating an empty string as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Academic year code (mirror of `xkxnm`).
    pub fn xnm(&self) -> Option<&str> {
        self.non_empty("xnm")
    }

    /// Term code (mirror of `xkxqm`).
    pub fn xqm(&self) -> Option<&str> {
        self.non_empty("xqm")
    }

    /// Enrollment-round context id (`xkkz_id`).
    pub fn context_id(&self) -> Option<&str> {
        self.non_empty("xkkz_id")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl FromIterator<(String, String)> for SelectionContext {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One enrollment-round tab from the portal navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTab {
    pub label: String,
    pub active: bool,
    /// `kklxdm`
    pub classification_code: String,
    /// `xkkz_id`
    pub context_id: String,
    /// `njdm_id`
    pub grade_code: String,
    /// `zyh_id`
    pub major_code: String,
}

/// Round metadata shown on the selection page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMeta {
    /// `xklc`
    pub code: Option<String>,
    /// `xklcmc`, e.g. "第2轮选课"
    pub name: Option<String>,
}

impl RoundMeta {
    /// Numeric round, when the code is numeric.
    pub fn number(&self) -> Option<u32> {
        self.code.as_deref().and_then(|c| c.trim().parse().ok())
    }
}

/// One `<option>` of a `<select>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}
