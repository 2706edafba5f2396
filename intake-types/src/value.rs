//! Form values and the flat data set that carries them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date format used by every date field (`MM/DD/YYYY`).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A single value in a [`FormDataSet`].
///
/// Serialized untagged so the persisted draft is plain JSON. Whole numbers
/// above `i64::MAX` land in `Unsigned` so they keep every digit. `Other`
/// catches anything the form vocabulary does not describe so that unknown
/// keys survive a save/load round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Records(Vec<NestedRecord>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the records if this is a `Records` value.
    pub fn as_records(&self) -> Option<&[NestedRecord]> {
        match self {
            Self::Records(records) => Some(records),
            _ => None,
        }
    }

    /// String form of a scalar value. Lists and JSON nulls become empty.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Unsigned(u) => u.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::Records(_) | Self::Other(serde_json::Value::Null) => String::new(),
            Self::Other(v) => v.to_string(),
        }
    }

    /// True when the string form is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Records(records) => records.is_empty(),
            other => other.to_display_string().trim().is_empty(),
        }
    }

    /// Interprets the value as a checkbox/radio flag.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Unsigned(u) => *u != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1" | "on" | "checked"
            ),
            Self::Records(records) => !records.is_empty(),
            Self::Other(serde_json::Value::Bool(b)) => *b,
            Self::Other(_) => false,
        }
    }

    /// Numeric view of the value, parsing text when necessary.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Unsigned(u) => Some(*u as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// True for values the scalar renderers and validators understand.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Self::Records(_) | Self::Other(serde_json::Value::Array(_) | serde_json::Value::Object(_))
        )
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::Unsigned(u), Self::Integer)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<NestedRecord>> for FieldValue {
    fn from(records: Vec<NestedRecord>) -> Self {
        Self::Records(records)
    }
}

/// One entry of a repeating group (a dependent or a beneficiary).
///
/// Known keys are `name`, `dob`, `relationship` and, for beneficiaries,
/// `percentage`. Other keys are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedRecord(BTreeMap<String, FieldValue>);

impl NestedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// String form of a field, empty when absent.
    pub fn text(&self, key: &str) -> String {
        self.0
            .get(key)
            .map(FieldValue::to_display_string)
            .unwrap_or_default()
    }

    /// The beneficiary allocation, if present and numeric.
    pub fn percentage(&self) -> Option<f64> {
        self.0
            .get(crate::keys::RECORD_PERCENTAGE)
            .filter(|v| !v.is_blank())
            .and_then(FieldValue::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for NestedRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The flat key-value representation of one client's intake data.
///
/// Backed by an ordered map so serialization (and therefore hashing) is
/// canonical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDataSet {
    fields: BTreeMap<String, FieldValue>,
}

impl FormDataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// String form of a field, empty when absent.
    pub fn text(&self, key: &str) -> String {
        self.fields
            .get(key)
            .map(FieldValue::to_display_string)
            .unwrap_or_default()
    }

    /// True when the field is absent or blank.
    pub fn is_blank(&self, key: &str) -> bool {
        self.fields.get(key).is_none_or(FieldValue::is_blank)
    }

    /// Checkbox/radio state of a field; absent means unset.
    pub fn flag(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(FieldValue::is_truthy)
    }

    /// Records of a repeating group. Absent or non-list values yield an
    /// empty slice; callers that must distinguish use [`FormDataSet::get`].
    pub fn records(&self, key: &str) -> &[NestedRecord] {
        self.fields
            .get(key)
            .and_then(FieldValue::as_records)
            .unwrap_or(&[])
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormDataSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for FormDataSet {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
