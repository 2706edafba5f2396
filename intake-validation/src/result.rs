//! Validation outcome keyed by display label.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// Label-ordered map of messages. Labels keep their first-seen position so
/// summaries list problems in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MessageMap(Vec<(String, Vec<String>)>);

impl MessageMap {
    fn push(&mut self, label: &str, message: String) {
        match self.0.iter_mut().find(|(l, _)| l == label) {
            Some((_, messages)) => messages.push(message),
            None => self.0.push((label.to_string(), vec![message])),
        }
    }

    fn get(&self, label: &str) -> &[String] {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m.as_slice())
            .unwrap_or(&[])
    }

    fn summary(&self, heading: &str) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut out = format!("{heading}\n\n");
        for (label, messages) in &self.0 {
            out.push_str(&format!("• {label}: {}\n", messages.join(", ")));
        }
        out
    }
}

impl Serialize for MessageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, messages) in &self.0 {
            map.serialize_entry(label, messages)?;
        }
        map.end()
    }
}

/// Errors and warnings produced by a validation pass.
///
/// A label with no errors is valid. The data set is submittable only when
/// there are no errors at all; warnings never block submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: MessageMap,
    warnings: MessageMap,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, label: &str, message: impl Into<String>) {
        self.errors.push(label, message.into());
    }

    pub fn add_warning(&mut self, label: &str, message: impl Into<String>) {
        self.warnings.push(label, message.into());
    }

    /// True when no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.0.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.0.is_empty()
    }

    /// True when the given label has no errors.
    pub fn is_label_valid(&self, label: &str) -> bool {
        self.errors.get(label).is_empty()
    }

    pub fn errors_for(&self, label: &str) -> &[String] {
        self.errors.get(label)
    }

    pub fn warnings_for(&self, label: &str) -> &[String] {
        self.warnings.get(label)
    }

    /// Labels with errors, in first-seen order.
    pub fn error_labels(&self) -> impl Iterator<Item = &str> {
        self.errors.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn warning_labels(&self) -> impl Iterator<Item = &str> {
        self.warnings.0.iter().map(|(l, _)| l.as_str())
    }

    /// Total number of error messages across all labels.
    pub fn error_count(&self) -> usize {
        self.errors.0.iter().map(|(_, m)| m.len()).sum()
    }

    /// Appends every message of `other`, keeping label order.
    pub fn merge(&mut self, other: ValidationResult) {
        for (label, messages) in other.errors.0 {
            for message in messages {
                self.errors.push(&label, message);
            }
        }
        for (label, messages) in other.warnings.0 {
            for message in messages {
                self.warnings.push(&label, message);
            }
        }
    }

    /// Bullet list of errors for display, empty when there are none.
    pub fn error_summary(&self) -> String {
        self.errors.summary("Please correct the following errors:")
    }

    /// Bullet list of warnings for display, empty when there are none.
    pub fn warning_summary(&self) -> String {
        self.warnings.summary("Please review the following warnings:")
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_under_one_label() {
        let mut result = ValidationResult::new();
        result.add_error("Email Address", "first");
        result.add_error("Home Phone", "second");
        result.add_error("Email Address", "third");

        assert_eq!(result.errors_for("Email Address"), ["first", "third"]);
        assert_eq!(result.error_labels().collect::<Vec<_>>(), ["Email Address", "Home Phone"]);
        assert_eq!(result.error_count(), 3);
    }

    #[test]
    fn summary_lists_each_label_once() {
        let mut result = ValidationResult::new();
        result.add_error("Full Name", "This field is required");
        result.add_error("Full Name", "again");
        assert_eq!(
            result.error_summary(),
            "Please correct the following errors:\n\n• Full Name: This field is required, again\n"
        );
        assert_eq!(result.warning_summary(), "");
    }
}
