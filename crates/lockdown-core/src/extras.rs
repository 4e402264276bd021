//! One-shot provisioning payload delivered with `ProvisioningComplete`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the enrollment identifier inside the admin extras bundle
pub const ENROLLED_ID_KEY: &str = "enrolledId";

/// A primitive value carried in the extras bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    /// Explicit `null`, as a JSON payload may carry for unset fields
    Null,
    /// Boolean flag (e.g. `auto_enroll`)
    Bool(bool),
    /// 64-bit integer; the platform's int and long both land here
    Long(i64),
    /// Floating point value
    Double(f64),
    /// Text value
    String(String),
}

impl ExtraValue {
    /// Borrow the value as text if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

/// Why an enrollment identifier could not be taken from the extras
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEnrolledId {
    /// Key not present
    Absent,
    /// Key present with a non-string value
    WrongType,
    /// Key present with an empty string
    Empty,
}

/// Ordered key/value bundle from the provisioning handshake
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentExtras {
    values: BTreeMap<String, ExtraValue>,
}

impl EnrollmentExtras {
    /// Empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ExtraValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.values.get(key)
    }

    /// String value lookup; non-string values read as absent
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ExtraValue::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bundle is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Enrollment identifier, with the reason when unusable
    pub fn lookup_enrolled_id(&self) -> Result<&str, MissingEnrolledId> {
        match self.get(ENROLLED_ID_KEY) {
            None | Some(ExtraValue::Null) => Err(MissingEnrolledId::Absent),
            Some(ExtraValue::String(id)) if id.trim().is_empty() => Err(MissingEnrolledId::Empty),
            Some(ExtraValue::String(id)) => Ok(id),
            Some(_) => Err(MissingEnrolledId::WrongType),
        }
    }

    /// Enrollment identifier if present and usable
    pub fn enrolled_id(&self) -> Option<&str> {
        self.lookup_enrolled_id().ok()
    }

    /// Decode a JSON object as delivered in a provisioning payload
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<K: Into<String>, V: Into<ExtraValue>> FromIterator<(K, V)> for EnrollmentExtras {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrolled_id_present() {
        let extras = EnrollmentExtras::new().with(ENROLLED_ID_KEY, "DEV-42");
        assert_eq!(extras.enrolled_id(), Some("DEV-42"));
    }

    #[test]
    fn test_enrolled_id_wrong_type_or_empty() {
        let numeric = EnrollmentExtras::new().with(ENROLLED_ID_KEY, 42i64);
        assert_eq!(
            numeric.lookup_enrolled_id(),
            Err(MissingEnrolledId::WrongType)
        );

        let blank = EnrollmentExtras::new().with(ENROLLED_ID_KEY, "  ");
        assert_eq!(blank.lookup_enrolled_id(), Err(MissingEnrolledId::Empty));

        assert_eq!(
            EnrollmentExtras::new().lookup_enrolled_id(),
            Err(MissingEnrolledId::Absent)
        );
    }

    #[test]
    fn test_decode_provisioning_bundle() {
        let extras = EnrollmentExtras::from_json(
            r#"{"enrolledId":"DEV-7","auto_enroll":true,"policy":"strict_emi","retries":3}"#,
        )
        .unwrap();
        assert_eq!(extras.len(), 4);
        assert_eq!(extras.enrolled_id(), Some("DEV-7"));
        assert_eq!(extras.get("auto_enroll"), Some(&ExtraValue::Bool(true)));
        assert_eq!(extras.get("retries"), Some(&ExtraValue::Long(3)));
        assert_eq!(extras.get_str("policy"), Some("strict_emi"));
    }

    #[test]
    fn test_decode_bundle_with_null_values() {
        let extras =
            EnrollmentExtras::from_json(r#"{"enrolledId":"DEV-1","server_url":null}"#).unwrap();
        assert_eq!(extras.enrolled_id(), Some("DEV-1"));
        assert_eq!(extras.get("server_url"), Some(&ExtraValue::Null));
        assert_eq!(extras.get_str("server_url"), None);

        let unset = EnrollmentExtras::from_json(r#"{"enrolledId":null}"#).unwrap();
        assert_eq!(unset.lookup_enrolled_id(), Err(MissingEnrolledId::Absent));
    }
}
