use crate::{Result, error::MalformedDataSnafu};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

/// The document handed across the widget boundary. The home-screen widget
/// host renders exactly what is in here: one habit's display name and whether
/// it was marked done for the current period.
///
/// The wire form is a two-field JSON object with the stable field names
/// `name` and `completed`:
///
/// ```json
/// {"name":"Drink water","completed":true}
/// ```
///
/// Values are immutable once constructed; a new snapshot is built for every
/// render cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Getters, CopyGetters)]
pub struct HabitSnapshot {
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    completed: bool,
}

impl HabitSnapshot {
    pub fn new<S: AsRef<str>>(name: S, completed: bool) -> Self {
        Self {
            name: String::from(name.as_ref()),
            completed,
        }
    }

    /// Encodes the snapshot as the JSON document the widget host reads.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| e.into())
    }

    /// Decodes a snapshot document. Fails with [`crate::Error::MalformedData`]
    /// when either field is missing or carries the wrong type; the error
    /// message names the offending field.
    pub fn decode(data: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(data);
        serde_path_to_error::deserialize(&mut deserializer).context(MalformedDataSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_through_the_wire_form() {
        let snapshot = HabitSnapshot::new("Read", false);
        let decoded = HabitSnapshot::decode(&snapshot.encode().unwrap()).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn empty_name_is_allowed() {
        let snapshot = HabitSnapshot::new("", true);
        let decoded = HabitSnapshot::decode(&snapshot.encode().unwrap()).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn decodes_documents_from_the_widget_host() {
        let decoded = HabitSnapshot::decode(r#"{"name": "Drink water", "completed": true}"#).unwrap();
        assert_eq!(HabitSnapshot::new("Drink water", true), decoded);
    }

    #[test]
    fn missing_name_is_malformed() {
        let error = HabitSnapshot::decode(r#"{"completed": true}"#).unwrap_err();
        assert!(matches!(error, Error::MalformedData { .. }));
    }

    #[test]
    fn missing_completed_is_malformed() {
        let error = HabitSnapshot::decode(r#"{"name": "Run"}"#).unwrap_err();
        assert!(matches!(error, Error::MalformedData { .. }));
    }

    #[test]
    fn mistyped_completed_is_malformed() {
        let error = HabitSnapshot::decode(r#"{"name": "Run", "completed": "yes"}"#).unwrap_err();
        assert!(matches!(error, Error::MalformedData { .. }));
        assert!(error.to_string().contains("completed"));
    }

    #[test]
    fn mistyped_name_is_malformed() {
        let error = HabitSnapshot::decode(r#"{"name": 7, "completed": true}"#).unwrap_err();
        assert!(matches!(error, Error::MalformedData { .. }));
    }
}
