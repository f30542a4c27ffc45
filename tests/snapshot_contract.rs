//! Contract tests for the document handed to the widget host: a JSON object
//! with exactly the two fields `name` and `completed`.

use habit_widget::{Error, HabitBuilder, HabitSnapshot};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn the_wire_form_has_exactly_two_stable_fields() {
    let document = HabitSnapshot::new("Drink water", true).encode().unwrap();
    let value: Value = serde_json::from_str(&document).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(2, object.len());
    assert_eq!(Some(&Value::String(String::from("Drink water"))), object.get("name"));
    assert_eq!(Some(&Value::Bool(true)), object.get("completed"));
}

#[test]
fn documents_round_trip_unchanged() {
    for (name, completed) in [("Read", false), ("", true), ("Déjeuner à midi", true)] {
        let snapshot = HabitSnapshot::new(name, completed);
        let decoded = HabitSnapshot::decode(&snapshot.encode().unwrap()).unwrap();
        assert_eq!(snapshot, decoded);
    }
}

#[test]
fn a_partial_document_is_rejected() {
    for document in [r#"{}"#, r#"{"name": "Run"}"#, r#"{"completed": false}"#] {
        assert!(matches!(
            HabitSnapshot::decode(document),
            Err(Error::MalformedData { .. })
        ));
    }
}

#[test]
fn a_mistyped_document_is_rejected() {
    for document in [
        r#"{"name": "Run", "completed": "yes"}"#,
        r#"{"name": 3, "completed": true}"#,
        r#"{"name": null, "completed": true}"#,
        r#"[]"#,
    ] {
        assert!(matches!(
            HabitSnapshot::decode(document),
            Err(Error::MalformedData { .. })
        ));
    }
}

#[test]
fn a_configured_habit_produces_its_own_document() {
    let config = HabitBuilder::default()
        .habit(String::from("Ten minutes of stretching"))
        .build()
        .unwrap();
    let snapshot = HabitSnapshot::new(config.habit.clone(), false);
    let document = snapshot.encode().unwrap();
    assert_eq!(
        r#"{"name":"Ten minutes of stretching","completed":false}"#,
        document
    );
}
