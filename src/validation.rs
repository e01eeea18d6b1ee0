//! Shape validation for homework API responses
//!
//! Nothing in a response is trusted until [`check_response`] has accepted it.
//! The checks run in a fixed order: required keys, then the object type, then
//! the type of `homeworks`.

use crate::error::{ResponseShapeError, Result};
use serde_json::Value;

/// Top-level keys every homework API response must carry
pub const EXPECTED_KEYS: &[&str] = &["current_date", "homeworks"];

/// Validate an API response and return its `homeworks` list unchanged
///
/// The list may be empty. Records are returned as raw JSON; rendering them is
/// [`parse_status`](crate::status::parse_status)'s job.
///
/// # Errors
///
/// Returns [`Error::CheckResponse`](crate::Error::CheckResponse) if a required
/// key is absent, the response is not an object, or `homeworks` is not a list.
pub fn check_response(response: &Value) -> Result<Vec<Value>> {
    if !EXPECTED_KEYS.iter().all(|key| has_key(response, key)) {
        return Err(ResponseShapeError::MissingKeys {
            expected: EXPECTED_KEYS,
        }
        .into());
    }

    let Value::Object(fields) = response else {
        return Err(ResponseShapeError::NotAnObject {
            found: json_type(response),
        }
        .into());
    };

    match fields.get("homeworks") {
        Some(Value::Array(homeworks)) => Ok(homeworks.clone()),
        _ => Err(ResponseShapeError::HomeworksNotAList.into()),
    }
}

/// The API's `current_date`, if the response carries an integer one
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

// Membership follows the container: object keys, or string items of an array.
fn has_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(fields) => fields.contains_key(key),
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(key)),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn shape_error(response: &Value) -> ResponseShapeError {
        match check_response(response) {
            Err(Error::CheckResponse(e)) => e,
            other => panic!("expected a shape error for {response}, got {other:?}"),
        }
    }

    #[test]
    fn returns_homeworks_unchanged() {
        let homeworks = json!([
            {"homework_name": "hw2", "status": "reviewing", "id": 2},
            {"homework_name": "hw1", "status": "approved", "id": 1}
        ]);
        let response = json!({"current_date": 1_700_000_000, "homeworks": homeworks.clone()});

        let result = check_response(&response).unwrap();
        assert_eq!(Value::Array(result), homeworks);
    }

    #[test]
    fn accepts_empty_homeworks() {
        let response = json!({"current_date": 1_700_000_000, "homeworks": []});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn missing_keys_are_rejected() {
        for response in [
            json!({"homeworks": []}),
            json!({"current_date": 1}),
            json!({}),
            json!(null),
            json!("current_date homeworks"),
        ] {
            assert_eq!(
                shape_error(&response),
                ResponseShapeError::MissingKeys {
                    expected: EXPECTED_KEYS
                }
            );
        }
    }

    #[test]
    fn non_object_with_both_keys_is_rejected_as_wrong_type() {
        let response = json!(["current_date", "homeworks"]);
        assert_eq!(
            shape_error(&response),
            ResponseShapeError::NotAnObject { found: "array" }
        );
    }

    #[test]
    fn homeworks_must_be_a_list() {
        for homeworks in [json!({}), json!("hw"), json!(null), json!(3)] {
            let response = json!({"current_date": 1, "homeworks": homeworks});
            assert_eq!(shape_error(&response), ResponseShapeError::HomeworksNotAList);
        }
    }

    #[test]
    fn current_date_reads_integer_only() {
        assert_eq!(current_date(&json!({"current_date": 42})), Some(42));
        assert_eq!(current_date(&json!({"current_date": "42"})), None);
        assert_eq!(current_date(&json!({})), None);
    }
}
