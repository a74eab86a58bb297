//! Request payload validation
//!
//! Every required field is checked before any error is returned, so a
//! caller sees all problems with a payload at once.

use serde_json::{Map, Value};

use crate::service::FeatureVector;

use super::error::{ApiError, FieldError};

const MISSING: &str = "field required";
const NOT_A_NUMBER: &str = "value is not a valid number";
const NOT_FINITE: &str = "value must be a finite number";

/// Build a feature vector from a decoded JSON body.
///
/// Accepts JSON numbers and strings holding a decimal float. Unknown keys
/// are ignored. No range checks are applied.
pub fn feature_vector(body: &Value) -> Result<FeatureVector, ApiError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ApiError::InvalidJson("request body must be a JSON object".to_string()))?;

    let mut errors = Vec::new();
    let mut take = |field: &'static str| match parse_field(obj, field) {
        Ok(value) => value,
        Err(message) => {
            errors.push(FieldError { field, message });
            f64::NAN
        }
    };

    let features = FeatureVector {
        sepal_length: take("sepal_length"),
        sepal_width: take("sepal_width"),
        petal_length: take("petal_length"),
        petal_width: take("petal_width"),
    };

    if errors.is_empty() {
        Ok(features)
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn parse_field(obj: &Map<String, Value>, field: &str) -> Result<f64, &'static str> {
    let value = match obj.get(field) {
        None => return Err(MISSING),
        Some(Value::Number(n)) => n.as_f64().ok_or(NOT_A_NUMBER)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| NOT_A_NUMBER)?,
        Some(_) => return Err(NOT_A_NUMBER),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(NOT_FINITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_errors(body: Value) -> Vec<FieldError> {
        match feature_vector(&body) {
            Err(ApiError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_payload() {
        let features = feature_vector(&json!({
            "sepal_length": 5.1,
            "sepal_width": 3.5,
            "petal_length": 1.4,
            "petal_width": 0.2
        }))
        .unwrap();
        assert_eq!(features.to_array(), [5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn test_integers_and_numeric_strings_accepted() {
        let features = feature_vector(&json!({
            "sepal_length": 5,
            "sepal_width": " 3.5 ",
            "petal_length": "1.4",
            "petal_width": 0
        }))
        .unwrap();
        assert_eq!(features.to_array(), [5.0, 3.5, 1.4, 0.0]);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let features = feature_vector(&json!({
            "sepal_length": 5.1,
            "sepal_width": 3.5,
            "petal_length": 1.4,
            "petal_width": 0.2,
            "species": "unknown"
        }))
        .unwrap();
        assert_eq!(features.petal_width, 0.2);
    }

    #[test]
    fn test_negative_values_pass_through() {
        let features = feature_vector(&json!({
            "sepal_length": -5.1,
            "sepal_width": -3.5,
            "petal_length": -1.4,
            "petal_width": -0.2
        }))
        .unwrap();
        assert_eq!(features.sepal_length, -5.1);
    }

    #[test]
    fn test_each_missing_field_reported() {
        let full = json!({
            "sepal_length": 5.1,
            "sepal_width": 3.5,
            "petal_length": 1.4,
            "petal_width": 0.2
        });
        for field in crate::engine::FEATURE_NAMES {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            let errors = field_errors(body);
            assert_eq!(errors, vec![FieldError { field, message: MISSING }]);
        }
    }

    #[test]
    fn test_all_problems_reported_in_feature_order() {
        let errors = field_errors(json!({
            "petal_width": "wide",
            "sepal_width": null,
            "petal_length": true
        }));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["sepal_length", "sepal_width", "petal_length", "petal_width"]);
        assert_eq!(errors[0].message, MISSING);
        assert_eq!(errors[1].message, NOT_A_NUMBER);
        assert_eq!(errors[2].message, NOT_A_NUMBER);
        assert_eq!(errors[3].message, NOT_A_NUMBER);
    }

    #[test]
    fn test_nested_values_rejected() {
        let errors = field_errors(json!({
            "sepal_length": [5.1],
            "sepal_width": {"cm": 3.5},
            "petal_length": 1.4,
            "petal_width": 0.2
        }));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        let errors = field_errors(json!({
            "sepal_length": "NaN",
            "sepal_width": "inf",
            "petal_length": 1.4,
            "petal_width": 0.2
        }));
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.message == NOT_FINITE));
    }

    #[test]
    fn test_non_object_body() {
        let err = feature_vector(&json!([5.1, 3.5, 1.4, 0.2])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));
    }
}
