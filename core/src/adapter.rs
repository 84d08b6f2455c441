//! Response normalization.
//!
//! Turns the extraction service's JSON envelope into a [`ResultSet`]:
//!
//! ```text
//! results.confidence_matrix ──keys──▶ one row per attribute
//!                │                     ├── values: M1 / M2 / M3 lookups
//!                └──score field──────▶ └── score (unmodified)
//! results.extractions.<method 1>.raw_text ──▶ raw text
//! ```
//!
//! Transports call [`check_status`] and then [`parse_response`]. Neither
//! returns partial results: any failure discards the whole response.

use serde_json::{Map, Value};

use crate::error::{ExtractError, ExtractResult};
use crate::models::{format_number, ExtractionRow, ResultSet, Score};
use crate::schema::SchemaProfile;

/// Fail on any non-2xx status. The message comes from the status text.
pub fn check_status(status: u16, status_text: &str) -> ExtractResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ExtractError::Status {
            status,
            status_text: status_text.to_string(),
        })
    }
}

/// Decode a response body and normalize it.
pub fn parse_response(body: &str, profile: &SchemaProfile) -> ExtractResult<ResultSet> {
    let envelope: Value = serde_json::from_str(body)?;
    normalize(&envelope, profile)
}

/// Normalize a decoded envelope.
///
/// A missing `results` or `confidence_matrix` yields no rows rather than an
/// error; wrongly-typed sections are [`ExtractError::MalformedResponse`].
pub fn normalize(envelope: &Value, profile: &SchemaProfile) -> ExtractResult<ResultSet> {
    let envelope = envelope
        .as_object()
        .ok_or_else(|| malformed("response is not a JSON object"))?;

    if envelope.get("success").and_then(Value::as_bool) == Some(false) {
        log::warn!("Extraction service reported success=false");
    }

    let results = match optional_object(envelope, "results")? {
        Some(results) => results,
        None => return Ok(ResultSet::default()),
    };

    let extractions = optional_object(results, "extractions")?;
    let methods = resolve_methods(extractions, profile)?;

    let rows = match optional_object(results, "confidence_matrix")? {
        Some(matrix) => matrix
            .iter()
            .filter(|(key, _)| !profile.is_reserved(key))
            .map(|(key, entry)| build_row(key, entry, methods, profile))
            .collect(),
        None => Vec::new(),
    };

    let raw_text = methods
        .get(profile.raw_text_method)
        .copied()
        .flatten()
        .and_then(|method| find_value(method, &profile.raw_text_field))
        .map(|value| match value {
            Value::Null => String::new(),
            other => format_value(Some(other)),
        })
        .unwrap_or_default();

    log::debug!("Normalized {} rows ({} bytes raw text)", rows.len(), raw_text.len());

    Ok(ResultSet { rows, raw_text })
}

/// Look up a key: exact match first, then a case-insensitive scan.
pub fn find_value<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| {
        let wanted = key.to_lowercase();
        object
            .iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(_, v)| v)
    })
}

/// Format one cell: `null` is "null", absent is "-".
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None => "-".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        },
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => format_value(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(object @ Value::Object(_)) => object.to_string(),
    }
}

fn build_row(
    key: &str,
    entry: &Value,
    methods: [Option<&Map<String, Value>>; 3],
    profile: &SchemaProfile,
) -> ExtractionRow {
    let values = methods.map(|method| format_value(method.and_then(|m| find_value(m, key))));

    ExtractionRow {
        attribute: key.to_string(),
        values,
        score: score_of(entry, profile),
    }
}

/// Read the score from a matrix entry. A bare number or string is the score.
fn score_of(entry: &Value, profile: &SchemaProfile) -> Score {
    match entry {
        Value::Object(fields) => Score::from_json(
            profile
                .score_fields
                .iter()
                .find_map(|field| find_value(fields, field)),
        ),
        Value::Number(_) | Value::String(_) => Score::from_json(Some(entry)),
        _ => Score::Missing,
    }
}

/// Find each slot's method object by its aliases, in alias order.
fn resolve_methods<'a>(
    extractions: Option<&'a Map<String, Value>>,
    profile: &SchemaProfile,
) -> ExtractResult<[Option<&'a Map<String, Value>>; 3]> {
    let mut methods = [None, None, None];
    let Some(extractions) = extractions else {
        return Ok(methods);
    };

    for (slot, aliases) in profile.method_keys.iter().enumerate() {
        let found = aliases.iter().find_map(|alias| find_value(extractions, alias));
        methods[slot] = match found {
            None | Some(Value::Null) => None,
            Some(Value::Object(method)) => Some(method),
            Some(_) => {
                return Err(malformed(&format!(
                    "extraction method '{}' is not an object",
                    profile.method_labels[slot]
                )))
            }
        };
    }

    Ok(methods)
}

fn optional_object<'a>(
    parent: &'a Map<String, Value>,
    key: &str,
) -> ExtractResult<Option<&'a Map<String, Value>>> {
    match parent.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(_) => Err(malformed(&format!("'{}' is not an object", key))),
    }
}

fn malformed(message: &str) -> ExtractError {
    ExtractError::MalformedResponse(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn m_series_envelope() -> Value {
        json!({
            "success": true,
            "filename": "scan.png",
            "document_type": "passport",
            "results": {
                "confidence_matrix": {
                    "name": { "consensus_score": 0.99 },
                    "dob": { "consensus_score": 0.80 },
                    "raw_text": { "consensus_score": 0.5 }
                },
                "extractions": {
                    "M1": { "name": "JANE DOE", "dob": "1990-01-01", "raw_text": "P<JANE<DOE" },
                    "M2": { "Name": "Jane Doe", "DOB": "01/01/1990" },
                    "M3": { "name": "Jane Doe" }
                }
            }
        })
    }

    #[test]
    fn test_rows_follow_matrix_order_and_skip_raw_text() {
        let result = normalize(&m_series_envelope(), &SchemaProfile::m_series()).unwrap();
        let attributes: Vec<_> = result.rows.iter().map(|r| r.attribute.as_str()).collect();
        assert_eq!(attributes, vec!["name", "dob"]);
        assert_eq!(result.raw_text, "P<JANE<DOE");
    }

    #[test]
    fn test_missing_method_value_is_dash_and_case_is_matched() {
        let result = normalize(&m_series_envelope(), &SchemaProfile::m_series()).unwrap();
        let dob = &result.rows[1];
        assert_eq!(dob.values[0], "1990-01-01");
        assert_eq!(dob.values[1], "01/01/1990");
        assert_eq!(dob.values[2], "-");
        assert_eq!(dob.score, Score::Number(0.80));
    }

    #[test]
    fn test_null_versus_absent() {
        let envelope = json!({
            "results": {
                "confidence_matrix": { "address": { "consensus_score": 0.4 } },
                "extractions": { "M1": { "address": null }, "M2": {}, "M3": { "address": "12 Main St" } }
            }
        });
        let result = normalize(&envelope, &SchemaProfile::auto()).unwrap();
        assert_eq!(result.rows[0].values, ["null".to_string(), "-".to_string(), "12 Main St".to_string()]);
    }

    #[test]
    fn test_exact_match_preferred_over_case_insensitive() {
        let method = json!({ "Name": "upper", "name": "lower" });
        let method = method.as_object().unwrap();
        assert_eq!(find_value(method, "name"), Some(&json!("lower")));
        assert_eq!(find_value(method, "NAME"), Some(&json!("upper")));
        assert_eq!(find_value(method, "surname"), None);
    }

    #[test]
    fn test_format_value_variants() {
        assert_eq!(format_value(Some(&json!(42))), "42");
        assert_eq!(format_value(Some(&json!(1.5))), "1.5");
        assert_eq!(format_value(Some(&json!(2.0))), "2");
        assert_eq!(format_value(Some(&json!(true))), "true");
        assert_eq!(format_value(Some(&json!(["A", null, 3]))), "A,,3");
        assert_eq!(format_value(Some(&json!({"k": "v"}))), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_missing_matrix_is_no_rows() {
        let envelope = json!({ "success": true, "results": { "extractions": { "M1": { "raw_text": "text" } } } });
        let result = normalize(&envelope, &SchemaProfile::auto()).unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.raw_text, "text");

        let result = normalize(&json!({ "success": false }), &SchemaProfile::auto()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_extractions_yields_dashes() {
        let envelope = json!({ "results": { "confidence_matrix": { "name": { "consensus_score": 0.9 } } } });
        let result = normalize(&envelope, &SchemaProfile::auto()).unwrap();
        assert_eq!(result.rows[0].values, ["-".to_string(), "-".to_string(), "-".to_string()]);
        assert_eq!(result.raw_text, "");
    }

    #[test]
    fn test_bare_score_entries() {
        let envelope = json!({ "results": { "confidence_matrix": { "name": "91%", "dob": 0.7, "sex": [] } } });
        let result = normalize(&envelope, &SchemaProfile::auto()).unwrap();
        assert_eq!(result.rows[0].score, Score::Text("91%".into()));
        assert_eq!(result.rows[1].score, Score::Number(0.7));
        assert_eq!(result.rows[2].score, Score::Missing);
    }

    #[test]
    fn test_malformed_shapes_are_errors() {
        let profile = SchemaProfile::auto();
        for envelope in [
            json!([1, 2, 3]),
            json!({ "results": "done" }),
            json!({ "results": { "confidence_matrix": [] } }),
            json!({ "results": { "confidence_matrix": {}, "extractions": { "M1": "text" } } }),
        ] {
            assert!(matches!(
                normalize(&envelope, &profile),
                Err(ExtractError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_parse_response_rejects_non_json() {
        let err = parse_response("<html>Bad Gateway</html>", &SchemaProfile::auto()).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(200, "OK").is_ok());
        assert!(check_status(204, "No Content").is_ok());
        assert_eq!(
            check_status(500, "Internal Server Error"),
            Err(ExtractError::Status { status: 500, status_text: "Internal Server Error".into() })
        );
    }
}
