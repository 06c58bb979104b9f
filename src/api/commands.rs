//! Prediction Commands
//!
//! Accepts one reading object or an array of them and answers in kind.
//! Empty input runs the built-in example reading.

use anyhow::Context;
use serde_json::Value;

use crate::error::{SpoilageError, SpoilageResult};
use crate::logic::features::RawReading;
use crate::logic::spoilage::{RiskLevel, RiskLevelDetails, SpoilageEngine, SpoilageReport};

/// Parsed request body
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionInput {
    Single(RawReading),
    /// Each element parsed separately so one bad entry only degrades itself
    Batch(Vec<SpoilageResult<RawReading>>),
}

pub fn parse_input(raw: &str) -> SpoilageResult<PredictionInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(PredictionInput::Single(RawReading::example()));
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| SpoilageError::input("request", format!("invalid JSON: {}", e)))?;

    match value {
        Value::Array(items) => Ok(PredictionInput::Batch(
            items.into_iter().map(parse_reading).collect(),
        )),
        other => parse_reading(other).map(PredictionInput::Single),
    }
}

fn parse_reading(value: Value) -> SpoilageResult<RawReading> {
    if !value.is_object() {
        return Err(SpoilageError::input("request", "expected a reading object"));
    }
    serde_json::from_value(value)
        .map_err(|e| SpoilageError::input("request", e.to_string()))
}

/// Assess a request body and render the answer as JSON.
///
/// Parse failures still produce a (degraded) report; only serialization
/// can fail here.
pub fn run_prediction(engine: &SpoilageEngine, raw: &str, pretty: bool) -> anyhow::Result<String> {
    let output = match parse_input(raw) {
        Ok(PredictionInput::Single(reading)) => to_json(&engine.assess(&reading).into_report(), pretty)?,
        Ok(PredictionInput::Batch(items)) => {
            let reports: Vec<SpoilageReport> = items
                .into_iter()
                .map(|item| match item {
                    Ok(reading) => engine.assess(&reading),
                    Err(cause) => engine.degraded(cause),
                })
                .map(|assessment| assessment.into_report())
                .collect();
            to_json(&reports, pretty)?
        }
        Err(cause) => to_json(&engine.degraded(cause).into_report(), pretty)?,
    };

    Ok(output)
}

/// Assess a raw request as read from a file or stdin.
///
/// Read failures and non-UTF-8 bodies become a degraded report like any
/// other malformed request.
pub fn run_prediction_bytes(
    engine: &SpoilageEngine,
    raw: std::io::Result<Vec<u8>>,
    pretty: bool,
) -> anyhow::Result<String> {
    let decoded = raw
        .map_err(|e| SpoilageError::input("request", format!("failed to read input: {}", e)))
        .and_then(|bytes| {
            String::from_utf8(bytes).map_err(|e| {
                SpoilageError::input("request", format!("input is not valid UTF-8: {}", e))
            })
        });

    match decoded {
        Ok(text) => run_prediction(engine, &text, pretty),
        Err(cause) => to_json(&engine.degraded(cause).into_report(), pretty),
    }
}

/// Band details for a report's risk score
pub fn get_risk_level(report: &SpoilageReport) -> RiskLevelDetails {
    report.risk_level().details()
}

/// Band details for a bare score
pub fn get_risk_level_for_score(score: u8) -> RiskLevelDetails {
    RiskLevel::from_score(score).details()
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn missing_model_engine(dir: &tempfile::TempDir) -> SpoilageEngine {
        SpoilageEngine::new(EngineConfig::default().with_model_path(dir.path().join("none.onnx")))
    }

    #[test]
    fn test_empty_input_uses_example() {
        assert_eq!(parse_input("").unwrap(), PredictionInput::Single(RawReading::example()));
        assert_eq!(parse_input("  \n").unwrap(), PredictionInput::Single(RawReading::example()));
    }

    #[test]
    fn test_parse_single_and_batch() {
        match parse_input(r#"{"temperature": 30, "extra": "ignored"}"#).unwrap() {
            PredictionInput::Single(reading) => assert!(reading.temperature.is_some()),
            other => panic!("expected single, got {:?}", other),
        }

        match parse_input(r#"[{"humidity": 90}, 5, {}]"#).unwrap() {
            PredictionInput::Batch(items) => {
                assert_eq!(items.len(), 3);
                assert!(items[0].is_ok());
                assert!(items[1].is_err());
                assert!(items[2].is_ok());
            }
            other => panic!("expected batch, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(parse_input("not json"), Err(SpoilageError::Input { .. })));
        assert!(matches!(parse_input("42"), Err(SpoilageError::Input { .. })));
    }

    #[test]
    fn test_invalid_json_still_answers() {
        let dir = tempfile::tempdir().unwrap();
        let engine = missing_model_engine(&dir);

        let output = run_prediction(&engine, "{oops", false).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["model_used"], "SmartBin-Fallback");
        assert!(json["error"].as_str().unwrap().contains("invalid JSON"));
    }

    #[test]
    fn test_invalid_utf8_still_answers() {
        let dir = tempfile::tempdir().unwrap();
        let engine = missing_model_engine(&dir);

        let mut bytes = vec![0xff, 0xfe];
        bytes.extend_from_slice(br#"{"temperature":30}"#);
        let output = run_prediction_bytes(&engine, Ok(bytes), false).unwrap();

        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["model_used"], "SmartBin-Fallback");
        assert_eq!(json["risk_score"], 30);
        assert!(json["error"].as_str().unwrap().contains("UTF-8"));
        assert_eq!(engine.stats().fallbacks, 1);
    }

    #[test]
    fn test_unreadable_input_still_answers() {
        let dir = tempfile::tempdir().unwrap();
        let engine = missing_model_engine(&dir);

        let read = std::fs::read(dir.path().join("absent.json"));
        let output = run_prediction_bytes(&engine, read, false).unwrap();

        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["time_to_spoilage_hours"], 168);
        assert!(json["error"].as_str().unwrap().contains("failed to read input"));
    }

    #[test]
    fn test_valid_bytes_run_normally() {
        let dir = tempfile::tempdir().unwrap();
        let engine = missing_model_engine(&dir);

        let output = run_prediction_bytes(&engine, Ok(b"[{}, {}]".to_vec()), false).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_batch_answers_in_kind() {
        let dir = tempfile::tempdir().unwrap();
        let engine = missing_model_engine(&dir);

        let output = run_prediction(&engine, r#"[{}, {"humidity": 80}]"#, true).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item["risk_score"], 30);
            assert_eq!(item["time_to_spoilage_hours"], 168);
        }
        assert_eq!(engine.stats().invocations, 2);
    }

    #[test]
    fn test_risk_level_helpers() {
        let details = get_risk_level_for_score(85);
        assert_eq!(details.level, RiskLevel::Critical);
        assert!(details.requires_alert);

        let dir = tempfile::tempdir().unwrap();
        let engine = missing_model_engine(&dir);
        let report = engine.assess(&RawReading::new()).into_report();
        assert_eq!(get_risk_level(&report).level, RiskLevel::Medium);
    }
}
