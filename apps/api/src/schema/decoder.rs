//! Response Validator/Decoder: raw backend text to a typed entity, or a `DecodingError`.
//!
//! Trim, parse, check against the contract, then deserialize. Any failure along the
//! way is normalized to `DecodingError`; no partial entity is ever returned.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::Schema;

#[derive(Debug, Error)]
#[error("AI returned an invalid {entity}: {reason}")]
pub struct DecodingError {
    pub entity: &'static str,
    pub reason: String,
    /// The text exactly as received, kept for diagnostics only.
    pub raw_text: String,
}

impl DecodingError {
    fn new(schema: &Schema, reason: String, raw_text: &str) -> Self {
        debug!(
            "Failed to decode {} ({}): {:?}",
            schema.name, reason, raw_text
        );
        Self {
            entity: schema.name,
            reason,
            raw_text: raw_text.to_string(),
        }
    }
}

/// Decodes `raw_text` into `T`, which must mirror `schema`.
pub fn decode<T: DeserializeOwned>(raw_text: &str, schema: &Schema) -> Result<T, DecodingError> {
    let value: Value = serde_json::from_str(raw_text.trim())
        .map_err(|e| DecodingError::new(schema, format!("malformed JSON: {e}"), raw_text))?;

    schema
        .validate(&value)
        .map_err(|v| DecodingError::new(schema, v.to_string(), raw_text))?;

    serde_json::from_value(value)
        .map_err(|e| DecodingError::new(schema, format!("shape mismatch: {e}"), raw_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outreach::OutreachContent;
    use crate::models::plan::{fixtures::plan_json, CareerPlan};
    use crate::schema::contracts::{career_plan_schema, outreach_schema};

    #[test]
    fn test_decode_reconstructs_parsed_json() {
        let raw = plan_json().to_string();
        let plan: CareerPlan = decode(&raw, &career_plan_schema()).unwrap();
        assert_eq!(serde_json::to_value(&plan).unwrap(), plan_json());
        assert_eq!(plan.resume.experience[0].company, "Ledgerly");
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        let raw = format!("\n\n  {}  \n", plan_json());
        assert!(decode::<CareerPlan>(&raw, &career_plan_schema()).is_ok());
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let mut json = plan_json();
        json["resume"].as_object_mut().unwrap().remove("email");
        let raw = json.to_string();

        let err = decode::<CareerPlan>(&raw, &career_plan_schema()).unwrap_err();
        assert_eq!(err.entity, "CareerPlan");
        assert!(err.reason.contains("resume.email"));
        assert_eq!(err.raw_text, raw);
    }

    #[test]
    fn test_wrong_primitive_type_is_rejected() {
        let mut json = plan_json();
        json["resume"]["skills"] = "Rust, Kafka".into();
        let err = decode::<CareerPlan>(&json.to_string(), &career_plan_schema()).unwrap_err();
        assert!(err.reason.contains("resume.skills"));
    }

    #[test]
    fn test_non_json_text_is_decoding_error() {
        for raw in ["", "   ", "Sure! Here is your plan:", "{\"resume\": ", "```json\n{}\n```"] {
            let err = decode::<CareerPlan>(raw, &career_plan_schema()).unwrap_err();
            assert!(err.reason.starts_with("malformed JSON"), "{raw:?}: {}", err.reason);
            assert_eq!(err.raw_text, raw);
        }
    }

    #[test]
    fn test_decode_is_deterministic() {
        let raw = r#"{"elevatorPitch": "p", "linkedinMessage": "m"}"#;
        let first = decode::<OutreachContent>(raw, &outreach_schema()).unwrap_err();
        let second = decode::<OutreachContent>(raw, &outreach_schema()).unwrap_err();
        assert_eq!(first.reason, second.reason);
    }

    #[test]
    fn test_decode_outreach() {
        let raw = r#"{
            "elevatorPitch": "I build ledgers.",
            "linkedinMessage": "Hi [Their Name], ...",
            "informationalInterviewEmail": "Subject: Quick chat?"
        }"#;
        let content: OutreachContent = decode(raw, &outreach_schema()).unwrap();
        assert_eq!(content.elevator_pitch, "I build ledgers.");
        assert_eq!(content.informational_interview_email, "Subject: Quick chat?");
    }

    #[test]
    fn test_error_message_is_human_readable() {
        let err = decode::<OutreachContent>("nope", &outreach_schema()).unwrap_err();
        assert!(err.to_string().starts_with("AI returned an invalid OutreachContent"));
    }
}
