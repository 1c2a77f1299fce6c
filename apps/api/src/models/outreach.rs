use serde::{Deserialize, Serialize};

/// Networking templates derived from a CareerPlan. The three fields are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachContent {
    pub elevator_pitch: String,
    pub linkedin_message: String,
    pub informational_interview_email: String,
}
