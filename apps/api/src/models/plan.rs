//! CareerPlan, the root aggregate produced by a single generation call.
//!
//! Field names mirror the JSON contract in `schema::contracts` (camelCase on the wire).
//! `JobSuggestion::status` and `SkillRecommendation::progress` are client-side
//! annotations: they are never read from backend or stored JSON, so every freshly
//! decoded plan starts at the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPlan {
    pub resume: Resume,
    pub portfolio: Portfolio,
    pub job_suggestions: Vec<JobSuggestion>,
    pub skill_recommendations: Vec<SkillRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodologies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_and_writing: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_goals: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub title: String,
    pub introduction: String,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
    pub image_url: String,
    pub role: String,
    pub outcome: String,
}

/// Where the user is with a suggested job. Mutated only by user interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    #[serde(rename = "Not Applied")]
    NotApplied,
    Applied,
    Interviewing,
}

impl JobStatus {
    fn is_default(&self) -> bool {
        *self == JobStatus::NotApplied
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSuggestion {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub match_reason: String,
    pub application_url: String,
    #[serde(default, skip_deserializing, skip_serializing_if = "JobStatus::is_default")]
    pub status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendation {
    pub skill: String,
    pub reason: String,
    pub learning_resources: Vec<LearningResource>,
    /// Percent complete, 0–100 in steps of 25.
    #[serde(default, skip_deserializing, skip_serializing_if = "is_zero")]
    pub progress: u8,
}

fn is_zero(value: &u8) -> bool {
    *value == 0
}

impl CareerPlan {
    /// Career goals joined for prompt text; empty when the resume lists none.
    pub fn career_goals_line(&self) -> String {
        self.resume
            .career_goals
            .as_deref()
            .map(|goals| goals.join(", "))
            .unwrap_or_default()
    }

    /// Titles of the first `n` suggested jobs, in order.
    pub fn target_roles(&self, n: usize) -> Vec<&str> {
        self.job_suggestions
            .iter()
            .take(n)
            .map(|job| job.title.as_str())
            .collect()
    }
}
