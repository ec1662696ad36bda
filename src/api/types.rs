// src/api/types.rs
use serde::{Deserialize, Serialize};

use crate::catalog::CourseSummary;
use crate::persona::Persona;

pub const SERVICE_NAME: &str = "EconoMind API";

/// Body of `POST /api/chat/{professor,coach}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Content of the course currently being read
    #[serde(default)]
    pub course_context: Option<String>,
    /// Titles of courses the student has already viewed, oldest first
    #[serde(default)]
    pub viewed_courses_context: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub agent_type: Persona,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborateRequest {
    pub message: String,
    #[serde(default)]
    pub course_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborateResponse {
    pub professor_response: String,
    pub coach_response: String,
    pub collaboration: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub agents: Vec<Persona>,
}

impl StatusResponse {
    pub fn running() -> Self {
        Self {
            status: "running".to_string(),
            service: SERVICE_NAME.to_string(),
            agents: Persona::ALL.to_vec(),
        }
    }
}
