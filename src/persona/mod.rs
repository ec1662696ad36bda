// src/persona/mod.rs
// Persona system: each persona is a fixed instruction text plus a fallback line.

pub mod coach;
pub mod professor;
pub mod router;

pub use coach::{COACH_FALLBACK, COACH_INSTRUCTION};
pub use professor::{PROFESSOR_FALLBACK, PROFESSOR_INSTRUCTION};
pub use router::{CollaborativeReply, HistoryPolicy, PersonaRouter};

use serde::{Deserialize, Serialize};

/// The two tutoring personas. Serialized as the `agent_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Professor, // explanatory
    Coach,     // exercise-driven
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::Professor, Persona::Coach];

    /// Returns the system instruction prepended to every prompt for this persona.
    pub fn instruction(&self) -> &'static str {
        match self {
            Persona::Professor => PROFESSOR_INSTRUCTION,
            Persona::Coach => COACH_INSTRUCTION,
        }
    }

    /// Wire tag, as used in routes and `agent_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Professor => "professor",
            Persona::Coach => "coach",
        }
    }

    /// Apologetic reply used when generation fails. Embeds the error detail.
    pub fn fallback(&self, error: &str) -> String {
        let line = match self {
            Persona::Professor => PROFESSOR_FALLBACK,
            Persona::Coach => COACH_FALLBACK,
        };
        format!("{} (Error: {})", line, error)
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professor" => Ok(Persona::Professor),
            "coach" => Ok(Persona::Coach),
            other => Err(format!("unknown persona: {}", other)),
        }
    }
}
