// src/persona/router.rs
// Routes a chat turn to a persona: instruction + assembled prompt, one generation call.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::Persona;
use crate::config::DEFAULT_MAX_VIEWED_COURSES;
use crate::llm::{GenerationClient, GenerationError};
use crate::prompt;

/// Normalization applied to viewed-course history before assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPolicy {
    /// Keep at most this many of the most recent entries; 0 keeps all
    pub max_entries: usize,
    /// Drop repeats, keeping the most recent occurrence
    pub dedupe: bool,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_VIEWED_COURSES,
            dedupe: true,
        }
    }
}

impl HistoryPolicy {
    /// Entries are ordered oldest first; the result keeps that order
    pub fn apply(&self, viewed: &[String]) -> Vec<String> {
        let mut courses: Vec<String> = if self.dedupe {
            let mut seen = HashSet::new();
            let mut latest: Vec<String> = viewed
                .iter()
                .rev()
                .filter(|c| seen.insert(c.as_str()))
                .cloned()
                .collect();
            latest.reverse();
            latest
        } else {
            viewed.to_vec()
        };

        if self.max_entries > 0 && courses.len() > self.max_entries {
            let excess = courses.len() - self.max_entries;
            courses.drain(..excess);
        }
        courses
    }
}

/// Outcome of a Professor-then-Coach session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborativeReply {
    pub professor: String,
    pub coach: String,
    /// True only when both persona calls succeeded
    pub collaboration: bool,
}

pub struct PersonaRouter {
    client: Arc<dyn GenerationClient>,
    history: HistoryPolicy,
}

impl PersonaRouter {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            history: HistoryPolicy::default(),
        }
    }

    pub fn with_history_policy(mut self, history: HistoryPolicy) -> Self {
        self.history = history;
        self
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Full text submitted to the model for this persona
    pub fn compose(
        &self,
        persona: Persona,
        user_message: &str,
        course_context: Option<&str>,
        viewed_courses: Option<&[String]>,
    ) -> String {
        let history = viewed_courses.map(|v| self.history.apply(v));
        let assembled = prompt::assemble(user_message, course_context, history.as_deref());
        format!("{}\n{}", persona.instruction(), assembled)
    }

    /// Single-attempt generation for one persona
    pub async fn run_persona(
        &self,
        persona: Persona,
        user_message: &str,
        course_context: Option<&str>,
        viewed_courses: Option<&[String]>,
    ) -> Result<String, GenerationError> {
        let full_prompt = self.compose(persona, user_message, course_context, viewed_courses);
        let started = Instant::now();

        debug!(
            persona = %persona,
            prompt_chars = full_prompt.len(),
            has_context = course_context.is_some_and(|c| !c.is_empty()),
            "Submitting persona prompt"
        );

        match self.client.generate(&full_prompt).await {
            Ok(text) => {
                info!(
                    persona = %persona,
                    model = self.client.model(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Persona reply generated"
                );
                Ok(text)
            }
            Err(e) => {
                warn!(
                    persona = %persona,
                    model = self.client.model(),
                    error = %e,
                    "Persona generation failed"
                );
                Err(e)
            }
        }
    }

    /// Like `run_persona`, but a failure becomes the persona's fallback text
    pub async fn reply(
        &self,
        persona: Persona,
        user_message: &str,
        course_context: Option<&str>,
        viewed_courses: Option<&[String]>,
    ) -> String {
        self.run_persona(persona, user_message, course_context, viewed_courses)
            .await
            .unwrap_or_else(|e| persona.fallback(&e.to_string()))
    }

    /// The Professor explains, then the Coach builds an exercise on that explanation
    pub async fn collaborate(
        &self,
        user_message: &str,
        course_context: Option<&str>,
    ) -> CollaborativeReply {
        let professor = self
            .run_persona(Persona::Professor, user_message, course_context, None)
            .await;
        let professor_ok = professor.is_ok();
        let professor =
            professor.unwrap_or_else(|e| Persona::Professor.fallback(&e.to_string()));

        let coach_request = exercise_request(&professor);
        let coach = self
            .run_persona(Persona::Coach, &coach_request, course_context, None)
            .await;
        let coach_ok = coach.is_ok();
        let coach = coach.unwrap_or_else(|e| Persona::Coach.fallback(&e.to_string()));

        CollaborativeReply {
            professor,
            coach,
            collaboration: professor_ok && coach_ok,
        }
    }
}

fn exercise_request(explanation: &str) -> String {
    format!(
        "Based on the following explanation, create a practical exercise:\n\n{}\n\nCreate an exercise that helps the student practice this concept.",
        explanation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every prompt and answers with a canned reply
    struct RecordingClient {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingClient {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationClient for RecordingClient {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        fn model(&self) -> &str {
            "recording"
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingClient;

    #[async_trait]
    impl GenerationClient for FailingClient {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Api {
                status: 503,
                body: "backend unavailable".to_string(),
            })
        }

        fn model(&self) -> &str {
            "failing"
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_history_policy_dedupes_keeping_latest() {
        let policy = HistoryPolicy { max_entries: 0, dedupe: true };
        assert_eq!(policy.apply(&names(&["A", "B", "A", "C"])), names(&["B", "A", "C"]));
    }

    #[test]
    fn test_history_policy_cap_keeps_revisited_course() {
        let policy = HistoryPolicy { max_entries: 2, dedupe: true };
        assert_eq!(policy.apply(&names(&["A", "B", "C", "A"])), names(&["C", "A"]));
        assert_eq!(
            HistoryPolicy::default().apply(&names(&["A", "B", "A"])),
            names(&["B", "A"])
        );
    }

    #[test]
    fn test_history_policy_keeps_most_recent() {
        let policy = HistoryPolicy { max_entries: 2, dedupe: false };
        assert_eq!(policy.apply(&names(&["A", "B", "C"])), names(&["B", "C"]));
    }

    #[test]
    fn test_history_policy_disabled_is_identity() {
        let viewed = names(&["A", "A", "B"]);
        let policy = HistoryPolicy { max_entries: 0, dedupe: false };
        assert_eq!(policy.apply(&viewed), viewed);
    }

    #[tokio::test]
    async fn test_run_persona_prepends_instruction() {
        let client = RecordingClient::new("GDP is...");
        let router = PersonaRouter::new(client.clone());

        let text = router
            .run_persona(Persona::Professor, "What is GDP?", None, None)
            .await
            .unwrap();
        assert_eq!(text, "GDP is...");

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with(Persona::Professor.instruction()));
        assert!(prompts[0].ends_with("What is GDP?"));
    }

    #[tokio::test]
    async fn test_personas_use_their_own_instruction() {
        let client = RecordingClient::new("ok");
        let router = PersonaRouter::new(client.clone());

        router.run_persona(Persona::Coach, "Give me a drill", None, None).await.unwrap();
        let prompt = &client.prompts()[0];
        assert!(prompt.contains("economics coach"));
        assert!(!prompt.contains("economics professor"));
    }

    #[tokio::test]
    async fn test_context_and_history_reach_the_model() {
        let client = RecordingClient::new("ok");
        let router = PersonaRouter::new(client.clone());
        let viewed = names(&["GDP and Economic Growth", "GDP and Economic Growth"]);

        router
            .run_persona(Persona::Professor, "Tariffs?", Some("Trade barriers"), Some(viewed.as_slice()))
            .await
            .unwrap();

        let prompt = &client.prompts()[0];
        assert!(prompt.contains("[Course Context]\nTrade barriers"));
        assert!(prompt.contains("already studied: GDP and Economic Growth. "));
    }

    #[tokio::test]
    async fn test_run_persona_returns_error_on_failure() {
        let router = PersonaRouter::new(Arc::new(FailingClient));
        let err = router
            .run_persona(Persona::Professor, "What is GDP?", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_reply_degrades_to_fallback() {
        let router = PersonaRouter::new(Arc::new(FailingClient));

        let professor = router.reply(Persona::Professor, "What is GDP?", None, None).await;
        assert!(!professor.is_empty());
        assert!(professor.contains("Error"));
        assert!(professor.contains("backend unavailable"));

        let coach = router.reply(Persona::Coach, "Drill me", None, None).await;
        assert!(coach.starts_with("Oops!"));
    }

    #[tokio::test]
    async fn test_collaborate_feeds_professor_into_coach() {
        let client = RecordingClient::new("Supply meets demand.");
        let router = PersonaRouter::new(client.clone());

        let reply = router.collaborate("Explain prices", Some("Markets")).await;
        assert!(reply.collaboration);
        assert_eq!(reply.professor, "Supply meets demand.");
        assert_eq!(reply.coach, "Supply meets demand.");

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].starts_with(Persona::Professor.instruction()));
        assert!(prompts[1].starts_with(Persona::Coach.instruction()));
        assert!(prompts[1].contains("create a practical exercise:\n\nSupply meets demand."));
        assert!(prompts[1].contains("[Course Context]\nMarkets"));
    }

    #[tokio::test]
    async fn test_collaborate_reports_failure() {
        let router = PersonaRouter::new(Arc::new(FailingClient));
        let reply = router.collaborate("Explain prices", None).await;
        assert!(!reply.collaboration);
        assert!(reply.professor.starts_with("I apologize"));
        assert!(reply.coach.starts_with("Oops!"));
    }
}
