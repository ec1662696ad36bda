// src/api/state.rs
// Shared, read-only services handed to every handler

use std::sync::Arc;

use crate::catalog::CourseCatalog;
use crate::config::ChatFailureMode;
use crate::persona::PersonaRouter;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CourseCatalog>,
    pub personas: Arc<PersonaRouter>,
    pub failure_mode: ChatFailureMode,
}

impl AppState {
    pub fn new(catalog: CourseCatalog, personas: PersonaRouter) -> Self {
        Self {
            catalog: Arc::new(catalog),
            personas: Arc::new(personas),
            failure_mode: ChatFailureMode::default(),
        }
    }

    pub fn with_failure_mode(mut self, failure_mode: ChatFailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }
}
