// src/error.rs
// Standardized error types for EconoMind

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::llm::GenerationError;

/// Main error type for the EconoMind library
#[derive(Error, Debug)]
pub enum EconomindError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using EconomindError
pub type Result<T> = std::result::Result<T, EconomindError>;
