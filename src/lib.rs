// src/lib.rs

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod server;

pub use error::{EconomindError, Result};
