// src/config/mod.rs
// Environment-based configuration - single source of truth for all env vars

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LOCATION: &str = "europe-west1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_VIEWED_COURSES: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// How chat endpoints report a failed generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFailureMode {
    /// 200 with the persona's apologetic fallback text
    #[default]
    Degrade,
    /// 500 with the error text as detail
    Error,
}

impl FromStr for ChatFailureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "degrade" | "fallback" => Ok(ChatFailureMode::Degrade),
            "error" | "fail" => Ok(ChatFailureMode::Error),
            other => Err(format!("expected 'degrade' or 'error', got '{}'", other)),
        }
    }
}

impl fmt::Display for ChatFailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatFailureMode::Degrade => write!(f, "degrade"),
            ChatFailureMode::Error => write!(f, "error"),
        }
    }
}

/// Which hosted Gemini surface to call, with its credentials
#[derive(Clone, PartialEq, Eq)]
pub enum GeminiBackend {
    /// Google AI Studio, authenticated with an API key
    AiStudio { api_key: String },
    /// Vertex AI, authenticated with an OAuth bearer token
    Vertex {
        project_id: String,
        location: String,
        access_token: String,
    },
    /// No credentials; every generation call fails
    Unconfigured,
}

impl GeminiBackend {
    pub fn name(&self) -> &'static str {
        match self {
            GeminiBackend::AiStudio { .. } => "ai-studio",
            GeminiBackend::Vertex { .. } => "vertex",
            GeminiBackend::Unconfigured => "unconfigured",
        }
    }
}

// Credentials never reach the logs
impl fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiBackend::AiStudio { .. } => f
                .debug_struct("AiStudio")
                .field("api_key", &"<redacted>")
                .finish(),
            GeminiBackend::Vertex {
                project_id,
                location,
                ..
            } => f
                .debug_struct("Vertex")
                .field("project_id", project_id)
                .field("location", location)
                .field("access_token", &"<redacted>")
                .finish(),
            GeminiBackend::Unconfigured => write!(f, "Unconfigured"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub backend: GeminiBackend,
    pub model: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            backend: GeminiBackend::Unconfigured,
            model: DEFAULT_MODEL.to_string(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    /// Optional TOML course catalog replacing the built-in courses
    pub courses_path: Option<PathBuf>,
    /// Viewed-course history cap; 0 disables the cap
    pub max_viewed_courses: usize,
    pub chat_failure_mode: ChatFailureMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            courses_path: None,
            max_viewed_courses: DEFAULT_MAX_VIEWED_COURSES,
            chat_failure_mode: ChatFailureMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (call once at startup)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading environment configuration");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| read_var(&lookup, key);

        let backend = resolve_backend(&read);
        let model: String = parse_var(&read, "GEMINI_MODEL", DEFAULT_MODEL.to_string())?;

        let base_url = match read("GEMINI_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                var: "GEMINI_BASE_URL",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| ConfigError::InvalidValue {
                var: "GEMINI_BASE_URL",
                value: DEFAULT_BASE_URL.to_string(),
                reason: e.to_string(),
            })?,
        };

        let timeout_secs: u64 = parse_var(&read, "GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_viewed_courses: usize = parse_var(
            &read,
            "ECONOMIND_MAX_VIEWED_COURSES",
            DEFAULT_MAX_VIEWED_COURSES,
        )?;
        let chat_failure_mode: ChatFailureMode =
            parse_var(&read, "ECONOMIND_CHAT_FAILURE_MODE", ChatFailureMode::default())?;

        let config = Self {
            gemini: GeminiConfig {
                backend,
                model,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            courses_path: read("ECONOMIND_COURSES_PATH").map(PathBuf::from),
            max_viewed_courses,
            chat_failure_mode,
        };
        config.log_status();
        Ok(config)
    }

    /// Log the effective configuration (without exposing credentials)
    fn log_status(&self) {
        if self.gemini.backend == GeminiBackend::Unconfigured {
            warn!("No Gemini credentials configured - chat replies will use fallback text");
        }
        debug!(
            backend = self.gemini.backend.name(),
            model = %self.gemini.model,
            timeout_secs = self.gemini.timeout.as_secs(),
            max_viewed_courses = self.max_viewed_courses,
            failure_mode = %self.chat_failure_mode,
            "Configuration loaded"
        );
    }
}

/// Vertex wins when a project and token are both present, then AI Studio
fn resolve_backend(read: &impl Fn(&str) -> Option<String>) -> GeminiBackend {
    let project_id = read("GCP_PROJECT_ID");
    let access_token = read("GOOGLE_ACCESS_TOKEN");

    if let (Some(project_id), Some(access_token)) = (project_id, access_token) {
        let location = read("GCP_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        return GeminiBackend::Vertex {
            project_id,
            location,
            access_token,
        };
    }

    match read("GEMINI_API_KEY").or_else(|| read("GOOGLE_API_KEY")) {
        Some(api_key) => GeminiBackend::AiStudio { api_key },
        None => GeminiBackend::Unconfigured,
    }
}

/// Read a single variable verbatim apart from surrounding whitespace
fn read_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Typed values may carry an inline `# comment`
fn strip_comment(raw: &str) -> &str {
    raw.split('#').next().unwrap_or("").trim()
}

fn parse_var<T>(
    read: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match read(key).map(|raw| strip_comment(&raw).to_string()) {
        Some(raw) if raw.is_empty() => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            var: key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
