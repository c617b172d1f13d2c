use thiserror::Error;

#[derive(Debug, Error)]
pub enum GaiError {
   #[error("No API key found: set {0}")]
   MissingApiKey(&'static str),

   #[error("Failed to run git {command}: {reason}")]
   GitLaunch { command: String, reason: String },

   #[error("git {command} failed: {stderr}")]
   GitError { command: String, stderr: String },

   #[error("API request failed (HTTP {status}): {body}")]
   ApiError { status: u16, body: String },

   #[error("Prompt was blocked by the model: {0}")]
   PromptBlocked(String),

   #[error("Path is not valid UTF-8: {0}")]
   InvalidPath(String),

   #[error("Failed to render prompt template: {0}")]
   TemplateError(String),

   #[error("Config error: {0}")]
   ConfigError(String),

   #[error("HTTP error: {0}")]
   HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GaiError>;
