use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
   config::GaiConfig,
   error::{GaiError, Result},
   style, templates,
};

/// Turns a staged diff into a commit message.
///
/// An empty string means the model produced nothing usable.
#[cfg_attr(test, mockall::automock)]
pub trait MessageGenerator {
   fn generate(&self, diff: &str) -> Result<String>;
}

/// Gemini `generateContent` client
pub struct GeminiClient {
   client:       reqwest::blocking::Client,
   api_base_url: String,
   model:        String,
   api_key:      String,
   verbose:      bool,
}

impl GeminiClient {
   /// Build HTTP client with timeouts from config
   pub fn new(config: &GaiConfig, api_key: String) -> Result<Self> {
      // reqwest's blocking client defaults to 30s; unset here means no timeout
      let client = reqwest::blocking::Client::builder()
         .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
         .timeout(config.request_timeout_secs.map(Duration::from_secs))
         .build()?;

      Ok(Self {
         client,
         api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
         model: config.model.clone(),
         api_key,
         verbose: config.verbose,
      })
   }

   pub fn model(&self) -> &str {
      &self.model
   }

   fn endpoint(&self) -> String {
      format!("{}/v1beta/models/{}:generateContent", self.api_base_url, self.model)
   }
}

impl MessageGenerator for GeminiClient {
   fn generate(&self, diff: &str) -> Result<String> {
      let prompt = templates::render_commit_prompt(diff)?;
      let url = self.endpoint();
      style::debug(self.verbose, &format!("POST {url} ({} prompt chars)", prompt.len()));

      let response = self
         .client
         .post(&url)
         .header("x-goog-api-key", &self.api_key)
         .json(&GenerateContentRequest::from_prompt(prompt))
         .send()?;

      let status = response.status();
      if !status.is_success() {
         let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
         return Err(GaiError::ApiError { status: status.as_u16(), body: error_message(&body) });
      }

      let body: GenerateContentResponse = response.json()?;
      extract_text(body)
   }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
   contents: Vec<Content>,
}

impl GenerateContentRequest {
   fn from_prompt(prompt: String) -> Self {
      Self {
         contents: vec![Content {
            role:  Some("user".to_string()),
            parts: vec![Part { text: Some(prompt) }],
         }],
      }
   }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
   #[serde(default, skip_serializing_if = "Option::is_none")]
   role:  Option<String>,
   #[serde(default)]
   parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
   #[serde(default, skip_serializing_if = "Option::is_none")]
   text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
   #[serde(default)]
   candidates:      Vec<Candidate>,
   prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
   content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
   block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
   error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
   message: String,
}

/// Pull `error.message` out of a Google API error body, else keep it raw
fn error_message(body: &str) -> String {
   serde_json::from_str::<ErrorEnvelope>(body)
      .map_or_else(|_| body.trim().to_string(), |envelope| envelope.error.message)
}

/// Join the first candidate's text parts. No candidates with a block reason is
/// an error; no candidates otherwise is an empty message.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
   let Some(candidate) = response.candidates.into_iter().next() else {
      if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
         return Err(GaiError::PromptBlocked(reason));
      }
      return Ok(String::new());
   };

   let text: String = candidate
      .content
      .map(|c| c.parts)
      .unwrap_or_default()
      .into_iter()
      .filter_map(|p| p.text)
      .collect();
   Ok(text.trim().to_string())
}
