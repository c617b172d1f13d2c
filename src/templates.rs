use std::{path::PathBuf, sync::LazyLock};

use parking_lot::Mutex;
use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::error::{GaiError, Result};

/// Embedded prompts folder (compiled into binary)
#[derive(RustEmbed)]
#[folder = "prompts/"]
struct Prompts;

const COMMIT_TEMPLATE: &str = "commit.md";

/// Longest title line the prompt asks the model for
pub const TITLE_MAX_CHARS: usize = 50;

/// Shared Tera instance; `render_str` needs mutable access
static TERA: LazyLock<Mutex<Tera>> = LazyLock::new(|| {
   let mut tera = Tera::default();
   // Diffs must reach the model byte-for-byte
   tera.autoescape_on(vec![]);
   Mutex::new(tera)
});

/// Determine user prompts directory (~/.gai/prompts/) if a home dir exists.
fn get_user_prompts_dir() -> Option<PathBuf> {
   std::env::var("HOME")
      .or_else(|_| std::env::var("USERPROFILE"))
      .ok()
      .map(|home| PathBuf::from(home).join(".gai").join("prompts"))
}

/// Load template content, preferring a user override over the embedded copy
fn load_template_file(name: &str) -> Result<String> {
   if let Some(prompts_dir) = get_user_prompts_dir() {
      let template_path = prompts_dir.join(name);
      if template_path.is_file() {
         return std::fs::read_to_string(&template_path).map_err(|e| {
            GaiError::TemplateError(format!(
               "Failed to read template file {}: {e}",
               template_path.display()
            ))
         });
      }
   }

   let embedded = Prompts::get(name).ok_or_else(|| {
      GaiError::TemplateError(format!("Template '{name}' not found as user override or embedded"))
   })?;
   std::str::from_utf8(embedded.data.as_ref())
      .map(str::to_string)
      .map_err(|e| GaiError::TemplateError(format!("Embedded template {name} is not UTF-8: {e}")))
}

/// Render the commit message prompt around `diff`
pub fn render_commit_prompt(diff: &str) -> Result<String> {
   let template_content = load_template_file(COMMIT_TEMPLATE)?;

   let mut context = Context::new();
   context.insert("diff", diff);
   context.insert("title_max_chars", &TITLE_MAX_CHARS);

   let mut tera = TERA.lock();
   tera
      .render_str(&template_content, &context)
      .map_err(|e| GaiError::TemplateError(format!("{COMMIT_TEMPLATE}: {e}")))
}
