//! Terminal styling utilities for consistent CLI output.
//!
//! Respects `NO_COLOR` environment variable and terminal capabilities.

use std::{
   io::{self, Write},
   sync::OnceLock,
   thread,
   time::Duration,
};

use owo_colors::OwoColorize;

/// Whether color output is enabled (cached on first call).
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used.
pub fn colors_enabled() -> bool {
   *COLOR_ENABLED.get_or_init(|| {
      // NO_COLOR takes precedence (https://no-color.org/)
      if std::env::var("NO_COLOR").is_ok() {
         return false;
      }
      supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
   })
}

// === Color Palette ===

/// Success: checkmarks, completed actions (green + bold).
pub fn success(s: &str) -> String {
   if colors_enabled() {
      s.green().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Warning: nothing to do, non-fatal issues (yellow).
pub fn warning(s: &str) -> String {
   if colors_enabled() {
      s.yellow().to_string()
   } else {
      s.to_string()
   }
}

/// Error: failures, hard errors (red + bold).
pub fn error(s: &str) -> String {
   if colors_enabled() {
      s.red().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Heading: usage section titles (yellow + bold).
pub fn heading(s: &str) -> String {
   if colors_enabled() {
      s.yellow().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Command: invocations shown in help text (green + bold).
pub fn command(s: &str) -> String {
   success(s)
}

/// Dim: less important details, debug lines (dimmed).
pub fn dim(s: &str) -> String {
   if colors_enabled() {
      s.dimmed().to_string()
   } else {
      s.to_string()
   }
}

/// Bold: headers, key values.
pub fn bold(s: &str) -> String {
   if colors_enabled() {
      s.bold().to_string()
   } else {
      s.to_string()
   }
}

/// Model name styling (magenta).
pub fn model(s: &str) -> String {
   if colors_enabled() {
      s.magenta().to_string()
   } else {
      s.to_string()
   }
}

/// Print warning message, clearing any active spinner line first.
pub fn warn(msg: &str) {
   print!("\r\x1b[K");
   io::stdout().flush().ok();
   eprintln!("{} {}", warning(icons::WARNING), warning(msg));
}

/// Print an error message to stderr.
pub fn fail(msg: &str) {
   eprintln!("{} {}", error(icons::ERROR), error(msg));
}

/// Print a dimmed debug line when verbose output is on.
pub fn debug(verbose: bool, msg: &str) {
   if verbose {
      eprintln!("{}", dim(msg));
   }
}

/// Print an info message that clears any spinner line first.
pub fn print_info(msg: &str) {
   use std::io::IsTerminal;
   if std::io::stderr().is_terminal() && colors_enabled() {
      eprintln!("\r\x1b[K{} {msg}", icons::INFO.cyan());
   } else {
      eprintln!("{} {msg}", icons::INFO);
   }
}

/// Get terminal width, capped at 120 columns.
pub fn term_width() -> usize {
   terminal_size::terminal_size()
      .map_or(80, |(w, _)| w.0 as usize)
      .min(120)
}

/// Horizontal separator line.
pub fn separator(width: usize) -> String {
   let line = box_chars::HORIZONTAL.to_string().repeat(width);
   if colors_enabled() { dim(&line) } else { line }
}

/// Section header with decorative lines.
pub fn section_header(title: &str, width: usize) -> String {
   let title_len = title.chars().count();
   let line_len = (width.saturating_sub(title_len + 2)) / 2;
   let line = box_chars::HORIZONTAL.to_string().repeat(line_len);

   if colors_enabled() {
      format!("{} {} {}", dim(&line), bold(title), dim(&line))
   } else {
      format!("{line} {title} {line}")
   }
}

pub mod box_chars {
   pub const HORIZONTAL: char = '\u{2500}';
}

// === Status Icons ===

pub mod icons {
   pub const SUCCESS: &str = "\u{2705}";
   pub const WARNING: &str = "\u{26A0}\u{FE0F}";
   pub const ERROR: &str = "\u{274C}";
   pub const INFO: &str = "\u{2139}";
   pub const ROBOT: &str = "\u{1F916}";
}

// === Spinner ===

const SPINNER_FRAMES: &[char] = &[
   '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
   '\u{2807}', '\u{280F}',
];

/// Run a function with a spinner, showing a cross instead of a check mark on
/// failure. Falls back to static text if colors are off or stdout is not a
/// TTY.
pub fn with_spinner_result<F, T, E>(message: &str, f: F) -> Result<T, E>
where
   F: FnOnce() -> Result<T, E>,
{
   if !colors_enabled() {
      println!("{message}");
      return f();
   }

   let (tx, rx) = std::sync::mpsc::channel::<bool>();
   let msg = message.to_string();

   let spinner = thread::spawn(move || {
      let mut idx = 0;
      loop {
         match rx.try_recv() {
            Ok(success) => {
               let icon = if success {
                  "\u{2713}".green().to_string()
               } else {
                  "\u{2717}".red().to_string()
               };
               print!("\r\x1b[K{icon} {msg}\n");
               io::stdout().flush().ok();
               break;
            },
            Err(std::sync::mpsc::TryRecvError::Disconnected) => break,
            Err(std::sync::mpsc::TryRecvError::Empty) => {},
         }
         print!("\r{} {}", SPINNER_FRAMES[idx].cyan(), msg);
         io::stdout().flush().ok();
         idx = (idx + 1) % SPINNER_FRAMES.len();
         thread::sleep(Duration::from_millis(80));
      }
   });

   let result = f();
   tx.send(result.is_ok()).ok();
   spinner.join().ok();
   result
}
