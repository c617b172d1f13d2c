use std::{ffi::OsString, path::PathBuf};

use clap::{Parser, error::ErrorKind};

use crate::style;

/// Which workflow a command line selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
   /// Stage every change (`-a`)
   All,
   /// Stage a single file (`-f <file>`)
   File(PathBuf),
   /// Anything else: print help, touch nothing
   Usage,
}

/// Settings that apply to either mode
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct Options {
   /// Show the commit and push commands instead of running them
   #[arg(long)]
   pub dry_run: bool,

   /// Gemini model to use (overrides config and `GAI_MODEL`)
   #[arg(long, short = 'm')]
   pub model: Option<String>,

   /// Path to config file (default: ~/.config/gai/config.toml)
   #[arg(long)]
   pub config: Option<PathBuf>,

   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   pub dir: PathBuf,
}

impl Default for Options {
   fn default() -> Self {
      Self { dry_run: false, model: None, config: None, dir: PathBuf::from(".") }
   }
}

#[derive(Parser, Debug)]
#[command(name = "gai", version)]
#[command(about = "Stage changes, let Gemini write the commit message, then commit and push")]
struct Args {
   /// Stage ALL changes, create an automatic commit and push
   #[arg(short = 'a', long = "all")]
   all: bool,

   /// Stage ONLY <FILE>, create an automatic commit and push
   #[arg(short = 'f', long = "file", value_name = "FILE")]
   file: Option<PathBuf>,

   #[command(flatten)]
   options: Options,
}

impl Args {
   /// `-a` wins when both modes are given
   fn invocation(&self) -> Invocation {
      if self.all {
         Invocation::All
      } else if let Some(ref file) = self.file {
         Invocation::File(file.clone())
      } else {
         Invocation::Usage
      }
   }
}

/// A parsed command line
#[derive(Debug, PartialEq, Eq)]
pub struct Cli {
   pub invocation: Invocation,
   pub options:    Options,
}

/// Parse the process arguments. Malformed input becomes [`Invocation::Usage`];
/// the only error is clap's own `--help` / `--version` output, which the
/// caller prints.
pub fn parse<I, T>(argv: I) -> Result<Cli, clap::Error>
where
   I: IntoIterator<Item = T>,
   T: Into<OsString> + Clone,
{
   match Args::try_parse_from(argv) {
      Ok(args) => Ok(Cli { invocation: args.invocation(), options: args.options }),
      Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => Err(e),
      Err(_) => Ok(Cli { invocation: Invocation::Usage, options: Options::default() }),
   }
}

/// Help text shown for any unrecognized invocation
pub fn usage_text() -> String {
   format!(
      "\n{}\n  {}               Stage ALL changes, create an automatic commit and push\n  {}       \
       Stage ONLY <file>, create an automatic commit and push\n\n{}\n  {}\n  {}\n",
      style::heading("Usage:"),
      style::command("gai -a"),
      style::command("gai -f <file>"),
      style::heading("Examples:"),
      style::command("gai -a"),
      style::command("gai -f app.py"),
   )
}
