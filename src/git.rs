use std::{
   path::{Path, PathBuf},
   process::Command,
};

use crate::{
   error::{GaiError, Result},
   style,
};

/// Runs git subcommands and hands back their trimmed stdout.
///
/// A launch failure or non-zero exit is an error, never empty output.
pub trait GitRunner {
   fn run(&self, args: &[&str]) -> Result<String>;

   /// Directory git runs in; relative user paths resolve against it
   fn workdir(&self) -> &Path;
}

/// Runs the system `git` binary
pub struct SystemGit {
   dir:     PathBuf,
   verbose: bool,
}

impl SystemGit {
   pub fn new(dir: impl Into<PathBuf>, verbose: bool) -> Self {
      Self { dir: dir.into(), verbose }
   }
}

impl GitRunner for SystemGit {
   fn run(&self, args: &[&str]) -> Result<String> {
      let command = args.join(" ");
      style::debug(self.verbose, &format!("$ git {command}"));

      let output = Command::new("git")
         .args(args)
         .current_dir(&self.dir)
         .output()
         .map_err(|e| GaiError::GitLaunch { command: command.clone(), reason: e.to_string() })?;

      if !output.status.success() {
         let stderr = String::from_utf8_lossy(&output.stderr);
         let stdout = String::from_utf8_lossy(&output.stdout);
         // git commit reports "nothing to commit" on stdout
         let detail = if stderr.trim().is_empty() { stdout } else { stderr };
         return Err(GaiError::GitError { command, stderr: detail.trim().to_string() });
      }

      Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
   }

   fn workdir(&self) -> &Path {
      &self.dir
   }
}

/// Repository operations used by the commit workflow
pub struct Repo<R> {
   runner:  R,
   dry_run: bool,
}

impl<R: GitRunner> Repo<R> {
   pub const fn new(runner: R, dry_run: bool) -> Self {
      Self { runner, dry_run }
   }

   pub fn runner(&self) -> &R {
      &self.runner
   }

   pub const fn is_dry_run(&self) -> bool {
      self.dry_run
   }

   /// Resolve a user-supplied path against the working directory
   pub fn resolve(&self, path: &Path) -> PathBuf {
      self.runner.workdir().join(path)
   }

   /// True iff `git status --porcelain` reports anything (staged, unstaged or
   /// untracked)
   pub fn has_pending_changes(&self) -> Result<bool> {
      let status = self.runner.run(&["status", "--porcelain"])?;
      Ok(!status.is_empty())
   }

   pub fn diff(&self, staged: bool) -> Result<String> {
      if staged {
         self.runner.run(&["diff", "--staged"])
      } else {
         self.runner.run(&["diff"])
      }
   }

   pub fn stage_all(&self) -> Result<()> {
      self.runner.run(&["add", "."]).map(drop)
   }

   pub fn stage_path(&self, path: &Path) -> Result<()> {
      let path = path
         .to_str()
         .ok_or_else(|| GaiError::InvalidPath(path.display().to_string()))?;
      self.runner.run(&["add", "--", path]).map(drop)
   }

   /// Commit with `message`, then push with `--force-with-lease`. The push is
   /// skipped when the commit fails.
   pub fn commit_and_push(&self, message: &str) -> Result<()> {
      if self.dry_run {
         println!("\n{}", style::section_header("DRY RUN - Would execute", style::term_width()));
         println!("git commit -m \"{}\"", message.replace('\n', "\\n"));
         println!("git push --force-with-lease");
         return Ok(());
      }

      self.runner.run(&["commit", "-m", message])?;
      self.runner.run(&["push", "--force-with-lease"])?;
      Ok(())
   }
}
