//! Stage → generate → commit/push sequencing for one invocation.
//!
//! Every path ends in an [`Outcome`]; nothing here exits the process.

use std::path::{Path, PathBuf};

use crate::{
   api::MessageGenerator,
   cli::{self, Invocation},
   error::GaiError,
   git::{GitRunner, Repo},
   style,
};

/// How a single run ended
#[derive(Debug)]
pub enum Outcome {
   /// Commit created and pushed (or printed, in dry-run mode)
   Committed { message: String, file: Option<PathBuf>, dry_run: bool },
   /// `git status` showed nothing to commit
   NoChanges,
   /// The staged diff was empty after staging
   EmptyDiff,
   /// The generator failed or returned nothing
   NoMessage { reason: Option<String> },
   /// `-f` named a path that is not an existing file
   MissingFile(PathBuf),
   Usage,
   /// A git step failed
   Failed(GaiError),
}

impl Outcome {
   /// One-line, unstyled description of the outcome
   pub fn summary(&self) -> String {
      match self {
         Self::Committed { message, file: None, dry_run: false } => {
            format!("Commit pushed: {message}")
         },
         Self::Committed { message, file: Some(file), dry_run: false } => {
            format!("Commit pushed for {}: {message}", file.display())
         },
         Self::Committed { dry_run: true, .. } => {
            "Dry run: nothing was committed or pushed.".to_string()
         },
         Self::NoChanges => "There are no changes in the repository to commit.".to_string(),
         Self::EmptyDiff => "There are no actual changes in the staging area.".to_string(),
         Self::NoMessage { reason: None } => "Failed to generate a commit message.".to_string(),
         Self::NoMessage { reason: Some(reason) } => {
            format!("Failed to generate a commit message: {reason}")
         },
         Self::MissingFile(path) => format!("Error: File '{}' does not exist.", path.display()),
         Self::Usage => cli::usage_text(),
         Self::Failed(err) => format!("Error: {err}"),
      }
   }

   pub fn report(&self) {
      let summary = self.summary();
      match self {
         Self::Committed { dry_run: false, .. } => {
            println!("{} {}", style::icons::SUCCESS, style::success(&summary));
         },
         Self::Committed { dry_run: true, .. } => style::print_info(&summary),
         Self::NoChanges | Self::EmptyDiff | Self::NoMessage { .. } => style::warn(&summary),
         Self::MissingFile(_) | Self::Failed(_) => style::fail(&summary),
         Self::Usage => println!("{summary}"),
      }
   }
}

/// Dispatch one invocation against `repo`, asking `generator` for the message
pub fn run<R, M>(invocation: &Invocation, repo: &Repo<R>, generator: &M) -> Outcome
where
   R: GitRunner,
   M: MessageGenerator,
{
   match invocation {
      Invocation::Usage => Outcome::Usage,
      Invocation::All => run_all(repo, generator),
      Invocation::File(path) => run_file(path, repo, generator),
   }
}

fn run_all<R: GitRunner, M: MessageGenerator>(repo: &Repo<R>, generator: &M) -> Outcome {
   match repo.has_pending_changes() {
      Ok(true) => {},
      Ok(false) => return Outcome::NoChanges,
      Err(e) => return Outcome::Failed(e),
   }

   style::print_info("Staging all changes...");
   if let Err(e) = repo.stage_all() {
      return Outcome::Failed(e);
   }

   commit_staged(repo, generator, None)
}

fn run_file<R: GitRunner, M: MessageGenerator>(
   path: &Path,
   repo: &Repo<R>,
   generator: &M,
) -> Outcome {
   if !repo.resolve(path).is_file() {
      return Outcome::MissingFile(path.to_path_buf());
   }

   style::print_info(&format!("Staging {}...", path.display()));
   if let Err(e) = repo.stage_path(path) {
      return Outcome::Failed(e);
   }

   commit_staged(repo, generator, Some(path))
}

/// Shared tail of both modes: diff → message → commit/push
fn commit_staged<R: GitRunner, M: MessageGenerator>(
   repo: &Repo<R>,
   generator: &M,
   file: Option<&Path>,
) -> Outcome {
   let diff = match repo.diff(true) {
      Ok(diff) => diff,
      Err(e) => return Outcome::Failed(e),
   };
   if diff.is_empty() {
      return Outcome::EmptyDiff;
   }

   let generated = style::with_spinner_result(
      &format!("{} Generating commit message...", style::icons::ROBOT),
      || generator.generate(&diff),
   );
   let message = match generated {
      Ok(message) if !message.trim().is_empty() => message.trim().to_string(),
      Ok(_) => return Outcome::NoMessage { reason: None },
      Err(e) => return Outcome::NoMessage { reason: Some(e.to_string()) },
   };

   let width = style::term_width();
   println!("\n{}", style::section_header("Generated Commit Message", width));
   println!("{message}");
   println!("{}", style::separator(width));

   if let Err(e) = repo.commit_and_push(&message) {
      return Outcome::Failed(e);
   }

   Outcome::Committed {
      message,
      file: file.map(Path::to_path_buf),
      dry_run: repo.is_dry_run(),
   }
}

#[cfg(test)]
mod tests {
   use std::io::Write;

   use super::*;
   use crate::{api::MockMessageGenerator, git::testing::RecordingGit};

   const STATUS: &str = "M file.py";
   const DIFF: &str = "--- a/file.py\n+++ b/file.py\n@@ -1 +1 @@\n-x = 1\n+x = 2";
   const MESSAGE: &str = "Fix bug\n\nDetails.";

   fn scripted_git() -> RecordingGit {
      RecordingGit::new()
         .with_output("status", STATUS)
         .with_output("diff", DIFF)
   }

   fn generator_returning(message: &'static str) -> MockMessageGenerator {
      let mut generator = MockMessageGenerator::new();
      generator
         .expect_generate()
         .times(1)
         .returning(move |_| Ok(message.to_string()));
      generator
   }

   fn unused_generator() -> MockMessageGenerator {
      let mut generator = MockMessageGenerator::new();
      generator.expect_generate().never();
      generator
   }

   #[test]
   fn test_all_mode_happy_path() {
      let repo = Repo::new(scripted_git(), false);
      let mut generator = MockMessageGenerator::new();
      generator
         .expect_generate()
         .withf(|diff| diff == DIFF)
         .times(1)
         .returning(|_| Ok(MESSAGE.to_string()));

      let outcome = run(&Invocation::All, &repo, &generator);

      let git = repo.runner();
      assert_eq!(git.subcommands(), vec!["status", "add", "diff", "commit", "push"]);
      assert_eq!(git.calls_to("add"), vec![vec!["add", "."]]);
      assert_eq!(git.calls_to("commit"), vec![vec!["commit", "-m", MESSAGE]]);
      assert_eq!(git.calls_to("push"), vec![vec!["push", "--force-with-lease"]]);
      assert!(matches!(
         outcome,
         Outcome::Committed { ref message, file: None, dry_run: false } if message == MESSAGE
      ));
      assert!(outcome.summary().contains(MESSAGE));
   }

   #[test]
   fn test_generator_receives_trimmed_diff() {
      let git = RecordingGit::new()
         .with_output("status", STATUS)
         .with_output("diff", "\n\n+line with trailing space \n\n");
      let repo = Repo::new(git, false);
      let mut generator = MockMessageGenerator::new();
      generator
         .expect_generate()
         .withf(|diff| diff == "+line with trailing space")
         .times(1)
         .returning(|_| Ok(MESSAGE.to_string()));

      run(&Invocation::All, &repo, &generator);
   }

   #[test]
   fn test_no_changes_stops_after_status() {
      let repo = Repo::new(RecordingGit::new(), false);
      let outcome = run(&Invocation::All, &repo, &unused_generator());

      assert!(matches!(outcome, Outcome::NoChanges));
      assert!(outcome.summary().contains("no changes"));
      assert_eq!(repo.runner().subcommands(), vec!["status"]);
   }

   #[test]
   fn test_status_failure_is_reported() {
      let git = RecordingGit::new().failing("status", "fatal: not a git repository");
      let repo = Repo::new(git, false);
      let outcome = run(&Invocation::All, &repo, &unused_generator());

      assert!(matches!(outcome, Outcome::Failed(GaiError::GitError { .. })));
      assert!(outcome.summary().contains("not a git repository"));
      assert_eq!(repo.runner().subcommands(), vec!["status"]);
   }

   #[test]
   fn test_empty_diff_skips_generation() {
      let git = RecordingGit::new().with_output("status", STATUS);
      let repo = Repo::new(git, false);
      let outcome = run(&Invocation::All, &repo, &unused_generator());

      assert!(matches!(outcome, Outcome::EmptyDiff));
      assert_eq!(repo.runner().subcommands(), vec!["status", "add", "diff"]);
   }

   #[test]
   fn test_empty_message_never_commits() {
      let repo = Repo::new(scripted_git(), false);
      let outcome = run(&Invocation::All, &repo, &generator_returning("  \n"));

      assert!(matches!(outcome, Outcome::NoMessage { reason: None }));
      assert!(repo.runner().calls_to("commit").is_empty());
      assert!(repo.runner().calls_to("push").is_empty());
   }

   #[test]
   fn test_generator_error_is_no_message_with_reason() {
      let repo = Repo::new(scripted_git(), false);
      let mut generator = MockMessageGenerator::new();
      generator.expect_generate().times(1).returning(|_| {
         Err(GaiError::ApiError { status: 403, body: "API key not valid".to_string() })
      });

      let outcome = run(&Invocation::All, &repo, &generator);

      match outcome {
         Outcome::NoMessage { reason: Some(ref reason) } => {
            assert!(reason.contains("403"));
         },
         ref other => panic!("unexpected outcome: {other:?}"),
      }
      assert_eq!(repo.runner().subcommands(), vec!["status", "add", "diff"]);
   }

   #[test]
   fn test_failed_push_is_not_success() {
      let repo = Repo::new(scripted_git().failing("push", "rejected (stale info)"), false);
      let outcome = run(&Invocation::All, &repo, &generator_returning(MESSAGE));

      assert!(matches!(outcome, Outcome::Failed(_)));
      assert!(!outcome.summary().contains("Commit pushed"));
      assert_eq!(repo.runner().subcommands(), vec!["status", "add", "diff", "commit", "push"]);
   }

   #[test]
   fn test_failed_commit_skips_push() {
      let repo = Repo::new(scripted_git().failing("commit", "nothing to commit"), false);
      let outcome = run(&Invocation::All, &repo, &generator_returning(MESSAGE));

      assert!(matches!(outcome, Outcome::Failed(_)));
      assert!(repo.runner().calls_to("push").is_empty());
   }

   #[test]
   fn test_dry_run_stages_but_never_commits() {
      let repo = Repo::new(scripted_git(), true);
      let outcome = run(&Invocation::All, &repo, &generator_returning(MESSAGE));

      assert!(matches!(outcome, Outcome::Committed { dry_run: true, .. }));
      assert_eq!(repo.runner().subcommands(), vec!["status", "add", "diff"]);
   }

   #[test]
   fn test_file_mode_missing_file_runs_nothing() {
      let repo = Repo::new(scripted_git(), false);
      let outcome = run(
         &Invocation::File(PathBuf::from("missing.txt")),
         &repo,
         &unused_generator(),
      );

      assert!(matches!(outcome, Outcome::MissingFile(_)));
      assert!(outcome.summary().contains("missing.txt"));
      assert!(repo.runner().calls.borrow().is_empty());
   }

   #[test]
   fn test_file_mode_directory_is_not_a_file() {
      let dir = tempfile::tempdir().unwrap();
      let repo = Repo::new(scripted_git(), false);
      let outcome = run(&Invocation::File(dir.path().to_path_buf()), &repo, &unused_generator());

      assert!(matches!(outcome, Outcome::MissingFile(_)));
      assert!(repo.runner().calls.borrow().is_empty());
   }

   #[test]
   fn test_file_mode_stages_only_that_file() {
      let mut file = tempfile::NamedTempFile::new().unwrap();
      writeln!(file, "x = 2").unwrap();
      let path = file.path().to_path_buf();

      let repo = Repo::new(scripted_git(), false);
      let outcome = run(&Invocation::File(path.clone()), &repo, &generator_returning(MESSAGE));

      let git = repo.runner();
      assert_eq!(git.subcommands(), vec!["add", "diff", "commit", "push"]);
      assert_eq!(git.calls_to("add"), vec![vec![
         "add".to_string(),
         "--".to_string(),
         path.display().to_string()
      ]]);
      assert!(matches!(outcome, Outcome::Committed { file: Some(ref f), .. } if *f == path));
      let summary = outcome.summary();
      assert!(summary.contains(&path.display().to_string()));
      assert!(summary.contains(MESSAGE));
   }

   #[test]
   fn test_usage_touches_nothing() {
      let repo = Repo::new(scripted_git(), false);
      let outcome = run(&Invocation::Usage, &repo, &unused_generator());

      assert!(matches!(outcome, Outcome::Usage));
      assert!(outcome.summary().contains("gai -f <file>"));
      assert!(repo.runner().calls.borrow().is_empty());
   }
}
