use std::process::ExitCode;

use gai::{
   Outcome,
   api::GeminiClient,
   cli::{self, Invocation, Options},
   config::{self, GaiConfig},
   error::Result,
   git::{Repo, SystemGit},
   style, workflow,
};

/// Load config from `--config` or the default location, then apply `--model`
fn load_config(options: &Options) -> Result<GaiConfig> {
   let mut config = if let Some(ref config_path) = options.config {
      GaiConfig::from_file(config_path)?
   } else {
      GaiConfig::load()?
   };
   if let Some(ref model) = options.model {
      config.model.clone_from(model);
   }
   Ok(config)
}

fn main() -> ExitCode {
   dotenvy::dotenv().ok();

   // The credential gates everything, including usage output
   let api_key = match config::api_key_from_env() {
      Ok(key) => key,
      Err(e) => {
         style::fail(&format!("Error: {e}"));
         return ExitCode::FAILURE;
      },
   };

   let cli = match cli::parse(std::env::args_os()) {
      Ok(cli) => cli,
      Err(builtin) => {
         builtin.print().ok();
         return ExitCode::SUCCESS;
      },
   };

   if cli.invocation == Invocation::Usage {
      Outcome::Usage.report();
      return ExitCode::SUCCESS;
   }

   let config = match load_config(&cli.options) {
      Ok(config) => config,
      Err(e) => {
         style::fail(&format!("Error: {e}"));
         return ExitCode::FAILURE;
      },
   };

   let generator = match GeminiClient::new(&config, api_key) {
      Ok(generator) => generator,
      Err(e) => {
         style::fail(&format!("Error: failed to build HTTP client: {e}"));
         return ExitCode::FAILURE;
      },
   };
   style::debug(config.verbose, &format!("Using model: {}", style::model(generator.model())));

   let repo = Repo::new(SystemGit::new(&cli.options.dir, config.verbose), cli.options.dry_run);
   workflow::run(&cli.invocation, &repo, &generator).report();

   ExitCode::SUCCESS
}
