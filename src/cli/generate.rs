use std::{io, process};

use roboshop::{IdeaGenerator, IdeaRecord, OpenAiClient, ResearchError, Workspace};
use tracing::instrument;

use super::{
    render,
    terminal::{self, is_narrow, Colorize},
};

#[derive(Debug, clap::Parser)]
pub struct Generate {}

impl Generate {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        match generate_ideas(workspace) {
            Ok(ideas) => {
                println!(
                    "{}",
                    format!(
                        "Generated {} idea(s), saved to {}",
                        ideas.len(),
                        workspace.board().path().display()
                    )
                    .success()
                );
                println!();
                render::ideas(&mut io::stdout().lock(), &ideas, is_narrow())?;
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                render::research_failure(&mut io::stderr().lock(), &e)?;
                process::exit(1);
            }
        }
    }
}

/// Runs one idea generation against the configured endpoint behind a spinner.
pub fn generate_ideas(workspace: &Workspace) -> Result<Vec<IdeaRecord>, ResearchError> {
    let client = OpenAiClient::from_config(workspace.config());
    let spinner = terminal::spinner("Generating product ideas...");
    let result = IdeaGenerator::new(client, workspace).generate();
    spinner.finish_and_clear();
    result
}
