use std::io;

use roboshop::{StorageError, Workspace};
use tracing::instrument;

use super::{
    render,
    terminal::{is_narrow, Colorize},
};

#[derive(Debug, clap::Parser, Default)]
pub struct Ideas {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Ideas {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let ideas = match workspace.board().load() {
            Ok(ideas) => ideas,
            Err(StorageError::NotFound(_)) => {
                println!(
                    "{}",
                    "No product ideas found. Run 'roboshop generate' first.".warning()
                );
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", format!("Warning: {e}").warning());
                return Ok(());
            }
        };

        if ideas.is_empty() {
            println!("{}", "No valid product entries found.".warning());
            return Ok(());
        }

        match self.output {
            OutputFormat::Pretty => render::ideas(&mut io::stdout().lock(), &ideas, is_narrow())?,
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ideas)?),
        }
        Ok(())
    }
}
