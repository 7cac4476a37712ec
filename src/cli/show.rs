use std::io;

use roboshop::Workspace;
use tracing::instrument;

use super::{render, terminal::is_narrow};

#[derive(Debug, clap::Parser)]
#[command(about = "Display a saved product")]
pub struct Show {
    /// The product file, e.g. `zen_mat.json` or `zen_mat`
    file: String,

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

impl Show {
    #[instrument(level = "debug", skip_all, fields(file = %self.file))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let archive = workspace.archive();
        let path = archive.resolve(&self.file);
        let document = archive.load(&path)?;

        match self.output {
            OutputFormat::Pretty => {
                render::document(&mut io::stdout().lock(), &document, is_narrow())?;
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&document)?),
        }
        Ok(())
    }
}
