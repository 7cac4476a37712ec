use roboshop::Workspace;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Products {}

impl Products {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let names = workspace.archive().list()?;

        if names.is_empty() {
            println!("No saved products yet. Save one with 'roboshop brand <IDEA> --save'.");
            return Ok(());
        }

        for name in &names {
            println!("{name}");
        }
        println!("{}", format!("{} saved product(s)", names.len()).dim());
        Ok(())
    }
}
