use roboshop::Workspace;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct History {
    /// List every recorded idea, oldest first
    #[arg(long)]
    all: bool,
}

impl History {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let history = workspace.history().load()?;
        let limit = workspace.config().exclusion_limit;

        if history.is_empty() {
            println!("No ideas generated yet.");
            return Ok(());
        }

        println!(
            "{} idea(s) in history, {} distinct name(s)",
            history.len(),
            history.known_names().len()
        );

        if self.all {
            println!();
            for (index, idea) in history.iter().enumerate() {
                println!("{:>4}. {}", index + 1, idea.product_name);
            }
        }

        let excluded = history.exclusion_list(limit);
        println!();
        println!(
            "{}",
            format!("Excluded from the next prompt ({} of at most {limit}):", excluded.len()).dim()
        );
        for name in &excluded {
            println!("  {name}");
        }
        Ok(())
    }
}
