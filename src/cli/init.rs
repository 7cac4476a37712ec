use std::fs;

use roboshop::Workspace;
use tracing::instrument;

const STARTER_NICHE: &str = "\
Niche: Desk Accessories

Focus: Modern, minimalist products for remote workers and digital creatives

Target Audience:
- Age 25-40
- Works from home or in co-working spaces
- Prefers a clean, aesthetic, and organized desk
- Shops online and values design-forward solutions

Keywords: desk organization, cable management, minimal design, productivity tools, home office decor
";

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let root = workspace.root();
        let config_path = workspace.config_path();
        if config_path.exists() {
            anyhow::bail!(
                "Workspace already initialized (found existing {})",
                Workspace::CONFIG_FILE
            );
        }

        fs::create_dir_all(root)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", root.display()))?;

        workspace
            .config()
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", Workspace::CONFIG_FILE))?;
        println!("Initialized roboshop workspace in {}", root.display());
        println!("  Created: {}", Workspace::CONFIG_FILE);

        let niche_path = workspace.niche_path();
        if niche_path.exists() {
            println!("  Kept:    {} (already exists)", niche_path.display());
        } else {
            fs::write(&niche_path, STARTER_NICHE)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", niche_path.display()))?;
            println!("  Created: {}", niche_path.display());
        }

        let products_dir = workspace.archive().dir().to_path_buf();
        fs::create_dir_all(&products_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", products_dir.display()))?;
        println!("  Created: {}/", products_dir.display());

        println!();
        println!("Next steps:");
        println!("  Edit {} to describe your niche", niche_path.display());
        println!("  export {}=...", workspace.config().api_key_env);
        println!("  roboshop generate");

        Ok(())
    }
}
