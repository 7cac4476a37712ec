use std::io;

use roboshop::{
    BrandingError, BrandingGenerator, BrandingRecord, IdeaRecord, OpenAiClient, StorageError,
    Workspace,
};
use tracing::instrument;

use super::{
    render,
    terminal::{self, is_narrow, Colorize},
};

#[derive(Debug, clap::Parser)]
pub struct Brand {
    /// The idea to brand: its number in `roboshop ideas`, or its name
    idea: String,

    /// Save the product once branding has been generated
    #[arg(long)]
    save: bool,

    /// Listing URL to record on the saved product
    #[arg(long, requires = "save")]
    url: Option<String>,
}

impl Brand {
    #[instrument(level = "debug", skip_all, fields(idea = %self.idea))]
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
        let Some(idea) = select_idea(&ideas, &self.idea) else {
            anyhow::bail!(
                "No idea matching '{}' (expected 1-{} or a product name)",
                self.idea,
                ideas.len()
            );
        };

        let branding = generate_branding(workspace, idea)?;
        render::branding(&mut io::stdout().lock(), &branding, is_narrow())?;

        if !self.save {
            return Ok(());
        }

        let archive = workspace.archive();
        let path = archive.save(idea, &branding)?;
        println!();
        println!("{}", format!("Saved to {}", path.display()).success());

        if let Some(url) = self.url {
            archive.set_url(&path, &url)?;
            println!("{}", format!("URL set to {url}").success());
        }

        Ok(())
    }
}

/// Finds an idea by 1-based position or by case-insensitive name.
pub fn select_idea<'a>(ideas: &'a [IdeaRecord], selector: &str) -> Option<&'a IdeaRecord> {
    let selector = selector.trim();
    if let Ok(position) = selector.parse::<usize>() {
        return position.checked_sub(1).and_then(|index| ideas.get(index));
    }
    let wanted = selector.to_lowercase();
    ideas
        .iter()
        .find(|idea| idea.product_name.trim().to_lowercase() == wanted)
}

/// Generates branding for `idea` against the configured endpoint behind a
/// spinner.
pub fn generate_branding(
    workspace: &Workspace,
    idea: &IdeaRecord,
) -> Result<BrandingRecord, BrandingError> {
    let config = workspace.config();
    let generator = BrandingGenerator::new(
        OpenAiClient::from_config(config),
        config.store_description.clone(),
        config.temperature,
    );

    let spinner = terminal::spinner(format!("Branding {}...", idea.product_name));
    let result = generator.generate(idea);
    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use test_case::test_case;

    use super::*;

    fn ideas() -> Vec<IdeaRecord> {
        vec![
            IdeaRecord::named("Desk Mat"),
            IdeaRecord::named("Cable Clip"),
            IdeaRecord::named("7 Port Hub"),
        ]
    }

    #[test_case("1", Some("Desk Mat"); "first by position")]
    #[test_case(" 2 ", Some("Cable Clip"); "position with whitespace")]
    #[test_case("cable clip", Some("Cable Clip"); "name ignoring case")]
    #[test_case("7 Port Hub", Some("7 Port Hub"); "name starting with a digit")]
    #[test_case("0", None; "zero is out of range")]
    #[test_case("4", None; "past the end")]
    #[test_case("Lamp", None; "unknown name")]
    fn selects_ideas(selector: &str, expected: Option<&str>) {
        let ideas = ideas();

        let selected = select_idea(&ideas, selector).map(|idea| idea.product_name.as_str());

        assert_eq!(selected, expected);
    }

    fn brand(idea: &str) -> Brand {
        Brand {
            idea: idea.to_string(),
            save: false,
            url: None,
        }
    }

    #[test]
    fn missing_idea_file_is_a_warning() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::open(tmp.path());

        assert!(brand("1").run(&workspace).is_ok());
    }

    #[test]
    fn corrupt_idea_file_is_a_warning() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::open(tmp.path());
        let board = workspace.board();
        fs::create_dir_all(board.path().parent().unwrap()).unwrap();
        fs::write(board.path(), "{not json").unwrap();

        assert!(brand("1").run(&workspace).is_ok());
    }

    #[test]
    fn unknown_idea_is_an_error() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::open(tmp.path());
        workspace.board().save(&ideas()).unwrap();

        let error = brand("Lamp").run(&workspace).unwrap_err();

        assert!(error.to_string().contains("No idea matching 'Lamp'"));
    }
}
