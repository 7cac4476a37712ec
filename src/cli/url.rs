use roboshop::Workspace;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Url {
    /// The product file, e.g. `zen_mat.json` or `zen_mat`
    file: String,

    /// Where the product is listed
    url: String,
}

impl Url {
    #[instrument(level = "debug", skip_all, fields(file = %self.file))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let archive = workspace.archive();
        let path = archive.resolve(&self.file);

        archive.set_url(&path, &self.url)?;

        println!(
            "{}",
            format!("Set URL of {} to {}", path.display(), self.url).success()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use roboshop::{BrandingRecord, IdeaRecord};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn url_is_recorded_on_the_resolved_document() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::open(tmp.path());
        let branding = BrandingRecord {
            product_title: "Zen Mat".to_string(),
            short_description: String::new(),
            long_description: String::new(),
            unique_selling_points: Vec::new(),
            instagram_caption: String::new(),
            suggested_hashtags: Vec::new(),
            brand_tone: String::new(),
        };
        let path = workspace
            .archive()
            .save(&IdeaRecord::named("Desk Mat"), &branding)
            .unwrap();

        Url {
            file: "zen_mat".to_string(),
            url: "https://shop.example/zen".to_string(),
        }
        .run(&workspace)
        .unwrap();

        let document = workspace.archive().load(&path).unwrap();
        assert_eq!(document.url.as_deref(), Some("https://shop.example/zen"));
    }

    #[test]
    fn missing_document_is_an_error() {
        let tmp = tempdir().unwrap();

        let result = Url {
            file: "nothing".to_string(),
            url: "https://shop.example".to_string(),
        }
        .run(&Workspace::open(tmp.path()));

        assert!(result.is_err());
    }
}
