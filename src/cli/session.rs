//! The interactive session: browse ideas, brand them, save products.
//!
//! Generated branding is kept in a [`BrandingCache`] for the lifetime of the
//! session, so revisiting an idea does not call the model again. Anything not
//! saved is lost when the session ends.

use std::{collections::HashMap, io, slice};

use dialoguer::{Confirm, Input, Select};
use roboshop::{BrandingRecord, IdeaRecord, StorageError, Workspace};
use tracing::instrument;

use super::{
    brand::generate_branding,
    generate::generate_ideas,
    render,
    terminal::{is_narrow, Colorize},
};

#[derive(Debug, clap::Parser)]
pub struct Session {}

/// Branding generated during a session, keyed by [`IdeaRecord::key`].
#[derive(Debug, Default)]
pub struct BrandingCache(HashMap<String, BrandingRecord>);

impl BrandingCache {
    #[must_use]
    pub fn get(&self, idea: &IdeaRecord) -> Option<&BrandingRecord> {
        self.0.get(&idea.key())
    }

    pub fn insert(&mut self, idea: &IdeaRecord, branding: BrandingRecord) {
        self.0.insert(idea.key(), branding);
    }

    pub fn remove(&mut self, idea: &IdeaRecord) -> Option<BrandingRecord> {
        self.0.remove(&idea.key())
    }
}

enum IdeaAction {
    Save,
    Regenerate,
    Back,
}

impl Session {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut cache = BrandingCache::default();

        loop {
            let ideas = load_ideas(workspace);

            let mut items: Vec<String> = ideas
                .iter()
                .enumerate()
                .map(|(index, idea)| format!("{}. {}", index + 1, idea.product_name))
                .collect();
            items.push("Generate new ideas".to_string());
            items.push("Quit".to_string());

            let Some(choice) = Select::new()
                .with_prompt("Pick an idea")
                .items(&items)
                .default(0)
                .interact_opt()?
            else {
                break;
            };

            if let Some(idea) = ideas.get(choice) {
                brand_idea(workspace, idea, &mut cache)?;
            } else if choice == ideas.len() {
                regenerate(workspace)?;
            } else {
                break;
            }
        }

        Ok(())
    }
}

fn load_ideas(workspace: &Workspace) -> Vec<IdeaRecord> {
    match workspace.board().load() {
        Ok(ideas) => {
            if ideas.is_empty() {
                println!("{}", "No valid product entries found.".warning());
            }
            ideas
        }
        Err(StorageError::NotFound(_)) => {
            println!("{}", "No product ideas found yet. Generate some first.".warning());
            Vec::new()
        }
        Err(e) => {
            eprintln!("{}", format!("Warning: {e}").warning());
            Vec::new()
        }
    }
}

fn regenerate(workspace: &Workspace) -> anyhow::Result<()> {
    match generate_ideas(workspace) {
        Ok(ideas) => {
            println!("{}", format!("Generated {} new idea(s)", ideas.len()).success());
            Ok(())
        }
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            render::research_failure(&mut io::stderr().lock(), &e)?;
            Ok(())
        }
    }
}

fn brand_idea(
    workspace: &Workspace,
    idea: &IdeaRecord,
    cache: &mut BrandingCache,
) -> anyhow::Result<()> {
    let narrow = is_narrow();
    println!();
    render::ideas(&mut io::stdout().lock(), slice::from_ref(idea), narrow)?;

    loop {
        let branding = if let Some(branding) = cache.get(idea) {
            branding.clone()
        } else {
            match generate_branding(workspace, idea) {
                Ok(branding) => {
                    cache.insert(idea, branding.clone());
                    branding
                }
                Err(e) => {
                    eprintln!("{}", e.to_string().error());
                    let retry = Confirm::new()
                        .with_prompt("Try again?")
                        .default(true)
                        .interact()?;
                    if retry {
                        continue;
                    }
                    return Ok(());
                }
            }
        };

        println!();
        render::branding(&mut io::stdout().lock(), &branding, narrow)?;
        println!();

        match choose_action()? {
            IdeaAction::Save => {
                save_product(workspace, idea, &branding)?;
                return Ok(());
            }
            IdeaAction::Regenerate => {
                cache.remove(idea);
            }
            IdeaAction::Back => return Ok(()),
        }
    }
}

fn choose_action() -> anyhow::Result<IdeaAction> {
    let choice = Select::new()
        .with_prompt("What next?")
        .items(&["Save product", "Regenerate branding", "Back"])
        .default(0)
        .interact_opt()?;

    Ok(match choice {
        Some(0) => IdeaAction::Save,
        Some(1) => IdeaAction::Regenerate,
        _ => IdeaAction::Back,
    })
}

/// Saves the product and optionally records a URL. Storage failures are
/// reported as warnings so the session can continue.
fn save_product(
    workspace: &Workspace,
    idea: &IdeaRecord,
    branding: &BrandingRecord,
) -> anyhow::Result<()> {
    let archive = workspace.archive();
    let path = match archive.save(idea, branding) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{}", format!("Warning: {e}").warning());
            return Ok(());
        }
    };
    println!("{}", format!("Saved to {}", path.display()).success());

    let url = Input::<String>::new()
        .with_prompt("Listing URL (leave empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    let url = url.trim();
    if url.is_empty() {
        return Ok(());
    }

    match archive.set_url(&path, url) {
        Ok(_) => println!("{}", format!("URL set to {url}").success()),
        Err(e) => eprintln!("{}", format!("Warning: {e}").warning()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding(title: &str) -> BrandingRecord {
        BrandingRecord {
            product_title: title.to_string(),
            short_description: String::new(),
            long_description: String::new(),
            unique_selling_points: Vec::new(),
            instagram_caption: String::new(),
            suggested_hashtags: Vec::new(),
            brand_tone: String::new(),
        }
    }

    #[test]
    fn cache_is_keyed_by_idea_name() {
        let mut cache = BrandingCache::default();
        cache.insert(&IdeaRecord::named("Desk Mat"), branding("Zen Mat"));

        let same_name = IdeaRecord {
            description: "different copy".to_string(),
            ..IdeaRecord::named("desk-mat")
        };

        assert_eq!(cache.get(&same_name), Some(&branding("Zen Mat")));
        assert_eq!(cache.get(&IdeaRecord::named("Lamp")), None);
    }

    #[test]
    fn removed_branding_is_regenerated() {
        let mut cache = BrandingCache::default();
        let idea = IdeaRecord::named("Desk Mat");
        cache.insert(&idea, branding("Zen Mat"));

        assert_eq!(cache.remove(&idea), Some(branding("Zen Mat")));
        assert_eq!(cache.get(&idea), None);
    }
}
