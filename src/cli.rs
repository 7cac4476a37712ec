use std::path::PathBuf;

mod brand;
mod generate;
mod history;
mod ideas;
mod init;
mod products;
mod render;
mod session;
mod show;
mod terminal;
mod url;

use brand::Brand;
use clap::ArgAction;
use generate::Generate;
use history::History;
use ideas::Ideas;
use init::Init;
use products::Products;
use roboshop::Workspace;
use session::Session;
use show::Show;
use url::Url;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the workspace
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Ideas(Ideas::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Create a workspace with a default configuration and niche
    Init(Init),

    /// Generate a new batch of product ideas
    ///
    /// Names generated in earlier runs are excluded from the prompt.
    Generate(Generate),

    /// Show the latest batch of product ideas (default)
    Ideas(Ideas),

    /// Generate branding for one of the latest ideas
    Brand(Brand),

    /// List saved products
    Products(Products),

    /// Show a saved product
    Show(Show),

    /// Set the listing URL of a saved product
    Url(Url),

    /// Show the idea history and the names excluded from the next prompt
    History(History),

    /// Browse ideas, generate branding and save products interactively
    Session(Session),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        match self {
            Self::Init(command) => command.run(&workspace)?,
            Self::Generate(command) => command.run(&workspace)?,
            Self::Ideas(command) => command.run(&workspace)?,
            Self::Brand(command) => command.run(&workspace)?,
            Self::Products(command) => command.run(&workspace)?,
            Self::Show(command) => command.run(&workspace)?,
            Self::Url(command) => command.run(&workspace)?,
            Self::History(command) => command.run(&workspace)?,
            Self::Session(command) => command.run(&workspace)?,
        }
        Ok(())
    }
}
