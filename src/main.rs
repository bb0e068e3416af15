use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docs_builder::archive::HttpArchiveSource;
use docs_builder::command::ShellRunner;
use docs_builder::config;
use docs_builder::domain::Version;
use docs_builder::git::Git2Repository;
use docs_builder::{logging, ui, BuildOptions, DocsBuilder};

#[derive(clap::Parser)]
#[command(
    name = "docs-builder",
    version,
    about = "Assemble versioned documentation from archived releases and build the docs site"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Docs site directory (where versioned_code is created)"
    )]
    docs_dir: PathBuf,

    #[arg(
        long,
        global = true,
        help = "Building on a developer machine: return to the current branch instead of the commit"
    )]
    local: bool,

    #[arg(
        long,
        global = true,
        env = "PULL_REQUEST",
        help = "Building a pull request preview"
    )]
    pull_request: bool,

    #[arg(short, long, global = true, help = "Show debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build API docs and the production site
    Build,
    /// Prepare all versions and serve the site locally
    Serve,
    /// Cut a versioned docs snapshot for an existing release tag
    CreateVersion {
        /// Release tag to snapshot, e.g. 0.15.2
        #[arg(value_parser = Version::parse)]
        version: Version,
    },
    /// Print the highest release tag in the repository
    LatestTag,
}

fn main() {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref(), &args.docs_dir)?;

    let options = BuildOptions {
        is_local: args.local,
        is_pull_request: args.pull_request,
    };

    let repo = Git2Repository::open(&args.docs_dir)?;
    let archives = HttpArchiveSource::new()?;
    let builder = DocsBuilder::new(
        args.docs_dir.clone(),
        config,
        options,
        repo,
        ShellRunner::new(),
        archives,
    )?;

    match args.command {
        Commands::Build => builder.build_docs()?,
        Commands::Serve => builder.build_docs_locally()?,
        Commands::CreateVersion { version } => {
            let output = builder.create_version(&version)?;
            ui::display_success(&format!("Artifact written to {}", output.display()));
        }
        Commands::LatestTag => println!("{}", builder.latest_tag()?),
    }

    Ok(())
}
