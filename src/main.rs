use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use bff::cli::{self, BumpArgs, WorkflowStatus};
use bff::config;
use bff::domain::Version;
use bff::git::Git2Repository;
use bff::ui;

#[derive(Parser)]
#[command(
    name = "bff",
    version,
    about = "Bump versions and keep a changelog from tagged git history"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        global = true,
        help = "Release branch (defaults to default_branch from the config)"
    )]
    branch: Option<String>,

    #[arg(short, long, global = true, help = "Log progress to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the next version, update VERSION and the changelog, commit and tag
    Bump {
        #[arg(short, long, help = "Skip confirmation prompts")]
        force: bool,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
    /// Insert a changelog section for the given version
    Changelog {
        #[arg(help = "Version the new section is headed with")]
        next_version: String,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let repo = Git2Repository::open(".").context("Git repository error")?;
    let today = chrono::Local::now().date_naive();

    match args.command {
        Command::Bump { force, dry_run } => {
            let bump_args = BumpArgs {
                branch: args.branch,
                force,
                dry_run,
            };
            let result = cli::run_bump(&repo, &config, &bump_args, today, ui::confirm_action)?;

            match result.status {
                WorkflowStatus::Released { .. } => println!(
                    "\n{} Released {} on {}\n",
                    console::style("✓").green(),
                    result.tag,
                    result.branch
                ),
                WorkflowStatus::DryRun => {}
                WorkflowStatus::Declined => println!("Operation cancelled by user."),
            }
        }
        Command::Changelog { next_version } => {
            let version = Version::parse(&next_version)?;
            cli::run_changelog(&repo, &config, &version, args.branch.as_deref(), today)?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
