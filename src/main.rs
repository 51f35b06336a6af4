use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use version_bump::config::{self, ConfigOverrides};
use version_bump::git::Git2Repository;
use version_bump::{ui, VersionBumper};

#[derive(clap::Parser)]
#[command(
    name = "version-bump",
    version,
    about = "Bump the VERSION file based on files added since a baseline branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Repository to operate on")]
    repo: PathBuf,

    #[arg(long, help = "Git reference to diff against [env: BASELINE_BRANCH]")]
    baseline: Option<String>,

    #[arg(
        long,
        help = "Whitespace-separated package directories that trigger a minor bump [env: PACKAGE_DIRS]"
    )]
    package_dirs: Option<String>,

    #[arg(
        long,
        help = "Version file, relative to the repository root [env: VERSION_FILE]"
    )]
    version_file: Option<PathBuf>,

    #[arg(long, help = "Bump this component (minor or patch) without deciding")]
    component: Option<String>,

    #[arg(long, help = "Preview the bump without writing the version file")]
    dry_run: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn run(args: Args) -> Result<()> {
    // flags win over the environment
    let overrides = ConfigOverrides {
        baseline: args.baseline,
        package_dirs: args.package_dirs,
        version_file: args.version_file,
    }
    .or(ConfigOverrides::from_env());
    let config = config::resolve_config(args.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Not in a git repository: {}", args.repo.display()))?;
    let workdir = repo.workdir()?.to_path_buf();

    let bumper = VersionBumper::new(&repo, config, workdir);

    let outcome = match args.component.as_deref() {
        Some(component) if args.dry_run => bumper.preview_bump(component)?,
        Some(component) => bumper.bump_version(component)?,
        None => {
            ui::display_status(&format!(
                "Comparing working tree against '{}'",
                bumper.config().baseline
            ));
            if args.dry_run {
                bumper.run_dry()?
            } else {
                bumper.run()?
            }
        }
    };

    ui::display_outcome(&outcome, args.dry_run);
    Ok(())
}
