use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use git_verinfo::config;
use git_verinfo::git::GitCli;
use git_verinfo::report;
use git_verinfo::resolver::{discover_repo_info, CurrentVersionResolver};

#[derive(clap::Parser)]
#[command(
    name = "git-verinfo",
    about = "Resolve the semantic version identity of the working tree from git history"
)]
struct Args {
    #[arg(
        short,
        long,
        help = "Custom package descriptor path (verinfo.toml or Cargo.toml)"
    )]
    manifest: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Text, help = "Output format")]
    format: Format,

    #[arg(short, long, help = "CI build number (overrides BUILD_NUMBER)")]
    build_number: Option<String>,

    #[arg(short = 'C', long, help = "Run as if started in this directory")]
    directory: Option<String>,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.debug);

    if args.version {
        println!("git-verinfo {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(dir) = &args.directory {
        std::env::set_current_dir(dir)?;
    }

    // Load the package descriptor
    let package = match config::load_package(args.manifest.as_deref()) {
        Ok(package) => package,
        Err(e) => {
            report::display_error(&format!("Failed to load the package descriptor: {}", e));
            std::process::exit(1);
        }
    };

    // The CLI flag wins over the environment
    let build_number = args
        .build_number
        .clone()
        .or_else(config::build_number_from_env);

    let git = GitCli::new();
    let repo_info = discover_repo_info(&git);

    let resolver = CurrentVersionResolver::new(&git).with_build_number(build_number);
    let info = match resolver.resolve(&package, repo_info, &mut |version| {
        tracing::debug!("previous release {}", version);
    }) {
        Ok(info) => info,
        Err(e) => {
            report::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match args.format {
        Format::Text => print!("{}", report::render_text(&info)),
        Format::Json => match report::render_json(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                report::display_error(&e.to_string());
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Set up logging/tracing.
///
/// Diagnostics go to stderr so that stdout stays clean for the report.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("git_verinfo=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
