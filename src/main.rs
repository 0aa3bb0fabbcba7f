use clap::{Parser, Subcommand};
use polysite::{blueprint::BuildRequest, build, output, theme};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once, at startup, for clap's &'static str version
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "polysite")]
#[command(about = "Multi-tenant, locale-partitioned static site builder")]
#[command(long_about = "\
Multi-tenant, locale-partitioned static site builder

A build request is a single JSON payload: a blueprint (site name, theme,
default locale), the locale set, and raw page/post records. The builder
produces a complete static tree per hostname:

  sites/
  └── example.com/
      ├── manifest.json            # Build inventory (locales, pages, posts)
      └── public/
          ├── index.html           # Default-locale routes at the root
          ├── about/index.html
          ├── blog/launch/index.html
          ├── fr/                  # Every other locale one segment deeper
          │   ├── index.html
          │   └── about/index.html
          ├── assets/classic/      # Theme stylesheets
          ├── sitemap.xml          # All locales' canonical URLs
          ├── robots.txt
          ├── rss.xml              # Default-locale posts
          └── rss.fr.xml           # Per-locale feeds where posts exist

Content that declares no locale serves every locale; otherwise the resolver
falls back deterministically (exact locale, locale-agnostic, default locale,
first remaining variant).")]
#[command(version = version_string())]
struct Cli {
    /// Root directory holding one subtree per hostname
    #[arg(long, default_value = "sites", global = true)]
    sites_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a site from a JSON build request
    Build {
        /// Path to the build request JSON file
        #[arg(long)]
        request: PathBuf,
        /// Remove the whole site tree before building
        #[arg(long)]
        reset: bool,
        /// Max parallel route writers (omit for auto = CPU cores)
        #[arg(long)]
        max_workers: Option<usize>,
    },
    /// Remove a hostname's entire site tree
    Clean { hostname: String },
    /// List registered themes
    Themes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            request,
            reset,
            max_workers,
        } => {
            let payload = std::fs::read_to_string(&request)?;
            let req: BuildRequest = serde_json::from_str(&payload)?;

            init_thread_pool(max_workers);

            if reset {
                if let Some(hostname) = req.hostname() {
                    build::clean_site(&cli.sites_root, &hostname)?;
                }
            }

            let summary = build::build_site(&cli.sites_root, &req)?;
            output::print_build_output(&summary);
        }
        Command::Clean { hostname } => {
            build::clean_site(&cli.sites_root, &hostname)?;
            println!("Removed {}", cli.sites_root.join(hostname).display());
        }
        Command::Themes => {
            for line in output::format_theme_list(&theme::names()) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool for route writing.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(max_workers: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = max_workers.map(|n| n.min(cores)).unwrap_or(cores);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
