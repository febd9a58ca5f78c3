use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sigil_finder::{Catalog, ResolveError, ResolverConfig, SigilLibrary};

/// Find sigil images for ritual names without knowing where they live on disk.
#[derive(Debug, Parser)]
#[command(name = "sigil-finder", version, about)]
struct Cli {
    /// Use this directory instead of auto-detecting one.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Directory to start auto-detection from [default: current directory].
    #[arg(long, global = true, value_name = "DIR")]
    start: Option<PathBuf>,

    /// Configuration file [default: <start>/sigils.config.json].
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sigil directory in use.
    Dir,
    /// Print the image file for a ritual name.
    Find {
        /// Ritual name, in any casing or accentuation.
        name: String,
    },
    /// List every catalogued name with its word of power and image.
    List,
    /// Show the catalog entry for a name together with its image.
    Show {
        /// Ritual name, in any casing or accentuation.
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) if err.downcast_ref::<ResolveError>().is_some() => {
            eprintln!("configuration error: {err:#}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let start_dir = match cli.start {
        Some(dir) => anchor_at(dir, &cwd),
        None => cwd.clone(),
    };

    let config = match cli.config.map(|path| anchor_at(path, &cwd)) {
        Some(path) => ResolverConfig::from_path(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ResolverConfig::discover(&start_dir),
    };

    let mut library = SigilLibrary::new(&start_dir, &config);
    if let Some(path) = config.catalog_path(&start_dir) {
        library = library.with_catalog(Catalog::load_from_path(&path)?);
    }

    match cli.root.map(|root| anchor_at(root, &cwd)) {
        Some(root) => library
            .set_override(&root)
            .with_context(|| format!("cannot use {} as sigil directory", root.display()))?,
        None => library
            .asset_directory()
            .context("cannot resolve the sigil directory")?,
    };

    let code = match cli.command {
        Command::Dir => match library.current_directory() {
            Some(dir) => {
                println!("{}", dir.display());
                ExitCode::SUCCESS
            }
            None => {
                println!("sigil directory not detected");
                ExitCode::FAILURE
            }
        },
        Command::Find { name } => match library.find(&name) {
            Some(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            None => {
                println!("no sigil image found for {name}");
                ExitCode::FAILURE
            }
        },
        Command::List => {
            for entry in library.catalog().entries() {
                let image = library
                    .find(&entry.name)
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<24} {:<26} {}", entry.name, entry.power_word, image);
            }
            ExitCode::SUCCESS
        }
        Command::Show { name } => match library.find_ritual(&name) {
            Some(found) => {
                println!("{}", found.entry.name);
                println!("  description: {}", found.entry.description);
                println!("  word of power: {}", found.entry.power_word);
                match found.image {
                    Some(path) => println!("  sigil: {}", path.display()),
                    None => println!("  sigil: not found"),
                }
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("{name} is not in the catalog");
                ExitCode::FAILURE
            }
        },
    };

    Ok(code)
}

/// Paths given on the command line are relative to the shell, not to `--start`.
fn anchor_at(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() || path.starts_with("~") {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_arguments_follow_the_shell_directory() {
        let cwd = Path::new("/work/shell");
        assert_eq!(
            anchor_at(PathBuf::from("./seals"), cwd),
            PathBuf::from("/work/shell/./seals")
        );
        assert_eq!(anchor_at(PathBuf::from("/abs/seals"), cwd), PathBuf::from("/abs/seals"));
        assert_eq!(anchor_at(PathBuf::from("~/seals"), cwd), PathBuf::from("~/seals"));
    }

    #[test]
    fn root_flag_is_not_anchored_at_start() {
        let cli = Cli::parse_from(["sigil-finder", "--start", "/a", "--root", "b", "dir"]);
        let cwd = Path::new("/shell");
        assert_eq!(cli.start.map(|dir| anchor_at(dir, cwd)), Some(PathBuf::from("/a")));
        assert_eq!(cli.root.map(|dir| anchor_at(dir, cwd)), Some(PathBuf::from("/shell/b")));
    }
}
