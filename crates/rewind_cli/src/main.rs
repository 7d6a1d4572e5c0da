//! The `rewind` command-line tool, the build-task adapter for timestamp reconciliation.
//!
//! Provides `rewind run` to reconcile a build's tracked source files against
//! the record database, and `rewind list` to inspect what the database holds.

#![warn(missing_docs)]

mod inputs;
mod list;
mod logging;
mod pipeline;
mod run;

use std::path::PathBuf;
use std::process;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use rewind_config::MAX_JOBS;

/// Suppresses rebuilds caused by timestamp-only changes.
#[derive(Parser, Debug)]
#[command(
    name = "rewind",
    version,
    about = "Rewinds timestamps of source files whose content did not change"
)]
pub struct Cli {
    /// Only report errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report recorded timestamps and computed hashes for every file.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Path to a `rewind.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile tracked files against the record database.
    Run(RunArgs),
    /// Print the records held in the database.
    List(ListArgs),
}

/// Arguments for the `rewind run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// The build-description file the tracked files belong to.
    #[arg(short, long)]
    pub project: PathBuf,

    /// Database path (default: the project file with a `.hashdb` extension).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Number of hashing workers; 0 uses one per CPU.
    #[arg(
        short,
        long,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_JOBS as u64)
    )]
    pub jobs: Option<usize>,

    /// Hash files one at a time on the main thread.
    #[arg(long)]
    pub sequential: bool,

    /// Read additional tracked paths from a file, one per line (`-` for stdin).
    #[arg(long)]
    pub files_from: Option<PathBuf>,

    /// Tracked source files.
    pub files: Vec<PathBuf>,
}

/// Arguments for the `rewind list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// The build-description file whose database to read.
    #[arg(short, long)]
    pub project: PathBuf,

    /// Database path (default: the project file with a `.hashdb` extension).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

/// Output format for `rewind list`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One aligned line per record.
    Text,
    /// A JSON array of records.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print detail-level output.
    pub verbose: bool,
    /// Optional path to a configuration file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::List(ref args) => list::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_run_with_files() {
        let cli = Cli::parse_from(["rewind", "run", "-p", "app.vcxproj", "a.c", "b.c"]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.project, PathBuf::from("app.vcxproj"));
                assert_eq!(args.files, vec![PathBuf::from("a.c"), PathBuf::from("b.c")]);
                assert!(args.db.is_none());
                assert!(args.jobs.is_none());
                assert!(!args.sequential);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_options() {
        let cli = Cli::parse_from([
            "rewind",
            "run",
            "--project",
            "app.vcxproj",
            "--db",
            "obj/app.hashdb",
            "--jobs",
            "4",
            "--sequential",
            "--files-from",
            "-",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.db, Some(PathBuf::from("obj/app.hashdb")));
                assert_eq!(args.jobs, Some(4));
                assert!(args.sequential);
                assert_eq!(args.files_from, Some(PathBuf::from("-")));
                assert!(args.files.is_empty());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_bounds_jobs() {
        let at_limit = Cli::try_parse_from(["rewind", "run", "-p", "x.proj", "--jobs", "1024"]);
        assert!(at_limit.is_ok());
        let over = Cli::try_parse_from(["rewind", "run", "-p", "x.proj", "--jobs", "1025"]);
        assert!(over.is_err());
    }

    #[test]
    fn parse_run_requires_project() {
        assert!(Cli::try_parse_from(["rewind", "run", "a.c"]).is_err());
    }

    #[test]
    fn parse_list_json() {
        let cli = Cli::parse_from(["rewind", "list", "-p", "app.vcxproj", "--format", "json"]);
        match cli.command {
            Command::List(args) => assert_eq!(args.format, ListFormat::Json),
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "rewind",
            "-v",
            "--config",
            "ci/rewind.toml",
            "list",
            "-p",
            "x.proj",
        ]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("ci/rewind.toml")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["rewind", "-q", "-v", "list", "-p", "x.proj"]).is_err());
    }
}
