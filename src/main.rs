//! mtm CLI application entry point
//!
//! A command-line front-end for the mtm tag index: collections, tags, file
//! associations, intersection search and folder reconciliation.
//!
//! # Usage
//!
//! ```bash
//! # Group tags into collections
//! mtm collection create Work
//! mtm tag create Urgent --collection Work
//!
//! # Tag a file, then find it again
//! mtm file tag docs/report.txt Urgent
//! mtm search urgent
//!
//! # What in this folder has not been tagged yet?
//! mtm folder untagged ~/inbox
//!
//! # Ask for a tag per entry (SKIP to skip, END to stop)
//! mtm folder tag-each ~/inbox
//!
//! # Scripting
//! mtm -q search work urgent
//! mtm --json tag list
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/mtm/config.toml` on Linux and from
//! `MTM_*` environment variables (`MTM_DATABASE` selects the index).
//! `RUST_LOG` overrides the configured log level.

use env_logger::{Env, Target};
use log::debug;
use std::io;
use std::process::ExitCode;

use mtm::{
    MtmError,
    cli::{Cli, Commands, generate_completions},
    commands::{Session, execute},
    config::MtmConfig,
    db::Database,
    discovery::{DirScanner, FsMover},
    output::{OutputMode, format_error, print_outcome},
    prompt::ConsolePrompt,
};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let mode = OutputMode::from_flags(cli.quiet, cli.json);

    match run(cli, mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mode: OutputMode) -> Result<(), MtmError> {
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let config = MtmConfig::load()?;
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Stderr)
        .init();

    let mode = if config.quiet && mode == OutputMode::Normal {
        OutputMode::Quiet
    } else {
        mode
    };

    let Some(command) = cli.command.into_command() else {
        return Ok(());
    };

    let db_path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    debug!("opening index at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let mut prompt = ConsolePrompt::new();
    let mut session = Session {
        db: &db,
        scanner: &DirScanner,
        mover: &FsMover,
        prompt: &mut prompt,
    };

    let outcome = execute(&mut session, command)?;
    print_outcome(&outcome, mode)
}
