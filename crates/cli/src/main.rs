// dash13 CLI - extract, clean and merge maintenance-log report dumps

mod clean;
mod exit_codes;
mod extract;
mod run;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use dash13_io::FileClass;

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "d13")]
#[command(about = "Extract and reconcile maintenance-log records from legacy report dumps")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/dash13/d13.toml)
    #[arg(long, global = true, env = "D13_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr: -v info, -vv debug (RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract raw records from every report file of one class
    #[command(after_help = "\
Examples:
  d13 extract /data/ascii --class fau
  d13 extract /data/ascii --class act --out act.extract --rejects act.rejects
  d13 extract /data/ascii --class fau --strict")]
    Extract {
        /// Top of the directory tree holding the report dumps
        root: PathBuf,

        /// File class: fau or act (FAUACT files count as act)
        #[arg(long)]
        class: FileClass,

        /// Extract file to write (default: <output dir>/<class>.extract)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write lines that could not be tokenized to this file
        #[arg(long)]
        rejects: Option<PathBuf>,

        /// Exit 6 if any line was rejected
        #[arg(long)]
        strict: bool,
    },

    /// Reconcile an extract file: one record per event
    #[command(after_help = "\
Examples:
  d13 clean fau.extract
  d13 clean fau.extract --priority byNarr --check
  d13 clean act.extract --out act.csv --json")]
    Clean {
        /// Extract file written by `d13 extract`
        extract: PathBuf,

        /// Tie-break priority: byEventDate or byNarr (default from settings)
        #[arg(long)]
        priority: Option<String>,

        /// Write tie groups to the audit log for review
        #[arg(long)]
        check: bool,

        /// Record file to write (default: the extract path with a .csv extension)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the stage summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Extract, clean and merge both classes in one pass
    #[command(after_help = "\
Examples:
  d13 run --root /data/ascii --out-dir /data/out
  d13 --config d13.toml run --json")]
    Run {
        /// Report tree (default: [input] root)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Where fau.csv, act.csv, merged.csv and rejects.txt go (default: [output] dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Exit 6 if any line was rejected
        #[arg(long)]
        strict: bool,
    },

    /// Parse and validate a settings file
    CheckConfig {
        /// Settings file (default: --config, then the default location)
        path: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Extract {
            root,
            class,
            out,
            rejects,
            strict,
        } => extract::cmd_extract(config, root, class, out, rejects, strict),
        Commands::Clean {
            extract,
            priority,
            check,
            out,
            json,
        } => clean::cmd_clean(config, extract, priority, check, out, json),
        Commands::Run {
            root,
            out_dir,
            json,
            strict,
        } => run::cmd_run(config, root, out_dir, json, strict),
        Commands::CheckConfig { path } => {
            cmd_check_config(path.or_else(|| config.map(Path::to_path_buf)))
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_check_config(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(dash13_config::Settings::default_path);
    if !path.exists() {
        return Err(CliError::io(format!("{} does not exist", path.display()))
            .with_hint("pass a path, or create the file at the default location"));
    }
    let settings = util::load_settings(Some(&path))?;
    eprintln!("{}: ok", path.display());
    eprintln!(
        "  priority {}, check {}, page numbers <= {}, continuation <= {} tokens, delimiter {:#04x}",
        settings.clean.priority,
        settings.clean.check,
        settings.extract.page_number_max,
        settings.extract.continuation_max_tokens,
        settings.extract.delimiter,
    );
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
