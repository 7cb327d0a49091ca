//! lockfmt: validate and canonicalize lock files.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lockfile_codec::{format, Limits, LockError, LockFile, LockResult, WriteOutcome};
use serde::Serialize;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "lockfmt")]
#[command(about = "Validate and canonicalize package lock files", long_about = None)]
#[command(version)]
struct Cli {
    /// Apply tight resource limits for files of unknown origin
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a lock file and print a JSON summary
    Check {
        /// Lock file to read; stdin when omitted
        path: Option<PathBuf>,
    },

    /// Rewrite a lock file in canonical form
    Format {
        /// Lock file to rewrite in place; stdin to stdout when omitted
        path: Option<PathBuf>,

        /// Only report whether the input is already canonical
        #[arg(long)]
        check: bool,
    },
}

/// Outcome of `check`, printed as `{"ok":{...}}` or `{"err":{...}}`.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Report {
    Ok(Summary),
    Err(Failure),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    version: Option<u32>,
    targets: usize,
    libraries: usize,
    project_file_dependency_groups: usize,
    package_folders: usize,
}

impl From<&LockFile> for Summary {
    fn from(lock_file: &LockFile) -> Self {
        Self {
            version: lock_file.version,
            targets: lock_file.targets.len(),
            libraries: lock_file.libraries.len(),
            project_file_dependency_groups: lock_file.project_file_dependency_groups.len(),
            package_folders: lock_file.package_folders.len(),
        }
    }
}

#[derive(Serialize)]
struct Failure {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u64>,
}

impl From<&LockError> for Failure {
    fn from(err: &LockError) -> Self {
        Self {
            kind: err.name(),
            message: err.to_string(),
            position: err.position(),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let limits = if cli.strict {
        Limits::strict()
    } else {
        Limits::standard()
    };

    match cli.command {
        Commands::Check { path } => check(path.as_deref(), limits),
        Commands::Format { path, check } => {
            match format_command(path.as_deref(), check, limits) {
                Ok(code) => code,
                Err(err) => {
                    eprintln!("lockfmt: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Enable log output when `LOCKFMT_LOG` holds a filter directive.
fn init_tracing() {
    let Ok(directive) = std::env::var("LOCKFMT_LOG") else {
        return;
    };
    match tracing_subscriber::EnvFilter::try_new(&directive) {
        Ok(env_layer) => {
            let format_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr);
            tracing_subscriber::registry()
                .with(env_layer)
                .with(format_layer)
                .init();
        }
        Err(err) => eprintln!("lockfmt: ignoring invalid LOCKFMT_LOG {directive:?}: {err}"),
    }
}

fn check(path: Option<&Path>, limits: Limits) -> ExitCode {
    let result = match path {
        Some(path) => format::read_path(path, limits),
        None => format::read_with_limits(io::stdin().lock(), limits),
    };
    let (report, code) = match &result {
        Ok(lock_file) => (Report::Ok(lock_file.into()), ExitCode::SUCCESS),
        Err(err) => (Report::Err(err.into()), ExitCode::FAILURE),
    };

    match serde_json::to_string(&report) {
        Ok(line) => println!("{line}"),
        Err(err) => {
            eprintln!("lockfmt: failed to encode report: {err}");
            return ExitCode::FAILURE;
        }
    }
    code
}

fn format_command(path: Option<&Path>, check_only: bool, limits: Limits) -> LockResult<ExitCode> {
    let input = match path {
        Some(path) => fs::read(path)?,
        None => {
            let mut input = Vec::new();
            io::stdin().lock().read_to_end(&mut input)?;
            input
        }
    };
    let lock_file = format::read_with_limits(input.as_slice(), limits)?;
    let canonical = format::to_vec(&lock_file)?;

    if check_only {
        if canonical == input {
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!(
            "lockfmt: {} is not in canonical form",
            path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
        );
        return Ok(ExitCode::FAILURE);
    }

    match path {
        Some(path) => {
            if format::write_path(&lock_file, path)? == WriteOutcome::Unchanged {
                tracing::info!(path = %path.display(), "already canonical");
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&canonical)?;
            stdout.flush()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
