//! CLI entry point for the directory tool.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use canopy::ops::{copy, count, list, prune, search};
use canopy::output::{self, Printer};
use canopy::sandbox::Sandbox;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "Directory-tree operations confined to an allowed root")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Output in JSON format
    #[arg(long = "json", global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List immediate-child regular files, newest modification first
    Flist { dir: PathBuf },

    /// Count immediate-child files per extension suffix (one to three),
    /// directory last
    Tcount {
        #[arg(value_name = "EXT|DIR", num_args = 2..=4)]
        args: Vec<String>,
    },

    /// Recursively print every file with the given exact name
    Srchf {
        filename: String,
        root_dir: PathBuf,
    },

    /// Count directories under the root, the root included
    Dircnt { root_dir: PathBuf },

    /// Total bytes across all regular files under the root
    Sumfilesize { root_dir: PathBuf },

    /// List all files recursively, largest first
    Lfsize { dir: PathBuf },

    /// List all non-writable files recursively, in path order
    Nonwr { dir: PathBuf },

    /// Copy a directory tree into the destination directory
    Copyd {
        source_dir: PathBuf,
        destination_dir: PathBuf,
    },

    /// Copy a directory tree, then delete the source
    Dmove {
        source_dir: PathBuf,
        destination_dir: PathBuf,
    },

    /// Delete all files with the given extension suffix, recursively
    Remd { root_dir: PathBuf, extension: String },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("canopy: {}", message);
    process::exit(1);
}

/// Canonicalize and confine one path argument; errors are fatal.
fn resolve(sandbox: &Sandbox, raw: &Path) -> PathBuf {
    match sandbox.resolve(raw) {
        Ok(path) => path,
        Err(err) => fail(err),
    }
}

/// Shared validation for copyd/dmove: both paths resolved, neither the
/// boundary itself, both existing directories.
fn resolve_copy_args(sandbox: &Sandbox, src: &Path, dst: &Path) -> (PathBuf, PathBuf) {
    let src = resolve(sandbox, src);
    let dst = resolve(sandbox, dst);
    if sandbox.is_boundary(&src) || sandbox.is_boundary(&dst) {
        fail("source and destination cannot be the allowed root itself");
    }
    if !src.is_dir() {
        fail(format!("'{}' is not a directory", src.display()));
    }
    if !dst.is_dir() {
        fail(format!("'{}' is not a directory", dst.display()));
    }
    (src, dst)
}

fn main() {
    let args = Args::parse();
    let use_color = should_use_color(args.color);
    let sandbox = match Sandbox::from_env() {
        Ok(sandbox) => sandbox,
        Err(err) => fail(err),
    };
    let mut printer = Printer::new(use_color);

    if let Err(err) = run(args.command, args.json, &sandbox, &mut printer) {
        fail(err);
    }
}

fn run(command: Command, json: bool, sandbox: &Sandbox, printer: &mut Printer) -> io::Result<()> {
    match command {
        Command::Flist { dir } => {
            let root = resolve(sandbox, &dir);
            let items = list::list_recent(&root)?;
            if json {
                output::print_json(&output::items_json(&items))
            } else {
                printer.paths(&items)
            }
        }

        Command::Tcount { args } => {
            // The directory is always the trailing argument.
            let Some((dir, extensions)) = args.split_last() else {
                fail("tcount requires one to three extensions and a directory");
            };
            let root = resolve(sandbox, Path::new(dir));
            let counts = count::count_by_extension(&root, extensions)?;
            if json {
                output::print_json(&counts)
            } else {
                for entry in &counts {
                    printer.summary(&format!("{} count", entry.extension), entry.count)?;
                }
                Ok(())
            }
        }

        Command::Srchf { filename, root_dir } => {
            let root = resolve(sandbox, &root_dir);
            if json {
                let mut matches = Vec::new();
                let found = search::search_file(&root, &filename, |path| {
                    matches.push(path.display().to_string());
                    Ok(())
                })?;
                output::print_json(&json!({
                    "target": filename,
                    "found": found,
                    "matches": matches,
                }))
            } else {
                let found = search::search_file(&root, &filename, |path| {
                    printer.line(&path.display().to_string())
                })?;
                if !found {
                    eprintln!("Not found: {}", filename);
                }
                Ok(())
            }
        }

        Command::Dircnt { root_dir } => {
            let root = resolve(sandbox, &root_dir);
            let dirs = count::count_dirs(&root)?;
            if json {
                output::print_json(&json!({ "directories": dirs }))
            } else {
                printer.summary("Directory count", dirs)
            }
        }

        Command::Sumfilesize { root_dir } => {
            let root = resolve(sandbox, &root_dir);
            let total = count::sum_file_sizes(&root)?;
            if json {
                output::print_json(&json!({ "total_bytes": total }))
            } else {
                printer.summary("Total file size (bytes)", total)
            }
        }

        Command::Lfsize { dir } => {
            let root = resolve(sandbox, &dir);
            let items = list::list_by_size(&root)?;
            if json {
                output::print_json(&output::items_json(&items))
            } else {
                printer.sized(&items)
            }
        }

        Command::Nonwr { dir } => {
            let root = resolve(sandbox, &dir);
            let items = list::list_non_writable(&root)?;
            if json {
                output::print_json(&output::items_json(&items))
            } else {
                printer.paths(&items)
            }
        }

        Command::Copyd {
            source_dir,
            destination_dir,
        } => {
            let (src, dst) = resolve_copy_args(sandbox, &source_dir, &destination_dir);
            let report = copy::copy_tree(&src, &dst)?;
            if report.failures > 0 {
                eprintln!("canopy: warning: copy failures: {}", report.failures);
            }
            if json {
                output::print_json(&report)
            } else {
                printer.summary("Copied dirs", report.dirs)?;
                printer.summary("Copied files", report.files)
            }
        }

        Command::Dmove {
            source_dir,
            destination_dir,
        } => {
            let (src, dst) = resolve_copy_args(sandbox, &source_dir, &destination_dir);
            let report = copy::copy_tree(&src, &dst)?;
            if report.failures > 0 {
                eprintln!("canopy: warning: copy failures: {}", report.failures);
            }
            if !json {
                printer.summary("Copied dirs", report.dirs)?;
                printer.summary("Copied files", report.files)?;
            }
            let removal = copy::remove_tree(&src)?;
            if json {
                output::print_json(&json!({ "copy": report, "removal": removal }))
            } else {
                printer.line("Move done (source removed).")
            }
        }

        Command::Remd {
            root_dir,
            extension,
        } => {
            let root = resolve(sandbox, &root_dir);
            let report = prune::remove_by_extension(&root, &extension)?;
            if json {
                output::print_json(&report)
            } else {
                printer.summary(
                    &format!("Removed files with extension {}", extension),
                    report.removed,
                )
            }
        }
    }
}
