//! CLI entry point for the process-tree tool.

use std::process;

use canopy::procs::{self, Pid, ProcFs};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "taproot")]
#[command(about = "Process-tree ancestry queries over the live process table")]
#[command(version)]
struct Args {
    /// Root of the process subtree to test membership against
    #[arg(
        value_name = "ROOT_PROCESS",
        required_unless_present_any = ["bcp", "bop"],
        conflicts_with_all = ["bcp", "bop"]
    )]
    root_process: Option<Pid>,

    /// Process whose ancestor chain is walked
    #[arg(
        value_name = "PROCESS_ID",
        required_unless_present_any = ["bcp", "bop"],
        conflicts_with_all = ["bcp", "bop"]
    )]
    process_id: Option<Pid>,

    /// After the membership check, print the descendant count of PROCESS_ID
    #[arg(long, requires = "process_id")]
    cnt: bool,

    /// Count processes under the shell that launched this one
    #[arg(long, conflicts_with = "cnt")]
    bcp: bool,

    /// Count processes across all shells (the shells themselves excluded)
    #[arg(long, conflicts_with_all = ["cnt", "bcp"])]
    bop: bool,
}

fn main() {
    let args = Args::parse();
    let table = ProcFs;

    if args.bcp {
        let me = process::id() as Pid;
        let Some(shell) = procs::shell_ancestor(&table, me) else {
            eprintln!("taproot: cannot locate the current shell ancestor");
            process::exit(1);
        };
        println!("{}", procs::count_descendants(&table, shell));
        return;
    }

    if args.bop {
        let (shells, count) = procs::shell_population(&table);
        for pid in &shells {
            println!("Found bash process: {}", pid);
        }
        println!("{}", count);
        return;
    }

    // clap guarantees both positionals are present in this form.
    let (Some(root), Some(pid)) = (args.root_process, args.process_id) else {
        eprintln!("taproot: missing root_process or process_id");
        process::exit(2);
    };
    if root < 0 || pid < 0 {
        eprintln!("taproot: process ids must be non-negative");
        process::exit(2);
    }

    if procs::in_subtree(&table, pid, root) {
        println!("{} {}", pid, root);
    } else {
        println!(
            "Process {} does not belong to the process subtree rooted at {}",
            pid, root
        );
        process::exit(1);
    }

    if args.cnt {
        println!("{}", procs::count_descendants(&table, pid));
    }
}
