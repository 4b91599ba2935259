//! Indexes a directory tree and prints goto suggestions for each query.
//!
//! Usage: `cargo run --bin goto -- <root> <query>...`

use std::process::ExitCode;

use goto_index::{GotoConfig, GotoIndex};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(root) = args.next() else {
        eprintln!("usage: goto <root> <query>...");
        return ExitCode::FAILURE;
    };

    let index = match GotoIndex::new(GotoConfig::default()) {
        Ok(index) => index,
        Err(error) => {
            eprintln!("goto: {error}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(error) = index.rebuild_blocking(&root) {
        eprintln!("goto: cannot index {root}: {error}");
        return ExitCode::FAILURE;
    }

    let status = index.status();
    println!(
        "indexed {} directories ({} entries) under {}",
        status.nodes, status.entries, root
    );

    for query in args {
        println!("> {query}");
        for row in index.suggestions(&query).rows() {
            println!("  {row}");
        }
    }
    ExitCode::SUCCESS
}
