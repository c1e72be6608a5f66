// The resolvent CLI.
// Reads a sequent from argv or stdin, prints the normalization and
// resolution trace, and exits 0 (proved), 5 (unproved), or 2 (a parse
// error or an aborted run).

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use resolvent::config::ProverConfig;
use resolvent::interfaces::prove;
use resolvent::parser::parse_sequent;
use resolvent::prover::Outcome;

#[derive(Parser)]
struct Args {
    // The sequent to prove, e.g. "p_foo(x) |- p_foo(x)".
    // Read from stdin if omitted.
    #[clap()]
    sequent: Option<String>,

    // A YAML file of resource ceilings (max_steps, max_depth).
    #[clap(long)]
    config: Option<PathBuf>,

    // Suppress the normalization trace, printing only clauses and steps.
    #[clap(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let input = match args.sequent {
        Some(s) => s,
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("failed to read stdin: {}", e);
                std::process::exit(2);
            }
            buf
        }
    };

    let sequent = match parse_sequent(input.trim()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let config = match args.config {
        Some(path) => match ProverConfig::from_yaml_file(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => ProverConfig::default(),
    };

    let result = prove(&sequent, config);

    if !args.quiet {
        for step in &result.transformations {
            println!("{}", step);
        }
        println!();
    }

    println!("initial clauses:");
    for clause in &result.initial_clauses {
        println!("  {}", clause);
    }
    println!();

    println!("resolution steps:");
    for step in &result.resolution_steps {
        println!("  {}", step);
    }
    println!();

    match result.outcome {
        Outcome::Proved => {
            println!("proved");
            std::process::exit(0);
        }
        Outcome::Unproved(clauses) => {
            println!("unproved, {} clause(s) remaining:", clauses.len());
            for clause in &clauses {
                println!("  {}", clause);
            }
            std::process::exit(5);
        }
        Outcome::Aborted(reason) => {
            println!("aborted: {}", reason);
            std::process::exit(2);
        }
    }
}
