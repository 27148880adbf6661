//! Command line generator: assemble a fixture and render it as a C++
//! benchmark translation unit.
//!
//! The unit goes to stdout or `--output`. The seed and corpus shape go to
//! stderr, so redirecting stdout still yields a clean compilable file and
//! an unseeded run can be reproduced from its log.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use prefixbench::{assemble, write_unit, CorpusConfig, LookupFixture};

#[derive(Parser, Debug)]
#[command(name = "prefixbench")]
#[command(about = "Generate a randomized prefix-table vs unordered_map benchmark unit")]
struct Args {
    /// RNG seed; drawn at random and echoed to stderr when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Shortest sampled key length in bytes
    #[arg(long, default_value_t = 1)]
    min_len: usize,

    /// Longest sampled key length in bytes
    #[arg(long, default_value_t = 32)]
    max_len: usize,

    /// Candidate keys to sample before prefix filtering
    #[arg(long, default_value_t = 50)]
    size: usize,

    /// C identifier naming the emitted table and its lookup symbols
    #[arg(long, default_value = "gen", value_parser = parse_c_ident)]
    table_name: String,

    /// Write the unit here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_c_ident(s: &str) -> Result<String, String> {
    let starts_ok = s
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_');
    if starts_ok && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        Ok(s.to_owned())
    } else {
        Err(format!("`{s}` is not a valid C identifier"))
    }
}

fn report(seed: u64, fixture: &LookupFixture) {
    eprintln!("{:<18}{:>8}", "seed", seed);
    eprintln!("{:<18}{:>8}", "corpus keys", fixture.corpus.len());
    eprintln!(
        "{:<18}{:>8}",
        "prefix collisions",
        fixture.prefix_collisions.len()
    );
    eprintln!("{:<18}{:>8}", "clean misses", fixture.clean_misses.len());
    if fixture.corpus.is_empty() {
        eprintln!("warning: empty corpus, the emitted table will not compile");
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let seed = match args.seed {
        Some(seed) => seed,
        None => rand::thread_rng().gen(),
    };
    let config = CorpusConfig {
        min_key_len: args.min_len,
        max_key_len: args.max_len,
        target_size: args.size,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let fixture = assemble(&mut rng, &config)?;
    report(seed, &fixture);

    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_unit(&mut out, &args.table_name, &fixture)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_unit(&mut out, &args.table_name, &fixture)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
