//! Times one split/recover cycle and reports the process's resident memory.
use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use shamir_charset::Preset;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sss-bench", version, about = "Secret sharing benchmark")]
struct Cli {
    /// Secret to split; read from stdin when omitted
    #[arg(long)]
    secret: Option<String>,

    /// Shares needed to recover the secret
    #[arg(short, long, default_value_t = 5)]
    threshold: usize,

    /// Shares to generate
    #[arg(short = 'n', long, default_value_t = 6)]
    shares: usize,

    /// Alphabet pairing for secrets and shares
    #[arg(short, long, default_value_t = Preset::PlaintextToHex)]
    preset: Preset,
}

fn read_secret() -> Result<String> {
    print!("Enter a 10 word string : ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read the secret from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Resident set size in bytes, where the platform exposes it.
fn resident_memory() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

/// Reads the `VmRSS:  <n> kB` line of a `/proc/<pid>/status` dump.
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    println!("Software Secret Sharing Benchmark System---------------");

    let secret = match cli.secret {
        Some(secret) => secret,
        None => read_secret()?,
    };

    let start = Instant::now();
    let sharer = cli.preset.sharer();
    let shares = sharer
        .split_secret(&secret, cli.threshold, cli.shares)
        .context("failed to split the secret")?;
    println!("{shares:?}");

    let recovered = sharer
        .recover_secret(&shares)
        .context("failed to recover the secret")?;
    println!("{recovered}");
    let elapsed = start.elapsed();

    match resident_memory() {
        Some(bytes) => println!("Maximum memory requirement : {bytes}"),
        None => println!("Maximum memory requirement : unavailable"),
    }
    println!("Time Taken : {}", elapsed.as_secs_f64());
    info!(preset = %cli.preset, threshold = cli.threshold, shares = cli.shares, ?elapsed, "benchmark finished");

    ensure!(recovered == secret, "recovered secret does not match the input");
    Ok(())
}
