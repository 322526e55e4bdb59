//! Run a network of comparator bots from an instruction file.
//!
//! Prints the bot responsible for comparing the goal pair, along with the
//! product of the values that reached the requested outputs.

use answer::Answers;
use anyhow::{Context, Result};
use clap::Parser;
use sortnet_core::{Goal, Network, instr};
use std::{fs, path::PathBuf};

mod answer;

#[derive(Parser)]
#[command(
    name = "sortnet",
    version,
    about = "Route values through a network of comparator bots"
)]
struct Cli {
    /// Path to the instruction file.
    input: PathBuf,
    /// One value of the goal pair.
    a: u64,
    /// The other value of the goal pair.
    b: u64,
    /// Outputs whose values are multiplied together for the second answer.
    #[arg(long, num_args = 1.., default_values_t = [0u32, 1, 2])]
    product: Vec<u32>,
    /// Print a JSON report rather than plain answers.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("read {}", cli.input.display()))?;
    let instrs = instr::parse_lines(&text)
        .with_context(|| format!("parse {}", cli.input.display()))?;
    log::info!("parsed {} instruction(s)", instrs.len());

    let goal = Goal::new(cli.a, cli.b);
    let mut net = Network::new(goal);
    net.apply_all(instrs).context("build network")?;
    let drained = net.drain().context("drain network")?;

    let answers = Answers::new(&drained, &cli.product)?;
    if cli.json {
        let json = serde_json::to_string_pretty(&answers).context("serialize report")?;
        println!("{json}");
    } else {
        print!("{answers}");
    }
    Ok(())
}
