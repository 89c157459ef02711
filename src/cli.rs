use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

use crate::cache::{Cache, discover_global_functions, global_function_names};
use crate::config::{Config, SESSION_ENV};
use crate::puzzle::{
    CHECK_FAILED_EXIT_CODE, FileInput, HttpInput, InputSource, PuzzleDate, check_answer,
};
use crate::utils::logger;
use crate::value::Value;
use puzzlekit_fingerprint::{Fingerprint, commutative_hash, commutative_hash_pairs, pair_hash};

#[derive(Parser, Debug)]
#[command(name = "puzzlekit", version, about = "Puzzle input, solver and memoization helpers")]
pub struct PuzzleCli {
    #[arg(long, global = true)]
    /// Puzzle year, clamped to 2015 through the current year.
    year: Option<i32>,

    #[arg(long, global = true)]
    /// Puzzle day, clamped to 1 through 25.
    day: Option<u32>,

    #[arg(long, global = true)]
    /// Print cache statistics before exiting.
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

impl PuzzleCli {
    pub const fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lists every cacheable function declared in this build.
    List,
    /// Prints pairing hashes for two integers or for two coordinates.
    Hash {
        #[arg(allow_negative_numbers = true, num_args = 2..=4)]
        values: Vec<i64>,
    },
    /// Prints the fingerprint of each string and of the whole list.
    Fingerprint { values: Vec<String> },
    /// Runs a cacheable solver on puzzle input.
    Solve {
        name: String,
        #[arg(short, long, default_value_t = 1)]
        part: i64,
        #[arg(short, long)]
        /// Read input from this file instead of downloading it.
        input: Option<PathBuf>,
    },
    /// Runs a cacheable solver and compares its answer with an expected value.
    Check {
        name: String,
        expected: String,
        #[arg(short, long, default_value_t = 1)]
        part: i64,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    logger::init_logging();
    let count = discover_global_functions()?;
    debug!(count, "cacheable functions available");

    let cli = PuzzleCli::parse();
    let mut config = Config::load()?;
    if cli.year.is_some() {
        config.year = cli.year;
    }
    if cli.day.is_some() {
        config.day = cli.day;
    }

    let cache = Cache::new();
    let outcome = match &cli.command {
        Command::List => handle_list(),
        Command::Hash { values } => handle_hash(values),
        Command::Fingerprint { values } => {
            handle_fingerprint(values);
            Ok(())
        }
        Command::Solve { name, part, input } => {
            handle_solve(&cache, &config, name, *part, input.as_deref())
        }
        Command::Check {
            name,
            expected,
            part,
            input,
        } => handle_check(&cache, &config, name, expected, *part, input.as_deref()),
    };

    if cli.stats {
        print_stats(&cache);
    }
    outcome
}

fn handle_list() -> Result<()> {
    for name in global_function_names()? {
        println!("{name}");
    }
    Ok(())
}

fn handle_hash(values: &[i64]) -> Result<()> {
    match *values {
        [x, y] => {
            println!(
                "{:>16}: {}, {}",
                "Hash",
                pair_hash(x, y),
                pair_hash(y, x)
            );
            println!(
                "{:>16}: {}, {}",
                "CommutativeHash",
                commutative_hash(x, y),
                commutative_hash(y, x)
            );
        }
        [x1, y1, x2, y2] => {
            let (first, second) = ((x1, y1), (x2, y2));
            println!(
                "{:>16}: {}, {}",
                "Hash",
                first.fingerprint(),
                second.fingerprint()
            );
            println!(
                "{:>16}: {}, {}",
                "CommutativeHash",
                commutative_hash_pairs(first, second),
                commutative_hash_pairs(second, first)
            );
        }
        _ => bail!("expected two integers or two coordinates (four integers)"),
    }
    Ok(())
}

fn handle_fingerprint(values: &[String]) {
    for value in values {
        println!("{:>20}  {value}", value.fingerprint());
    }
    let args: Vec<Value> = values.iter().map(|value| Value::from(value.as_str())).collect();
    println!(
        "{:>20}  {}",
        crate::cache::fingerprint_args(&args),
        "(argument list)".dimmed()
    );
}

fn handle_solve(
    cache: &Cache,
    config: &Config,
    name: &str,
    part: i64,
    input: Option<&Path>,
) -> Result<()> {
    let answer = solve(cache, config, name, part, input)?;
    println!("{} {answer}", format!("[{name}] part {part}:").bold());
    Ok(())
}

fn handle_check(
    cache: &Cache,
    config: &Config,
    name: &str,
    expected: &str,
    part: i64,
    input: Option<&Path>,
) -> Result<()> {
    let answer = solve(cache, config, name, part, input)?;
    let outcome = check_answer(|value: Arc<Value>| value.to_string(), answer, expected.to_string());
    let message = outcome.message(name);

    if outcome.passed() {
        println!("{}", message.green());
        Ok(())
    } else {
        println!("{}", message.red().bold());
        std::process::exit(CHECK_FAILED_EXIT_CODE);
    }
}

fn solve(
    cache: &Cache,
    config: &Config,
    name: &str,
    part: i64,
    input: Option<&Path>,
) -> Result<Arc<Value>> {
    let date = config.puzzle_date();
    let text = load_input(config, date, input)?;
    info!(function = name, %date, part, "solving");

    let args = [Value::Str(text), Value::Int(part)];
    cache
        .invoke(name, &args)
        .with_context(|| format!("failed to solve {date} with `{name}`"))
}

fn load_input(config: &Config, date: PuzzleDate, input: Option<&Path>) -> Result<String> {
    if let Some(path) = input {
        return FileInput::new(path).fetch(date);
    }
    let Some(session) = &config.session else {
        bail!("no input file given and no session configured; set {SESSION_ENV} or pass --input");
    };
    HttpInput::new(session.as_str()).fetch(date)
}

fn print_stats(cache: &Cache) {
    let stats = cache.stats();
    println!("{}", "[Cache]".bold());
    println!("{:>16}: {}", "Hits", stats.hits);
    println!("{:>16}: {}", "Misses", stats.misses);
    println!("{:>16}: {}", "Failures", stats.failures);
    println!("{:>16}: {}", "Entries", stats.entries);
    println!("{:>16}: {:.1}%", "Hit rate", stats.hit_rate());
}
