//! A command-line front-end for the library.
//!
//! Reads a formula from an argument or a file, translates it, prints a summary of the automaton, and optionally evaluates traces against it.
//!
//! Exit codes: 0 on success, 1 on a parse failure (formula or trace), 2 on a translation failure, 3 on an IO failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use marten_dfa::config::{Config, EnumerationStrategy};
use marten_dfa::context::Context;
use marten_dfa::dfa::SymbolicDfa;
use marten_dfa::procedures::explore::{BddStrategy, CompositionalStrategy, NaiveStrategy};
use marten_dfa::structures::trace::Letter;
use marten_dfa::types::err::{ErrorKind, ParseError};

/// Which logic the input formula is written in.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Logic {
    /// Linear dynamic logic on finite traces.
    Ldlf,
    /// Linear temporal logic on finite traces.
    Ltlf,
}

/// Which translation strategy to run.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyChoice {
    /// Letter enumeration with naive model enumeration.
    Naive,
    /// Letter enumeration with SAT-based model enumeration.
    Sat,
    /// Symbolic exploration over decision diagram cubes.
    Bdd,
    /// Symbolic exploration with shared diagram construction.
    Compositional,
}

/// Compile LDLf/LTLf formulas to minimal symbolic DFAs.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The formula to translate.
    #[arg(required_unless_present = "file")]
    formula: Option<String>,

    /// Read the formula from a file instead.
    #[arg(long, conflicts_with = "formula")]
    file: Option<PathBuf>,

    /// The logic of the formula.
    #[arg(long, value_enum, default_value = "ldlf")]
    logic: Logic,

    /// The translation strategy.
    #[arg(long, value_enum, default_value = "bdd")]
    strategy: StrategyChoice,

    /// A trace to evaluate: letters separated by ';', atom names by whitespace. May repeat.
    #[arg(long)]
    trace: Vec<String>,

    /// The state budget, as a count of state bits.
    #[arg(long)]
    max_state_bits: Option<u32>,

    /// A time limit for the translation, in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let source = match &args.file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => contents.trim().to_owned(),
            Err(e) => {
                eprintln!("cannot read {}: {e}", path.display());
                return ExitCode::from(3);
            }
        },
        None => args.formula.clone().expect("clap guarantees a formula"),
    };

    let mut config = Config::default();
    if let Some(bits) = args.max_state_bits {
        config.max_state_bits = bits;
    }
    if let Some(millis) = args.time_limit_ms {
        config.time_limit = std::time::Duration::from_millis(millis);
    }
    if let StrategyChoice::Sat = args.strategy {
        config.enumeration = EnumerationStrategy::Sat;
    }

    let dfa = match translate(&source, &args, config) {
        Ok(dfa) => dfa,
        Err(ErrorKind::Parse(e)) => {
            eprintln!("{}", ErrorKind::Parse(e));
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    println!("{dfa}");

    for trace_text in &args.trace {
        let trace = match read_trace(&dfa, trace_text) {
            Ok(trace) => trace,
            Err(e) => {
                eprintln!("{}", ErrorKind::Parse(e));
                return ExitCode::from(1);
            }
        };
        let verdict = if dfa.accepts(&trace) { "accepted" } else { "rejected" };
        println!("trace '{trace_text}': {verdict}");
    }

    ExitCode::SUCCESS
}

fn translate(source: &str, args: &Args, config: Config) -> Result<SymbolicDfa, ErrorKind> {
    let mut ctx = Context::from_config(config);

    let formula = match args.logic {
        Logic::Ldlf => ctx.parse_ldlf(source)?,
        Logic::Ltlf => {
            let ltlf = ctx.parse_ltlf(source)?;
            ctx.ltlf_to_ldlf(ltlf)
        }
    };

    match args.strategy {
        StrategyChoice::Naive | StrategyChoice::Sat => ctx.to_dfa_with(formula, NaiveStrategy),
        StrategyChoice::Bdd => ctx.to_dfa_with(formula, BddStrategy::new()),
        StrategyChoice::Compositional => ctx.to_dfa_with(formula, CompositionalStrategy),
    }
}

/// Letters separated by ';', atom names by whitespace. Names outside the alphabet are ignored.
fn read_trace(dfa: &SymbolicDfa, text: &str) -> Result<Vec<Letter>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::default());
    }

    let mut letters = Vec::default();
    for letter_text in text.split(';') {
        let names = letter_text.split_whitespace().collect::<Vec<_>>();
        for name in &names {
            let well_formed = name
                .chars()
                .all(|character| character.is_alphanumeric() || character == '_');
            if !well_formed {
                return Err(ParseError::Trace(format!("'{name}' is not an atom name")));
            }
            if dfa.atom_index(name).is_none() {
                log::warn!("atom '{name}' is not in the alphabet; ignored");
            }
        }
        letters.push(dfa.letter(&names));
    }
    Ok(letters)
}
