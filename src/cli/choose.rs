//! `choose` arguments and run loop

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use rand::{CryptoRng, Rng};

use super::Outcome;

/// Choose a random input
#[derive(Parser, Debug)]
#[command(name = "choose", version)]
pub struct ChooseArgs {
    /// Inputs to choose from; none or `-` reads lines from standard input
    #[arg(value_name = "CHOICE")]
    pub choices: Vec<String>,

    /// Run built-in self-tests. Must be the only argument.
    #[arg(long, exclusive = true)]
    pub test: bool,
}

/// Print one uniformly chosen input to `out`
pub fn run<R, O, G, E>(
    args: ChooseArgs,
    stdin: R,
    rng: &mut G,
    out: &mut O,
    err: &mut E,
) -> Result<Outcome>
where
    R: BufRead,
    O: Write,
    E: Write,
    G: Rng + CryptoRng + ?Sized,
{
    let choices = crate::choose::collect_choices(args.choices, stdin)?;
    match crate::choose::choose(&choices, rng) {
        Some(choice) => {
            writeln!(out, "{choice}")?;
            Ok(Outcome::Success)
        }
        None => {
            writeln!(err, "nothing to choose from")?;
            Ok(Outcome::Failure)
        }
    }
}
