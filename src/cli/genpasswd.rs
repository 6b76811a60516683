//! `genpasswd` arguments and run loop

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{CryptoRng, Rng};

use super::Outcome;
use crate::config::PasswordDefaults;
use crate::passwd::{self, CharClass, CharClassSet, PasswordSpec};

/// Generate random passwords, or passphrases in the style of https://xkcd.com/936/
///
/// Without class flags every class (lower, upper, digits, symbols) is
/// required. Each password contains at least one character of every
/// required class.
#[derive(Parser, Debug)]
#[command(name = "genpasswd", version)]
pub struct GenPasswdArgs {
    /// Password length in characters
    #[arg(short, long, value_name = "N")]
    pub length: Option<usize>,

    /// Require lowercase letters
    #[arg(long)]
    pub lower: bool,

    /// Require uppercase letters
    #[arg(long)]
    pub upper: bool,

    /// Require digits
    #[arg(long)]
    pub digits: bool,

    /// Require ASCII punctuation
    #[arg(long)]
    pub symbols: bool,

    /// Number of passwords to print, one per line
    #[arg(short, long, value_name = "N")]
    pub count: Option<usize>,

    /// Generate a passphrase of dictionary words instead
    #[arg(short, long, conflicts_with_all = ["length", "lower", "upper", "digits", "symbols"])]
    pub words: bool,

    /// Number of words in a passphrase
    #[arg(short = 'n', long, value_name = "N", requires = "words")]
    pub num_words: Option<usize>,

    /// Word list, one word per line
    #[arg(short = 'f', long, value_name = "FILE", requires = "words")]
    pub dict_file: Option<PathBuf>,

    /// Separator placed between passphrase words
    #[arg(short, long, value_name = "SEP", requires = "words")]
    pub separator: Option<String>,

    /// Verbose mode (-v logs entropy)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run built-in self-tests. Must be the only argument.
    #[arg(long, exclusive = true)]
    pub test: bool,
}

impl GenPasswdArgs {
    /// Classes selected on the command line, falling back to `defaults`
    pub fn classes(&self, defaults: CharClassSet) -> CharClassSet {
        let selected: CharClassSet = [
            (self.lower, CharClass::Lower),
            (self.upper, CharClass::Upper),
            (self.digits, CharClass::Digit),
            (self.symbols, CharClass::Symbol),
        ]
        .into_iter()
        .filter_map(|(on, class)| on.then_some(class))
        .collect();
        if selected.is_empty() {
            defaults
        } else {
            selected
        }
    }
}

/// Validate the request, then print passwords to `out`.
///
/// Invalid configurations fail before anything is printed.
pub fn run<O, R>(
    args: &GenPasswdArgs,
    defaults: &PasswordDefaults,
    rng: &mut R,
    out: &mut O,
) -> Result<Outcome>
where
    O: Write,
    R: Rng + CryptoRng + ?Sized,
{
    let count = args.count.unwrap_or(defaults.count);

    let lines = if args.words {
        let num_words = args.num_words.unwrap_or(defaults.num_words);
        let separator = args.separator.as_deref().unwrap_or(&defaults.separator);
        let dict_file = args.dict_file.as_ref().unwrap_or(&defaults.dict_file);
        if count == 0 {
            anyhow::bail!("invalid configuration: password count must be at least 1");
        }

        let file = File::open(dict_file)
            .with_context(|| format!("cannot open word list {}", dict_file.display()))?;
        let words = passwd::load_words(BufReader::new(file))
            .with_context(|| format!("cannot read word list {}", dict_file.display()))?;
        tracing::info!(
            words = words.len(),
            num_words,
            dict_file = %dict_file.display(),
            "Using dictionary words"
        );
        tracing::info!(
            bits = %format!("{:.2}", passwd::entropy_bits(words.len(), num_words)),
            "Entropy"
        );

        (0..count)
            .map(|_| passwd::generate_passphrase(&words, num_words, separator, rng))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        let length = args.length.unwrap_or(defaults.length);
        let spec = PasswordSpec::new(length, args.classes(defaults.classes), count)?;
        tracing::info!(
            length = spec.length(),
            classes = %spec.classes().iter().map(|c| c.as_str()).collect::<Vec<_>>().join(","),
            "Using symbols"
        );
        tracing::info!(bits = %format!("{:.2}", spec.entropy_bits()), "Entropy");
        passwd::generate_passwords(&spec, rng)
    };

    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(Outcome::Success)
}
