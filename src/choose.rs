//! Uniform random choice among inputs

use std::io::BufRead;

use rand::seq::IndexedRandom;
use rand::{CryptoRng, Rng};

/// Pick one element uniformly at random; `None` when `items` is empty
pub fn choose<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + CryptoRng + ?Sized,
{
    items.choose(rng)
}

/// Use the arguments, or stdin lines when there are none or only `-`
pub fn collect_choices<R: BufRead>(args: Vec<String>, stdin: R) -> std::io::Result<Vec<String>> {
    if !args.is_empty() && args != ["-"] {
        return Ok(args);
    }
    let mut choices = Vec::new();
    for line in stdin.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            choices.push(line.to_string());
        }
    }
    Ok(choices)
}
