use std::io;
use std::process::ExitCode;

use clap::Parser;
use toolbin::cli::choose::{self, ChooseArgs};
use toolbin::cli::{finish, run_selftest};
use toolbin::selftest;

fn main() -> ExitCode {
    let args = ChooseArgs::parse();

    let result = if args.test {
        run_selftest(&selftest::choose_checks(), &mut io::stdout()).map_err(Into::into)
    } else {
        choose::run(
            args,
            io::stdin().lock(),
            &mut rand::rng(),
            &mut io::stdout().lock(),
            &mut io::stderr(),
        )
    };

    finish(result)
}
