use std::io;
use std::process::ExitCode;

use clap::Parser;
use toolbin::cli::genpasswd::{self, GenPasswdArgs};
use toolbin::cli::{finish, run_selftest};
use toolbin::{selftest, util, Config};

fn main() -> ExitCode {
    let args = GenPasswdArgs::parse();

    if args.test {
        return finish(
            run_selftest(&selftest::passwd_checks(), &mut io::stdout()).map_err(Into::into),
        );
    }

    util::logging::init(args.verbose);
    util::init_config_path(args.config.clone());

    finish(Config::load().map_err(Into::into).and_then(|config| {
        genpasswd::run(
            &args,
            &config.genpasswd,
            &mut rand::rng(),
            &mut io::stdout().lock(),
        )
    }))
}
