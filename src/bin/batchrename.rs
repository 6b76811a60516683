use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use toolbin::cli::batchrename::{self, BatchRenameArgs};
use toolbin::cli::{finish, run_selftest};
use toolbin::{selftest, util, Config};

fn main() -> ExitCode {
    let mut args = BatchRenameArgs::parse();

    if args.test {
        return finish(
            run_selftest(&selftest::rename_checks(), &mut io::stdout()).map_err(Into::into),
        );
    }

    let Some(rule) = args.rule.take() else {
        BatchRenameArgs::command()
            .error(
                clap::error::ErrorKind::MissingSubcommand,
                "a rename rule is required (regex, replace, case or number)",
            )
            .exit()
    };

    util::logging::init(args.verbose);
    util::init_config_path(args.config.clone());

    finish(Config::load().map_err(Into::into).and_then(|config| {
        batchrename::run(
            args,
            rule,
            &config.batchrename,
            io::stdin().lock(),
            &mut io::stdout().lock(),
            &mut io::stderr(),
        )
    }))
}
