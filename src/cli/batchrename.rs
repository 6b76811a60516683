//! `batchrename` arguments and run loop

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::Outcome;
use crate::config::RenameDefaults;
use crate::rename::{
    self, CaseStyle, FsProbe, Numbering, PathSource, RenameError, RenameRule, RenumberGroup,
};

/// Batch rename files in a directory or directory tree
///
/// Unless files or a glob are given, walks the tree rooted at the current
/// directory. Only the final filename component of each path is changed.
#[derive(Parser, Debug)]
#[command(name = "batchrename", version)]
#[command(subcommand_required = false, arg_required_else_help = true)]
pub struct BatchRenameArgs {
    /// Print the renames that would happen instead of performing them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Walk the directory tree rooted here when no files or glob are given
    #[arg(short, long, value_name = "DIR_PATH", default_value = ".", global = true)]
    pub walk: PathBuf,

    /// Glob selecting the paths to examine; overrides --walk
    #[arg(short, long, global = true)]
    pub glob: Option<String>,

    /// Verbose mode (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Run built-in self-tests. Must be the only argument.
    #[arg(long, exclusive = true)]
    pub test: bool,

    /// Rename rule
    #[command(subcommand)]
    pub rule: Option<RuleCommand>,
}

/// Rename rules
#[derive(Subcommand, Debug, Clone)]
pub enum RuleCommand {
    /// Substitute a regular expression
    ///
    /// The replacement can reference groups with \N or \g<name>. Use {n} for
    /// renumbering in processing order or from --renumber-group, and {{}n}
    /// for a literal {n}.
    Regex {
        /// Filename regular expression pattern to match
        pattern: String,
        /// Replacement string
        replacement: String,
        /// Files to rename; `-` reads names from standard input
        #[arg(value_name = "FILE")]
        files: Vec<String>,
        /// Ignore uppercase/lowercase distinctions
        #[arg(short, long)]
        ignore_case: bool,
        /// Digits to pad {n} to (3 turns 1 into 001)
        #[arg(short, long, value_name = "Z")]
        zero_pad: Option<usize>,
        /// Renumber from an integer match group, offset with + or - (e.g. 2-10)
        #[arg(short = 'm', long, value_name = "MATCH_GROUP")]
        renumber_group: Option<String>,
        /// First number when renumbering in processing order
        #[arg(short = 'r', long, value_name = "FIRST", allow_negative_numbers = true)]
        renumber_from: Option<i64>,
    },
    /// Replace every occurrence of a literal substring
    Replace {
        /// Text to find
        from: String,
        /// Text to put in its place
        to: String,
        /// Files to rename; `-` reads names from standard input
        #[arg(value_name = "FILE")]
        files: Vec<String>,
        /// Ignore uppercase/lowercase distinctions
        #[arg(short, long)]
        ignore_case: bool,
    },
    /// Change the case of the whole filename
    Case {
        #[arg(value_enum)]
        style: CaseStyle,
        /// Files to rename; `-` reads names from standard input
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },
    /// Rename to a numbered template using {n}, {name}, {stem} and {ext}
    Number {
        /// Name template, e.g. "photo-{n}.{ext}"
        template: String,
        /// Files to rename; `-` reads names from standard input
        #[arg(value_name = "FILE")]
        files: Vec<String>,
        /// Digits to pad {n} to
        #[arg(short, long, value_name = "Z")]
        zero_pad: Option<usize>,
        /// First number
        #[arg(short = 'r', long, value_name = "FIRST", allow_negative_numbers = true)]
        renumber_from: Option<i64>,
    },
}

impl RuleCommand {
    /// Build the rule and split off its file arguments
    pub fn into_rule(
        self,
        defaults: &RenameDefaults,
    ) -> Result<(RenameRule, Vec<String>), RenameError> {
        let numbering = |zero_pad: Option<usize>, start: Option<i64>| Numbering {
            start: start.unwrap_or(defaults.renumber_from),
            zero_pad: zero_pad.unwrap_or(defaults.zero_pad),
        };

        match self {
            RuleCommand::Regex {
                pattern,
                replacement,
                files,
                ignore_case,
                zero_pad,
                renumber_group,
                renumber_from,
            } => {
                let group = renumber_group
                    .as_deref()
                    .map(str::parse::<RenumberGroup>)
                    .transpose()?;
                let rule = RenameRule::regex(
                    &pattern,
                    &replacement,
                    ignore_case,
                    numbering(zero_pad, renumber_from),
                    group,
                )?;
                Ok((rule, files))
            }
            RuleCommand::Replace {
                from,
                to,
                files,
                ignore_case,
            } => Ok((RenameRule::replace(&from, &to, ignore_case)?, files)),
            RuleCommand::Case { style, files } => Ok((RenameRule::case(style), files)),
            RuleCommand::Number {
                template,
                files,
                zero_pad,
                renumber_from,
            } => Ok((
                RenameRule::number(&template, numbering(zero_pad, renumber_from)),
                files,
            )),
        }
    }
}

/// Plan, then preview or apply, the renames requested by `args`.
///
/// Rule and path errors abort before anything is renamed.
pub fn run<R, O, E>(
    args: BatchRenameArgs,
    rule: RuleCommand,
    defaults: &RenameDefaults,
    stdin: R,
    out: &mut O,
    err: &mut E,
) -> Result<Outcome>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let (rule, files) = rule.into_rule(defaults)?;
    let source = PathSource::select(files, args.glob, args.walk);
    let paths = source
        .collect_paths(stdin)
        .context("failed to collect paths")?;
    tracing::debug!(count = paths.len(), "Collected paths");

    let mut plan = rename::plan(&paths, &rule, &FsProbe)?;
    if args.dry_run {
        rename::preview(&plan, out)?;
    } else {
        rename::apply(&mut plan, &FsProbe);
    }
    rename::report(&plan, err)?;

    let summary = plan.summary();
    tracing::info!(
        renamed = if args.dry_run { summary.pending } else { summary.applied },
        skipped = summary.skipped,
        conflicts = summary.conflicts,
        failed = summary.failed,
        dry_run = args.dry_run,
        "Batch rename finished"
    );

    Ok(if summary.has_errors() {
        Outcome::Failure
    } else {
        Outcome::Success
    })
}
