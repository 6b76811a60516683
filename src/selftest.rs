//! Built-in checks behind each binary's `--test` flag

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use tempfile::TempDir;

use crate::passwd::{self, CharClass, CharClassSet, PasswordError, PasswordSpec};
use crate::rename::{self, CaseStyle, FsProbe, Numbering, RenameRule};

/// A named check
pub struct Check {
    pub name: &'static str,
    pub run: fn() -> Result<()>,
}

/// Run every check, printing `ok` / `FAILED` lines. Returns whether all passed.
pub fn run_checks<W: Write>(checks: &[Check], out: &mut W) -> io::Result<bool> {
    let mut failures = 0;
    for check in checks {
        match (check.run)() {
            Ok(()) => writeln!(out, "test {} ... ok", check.name)?,
            Err(e) => {
                failures += 1;
                writeln!(out, "test {} ... FAILED: {:#}", check.name, e)?;
            }
        }
    }
    writeln!(
        out,
        "\n{} passed; {} failed",
        checks.len() - failures,
        failures
    )?;
    Ok(failures == 0)
}

pub fn rename_checks() -> Vec<Check> {
    vec![
        Check {
            name: "rename_uppercase",
            run: check_rename_uppercase,
        },
        Check {
            name: "rename_group_reference",
            run: check_rename_group_reference,
        },
        Check {
            name: "rename_renumber",
            run: check_rename_renumber,
        },
        Check {
            name: "rename_renumber_group",
            run: check_rename_renumber_group,
        },
        Check {
            name: "rename_preview_matches_apply",
            run: check_preview_matches_apply,
        },
        Check {
            name: "rename_never_overwrites",
            run: check_never_overwrites,
        },
    ]
}

pub fn passwd_checks() -> Vec<Check> {
    vec![
        Check {
            name: "passwd_lower_digit",
            run: check_passwd_lower_digit,
        },
        Check {
            name: "passwd_composition",
            run: check_passwd_composition,
        },
        Check {
            name: "passwd_too_short",
            run: check_passwd_too_short,
        },
        Check {
            name: "passwd_entropy_floor",
            run: check_passwd_entropy_floor,
        },
    ]
}

pub fn choose_checks() -> Vec<Check> {
    vec![Check {
        name: "choose_member",
        run: check_choose_member,
    }]
}

fn scratch(names: &[&str]) -> Result<(TempDir, Vec<PathBuf>)> {
    let dir = TempDir::new().context("creating scratch directory")?;
    let mut paths = Vec::new();
    for name in names {
        let path = dir.path().join(name);
        fs::write(&path, name).with_context(|| format!("creating {}", path.display()))?;
        paths.push(path);
    }
    Ok((dir, paths))
}

fn planned_names(rule: &RenameRule, names: &[&str]) -> Result<Vec<String>> {
    let plan = rename::plan(names.iter().map(PathBuf::from), rule, &NoEntries)?;
    Ok(plan
        .pending()
        .map(|op| op.destination.display().to_string())
        .collect())
}

/// Probe that sees an empty filesystem
struct NoEntries;

impl rename::PathProbe for NoEntries {
    fn exists(&self, _path: &std::path::Path) -> bool {
        false
    }

    fn same_entry(&self, a: &std::path::Path, b: &std::path::Path) -> bool {
        a == b
    }
}

fn check_rename_uppercase() -> Result<()> {
    let (dir, paths) = scratch(&["a.txt", "b.txt"])?;
    let mut plan = rename::plan(&paths, &RenameRule::case(CaseStyle::Upper), &FsProbe)?;
    let summary = rename::apply(&mut plan, &FsProbe);
    ensure!(!summary.has_errors(), "unexpected errors: {:?}", summary);
    for name in ["A.TXT", "B.TXT"] {
        ensure!(dir.path().join(name).exists(), "{} missing", name);
    }
    Ok(())
}

fn check_rename_group_reference() -> Result<()> {
    let rule = RenameRule::regex(
        r"file_(\d+)\.txt",
        r"\1-file.txt",
        false,
        Numbering::default(),
        None,
    )?;
    let names = planned_names(&rule, &["file_200.txt"])?;
    ensure!(names == ["200-file.txt"], "got {:?}", names);
    Ok(())
}

fn check_rename_renumber() -> Result<()> {
    let numbering = Numbering {
        start: 17,
        zero_pad: 3,
    };
    let rule = RenameRule::regex(r"file_(\d+)\.txt", "{n}-file.txt", false, numbering, None)?;
    let names = planned_names(&rule, &["file_200.txt", "file_300.txt"])?;
    ensure!(names == ["017-file.txt", "018-file.txt"], "got {:?}", names);

    let rule = RenameRule::regex(
        r"file_(\d+)\.txt",
        "{n}-{{}}file.txt",
        false,
        numbering,
        None,
    )?;
    let names = planned_names(&rule, &["file_200.txt"])?;
    ensure!(names == ["017-{}file.txt"], "got {:?}", names);
    Ok(())
}

fn check_rename_renumber_group() -> Result<()> {
    let rule = RenameRule::regex(
        r"file_(\d+)\.txt",
        "{n}-file.txt",
        false,
        Numbering::default(),
        Some("1-150".parse()?),
    )?;
    let names = planned_names(&rule, &["file_200.txt"])?;
    ensure!(names == ["50-file.txt"], "got {:?}", names);
    Ok(())
}

fn check_preview_matches_apply() -> Result<()> {
    let (_dir, paths) = scratch(&["1.log", "2.log", "3.log", "keep.txt"])?;
    let rule = RenameRule::number("{n}.{ext}", Numbering { start: 2, zero_pad: 1 });
    let mut plan = rename::plan(&paths, &rule, &FsProbe)?;

    let mut preview = Vec::new();
    rename::preview(&plan, &mut preview)?;
    let previewed: Vec<PathBuf> = plan.pending().map(|op| op.destination.clone()).collect();

    let summary = rename::apply(&mut plan, &FsProbe);
    ensure!(!summary.has_errors(), "unexpected errors: {:?}", summary);
    let applied: Vec<PathBuf> = plan
        .operations()
        .iter()
        .filter(|op| op.status == rename::OperationStatus::Applied)
        .map(|op| op.destination.clone())
        .collect();
    ensure!(previewed == applied, "preview {:?} != applied {:?}", previewed, applied);
    ensure!(
        String::from_utf8(preview)?.lines().count() == previewed.len(),
        "preview line count mismatch"
    );
    for path in &applied {
        ensure!(path.exists(), "{} missing", path.display());
    }
    Ok(())
}

fn check_never_overwrites() -> Result<()> {
    let (dir, paths) = scratch(&["a.txt", "b.txt"])?;
    let rule = RenameRule::replace("a", "b", false)?;
    let mut plan = rename::plan(&paths[..1], &rule, &FsProbe)?;
    let summary = rename::apply(&mut plan, &FsProbe);
    ensure!(summary.conflicts == 1, "expected a conflict: {:?}", summary);
    let contents = fs::read_to_string(dir.path().join("b.txt"))?;
    ensure!(contents == "b.txt", "b.txt was overwritten");
    Ok(())
}

fn check_passwd_lower_digit() -> Result<()> {
    let classes: CharClassSet = [CharClass::Lower, CharClass::Digit].into_iter().collect();
    let spec = PasswordSpec::new(10, classes, 1)?;
    let passwords = passwd::generate_passwords(&spec, &mut rand::rng());
    ensure!(passwords.len() == 1, "expected one password");
    let pw = &passwords[0];
    ensure!(pw.chars().count() == 10, "wrong length: {:?}", pw);
    ensure!(pw.chars().any(|c| c.is_ascii_lowercase()), "no lowercase: {:?}", pw);
    ensure!(pw.chars().any(|c| c.is_ascii_digit()), "no digit: {:?}", pw);
    Ok(())
}

fn check_passwd_composition() -> Result<()> {
    let mut rng = rand::rng();
    for length in 4..=12 {
        let spec = PasswordSpec::new(length, CharClassSet::all(), 25)?;
        for pw in passwd::generate_passwords(&spec, &mut rng) {
            ensure!(pw.chars().count() == length, "wrong length: {:?}", pw);
            ensure!(CharClassSet::all().is_satisfied_by(&pw), "missing class: {:?}", pw);
        }
    }
    Ok(())
}

fn check_passwd_too_short() -> Result<()> {
    match PasswordSpec::new(3, CharClassSet::all(), 1) {
        Err(PasswordError::LengthTooShort { .. }) => Ok(()),
        other => anyhow::bail!("expected LengthTooShort, got {:?}", other),
    }
}

fn check_passwd_entropy_floor() -> Result<()> {
    let spec = PasswordSpec::new(12, CharClassSet::all(), 1)?;
    ensure!(spec.entropy_bits() >= 64.0, "entropy {}", spec.entropy_bits());
    Ok(())
}

fn check_choose_member() -> Result<()> {
    let items = ["heads", "tails"];
    let mut rng = rand::rng();
    for _ in 0..16 {
        let picked = crate::choose::choose(&items, &mut rng).context("empty choice")?;
        ensure!(items.contains(picked), "picked {:?}", picked);
    }
    Ok(())
}
