//! Property tests for rename planning against real directories
//!
//! Preview and apply must agree, and nothing outside the batch's own
//! sources may ever be overwritten.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use toolbin::rename::{
    self, CaseStyle, FsProbe, Numbering, OperationStatus, PathSource, RenameRule,
};

use super::common::fs_fixtures::TestTree;

fn rule_strategy() -> impl Strategy<Value = RenameRule> {
    prop_oneof![
        Just(RenameRule::replace("a", "b", false).unwrap()),
        Just(RenameRule::replace("b", "", false).unwrap()),
        Just(RenameRule::case(CaseStyle::Upper)),
        Just(RenameRule::number("{n}.{ext}", Numbering::default())),
        Just(RenameRule::number("c{n}.txt", Numbering { start: 0, zero_pad: 1 })),
        Just(RenameRule::regex(r"^(.)", "a", false, Numbering::default(), None).unwrap()),
    ]
}

fn names_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[abc]{1,3}\\.(txt|md)", 1..8)
}

fn nested_rule_strategy() -> impl Strategy<Value = RenameRule> {
    prop_oneof![
        (0i64..6).prop_map(|start| RenameRule::number("{n}", Numbering { start, zero_pad: 1 })),
        Just(RenameRule::replace("1", "2", false).unwrap()),
        Just(RenameRule::replace("2", "1", false).unwrap()),
    ]
}

/// Top-level names mapped to the files inside them; no files means the
/// entry is itself a file
fn nested_tree_strategy() -> impl Strategy<Value = BTreeMap<String, BTreeSet<String>>> {
    prop::collection::btree_map(
        "[1-5]",
        prop::collection::btree_set("[1-5]", 0..3),
        1..5,
    )
}

/// Where `path` ends up once every applied rename of it or of a directory
/// above it has happened
fn final_location(root: &Path, path: &Path, moves: &HashMap<PathBuf, PathBuf>) -> PathBuf {
    let relative = path.strip_prefix(root).unwrap();
    let mut original = root.to_path_buf();
    let mut current = root.to_path_buf();
    for component in relative.components() {
        original.push(component);
        match moves.get(&original).and_then(|dest| dest.file_name()) {
            Some(new_name) => current.push(new_name),
            None => current.push(component),
        }
    }
    current
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_preview_matches_apply_and_never_overwrites(
        names in names_strategy(),
        in_batch in prop::collection::vec(any::<bool>(), 8),
        rule in rule_strategy(),
    ) {
        let tree = TestTree::new();
        let mut batch: Vec<PathBuf> = Vec::new();
        let mut bystanders: Vec<String> = Vec::new();
        for (name, selected) in names.iter().zip(in_batch.iter().copied()) {
            tree.write(name, name);
            if selected {
                batch.push(tree.join(name));
            } else {
                bystanders.push(name.clone());
            }
        }
        let before = tree.names().len();

        let mut plan = rename::plan(&batch, &rule, &FsProbe).unwrap();
        let mut preview = Vec::new();
        rename::preview(&plan, &mut preview).unwrap();
        let previewed: Vec<(PathBuf, PathBuf)> = plan
            .pending()
            .map(|op| (op.source.clone(), op.destination.clone()))
            .collect();

        rename::apply(&mut plan, &FsProbe);

        let applied: Vec<(PathBuf, PathBuf)> = plan
            .operations()
            .iter()
            .filter(|op| op.status == OperationStatus::Applied)
            .map(|op| (op.source.clone(), op.destination.clone()))
            .collect();
        prop_assert_eq!(&applied, &previewed);
        prop_assert_eq!(
            String::from_utf8(preview).unwrap().lines().count(),
            previewed.len()
        );

        // Nothing was lost and nothing outside the batch changed
        prop_assert_eq!(tree.names().len(), before);
        for name in &bystanders {
            prop_assert_eq!(tree.read(name), name.clone());
        }
        for (source, destination) in &applied {
            let original = source.file_name().unwrap().to_string_lossy().into_owned();
            prop_assert_eq!(fs::read_to_string(destination).unwrap(), original);
        }
    }

    #[test]
    fn prop_planning_is_repeatable(
        names in names_strategy(),
        rule in rule_strategy(),
    ) {
        let tree = TestTree::new();
        let batch: Vec<PathBuf> = names
            .iter()
            .map(|name| {
                tree.write(name, name);
                tree.join(name)
            })
            .collect();

        let first = rename::plan(&batch, &rule, &FsProbe).unwrap();
        let second = rename::plan(&batch, &rule, &FsProbe).unwrap();
        prop_assert_eq!(first.operations(), second.operations());
    }

    #[test]
    fn prop_walked_trees_move_every_file_where_previewed(
        tree_spec in nested_tree_strategy(),
        rule in nested_rule_strategy(),
    ) {
        let tree = TestTree::new();
        let mut files: Vec<(PathBuf, String)> = Vec::new();
        for (top, children) in &tree_spec {
            if children.is_empty() {
                tree.write(top, top);
                files.push((tree.join(top), top.clone()));
            }
            for child in children {
                let relative = format!("{top}/{child}");
                tree.write(&relative, &relative);
                files.push((tree.join(&relative), relative));
            }
        }

        let paths = PathSource::Walk(tree.root().to_path_buf())
            .collect_paths(io::empty())
            .unwrap();
        let mut plan = rename::plan(&paths, &rule, &FsProbe).unwrap();
        let previewed: Vec<(PathBuf, PathBuf)> = plan
            .pending()
            .map(|op| (op.source.clone(), op.destination.clone()))
            .collect();

        let summary = rename::apply(&mut plan, &FsProbe);
        prop_assert_eq!(summary.failed, 0);

        let applied: Vec<(PathBuf, PathBuf)> = plan
            .operations()
            .iter()
            .filter(|op| op.status == OperationStatus::Applied)
            .map(|op| (op.source.clone(), op.destination.clone()))
            .collect();
        prop_assert_eq!(&applied, &previewed);

        let moves: HashMap<PathBuf, PathBuf> = applied.into_iter().collect();
        for (path, contents) in &files {
            let location = final_location(tree.root(), path, &moves);
            let found = fs::read_to_string(&location).ok();
            prop_assert_eq!(
                found.as_deref(),
                Some(contents.as_str()),
                "{} should be at {}",
                contents,
                location.display()
            );
        }
    }
}
