//! Rename planning: candidate names, collision detection and ordering

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::error::RenameError;
use super::rule::RenameRule;

/// Read-only view of the filesystem consulted while planning
pub trait PathProbe {
    /// Whether anything (file, directory, dangling symlink) occupies `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether two paths name the same directory entry
    fn same_entry(&self, a: &Path, b: &Path) -> bool;
}

/// `PathProbe` backed by the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    #[cfg(unix)]
    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;

        match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The rule leaves the name as it is
    Unchanged,
    /// The source already appeared earlier in the input
    Duplicate,
    /// The path has no final filename component
    NoFileName,
    /// The filename is not valid UTF-8
    NonUtf8Name,
    /// The rule produced an empty name, `.`/`..`, or a path separator
    InvalidName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Unchanged => "name unchanged",
            SkipReason::Duplicate => "duplicate source",
            SkipReason::NoFileName => "no file name",
            SkipReason::NonUtf8Name => "file name is not valid UTF-8",
            SkipReason::InvalidName => "rule produced an invalid file name",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// Several sources map to the same destination
    DuplicateDestination,
    /// The destination is occupied by something that is not moving
    DestinationExists,
    /// The operation is part of a rename cycle
    Cycle,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ConflictReason::DuplicateDestination => "several files map to this name",
            ConflictReason::DestinationExists => "destination already exists",
            ConflictReason::Cycle => "rename cycle",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Applied,
    Skipped(SkipReason),
    Conflict(ConflictReason),
    Failed(String),
}

/// One source path and its computed destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub status: OperationStatus,
}

impl RenameOperation {
    fn skipped(source: &Path, reason: SkipReason) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: source.to_path_buf(),
            status: OperationStatus::Skipped(reason),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OperationStatus::Pending
    }
}

/// Counts of operation outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub pending: usize,
    pub applied: usize,
    pub skipped: usize,
    pub conflicts: usize,
    pub failed: usize,
}

impl RenameSummary {
    /// Conflicts and failures make the run unsuccessful
    pub fn has_errors(&self) -> bool {
        self.conflicts > 0 || self.failed > 0
    }
}

/// Ordered operations for one invocation
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    operations: Vec<RenameOperation>,
}

impl RenamePlan {
    pub fn operations(&self) -> &[RenameOperation] {
        &self.operations
    }

    pub(crate) fn operations_mut(&mut self) -> &mut [RenameOperation] {
        &mut self.operations
    }

    pub fn pending(&self) -> impl Iterator<Item = &RenameOperation> {
        self.operations.iter().filter(|op| op.is_pending())
    }

    pub fn summary(&self) -> RenameSummary {
        let mut summary = RenameSummary::default();
        for op in &self.operations {
            match op.status {
                OperationStatus::Pending => summary.pending += 1,
                OperationStatus::Applied => summary.applied += 1,
                OperationStatus::Skipped(_) => summary.skipped += 1,
                OperationStatus::Conflict(_) => summary.conflicts += 1,
                OperationStatus::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Compute the rename plan for `paths` under `rule`.
///
/// Only the filename component changes. Operations that would overwrite
/// anything outside the moving sources, or that collide with each other,
/// are marked as conflicts. Pending operations keep input order except that
/// an operation runs after the one vacating its destination, and entries
/// inside a directory are renamed before the directory itself.
pub fn plan<P, I>(paths: I, rule: &RenameRule, probe: &P) -> Result<RenamePlan, RenameError>
where
    P: PathProbe + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut operations = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let path = normalize(path.as_ref());
        let path = path.as_path();
        tracing::debug!(path = %path.display(), "Processing");

        if !seen.insert(path.to_path_buf()) {
            operations.push(RenameOperation::skipped(path, SkipReason::Duplicate));
            continue;
        }
        let Some(file_name) = path.file_name() else {
            operations.push(RenameOperation::skipped(path, SkipReason::NoFileName));
            continue;
        };
        let Some(name) = file_name.to_str() else {
            operations.push(RenameOperation::skipped(path, SkipReason::NonUtf8Name));
            continue;
        };

        let new_name = rule.apply(name, index)?;
        if new_name == name {
            tracing::debug!(path = %path.display(), "Ignoring, no change in name");
            operations.push(RenameOperation::skipped(path, SkipReason::Unchanged));
            continue;
        }
        if !is_valid_file_name(&new_name) {
            tracing::warn!(
                path = %path.display(),
                new_name = %new_name,
                "Rule produced an invalid file name"
            );
            operations.push(RenameOperation::skipped(path, SkipReason::InvalidName));
            continue;
        }

        operations.push(RenameOperation {
            source: path.to_path_buf(),
            destination: path.with_file_name(&new_name),
            status: OperationStatus::Pending,
        });
    }

    mark_duplicate_destinations(&mut operations);
    resolve_occupied_destinations(&mut operations, probe);

    Ok(RenamePlan {
        operations: order_operations(operations),
    })
}

fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
        && !name.contains('\0')
}

fn mark_duplicate_destinations(operations: &mut [RenameOperation]) {
    let mut claims: HashMap<PathBuf, usize> = HashMap::new();
    for op in operations.iter().filter(|op| op.is_pending()) {
        *claims.entry(op.destination.clone()).or_default() += 1;
    }
    for op in operations.iter_mut().filter(|op| op.is_pending()) {
        if claims.get(&op.destination).copied().unwrap_or(0) > 1 {
            tracing::debug!(
                source = %op.source.display(),
                destination = %op.destination.display(),
                "Duplicate destination"
            );
            op.status = OperationStatus::Conflict(ConflictReason::DuplicateDestination);
        }
    }
}

/// Index of the pending operation whose source each pending destination is
fn dependencies(operations: &[RenameOperation]) -> Vec<Option<usize>> {
    let sources: HashMap<&Path, usize> = operations
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_pending())
        .map(|(i, op)| (op.source.as_path(), i))
        .collect();
    operations
        .iter()
        .map(|op| {
            if op.is_pending() {
                sources.get(op.destination.as_path()).copied()
            } else {
                None
            }
        })
        .collect()
}

/// Mark destinations held by non-moving entries, and rename cycles, until
/// nothing changes. A source that stops moving keeps its name occupied.
fn resolve_occupied_destinations<P: PathProbe + ?Sized>(
    operations: &mut [RenameOperation],
    probe: &P,
) {
    loop {
        let deps = dependencies(operations);
        let mut changed = false;

        for i in 0..operations.len() {
            if !operations[i].is_pending() || deps[i].is_some() {
                continue;
            }
            let op = &operations[i];
            if probe.exists(&op.destination) && !probe.same_entry(&op.source, &op.destination) {
                tracing::debug!(
                    source = %op.source.display(),
                    destination = %op.destination.display(),
                    "Destination exists"
                );
                operations[i].status =
                    OperationStatus::Conflict(ConflictReason::DestinationExists);
                changed = true;
            }
        }

        // Each destination is claimed once and each source is unique, so
        // following dependencies from an operation either ends or loops back.
        for start in 0..operations.len() {
            if !operations[start].is_pending() {
                continue;
            }
            let mut cycle = vec![start];
            let mut current = start;
            let mut is_cycle = false;
            while let Some(next) = deps[current] {
                if next == start {
                    is_cycle = true;
                    break;
                }
                if cycle.len() > operations.len() {
                    break;
                }
                cycle.push(next);
                current = next;
            }
            if is_cycle {
                for i in cycle {
                    operations[i].status = OperationStatus::Conflict(ConflictReason::Cycle);
                }
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
}

/// Drop `.` components so different spellings of a path compare equal
fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Order pending operations so that each one runs after
/// - the operation vacating its destination, and
/// - every operation renaming an entry below its source.
///
/// Otherwise input order is kept. Operations that cannot be ordered become
/// `Conflict(Cycle)`.
fn order_operations(mut operations: Vec<RenameOperation>) -> Vec<RenameOperation> {
    let deps = dependencies(&operations);
    let sources: HashMap<&Path, usize> = operations
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_pending())
        .map(|(i, op)| (op.source.as_path(), i))
        .collect();

    // successors[i] run after i; blockers[i] counts what i still waits for
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); operations.len()];
    let mut blockers = vec![0usize; operations.len()];
    for (i, op) in operations.iter().enumerate() {
        if !op.is_pending() {
            continue;
        }
        if let Some(vacating) = deps[i] {
            successors[vacating].push(i);
            blockers[i] += 1;
        }
        for ancestor in op.source.ancestors().skip(1) {
            if let Some(&parent_op) = sources.get(ancestor) {
                successors[i].push(parent_op);
                blockers[parent_op] += 1;
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..operations.len())
        .filter(|&i| blockers[i] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(operations.len());
    while let Some(Reverse(i)) = ready.pop() {
        order.push(i);
        for &next in &successors[i] {
            blockers[next] -= 1;
            if blockers[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    if order.len() < operations.len() {
        let mut emitted = vec![false; operations.len()];
        for &i in &order {
            emitted[i] = true;
        }
        for i in 0..operations.len() {
            if !emitted[i] {
                tracing::debug!(
                    source = %operations[i].source.display(),
                    "Cannot order rename"
                );
                operations[i].status = OperationStatus::Conflict(ConflictReason::Cycle);
                order.push(i);
            }
        }
    }

    let mut slots: Vec<Option<RenameOperation>> = operations.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
