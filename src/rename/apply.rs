//! Previewing and applying a rename plan

use std::fs;
use std::io::{self, Write};

use super::plan::{
    ConflictReason, OperationStatus, PathProbe, RenamePlan, RenameSummary, SkipReason,
};

/// Write `Rename: <src> -> <dst>` for every pending operation.
///
/// Nothing on disk changes.
pub fn preview<W: Write>(plan: &RenamePlan, out: &mut W) -> io::Result<()> {
    for op in plan.pending() {
        tracing::info!(
            source = %op.source.display(),
            destination = %op.destination.display(),
            "Rename (dry run)"
        );
        writeln!(
            out,
            "Rename: {} -> {}",
            op.source.display(),
            op.destination.display()
        )?;
    }
    Ok(())
}

/// Perform pending renames in plan order.
///
/// The destination is checked again right before each rename; an occupied
/// destination becomes a conflict instead of being overwritten. A failing
/// rename is recorded and the batch continues.
pub fn apply<P: PathProbe + ?Sized>(plan: &mut RenamePlan, probe: &P) -> RenameSummary {
    for op in plan.operations_mut() {
        if !op.is_pending() {
            continue;
        }

        if probe.exists(&op.destination) && !probe.same_entry(&op.source, &op.destination) {
            tracing::warn!(
                source = %op.source.display(),
                destination = %op.destination.display(),
                "Destination appeared before rename, skipping"
            );
            op.status = OperationStatus::Conflict(ConflictReason::DestinationExists);
            continue;
        }

        match fs::rename(&op.source, &op.destination) {
            Ok(()) => {
                tracing::info!(
                    source = %op.source.display(),
                    destination = %op.destination.display(),
                    "Rename"
                );
                op.status = OperationStatus::Applied;
            }
            Err(e) => {
                tracing::warn!(
                    source = %op.source.display(),
                    destination = %op.destination.display(),
                    error = %e,
                    "Rename failed"
                );
                op.status = OperationStatus::Failed(e.to_string());
            }
        }
    }
    plan.summary()
}

/// Write one line per conflict, failure and noteworthy skip
pub fn report<W: Write>(plan: &RenamePlan, err: &mut W) -> io::Result<()> {
    for op in plan.operations() {
        match &op.status {
            OperationStatus::Conflict(reason) => writeln!(
                err,
                "Conflict: {} -> {} ({})",
                op.source.display(),
                op.destination.display(),
                reason
            )?,
            OperationStatus::Failed(message) => writeln!(
                err,
                "Failed: {} -> {} ({})",
                op.source.display(),
                op.destination.display(),
                message
            )?,
            OperationStatus::Skipped(SkipReason::Unchanged) => {}
            OperationStatus::Skipped(reason) => {
                writeln!(err, "Skipped: {} ({})", op.source.display(), reason)?
            }
            OperationStatus::Pending | OperationStatus::Applied => {}
        }
    }
    Ok(())
}
