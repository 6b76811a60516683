//! Batch renaming: rules, planning with collision checks, preview and apply

pub mod apply;
pub mod error;
pub mod plan;
pub mod rule;
pub mod source;

pub use apply::{apply, preview, report};
pub use error::RenameError;
pub use plan::{
    plan, ConflictReason, FsProbe, OperationStatus, PathProbe, RenameOperation, RenamePlan,
    RenameSummary, SkipReason,
};
pub use rule::{CaseStyle, Numbering, RenameRule, RenumberGroup};
pub use source::PathSource;
