//! Domain logic - pure version rules independent of git operations

pub mod branch;
pub mod commit;
pub mod major_minor;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use commit::CommitId;
pub use major_minor::MajorMinor;
pub use tag::{Tag, TagMatcher, TaggedVersion};
pub use version::{Identifier, Version, VersionPart};
