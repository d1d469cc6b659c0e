//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod callsheet_repo;
pub mod contract_repo;
pub mod moodboard_repo;
pub mod participant_repo;
pub mod project_access_repo;
pub mod project_repo;
pub mod result_repo;
pub mod selection_repo;
pub mod user_repo;

pub use callsheet_repo::CallsheetRepo;
pub use contract_repo::ContractRepo;
pub use moodboard_repo::MoodboardRepo;
pub use participant_repo::ParticipantRepo;
pub use project_access_repo::ProjectAccessRepo;
pub use project_repo::ProjectRepo;
pub use result_repo::ResultRepo;
pub use selection_repo::SelectionRepo;
pub use user_repo::UserRepo;

/// SQL predicate matching a participant row `pt` to a user row `u`: either
/// an explicit link or a case-insensitive email match. Empty emails never
/// match.
pub(crate) const PARTICIPANT_MATCHES_USER: &str = "(pt.user_id = u.id \
     OR (pt.email IS NOT NULL AND pt.email <> '' AND LOWER(pt.email) = LOWER(u.email)))";
