//! Project access resolution.
//!
//! A user reaches a project through one of three paths: ownership, an
//! explicit [`GrantRole`] row, or a participant row whose email matches the
//! user's. [`resolve_access`] folds the facts loaded from the store into a
//! single [`AccessSource`], and every permission question (view, edit, role)
//! is answered from that one value.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Effective membership tier of a user on a project.
///
/// Ordered from lowest to highest so tiers can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectRole {
    Viewer,
    Editor,
    Owner,
}

impl ProjectRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Editor => "EDITOR",
            Self::Owner => "OWNER",
        }
    }
}

/// Role carried by an explicit access grant row.
///
/// Ownership is never stored as a grant, so there is no `Owner` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantRole {
    Editor,
    Viewer,
}

/// Valid values of the `project_access.role` column.
const VALID_GRANT_ROLES: &[&str] = &["EDITOR", "VIEWER"];

impl GrantRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }

    /// Parse from the database `role` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "EDITOR" => Ok(Self::Editor),
            "VIEWER" => Ok(Self::Viewer),
            other => Err(CoreError::Validation(format!(
                "Invalid grant role '{other}'. Must be one of: {}",
                VALID_GRANT_ROLES.join(", ")
            ))),
        }
    }
}

impl From<GrantRole> for ProjectRole {
    fn from(role: GrantRole) -> Self {
        match role {
            GrantRole::Editor => ProjectRole::Editor,
            GrantRole::Viewer => ProjectRole::Viewer,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The path through which a user reaches a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSource {
    /// The user is the project's owner.
    Owner,
    /// The user holds an explicit grant row.
    Grant(GrantRole),
    /// A participant row on the project carries the user's email (or links
    /// the user directly). View-only.
    ParticipantMatch,
}

impl AccessSource {
    /// Effective tier conferred by this source.
    pub fn role(self) -> ProjectRole {
        match self {
            Self::Owner => ProjectRole::Owner,
            Self::Grant(role) => role.into(),
            Self::ParticipantMatch => ProjectRole::Viewer,
        }
    }

    /// Every source grants read access.
    pub fn can_view(self) -> bool {
        true
    }

    /// Only owners and editor grants may modify project content.
    pub fn can_edit(self) -> bool {
        self.role() >= ProjectRole::Editor
    }

    pub fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }
}

/// Everything the store knows about one (user, project) pair.
///
/// Loaded in a single query; absent when either the project or the user does
/// not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessFacts {
    pub owner_id: DbId,
    /// The user's grant on the project, if any. At most one per pair.
    pub grant: Option<GrantRole>,
    /// Whether a participant row on the project matches the user.
    pub participant_match: bool,
}

/// Resolve the strongest access path for `user_id`.
///
/// Precedence is fixed: owner, then explicit grant, then participant match.
/// Missing facts (unknown project or user) resolve to `None`.
pub fn resolve_access(user_id: DbId, facts: Option<&AccessFacts>) -> Option<AccessSource> {
    let facts = facts?;
    if facts.owner_id == user_id {
        return Some(AccessSource::Owner);
    }
    if let Some(role) = facts.grant {
        return Some(AccessSource::Grant(role));
    }
    if facts.participant_match {
        return Some(AccessSource::ParticipantMatch);
    }
    None
}

/// `true` when the resolved source permits viewing the project.
pub fn can_access(source: Option<AccessSource>) -> bool {
    source.is_some_and(AccessSource::can_view)
}

/// `true` when the resolved source permits editing the project.
pub fn can_edit(source: Option<AccessSource>) -> bool {
    source.is_some_and(AccessSource::can_edit)
}

/// The effective role, or `None` for no access.
pub fn user_role(source: Option<AccessSource>) -> Option<ProjectRole> {
    source.map(AccessSource::role)
}
