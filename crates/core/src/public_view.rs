//! Public short-link visibility gate.
//!
//! A project page reached through its short code is rendered in three
//! possible states: not found, private (sign-in required or membership
//! missing), or granted with a per-module visibility map. The gate is a
//! single pass over the project's sharing settings and the visitor's
//! resolved access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::access::{AccessSource, ProjectRole};

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

/// Content sections of a project that can be shared publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectModule {
    Moodboard,
    Participants,
    Contracts,
    Selection,
    Callsheet,
    Results,
}

impl ProjectModule {
    pub const COUNT: usize = 6;

    pub const ALL: [ProjectModule; Self::COUNT] = [
        Self::Moodboard,
        Self::Participants,
        Self::Contracts,
        Self::Selection,
        Self::Callsheet,
        Self::Results,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moodboard => "moodboard",
            Self::Participants => "participants",
            Self::Contracts => "contracts",
            Self::Selection => "selection",
            Self::Callsheet => "callsheet",
            Self::Results => "results",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One boolean per [`ProjectModule`].
///
/// Serialized as a JSON object keyed by module name. Keys missing on input
/// default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ProjectModule, bool>", into = "BTreeMap<ProjectModule, bool>")]
pub struct ModuleFlags([bool; ProjectModule::COUNT]);

impl ModuleFlags {
    pub const fn none() -> Self {
        Self([false; ProjectModule::COUNT])
    }

    pub const fn all() -> Self {
        Self([true; ProjectModule::COUNT])
    }

    pub fn get(&self, module: ProjectModule) -> bool {
        self.0[module.index()]
    }

    pub fn set(&mut self, module: ProjectModule, value: bool) {
        self.0[module.index()] = value;
    }

    #[must_use]
    pub fn with(mut self, module: ProjectModule, value: bool) -> Self {
        self.set(module, value);
        self
    }

    /// Apply a partial update; modules absent from `changes` keep their value.
    pub fn apply(&mut self, changes: &BTreeMap<ProjectModule, bool>) {
        for (module, value) in changes {
            self.set(*module, *value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectModule, bool)> + '_ {
        ProjectModule::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

impl From<BTreeMap<ProjectModule, bool>> for ModuleFlags {
    fn from(map: BTreeMap<ProjectModule, bool>) -> Self {
        let mut flags = Self::none();
        flags.apply(&map);
        flags
    }
}

impl From<ModuleFlags> for BTreeMap<ProjectModule, bool> {
    fn from(flags: ModuleFlags) -> Self {
        flags.iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// The sharing configuration of a project as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharingSettings {
    pub is_public: bool,
    pub modules: ModuleFlags,
}

/// Who is looking at the short-link page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visitor {
    Anonymous,
    /// A verified identity with its resolved access to this project
    /// (`None` when the user is not a member).
    Authenticated(Option<AccessSource>),
}

impl Visitor {
    fn access(self) -> Option<AccessSource> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(source) => source,
        }
    }
}

/// What the visitor is allowed to see once the page is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicGrant {
    /// Per-module content visibility. The project summary is always visible.
    pub modules: ModuleFlags,
    /// The visitor's tier on the project, if they are a member.
    pub viewer_role: Option<ProjectRole>,
    /// Owners get a link into the management view.
    pub can_manage: bool,
}

/// Terminal state of a short-link resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicAccess {
    NotFound,
    /// The project exists but is private to this visitor.
    PrivateDenied { sign_in_required: bool },
    Granted(PublicGrant),
}

/// Decide what a visitor may see of a project reached by short code.
///
/// `settings` is `None` when no project carries the short code.
pub fn evaluate_public_access(settings: Option<SharingSettings>, visitor: Visitor) -> PublicAccess {
    let Some(settings) = settings else {
        return PublicAccess::NotFound;
    };

    let access = visitor.access();
    let is_member = access.is_some_and(AccessSource::can_view);

    if !settings.is_public && !is_member {
        return PublicAccess::PrivateDenied {
            sign_in_required: matches!(visitor, Visitor::Anonymous),
        };
    }

    let mut modules = settings.modules;
    if is_member {
        modules = ModuleFlags::all();
    }

    PublicAccess::Granted(PublicGrant {
        modules,
        viewer_role: access.map(AccessSource::role),
        can_manage: access.is_some_and(AccessSource::is_owner),
    })
}
