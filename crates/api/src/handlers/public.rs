//! Public short-link page: `GET /public/{short_code}`.
//!
//! Anyone may open the link. The visibility gate decides between 404, a
//! 403 `PRIVATE_PROJECT` answer, and a granted view whose module content is
//! filled in only for the modules the visitor may see.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use shootdesk_core::access::ProjectRole;
use shootdesk_core::public_view::{
    evaluate_public_access, ModuleFlags, ProjectModule, PublicAccess, PublicGrant, Visitor,
};
use shootdesk_core::shortcode::is_valid_short_code;
use shootdesk_core::types::{DbId, Timestamp};
use shootdesk_db::models::contract::PublicContract;
use shootdesk_db::models::participant::PublicParticipant;
use shootdesk_db::models::project::Project;
use shootdesk_db::models::selection::SelectionImage;
use shootdesk_db::repositories::{
    ContractRepo, ParticipantRepo, ProjectAccessRepo, ProjectRepo, SelectionRepo, UserRepo,
};
use sqlx::PgPool;

use super::callsheet::{load_callsheet, CallsheetView};
use super::moodboard::{load_board, MoodboardGroupView};
use super::results::{load_folders, ResultFolderView};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Project summary shown to every visitor who passes the gate.
#[derive(Debug, Serialize)]
pub struct PublicProjectSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub shoot_date: Option<Timestamp>,
    pub location: Option<String>,
    pub short_code: String,
    pub owner_name: Option<String>,
}

/// Module content; a field is `null` when that module is withheld.
#[derive(Debug, Default, Serialize)]
pub struct PublicModules {
    pub moodboard: Option<Vec<MoodboardGroupView>>,
    pub participants: Option<Vec<PublicParticipant>>,
    pub contracts: Option<Vec<PublicContract>>,
    pub selection: Option<Vec<SelectionImage>>,
    pub callsheet: Option<CallsheetView>,
    pub results: Option<Vec<ResultFolderView>>,
}

#[derive(Debug, Serialize)]
pub struct PublicProjectView {
    pub project: PublicProjectSummary,
    pub viewer_role: Option<ProjectRole>,
    pub can_manage: bool,
    pub visible_modules: ModuleFlags,
    pub modules: PublicModules,
}

/// GET /api/v1/public/{short_code}
pub async fn view(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> AppResult<Json<DataResponse<PublicProjectView>>> {
    let project = if is_valid_short_code(&short_code, &state.config.settings.short_code) {
        ProjectRepo::find_by_short_code(&state.pool, &short_code).await?
    } else {
        None
    };

    let visitor = match (&viewer, &project) {
        (None, _) => Visitor::Anonymous,
        (Some(user), Some(project)) => Visitor::Authenticated(
            ProjectAccessRepo::resolve(&state.pool, user.user_id, project.id).await?,
        ),
        (Some(_), None) => Visitor::Authenticated(None),
    };

    let grant = match evaluate_public_access(project.as_ref().map(Project::sharing), visitor) {
        PublicAccess::NotFound => {
            return Err(AppError::NotFound("Project not found".into()));
        }
        PublicAccess::PrivateDenied { sign_in_required } => {
            tracing::debug!(short_code = %short_code, sign_in_required, "Private project denied");
            return Err(AppError::PrivateProject { sign_in_required });
        }
        PublicAccess::Granted(grant) => grant,
    };
    let Some(project) = project else {
        return Err(AppError::NotFound("Project not found".into()));
    };

    let owner_name = UserRepo::find_summary(&state.pool, project.owner_id)
        .await?
        .map(|owner| owner.name);
    let modules = load_visible_modules(&state.pool, project.id, &grant.modules).await?;

    Ok(Json(DataResponse {
        data: build_view(project, owner_name, grant, modules),
    }))
}

fn build_view(
    project: Project,
    owner_name: Option<String>,
    grant: PublicGrant,
    modules: PublicModules,
) -> PublicProjectView {
    PublicProjectView {
        project: PublicProjectSummary {
            id: project.id,
            name: project.name,
            description: project.description,
            shoot_date: project.shoot_date,
            location: project.location,
            short_code: project.short_code,
            owner_name,
        },
        viewer_role: grant.viewer_role,
        can_manage: grant.can_manage,
        visible_modules: grant.modules,
        modules,
    }
}

async fn load_visible_modules(
    pool: &PgPool,
    project_id: DbId,
    visible: &ModuleFlags,
) -> Result<PublicModules, sqlx::Error> {
    let mut modules = PublicModules::default();
    for (module, shown) in visible.iter() {
        if !shown {
            continue;
        }
        match module {
            ProjectModule::Moodboard => {
                modules.moodboard = Some(load_board(pool, project_id).await?);
            }
            ProjectModule::Participants => {
                modules.participants = Some(ParticipantRepo::list_public(pool, project_id).await?);
            }
            ProjectModule::Contracts => {
                modules.contracts = Some(ContractRepo::list_public(pool, project_id).await?);
            }
            ProjectModule::Selection => {
                modules.selection = Some(SelectionRepo::list_by_project(pool, project_id).await?);
            }
            ProjectModule::Callsheet => {
                modules.callsheet = load_callsheet(pool, project_id).await?;
            }
            ProjectModule::Results => {
                modules.results = Some(load_folders(pool, project_id).await?);
            }
        }
    }
    Ok(modules)
}
