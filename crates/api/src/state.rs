use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::UploadStore;

/// Handed to every handler through `State<AppState>`; clones share the pool,
/// the config and the upload store.
#[derive(Clone)]
pub struct AppState {
    pub pool: shootdesk_db::DbPool,
    /// Server settings plus the upload limits and other domain settings.
    pub config: Arc<ServerConfig>,
    /// Where uploaded images live on disk.
    pub storage: Arc<UploadStore>,
}
