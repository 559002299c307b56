//! Community listing endpoint

use axum::extract::State;
use axum::Json;
use tracing::warn;

use crate::models::CommunityEntry;
use crate::{db, AppState, RECENT_LIMIT};

/// GET /api/community
///
/// Up to 50 most recent entries, newest first, no internal identifiers.
/// Store failures and the no-store degraded mode both answer with an
/// empty array rather than an error; the outage is only visible in logs.
pub async fn community_entries(State(state): State<AppState>) -> Json<Vec<CommunityEntry>> {
    let Some(pool) = &state.db else {
        return Json(Vec::new());
    };

    match db::entries::recent_entries(pool, RECENT_LIMIT).await {
        Ok(entries) => Json(entries),
        Err(e) => {
            warn!("Community listing read failed: {e}");
            Json(Vec::new())
        }
    }
}
