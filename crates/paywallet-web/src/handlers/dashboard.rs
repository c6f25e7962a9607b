//! Dashboard and notification feed.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use paywallet_core::guard::SIGNIN_PATH;
use paywallet_core::views::{DashboardSummary, NotificationFeed};
use paywallet_core::Session;
use serde::Deserialize;

use crate::state::AppState;
use crate::views::{render_template, DashboardPage, NotificationsPage};

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    let summary = DashboardSummary::load(&state.api_for(&session)).await;
    render_template(DashboardPage::new(session.display_email(), &summary))
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    pub id: Option<String>,
}

pub async fn notifications(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<NotificationQuery>,
) -> Response {
    let feed = NotificationFeed::load(&state.api_for(&session)).await;
    let detail = query.id.as_deref().and_then(|id| feed.detail(id));
    render_template(NotificationsPage {
        user_email: session.display_email().to_string(),
        items: feed.items(),
        detail,
    })
}

/// `/` has no page of its own; the guard redirects every caller before this
/// runs.
pub async fn root() -> Response {
    Redirect::to(SIGNIN_PATH).into_response()
}
