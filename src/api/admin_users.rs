use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use chrono::{DateTime, Utc};
use futures::future;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::api::middleware::auth;
use crate::api::response::ApiReply;
use crate::api::AppState;
use crate::error::{ApiError, Result};
use crate::models::{AccountSummary, LivingDex, Membership, SessionMembership, User};
use crate::services::dex_parser::{self, DexMetadata};

const DEFAULT_PAGE_SIZE: i64 = 1000;
const MAX_PAGE_SIZE: i64 = 10000;

/// Sanitized user fields for admin responses.
///
/// The user store carries no creation or update times, so both timestamps
/// are reported as null rather than aliasing some unrelated column.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminUserView {
    id: Uuid,
    email: String,
    display_name: Option<String>,
    user_name: Option<String>,
    twitter_username: Option<String>,
    twitch_username: Option<String>,
    discord_username: Option<String>,
    is_disabled: bool,
    roles: Vec<String>,
    email_verified: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for AdminUserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            user_name: user.user_name.clone(),
            twitter_username: user.twitter_username.clone(),
            twitch_username: user.twitch_username.clone(),
            discord_username: user.discord_username.clone(),
            is_disabled: user.is_disabled,
            roles: user.roles.clone(),
            email_verified: user.email_verified,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserProfileResponse {
    user: AdminUserView,
    accounts: Vec<AccountSummary>,
    membership: Option<SessionMembership>,
    living_dexes: Vec<DexMetadata>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserListEntry {
    id: Uuid,
    email: String,
    email_verified: bool,
    accounts: Vec<AccountSummary>,
    membership: Option<SessionMembership>,
    living_dex_count: i64,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaginationMeta {
    page: i64,
    page_size: i64,
    total_count: i64,
    total_pages: i64,
    has_next_page: bool,
    has_previous_page: bool,
}

#[derive(Debug, Serialize)]
struct UserListResponse {
    users: Vec<UserListEntry>,
    pagination: PaginationMeta,
}

/// Raw pagination parameters. Kept as strings so validation owns the
/// integer parse and its error message.
#[derive(Debug, Deserialize)]
struct ListUsersQuery {
    page: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
}

/// GET /api/admin/users/:user_id
///
/// Outer handler: method gate first, bearer guard second, profile lookup
/// last. The order matters; a token-less POST is 405, not 401.
async fn show_user(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    if method != Method::GET {
        return ApiError::NotAllowed.into_response();
    }

    if let Err(guard) = auth::check_bearer_token(&headers, &state.config.admin_api_token) {
        return guard.into_response();
    }

    match user_profile(&state, &user_id).await {
        Ok(reply) => reply.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Assembles the single-user profile: sanitized user fields, account
/// summaries, current membership, and per-dex metadata.
async fn user_profile(
    state: &AppState,
    raw_user_id: &str,
) -> Result<ApiReply<UserProfileResponse>> {
    // Identifier shape is checked before any store access
    let user_id = Uuid::parse_str(raw_user_id).map_err(|_| ApiError::InvalidRequest)?;

    let user = User::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let accounts = AccountSummary::for_user(&state.pool, user.id).await?;

    let membership = Membership::find_active_for_user(&state.pool, user.id)
        .await?
        .as_ref()
        .map(SessionMembership::from);

    let summaries = LivingDex::summaries_for_user(&state.pool, user.id).await?;

    // One payload fetch per dex. The fetches are independent, so run them
    // concurrently; join_all keeps the summaries' order.
    let pool = &state.pool;
    let living_dexes = future::join_all(summaries.iter().map(|summary| async move {
        match LivingDex::find_by_id(pool, summary.id).await {
            Ok(dex) => {
                let payload = dex.and_then(|d| d.data);
                dex_parser::dex_metadata(summary, payload.as_deref())
            }
            Err(e) => {
                tracing::warn!(dex_id = %summary.id, error = %e, "Dex payload fetch failed, zeroing counts");
                dex_parser::dex_metadata(summary, None)
            }
        }
    }))
    .await;

    tracing::info!(
        user_id = %user.id,
        dex_count = living_dexes.len(),
        "Served admin user profile"
    );

    Ok(ApiReply::ok(UserProfileResponse {
        user: AdminUserView::from(&user),
        accounts,
        membership,
        living_dexes,
    }))
}

/// GET /api/admin/users
///
/// Outer handler for the user listing, gated exactly like show_user. Only
/// routed when enable_user_listing is set.
async fn list_users(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    if method != Method::GET {
        return ApiError::NotAllowed.into_response();
    }

    if let Err(guard) = auth::check_bearer_token(&headers, &state.config.admin_api_token) {
        return guard.into_response();
    }

    match user_listing(&state, &query).await {
        Ok(reply) => reply.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Stub for the disabled listing route: 404 for every method, with or
/// without credentials, whatever the query string says.
async fn listing_disabled() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Endpoint not found" })),
    )
        .into_response()
}

async fn user_listing(
    state: &AppState,
    query: &ListUsersQuery,
) -> Result<ApiReply<UserListResponse>> {
    let page = parse_page(query.page.as_deref())?;
    let page_size = parse_page_size(query.page_size.as_deref())?;

    // An astronomically large page would overflow the offset product;
    // treat it like any other out-of-range page value.
    let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
        ApiError::Validation("Invalid page parameter. Must be a positive integer.".to_string())
    })?;

    let total_count = User::count(&state.pool).await?;
    let users = User::list_page(&state.pool, page_size, offset).await?;

    let mut entries = Vec::with_capacity(users.len());
    for user in &users {
        let accounts = AccountSummary::for_user(&state.pool, user.id).await?;
        let membership = Membership::find_first_for_user(&state.pool, user.id)
            .await?
            .as_ref()
            .map(SessionMembership::from);
        let living_dex_count = LivingDex::count_for_user(&state.pool, user.id).await?;

        entries.push(UserListEntry {
            id: user.id,
            email: user.email.clone(),
            email_verified: user.email_verified,
            accounts,
            membership,
            living_dex_count,
        });
    }

    let pagination = pagination_meta(page, page_size, total_count);

    tracing::info!(page, page_size, total_count, "Served admin user listing");

    Ok(ApiReply::ok(UserListResponse {
        users: entries,
        pagination,
    }))
}

/// Parses the page parameter: defaults to 1, must be a positive integer
fn parse_page(raw: Option<&str>) -> Result<i64> {
    match raw.unwrap_or("1").parse::<i64>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ApiError::Validation(
            "Invalid page parameter. Must be a positive integer.".to_string(),
        )),
    }
}

/// Parses the pageSize parameter: defaults to 1000, bounded to 1..=10000
fn parse_page_size(raw: Option<&str>) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE_SIZE);
    };

    match raw.parse::<i64>() {
        Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => Ok(size),
        _ => Err(ApiError::Validation(
            "Invalid pageSize parameter. Must be between 1 and 10000.".to_string(),
        )),
    }
}

/// Pagination metadata with a ceiling-division page count
fn pagination_meta(page: i64, page_size: i64, total_count: i64) -> PaginationMeta {
    let total_pages = (total_count + page_size - 1) / page_size;

    PaginationMeta {
        page,
        page_size,
        total_count,
        total_pages,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}

/// Creates the admin users router.
///
/// Routes are registered with `any` and gate the method themselves so that
/// an unsupported method is answered 405 before the bearer guard runs.
/// The listing route ships disabled behind its stub; the handler stays
/// wired for reactivation via config.
pub fn router(listing_enabled: bool) -> Router<AppState> {
    let listing = if listing_enabled {
        any(list_users)
    } else {
        any(listing_disabled)
    };

    Router::new()
        .route("/api/admin/users", listing)
        .route("/api/admin/users/:user_id", any(show_user))
}
