use askama::Template;
use axum::{extract::State, routing::get, Router};

use crate::api::AppState;

/// Analytics loader configuration, rendered into the document head when the
/// deployment has a Plausible instance configured.
struct AnalyticsSnippet {
    domain: String,
    script_url: String,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    analytics: Option<AnalyticsSnippet>,
}

/// Server-rendered document shell
async fn home_page(State(state): State<AppState>) -> HomeTemplate {
    let analytics = state
        .config
        .analytics_domain
        .clone()
        .zip(state.config.analytics_script_url.clone())
        .map(|(domain, script_url)| AnalyticsSnippet { domain, script_url });

    HomeTemplate { analytics }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home_page))
}
