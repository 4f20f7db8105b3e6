//! Axum wiring: per-request contexts, the `/about` prefetch and server function dispatch.

use any_spawner::Executor;
use axum::{
    body::Body,
    extract::{FromRef, Request, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use leptos::config::errors::LeptosConfigError;
use leptos::logging;
use leptos::prelude::*;

use crate::api::{prefetch_me, GraphqlClient, QueryCache};
use crate::app::shell;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    LeptosConfig(#[from] LeptosConfigError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not build the GraphQL HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub leptos_options: LeptosOptions,
    pub graphql: GraphqlClient,
}

impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl AppState {
    pub fn new(leptos_options: LeptosOptions, graphql: GraphqlClient) -> Self {
        Self {
            leptos_options,
            graphql,
        }
    }

    // Context installed for every render and server function call of one request.
    fn request_context(&self, cache: Option<QueryCache>) -> impl Fn() + Clone + Send + Sync + 'static {
        let options = self.leptos_options.clone();
        let graphql = self.graphql.clone();
        move || {
            provide_context(options.clone());
            provide_context(graphql.clone());
            if let Some(cache) = &cache {
                provide_context(cache.clone());
            }
        }
    }

    async fn render(&self, cache: Option<QueryCache>, req: Request) -> Response {
        let options = self.leptos_options.clone();
        let handler = leptos_axum::render_app_async_with_context(
            self.request_context(cache),
            move || shell(options.clone()),
        );
        handler(req).await.into_response()
    }
}

async fn home_page(State(state): State<AppState>, req: Request<Body>) -> Response {
    state.render(None, req).await
}

async fn about_page(State(state): State<AppState>, req: Request<Body>) -> Response {
    let cache = QueryCache::default();
    prefetch_me(&state.graphql, &cache).await;
    state.render(Some(cache), req).await
}

async fn server_fn_handler(State(state): State<AppState>, req: Request<Body>) -> impl IntoResponse {
    leptos_axum::handle_server_fns_with_context(state.request_context(None), req).await
}

pub fn router(state: AppState) -> Router {
    // Resources and server functions are driven by the Tokio executor.
    let _ = Executor::init_tokio();

    Router::new()
        .route("/", get(home_page))
        .route("/about", get(about_page))
        .route("/api/{*fn_name}", post(server_fn_handler))
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .with_state(state)
}

pub async fn serve(leptos_options: LeptosOptions, graphql: GraphqlClient) -> Result<(), ServerError> {
    let addr = leptos_options.site_addr;
    let app = router(AppState::new(leptos_options, graphql));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    logging::log!("listening on http://{}", &addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
