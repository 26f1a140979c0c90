use axum::{Router, routing::get};
use std::{future::Future, io::Error, net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use roster_app::{Ctx, config::Config, repository::PlayerRepository};
use roster_types::{Result, errors::ApplicationError};

use crate::handlers::{
    create_player, delete_player, get_player, home_handler, list_players, lookup_player,
    update_player,
};

#[derive(Clone)]
pub struct AppState {
    pub players: Arc<dyn PlayerRepository>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(players: Arc<dyn PlayerRepository>, config: &Config) -> AppState {
        AppState {
            players,
            request_timeout: config.request_timeout,
        }
    }

    /// Context bounding the repository calls of one request.
    pub fn request_ctx(&self) -> Ctx {
        Ctx::with_timeout(self.request_timeout)
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(home_handler))
            .route("/players", get(list_players).post(create_player))
            .route("/players/lookup", get(lookup_player))
            .route(
                "/players/{key}",
                get(get_player).put(update_player).delete(delete_player),
            )
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve<S>(state: AppState, port: u16, shutdown: S) -> Result<(), ApplicationError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        Self::serve_listener(state, listener, shutdown).await
    }

    pub async fn serve_listener<S>(
        state: AppState,
        listener: TcpListener,
        shutdown: S,
    ) -> Result<(), ApplicationError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(infra_error)?;
        tracing::info!("HTTP Server started, listening on http://{}", addr);

        axum::serve(listener, Self::router(state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(infra_error)?;

        tracing::info!("HTTP Server stopped");
        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
