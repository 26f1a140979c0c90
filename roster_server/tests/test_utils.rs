#[cfg(test)]
pub mod tests {
    use reqwest::Client;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    use roster_app::{config::Config, repository::PlayerRepository};
    use roster_types::{Result, errors::ApplicationError};
    use roster_web::{AppState, WebRouter};

    /// Serves the router on an ephemeral port backed by `players`.
    /// Returns a client and the base URL.
    pub async fn setup_web_app(
        players: Arc<dyn PlayerRepository>,
    ) -> Result<(Client, String), ApplicationError> {
        let config = Config::from_vars(|_| None)?;
        let state = AppState::new(players, &config);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;

        tokio::spawn(WebRouter::serve_listener(
            state,
            listener,
            std::future::pending::<()>(),
        ));

        Ok((Client::new(), format!("http://{addr}")))
    }
}
