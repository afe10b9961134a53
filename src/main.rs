mod model;
mod server;

use crate::server::{
    config::Config, error::AppError, router::router, service::oidc::verifier::OidcVerifier,
    startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    startup::init_tracing(&config);

    if !config.oidc_protect_all_routes {
        tracing::warn!(
            "GET and DELETE on single entities are served without authentication; \
             set OIDC_PROTECT_ALL_ROUTES=true to require a bearer token"
        );
    }

    let db = startup::connect_to_database(&config).await?;

    let http_client = startup::setup_reqwest_client()?;
    let (verifier, metadata) = OidcVerifier::discover(
        http_client,
        &config.oidc_issuer_url,
        &config.oidc_client_id,
    )
    .await?;
    let oauth_client = startup::setup_oauth_client(&config, &metadata)?;

    let state = AppState::new(db, verifier, oauth_client);
    let app = router(state, config.oidc_protect_all_routes);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    startup::serve(listener, app).await
}
