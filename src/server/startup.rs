use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use axum::Router;
use hyper::{body::Incoming, server::conn::http1, service::service_fn, Request};
use hyper_util::rt::{TokioIo, TokioTimer};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use tokio::{net::TcpListener, sync::watch, task::JoinSet};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{auth::AuthError, AppError},
    service::oidc::discovery::ProviderMetadata,
    state::OAuth2Client,
};

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Time a client has to deliver a complete request head.
pub const HEADER_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Time a closing connection has to flush its last response before it is dropped.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Time a keep-alive connection may sit without a request before it is closed.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Initializes the global tracing subscriber.
///
/// The filter is read from `RUST_LOG` and falls back to the configured `LOG_LEVEL`.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// automatically runs all pending SeaORM migrations to ensure the database schema is
/// up-to-date. This function must complete successfully before the application can access
/// the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(config.log_persistence);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used to talk to the OpenID provider.
///
/// Redirects are not followed so that discovery cannot be bounced to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

    Ok(client)
}

/// Builds the OAuth2 client from configuration and the discovered provider endpoints.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorization, token and redirect URLs set
/// - `Err(AuthError::InvalidUrl)` - An endpoint or the redirect URL is not a valid URL
pub fn setup_oauth_client(
    config: &Config,
    metadata: &ProviderMetadata,
) -> Result<OAuth2Client, AuthError> {
    let auth_url = AuthUrl::new(metadata.authorization_endpoint.clone()).map_err(|source| {
        AuthError::InvalidUrl {
            url: metadata.authorization_endpoint.clone(),
            source,
        }
    })?;
    let token_url = TokenUrl::new(metadata.token_endpoint.clone()).map_err(|source| {
        AuthError::InvalidUrl {
            url: metadata.token_endpoint.clone(),
            source,
        }
    })?;
    let redirect_url = RedirectUrl::new(config.oidc_redirect_url.clone()).map_err(|source| {
        AuthError::InvalidUrl {
            url: config.oidc_redirect_url.clone(),
            source,
        }
    })?;

    Ok(BasicClient::new(ClientId::new(config.oidc_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.oidc_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url))
}

/// Resolves once SIGINT or SIGTERM is received.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}

/// Per-connection timeouts applied by [`serve_with`].
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub header_read_timeout: Duration,
    pub write_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            header_read_timeout: HEADER_READ_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            idle_timeout: IDLE_TIMEOUT,
        }
    }
}

/// Serves `router` on `listener` with the default [`ConnectionLimits`] until SIGINT or
/// SIGTERM arrives.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), AppError> {
    serve_with(listener, router, ConnectionLimits::default(), shutdown_signal()).await
}

/// Serves `router` on `listener` until `signal` resolves.
///
/// Every connection is served by its own task under `limits`. After the signal no new
/// connections are accepted, open ones are asked to close once their current request is
/// answered, and all of them get [`SHUTDOWN_GRACE_PERIOD`] before they are aborted.
pub async fn serve_with(
    listener: TcpListener,
    router: Router,
    limits: ConnectionLimits,
    signal: impl Future<Output = ()>,
) -> Result<(), AppError> {
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let mut connections = JoinSet::new();
    let mut signal = std::pin::pin!(signal);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::trace!("Accepted connection from {}", peer);
                    connections.spawn(serve_connection(
                        stream,
                        router.clone(),
                        limits,
                        shutdown_rx.clone(),
                    ));
                }
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            _ = &mut signal => break,
        }
    }

    drop(listener);
    let _ = shutdown_tx.send(());

    let drain = async { while connections.join_next().await.is_some() {} };
    if tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, drain).await.is_err() {
        tracing::warn!(
            "In-flight requests did not finish within {}s, shutting down",
            SHUTDOWN_GRACE_PERIOD.as_secs()
        );
    }

    Ok(())
}

/// Serves one HTTP/1 connection until the client closes it, it idles past
/// `limits.idle_timeout`, or the server shuts down.
async fn serve_connection(
    stream: tokio::net::TcpStream,
    router: Router,
    limits: ConnectionLimits,
    mut shutdown: watch::Receiver<()>,
) {
    let activity = Arc::new(Activity::new());

    let service = {
        let activity = activity.clone();
        service_fn(move |request: Request<Incoming>| {
            let router = router.clone();
            let guard = RequestGuard::begin(activity.clone());
            async move {
                let response = router.oneshot(request).await;
                drop(guard);
                response
            }
        })
    };

    let connection = http1::Builder::new()
        .timer(TokioTimer::new())
        .header_read_timeout(limits.header_read_timeout)
        .serve_connection(TokioIo::new(stream), service);
    let mut connection = std::pin::pin!(connection);
    let mut closing = false;

    loop {
        tokio::select! {
            result = connection.as_mut() => {
                if let Err(e) = result {
                    tracing::debug!("Connection closed with error: {}", e);
                }
                return;
            }
            _ = shutdown.changed(), if !closing => {
                closing = true;
                connection.as_mut().graceful_shutdown();
            }
            _ = tokio::time::sleep_until(activity.idle_deadline(limits.idle_timeout)), if !closing => {
                if activity.is_idle(limits.idle_timeout) {
                    tracing::debug!("Closing connection idle for {}s", limits.idle_timeout.as_secs());
                    closing = true;
                    connection.as_mut().graceful_shutdown();
                }
            }
            _ = tokio::time::sleep(limits.write_timeout), if closing => {
                tracing::debug!("Dropping connection that did not finish its last response");
                return;
            }
        }
    }
}

/// In-flight request count and last activity of one connection.
struct Activity {
    opened_at: Instant,
    in_flight: AtomicUsize,
    /// Milliseconds after `opened_at` at which a request last started or finished.
    last_active_ms: AtomicU64,
}

impl Activity {
    fn new() -> Self {
        Self {
            opened_at: Instant::now(),
            in_flight: AtomicUsize::new(0),
            last_active_ms: AtomicU64::new(0),
        }
    }

    fn touch(&self) {
        let elapsed = u64::try_from(self.opened_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_active_ms.store(elapsed, Ordering::SeqCst);
    }

    fn last_active(&self) -> Instant {
        self.opened_at + Duration::from_millis(self.last_active_ms.load(Ordering::SeqCst))
    }

    /// When the connection becomes idle if nothing happens until then.
    fn idle_deadline(&self, idle_timeout: Duration) -> tokio::time::Instant {
        let deadline = if self.in_flight.load(Ordering::SeqCst) > 0 {
            Instant::now() + idle_timeout
        } else {
            self.last_active() + idle_timeout
        };

        tokio::time::Instant::from_std(deadline)
    }

    fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.in_flight.load(Ordering::SeqCst) == 0 && self.last_active().elapsed() >= idle_timeout
    }
}

/// Marks a request as in flight on its connection until dropped.
struct RequestGuard(Arc<Activity>);

impl RequestGuard {
    fn begin(activity: Arc<Activity>) -> Self {
        activity.in_flight.fetch_add(1, Ordering::SeqCst);
        activity.touch();
        Self(activity)
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.0.touch();
    }
}
