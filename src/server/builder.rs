//! ServerBuilder for fluent API to build the invoice servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::{ListenConfig, ServiceConfig};
use crate::core::InvoiceStore;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Builder for creating the REST and gRPC servers around one store
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(ServiceConfig::from_env()?)
///     .with_store(InMemoryInvoiceStore::new())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    config: ServiceConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            store: None,
            config: ServiceConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store
    pub fn with_store_arc(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the service configuration
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the REST server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let metrics = Router::new().route("/version", get(|| async { "1.0" }));
    ///
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .with_custom_routes(metrics)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// The host can be handed to any exposure type (REST, gRPC).
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;

        Ok(ServerHost::new(self.config, store))
    }

    /// Build the final REST router
    ///
    /// Convenience method that builds the host and immediately exposes it
    /// via REST.
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Build the gRPC routes
    ///
    /// # Example
    ///
    /// ```ignore
    /// let grpc = ServerBuilder::new()
    ///     .with_store(InMemoryInvoiceStore::new())
    ///     .build_grpc()?
    ///     .into_axum_router();
    ///
    /// let listener = TcpListener::bind("127.0.0.1:50051").await?;
    /// axum::serve(listener, grpc).await?;
    /// ```
    #[cfg(feature = "grpc")]
    pub fn build_grpc(self) -> Result<tonic::service::Routes> {
        use super::exposure::GrpcExposure;

        let host = Arc::new(self.build_host()?);
        Ok(GrpcExposure::build_routes(host))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind the REST server to `config.http`
    /// - Bind the gRPC server to `config.grpc` (with the `grpc` feature)
    /// - Handle SIGTERM and SIGINT (Ctrl+C) by draining both servers
    ///
    /// If either server fails the whole call fails.
    pub async fn serve(mut self) -> Result<()> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        let rest_app = RestExposure::build_router(host.clone(), custom_routes)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        });

        let rest = serve_router("REST", &host.config.http, rest_app, shutdown_rx.clone());

        #[cfg(feature = "grpc")]
        {
            use super::exposure::GrpcExposure;

            let grpc_app = GrpcExposure::build_router(host.clone())?;
            let grpc = serve_router("gRPC", &host.config.grpc, grpc_app, shutdown_rx);
            tokio::try_join!(rest, grpc)?;
        }

        #[cfg(not(feature = "grpc"))]
        {
            drop(shutdown_rx);
            rest.await?;
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Bind `listen` and serve `app` until the shutdown flag flips
async fn serve_router(
    label: &'static str,
    listen: &ListenConfig,
    app: Router,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr = listen.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {} listener on {}", label, addr))?;

    tracing::info!("{} server listening on {}", label, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .with_context(|| format!("{} server failed", label))?;

    tracing::info!("{} server stopped", label);
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
///
/// A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
