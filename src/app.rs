use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, time::timeout};

use crate::{
    config::AppConfig,
    http::{build_router, AppState},
    infrastructure::shutdown::Shutdown,
    ocr::TesseractExtractor,
    service::ScamAnalyzer,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SentinelApp {
    listener: TcpListener,
    router: Router,
    shutdown: Shutdown,
}

impl SentinelApp {
    pub async fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let extractor = Arc::new(TesseractExtractor::new(config.ocr.clone()));
        let analyzer = ScamAnalyzer::new(extractor);
        let router = build_router(AppState::new(analyzer), &config.server);

        let addr = SocketAddr::new(config.server.bind_address, config.server.port);
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!(
            target: "http",
            %addr,
            ocr = %config.ocr.tesseract_cmd,
            languages = %config.ocr.languages,
            "listening"
        );

        Ok(Self {
            listener,
            router,
            shutdown,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        let SentinelApp {
            listener,
            router,
            shutdown,
        } = self;

        tracing::info!(%addr, "Sentinel scam analyzer started");

        let graceful = shutdown.subscribe().notified();
        let mut server =
            Box::pin(axum::serve(listener, router).with_graceful_shutdown(graceful).into_future());

        tokio::select! {
            res = &mut server => {
                res.context("http server failed")?;
                tracing::info!("http server stopped");
                return Ok(());
            }
            _ = shutdown.subscribe().notified() => {
                tracing::info!("shutdown signal received; draining requests");
            }
        }

        match timeout(SHUTDOWN_TIMEOUT, &mut server).await {
            Ok(res) => res.context("http server failed during shutdown")?,
            Err(_) => tracing::warn!(
                target: "http",
                "in-flight requests did not finish within {:?}; forcing exit",
                SHUTDOWN_TIMEOUT
            ),
        }

        tracing::info!("Sentinel scam analyzer stopped");
        Ok(())
    }
}
