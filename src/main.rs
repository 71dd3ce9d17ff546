// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{error, info};

use board_server::{
    api::router,
    auth::TokenCodec,
    config::{AppConfig, LogFormat},
    state::AppState,
    store::InMemoryStore,
    telemetry::init_tracing,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            error!("invalid configuration: {e}");
            process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let state = AppState::new(InMemoryStore::new(), TokenCodec::new(config.signing_key))
        .with_admin_signup_token(config.admin_signup_token);
    if state.admin_signup_token.is_none() {
        info!("ADMIN_SIGNUP_TOKEN not set; admin sign-up is disabled");
    }
    let app = router(state);

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    let addr = config.bind_addr;
    let served = match config.tls {
        Some(tls) => {
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                error!("failed to install rustls crypto provider");
                process::exit(1);
            }
            let tls_config = match RustlsConfig::from_pem_file(&tls.cert, &tls.key).await {
                Ok(tls_config) => tls_config,
                Err(e) => {
                    error!(cert = %tls.cert.display(), key = %tls.key.display(), "failed to load TLS credentials: {e}");
                    process::exit(1);
                }
            };
            info!("board server listening on https://{addr} (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
        None => {
            info!("board server listening on http://{addr} (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    };

    if let Err(e) = served {
        error!("server failed: {e}");
        process::exit(1);
    }
}

async fn shutdown_on_ctrl_c(handle: Handle<SocketAddr>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    }
}
