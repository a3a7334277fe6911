use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use dotenv::dotenv;
use nutrition_advisor_api::{
    application::{
        http::server::http_server::{router, spawn_session_sweeper, state},
        logger::init_logger,
    },
    args::Args,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = state(args.clone()).await?;
    spawn_session_sweeper(app_state.clone());
    let app = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                args.server.host, args.server.port
            )
        })?;

    match (&args.server.tls_cert_path, &args.server.tls_key_path) {
        (Some(cert_path), Some(key_path)) => {
            if rustls::crypto::aws_lc_rs::default_provider()
                .install_default()
                .is_err()
            {
                warn!("A rustls crypto provider was already installed");
            }

            let tls_config = RustlsConfig::from_pem_file(cert_path, key_path)
                .await
                .context("failed to load TLS certificate or key")?;

            info!("Nutrition Advisor listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        (None, None) => {
            info!("Nutrition Advisor listening on http://{}", addr);
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
        _ => anyhow::bail!("TLS_CERT_PATH and TLS_KEY_PATH must be set together"),
    }

    Ok(())
}
