use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sms_relay::config::Args;
use sms_relay::rate_limit::{RateGate, sweeper};
use sms_relay::reply::{OpenAiCompleter, ReplyGenerator};
use sms_relay::state::AppState;
use sms_relay::{WEBHOOK_PATH, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine, the environment may already be populated
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Args::parse().into_settings();

    let client = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let completer = OpenAiCompleter::new(
        client,
        &settings.api_base,
        settings.api_key.clone(),
        settings.model.clone(),
        settings.upstream_timeout,
    );

    let rate_gate = Arc::new(RateGate::new(settings.cooldown));
    let state = Arc::new(AppState::new(
        Arc::clone(&rate_gate),
        ReplyGenerator::new(Arc::new(completer), settings.system_prompt.clone()),
    ));

    if let Some(every) = settings.sweep_interval {
        tokio::spawn(sweeper(Arc::clone(&rate_gate), every));
    }

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(port = settings.port, path = WEBHOOK_PATH, "relay listening");
    tracing::info!(model = %settings.model, api_base = %settings.api_base, "forwarding to completion API");
    tracing::info!(
        cooldown = ?settings.cooldown,
        timeout = ?settings.upstream_timeout,
        "rate gate and upstream limits"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
