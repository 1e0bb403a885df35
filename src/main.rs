mod app;
mod auth;
mod calendar;
mod config;
mod dishes;
mod error;
mod foods;
mod history;
mod meals;
mod nutrition;
mod profile;
mod state;
mod store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "nutrilog=debug,axum=info,tower_http=info,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    sqlx::migrate!("./migrations").run(&app_state.db).await?;

    if app_state.config.seed_catalog {
        foods::seed::seed_default_catalog(app_state.store.as_ref()).await?;
    }
    tracing::info!(offset = %app_state.calendar.offset(), "reference timezone");

    let app = app::build_app(app_state);
    app::serve(app).await
}
