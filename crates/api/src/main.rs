use keyward_api::app::{self, AppConfig};

#[tokio::main]
async fn main() {
    keyward_observability::init();

    let config = AppConfig::from_env();
    let app = app::build_app(config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
