mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

pub use state::AppState;

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    // A dataset that cannot load is fatal to startup.
    if let Err(e) = state.dataset() {
        return Err(std::io::Error::other(e.to_string()));
    }

    let data = web::Data::new(state);

    tracing::info!("Starting listing dashboard on http://localhost:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .app_data(handlers::query_config())
            .route("/", web::get().to(handlers::index_html))
            .route("/api/options", web::get().to(handlers::options))
            .route("/api/dashboard", web::get().to(handlers::dashboard))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
