//! HTTP server assembly: routes, middleware and shared state.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use expense_backend::Trace;
use expense_backend::inbound::http::configure;
use expense_backend::inbound::http::health::{HealthState, live, ready};
use expense_backend::inbound::http::state::HttpState;

use state_builders::build_http_state;

/// Swagger UI at `/docs`, debug builds only.
#[cfg(debug_assertions)]
fn api_docs() -> utoipa_swagger_ui::SwaggerUi {
    use expense_backend::ApiDoc;
    use utoipa::OpenApi;

    utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

fn expense_app(
    health: web::Data<HealthState>,
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(health)
        .wrap(Trace)
        .service(live)
        .service(ready)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(api_docs());

    app
}

/// Bind the listener and return the running server.
///
/// Readiness is reported once the socket is bound.
///
/// # Errors
/// Returns the bind error when the address is unavailable.
pub fn create_server(health: web::Data<HealthState>, config: ServerConfig) -> std::io::Result<Server> {
    let state = build_http_state(&config);
    let app_health = health.clone();

    let server = HttpServer::new(move || expense_app(app_health.clone(), state.clone()))
        .bind(config.bind_addr)?
        .run();

    health.mark_ready();
    Ok(server)
}
