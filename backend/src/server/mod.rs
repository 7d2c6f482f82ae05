//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::records::{create_record, delete_record, list_month, list_year};
use crate::inbound::http::state::HttpState;

const CORS_MAX_AGE_SECS: usize = 60 * 60;

/// Shared state handed to every application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub cors_allowed_origin: Option<String>,
}

fn build_cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::DELETE])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::HeaderName::from_static(crate::domain::TRACE_ID_HEADER)])
        .max_age(CORS_MAX_AGE_SECS);

    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

/// Assemble the application: record routes, health probes, JSON limits,
/// CORS and request tracing.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        cors_allowed_origin,
    } = deps;

    let api = web::scope("/api/records")
        .service(list_month)
        .service(list_year)
        .service(create_record)
        .service(delete_record);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(build_cors(cors_allowed_origin.as_deref()))
        .wrap(Trace)
}

/// Construct an Actix HTTP server using the provided state and configuration.
///
/// Signal handling is left to the caller so readiness can be withdrawn
/// before the server drains.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        cors_allowed_origin,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            cors_allowed_origin: cors_allowed_origin.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
