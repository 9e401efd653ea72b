//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backrub::Trace;
use backrub::inbound::http::configure;
use backrub::inbound::http::error::{json_config, route_not_found};
use backrub::inbound::http::health::HealthState;
use backrub::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Signal handling is left to the caller, which stops the server through its
/// handle.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&ServerConfig::new("localhost", 0)),
        }
    }

    #[actix_web::test]
    async fn app_serves_users_and_unknown_routes() {
        let app = actix_test::init_service(build_app(deps())).await;

        let create = actix_test::TestRequest::post()
            .uri("/user")
            .set_json(json!({"firstname": "Ada", "lastname": "Lovelace"}))
            .to_request();
        let response = actix_test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("trace-id"));

        let missing = actix_test::TestRequest::delete().uri("/user").to_request();
        let response = actix_test::call_service(&app, missing).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload: Value = actix_test::read_body_json(response).await;
        assert_eq!(payload["code"], "not_found");
    }

    #[actix_web::test]
    async fn readiness_reflects_health_state() {
        let deps = deps();
        let health = deps.health_state.clone();
        let app = actix_test::init_service(build_app(deps)).await;

        let probe = || actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, probe()).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let response = actix_test::call_service(&app, probe()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
