use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post, IntoMakeService};
use axum::{BoxError, Json, Router};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::handlers::{
    default_route_handler, global_404_handler, ping_handler, temp_api_get_token,
    test_notification_handler,
};
use crate::models::GenericResponse;
use crate::swagger::ApiDoc;

#[cfg(test)]
use mockall_double::double;

#[cfg_attr(test, double)]
use crate::database::AppDatabase;

pub fn build_app(db_client: Arc<AppDatabase>) -> IntoMakeService<Router> {
    tracing::debug!("Initializing the app");
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
    let app = Router::new()
        .route("/", get(default_route_handler))
        .route("/api/v1/ping", get(ping_handler))
        .route("/api/v1/temp/token", get(temp_api_get_token))
        .route("/api/v1/notification/test", post(test_notification_handler))
        .merge(swagger_ui)
        .fallback(global_404_handler)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db_client);
    app.into_make_service()
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<GenericResponse>) {
    let (status, msg) = if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_owned())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    };
    tracing::debug!(msg);
    let response = GenericResponse {
        success: false,
        message: msg.to_owned(),
    };
    (status, Json(response))
}
