use std::time::Duration;

use async_graphql::http::{GraphiQLSource, ALL_WEBSOCKET_PROTOCOLS};
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use infra::Store;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::gql::TriviaSchema;
use crate::state::AppState;

/// Build the Axum router with health endpoint and GraphQL
pub fn build_router(state: AppState, schema: TriviaSchema) -> Router {
    let mut router = Router::new()
        // Simple liveness check; also proves store connectivity.
        .route("/health", get(health))
        // Queries and mutations over HTTP, subscriptions over WebSocket
        .route(
            "/graphql",
            post({
                let schema_clone = schema.clone();
                move |req| graphql_handler(req, schema_clone)
            })
            .get({
                let schema_clone = schema.clone();
                move |protocol, upgrade| graphql_ws_handler(protocol, upgrade, schema_clone)
            }),
        );

    if state.config().introspection_enabled {
        router = router.route("/graphiql", get(graphiql));
    }

    let origins: Vec<HeaderValue> = state
        .config()
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    router
        // App state (store, hub, config)
        .with_state(state)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        )
}

async fn graphql_handler(req: GraphQLRequest, schema: TriviaSchema) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// WebSocket handler for GraphQL subscriptions.
/// The connection (and every subscription on it) ends when the client goes away.
async fn graphql_ws_handler(
    protocol: GraphQLProtocol,
    upgrade: WebSocketUpgrade,
    schema: TriviaSchema,
) -> Response {
    upgrade
        .protocols(ALL_WEBSOCKET_PROTOCOLS)
        .on_upgrade(move |stream| GraphQLWebSocket::new(stream, schema, protocol).serve())
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/graphql")
            .finish(),
    )
}

/// Liveness + quick store probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.store.health_check().await?;
    Ok("ok")
}
