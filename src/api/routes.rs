use crate::auth::jwt::AuthService;
use crate::auth::middleware::{auth_middleware, require_roles, RoleGate};
use crate::types::Role;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Routes of the API, each path registered once.
///
/// Protected groups carry the authentication gate as their outermost
/// route layer, so the role gate always sees a verified identity.
pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    let authenticate = || middleware::from_fn_with_state(auth_service.clone(), auth_middleware);
    let allow_only =
        |roles: &[Role]| middleware::from_fn_with_state(RoleGate::new(roles), require_roles);

    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/health", get(crate::api::handlers::health::health_check))
        .route("/users", post(crate::api::handlers::users::create_user))
        .route("/register", post(crate::api::handlers::auth::register))
        .route("/login", post(crate::api::handlers::auth::login));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/users", get(crate::api::handlers::users::list_users))
        .route(
            "/users/{id}",
            get(crate::api::handlers::users::get_user)
                .put(crate::api::handlers::users::update_user)
                .delete(crate::api::handlers::users::delete_user),
        )
        .route_layer(authenticate());

    let admin_routes = Router::new()
        .route("/admin", get(crate::api::handlers::roles::admin_area))
        .route_layer(allow_only(&[Role::Admin]))
        .route_layer(authenticate());

    let owner_routes = Router::new()
        .route("/owner", get(crate::api::handlers::roles::owner_area))
        .route_layer(allow_only(&[Role::Owner]))
        .route_layer(authenticate());

    public_routes
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(owner_routes)
}

/// Full application: routes, request tracing, CORS and (optionally) Swagger UI.
pub fn build_app(state: AppState) -> Router {
    let router = create_router(state.auth_service.clone());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::api::ApiDoc::openapi()),
        )
    };

    router
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
