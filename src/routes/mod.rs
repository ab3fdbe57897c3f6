use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, with_security_headers};
use crate::handlers::{auth, courts, health_check, reservations, users};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/verify", get(auth::verify_token))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout));

    let user_routes = Router::new()
        .route("/perfil", get(users::get_profile).put(users::update_profile))
        .route("/password", put(users::change_password))
        .route("/cuenta", delete(users::deactivate_account));

    // The public routes come first; the `:id` capture only matches once
    // the static segments have been tried.
    let court_routes = Router::new()
        .route("/publicas", get(courts::list_public_courts))
        .route("/publica/:id", get(courts::get_public_court))
        .route("/opciones", get(courts::get_options))
        .route("/", post(courts::create_court))
        .route("/mis-canchas", get(courts::list_owned_courts))
        .route(
            "/:id",
            get(courts::get_owned_court)
                .put(courts::update_court)
                .delete(courts::delete_court),
        );

    let reservation_routes = Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/mis-reservas", get(reservations::list_own_reservations))
        .route(
            "/mis-canchas",
            get(reservations::list_owned_court_reservations),
        )
        .route("/:id", put(reservations::update_reservation))
        .route("/:id/cancelar", patch(reservations::cancel_reservation));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/usuarios", user_routes)
        .nest("/api/canchas", court_routes)
        .nest("/api/reservas", reservation_routes)
        .with_state(state);

    with_security_headers(app)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
}
