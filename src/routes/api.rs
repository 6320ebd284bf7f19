//! Resource routes under `/api`.

use crate::handlers::{category, country, owner, pokemon, review, reviewer};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/pokemon", get(pokemon::list).post(pokemon::create))
        .route(
            "/api/pokemon/:id",
            get(pokemon::read).put(pokemon::update).delete(pokemon::delete),
        )
        .route("/api/pokemon/:id/rating", get(pokemon::rating))
        .route("/api/owner", get(owner::list).post(owner::create))
        .route(
            "/api/owner/:id",
            get(owner::read).put(owner::update).delete(owner::delete),
        )
        .route("/api/owner/:id/pokemon", get(owner::pokemon))
        .route("/api/owner/pokemon/:poke_id", get(owner::of_pokemon))
        .route("/api/country", get(country::list).post(country::create))
        .route(
            "/api/country/:id",
            get(country::read).put(country::update).delete(country::delete),
        )
        .route("/api/country/:id/owners", get(country::owners))
        .route("/api/country/owners/:owner_id", get(country::of_owner))
        .route("/api/category", get(category::list).post(category::create))
        .route(
            "/api/category/:id",
            get(category::read).put(category::update).delete(category::delete),
        )
        .route("/api/category/pokemon/:category_id", get(category::pokemon))
        .route("/api/review", get(review::list).post(review::create))
        .route(
            "/api/review/:id",
            get(review::read).put(review::update).delete(review::delete),
        )
        .route("/api/review/pokemon/:poke_id", get(review::of_pokemon))
        .route("/api/reviewer", get(reviewer::list).post(reviewer::create))
        .route(
            "/api/reviewer/:id",
            get(reviewer::read).put(reviewer::update).delete(reviewer::delete),
        )
        .route("/api/reviewer/:id/reviews", get(reviewer::reviews))
        .with_state(state)
}
