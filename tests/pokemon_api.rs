use async_trait::async_trait;
use axum::http::StatusCode;
use pokereview::model::Review;
use pokereview::repository::ReviewRepository;
use pokereview::{app, AppState, MemoryStore, StoreError};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{delete, get, id_of, post, put, seed_links, send, test_app};

fn pikachu() -> serde_json::Value {
    json!({ "name": "Pikachu", "birthDate": "1996-02-27T00:00:00" })
}

#[tokio::test]
async fn list_starts_empty() {
    let app = test_app();
    let res = get(&app, "/api/pokemon").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!([]));
}

#[tokio::test]
async fn get_unknown_pokemon_is_404() {
    let app = test_app();
    assert_eq!(get(&app, "/api/pokemon/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/api/pokemon/999/rating").await.status, StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, "/api/pokemon/999").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;

    let res = post(
        &app,
        &format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id),
        pikachu(),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "Successfully created");

    let id = id_of(&app, "/api/pokemon", "name", "Pikachu").await;
    let res = get(&app, &format!("/api/pokemon/{}", id)).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Pikachu");
    assert_eq!(body["birthDate"], "1996-02-27T00:00:00");
    assert_eq!(body["reviews"], json!([]));

    let owned = get(&app, &format!("/api/owner/{}/pokemon", owner_id)).await.json();
    assert_eq!(owned.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_name_is_422_and_not_created() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    let uri = format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id);

    assert_eq!(post(&app, &uri, pikachu()).await.status, StatusCode::OK);
    let res = post(&app, &uri, json!({ "name": "  PIKACHU ", "birthDate": "2000-01-01T00:00:00" })).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.json()["error"]["code"], "conflict");

    let list = get(&app, "/api/pokemon").await.json();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn null_or_malformed_body_is_400() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    let uri = format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id);

    assert_eq!(send(&app, "POST", &uri, Some("null")).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(send(&app, "POST", &uri, Some("{\"name\":")).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(send(&app, "POST", &uri, Some("{\"name\":\"Mew\"}")).await.status, StatusCode::BAD_REQUEST);
    let res = post(&app, &uri, json!({ "name": "   ", "birthDate": "2000-01-01T00:00:00" })).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_link_query_is_400_and_unknown_owner_is_500() {
    let app = test_app();
    let (_, _, category_id) = seed_links(&app).await;

    let res = post(&app, "/api/pokemon", pikachu()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = post(&app, &format!("/api/pokemon?ownerId=999&catId={}", category_id), pikachu()).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json()["error"]["code"], "persistence_error");
}

#[tokio::test]
async fn put_with_mismatched_id_is_400_and_leaves_data() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    let links = format!("ownerId={}&catId={}", owner_id, category_id);
    post(&app, &format!("/api/pokemon?{}", links), pikachu()).await;
    let id = id_of(&app, "/api/pokemon", "name", "Pikachu").await;

    let res = put(
        &app,
        &format!("/api/pokemon/{}?{}", id, links),
        json!({ "id": id + 1, "name": "Raichu", "birthDate": "1996-02-27T00:00:00" }),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, &format!("/api/pokemon/{}", id)).await.json()["name"], "Pikachu");

    let res = send(&app, "PUT", &format!("/api/pokemon/{}?{}", id, links), Some("null")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_replaces_and_moves_owner() {
    let app = test_app();
    let (country_id, owner_id, category_id) = seed_links(&app).await;
    post(&app, &format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id), pikachu()).await;
    let id = id_of(&app, "/api/pokemon", "name", "Pikachu").await;

    post(&app, &format!("/api/owner?countryId={}", country_id), json!({ "name": "Misty" })).await;
    let misty = id_of(&app, "/api/owner", "name", "Misty").await;

    let res = put(
        &app,
        &format!("/api/pokemon/{}?ownerId={}&catId={}", id, misty, category_id),
        json!({ "id": id, "name": "Raichu", "birthDate": "1997-03-01T00:00:00" }),
    )
    .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let body = get(&app, &format!("/api/pokemon/{}", id)).await.json();
    assert_eq!(body["name"], "Raichu");
    assert_eq!(body["birthDate"], "1997-03-01T00:00:00");
    let ash_pokemon = get(&app, &format!("/api/owner/{}/pokemon", owner_id)).await.json();
    assert_eq!(ash_pokemon, json!([]));
    let owners = get(&app, &format!("/api/owner/pokemon/{}", id)).await.json();
    assert_eq!(owners[0]["name"], "Misty");
}

#[tokio::test]
async fn put_unknown_id_is_404() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    let res = put(
        &app,
        &format!("/api/pokemon/77?ownerId={}&catId={}", owner_id, category_id),
        json!({ "id": 77, "name": "Mew", "birthDate": "1996-02-27T00:00:00" }),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rating_and_cascading_delete() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    post(&app, &format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id), pikachu()).await;
    let id = id_of(&app, "/api/pokemon", "name", "Pikachu").await;

    let rating = get(&app, &format!("/api/pokemon/{}/rating", id)).await;
    assert_eq!(rating.status, StatusCode::OK);
    assert_eq!(rating.json().as_f64(), Some(0.0));

    post(&app, "/api/reviewer", json!({ "firstName": "Gary", "lastName": "Oak" })).await;
    let reviewer = id_of(&app, "/api/reviewer", "lastName", "Oak").await;
    let review_uri = format!("/api/review?reviewerId={}&pokeId={}", reviewer, id);
    for (title, rating) in [("Decent", 3), ("Great", 5)] {
        let res = post(&app, &review_uri, json!({ "title": title, "text": "...", "rating": rating })).await;
        assert_eq!(res.status, StatusCode::OK);
    }

    let rating = get(&app, &format!("/api/pokemon/{}/rating", id)).await.json();
    assert_eq!(rating.as_f64(), Some(4.0));
    let body = get(&app, &format!("/api/pokemon/{}", id)).await.json();
    assert_eq!(body["reviews"].as_array().unwrap().len(), 2);

    assert_eq!(delete(&app, &format!("/api/pokemon/{}", id)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &format!("/api/pokemon/{}", id)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/api/review").await.json(), json!([]));
}

#[tokio::test]
async fn birth_date_is_echoed_as_sent() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    let uri = format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id);

    let res = post(&app, &uri, json!({ "name": "Eevee", "birthDate": "2001-07-15T08:30:00" })).await;
    assert_eq!(res.status, StatusCode::OK);
    let id = id_of(&app, "/api/pokemon", "name", "Eevee").await;
    let body = get(&app, &format!("/api/pokemon/{}", id)).await.json();
    assert_eq!(body["birthDate"], "2001-07-15T08:30:00");

    let res = post(&app, &uri, json!({ "name": "Mew", "birthDate": "1996-02-27T00:00:00+02:00" })).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"]["code"], "bad_request");
}

#[tokio::test]
async fn reviews_match_across_pokemon_endpoints() {
    let app = test_app();
    let (_, owner_id, category_id) = seed_links(&app).await;
    post(&app, &format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id), pikachu()).await;
    let id = id_of(&app, "/api/pokemon", "name", "Pikachu").await;

    post(&app, "/api/reviewer", json!({ "firstName": "Gary", "lastName": "Oak" })).await;
    let reviewer = id_of(&app, "/api/reviewer", "lastName", "Oak").await;
    let res = post(
        &app,
        &format!("/api/review?reviewerId={}&pokeId={}", reviewer, id),
        json!({ "title": "Shocking", "text": "Zapped my bike", "rating": 4 }),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    let direct = get(&app, &format!("/api/pokemon/{}", id)).await.json();
    assert_eq!(direct["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(direct["reviews"][0]["title"], "Shocking");

    let by_owner = get(&app, &format!("/api/owner/{}/pokemon", owner_id)).await.json();
    assert_eq!(by_owner[0]["reviews"], direct["reviews"]);
    let by_category = get(&app, &format!("/api/category/pokemon/{}", category_id)).await.json();
    assert_eq!(by_category[0]["reviews"], direct["reviews"]);
}

#[tokio::test]
async fn non_integer_id_is_400_with_error_body() {
    let app = test_app();
    for uri in ["/api/pokemon/abc", "/api/pokemon/abc/rating", "/api/owner/abc"] {
        let res = get(&app, uri).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(res.json()["error"]["code"], "bad_request", "{}", uri);
    }
    assert_eq!(delete(&app, "/api/pokemon/abc").await.json()["error"]["code"], "bad_request");
}

/// Review repository that reads nothing and refuses every batch delete.
struct BrokenReviews;

#[async_trait]
impl ReviewRepository for BrokenReviews {
    async fn get_reviews(&self) -> Result<Vec<Review>, StoreError> {
        Ok(Vec::new())
    }
    async fn get_review(&self, _id: i32) -> Result<Option<Review>, StoreError> {
        Ok(None)
    }
    async fn get_reviews_of_a_pokemon(&self, _pokemon_id: i32) -> Result<Vec<Review>, StoreError> {
        Ok(Vec::new())
    }
    async fn review_exists(&self, _id: i32) -> Result<bool, StoreError> {
        Ok(false)
    }
    async fn create_review(&self, review: &Review) -> Result<Review, StoreError> {
        Ok(review.clone())
    }
    async fn update_review(&self, _review: &Review) -> Result<(), StoreError> {
        Ok(())
    }
    async fn delete_review(&self, _id: i32) -> Result<(), StoreError> {
        Ok(())
    }
    async fn delete_reviews(&self, _reviews: &[Review]) -> Result<(), StoreError> {
        Err(StoreError::Constraint("review table is read-only".into()))
    }
}

#[tokio::test]
async fn delete_is_204_even_when_reviews_cannot_be_removed() {
    let store = Arc::new(MemoryStore::new());
    let healthy = app(AppState::from_store(store.clone()), 1024 * 1024);
    let (_, owner_id, category_id) = seed_links(&healthy).await;
    post(&healthy, &format!("/api/pokemon?ownerId={}&catId={}", owner_id, category_id), pikachu()).await;
    let id = id_of(&healthy, "/api/pokemon", "name", "Pikachu").await;

    let mut state = AppState::from_store(store);
    state.reviews = Arc::new(BrokenReviews);
    let broken = app(state, 1024 * 1024);

    let res = delete(&broken, &format!("/api/pokemon/{}", id)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&healthy, &format!("/api/pokemon/{}", id)).await.status, StatusCode::NOT_FOUND);
}
