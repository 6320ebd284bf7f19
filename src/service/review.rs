use super::{not_found, same_name, RequestValidator};
use crate::dto::{map_all, ReviewDto};
use crate::error::AppError;
use crate::repository::{PokemonRepository, ReviewRepository};
use std::sync::Arc;

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    pokemon: Arc<dyn PokemonRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, pokemon: Arc<dyn PokemonRepository>) -> Self {
        Self { reviews, pokemon }
    }

    pub async fn list(&self) -> Result<Vec<ReviewDto>, AppError> {
        Ok(map_all(self.reviews.get_reviews().await?))
    }

    pub async fn get(&self, id: i32) -> Result<ReviewDto, AppError> {
        let review = self
            .reviews
            .get_review(id)
            .await?
            .ok_or_else(|| not_found("review", id))?;
        Ok(review.into())
    }

    pub async fn of_pokemon(&self, pokemon_id: i32) -> Result<Vec<ReviewDto>, AppError> {
        if !self.pokemon.pokemon_exists(pokemon_id).await? {
            return Err(not_found("pokemon", pokemon_id));
        }
        Ok(map_all(self.reviews.get_reviews_of_a_pokemon(pokemon_id).await?))
    }

    pub async fn create(
        &self,
        reviewer_id: i32,
        pokemon_id: i32,
        payload: ReviewDto,
    ) -> Result<ReviewDto, AppError> {
        RequestValidator::name("title", &payload.title)?;
        RequestValidator::rating(payload.rating)?;
        let existing = self.reviews.get_reviews().await?;
        if existing.iter().any(|r| same_name(&r.title, &payload.title)) {
            return Err(AppError::Conflict(format!("Review '{}'", payload.title.trim())));
        }
        let created = self
            .reviews
            .create_review(&payload.into_review(pokemon_id, reviewer_id))
            .await
            .map_err(|e| AppError::persistence("saving", e))?;
        tracing::info!(id = created.id, pokemon_id, reviewer_id, "review created");
        Ok(created.into())
    }

    /// Title, text and rating are replaced; the review stays on its Pokémon and reviewer.
    pub async fn update(&self, id: i32, payload: ReviewDto) -> Result<(), AppError> {
        RequestValidator::same_id(id, payload.id)?;
        let current = self
            .reviews
            .get_review(id)
            .await?
            .ok_or_else(|| not_found("review", id))?;
        RequestValidator::name("title", &payload.title)?;
        RequestValidator::rating(payload.rating)?;
        self.reviews
            .update_review(&payload.into_review(current.pokemon_id, current.reviewer_id))
            .await
            .map_err(|e| AppError::persistence("updating review", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.reviews.review_exists(id).await? {
            return Err(not_found("review", id));
        }
        self.reviews
            .delete_review(id)
            .await
            .map_err(|e| AppError::persistence("deleting review", e))?;
        tracing::info!(id, "review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn dto(title: &str, rating: i32) -> ReviewDto {
        ReviewDto {
            id: 0,
            title: title.into(),
            text: "text".into(),
            rating,
        }
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected_before_storage() {
        let store = Arc::new(MemoryStore::new());
        let svc = ReviewService::new(store.clone(), store);
        let err = svc.create(1, 1, dto("Great", 9)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn review_for_unknown_pokemon_fails_to_persist() {
        let store = Arc::new(MemoryStore::new());
        let svc = ReviewService::new(store.clone(), store);
        let err = svc.create(1, 1, dto("Great", 4)).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
