use super::{not_found, RequestValidator};
use crate::dto::{map_all, ReviewDto, ReviewerDto};
use crate::error::AppError;
use crate::model::Reviewer;
use crate::repository::{ReviewRepository, ReviewerRepository};
use std::sync::Arc;

pub struct ReviewerService {
    reviewers: Arc<dyn ReviewerRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewerService {
    pub fn new(reviewers: Arc<dyn ReviewerRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviewers, reviews }
    }

    pub async fn list(&self) -> Result<Vec<ReviewerDto>, AppError> {
        Ok(map_all(self.reviewers.get_reviewers().await?))
    }

    pub async fn get(&self, id: i32) -> Result<ReviewerDto, AppError> {
        let reviewer = self
            .reviewers
            .get_reviewer(id)
            .await?
            .ok_or_else(|| not_found("reviewer", id))?;
        Ok(reviewer.into())
    }

    pub async fn reviews(&self, reviewer_id: i32) -> Result<Vec<ReviewDto>, AppError> {
        if !self.reviewers.reviewer_exists(reviewer_id).await? {
            return Err(not_found("reviewer", reviewer_id));
        }
        Ok(map_all(self.reviewers.get_reviews_by_reviewer(reviewer_id).await?))
    }

    pub async fn create(&self, payload: ReviewerDto) -> Result<ReviewerDto, AppError> {
        RequestValidator::name("firstName", &payload.first_name)?;
        RequestValidator::name("lastName", &payload.last_name)?;
        let created = self
            .reviewers
            .create_reviewer(&Reviewer::from(payload))
            .await
            .map_err(|e| AppError::persistence("saving", e))?;
        tracing::info!(id = created.id, "reviewer created");
        Ok(created.into())
    }

    pub async fn update(&self, id: i32, payload: ReviewerDto) -> Result<(), AppError> {
        RequestValidator::same_id(id, payload.id)?;
        if !self.reviewers.reviewer_exists(id).await? {
            return Err(not_found("reviewer", id));
        }
        RequestValidator::name("firstName", &payload.first_name)?;
        RequestValidator::name("lastName", &payload.last_name)?;
        self.reviewers
            .update_reviewer(&Reviewer::from(payload))
            .await
            .map_err(|e| AppError::persistence("updating reviewer", e))
    }

    /// Remove the reviewer's reviews, then the reviewer. Any failure aborts.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.reviewers.reviewer_exists(id).await? {
            return Err(not_found("reviewer", id));
        }
        let reviews = self.reviewers.get_reviews_by_reviewer(id).await?;
        self.reviews
            .delete_reviews(&reviews)
            .await
            .map_err(|e| AppError::persistence("deleting reviews", e))?;
        self.reviewers
            .delete_reviewer(id)
            .await
            .map_err(|e| AppError::persistence("deleting reviewer", e))?;
        tracing::info!(id, reviews = reviews.len(), "reviewer deleted");
        Ok(())
    }
}
