use super::{not_found, same_name, RequestValidator};
use crate::dto::{map_all, CategoryDto, PokemonDto};
use crate::error::AppError;
use crate::model::Category;
use crate::repository::CategoryRepository;
use std::sync::Arc;

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> Result<Vec<CategoryDto>, AppError> {
        Ok(map_all(self.categories.get_categories().await?))
    }

    pub async fn get(&self, id: i32) -> Result<CategoryDto, AppError> {
        let category = self
            .categories
            .get_category(id)
            .await?
            .ok_or_else(|| not_found("category", id))?;
        Ok(category.into())
    }

    pub async fn pokemon(&self, category_id: i32) -> Result<Vec<PokemonDto>, AppError> {
        if !self.categories.category_exists(category_id).await? {
            return Err(not_found("category", category_id));
        }
        Ok(map_all(self.categories.get_pokemon_by_category(category_id).await?))
    }

    pub async fn create(&self, payload: CategoryDto) -> Result<CategoryDto, AppError> {
        RequestValidator::name("name", &payload.name)?;
        let existing = self.categories.get_categories().await?;
        if existing.iter().any(|c| same_name(&c.name, &payload.name)) {
            return Err(AppError::Conflict(format!("Category '{}'", payload.name.trim())));
        }
        let created = self
            .categories
            .create_category(&Category::from(payload))
            .await
            .map_err(|e| AppError::persistence("saving", e))?;
        tracing::info!(id = created.id, name = %created.name, "category created");
        Ok(created.into())
    }

    pub async fn update(&self, id: i32, payload: CategoryDto) -> Result<(), AppError> {
        RequestValidator::same_id(id, payload.id)?;
        if !self.categories.category_exists(id).await? {
            return Err(not_found("category", id));
        }
        RequestValidator::name("name", &payload.name)?;
        self.categories
            .update_category(&Category::from(payload))
            .await
            .map_err(|e| AppError::persistence("updating category", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.categories.category_exists(id).await? {
            return Err(not_found("category", id));
        }
        self.categories
            .delete_category(id)
            .await
            .map_err(|e| AppError::persistence("deleting category", e))?;
        tracing::info!(id, "category deleted");
        Ok(())
    }
}
