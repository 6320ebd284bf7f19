//! Pokémon: list, get, rating, create, full replace and cascading delete.

use super::{not_found, RequestValidator};
use crate::dto::{map_all, PokemonDto};
use crate::error::AppError;
use crate::model::Pokemon;
use crate::repository::{PokemonRepository, ReviewRepository};
use std::sync::Arc;

pub struct PokemonService {
    pokemon: Arc<dyn PokemonRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl PokemonService {
    pub fn new(pokemon: Arc<dyn PokemonRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { pokemon, reviews }
    }

    pub async fn list(&self) -> Result<Vec<PokemonDto>, AppError> {
        Ok(map_all(self.pokemon.get_pokemons().await?))
    }

    pub async fn get(&self, id: i32) -> Result<PokemonDto, AppError> {
        let pokemon = self
            .pokemon
            .get_pokemon(id)
            .await?
            .ok_or_else(|| not_found("pokemon", id))?;
        Ok(pokemon.into())
    }

    /// Mean rating of the Pokémon's reviews; 0 when it has none.
    pub async fn rating(&self, id: i32) -> Result<f64, AppError> {
        if !self.pokemon.pokemon_exists(id).await? {
            return Err(not_found("pokemon", id));
        }
        Ok(self.pokemon.get_pokemon_rating(id).await?)
    }

    pub async fn create(
        &self,
        owner_id: i32,
        category_id: i32,
        payload: PokemonDto,
    ) -> Result<PokemonDto, AppError> {
        RequestValidator::name("name", &payload.name)?;
        if self.pokemon.get_pokemon_by_name(&payload.name).await?.is_some() {
            return Err(AppError::Conflict(format!("Pokemon '{}'", payload.name.trim())));
        }
        let pokemon: Pokemon = payload.into();
        let created = self
            .pokemon
            .create_pokemon(owner_id, category_id, &pokemon)
            .await
            .map_err(|e| AppError::persistence("saving", e))?;
        tracing::info!(id = created.id, name = %created.name, owner_id, category_id, "pokemon created");
        Ok(created.into())
    }

    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        category_id: i32,
        payload: PokemonDto,
    ) -> Result<(), AppError> {
        RequestValidator::same_id(id, payload.id)?;
        if !self.pokemon.pokemon_exists(id).await? {
            return Err(not_found("pokemon", id));
        }
        RequestValidator::name("name", &payload.name)?;
        let pokemon: Pokemon = payload.into();
        self.pokemon
            .update_pokemon(owner_id, category_id, &pokemon)
            .await
            .map_err(|e| AppError::persistence("updating pokemon", e))?;
        tracing::info!(id, owner_id, category_id, "pokemon updated");
        Ok(())
    }

    /// Delete the Pokémon's reviews, then the Pokémon. Both steps are
    /// best-effort: failures are logged and returned, never raised.
    pub async fn delete(&self, id: i32) -> Result<Vec<String>, AppError> {
        if !self.pokemon.pokemon_exists(id).await? {
            return Err(not_found("pokemon", id));
        }
        let mut errors = Vec::new();

        let deleted_reviews = match self.reviews.get_reviews_of_a_pokemon(id).await {
            Ok(reviews) => self.reviews.delete_reviews(&reviews).await,
            Err(e) => Err(e),
        };
        if let Err(e) = deleted_reviews {
            tracing::warn!(id, error = %e, "deleting reviews failed");
            errors.push(format!("Something went wrong when deleting reviews: {}", e));
        }
        if let Err(e) = self.pokemon.delete_pokemon(id).await {
            tracing::warn!(id, error = %e, "deleting pokemon failed");
            errors.push(format!("Something went wrong deleting pokemon: {}", e));
        }
        if errors.is_empty() {
            tracing::info!(id, "pokemon deleted");
        }
        Ok(errors)
    }
}
