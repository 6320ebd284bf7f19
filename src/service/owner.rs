use super::{not_found, same_name, RequestValidator};
use crate::dto::{map_all, OwnerDto, PokemonDto};
use crate::error::AppError;
use crate::repository::{OwnerRepository, PokemonRepository};
use std::sync::Arc;

pub struct OwnerService {
    owners: Arc<dyn OwnerRepository>,
    pokemon: Arc<dyn PokemonRepository>,
}

impl OwnerService {
    pub fn new(owners: Arc<dyn OwnerRepository>, pokemon: Arc<dyn PokemonRepository>) -> Self {
        Self { owners, pokemon }
    }

    pub async fn list(&self) -> Result<Vec<OwnerDto>, AppError> {
        Ok(map_all(self.owners.get_owners().await?))
    }

    pub async fn get(&self, id: i32) -> Result<OwnerDto, AppError> {
        let owner = self
            .owners
            .get_owner(id)
            .await?
            .ok_or_else(|| not_found("owner", id))?;
        Ok(owner.into())
    }

    pub async fn pokemon(&self, owner_id: i32) -> Result<Vec<PokemonDto>, AppError> {
        if !self.owners.owner_exists(owner_id).await? {
            return Err(not_found("owner", owner_id));
        }
        Ok(map_all(self.owners.get_pokemon_by_owner(owner_id).await?))
    }

    pub async fn of_pokemon(&self, pokemon_id: i32) -> Result<Vec<OwnerDto>, AppError> {
        if !self.pokemon.pokemon_exists(pokemon_id).await? {
            return Err(not_found("pokemon", pokemon_id));
        }
        Ok(map_all(self.owners.get_owner_of_a_pokemon(pokemon_id).await?))
    }

    pub async fn create(&self, country_id: i32, payload: OwnerDto) -> Result<OwnerDto, AppError> {
        RequestValidator::name("name", &payload.name)?;
        let existing = self.owners.get_owners().await?;
        if existing.iter().any(|o| same_name(&o.name, &payload.name)) {
            return Err(AppError::Conflict(format!("Owner '{}'", payload.name.trim())));
        }
        let created = self
            .owners
            .create_owner(&payload.into_owner(country_id))
            .await
            .map_err(|e| AppError::persistence("saving", e))?;
        tracing::info!(id = created.id, country_id, "owner created");
        Ok(created.into())
    }

    /// Rename only; the country link is not part of the payload.
    pub async fn update(&self, id: i32, payload: OwnerDto) -> Result<(), AppError> {
        RequestValidator::same_id(id, payload.id)?;
        let current = self
            .owners
            .get_owner(id)
            .await?
            .ok_or_else(|| not_found("owner", id))?;
        RequestValidator::name("name", &payload.name)?;
        self.owners
            .update_owner(&payload.into_owner(current.country_id))
            .await
            .map_err(|e| AppError::persistence("updating owner", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.owners.owner_exists(id).await? {
            return Err(not_found("owner", id));
        }
        self.owners
            .delete_owner(id)
            .await
            .map_err(|e| AppError::persistence("deleting owner", e))?;
        tracing::info!(id, "owner deleted");
        Ok(())
    }
}
