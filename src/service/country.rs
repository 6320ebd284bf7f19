use super::{not_found, same_name, RequestValidator};
use crate::dto::{map_all, CountryDto, OwnerDto};
use crate::error::AppError;
use crate::model::Country;
use crate::repository::{CountryRepository, OwnerRepository};
use std::sync::Arc;

pub struct CountryService {
    countries: Arc<dyn CountryRepository>,
    owners: Arc<dyn OwnerRepository>,
}

impl CountryService {
    pub fn new(countries: Arc<dyn CountryRepository>, owners: Arc<dyn OwnerRepository>) -> Self {
        Self { countries, owners }
    }

    pub async fn list(&self) -> Result<Vec<CountryDto>, AppError> {
        Ok(map_all(self.countries.get_countries().await?))
    }

    pub async fn get(&self, id: i32) -> Result<CountryDto, AppError> {
        let country = self
            .countries
            .get_country(id)
            .await?
            .ok_or_else(|| not_found("country", id))?;
        Ok(country.into())
    }

    /// The country an owner lives in.
    pub async fn of_owner(&self, owner_id: i32) -> Result<CountryDto, AppError> {
        if !self.owners.owner_exists(owner_id).await? {
            return Err(not_found("owner", owner_id));
        }
        let country = self
            .countries
            .get_country_by_owner(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("country of owner {}", owner_id)))?;
        Ok(country.into())
    }

    pub async fn owners(&self, country_id: i32) -> Result<Vec<OwnerDto>, AppError> {
        if !self.countries.country_exists(country_id).await? {
            return Err(not_found("country", country_id));
        }
        Ok(map_all(self.countries.get_owners_from_a_country(country_id).await?))
    }

    pub async fn create(&self, payload: CountryDto) -> Result<CountryDto, AppError> {
        RequestValidator::name("name", &payload.name)?;
        let existing = self.countries.get_countries().await?;
        if existing.iter().any(|c| same_name(&c.name, &payload.name)) {
            return Err(AppError::Conflict(format!("Country '{}'", payload.name.trim())));
        }
        let created = self
            .countries
            .create_country(&Country::from(payload))
            .await
            .map_err(|e| AppError::persistence("saving", e))?;
        tracing::info!(id = created.id, name = %created.name, "country created");
        Ok(created.into())
    }

    pub async fn update(&self, id: i32, payload: CountryDto) -> Result<(), AppError> {
        RequestValidator::same_id(id, payload.id)?;
        if !self.countries.country_exists(id).await? {
            return Err(not_found("country", id));
        }
        RequestValidator::name("name", &payload.name)?;
        self.countries
            .update_country(&Country::from(payload))
            .await
            .map_err(|e| AppError::persistence("updating country", e))
    }

    /// Fails with a persistence error while owners still live in the country.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.countries.country_exists(id).await? {
            return Err(not_found("country", id));
        }
        self.countries
            .delete_country(id)
            .await
            .map_err(|e| AppError::persistence("deleting country", e))?;
        tracing::info!(id, "country deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Owner;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn owners_and_owner_country_lookups() {
        let store = Arc::new(MemoryStore::new());
        let svc = CountryService::new(store.clone(), store.clone());
        let kanto = svc.create(CountryDto { id: 0, name: "Kanto".into() }).await.unwrap();
        let ash = store
            .create_owner(&Owner { id: 0, name: "Ash".into(), country_id: kanto.id })
            .await
            .unwrap();

        assert_eq!(svc.of_owner(ash.id).await.unwrap(), kanto);
        let owners = svc.owners(kanto.id).await.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].name, "Ash");
        assert!(matches!(svc.of_owner(999).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn country_with_owners_fails_to_delete() {
        let store = Arc::new(MemoryStore::new());
        let svc = CountryService::new(store.clone(), store.clone());
        let kanto = svc.create(CountryDto { id: 0, name: "Kanto".into() }).await.unwrap();
        store
            .create_owner(&Owner { id: 0, name: "Ash".into(), country_id: kanto.id })
            .await
            .unwrap();
        assert!(matches!(svc.delete(kanto.id).await, Err(AppError::Persistence(_))));
    }
}
