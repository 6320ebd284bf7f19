//! Shared application state: the repository handles injected into every service.

use crate::repository::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, ReviewRepository,
    ReviewerRepository,
};
use crate::service::{
    CategoryService, CountryService, OwnerService, PokemonService, ReviewService, ReviewerService,
};
use crate::store::{MemoryStore, PgStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pokemon: Arc<dyn PokemonRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub reviewers: Arc<dyn ReviewerRepository>,
    pub owners: Arc<dyn OwnerRepository>,
    pub countries: Arc<dyn CountryRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    /// Present when backed by PostgreSQL; used by the readiness probe.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Use one store for every repository.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PokemonRepository
            + ReviewRepository
            + ReviewerRepository
            + OwnerRepository
            + CountryRepository
            + CategoryRepository
            + 'static,
    {
        Self {
            pokemon: store.clone(),
            reviews: store.clone(),
            reviewers: store.clone(),
            owners: store.clone(),
            countries: store.clone(),
            categories: store,
            pool: None,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let mut state = Self::from_store(Arc::new(PgStore::new(pool.clone())));
        state.pool = Some(pool);
        state
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    pub fn pokemon_service(&self) -> PokemonService {
        PokemonService::new(self.pokemon.clone(), self.reviews.clone())
    }

    pub fn owner_service(&self) -> OwnerService {
        OwnerService::new(self.owners.clone(), self.pokemon.clone())
    }

    pub fn country_service(&self) -> CountryService {
        CountryService::new(self.countries.clone(), self.owners.clone())
    }

    pub fn category_service(&self) -> CategoryService {
        CategoryService::new(self.categories.clone())
    }

    pub fn review_service(&self) -> ReviewService {
        ReviewService::new(self.reviews.clone(), self.pokemon.clone())
    }

    pub fn reviewer_service(&self) -> ReviewerService {
        ReviewerService::new(self.reviewers.clone(), self.reviews.clone())
    }
}
