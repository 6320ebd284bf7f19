//! Repository traits: the storage boundary the services are built against.
//!
//! `PgStore` and `MemoryStore` implement every trait. Method names are unique
//! across traits so one store type can implement them all without ambiguity.

use crate::error::StoreError;
use crate::model::{Category, Country, Owner, Pokemon, Review, Reviewer};
use async_trait::async_trait;

#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// All Pokémon ordered by id, each with its reviews.
    async fn get_pokemons(&self) -> Result<Vec<Pokemon>, StoreError>;

    async fn get_pokemon(&self, id: i32) -> Result<Option<Pokemon>, StoreError>;

    /// Find a Pokémon whose name equals `name` once both are trimmed and case-folded.
    async fn get_pokemon_by_name(&self, name: &str) -> Result<Option<Pokemon>, StoreError>;

    async fn pokemon_exists(&self, id: i32) -> Result<bool, StoreError>;

    /// Mean review rating, 0 when the Pokémon has no reviews.
    async fn get_pokemon_rating(&self, id: i32) -> Result<f64, StoreError>;

    /// Insert the Pokémon and link it to one owner and one category. Returns the stored row.
    async fn create_pokemon(
        &self,
        owner_id: i32,
        category_id: i32,
        pokemon: &Pokemon,
    ) -> Result<Pokemon, StoreError>;

    /// Replace name and birth date and move the owner and category links.
    async fn update_pokemon(
        &self,
        owner_id: i32,
        category_id: i32,
        pokemon: &Pokemon,
    ) -> Result<(), StoreError>;

    async fn delete_pokemon(&self, id: i32) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn get_reviews(&self) -> Result<Vec<Review>, StoreError>;

    async fn get_review(&self, id: i32) -> Result<Option<Review>, StoreError>;

    async fn get_reviews_of_a_pokemon(&self, pokemon_id: i32) -> Result<Vec<Review>, StoreError>;

    async fn review_exists(&self, id: i32) -> Result<bool, StoreError>;

    async fn create_review(&self, review: &Review) -> Result<Review, StoreError>;

    /// Update title, text and rating. The pokemon and reviewer links are kept.
    async fn update_review(&self, review: &Review) -> Result<(), StoreError>;

    async fn delete_review(&self, id: i32) -> Result<(), StoreError>;

    /// Delete a batch of reviews in one transaction.
    async fn delete_reviews(&self, reviews: &[Review]) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ReviewerRepository: Send + Sync {
    async fn get_reviewers(&self) -> Result<Vec<Reviewer>, StoreError>;

    async fn get_reviewer(&self, id: i32) -> Result<Option<Reviewer>, StoreError>;

    async fn get_reviews_by_reviewer(&self, reviewer_id: i32) -> Result<Vec<Review>, StoreError>;

    async fn reviewer_exists(&self, id: i32) -> Result<bool, StoreError>;

    async fn create_reviewer(&self, reviewer: &Reviewer) -> Result<Reviewer, StoreError>;

    async fn update_reviewer(&self, reviewer: &Reviewer) -> Result<(), StoreError>;

    async fn delete_reviewer(&self, id: i32) -> Result<(), StoreError>;
}

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn get_owners(&self) -> Result<Vec<Owner>, StoreError>;

    async fn get_owner(&self, id: i32) -> Result<Option<Owner>, StoreError>;

    /// Owners linked to the given Pokémon.
    async fn get_owner_of_a_pokemon(&self, pokemon_id: i32) -> Result<Vec<Owner>, StoreError>;

    /// Pokémon linked to the given owner, without their reviews.
    async fn get_pokemon_by_owner(&self, owner_id: i32) -> Result<Vec<Pokemon>, StoreError>;

    async fn owner_exists(&self, id: i32) -> Result<bool, StoreError>;

    async fn create_owner(&self, owner: &Owner) -> Result<Owner, StoreError>;

    /// Rename the owner. The country link is kept.
    async fn update_owner(&self, owner: &Owner) -> Result<(), StoreError>;

    async fn delete_owner(&self, id: i32) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn get_countries(&self) -> Result<Vec<Country>, StoreError>;

    async fn get_country(&self, id: i32) -> Result<Option<Country>, StoreError>;

    async fn get_country_by_owner(&self, owner_id: i32) -> Result<Option<Country>, StoreError>;

    async fn get_owners_from_a_country(&self, country_id: i32) -> Result<Vec<Owner>, StoreError>;

    async fn country_exists(&self, id: i32) -> Result<bool, StoreError>;

    async fn create_country(&self, country: &Country) -> Result<Country, StoreError>;

    async fn update_country(&self, country: &Country) -> Result<(), StoreError>;

    /// Fails while owners still reference the country.
    async fn delete_country(&self, id: i32) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn get_category(&self, id: i32) -> Result<Option<Category>, StoreError>;

    /// Pokémon linked to the given category, without their reviews.
    async fn get_pokemon_by_category(&self, category_id: i32) -> Result<Vec<Pokemon>, StoreError>;

    async fn category_exists(&self, id: i32) -> Result<bool, StoreError>;

    async fn create_category(&self, category: &Category) -> Result<Category, StoreError>;

    async fn update_category(&self, category: &Category) -> Result<(), StoreError>;

    async fn delete_category(&self, id: i32) -> Result<(), StoreError>;
}
