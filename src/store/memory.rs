//! In-process store: the same repository contract as `PgStore`, including its
//! foreign-key and cascade rules, held in ordered maps behind one lock.

use crate::error::StoreError;
use crate::model::{Category, Country, Owner, Pokemon, Review, Reviewer};
use crate::repository::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, ReviewRepository,
    ReviewerRepository,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    next_id: i32,
    pokemon: BTreeMap<i32, Pokemon>,
    reviews: BTreeMap<i32, Review>,
    reviewers: BTreeMap<i32, Reviewer>,
    owners: BTreeMap<i32, Owner>,
    countries: BTreeMap<i32, Country>,
    categories: BTreeMap<i32, Category>,
    /// (pokemon_id, owner_id)
    pokemon_owner: BTreeSet<(i32, i32)>,
    /// (pokemon_id, category_id)
    pokemon_category: BTreeSet<(i32, i32)>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn with_reviews(&self, pokemon: &Pokemon) -> Pokemon {
        let mut p = pokemon.clone();
        p.reviews = self
            .reviews
            .values()
            .filter(|r| r.pokemon_id == p.id)
            .cloned()
            .collect();
        p
    }

    fn check_links(&self, owner_id: i32, category_id: i32) -> Result<(), StoreError> {
        if !self.owners.contains_key(&owner_id) {
            return Err(StoreError::Constraint(format!("owner {} does not exist", owner_id)));
        }
        if !self.categories.contains_key(&category_id) {
            return Err(StoreError::Constraint(format!(
                "category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }

    fn link_pokemon(&mut self, pokemon_id: i32, owner_id: i32, category_id: i32) {
        self.pokemon_owner.insert((pokemon_id, owner_id));
        self.pokemon_category.insert((pokemon_id, category_id));
    }
}

fn missing(kind: &str, id: i32) -> StoreError {
    StoreError::Constraint(format!("{} {} does not exist", kind, id))
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PokemonRepository for MemoryStore {
    async fn get_pokemons(&self) -> Result<Vec<Pokemon>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.pokemon.values().map(|p| t.with_reviews(p)).collect())
    }

    async fn get_pokemon(&self, id: i32) -> Result<Option<Pokemon>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.pokemon.get(&id).map(|p| t.with_reviews(p)))
    }

    async fn get_pokemon_by_name(&self, name: &str) -> Result<Option<Pokemon>, StoreError> {
        let wanted = name.trim().to_uppercase();
        let t = self.tables.read().await;
        Ok(t
            .pokemon
            .values()
            .find(|p| p.name.trim().to_uppercase() == wanted)
            .cloned())
    }

    async fn pokemon_exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.pokemon.contains_key(&id))
    }

    async fn get_pokemon_rating(&self, id: i32) -> Result<f64, StoreError> {
        let t = self.tables.read().await;
        let ratings: Vec<i32> = t
            .reviews
            .values()
            .filter(|r| r.pokemon_id == id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(0.0);
        }
        let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        Ok(sum as f64 / ratings.len() as f64)
    }

    async fn create_pokemon(
        &self,
        owner_id: i32,
        category_id: i32,
        pokemon: &Pokemon,
    ) -> Result<Pokemon, StoreError> {
        let mut t = self.tables.write().await;
        t.check_links(owner_id, category_id)?;
        let id = t.next_id();
        let created = Pokemon {
            id,
            name: pokemon.name.clone(),
            birth_date: pokemon.birth_date,
            reviews: Vec::new(),
        };
        t.pokemon.insert(id, created.clone());
        t.link_pokemon(id, owner_id, category_id);
        Ok(created)
    }

    async fn update_pokemon(
        &self,
        owner_id: i32,
        category_id: i32,
        pokemon: &Pokemon,
    ) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        t.check_links(owner_id, category_id)?;
        let stored = t
            .pokemon
            .get_mut(&pokemon.id)
            .ok_or_else(|| missing("pokemon", pokemon.id))?;
        stored.name = pokemon.name.clone();
        stored.birth_date = pokemon.birth_date;
        t.pokemon_owner.retain(|&(p, _)| p != pokemon.id);
        t.pokemon_category.retain(|&(p, _)| p != pokemon.id);
        t.link_pokemon(pokemon.id, owner_id, category_id);
        Ok(())
    }

    async fn delete_pokemon(&self, id: i32) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        if t.reviews.values().any(|r| r.pokemon_id == id) {
            return Err(StoreError::Constraint(format!(
                "pokemon {} is still referenced by reviews",
                id
            )));
        }
        t.pokemon.remove(&id);
        t.pokemon_owner.retain(|&(p, _)| p != id);
        t.pokemon_category.retain(|&(p, _)| p != id);
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn get_reviews(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self.tables.read().await.reviews.values().cloned().collect())
    }

    async fn get_review(&self, id: i32) -> Result<Option<Review>, StoreError> {
        Ok(self.tables.read().await.reviews.get(&id).cloned())
    }

    async fn get_reviews_of_a_pokemon(&self, pokemon_id: i32) -> Result<Vec<Review>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .reviews
            .values()
            .filter(|r| r.pokemon_id == pokemon_id)
            .cloned()
            .collect())
    }

    async fn review_exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.reviews.contains_key(&id))
    }

    async fn create_review(&self, review: &Review) -> Result<Review, StoreError> {
        let mut t = self.tables.write().await;
        if !t.pokemon.contains_key(&review.pokemon_id) {
            return Err(missing("pokemon", review.pokemon_id));
        }
        if !t.reviewers.contains_key(&review.reviewer_id) {
            return Err(missing("reviewer", review.reviewer_id));
        }
        let id = t.next_id();
        let created = Review {
            id,
            ..review.clone()
        };
        t.reviews.insert(id, created.clone());
        Ok(created)
    }

    async fn update_review(&self, review: &Review) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let stored = t
            .reviews
            .get_mut(&review.id)
            .ok_or_else(|| missing("review", review.id))?;
        stored.title = review.title.clone();
        stored.text = review.text.clone();
        stored.rating = review.rating;
        Ok(())
    }

    async fn delete_review(&self, id: i32) -> Result<(), StoreError> {
        self.tables.write().await.reviews.remove(&id);
        Ok(())
    }

    async fn delete_reviews(&self, reviews: &[Review]) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        for r in reviews {
            t.reviews.remove(&r.id);
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewerRepository for MemoryStore {
    async fn get_reviewers(&self) -> Result<Vec<Reviewer>, StoreError> {
        Ok(self.tables.read().await.reviewers.values().cloned().collect())
    }

    async fn get_reviewer(&self, id: i32) -> Result<Option<Reviewer>, StoreError> {
        Ok(self.tables.read().await.reviewers.get(&id).cloned())
    }

    async fn get_reviews_by_reviewer(&self, reviewer_id: i32) -> Result<Vec<Review>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .reviews
            .values()
            .filter(|r| r.reviewer_id == reviewer_id)
            .cloned()
            .collect())
    }

    async fn reviewer_exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.reviewers.contains_key(&id))
    }

    async fn create_reviewer(&self, reviewer: &Reviewer) -> Result<Reviewer, StoreError> {
        let mut t = self.tables.write().await;
        let id = t.next_id();
        let created = Reviewer {
            id,
            ..reviewer.clone()
        };
        t.reviewers.insert(id, created.clone());
        Ok(created)
    }

    async fn update_reviewer(&self, reviewer: &Reviewer) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let stored = t
            .reviewers
            .get_mut(&reviewer.id)
            .ok_or_else(|| missing("reviewer", reviewer.id))?;
        stored.first_name = reviewer.first_name.clone();
        stored.last_name = reviewer.last_name.clone();
        Ok(())
    }

    async fn delete_reviewer(&self, id: i32) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        if t.reviews.values().any(|r| r.reviewer_id == id) {
            return Err(StoreError::Constraint(format!(
                "reviewer {} is still referenced by reviews",
                id
            )));
        }
        t.reviewers.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl OwnerRepository for MemoryStore {
    async fn get_owners(&self) -> Result<Vec<Owner>, StoreError> {
        Ok(self.tables.read().await.owners.values().cloned().collect())
    }

    async fn get_owner(&self, id: i32) -> Result<Option<Owner>, StoreError> {
        Ok(self.tables.read().await.owners.get(&id).cloned())
    }

    async fn get_owner_of_a_pokemon(&self, pokemon_id: i32) -> Result<Vec<Owner>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .pokemon_owner
            .iter()
            .filter(|&&(p, _)| p == pokemon_id)
            .filter_map(|(_, o)| t.owners.get(o).cloned())
            .collect())
    }

    async fn get_pokemon_by_owner(&self, owner_id: i32) -> Result<Vec<Pokemon>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .pokemon
            .values()
            .filter(|p| t.pokemon_owner.contains(&(p.id, owner_id)))
            .map(|p| t.with_reviews(p))
            .collect())
    }

    async fn owner_exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.owners.contains_key(&id))
    }

    async fn create_owner(&self, owner: &Owner) -> Result<Owner, StoreError> {
        let mut t = self.tables.write().await;
        if !t.countries.contains_key(&owner.country_id) {
            return Err(missing("country", owner.country_id));
        }
        let id = t.next_id();
        let created = Owner {
            id,
            ..owner.clone()
        };
        t.owners.insert(id, created.clone());
        Ok(created)
    }

    async fn update_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let stored = t
            .owners
            .get_mut(&owner.id)
            .ok_or_else(|| missing("owner", owner.id))?;
        stored.name = owner.name.clone();
        Ok(())
    }

    async fn delete_owner(&self, id: i32) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        t.owners.remove(&id);
        t.pokemon_owner.retain(|&(_, o)| o != id);
        Ok(())
    }
}

#[async_trait]
impl CountryRepository for MemoryStore {
    async fn get_countries(&self) -> Result<Vec<Country>, StoreError> {
        Ok(self.tables.read().await.countries.values().cloned().collect())
    }

    async fn get_country(&self, id: i32) -> Result<Option<Country>, StoreError> {
        Ok(self.tables.read().await.countries.get(&id).cloned())
    }

    async fn get_country_by_owner(&self, owner_id: i32) -> Result<Option<Country>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .owners
            .get(&owner_id)
            .and_then(|o| t.countries.get(&o.country_id))
            .cloned())
    }

    async fn get_owners_from_a_country(&self, country_id: i32) -> Result<Vec<Owner>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .owners
            .values()
            .filter(|o| o.country_id == country_id)
            .cloned()
            .collect())
    }

    async fn country_exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.countries.contains_key(&id))
    }

    async fn create_country(&self, country: &Country) -> Result<Country, StoreError> {
        let mut t = self.tables.write().await;
        let id = t.next_id();
        let created = Country {
            id,
            name: country.name.clone(),
        };
        t.countries.insert(id, created.clone());
        Ok(created)
    }

    async fn update_country(&self, country: &Country) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let stored = t
            .countries
            .get_mut(&country.id)
            .ok_or_else(|| missing("country", country.id))?;
        stored.name = country.name.clone();
        Ok(())
    }

    async fn delete_country(&self, id: i32) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        if t.owners.values().any(|o| o.country_id == id) {
            return Err(StoreError::Constraint(format!(
                "country {} is still referenced by owners",
                id
            )));
        }
        t.countries.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i32) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn get_pokemon_by_category(&self, category_id: i32) -> Result<Vec<Pokemon>, StoreError> {
        let t = self.tables.read().await;
        Ok(t
            .pokemon
            .values()
            .filter(|p| t.pokemon_category.contains(&(p.id, category_id)))
            .map(|p| t.with_reviews(p))
            .collect())
    }

    async fn category_exists(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.categories.contains_key(&id))
    }

    async fn create_category(&self, category: &Category) -> Result<Category, StoreError> {
        let mut t = self.tables.write().await;
        let id = t.next_id();
        let created = Category {
            id,
            name: category.name.clone(),
        };
        t.categories.insert(id, created.clone());
        Ok(created)
    }

    async fn update_category(&self, category: &Category) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let stored = t
            .categories
            .get_mut(&category.id)
            .ok_or_else(|| missing("category", category.id))?;
        stored.name = category.name.clone();
        Ok(())
    }

    async fn delete_category(&self, id: i32) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        t.categories.remove(&id);
        t.pokemon_category.retain(|&(_, c)| c != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn seeded() -> (MemoryStore, i32, i32) {
        let store = MemoryStore::new();
        let country = store
            .create_country(&Country { id: 0, name: "Kanto".into() })
            .await
            .unwrap();
        let owner = store
            .create_owner(&Owner { id: 0, name: "Ash".into(), country_id: country.id })
            .await
            .unwrap();
        let category = store
            .create_category(&Category { id: 0, name: "Electric".into() })
            .await
            .unwrap();
        (store, owner.id, category.id)
    }

    fn pikachu() -> Pokemon {
        Pokemon {
            id: 0,
            name: "Pikachu".into(),
            birth_date: NaiveDate::from_ymd_opt(1996, 2, 27)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
            reviews: Vec::new(),
        }
    }

    #[tokio::test]
    async fn create_pokemon_requires_existing_owner_and_category() {
        let (store, owner_id, category_id) = seeded().await;
        let err = store.create_pokemon(999, category_id, &pikachu()).await;
        assert!(matches!(err, Err(StoreError::Constraint(_))));
        let err = store.create_pokemon(owner_id, 999, &pikachu()).await;
        assert!(matches!(err, Err(StoreError::Constraint(_))));
        assert!(store.get_pokemons().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_lookup_ignores_case_and_surrounding_whitespace() {
        let (store, owner_id, category_id) = seeded().await;
        store.create_pokemon(owner_id, category_id, &pikachu()).await.unwrap();
        let found = store.get_pokemon_by_name("  pIKACHU ").await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Pikachu".to_string()));
        assert!(store.get_pokemon_by_name("Raichu").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pokemon_with_reviews_cannot_be_deleted() {
        let (store, owner_id, category_id) = seeded().await;
        let p = store.create_pokemon(owner_id, category_id, &pikachu()).await.unwrap();
        let reviewer = store
            .create_reviewer(&Reviewer { id: 0, first_name: "Gary".into(), last_name: "Oak".into() })
            .await
            .unwrap();
        store
            .create_review(&Review {
                id: 0,
                title: "Zappy".into(),
                text: "Very zappy".into(),
                rating: 5,
                pokemon_id: p.id,
                reviewer_id: reviewer.id,
            })
            .await
            .unwrap();
        assert!(store.delete_pokemon(p.id).await.is_err());
        let reviews = store.get_reviews_of_a_pokemon(p.id).await.unwrap();
        store.delete_reviews(&reviews).await.unwrap();
        store.delete_pokemon(p.id).await.unwrap();
        assert!(!store.pokemon_exists(p.id).await.unwrap());
        assert!(store.get_pokemon_by_owner(owner_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn country_with_owners_cannot_be_deleted() {
        let (store, owner_id, _) = seeded().await;
        let country = store.get_country_by_owner(owner_id).await.unwrap().unwrap();
        assert!(store.delete_country(country.id).await.is_err());
        store.delete_owner(owner_id).await.unwrap();
        store.delete_country(country.id).await.unwrap();
        assert!(!store.country_exists(country.id).await.unwrap());
    }
}
