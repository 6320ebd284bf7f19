//! PostgreSQL implementation of the repository traits.

use crate::error::StoreError;
use crate::model::{Category, Country, Owner, Pokemon, Review, Reviewer};
use crate::repository::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, ReviewRepository,
    ReviewerRepository,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

const POKEMON_COLUMNS: &str = "p.id, p.name, p.birth_date";
const REVIEW_COLUMNS: &str = "id, title, text, rating, pokemon_id, reviewer_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Load reviews for the given Pokémon in one query and attach them.
    async fn with_reviews(&self, mut pokemons: Vec<Pokemon>) -> Result<Vec<Pokemon>, StoreError> {
        if pokemons.is_empty() {
            return Ok(pokemons);
        }
        let ids: Vec<i32> = pokemons.iter().map(|p| p.id).collect();
        let sql = format!(
            "SELECT {} FROM review WHERE pokemon_id = ANY($1) ORDER BY id",
            REVIEW_COLUMNS
        );
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        let reviews: Vec<Review> = sqlx::query_as(&sql).bind(&ids).fetch_all(&self.pool).await?;
        let mut by_pokemon: HashMap<i32, Vec<Review>> = HashMap::new();
        for r in reviews {
            by_pokemon.entry(r.pokemon_id).or_default().push(r);
        }
        for p in &mut pokemons {
            p.reviews = by_pokemon.remove(&p.id).unwrap_or_default();
        }
        Ok(pokemons)
    }

    async fn exists(&self, table: &'static str, id: i32) -> Result<bool, StoreError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
        tracing::debug!(sql = %sql, id, "query");
        let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, table: &'static str, id: i32) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn link_pokemon(
        tx: &mut sqlx::PgConnection,
        pokemon_id: i32,
        owner_id: i32,
        category_id: i32,
    ) -> Result<(), StoreError> {
        tracing::debug!(pokemon_id, owner_id, category_id, "link pokemon (tx)");
        sqlx::query("INSERT INTO pokemon_owner (pokemon_id, owner_id) VALUES ($1, $2)")
            .bind(pokemon_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO pokemon_category (pokemon_id, category_id) VALUES ($1, $2)")
            .bind(pokemon_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PokemonRepository for PgStore {
    async fn get_pokemons(&self) -> Result<Vec<Pokemon>, StoreError> {
        let sql = format!("SELECT {} FROM pokemon p ORDER BY p.id", POKEMON_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<Pokemon> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        self.with_reviews(rows).await
    }

    async fn get_pokemon(&self, id: i32) -> Result<Option<Pokemon>, StoreError> {
        let sql = format!("SELECT {} FROM pokemon p WHERE p.id = $1", POKEMON_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<Pokemon> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        match row {
            Some(p) => Ok(self.with_reviews(vec![p]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn get_pokemon_by_name(&self, name: &str) -> Result<Option<Pokemon>, StoreError> {
        let sql = format!(
            "SELECT {} FROM pokemon p WHERE UPPER(TRIM(p.name)) = UPPER(TRIM($1)) LIMIT 1",
            POKEMON_COLUMNS
        );
        tracing::debug!(sql = %sql, name, "query");
        let row = sqlx::query_as(&sql).bind(name).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn pokemon_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.exists("pokemon", id).await
    }

    async fn get_pokemon_rating(&self, id: i32) -> Result<f64, StoreError> {
        let sql = "SELECT AVG(rating)::FLOAT8 FROM review WHERE pokemon_id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let avg: Option<f64> = sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await?;
        Ok(avg.unwrap_or(0.0))
    }

    async fn create_pokemon(
        &self,
        owner_id: i32,
        category_id: i32,
        pokemon: &Pokemon,
    ) -> Result<Pokemon, StoreError> {
        let mut tx = self.pool.begin().await?;
        let created: Pokemon = sqlx::query_as(
            "INSERT INTO pokemon (name, birth_date) VALUES ($1, $2) RETURNING id, name, birth_date",
        )
        .bind(&pokemon.name)
        .bind(pokemon.birth_date)
        .fetch_one(&mut *tx)
        .await?;
        Self::link_pokemon(&mut tx, created.id, owner_id, category_id).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn update_pokemon(
        &self,
        owner_id: i32,
        category_id: i32,
        pokemon: &Pokemon,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE pokemon SET name = $2, birth_date = $3 WHERE id = $1")
            .bind(pokemon.id)
            .bind(&pokemon.name)
            .bind(pokemon.birth_date)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM pokemon_owner WHERE pokemon_id = $1")
            .bind(pokemon.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM pokemon_category WHERE pokemon_id = $1")
            .bind(pokemon.id)
            .execute(&mut *tx)
            .await?;
        Self::link_pokemon(&mut tx, pokemon.id, owner_id, category_id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_pokemon(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("pokemon", id).await
    }
}

#[async_trait]
impl ReviewRepository for PgStore {
    async fn get_reviews(&self) -> Result<Vec<Review>, StoreError> {
        let sql = format!("SELECT {} FROM review ORDER BY id", REVIEW_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
    }

    async fn get_review(&self, id: i32) -> Result<Option<Review>, StoreError> {
        let sql = format!("SELECT {} FROM review WHERE id = $1", REVIEW_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn get_reviews_of_a_pokemon(&self, pokemon_id: i32) -> Result<Vec<Review>, StoreError> {
        let sql = format!(
            "SELECT {} FROM review WHERE pokemon_id = $1 ORDER BY id",
            REVIEW_COLUMNS
        );
        tracing::debug!(sql = %sql, pokemon_id, "query");
        Ok(sqlx::query_as(&sql).bind(pokemon_id).fetch_all(&self.pool).await?)
    }

    async fn review_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.exists("review", id).await
    }

    async fn create_review(&self, review: &Review) -> Result<Review, StoreError> {
        let sql = format!(
            "INSERT INTO review (title, text, rating, pokemon_id, reviewer_id) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            REVIEW_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql)
            .bind(&review.title)
            .bind(&review.text)
            .bind(review.rating)
            .bind(review.pokemon_id)
            .bind(review.reviewer_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_review(&self, review: &Review) -> Result<(), StoreError> {
        let sql = "UPDATE review SET title = $2, text = $3, rating = $4 WHERE id = $1";
        tracing::debug!(sql = %sql, id = review.id, "query");
        sqlx::query(sql)
            .bind(review.id)
            .bind(&review.title)
            .bind(&review.text)
            .bind(review.rating)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_review(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("review", id).await
    }

    async fn delete_reviews(&self, reviews: &[Review]) -> Result<(), StoreError> {
        let ids: Vec<i32> = reviews.iter().map(|r| r.id).collect();
        let mut tx = self.pool.begin().await?;
        tracing::debug!(ids = ?ids, "delete reviews (tx)");
        sqlx::query("DELETE FROM review WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ReviewerRepository for PgStore {
    async fn get_reviewers(&self) -> Result<Vec<Reviewer>, StoreError> {
        let sql = "SELECT id, first_name, last_name FROM reviewer ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn get_reviewer(&self, id: i32) -> Result<Option<Reviewer>, StoreError> {
        let sql = "SELECT id, first_name, last_name FROM reviewer WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn get_reviews_by_reviewer(&self, reviewer_id: i32) -> Result<Vec<Review>, StoreError> {
        let sql = format!(
            "SELECT {} FROM review WHERE reviewer_id = $1 ORDER BY id",
            REVIEW_COLUMNS
        );
        tracing::debug!(sql = %sql, reviewer_id, "query");
        Ok(sqlx::query_as(&sql).bind(reviewer_id).fetch_all(&self.pool).await?)
    }

    async fn reviewer_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.exists("reviewer", id).await
    }

    async fn create_reviewer(&self, reviewer: &Reviewer) -> Result<Reviewer, StoreError> {
        let sql = "INSERT INTO reviewer (first_name, last_name) VALUES ($1, $2) RETURNING id, first_name, last_name";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql)
            .bind(&reviewer.first_name)
            .bind(&reviewer.last_name)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_reviewer(&self, reviewer: &Reviewer) -> Result<(), StoreError> {
        let sql = "UPDATE reviewer SET first_name = $2, last_name = $3 WHERE id = $1";
        tracing::debug!(sql = %sql, id = reviewer.id, "query");
        sqlx::query(sql)
            .bind(reviewer.id)
            .bind(&reviewer.first_name)
            .bind(&reviewer.last_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_reviewer(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("reviewer", id).await
    }
}

#[async_trait]
impl OwnerRepository for PgStore {
    async fn get_owners(&self) -> Result<Vec<Owner>, StoreError> {
        let sql = "SELECT id, name, country_id FROM owner ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn get_owner(&self, id: i32) -> Result<Option<Owner>, StoreError> {
        let sql = "SELECT id, name, country_id FROM owner WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn get_owner_of_a_pokemon(&self, pokemon_id: i32) -> Result<Vec<Owner>, StoreError> {
        let sql = r#"
            SELECT o.id, o.name, o.country_id
            FROM owner o
            JOIN pokemon_owner po ON po.owner_id = o.id
            WHERE po.pokemon_id = $1
            ORDER BY o.id
        "#;
        tracing::debug!(sql = %sql, pokemon_id, "query");
        Ok(sqlx::query_as(sql).bind(pokemon_id).fetch_all(&self.pool).await?)
    }

    async fn get_pokemon_by_owner(&self, owner_id: i32) -> Result<Vec<Pokemon>, StoreError> {
        let sql = format!(
            "SELECT {} FROM pokemon p JOIN pokemon_owner po ON po.pokemon_id = p.id WHERE po.owner_id = $1 ORDER BY p.id",
            POKEMON_COLUMNS
        );
        tracing::debug!(sql = %sql, owner_id, "query");
        let rows: Vec<Pokemon> = sqlx::query_as(&sql).bind(owner_id).fetch_all(&self.pool).await?;
        self.with_reviews(rows).await
    }

    async fn owner_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.exists("owner", id).await
    }

    async fn create_owner(&self, owner: &Owner) -> Result<Owner, StoreError> {
        let sql = "INSERT INTO owner (name, country_id) VALUES ($1, $2) RETURNING id, name, country_id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql)
            .bind(&owner.name)
            .bind(owner.country_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_owner(&self, owner: &Owner) -> Result<(), StoreError> {
        let sql = "UPDATE owner SET name = $2 WHERE id = $1";
        tracing::debug!(sql = %sql, id = owner.id, "query");
        sqlx::query(sql)
            .bind(owner.id)
            .bind(&owner.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_owner(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("owner", id).await
    }
}

#[async_trait]
impl CountryRepository for PgStore {
    async fn get_countries(&self) -> Result<Vec<Country>, StoreError> {
        let sql = "SELECT id, name FROM country ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn get_country(&self, id: i32) -> Result<Option<Country>, StoreError> {
        let sql = "SELECT id, name FROM country WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn get_country_by_owner(&self, owner_id: i32) -> Result<Option<Country>, StoreError> {
        let sql = "SELECT c.id, c.name FROM country c JOIN owner o ON o.country_id = c.id WHERE o.id = $1";
        tracing::debug!(sql = %sql, owner_id, "query");
        Ok(sqlx::query_as(sql).bind(owner_id).fetch_optional(&self.pool).await?)
    }

    async fn get_owners_from_a_country(&self, country_id: i32) -> Result<Vec<Owner>, StoreError> {
        let sql = "SELECT id, name, country_id FROM owner WHERE country_id = $1 ORDER BY id";
        tracing::debug!(sql = %sql, country_id, "query");
        Ok(sqlx::query_as(sql).bind(country_id).fetch_all(&self.pool).await?)
    }

    async fn country_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.exists("country", id).await
    }

    async fn create_country(&self, country: &Country) -> Result<Country, StoreError> {
        let sql = "INSERT INTO country (name) VALUES ($1) RETURNING id, name";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).bind(&country.name).fetch_one(&self.pool).await?)
    }

    async fn update_country(&self, country: &Country) -> Result<(), StoreError> {
        let sql = "UPDATE country SET name = $2 WHERE id = $1";
        tracing::debug!(sql = %sql, id = country.id, "query");
        sqlx::query(sql)
            .bind(country.id)
            .bind(&country.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_country(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("country", id).await
    }
}

#[async_trait]
impl CategoryRepository for PgStore {
    async fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        let sql = "SELECT id, name FROM category ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).fetch_all(&self.pool).await?)
    }

    async fn get_category(&self, id: i32) -> Result<Option<Category>, StoreError> {
        let sql = "SELECT id, name FROM category WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn get_pokemon_by_category(&self, category_id: i32) -> Result<Vec<Pokemon>, StoreError> {
        let sql = format!(
            "SELECT {} FROM pokemon p JOIN pokemon_category pc ON pc.pokemon_id = p.id WHERE pc.category_id = $1 ORDER BY p.id",
            POKEMON_COLUMNS
        );
        tracing::debug!(sql = %sql, category_id, "query");
        let rows: Vec<Pokemon> = sqlx::query_as(&sql).bind(category_id).fetch_all(&self.pool).await?;
        self.with_reviews(rows).await
    }

    async fn category_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.exists("category", id).await
    }

    async fn create_category(&self, category: &Category) -> Result<Category, StoreError> {
        let sql = "INSERT INTO category (name) VALUES ($1) RETURNING id, name";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(sql).bind(&category.name).fetch_one(&self.pool).await?)
    }

    async fn update_category(&self, category: &Category) -> Result<(), StoreError> {
        let sql = "UPDATE category SET name = $2 WHERE id = $1";
        tracing::debug!(sql = %sql, id = category.id, "query");
        sqlx::query(sql)
            .bind(category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_category(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("category", id).await
    }
}
