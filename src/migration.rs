//! Schema bootstrap: idempotent DDL for the review application tables.
//! Statements run in dependency order so foreign keys always resolve.

use crate::error::StoreError;
use sqlx::PgPool;

const DDL: &[(&str, &str)] = &[
    (
        "country",
        r#"
        CREATE TABLE IF NOT EXISTS country (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "owner",
        r#"
        CREATE TABLE IF NOT EXISTS owner (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            country_id INTEGER NOT NULL REFERENCES country (id)
        )
        "#,
    ),
    (
        "category",
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "pokemon",
        r#"
        CREATE TABLE IF NOT EXISTS pokemon (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            birth_date TIMESTAMP NOT NULL
        )
        "#,
    ),
    (
        "reviewer",
        r#"
        CREATE TABLE IF NOT EXISTS reviewer (
            id SERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "review",
        r#"
        CREATE TABLE IF NOT EXISTS review (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            rating INTEGER NOT NULL,
            pokemon_id INTEGER NOT NULL REFERENCES pokemon (id),
            reviewer_id INTEGER NOT NULL REFERENCES reviewer (id)
        )
        "#,
    ),
    (
        "pokemon_owner",
        r#"
        CREATE TABLE IF NOT EXISTS pokemon_owner (
            pokemon_id INTEGER NOT NULL REFERENCES pokemon (id) ON DELETE CASCADE,
            owner_id INTEGER NOT NULL REFERENCES owner (id) ON DELETE CASCADE,
            PRIMARY KEY (pokemon_id, owner_id)
        )
        "#,
    ),
    (
        "pokemon_category",
        r#"
        CREATE TABLE IF NOT EXISTS pokemon_category (
            pokemon_id INTEGER NOT NULL REFERENCES pokemon (id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES category (id) ON DELETE CASCADE,
            PRIMARY KEY (pokemon_id, category_id)
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS review_pokemon_id_idx ON review (pokemon_id)",
    "CREATE INDEX IF NOT EXISTS review_reviewer_id_idx ON review (reviewer_id)",
    "CREATE INDEX IF NOT EXISTS owner_country_id_idx ON owner (country_id)",
];

/// Create every table and index that is missing. Safe to run on each start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for (table, sql) in DDL {
        tracing::debug!(table, "ensure table");
        sqlx::query(sql).execute(pool).await?;
    }
    for sql in INDEXES {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!(tables = DDL.len(), "migrations applied");
    Ok(())
}
