//! Stored entities. Rows map onto these through `sqlx::FromRow`.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Pokemon {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDateTime,
    /// Loaded separately from the `review` table.
    #[sqlx(skip)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub pokemon_id: i32,
    pub reviewer_id: i32,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Reviewer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Owner {
    pub id: i32,
    pub name: String,
    pub country_id: i32,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Country {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}
