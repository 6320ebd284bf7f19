//! Transfer objects for the HTTP API and their conversions to and from entities.

use crate::model::{Category, Country, Owner, Pokemon, Review, Reviewer};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDateTime,
    #[serde(default)]
    pub reviews: Vec<ReviewDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[serde(default)]
    pub id: i32,
    pub title: String,
    pub text: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerDto {
    #[serde(default)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
}

/// `?ownerId=&catId=` on Pokémon create and update.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PokemonLinks {
    pub owner_id: i32,
    pub cat_id: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLinks {
    pub country_id: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLinks {
    pub reviewer_id: i32,
    pub poke_id: i32,
}

impl From<Pokemon> for PokemonDto {
    fn from(p: Pokemon) -> Self {
        Self {
            id: p.id,
            name: p.name,
            birth_date: p.birth_date,
            reviews: p.reviews.into_iter().map(ReviewDto::from).collect(),
        }
    }
}

/// Incoming reviews are not part of the Pokémon row and are dropped here.
impl From<PokemonDto> for Pokemon {
    fn from(dto: PokemonDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            birth_date: dto.birth_date,
            reviews: Vec::new(),
        }
    }
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            title: r.title,
            text: r.text,
            rating: r.rating,
        }
    }
}

impl ReviewDto {
    pub fn into_review(self, pokemon_id: i32, reviewer_id: i32) -> Review {
        Review {
            id: self.id,
            title: self.title,
            text: self.text,
            rating: self.rating,
            pokemon_id,
            reviewer_id,
        }
    }
}

impl From<Reviewer> for ReviewerDto {
    fn from(r: Reviewer) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

impl From<ReviewerDto> for Reviewer {
    fn from(dto: ReviewerDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

impl From<Owner> for OwnerDto {
    fn from(o: Owner) -> Self {
        Self { id: o.id, name: o.name }
    }
}

impl OwnerDto {
    pub fn into_owner(self, country_id: i32) -> Owner {
        Owner {
            id: self.id,
            name: self.name,
            country_id,
        }
    }
}

impl From<Country> for CountryDto {
    fn from(c: Country) -> Self {
        Self { id: c.id, name: c.name }
    }
}

impl From<CountryDto> for Country {
    fn from(dto: CountryDto) -> Self {
        Self { id: dto.id, name: dto.name }
    }
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self { id: c.id, name: c.name }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self { id: dto.id, name: dto.name }
    }
}

/// Shape a list of entities into transfer objects.
pub fn map_all<E, D: From<E>>(items: Vec<E>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}
