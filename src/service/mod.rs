//! Services: validate, check existence, then read or write through the repositories.

mod category;
mod country;
mod owner;
mod pokemon;
mod review;
mod reviewer;
mod validation;

pub use category::CategoryService;
pub use country::CountryService;
pub use owner::OwnerService;
pub use pokemon::PokemonService;
pub use review::ReviewService;
pub use reviewer::ReviewerService;
pub use validation::{same_name, RequestValidator};

use crate::error::AppError;

fn not_found(kind: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} {}", kind, id))
}
