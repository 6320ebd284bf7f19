use crate::dto::{CategoryDto, CountryDto, OwnerDto, PokemonDto, ReviewDto, ReviewerDto};
use crate::handlers;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::pokemon::list,
        handlers::pokemon::read,
        handlers::pokemon::rating,
        handlers::pokemon::create,
        handlers::pokemon::update,
        handlers::pokemon::delete,
    ),
    components(schemas(PokemonDto, ReviewDto, ReviewerDto, OwnerDto, CountryDto, CategoryDto)),
    tags((name = "pokereview", description = "Pokémon review API"))
)]
pub struct ApiDoc;
