mod visited_country_dto;

pub use visited_country_dto::*;
