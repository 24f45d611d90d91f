pub mod auth;
pub mod countries;
pub mod diaries;
pub mod geocoding;
pub mod visited_countries;
