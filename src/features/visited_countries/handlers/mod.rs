mod visited_country_handler;

pub use visited_country_handler::*;
