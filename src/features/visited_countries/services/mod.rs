mod visited_country_service;

pub use visited_country_service::VisitedCountryService;
