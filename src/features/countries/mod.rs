//! Static country reference data.
//!
//! Countries are seeded out-of-band and never mutated by the application.
//! The repository is shared with the country resolver, which maps a
//! reverse-geocoded ISO code back to a `Country` row.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/countries` | No | List countries |
//! | GET | `/api/countries/{code}` | No | Get country by ISO alpha-2 code |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{CountryRepository, PgCountryRepository};
pub use services::CountryService;
