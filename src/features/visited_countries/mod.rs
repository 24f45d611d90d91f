//! Visited-country ledger.
//!
//! One row per (user, country) holding the number of that user's diary
//! entries resolved to the country. A row exists only while its count is
//! positive; the map highlights exactly the countries with a row.
//!
//! Rows are only written through the `ledger` primitives, which the diary
//! repository calls inside the diary mutation's transaction.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/visited-countries` | Yes | Ledger rows with country details |
//! | GET | `/api/visited-countries/codes` | Yes | Visited ISO codes for map highlighting |

pub mod dtos;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{PgVisitedCountryRepository, VisitedCountryRepository};
pub use services::VisitedCountryService;
