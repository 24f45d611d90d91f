//! Geotagged travel diary entries.
//!
//! Every mutation keeps the visited-country ledger in step: a created entry
//! counts towards the country its coordinate resolves to, a deleted entry
//! stops counting, and a relocated entry moves its count. Country resolution
//! is best-effort; an unresolved coordinate never blocks the diary write.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/diaries` | Yes | List own entries, newest first |
//! | POST | `/api/diaries` | Yes | Create entry |
//! | GET | `/api/diaries/{id}` | Yes | Get own entry |
//! | PATCH | `/api/diaries/{id}` | Yes | Partially update own entry |
//! | DELETE | `/api/diaries/{id}` | Yes | Delete own entry |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{DiaryRepository, PgDiaryRepository};
pub use services::DiaryService;
