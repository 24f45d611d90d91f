//! Bearer-token authentication.
//!
//! Identity is issued by the surrounding account layer; this feature only
//! validates HS256 access tokens and exposes the caller's identity.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/auth/me` | Yes | Current authenticated identity |

mod validator;

pub mod handlers;
pub mod model;
pub mod routes;

pub use validator::JwtValidator;
