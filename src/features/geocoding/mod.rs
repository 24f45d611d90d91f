//! Country resolution for diary coordinates.
//!
//! A coordinate is reverse-geocoded to an ISO country code (Nominatim) and
//! mapped onto a reference `Country`. Resolution never fails the caller:
//! network errors, timeouts, upstream "no match" and unmapped codes all
//! collapse to `None`.

pub mod clients;
pub mod services;
mod spacer;

pub use clients::{GeocodingError, NominatimClient, ReverseGeocoder};
pub use services::{CountryResolver, GeocodingCountryResolver};
pub use spacer::RequestSpacer;
