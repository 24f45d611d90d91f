mod country;

pub use country::*;
