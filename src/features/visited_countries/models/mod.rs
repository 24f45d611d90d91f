mod ledger_state;
mod visited_country;

pub use ledger_state::*;
pub use visited_country::*;
