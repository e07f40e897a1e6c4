//! Central identity handling for the booking API: signed credentials and the
//! claims embedded in them. Keep the public surface thin and split
//! implementation across sub-modules.

mod claims;
mod tokens;

pub use claims::Claims;
pub use tokens::{TokenIssuer, TOKEN_TTL};
