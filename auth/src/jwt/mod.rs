pub mod authority;
pub mod claims;
pub mod errors;

pub use authority::TokenAuthority;
pub use claims::ClaimSet;
pub use claims::EXPIRY_CLAIM;
pub use errors::ClaimError;
pub use errors::TokenError;
pub use errors::TokenRejection;
