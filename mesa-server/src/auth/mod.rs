//! Authentication
//!
//! JWT issuance/verification, the request extractors for the two principal
//! types, and role guards.

pub mod extractor;
pub mod guard;
pub mod jwt;

pub use extractor::{CurrentAccount, CurrentGuest};
pub use jwt::{Claims, JwtError, JwtService, TokenKind, TokenPair, TokenUse};
