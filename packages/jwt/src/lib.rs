//! JSON Web Token signing and verification (JWS compact serialization)
//!
//! Supports the HS, RS, PS and ES families of RFC 7518 with 256, 384 and 512
//! bit digests. Tokens are decoded into a [`Token`] carrying the header, the
//! claims and the exact signing input.
//!
//! Time-based claims are exposed through [`Claims::expiration`] and friends
//! but never enforced.

mod algorithms;
mod compact;
mod crypto;
mod error;
mod keys;
mod types;

pub use algorithms::{Algorithm, KeyFamily};
pub use compact::{decode_unverified, sign, verify};
pub use error::{JwtError, JwtResult};
pub use keys::{SigningKey, VerifyingKey};
pub use types::{Audience, Claims, Header, NumericDate, Token};
