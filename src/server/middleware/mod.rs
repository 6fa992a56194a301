//! Request middleware and session helpers.
//!
//! - `auth` - Loads the signed-in user into the request and provides the
//!   `AuthUser`/`MaybeUser` extractors
//! - `session` - Typed wrappers over the tower-sessions `Session`
//! - `logging` - One log line per request
//! - `cors` - Permissive cross-origin policy

pub mod auth;
pub mod cors;
pub mod logging;
pub mod session;

#[cfg(test)]
mod test;
