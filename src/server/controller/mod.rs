//! HTTP handlers.
//!
//! Controllers extract and validate the request, call into the service layer and
//! wrap results in the `{ success, data }` envelope. Errors are returned as
//! `AppError` and rendered by the error middleware.

pub mod auth;
pub mod clan;
pub mod info;
pub mod user;
