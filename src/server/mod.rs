//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM for database operations,
//! tower-sessions for cookie-backed sessions and the `oauth2` crate for the
//! Google, Apple and Twitter sign-in flows.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and the terminal JSON error renderer
//! - **Middleware** (`middleware/`) - Request logging, CORS, session helpers and principal rehydration
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP client, OAuth clients)
//! - **Startup** (`startup`) - Database connection, schema sync, sessions and OAuth clients
//! - **App** (`app`) - Assembly of the middleware pipeline and route group mounts
//! - **Router** (`router`) - Route tables for each route group and the OpenAPI document
//!
//! # Request Flow
//!
//! 1. The error renderer wraps everything and turns error responses into the JSON envelope
//! 2. Panics are caught, CORS headers applied and the request is logged
//! 3. The session is resumed and any signed-in user attached to the request
//! 4. The router dispatches to a controller, or to the 404 fallback
//! 5. Controllers call services, services call repositories, DTOs go back out

pub mod app;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
