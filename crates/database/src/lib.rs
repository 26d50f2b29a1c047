//! # Planets Database Crate
//!
//! The data-access layer of the planets API. It is the only crate that knows
//! planets live in a MongoDB collection.
//!
//! ## Architectural Principles
//!
//! - **Two seams:** `PlanetsDao` is what the HTTP layer talks to;
//!   `PlanetCollection` is what the DAO needs from a document store. Both are
//!   traits, so either side can be replaced by a test double.
//! - **Native ids stay here:** callers pass and receive ids as strings.
//!   Conversion to `ObjectId` (and the `InvalidId` error) happens once, in
//!   `PlanetsRepository`.
//! - **Classified errors:** `DbError::InvalidId` and `DbError::NotFound` are
//!   decided here; every other failure is passed up as a storage error.
//!
//! ## Public API
//!
//! - `open_planets`: builds an `Arc<dyn PlanetsDao>` for the configured backend.
//! - `connect`: establishes and pings a MongoDB connection.
//! - `PlanetsRepository`: the `PlanetsDao` implementation.
//! - `MongoCollection` / `MemoryCollection`: the storage backends.
//! - `DbError`: the error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod document;
pub mod error;
pub mod fixtures;
pub mod memory;
pub mod mongo;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, open_planets};
pub use document::PlanetDocument;
pub use error::DbError;
pub use memory::MemoryCollection;
pub use mongo::{MongoCollection, COLLECTION};
pub use repository::{PlanetsDao, PlanetsRepository};
pub use store::PlanetCollection;

#[cfg(any(test, feature = "testing"))]
pub use repository::MockPlanetsDao;
#[cfg(any(test, feature = "testing"))]
pub use store::MockPlanetCollection;
