pub mod planet;

// Re-export the core types to provide a clean public API.
pub use planet::Planet;
