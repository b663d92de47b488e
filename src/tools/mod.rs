// Shared types
pub mod types;

// Pipeline stages
pub mod aggregate;
pub mod batch;
pub mod classify;
pub mod extract;
pub mod fetch;
pub mod sitemap;
