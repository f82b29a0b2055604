//! Search backend adapters

pub mod meilisearch;

pub use meilisearch::MeilisearchClient;
