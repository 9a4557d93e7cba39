mod client;
pub mod queries;

pub use client::{Client, GITHUB_GRAPHQL_URL};
