/// Application layer - Use cases, traversal engine and DTOs
///
/// This layer contains the application logic that orchestrates
/// lineage services and coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod traversal;
pub mod use_cases;
