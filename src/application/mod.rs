/// Application layer - Use cases, stores and UI state
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod stores;
pub mod ui;
pub mod use_cases;
