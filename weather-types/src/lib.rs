//! # Weather Types
//!
//! Domain types and port traits for the weather service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (City, Location, Reading)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Provider, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{City, Location, Reading};
pub use dto::*;
pub use error::{AppError, DomainError, ProviderError, RefreshError, RepoError};
pub use ports::{ReadingRepository, WeatherProvider};
