//! # Weather Hex
//!
//! Application service layer, periodic refresh and HTTP adapter for the
//! weather service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates provider + repository)
//! - `scheduler/` - Periodic trigger driving the service
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: WeatherProvider` and
//! `R: ReadingRepository`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod scheduler;
pub mod service;


pub use scheduler::{RefreshHealth, RefreshScheduler};
pub use service::WeatherService;
