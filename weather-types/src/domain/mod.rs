//! Domain models for the weather service.

pub mod city;
pub mod location;
pub mod reading;

pub use city::City;
pub use location::Location;
pub use reading::Reading;
