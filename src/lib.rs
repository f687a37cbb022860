//! trip-chain core
//!
//! Reconstructs the overall origin and destination of each trip from
//! unordered itinerary segment rows, reporting inconsistencies as data.

pub mod traits;
pub mod model;
pub mod anomaly;
pub mod degree;
pub mod chain;
pub mod ordering;
pub mod reconstruct;
pub mod table;
pub mod enrichment;
pub mod error;

pub use error::Error;
