//! Case metrics pipeline: load → coerce → derive → bucket → aggregate.

pub mod aggregate;
pub mod bucketizer;
pub mod cache;
pub mod coerce;
pub mod deriver;
pub mod loader;
pub mod pipeline;
pub mod selection;
pub mod session;
