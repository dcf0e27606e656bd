pub mod bronze;
pub mod config;
pub mod error;
pub mod gold;
pub mod logging;
pub mod pipeline;
pub mod quality;
pub mod silver;
pub mod storage;

// Domain data shapes shared across layers
pub mod domain;
