//! Coordinator-free, time-sortable 64-bit identifiers.
//!
//! A [`SnowflakeGenerator`] packs the milliseconds elapsed since a configured epoch,
//! a datacenter id, a worker id and a per-millisecond sequence into one integer:
//!
//! ```text
//! | 41 bits: elapsed ms | 6 bits: datacenter | 4 bits: worker | 12 bits: sequence |
//! ```
//!
//! ```
//! use std::sync::Arc;
//! use snowflake_id::{IdGenerator, SnowflakeGenerator};
//!
//! let generator: Arc<dyn IdGenerator<String>> = Arc::new(SnowflakeGenerator::default());
//! let key: String = generator.generate().unwrap();
//! assert!(key.parse::<i64>().unwrap() > 0);
//! ```

mod clock;
mod config;
pub mod error;
mod generator;
mod id_generator;
pub mod layout;
mod snowflake_id;

pub use clock::*;
pub use config::{
    ClockRegressionPolicy, SnowflakeConfig, DEFAULT_DATACENTER, DEFAULT_EPOCH,
    DEFAULT_REGRESSION_WAIT_LIMIT_US, DEFAULT_SEQUENCE_WAIT_LIMIT_US, DEFAULT_WORKER,
};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::*;
pub use id_generator::*;
pub use snowflake_id::*;
