//! Download the monthly NYC yellow taxi trip parquet files and load them into
//! a Snowflake table.

pub mod config;
pub mod driver;
pub mod error;
pub mod fetch;
pub mod load;
pub mod warehouse;

pub use error::{Error, FetchError, WarehouseError};
