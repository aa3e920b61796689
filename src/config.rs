use std::{env, fmt};

/// Months to load, in order.  Edit this list to change what a run processes.
pub const MONTHS: &[&str] = &["2025-01", "2025-02", "2025-03", "2025-04", "2025-05"];

/// Local cache of downloaded parquet files, one per month.
pub const DATA_DIR: &str = "data/yellow_taxi";

/// Host serving the public NYC TLC trip record files.
pub const TRIP_DATA_BASE_URL: &str = "https://d37ci6vzurychx.cloudfront.net";

pub const DESTINATION_TABLE: &str = "RAW.YELLOW_TAXI_TRIPS";

/// Table stage of [`DESTINATION_TABLE`].
pub const TABLE_STAGE: &str = "@RAW.%YELLOW_TAXI_TRIPS";

/// Snowflake connection parameters.
///
/// Values are read once at startup and handed to the loader by reference.
/// Nothing is validated here, a missing value shows up as an error from the
/// warehouse client when it tries to connect.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub account: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub role: Option<String>,
}

impl WarehouseConfig {
    /// Read the `SNOWFLAKE_*` variables from the process environment.
    /// Note that the schema comes from `SNOWFLAKE_RAW_SCHEMA`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        WarehouseConfig {
            account: lookup("SNOWFLAKE_ACCOUNT"),
            user: lookup("SNOWFLAKE_USER"),
            password: lookup("SNOWFLAKE_PASSWORD"),
            warehouse: lookup("SNOWFLAKE_WAREHOUSE"),
            database: lookup("SNOWFLAKE_DATABASE"),
            schema: lookup("SNOWFLAKE_RAW_SCHEMA"),
            role: lookup("SNOWFLAKE_ROLE"),
        }
    }
}

impl fmt::Debug for WarehouseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarehouseConfig")
            .field("account", &self.account)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("role", &self.role)
            .finish()
    }
}
