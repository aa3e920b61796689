use std::path::Path;

use log::info;

use crate::{
    config::{WarehouseConfig, DESTINATION_TABLE, TABLE_STAGE},
    error::WarehouseError,
    warehouse::{Connector, Session},
};

/// `PUT` statement uploading a local file into a stage.
pub fn put_command(absolute_path: &Path, stage: &str) -> String {
    format!(
        "PUT file://{} {} AUTO_COMPRESS=TRUE OVERWRITE=TRUE",
        absolute_path.display(),
        stage
    )
}

/// `COPY INTO` statement loading every staged parquet file into `table`.
pub fn copy_command(table: &str, stage: &str) -> String {
    format!(
        "COPY INTO {} FROM {} FILE_FORMAT = (TYPE = PARQUET) MATCH_BY_COLUMN_NAME = CASE_INSENSITIVE FORCE = TRUE",
        table, stage
    )
}

/// Stages local parquet files in Snowflake and copies them into the
/// destination table.
///
/// `FORCE = TRUE` reloads files the table has already seen, so loading the
/// same month twice appends its rows twice.
pub struct Loader<'a, K: Connector> {
    connector: K,
    config: &'a WarehouseConfig,
    table: String,
    stage: String,
}

impl<'a, K: Connector> Loader<'a, K> {
    /// Loader for `RAW.YELLOW_TAXI_TRIPS` through its table stage.
    pub fn new(connector: K, config: &'a WarehouseConfig) -> Self {
        Self::for_table(connector, config, DESTINATION_TABLE, TABLE_STAGE)
    }

    pub fn for_table(
        connector: K,
        config: &'a WarehouseConfig,
        table: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Loader {
            connector,
            config,
            table: table.into(),
            stage: stage.into(),
        }
    }

    pub fn connector(&self) -> &K {
        &self.connector
    }

    /// Upload `path` to the stage, then copy the stage into the table.
    ///
    /// The file is not checked for existence here, a missing file makes the
    /// `PUT` fail.  Cursor and connection are closed before returning, on
    /// success and on error.
    pub fn load(&self, path: &Path) -> Result<(), WarehouseError> {
        let mut session = Session::open(&self.connector, self.config)?;

        let absolute = std::path::absolute(path).map_err(|source| WarehouseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Uploading {} to Snowflake staging", path.display());
        session.execute(&put_command(&absolute, &self.stage))?;
        info!("Uploaded {} to Snowflake staging", path.display());

        info!("Copying data into {}", self.table.to_lowercase());
        session.execute(&copy_command(&self.table, &self.stage))?;
        info!("Data copied into {}", self.table.to_lowercase());

        Ok(())
    }
}
