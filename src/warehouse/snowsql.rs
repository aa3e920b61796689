use std::{env, process::Command};

use log::debug;

use super::{Connection, Connector, Cursor};
use crate::{config::WarehouseConfig, error::WarehouseError};

pub const DEFAULT_PROGRAM: &str = "snowsql";

/// Runs statements through the `snowsql` command line client, one client
/// invocation per statement.
///
/// The password travels in the child's `SNOWSQL_PWD` variable, never on the
/// command line.  Unset parameters are left out and the client reports the
/// problem when the first statement runs.
#[derive(Debug, Clone)]
pub struct SnowSql {
    program: String,
}

impl SnowSql {
    pub fn new(program: impl Into<String>) -> Self {
        SnowSql {
            program: program.into(),
        }
    }

    /// Use `SNOWSQL_BIN` if set, otherwise `snowsql` from the `PATH`.
    pub fn from_env() -> Self {
        Self::new(env::var("SNOWSQL_BIN").unwrap_or_else(|_| DEFAULT_PROGRAM.to_string()))
    }
}

impl Default for SnowSql {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

/// Connection flags for `snowsql`, skipping any parameter that is not set.
pub fn connection_args(config: &WarehouseConfig) -> Vec<String> {
    let flags = [
        ("-a", &config.account),
        ("-u", &config.user),
        ("-w", &config.warehouse),
        ("-d", &config.database),
        ("-s", &config.schema),
        ("-r", &config.role),
    ];
    let mut args = Vec::new();
    for (flag, value) in flags {
        if let Some(value) = value {
            args.push(flag.to_string());
            args.push(value.clone());
        }
    }
    args
}

const OUTPUT_OPTIONS: [&str; 6] = [
    "-o",
    "exit_on_error=true",
    "-o",
    "friendly=false",
    "-o",
    "quiet=true",
];

pub struct SnowSqlConnection {
    program: String,
    config: WarehouseConfig,
    open: bool,
}

pub struct SnowSqlCursor {
    program: String,
    config: WarehouseConfig,
    open: bool,
}

impl Connector for SnowSql {
    type Connection = SnowSqlConnection;

    fn connect(&self, config: &WarehouseConfig) -> Result<SnowSqlConnection, WarehouseError> {
        debug!(
            "connecting to account {:?} as {:?}",
            config.account, config.user
        );
        Ok(SnowSqlConnection {
            program: self.program.clone(),
            config: config.clone(),
            open: true,
        })
    }
}

impl Connection for SnowSqlConnection {
    type Cursor = SnowSqlCursor;

    fn cursor(&mut self) -> Result<SnowSqlCursor, WarehouseError> {
        if !self.open {
            return Err(WarehouseError::Closed);
        }
        Ok(SnowSqlCursor {
            program: self.program.clone(),
            config: self.config.clone(),
            open: true,
        })
    }

    fn close(&mut self) -> Result<(), WarehouseError> {
        self.open = false;
        Ok(())
    }
}

impl Cursor for SnowSqlCursor {
    fn execute(&mut self, sql: &str) -> Result<String, WarehouseError> {
        if !self.open {
            return Err(WarehouseError::Closed);
        }
        let mut cmd = Command::new(&self.program);
        cmd.args(connection_args(&self.config))
            .args(OUTPUT_OPTIONS)
            .arg("-q")
            .arg(sql);
        if let Some(password) = &self.config.password {
            cmd.env("SNOWSQL_PWD", password);
        }

        let output = cmd.output().map_err(|source| WarehouseError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // snowsql reports most SQL errors on stdout
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(WarehouseError::Command {
                statement: sql.to_string(),
                code: output.status.code(),
                stderr: message,
            });
        }
        debug!("{}", stdout);
        Ok(stdout)
    }

    fn close(&mut self) -> Result<(), WarehouseError> {
        self.open = false;
        Ok(())
    }
}
