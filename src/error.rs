use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Failures while getting a month file onto local disk.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("download of {url} failed with status {status}")]
    Transfer { url: String, status: StatusCode },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures talking to the warehouse.
#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The client ran but rejected the statement.  `code` is `None` when the
    /// process was killed by a signal.
    #[error("statement `{statement}` failed (exit code {code:?}): {stderr}")]
    Command {
        statement: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("cursor or connection already closed")]
    Closed,

    #[error("cannot resolve {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}
