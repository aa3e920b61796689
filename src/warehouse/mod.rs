//! Seam between the loader and whatever actually talks to Snowflake.
//!
//! The shape follows a DB-API style client: a connector hands out a
//! connection, the connection hands out a cursor, statements run on the
//! cursor, and both must be closed afterwards.  [`Session`] owns that pair and
//! closes it when dropped.

pub mod snowsql;
#[cfg(test)]
pub mod testing;

use log::{debug, warn};

use crate::{config::WarehouseConfig, error::WarehouseError};

pub trait Connector {
    type Connection: Connection;

    fn connect(&self, config: &WarehouseConfig) -> Result<Self::Connection, WarehouseError>;
}

pub trait Connection {
    type Cursor: Cursor;

    fn cursor(&mut self) -> Result<Self::Cursor, WarehouseError>;

    fn close(&mut self) -> Result<(), WarehouseError>;
}

pub trait Cursor {
    /// Run a single statement, returning the client output.
    fn execute(&mut self, sql: &str) -> Result<String, WarehouseError>;

    fn close(&mut self) -> Result<(), WarehouseError>;
}

/// An open connection plus its cursor.
///
/// Dropping the session closes the cursor, then the connection, exactly once
/// each, whichever way the caller leaves.  Errors from closing are logged and
/// swallowed so they never hide the error that caused the early exit.
pub struct Session<C: Connection> {
    connection: C,
    cursor: Option<C::Cursor>,
}

impl<C: Connection> Session<C> {
    pub fn open<K>(connector: &K, config: &WarehouseConfig) -> Result<Self, WarehouseError>
    where
        K: Connector<Connection = C>,
    {
        let connection = connector.connect(config)?;
        let mut session = Session {
            connection,
            cursor: None,
        };
        // the connection is released by Drop if this fails
        let cursor = session.connection.cursor()?;
        session.cursor = Some(cursor);
        Ok(session)
    }

    pub fn execute(&mut self, sql: &str) -> Result<String, WarehouseError> {
        match self.cursor.as_mut() {
            Some(cursor) => cursor.execute(sql),
            None => Err(WarehouseError::Closed),
        }
    }
}

impl<C: Connection> Drop for Session<C> {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            if let Err(e) = cursor.close() {
                warn!("Failed to close warehouse cursor: {}", e);
            }
        }
        match self.connection.close() {
            Ok(()) => debug!("warehouse connection closed"),
            Err(e) => warn!("Failed to close warehouse connection: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Event, RecordingConnector};
    use super::*;

    #[test]
    fn drop_closes_cursor_then_connection() {
        let connector = RecordingConnector::new();
        {
            let mut session = Session::open(&connector, &WarehouseConfig::default()).unwrap();
            session.execute("SELECT 1").unwrap();
        }
        assert_eq!(
            connector.events(),
            vec![
                Event::Connect,
                Event::Cursor,
                Event::Execute("SELECT 1".to_string()),
                Event::CloseCursor,
                Event::CloseConnection,
            ]
        );
    }

    #[test]
    fn failed_cursor_still_closes_connection() {
        let connector = RecordingConnector::new().failing_cursor();
        let res = Session::open(&connector, &WarehouseConfig::default());
        assert!(res.is_err());
        assert_eq!(
            connector.events(),
            vec![Event::Connect, Event::Cursor, Event::CloseConnection]
        );
    }

    #[test]
    fn failed_connect_releases_nothing() {
        let connector = RecordingConnector::new().failing_connect();
        let res = Session::open(&connector, &WarehouseConfig::default());
        assert!(res.is_err());
        assert_eq!(connector.events(), vec![Event::Connect]);
    }

    #[test]
    fn close_errors_are_swallowed() {
        let connector = RecordingConnector::new().failing_close();
        {
            let _session = Session::open(&connector, &WarehouseConfig::default()).unwrap();
        }
        assert_eq!(connector.count(&Event::CloseCursor), 1);
        assert_eq!(connector.count(&Event::CloseConnection), 1);
    }
}
