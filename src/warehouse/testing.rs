//! In-memory stand-in for the warehouse that records every call.

use std::{cell::RefCell, rc::Rc};

use super::{Connection, Connector, Cursor};
use crate::{config::WarehouseConfig, error::WarehouseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Connect,
    Cursor,
    Execute(String),
    CloseCursor,
    CloseConnection,
}

#[derive(Clone, Default)]
struct Faults {
    connect: bool,
    cursor: bool,
    close: bool,
    /// Statements starting with this prefix are rejected.
    statement: Option<String>,
}

#[derive(Clone, Default)]
pub struct RecordingConnector {
    events: Rc<RefCell<Vec<Event>>>,
    faults: Faults,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_connect(mut self) -> Self {
        self.faults.connect = true;
        self
    }

    pub fn failing_cursor(mut self) -> Self {
        self.faults.cursor = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.faults.close = true;
        self
    }

    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.faults.statement = Some(prefix.to_string());
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn executed(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Execute(sql) => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }
}

fn rejected(statement: &str) -> WarehouseError {
    WarehouseError::Command {
        statement: statement.to_string(),
        code: Some(1),
        stderr: "simulated failure".to_string(),
    }
}

pub struct RecordingConnection {
    events: Rc<RefCell<Vec<Event>>>,
    faults: Faults,
}

pub struct RecordingCursor {
    events: Rc<RefCell<Vec<Event>>>,
    faults: Faults,
}

impl Connector for RecordingConnector {
    type Connection = RecordingConnection;

    fn connect(&self, _config: &WarehouseConfig) -> Result<RecordingConnection, WarehouseError> {
        self.events.borrow_mut().push(Event::Connect);
        if self.faults.connect {
            return Err(rejected("connect"));
        }
        Ok(RecordingConnection {
            events: Rc::clone(&self.events),
            faults: self.faults.clone(),
        })
    }
}

impl Connection for RecordingConnection {
    type Cursor = RecordingCursor;

    fn cursor(&mut self) -> Result<RecordingCursor, WarehouseError> {
        self.events.borrow_mut().push(Event::Cursor);
        if self.faults.cursor {
            return Err(rejected("cursor"));
        }
        Ok(RecordingCursor {
            events: Rc::clone(&self.events),
            faults: self.faults.clone(),
        })
    }

    fn close(&mut self) -> Result<(), WarehouseError> {
        self.events.borrow_mut().push(Event::CloseConnection);
        if self.faults.close {
            return Err(rejected("close"));
        }
        Ok(())
    }
}

impl Cursor for RecordingCursor {
    fn execute(&mut self, sql: &str) -> Result<String, WarehouseError> {
        self.events
            .borrow_mut()
            .push(Event::Execute(sql.to_string()));
        match &self.faults.statement {
            Some(prefix) if sql.starts_with(prefix.as_str()) => Err(rejected(sql)),
            _ => Ok(String::new()),
        }
    }

    fn close(&mut self) -> Result<(), WarehouseError> {
        self.events.borrow_mut().push(Event::CloseCursor);
        if self.faults.close {
            return Err(rejected("close"));
        }
        Ok(())
    }
}
