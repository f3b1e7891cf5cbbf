use super::backend::StorageBackend;
use crate::error::{QuipError, Result};
use crate::model::Scope;
use std::cell::RefCell;
use std::collections::HashMap;

type Area = RefCell<HashMap<(Scope, String), String>>;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since quip is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    durable: Area,
    session: Area,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to seed a raw durable value.
    pub fn put_raw(&self, scope: Scope, key: &str, value: &str) {
        self.durable
            .borrow_mut()
            .insert((scope, key.to_string()), value.to_string());
    }

    /// Test helper to inspect a raw durable value.
    pub fn get_raw(&self, scope: Scope, key: &str) -> Option<String> {
        self.durable.borrow().get(&(scope, key.to_string())).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        Ok(self.get_raw(scope, key))
    }

    fn write(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(QuipError::Store("Simulated write error".to_string()));
        }
        self.put_raw(scope, key, value);
        Ok(())
    }

    fn read_session(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        Ok(self.session.borrow().get(&(scope, key.to_string())).cloned())
    }

    fn write_session(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        self.session
            .borrow_mut()
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove_session(&self, scope: Scope, key: &str) -> Result<()> {
        self.session.borrow_mut().remove(&(scope, key.to_string()));
        Ok(())
    }

    fn scope_available(&self, _scope: Scope) -> bool {
        true
    }
}
