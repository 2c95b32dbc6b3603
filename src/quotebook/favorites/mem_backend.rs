use super::backend::FavoritesBackend;
use crate::error::{QuoteError, Result};
use std::cell::RefCell;

/// In-memory favorites backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// which lets the backend trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    text: RefCell<Option<String>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with raw stored text, e.g. a corrupt document.
    pub fn with_text(text: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.text.borrow_mut() = Some(text.into());
        backend
    }

    /// Overwrite the stored text without going through a store, the way
    /// another client sharing the same storage would.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = Some(text.into());
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl FavoritesBackend for MemBackend {
    fn read(&self) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(QuoteError::Store("Simulated read error".to_string()));
        }
        Ok(self.text.borrow().clone())
    }

    fn write(&self, text: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(QuoteError::Store("Simulated write error".to_string()));
        }
        *self.text.borrow_mut() = Some(text.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
