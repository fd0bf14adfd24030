//! Page navigation.

use std::cell::RefCell;
use std::rc::Rc;

/// Transfers control to another page.
pub trait Navigator {
    /// Navigate to `destination`, an opaque page identifier such as
    /// `checkout.html`.
    fn navigate(&self, destination: &str);
}

/// Records destinations instead of navigating. Clones share history.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    visited: Rc<RefCell<Vec<String>>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations in the order they were requested.
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    /// The last requested destination.
    pub fn current(&self) -> Option<String> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, destination: &str) {
        self.visited.borrow_mut().push(destination.to_string());
    }
}
