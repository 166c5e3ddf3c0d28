//! Teardown bookkeeping
//!
//! Every subscription the page makes (scroll, resize, keydown, the frame
//! loop, the intersection watcher) registers its release with a [`Scope`].
//! Closing the scope, explicitly or by drop, releases them in reverse
//! order exactly once.

use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag, checked at the top of every frame
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Owner of release callbacks
#[derive(Default)]
pub struct Scope {
    name: &'static str,
    releases: Vec<Box<dyn FnOnce()>>,
    closed: bool,
}

impl Scope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            releases: Vec::new(),
            closed: false,
        }
    }

    /// Register a release. On a closed scope it runs immediately.
    pub fn defer(&mut self, release: impl FnOnce() + 'static) {
        if self.closed {
            release();
        } else {
            self.releases.push(Box::new(release));
        }
    }

    /// Cancel `token` when the scope closes
    pub fn cancel_on_close(&mut self, token: &CancelToken) {
        let token = token.clone();
        self.defer(move || token.cancel());
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Run every release, newest first. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let count = self.releases.len();
        while let Some(release) = self.releases.pop() {
            release();
        }
        log::debug!("Scope {:?} closed ({} releases)", self.name, count);
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_close_runs_in_reverse_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = Scope::new("test");
        for i in 0..3 {
            let log = log.clone();
            scope.defer(move || log.borrow_mut().push(i));
        }
        assert_eq!(scope.len(), 3);

        scope.close();
        scope.close();
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
        assert!(scope.is_closed());
        assert!(scope.is_empty());
    }

    #[test]
    fn test_drop_closes() {
        let token = CancelToken::new();
        {
            let mut scope = Scope::new("page");
            scope.cancel_on_close(&token);
            assert!(!token.is_cancelled());
        }
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_defer_after_close_runs_now() {
        let hit = Rc::new(Cell::new(false));
        let mut scope = Scope::new("late");
        scope.close();
        let h = hit.clone();
        scope.defer(move || h.set(true));
        assert!(hit.get());
    }

    #[test]
    fn test_cancel_token_shared() {
        let a = CancelToken::new();
        let b = a.clone();
        b.cancel();
        b.cancel();
        assert!(a.is_cancelled());
    }
}
