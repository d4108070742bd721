//! Per-thread container overrides for tests
//!
//! `#[tokio::test]` runs on a current-thread runtime, so everything a test
//! awaits sees the same overrides.

use super::{Container, TEST_CONTAINER};
use std::any::Any;
use std::sync::Arc;

/// Installs an empty override container until the guard is dropped
///
/// ```rust,ignore
/// let _guard = TestContainer::fake();
/// TestContainer::singleton(service);
/// ```
pub struct TestContainer;

impl TestContainer {
    pub fn fake() -> TestContainerGuard {
        TEST_CONTAINER.with(|c| {
            *c.borrow_mut() = Some(Container::new());
        });
        TestContainerGuard { _private: () }
    }

    /// Register a singleton visible to this thread only
    pub fn singleton<T: Any + Send + Sync + 'static>(instance: T) {
        TEST_CONTAINER.with(|c| {
            c.borrow_mut()
                .get_or_insert_with(Container::new)
                .singleton(instance);
        });
    }

    /// Bind a trait object visible to this thread only
    pub fn bind<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) {
        TEST_CONTAINER.with(|c| {
            c.borrow_mut()
                .get_or_insert_with(Container::new)
                .bind(instance);
        });
    }
}

/// Clears the thread's override container on drop
pub struct TestContainerGuard {
    _private: (),
}

impl Drop for TestContainerGuard {
    fn drop(&mut self) {
        TEST_CONTAINER.with(|c| {
            *c.borrow_mut() = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::App;

    #[derive(Clone, Debug, PartialEq)]
    struct Marker(&'static str);

    #[test]
    fn test_overrides_are_cleared_on_drop() {
        {
            let _guard = TestContainer::fake();
            TestContainer::singleton(Marker("fake"));
            assert_eq!(App::get::<Marker>(), Some(Marker("fake")));
        }
        assert!(!App::has::<Marker>());
    }
}
