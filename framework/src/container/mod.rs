//! Application service container
//!
//! Holds process-wide singletons (the database connection, application
//! services) and trait bindings. Tests can shadow bindings per thread with
//! [`testing::TestContainer`].
//!
//! # Example
//!
//! ```rust,ignore
//! use kit::{App, bind, singleton};
//!
//! singleton!(TodoService::new(db, notifier));
//! bind!(dyn Notifier, FlashNotifier);
//!
//! let todos = App::resolve::<TodoService>()?;
//! let notifier = App::resolve_make::<dyn Notifier>()?;
//! ```

pub mod testing;

use crate::error::FrameworkError;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

static APP_CONTAINER: OnceLock<RwLock<Container>> = OnceLock::new();

thread_local! {
    pub(crate) static TEST_CONTAINER: RefCell<Option<Container>> = const { RefCell::new(None) };
}

/// Type-erased bindings keyed by `TypeId`
///
/// Concrete types are stored under their own `TypeId`; trait objects under
/// `TypeId::of::<Arc<dyn Trait>>()`.
#[derive(Default)]
pub struct Container {
    bindings: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared instance of a concrete type
    pub fn singleton<T: Any + Send + Sync + 'static>(&mut self, instance: T) {
        self.bindings.insert(TypeId::of::<T>(), Arc::new(instance));
    }

    /// Bind a trait object
    pub fn bind<T: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        self.bindings
            .insert(TypeId::of::<Arc<T>>(), Arc::new(instance));
    }

    /// Resolve a concrete type (cloned out of the container)
    pub fn get<T: Any + Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.bindings
            .get(&TypeId::of::<T>())?
            .downcast_ref::<T>()
            .cloned()
    }

    /// Resolve a trait binding
    pub fn make<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.bindings
            .get(&TypeId::of::<Arc<T>>())?
            .downcast_ref::<Arc<T>>()
            .cloned()
    }

    pub fn has<T: Any + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }
}

/// Container facade
///
/// Lookups check the thread-local test container first, then the global one.
pub struct App;

impl App {
    fn global() -> &'static RwLock<Container> {
        APP_CONTAINER.get_or_init(|| RwLock::new(Container::new()))
    }

    pub fn singleton<T: Any + Send + Sync + 'static>(instance: T) {
        if let Ok(mut c) = Self::global().write() {
            c.singleton(instance);
        }
    }

    pub fn bind<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) {
        if let Ok(mut c) = Self::global().write() {
            c.bind(instance);
        }
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
        let overridden = TEST_CONTAINER.with(|c| c.borrow().as_ref().and_then(Container::get::<T>));
        if overridden.is_some() {
            return overridden;
        }
        Self::global().read().ok()?.get::<T>()
    }

    pub fn make<T: ?Sized + Send + Sync + 'static>() -> Option<Arc<T>> {
        let overridden = TEST_CONTAINER.with(|c| c.borrow().as_ref().and_then(Container::make::<T>));
        if overridden.is_some() {
            return overridden;
        }
        Self::global().read().ok()?.make::<T>()
    }

    /// Resolve a concrete type, or `FrameworkError::ServiceNotFound`
    ///
    /// ```rust,ignore
    /// pub async fn index(_req: Request) -> Response {
    ///     let todos = App::resolve::<TodoService>()?;
    ///     // ...
    /// }
    /// ```
    pub fn resolve<T: Any + Send + Sync + Clone + 'static>() -> Result<T, FrameworkError> {
        Self::get::<T>().ok_or_else(FrameworkError::service_not_found::<T>)
    }

    /// Resolve a trait binding, or `FrameworkError::ServiceNotFound`
    pub fn resolve_make<T: ?Sized + Send + Sync + 'static>() -> Result<Arc<T>, FrameworkError> {
        Self::make::<T>().ok_or_else(FrameworkError::service_not_found::<T>)
    }

    pub fn has<T: Any + 'static>() -> bool {
        let in_test = TEST_CONTAINER.with(|c| {
            c.borrow()
                .as_ref()
                .map(|container| container.has::<T>())
                .unwrap_or(false)
        });

        in_test
            || Self::global()
                .read()
                .map(|c| c.has::<T>())
                .unwrap_or(false)
    }
}

/// Bind a trait to a singleton implementation (wraps it in `Arc`)
///
/// ```rust,ignore
/// bind!(dyn Notifier, FlashNotifier);
/// ```
#[macro_export]
macro_rules! bind {
    ($trait:ty, $instance:expr) => {
        $crate::App::bind::<$trait>(::std::sync::Arc::new($instance) as ::std::sync::Arc<$trait>)
    };
}

/// Register a singleton instance of a concrete type
#[macro_export]
macro_rules! singleton {
    ($instance:expr) => {
        $crate::App::singleton($instance)
    };
}
