//! Test helpers
//!
//! - `expect!` fluent assertions
//! - `TestDatabase` for isolated, migrated databases
//! - `TestContainer` for per-thread service overrides
//!
//! ```rust,ignore
//! use kit::expect;
//! use kit::testing::TestDatabase;
//!
//! #[tokio::test]
//! async fn adds_a_todo() {
//!     let db = TestDatabase::fresh::<Migrator>().await.expect("test db");
//!     let todos = TodoService::new(db.connection(), Arc::new(MemoryNotifier::default()));
//!
//!     let added = todos.add("Buy milk", None).await;
//!     expect!(added.is_ok()).to_be_true();
//! }
//! ```

mod expect;

pub use crate::container::testing::{TestContainer, TestContainerGuard};
pub use crate::database::testing::TestDatabase;
pub use expect::Expect;
