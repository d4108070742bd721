//! Isolated databases for tests

use sea_orm_migration::MigratorTrait;

use crate::container::testing::{TestContainer, TestContainerGuard};
use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;

/// A migrated in-memory SQLite database
///
/// The connection is also bound into the thread's test container, so code
/// calling `DB::connection()` sees it for as long as the value lives.
///
/// ```rust,ignore
/// let db = TestDatabase::fresh::<Migrator>().await.expect("test db");
/// let service = TodoService::new(db.connection(), notifier);
/// ```
pub struct TestDatabase {
    conn: DbConnection,
    _guard: TestContainerGuard,
}

impl TestDatabase {
    /// Connect and run every migration of `M`
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let conn = DbConnection::connect(&DatabaseConfig::in_memory()).await?;
        M::up(conn.inner(), None).await?;

        let guard = TestContainer::fake();
        TestContainer::singleton(conn.clone());

        Ok(Self {
            conn,
            _guard: guard,
        })
    }

    pub fn connection(&self) -> DbConnection {
        self.conn.clone()
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = DbConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}
