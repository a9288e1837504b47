//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::WrapErr;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::fixture;
use taskboard::{
    auth::{
        adapters::memory::InMemoryIdentityProvider,
        domain::{Email, Identity, SignUpRequest, UserId},
        ports::IdentityProvider,
    },
    board::{
        adapters::postgres::PostgresBoardStore,
        domain::{Assignee, BoardId, BoardName, NewBoard, NewTask, TaskTitle},
        services::{BoardCollection, BoardConfig},
    },
    clock::ManualClock,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// SQL creating the board and task tables.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2024-06-01-000000_create_boards_and_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Store type used across the `PostgreSQL` tests.
pub type TestStore = PostgresBoardStore<ManualClock>;

/// Collection type used across the `PostgreSQL` tests.
pub type TestCollection =
    BoardCollection<TestStore, InMemoryIdentityProvider<ManualClock>, ManualClock>;

/// Returns the instant `seconds` after the epoch.
#[must_use]
pub fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(seconds)
}

/// Provides a clock frozen at a known instant.
#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::new(at(1_000))
}

/// Creates a runtime for driving the async store from synchronous tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("build test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            execute_sql_statements(&mut conn, CREATE_SCHEMA_SQL).map_err(Into::into)
        })
        .wrap_err("ensure template database")
}

/// Executes each statement of a migration script in turn.
fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|e| eyre::eyre!("SQL error: {e}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// A database cloned from the template, dropped when the guard goes away.
pub struct TestDatabase<'a> {
    cluster: &'a TestCluster,
    name: String,
}

impl<'a> TestDatabase<'a> {
    /// Creates a fresh database from the migrated template.
    ///
    /// # Errors
    ///
    /// Returns an error if template setup or database creation fails.
    pub fn create(cluster: &'a TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .wrap_err("create test database")?;
        Ok(Self { cluster, name })
    }

    /// Connection URL of this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.connection().database_url(&self.name)
    }

    /// Builds a store over a single-connection pool to this database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn store(&self, clock: &ManualClock) -> eyre::Result<Arc<TestStore>> {
        let manager = ConnectionManager::<PgConnection>::new(self.url());
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .wrap_err("build connection pool")?;
        Ok(Arc::new(PostgresBoardStore::new(pool, Arc::new(clock.clone()))))
    }

    /// Counts task rows on `board_id`, bypassing ownership filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or query fails.
    pub fn count_tasks_on(&self, board_id: BoardId) -> eyre::Result<i64> {
        #[derive(diesel::QueryableByName)]
        struct CountRow {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            count: i64,
        }

        let board_uuid = board_id
            .as_uuid()
            .ok_or_else(|| eyre::eyre!("{board_id} is not a persisted board"))?;
        let mut conn = PgConnection::establish(&self.url()).wrap_err("connect")?;
        let row = diesel::sql_query("SELECT COUNT(*) AS count FROM tasks WHERE board_id = $1")
            .bind::<diesel::sql_types::Uuid, _>(board_uuid)
            .get_result::<CountRow>(&mut conn)
            .wrap_err("count tasks")?;
        Ok(row.count)
    }
}

impl Drop for TestDatabase<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            tracing::warn!(database = %self.name, error = %err, "failed to drop test database");
        }
    }
}

/// Builds an identity without going through a provider.
///
/// # Errors
///
/// Returns an error if `email` is not a valid address.
pub fn identity(email: &str) -> eyre::Result<Identity> {
    Ok(Identity::new(UserId::new(), Email::new(email)?, None))
}

/// Builds a board payload with the default icon and color.
///
/// # Errors
///
/// Returns an error if `name` is blank.
pub fn new_board(name: &str) -> eyre::Result<NewBoard> {
    Ok(NewBoard::new(BoardName::new(name)?, "📋", "amber"))
}

/// Builds a task payload for `identity` on `board_id`.
///
/// # Errors
///
/// Returns an error if `title` or `assignee` is blank.
pub fn new_task(
    identity: &Identity,
    board_id: BoardId,
    title: &str,
    assignee: &str,
    created: i64,
) -> eyre::Result<NewTask> {
    Ok(NewTask::new(
        board_id,
        identity.user_id(),
        TaskTitle::new(title)?,
        Assignee::new(assignee)?,
        at(created),
    ))
}

/// Creates an identity provider with a signed-up, signed-in account.
///
/// # Errors
///
/// Returns an error if sign-up fails.
pub async fn signed_up_provider(
    clock: &ManualClock,
    email: &str,
) -> eyre::Result<Arc<InMemoryIdentityProvider<ManualClock>>> {
    let provider = InMemoryIdentityProvider::with_clock(Arc::new(clock.clone()));
    let request = SignUpRequest::new("Ana Lima", email, "correct horse")?;
    provider.sign_up(&request).await.wrap_err("sign up")?;
    Ok(Arc::new(provider))
}

/// Creates a session over `store` for the account signed in to `provider`.
///
/// # Errors
///
/// Returns an error if session construction fails.
pub fn session_with(
    store: &Arc<TestStore>,
    provider: &Arc<InMemoryIdentityProvider<ManualClock>>,
    clock: &ManualClock,
) -> eyre::Result<TestCollection> {
    Ok(BoardCollection::new(
        Arc::clone(store),
        Arc::clone(provider),
        Arc::new(clock.clone()),
        BoardConfig::default(),
    )?)
}
