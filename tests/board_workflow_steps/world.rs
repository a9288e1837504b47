//! Shared world state for board workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta};
use rstest::fixture;
use taskboard::{
    auth::{adapters::memory::InMemoryIdentityProvider, gate::GateDecision},
    board::{
        adapters::memory::InMemoryBoardStore,
        domain::{Board, BoardId, TaskId},
        services::{BoardCollection, BoardConfig, BoardError},
    },
    clock::ManualClock,
};

/// Store type used by the BDD world.
pub type TestStore = InMemoryBoardStore<ManualClock>;

/// Identity provider type used by the BDD world.
pub type TestProvider = InMemoryIdentityProvider<ManualClock>;

/// Session type used by the BDD world.
pub type TestCollection = BoardCollection<TestStore, TestProvider, ManualClock>;

/// Scenario world for board workflow behaviour tests.
pub struct BoardWorld {
    pub clock: ManualClock,
    pub store: Arc<TestStore>,
    pub provider: Arc<TestProvider>,
    pub boards: TestCollection,
    pub tasks: HashMap<String, TaskId>,
    pub last_result: Option<Result<(), BoardError>>,
    pub last_gate: Option<GateDecision>,
}

impl BoardWorld {
    /// Creates a world with an empty store and no signed-in account.
    ///
    /// # Errors
    ///
    /// Returns an error if the default session cannot be built.
    pub fn new() -> Result<Self, BoardError> {
        let clock = ManualClock::new(DateTime::UNIX_EPOCH + TimeDelta::days(19_000));
        let store = Arc::new(InMemoryBoardStore::new(Arc::new(clock.clone())));
        let provider = Arc::new(InMemoryIdentityProvider::with_clock(Arc::new(clock.clone())));
        let boards = open_session(&store, &provider, &clock)?;
        Ok(Self {
            clock,
            store,
            provider,
            boards,
            tasks: HashMap::new(),
            last_result: None,
            last_gate: None,
        })
    }

    /// Replaces the session with a fresh one over the same store and account.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be built.
    pub fn reopen(&mut self) -> Result<(), BoardError> {
        self.boards = open_session(&self.store, &self.provider, &self.clock)?;
        Ok(())
    }

    /// Finds a board in the session by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has that name.
    pub fn board_named(&self, name: &str) -> Result<BoardId, eyre::Report> {
        self.boards
            .boards()
            .iter()
            .find(|board| board.name().as_str() == name)
            .map(Board::id)
            .ok_or_else(|| eyre::eyre!("no board named {name} in the session"))
    }

    /// Looks up a task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has that title.
    pub fn task_named(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

fn open_session(
    store: &Arc<TestStore>,
    provider: &Arc<TestProvider>,
    clock: &ManualClock,
) -> Result<TestCollection, BoardError> {
    BoardCollection::new(
        Arc::clone(store),
        Arc::clone(provider),
        Arc::new(clock.clone()),
        BoardConfig::default(),
    )
}

/// Fixture that creates a new scenario world.
///
/// # Panics
///
/// Panics if the default session cannot be built.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::new().expect("default boards are valid")
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
