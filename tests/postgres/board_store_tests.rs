//! Board store tests against a real `PostgreSQL` database.

use super::helpers::{TestDatabase, clock, identity, new_board, new_task, test_runtime};
use chrono::TimeDelta;
use eyre::{OptionExt, ensure};
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskboard::{
    board::{
        domain::TaskStatus,
        ports::{BoardStore, StatusUpdate, StoreError},
    },
    clock::ManualClock,
};

#[rstest]
fn records_of_another_account_look_missing(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_scoping")?;
    let store = db.store(&clock)?;
    let ana = identity("ana@example.com")?;
    let bo = identity("bo@example.com")?;
    let rt = test_runtime()?;

    let board = rt.block_on(store.create_board(&ana, &new_board("Garden")?))?;
    let beans = new_task(&ana, board.id(), "Plant beans", "Bo", 10)?;
    let task = rt.block_on(store.create_task(&ana, &beans))?;

    ensure!(rt.block_on(store.list_boards(&bo))?.is_empty());
    ensure!(matches!(
        rt.block_on(store.list_tasks(&bo, board.id())),
        Err(StoreError::BoardNotFound(id)) if id == board.id()
    ));
    let intruding = new_task(&bo, board.id(), "Weed", "Bo", 20)?;
    ensure!(matches!(
        rt.block_on(store.create_task(&bo, &intruding)),
        Err(StoreError::BoardNotFound(_))
    ));
    let done = StatusUpdate::new(TaskStatus::Done);
    ensure!(matches!(
        rt.block_on(store.update_task_status(&bo, task.id(), done)),
        Err(StoreError::TaskNotFound(id)) if id == task.id()
    ));
    ensure!(matches!(
        rt.block_on(store.delete_task(&bo, task.id())),
        Err(StoreError::TaskNotFound(_))
    ));
    ensure!(matches!(
        rt.block_on(store.delete_board(&bo, board.id())),
        Err(StoreError::BoardNotFound(_))
    ));

    let tasks = rt.block_on(store.list_tasks(&ana, board.id()))?;
    ensure!(tasks == vec![task]);
    ensure!(tasks.iter().all(|entry| entry.status() == TaskStatus::Todo));
    Ok(())
}

#[rstest]
fn deleting_a_board_cascades_to_its_tasks(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_cascade")?;
    let store = db.store(&clock)?;
    let ana = identity("ana@example.com")?;
    let rt = test_runtime()?;
    let garden = rt.block_on(store.create_board(&ana, &new_board("Garden")?))?;
    let kitchen = rt.block_on(store.create_board(&ana, &new_board("Kitchen")?))?;
    for (board_id, title, created) in [
        (garden.id(), "Plant beans", 10),
        (garden.id(), "Water roses", 20),
        (kitchen.id(), "Descale kettle", 30),
    ] {
        rt.block_on(store.create_task(&ana, &new_task(&ana, board_id, title, "Bo", created)?))?;
    }
    ensure!(db.count_tasks_on(garden.id())? == 2);

    rt.block_on(store.delete_board(&ana, garden.id()))?;

    ensure!(db.count_tasks_on(garden.id())? == 0);
    ensure!(db.count_tasks_on(kitchen.id())? == 1);
    let remaining = rt.block_on(store.list_boards(&ana))?;
    ensure!(remaining.iter().map(|board| board.id()).collect::<Vec<_>>() == vec![kitchen.id()]);
    ensure!(matches!(
        rt.block_on(store.list_tasks(&ana, garden.id())),
        Err(StoreError::BoardNotFound(_))
    ));
    Ok(())
}

#[rstest]
fn status_moves_derive_and_persist_timestamps(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_status")?;
    let store = db.store(&clock)?;
    let ana = identity("ana@example.com")?;
    let rt = test_runtime()?;
    let board = rt.block_on(store.create_board(&ana, &new_board("Garden")?))?;
    let beans = new_task(&ana, board.id(), "Plant beans", "Bo", 1_000)?;
    let task = rt.block_on(store.create_task(&ana, &beans))?;
    let created_at = clock.utc();

    clock.advance(TimeDelta::minutes(10));
    let start = StatusUpdate::new(TaskStatus::InProgress);
    let started = rt.block_on(store.update_task_status(&ana, task.id(), start))?;
    clock.advance(TimeDelta::minutes(45));
    let finish = StatusUpdate::new(TaskStatus::Done);
    let finished = rt.block_on(store.update_task_status(&ana, task.id(), finish))?;

    let started_at = created_at + TimeDelta::minutes(10);
    let completed_at = started_at + TimeDelta::minutes(45);
    ensure!(started.started_at() == Some(started_at));
    ensure!(started.completed_at().is_none());
    ensure!(finished.status() == TaskStatus::Done);
    ensure!(finished.started_at() == Some(started_at));
    ensure!(finished.completed_at() == Some(completed_at));
    ensure!(finished.duration() == Some("45m 0s"));

    let reloaded = rt.block_on(store.list_tasks(&ana, board.id()))?;
    let stored = reloaded.first().ok_or_eyre("task should be stored")?;
    ensure!(stored == &finished);
    ensure!(stored.status() == finished.status());
    ensure!(stored.started_at() == finished.started_at());
    ensure!(stored.completed_at() == finished.completed_at());
    ensure!(stored.duration() == finished.duration());
    Ok(())
}

#[rstest]
fn deleting_a_task_removes_only_that_task(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_delete_task")?;
    let store = db.store(&clock)?;
    let ana = identity("ana@example.com")?;
    let rt = test_runtime()?;
    let board = rt.block_on(store.create_board(&ana, &new_board("Garden")?))?;
    let beans_draft = new_task(&ana, board.id(), "Plant beans", "Bo", 10)?;
    let beans = rt.block_on(store.create_task(&ana, &beans_draft))?;
    let roses_draft = new_task(&ana, board.id(), "Water roses", "Cy", 20)?;
    let roses = rt.block_on(store.create_task(&ana, &roses_draft))?;

    rt.block_on(store.delete_task(&ana, beans.id()))?;

    ensure!(rt.block_on(store.list_tasks(&ana, board.id()))? == vec![roses]);
    ensure!(matches!(
        rt.block_on(store.delete_task(&ana, beans.id())),
        Err(StoreError::TaskNotFound(_))
    ));
    Ok(())
}
