//! Board session workflows over the `PostgreSQL` store.

use super::helpers::{TestDatabase, clock, session_with, signed_up_provider, test_runtime};
use chrono::TimeDelta;
use eyre::{OptionExt, ensure};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskboard::{
    board::{
        domain::{Board, BoardKind, TaskStatus},
        services::ErrorKind,
    },
    clock::ManualClock,
};

fn board_names(boards: &[Board]) -> Vec<&str> {
    boards.iter().map(|board| board.name().as_str()).collect()
}

#[rstest]
fn first_load_provisions_two_boards_once(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_bootstrap")?;
    let store = db.store(&clock)?;
    let rt = test_runtime()?;
    let provider = rt.block_on(signed_up_provider(&clock, "ana@example.com"))?;

    let mut first = session_with(&store, &provider, &clock)?;
    rt.block_on(first.load())?;
    clock.advance(TimeDelta::minutes(1));
    let mut second = session_with(&store, &provider, &clock)?;
    rt.block_on(second.load())?;

    ensure!(board_names(first.boards()) == vec!["Personal", "Work"]);
    ensure!(first.boards() == second.boards());
    ensure!(second.boards().iter().all(|board| board.kind() == BoardKind::Persisted));
    Ok(())
}

#[rstest]
fn persisted_task_matches_after_reopening(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_reopen")?;
    let store = db.store(&clock)?;
    let rt = test_runtime()?;
    let provider = rt.block_on(signed_up_provider(&clock, "ana@example.com"))?;
    let mut boards = session_with(&store, &provider, &clock)?;
    rt.block_on(boards.load())?;
    let work = boards
        .boards()
        .last()
        .map(Board::id)
        .ok_or_eyre("bootstrap boards should exist")?;
    rt.block_on(boards.select_board(work))?;
    let task = rt
        .block_on(boards.add_task(work, "Plant beans", "Bo"))?
        .ok_or_eyre("task should be created")?;
    clock.advance(TimeDelta::minutes(10));
    rt.block_on(boards.move_task(task.id(), TaskStatus::InProgress))?;
    clock.advance(TimeDelta::hours(2) + TimeDelta::seconds(5));
    let before = rt.block_on(boards.move_task(task.id(), TaskStatus::Done))?;

    let mut reopened = session_with(&store, &provider, &clock)?;
    rt.block_on(reopened.load())?;
    rt.block_on(reopened.select_board(work))?;

    let groups = reopened.task_groups();
    let stored = groups.done.first().ok_or_eyre("task should be done")?;
    ensure!(**stored == before);
    ensure!(stored.status() == TaskStatus::Done);
    ensure!(stored.started_at() == before.started_at());
    ensure!(stored.completed_at() == before.completed_at());
    ensure!(stored.duration() == Some("2h 0m"));
    Ok(())
}

#[rstest]
fn last_board_survives_deletion_attempts(
    shared_test_cluster: &'static TestCluster,
    clock: ManualClock,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "test_last_board")?;
    let store = db.store(&clock)?;
    let rt = test_runtime()?;
    let provider = rt.block_on(signed_up_provider(&clock, "ana@example.com"))?;
    let mut boards = session_with(&store, &provider, &clock)?;
    rt.block_on(boards.load())?;
    let ids: Vec<_> = boards.boards().iter().map(Board::id).collect();
    let (first, last) = match ids.as_slice() {
        [first, last] => (*first, *last),
        _ => return Err(eyre::eyre!("expected two bootstrap boards, found {}", ids.len())),
    };

    rt.block_on(boards.delete_board(first))?;
    let refused = rt.block_on(boards.delete_board(last));

    ensure!(refused.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::Forbidden));
    ensure!(boards.active_board_id() == Some(last));
    let mut reopened = session_with(&store, &provider, &clock)?;
    rt.block_on(reopened.load())?;
    ensure!(board_names(reopened.boards()) == vec!["Work"]);
    Ok(())
}
