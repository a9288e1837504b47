//! Given steps for board workflow BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::{OptionExt, WrapErr};
use rstest_bdd_macros::given;
use taskboard::auth::{domain::SignUpRequest, ports::IdentityProvider};

#[given(r#"a signed-in account "{email}""#)]
fn signed_in_account(world: &mut BoardWorld, email: String) -> Result<(), eyre::Report> {
    let request = SignUpRequest::new("Scenario User", email, "correct horse")?;
    run_async(world.provider.sign_up(&request)).wrap_err("sign up scenario account")?;
    Ok(())
}

#[given("the session has loaded its boards")]
fn session_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.boards.load()).wrap_err("load boards")?;
    Ok(())
}

#[given(r#"the "{name}" board is active"#)]
fn board_is_active(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let board_id = world.board_named(&name)?;
    run_async(world.boards.select_board(board_id)).wrap_err("select board")?;
    Ok(())
}

#[given(r#"a board named "{name}" has been created"#)]
fn board_created(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let draft = world.boards.board_draft_mut();
    draft.open = true;
    draft.name = name;
    run_async(world.boards.submit_board_draft())
        .wrap_err("create board")?
        .ok_or_eyre("board name should not be blank")?;
    Ok(())
}

#[given(r#"a task "{title}" assigned to "{assignee}" on the active board"#)]
fn task_on_active_board(
    world: &mut BoardWorld,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let board_id = world
        .boards
        .active_board_id()
        .ok_or_eyre("a board should be active")?;
    let task = run_async(world.boards.add_task(board_id, &title, &assignee))
        .wrap_err("add task")?
        .ok_or_eyre("task title should not be blank")?;
    world.tasks.insert(title, task.id());
    Ok(())
}

#[given("the board store is offline")]
fn store_offline(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.store.set_offline(true)?;
    Ok(())
}
