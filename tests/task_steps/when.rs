//! When steps for task BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskpad::task::domain::{SelectedImage, TaskId};

#[when("the form is loaded")]
fn load_form(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let form = world.form_mut()?;
    let result = run_async(form.load());
    world.last_load = Some(result);
    Ok(())
}

#[when("the form is submitted")]
fn submit_form(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let form = world.form_mut()?;
    let result = run_async(form.submit());
    world.last_submit = Some(result);
    Ok(())
}

#[when(r#"the title is changed to "{title}""#)]
fn change_title(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    world.form_mut()?.draft_mut().set_title(title);
    Ok(())
}

#[when(r#"the image "{file_name}" is selected"#)]
fn select_image(world: &mut TaskWorld, file_name: String) -> Result<(), eyre::Report> {
    world
        .form_mut()?
        .draft_mut()
        .select_image(SelectedImage::new(file_name, vec![0x89, b'P', b'N', b'G']));
    Ok(())
}

#[when("the task table accepts calls again")]
fn task_table_accepts_calls(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    world
        .records
        .clear_failure()
        .wrap_err("clear record store failure")?;
    Ok(())
}

#[when(r#"the task table starts rejecting calls with "{message}""#)]
fn task_table_starts_rejecting(world: &mut TaskWorld, message: String) -> Result<(), eyre::Report> {
    world
        .records
        .fail_with(message)
        .wrap_err("inject record store failure")?;
    Ok(())
}

#[when("the task list is loaded")]
fn load_list(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let mut view = world.service.list_view();
    run_async(view.load()).wrap_err("load task list")?;
    world.list = Some(view);
    Ok(())
}

fn delete(world: &mut TaskWorld, id: i64, confirmed: bool) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("construct task id")?;
    let view = world.list_mut()?;
    let result = run_async(view.delete(task_id, &|_: &str| confirmed)).map(drop);
    world.last_delete = Some(result);
    Ok(())
}

#[when("task {id:i64} is deleted with confirmation")]
fn delete_confirmed(world: &mut TaskWorld, id: i64) -> Result<(), eyre::Report> {
    delete(world, id, true)
}

#[when("task {id:i64} is deleted without confirmation")]
fn delete_declined(world: &mut TaskWorld, id: i64) -> Result<(), eyre::Report> {
    delete(world, id, false)
}
