//! Then steps for task BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskpad::task::{
    adapters::memory::RecordOperation,
    domain::{ImageUrl, TaskDomainError, TaskId},
    ports::TaskRecordStore,
    services::{FormError, FormState},
};

#[then("the form reaches the done state")]
fn form_is_done(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_submit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submit result in scenario world"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("unexpected submit failure: {err}"));
    }
    let state = world.form_mut()?.state();
    eyre::ensure!(state == FormState::Done, "expected done state, found {state}");
    Ok(())
}

#[then(r#"the task table holds a task titled "{title}" without an image"#)]
fn table_holds_task_without_image(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let tasks = run_async(world.records.list_all()).wrap_err("list tasks")?;
    let task = tasks
        .iter()
        .find(|task| task.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))?;
    eyre::ensure!(
        task.image_url().is_none(),
        "expected no image, found {:?}",
        task.image_url()
    );
    Ok(())
}

#[then("the submission fails validation")]
fn submission_fails_validation(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_submit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submit result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(FormError::Validation(TaskDomainError::EmptyTitle))),
        "expected empty title error, got {result:?}"
    );
    let state = world.form_mut()?.state();
    eyre::ensure!(state == FormState::Idle, "expected idle state, found {state}");
    Ok(())
}

#[then("no store was contacted")]
fn no_store_contacted(world: &TaskWorld) -> Result<(), eyre::Report> {
    let operations = world.records.operations().wrap_err("read record journal")?;
    let uploads = world.objects.upload_attempts().wrap_err("read upload journal")?;
    eyre::ensure!(operations.is_empty(), "record store saw {operations:?}");
    eyre::ensure!(uploads.is_empty(), "object store saw {uploads:?}");
    Ok(())
}

#[then("the submission reports an image upload failure")]
fn submission_reports_upload_failure(world: &TaskWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_submit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submit result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected submit failure: {err}"))?;
    eyre::ensure!(
        outcome.upload_error.is_some(),
        "expected an upload failure to be reported"
    );
    Ok(())
}

#[then(r#"task {id:i64} is titled "{title}" with image "{url}""#)]
fn task_has_title_and_image(
    world: &TaskWorld,
    id: i64,
    title: String,
    url: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("construct task id")?;
    let task = run_async(world.records.find_by_id(task_id))
        .wrap_err("find task")?
        .ok_or_else(|| eyre::eyre!("task {id} missing"))?;
    eyre::ensure!(
        task.title().as_str() == title,
        "expected title {title:?}, found {:?}",
        task.title().as_str()
    );
    eyre::ensure!(
        task.image_url().map(ImageUrl::as_str) == Some(url.as_str()),
        "expected image {url:?}, found {:?}",
        task.image_url()
    );
    Ok(())
}

#[then("the form reports that the task was not found")]
fn form_reports_not_found(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_load
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing load result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(FormError::NotFound(_))),
        "expected not found, got {result:?}"
    );
    let state = world.form_mut()?.state();
    eyre::ensure!(state == FormState::Failed, "expected failed state, found {state}");
    Ok(())
}

#[then("the submit control is disabled")]
fn submit_is_disabled(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !world.form_mut()?.is_submit_enabled(),
        "expected submit to be disabled"
    );
    Ok(())
}

#[then(r#"the form shows the error "{message}""#)]
fn form_shows_error(world: &mut TaskWorld, message: String) -> Result<(), eyre::Report> {
    let form = world.form_mut()?;
    let shown = form
        .error()
        .map(ToString::to_string)
        .ok_or_else(|| eyre::eyre!("expected the form to surface an error"))?;
    eyre::ensure!(shown == message, "expected error {message:?}, found {shown:?}");
    eyre::ensure!(
        form.state() == FormState::Failed,
        "expected failed state, found {}",
        form.state()
    );
    Ok(())
}

#[then(r#"the draft title is still "{title}""#)]
fn draft_title_kept(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let kept = world.form_mut()?.draft().title().to_owned();
    eyre::ensure!(kept == title, "expected draft title {title:?}, found {kept:?}");
    Ok(())
}

#[then(r#"the list shows "{titles}""#)]
fn list_shows(world: &mut TaskWorld, titles: String) -> Result<(), eyre::Report> {
    let shown = world
        .list_mut()?
        .tasks()
        .iter()
        .map(|task| task.title().as_str())
        .collect::<Vec<_>>()
        .join(", ");
    eyre::ensure!(shown == titles, "expected {titles:?}, found {shown:?}");
    Ok(())
}

#[then("the store received a delete for task {id:i64}")]
fn store_received_delete(world: &TaskWorld, id: i64) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("construct task id")?;
    let writes = world.records.writes().wrap_err("read record journal")?;
    eyre::ensure!(
        writes == [RecordOperation::DeleteById(task_id)],
        "expected a single delete, found {writes:?}"
    );
    Ok(())
}

#[then("the store received no writes")]
fn store_received_no_writes(world: &TaskWorld) -> Result<(), eyre::Report> {
    let writes = world.records.writes().wrap_err("read record journal")?;
    eyre::ensure!(writes.is_empty(), "expected no writes, found {writes:?}");
    Ok(())
}

#[then(r#"the delete fails with "{message}""#)]
fn delete_fails_with(world: &TaskWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_delete
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing delete result in scenario world"))?;
    match result {
        Err(err) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected delete failure {message:?}, got {other:?}")),
    }
}
