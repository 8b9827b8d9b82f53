//! Given steps for task BDD scenarios.

use super::world::TaskWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskpad::task::domain::{
    ImageUrl, SelectedImage, Task, TaskFields, TaskId, TaskTitle,
};

fn seed(
    world: &TaskWorld,
    id: i64,
    title: &str,
    image_url: Option<&str>,
) -> Result<(), eyre::Report> {
    let image = image_url
        .map(ImageUrl::new)
        .transpose()
        .wrap_err("construct seeded image url")?;
    let fields = TaskFields::new(TaskTitle::new(title).wrap_err("construct seeded title")?)
        .with_image_url(image);
    let task = Task::new(TaskId::new(id).wrap_err("construct seeded id")?, fields);
    world.records.seed(task).wrap_err("seed task")?;
    Ok(())
}

#[given("an empty task table")]
fn empty_task_table(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let operations = world.records.operations().wrap_err("read journal")?;
    eyre::ensure!(operations.is_empty(), "task table was already used");
    Ok(())
}

#[given(r#"a stored task {id:i64} titled "{title}" with image "{url}""#)]
fn stored_task_with_image(
    world: &mut TaskWorld,
    id: i64,
    title: String,
    url: String,
) -> Result<(), eyre::Report> {
    seed(world, id, &title, Some(&url))
}

#[given(r#"a stored task {id:i64} titled "{title}" without an image"#)]
fn stored_task_without_image(
    world: &mut TaskWorld,
    id: i64,
    title: String,
) -> Result<(), eyre::Report> {
    seed(world, id, &title, None)
}

#[given("the image bucket rejects uploads")]
fn bucket_rejects_uploads(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    world
        .objects
        .fail_uploads_with("bucket is offline")
        .wrap_err("inject upload failure")?;
    Ok(())
}

#[given(r#"the task table rejects calls with "{message}""#)]
fn task_table_rejects_calls(world: &mut TaskWorld, message: String) -> Result<(), eyre::Report> {
    world
        .records
        .fail_with(message)
        .wrap_err("inject record store failure")?;
    Ok(())
}

#[given(r#"a new task form with title "{title}""#)]
fn new_task_form(world: &mut TaskWorld, title: String) {
    let mut form = world.service.create_form();
    form.draft_mut().set_title(title);
    world.form = Some(form);
}

#[given(r#"a new task form with image "{file_name}" and title "{title}""#)]
fn new_task_form_with_image(world: &mut TaskWorld, file_name: String, title: String) {
    let mut form = world.service.create_form();
    form.draft_mut().set_title(title);
    form.draft_mut()
        .select_image(SelectedImage::new(file_name, vec![0x89, b'P', b'N', b'G']));
    world.form = Some(form);
}

#[given("an edit form for task {id:i64}")]
fn edit_form(world: &mut TaskWorld, id: i64) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("construct task id")?;
    world.form = Some(world.service.edit_form(task_id));
    Ok(())
}
