//! Request handlers for the task pages.

use super::pages::{DeletePage, FormPage, ListPage, MessagePage};
use super::{AppState, Notice, WebError};
use crate::task::{
    domain::{ImageUrl, SelectedImage, TaskDraft, TaskId},
    ports::{ObjectStore, TaskRecordStore},
    services::{DeleteOutcome, FormError, FormMode, TaskFormController, TaskListError},
};
use axum::Form;
use axum::extract::{Multipart, Path, Query, State};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use mockable::Clock;
use serde::Deserialize;
use tracing::warn;

type PageResult = Result<Response, WebError>;

/// Query string accepted by the task list.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListQuery {
    notice: Option<String>,
}

/// Body of the delete confirmation form.
#[derive(Debug, Default, Deserialize)]
pub(super) struct DeleteForm {
    confirm: Option<String>,
}

/// Task fields read from a multipart form submission.
#[derive(Debug, Default)]
struct Submission {
    title: String,
    detail: String,
    is_completed: bool,
    image: Option<SelectedImage>,
}

impl Submission {
    async fn read(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut submission = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "title" => submission.title = field.text().await?,
                "detail" => submission.detail = field.text().await?,
                "is_completed" => {
                    let value = field.text().await?;
                    submission.is_completed = matches!(value.as_str(), "on" | "true" | "1");
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_owned();
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        let mut image = SelectedImage::new(file_name, bytes.to_vec());
                        if let Some(mime) = content_type {
                            image = image.with_content_type(mime);
                        }
                        submission.image = Some(image);
                    }
                }
                _ => {}
            }
        }
        Ok(submission)
    }

    fn apply_to(self, draft: &mut TaskDraft) {
        draft.set_title(self.title);
        draft.set_detail(self.detail);
        draft.set_completed(self.is_completed);
        draft.clear_selected_image();
        if let Some(image) = self.image {
            draft.select_image(image);
        }
    }
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub(super) async fn home<R, O, C>(State(state): State<AppState<R, O, C>>) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(state.pages().render("home.html", minijinja::context! {})?.into_response())
}

pub(super) async fn list_tasks<R, O, C>(
    State(state): State<AppState<R, O, C>>,
    Query(query): Query<ListQuery>,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let notice = query.notice.as_deref().and_then(Notice::from_query);
    let mut view = state.service().list_view();
    let (status, error) = match view.load().await {
        Ok(_) => (StatusCode::OK, None),
        Err(err) => {
            warn!(error = %err, "task list load failed");
            (StatusCode::BAD_GATEWAY, Some(err.to_string()))
        }
    };
    let page = ListPage {
        tasks: view.tasks(),
        notice: notice.map(Notice::message),
        error,
    };
    Ok((status, state.pages().render("task_list.html", page)?).into_response())
}

#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub(super) async fn new_task_form<R, O, C>(State(state): State<AppState<R, O, C>>) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let form = state.service().create_form();
    render_form(&state, StatusCode::OK, &form)
}

pub(super) async fn create_task<R, O, C>(
    State(state): State<AppState<R, O, C>>,
    multipart: Multipart,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let submission = Submission::read(multipart).await?;
    let mut form = state.service().create_form();
    submission.apply_to(form.draft_mut());
    submit_form(&state, form, Notice::Created).await
}

pub(super) async fn edit_task_form<R, O, C>(
    State(state): State<AppState<R, O, C>>,
    Path(raw_id): Path<String>,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return task_not_found(&state);
    };
    let mut form = state.service().edit_form(id);
    match form.load().await {
        Ok(()) => render_form(&state, StatusCode::OK, &form),
        Err(err) => load_failure(&state, &err),
    }
}

pub(super) async fn update_task<R, O, C>(
    State(state): State<AppState<R, O, C>>,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return task_not_found(&state);
    };
    let submission = Submission::read(multipart).await?;
    let mut form = state.service().edit_form(id);
    match form.load().await {
        Ok(()) => {}
        Err(FormError::NotFound(_)) => return task_not_found(&state),
        Err(_) => {
            // Keep the submitted edits so they can be sent again.
            submission.apply_to(form.draft_mut());
            let mut page = form_page(&form);
            page.submit_enabled = true;
            let html = state.pages().render("task_form.html", page)?;
            return Ok((StatusCode::BAD_GATEWAY, html).into_response());
        }
    }
    submission.apply_to(form.draft_mut());
    submit_form(&state, form, Notice::Updated).await
}

pub(super) async fn confirm_delete<R, O, C>(
    State(state): State<AppState<R, O, C>>,
    Path(raw_id): Path<String>,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return task_not_found(&state);
    };
    let mut view = state.service().list_view();
    if let Err(err) = view.load().await {
        return list_unavailable(&state, &err.to_string());
    }
    let (Some(task), Some(prompt)) = (view.find(id), view.delete_prompt(id)) else {
        return task_not_found(&state);
    };
    let page = DeletePage { task, prompt };
    Ok(state.pages().render("task_delete.html", page)?.into_response())
}

pub(super) async fn delete_task<R, O, C>(
    State(state): State<AppState<R, O, C>>,
    Path(raw_id): Path<String>,
    Form(body): Form<DeleteForm>,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Ok(id) = raw_id.parse::<TaskId>() else {
        return task_not_found(&state);
    };
    let confirmed = body.confirm.as_deref() == Some("yes");
    let mut view = state.service().list_view();
    if let Err(err) = view.load().await {
        return list_unavailable(&state, &err.to_string());
    }

    match view.delete(id, &|_: &str| confirmed).await {
        Ok(DeleteOutcome::Deleted(_)) => {
            Ok(Redirect::to(&Notice::Deleted.list_url()).into_response())
        }
        Ok(DeleteOutcome::Cancelled) => Ok(Redirect::to("/tasks").into_response()),
        Err(TaskListError::NotListed(_)) => task_not_found(&state),
        Err(TaskListError::Persist(err)) => {
            let page = ListPage {
                tasks: view.tasks(),
                notice: None,
                error: Some(format!("Failed to delete task: {err}")),
            };
            let html = state.pages().render("task_list.html", page)?;
            Ok((StatusCode::BAD_GATEWAY, html).into_response())
        }
    }
}

async fn submit_form<R, O, C>(
    state: &AppState<R, O, C>,
    mut form: TaskFormController<R, O, C>,
    success: Notice,
) -> PageResult
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    match form.submit().await {
        Ok(outcome) => {
            let notice = if outcome.upload_error.is_some() {
                Notice::ImageUploadFailed
            } else {
                success
            };
            Ok(Redirect::to(&notice.list_url()).into_response())
        }
        Err(FormError::Validation(_)) => {
            render_form(state, StatusCode::UNPROCESSABLE_ENTITY, &form)
        }
        Err(FormError::NotFound(_)) => task_not_found(state),
        Err(_) => render_form(state, StatusCode::BAD_GATEWAY, &form),
    }
}

fn render_form<R, O, C>(
    state: &AppState<R, O, C>,
    status: StatusCode,
    form: &TaskFormController<R, O, C>,
) -> PageResult
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    Ok((status, state.pages().render("task_form.html", form_page(form))?).into_response())
}

fn form_page<R, O, C>(form: &TaskFormController<R, O, C>) -> FormPage<'_>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    let draft = form.draft();
    let (heading, action, submit_label) = match form.mode() {
        FormMode::Create => ("Add Task", "/tasks/new".to_owned(), "Save Task"),
        FormMode::Edit { id, .. } => ("Edit Task", format!("/tasks/{id}/edit"), "Update Task"),
    };
    FormPage {
        heading,
        action,
        submit_label,
        submit_enabled: form.is_submit_enabled(),
        title: draft.title(),
        detail: draft.detail(),
        is_completed: draft.is_completed(),
        image_url: draft.stored_image().map(ImageUrl::as_str),
        error: form.error().map(ToString::to_string),
    }
}

fn load_failure<R, O, C>(state: &AppState<R, O, C>, err: &FormError) -> PageResult
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    match err {
        FormError::NotFound(_) => task_not_found(state),
        other => message(state, StatusCode::BAD_GATEWAY, "Task unavailable", &other.to_string()),
    }
}

fn list_unavailable<R, O, C>(state: &AppState<R, O, C>, reason: &str) -> PageResult
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    message(state, StatusCode::BAD_GATEWAY, "Task list unavailable", reason)
}

fn task_not_found<R, O, C>(state: &AppState<R, O, C>) -> PageResult
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    message(
        state,
        StatusCode::NOT_FOUND,
        "Task not found",
        "The requested task does not exist.",
    )
}

fn message<R, O, C>(
    state: &AppState<R, O, C>,
    status: StatusCode,
    heading: &str,
    text: &str,
) -> PageResult
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    let page = MessagePage {
        heading,
        message: text,
    };
    Ok((status, state.pages().render("message.html", page)?).into_response())
}
