//! Template environment and page view models.

use super::WebError;
use crate::task::domain::Task;
use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("task_list.html", include_str!("../../templates/task_list.html")),
    ("task_form.html", include_str!("../../templates/task_form.html")),
    ("task_delete.html", include_str!("../../templates/task_delete.html")),
    ("message.html", include_str!("../../templates/message.html")),
];

/// Compiled page templates.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Compiles the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] when a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Renders template `name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Render`] when rendering fails.
    pub fn render(&self, name: &str, context: impl Serialize) -> Result<Html<String>, WebError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(context)?))
    }
}

/// Banner shown on the task list after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A task was inserted.
    Created,
    /// A task was updated.
    Updated,
    /// A task was deleted.
    Deleted,
    /// The task was saved but its new image was not.
    ImageUploadFailed,
}

impl Notice {
    /// Returns the query-string value carried by the redirect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::ImageUploadFailed => "image_upload_failed",
        }
    }

    /// Parses a query-string value.
    #[must_use]
    pub fn from_query(raw: &str) -> Option<Self> {
        match raw {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            "image_upload_failed" => Some(Self::ImageUploadFailed),
            _ => None,
        }
    }

    /// Returns the banner text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Created => "Task created successfully",
            Self::Updated => "Task updated successfully",
            Self::Deleted => "Task deleted successfully",
            Self::ImageUploadFailed => "Task saved, but the image upload failed",
        }
    }

    /// Returns the list URL showing this notice.
    #[must_use]
    pub fn list_url(self) -> String {
        format!("/tasks?notice={}", self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ListPage<'a> {
    pub tasks: &'a [Task],
    pub notice: Option<&'static str>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct FormPage<'a> {
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub title: &'a str,
    pub detail: &'a str,
    pub is_completed: bool,
    pub image_url: Option<&'a str>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletePage<'a> {
    pub task: &'a Task,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub(super) struct MessagePage<'a> {
    pub heading: &'a str,
    pub message: &'a str,
}
