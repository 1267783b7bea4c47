//! Domain models for the knowledge base.
//!
//! Plain data carriers mapped 1:1 onto their tables. Identifiers are UUIDv4
//! strings assigned at construction; timestamps are UTC. Lifecycle rules
//! (who may accept an answer, who may edit a note) live in the service layer,
//! not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Question lifecycle state, stored as its canonical uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum QuestionStatus {
    Open,
    Answered,
    Closed,
}

/// What a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum CommentTarget {
    Question,
    Answer,
    Note,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            display_name: display_name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: None,
            owner_id: owner_id.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub workspace_id: String,
    pub author_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        workspace_id: impl Into<String>,
        author_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            workspace_id: workspace_id.into(),
            author_id: author_id.into(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: String,
    pub project_id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        project_id: impl Into<String>,
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            project_id: project_id.into(),
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
            status: QuestionStatus::Open,
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: QuestionStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub author_id: String,
    pub content: String,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(
        question_id: impl Into<String>,
        author_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            question_id: question_id.into(),
            author_id: author_id.into(),
            content: content.into(),
            is_accepted: false,
            created_at: Utc::now(),
        }
    }

    pub fn accepted(mut self) -> Self {
        self.is_accepted = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: String,
    pub project_id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        project_id: impl Into<String>,
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            project_id: project_id.into(),
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
            version: 1,
            created_at: Utc::now(),
        }
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub target_type: CommentTarget,
    pub target_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        target_type: CommentTarget,
        target_id: impl Into<String>,
        author_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            target_type,
            target_id: target_id.into(),
            author_id: author_id.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: None,
            category: None,
            color: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
