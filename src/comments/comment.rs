use super::*;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// A published storyboard, addressed by client and project slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Storyboard {
    client: String,
    project: String,
}

impl Storyboard {
    pub fn new(client: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            project: project.into(),
        }
    }
    pub fn client(&self) -> &str {
        &self.client
    }
    pub fn project(&self) -> &str {
        &self.project
    }
}

impl Display for Storyboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.client, self.project)
    }
}

/// Stored comment row. A `None` scene is general feedback on the storyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: i32,
    pub client_slug: String,
    pub project_slug: String,
    pub scene_number: Option<i32>,
    pub author_name: String,
    pub author_email: Option<String>,
    pub comment_text: String,
    pub status: Status,
    pub team_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn storyboard(&self) -> Storyboard {
        Storyboard::new(&self.client_slug, &self.project_slug)
    }
}

/// What storyboard viewers see: no contact details, no board coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub id: i32,
    pub scene_number: Option<i32>,
    pub author_name: String,
    pub comment_text: String,
    pub status: Status,
    pub team_response: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for Summary {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            scene_number: comment.scene_number,
            author_name: comment.author_name,
            comment_text: comment.comment_text,
            status: comment.status,
            team_response: comment.team_response,
            created_at: comment.created_at,
        }
    }
}

/// Acknowledgement returned after a comment is stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Receipt {
    pub id: i32,
    pub created_at: DateTime<Utc>,
}
