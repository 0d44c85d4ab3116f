use super::*;
use serde::Deserialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// Upper bound on admin listings that carry no filter at all.
pub const UNFILTERED_LIMIT: i64 = 100;

/// A request that failed validation. The message is shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalid(pub &'static str);

impl Display for Invalid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Invalid {}

/// Treats absent and blank text the same way.
fn present(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Query for the comments on one storyboard, optionally one scene.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    pub client: Option<String>,
    pub project: Option<String>,
    pub scene: Option<String>,
}

impl Listing {
    pub fn validate(self) -> Result<(Storyboard, Option<i32>), Invalid> {
        let (Some(client), Some(project)) = (present(self.client), present(self.project)) else {
            return Err(Invalid("client and project are required"));
        };
        let scene = match present(self.scene) {
            None => None,
            Some(scene) => Some(
                scene
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| Invalid("scene must be a number"))?,
            ),
        };
        Ok((Storyboard::new(client, project), scene))
    }
}

/// Body of a new comment from a storyboard viewer.
/// Scene 0 and an absent scene both mean general feedback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    pub client: Option<String>,
    pub project: Option<String>,
    pub scene: Option<i32>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub comment_text: Option<String>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub storyboard: Storyboard,
    pub scene: Option<i32>,
    pub author_name: String,
    pub author_email: Option<String>,
    pub comment_text: String,
}

impl Submission {
    pub fn validate(self) -> Result<Draft, Invalid> {
        match (
            present(self.client),
            present(self.project),
            present(self.author_name),
            present(self.comment_text),
        ) {
            (Some(client), Some(project), Some(author_name), Some(comment_text)) => Ok(Draft {
                storyboard: Storyboard::new(client, project),
                scene: self.scene.filter(|scene| *scene != 0),
                author_name,
                author_email: present(self.author_email),
                comment_text,
            }),
            _ => Err(Invalid(
                "client, project, author_name, and comment_text are required",
            )),
        }
    }
}

/// Admin listing filter over the comments view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filter {
    pub status: Option<Status>,
    pub client: Option<String>,
}

impl Filter {
    pub fn client(&self) -> Option<&str> {
        self.client.as_deref().filter(|c| !c.trim().is_empty())
    }
    /// Only the unfiltered listing is capped.
    pub fn limit(&self) -> Option<i64> {
        match (self.status, self.client()) {
            (None, None) => Some(UNFILTERED_LIMIT),
            _ => None,
        }
    }
}

/// Admin update of a comment's status and/or team response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Triage {
    pub id: Option<i32>,
    pub status: Option<Status>,
    pub team_response: Option<String>,
}

/// A triage that passed validation: at least one of the fields is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub id: i32,
    pub status: Option<Status>,
    pub team_response: Option<String>,
}

impl Change {
    /// Moving to resolved stamps the resolution time.
    pub fn resolves(&self) -> bool {
        self.status == Some(Status::Resolved)
    }
}

impl Triage {
    pub fn validate(self) -> Result<Change, Invalid> {
        let id = self.id.ok_or(Invalid("Comment ID is required"))?;
        let team_response = present(self.team_response);
        if self.status.is_none() && team_response.is_none() {
            return Err(Invalid("status or team_response required"));
        }
        Ok(Change {
            id,
            status: self.status,
            team_response,
        })
    }
}
