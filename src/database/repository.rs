use crate::COMMENTS;
use crate::COMMENTS_VIEW;
use crate::Change;
use crate::Comment;
use crate::Draft;
use crate::Filter;
use crate::Receipt;
use crate::Storyboard;
use anyhow::Context;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

#[rustfmt::skip]
const COLUMNS: &str = "id, client_slug, project_slug, scene_number, author_name, author_email, \
                       comment_text, status, team_response, created_at, resolved_at";

/// Repository trait for comment database operations.
/// Keeps SQL out of the HTTP handlers.
#[allow(async_fn_in_trait)]
pub trait CommentRepository {
    /// Comments on one storyboard, general comments first, newest first within a scene.
    async fn storyboard(&self, board: &Storyboard, scene: Option<i32>) -> anyhow::Result<Vec<Comment>>;
    async fn submit(&self, draft: &Draft) -> anyhow::Result<Receipt>;
    async fn search(&self, filter: &Filter) -> anyhow::Result<Vec<Comment>>;
    /// Returns `None` when no comment has the given id.
    async fn triage(&self, change: &Change) -> anyhow::Result<Option<Comment>>;
}

impl TryFrom<&Row> for Comment {
    type Error = anyhow::Error;
    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            client_slug: row.try_get("client_slug")?,
            project_slug: row.try_get("project_slug")?,
            scene_number: row.try_get("scene_number")?,
            author_name: row.try_get("author_name")?,
            author_email: row.try_get("author_email")?,
            comment_text: row.try_get("comment_text")?,
            status: row.try_get::<_, String>("status")?.parse()?,
            team_response: row.try_get("team_response")?,
            created_at: row.try_get("created_at")?,
            resolved_at: row.try_get("resolved_at")?,
        })
    }
}

fn hydrate(rows: Vec<Row>) -> anyhow::Result<Vec<Comment>> {
    rows.iter().map(Comment::try_from).collect()
}

impl CommentRepository for Arc<Client> {
    async fn storyboard(&self, board: &Storyboard, scene: Option<i32>) -> anyhow::Result<Vec<Comment>> {
        let rows = match scene {
            Some(scene) => {
                #[rustfmt::skip]
                const SQL: &str = const_format::concatcp!(
                    "SELECT ", COLUMNS, " FROM ", COMMENTS, " ",
                    "WHERE  client_slug = $1 AND project_slug = $2 AND scene_number = $3 ",
                    "ORDER  BY created_at DESC"
                );
                self.query(SQL, &[&board.client(), &board.project(), &scene])
                    .await
            }
            None => {
                #[rustfmt::skip]
                const SQL: &str = const_format::concatcp!(
                    "SELECT ", COLUMNS, " FROM ", COMMENTS, " ",
                    "WHERE  client_slug = $1 AND project_slug = $2 ",
                    "ORDER  BY scene_number NULLS FIRST, created_at DESC"
                );
                self.query(SQL, &[&board.client(), &board.project()])
                    .await
            }
        }
        .with_context(|| format!("list comments for {}", board))?;
        hydrate(rows)
    }

    async fn submit(&self, draft: &Draft) -> anyhow::Result<Receipt> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "INSERT INTO ", COMMENTS, " ",
            "(client_slug, project_slug, scene_number, author_name, author_email, comment_text) ",
            "VALUES ($1, $2, $3, $4, $5, $6) ",
            "RETURNING id, created_at"
        );
        let row = self
            .query_one(
                SQL,
                &[
                    &draft.storyboard.client(),
                    &draft.storyboard.project(),
                    &draft.scene,
                    &draft.author_name,
                    &draft.author_email,
                    &draft.comment_text,
                ],
            )
            .await
            .with_context(|| format!("insert comment on {}", draft.storyboard))?;
        Ok(Receipt {
            id: row.try_get(0)?,
            created_at: row.try_get(1)?,
        })
    }

    async fn search(&self, filter: &Filter) -> anyhow::Result<Vec<Comment>> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "SELECT ", COLUMNS, " FROM ", COMMENTS_VIEW, " ",
            "WHERE  ($1::text IS NULL OR status      = $1::text) ",
            "AND    ($2::text IS NULL OR client_slug = $2::text) ",
            "LIMIT  $3::bigint"
        );
        let status = filter.status.map(|s| s.as_str());
        let rows = self
            .query(SQL, &[&status, &filter.client(), &filter.limit()])
            .await
            .context("search comments")?;
        hydrate(rows)
    }

    async fn triage(&self, change: &Change) -> anyhow::Result<Option<Comment>> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "UPDATE ", COMMENTS, " ",
            "SET    status        = COALESCE($2::text, status), ",
            "       team_response = COALESCE($3::text, team_response), ",
            "       resolved_at   = CASE WHEN $4 THEN NOW() ELSE resolved_at END ",
            "WHERE  id = $1 ",
            "RETURNING ", COLUMNS
        );
        let status = change.status.map(|s| s.as_str());
        self.query_opt(
            SQL,
            &[&change.id, &status, &change.team_response, &change.resolves()],
        )
        .await
        .with_context(|| format!("update comment {}", change.id))?
        .as_ref()
        .map(Comment::try_from)
        .transpose()
    }
}
