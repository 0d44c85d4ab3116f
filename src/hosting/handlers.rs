use crate::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::error::InternalError;
use actix_web::web;
use std::fmt::Debug;
use std::fmt::Display;
use std::sync::Arc;
use tokio_postgres::Client;

/// Header carrying the admin shared secret.
pub const ADMIN_HEADER: &str = "x-admin-key";

/// Shared secret guarding the admin routes.
#[derive(Clone)]
pub struct AdminKey(String);

impl AdminKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
    pub fn admits(&self, req: &HttpRequest) -> bool {
        req.headers()
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == self.0)
    }
}

fn invalid(e: Invalid) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}
fn failure(context: &str, e: anyhow::Error) -> HttpResponse {
    log::error!("{} failed: {:#}", context, e);
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Internal server error" }))
}
fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Unauthorized" }))
}

/// Turns a query or body that failed to deserialize into a JSON 400.
pub fn rejected<E>(e: E, _: &HttpRequest) -> actix_web::Error
where
    E: Debug + Display + 'static,
{
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    InternalError::from_response(e, response).into()
}

pub async fn list<R>(
    db: web::Data<R>,
    query: Result<web::Query<Listing>, actix_web::Error>,
) -> impl Responder
where
    R: CommentRepository + 'static,
{
    let query = match query {
        Ok(query) => query.into_inner(),
        Err(e) => return e.error_response(),
    };
    let (board, scene) = match query.validate() {
        Ok(ok) => ok,
        Err(e) => return invalid(e),
    };
    match db.storyboard(&board, scene).await {
        Ok(comments) => HttpResponse::Ok().json(serde_json::json!({
            "comments": comments.into_iter().map(Summary::from).collect::<Vec<_>>()
        })),
        Err(e) => failure("list comments", e),
    }
}

pub async fn submit<R>(
    db: web::Data<R>,
    body: Result<web::Json<Submission>, actix_web::Error>,
) -> impl Responder
where
    R: CommentRepository + 'static,
{
    let body = match body {
        Ok(body) => body.into_inner(),
        Err(e) => return e.error_response(),
    };
    let draft = match body.validate() {
        Ok(draft) => draft,
        Err(e) => return invalid(e),
    };
    match db.submit(&draft).await {
        Ok(receipt) => {
            log::info!("comment {} on {} from {}", receipt.id, draft.storyboard, draft.author_name);
            HttpResponse::Created().json(serde_json::json!({ "success": true, "comment": receipt }))
        }
        Err(e) => failure("submit comment", e),
    }
}

/// Admin routes check the key before looking at the query or body.
pub async fn search<R>(
    db: web::Data<R>,
    key: web::Data<AdminKey>,
    query: Result<web::Query<Filter>, actix_web::Error>,
    req: HttpRequest,
) -> impl Responder
where
    R: CommentRepository + 'static,
{
    if !key.admits(&req) {
        return unauthorized();
    }
    let filter = match query {
        Ok(query) => query.into_inner(),
        Err(e) => return e.error_response(),
    };
    match db.search(&filter).await {
        Ok(comments) => HttpResponse::Ok().json(serde_json::json!({ "comments": comments })),
        Err(e) => failure("search comments", e),
    }
}

pub async fn triage<R>(
    db: web::Data<R>,
    key: web::Data<AdminKey>,
    body: Result<web::Json<Triage>, actix_web::Error>,
    req: HttpRequest,
) -> impl Responder
where
    R: CommentRepository + 'static,
{
    if !key.admits(&req) {
        return unauthorized();
    }
    let body = match body {
        Ok(body) => body.into_inner(),
        Err(e) => return e.error_response(),
    };
    let change = match body.validate() {
        Ok(change) => change,
        Err(e) => return invalid(e),
    };
    match db.triage(&change).await {
        Ok(Some(comment)) => {
            log::info!("comment {} now {}", comment.id, comment.status);
            HttpResponse::Ok().json(serde_json::json!({ "success": true, "comment": comment }))
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({ "error": "Comment not found" })),
        Err(e) => failure("update comment", e),
    }
}

pub async fn health(db: web::Data<Arc<Client>>) -> impl Responder {
    match db
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}
