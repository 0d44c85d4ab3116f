use super::*;
use crate::CommentRepository;
use crate::Connector;
use crate::Hosting;
use crate::Postgres;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::error::JsonPayloadError;
use actix_web::error::QueryPayloadError;
use actix_web::middleware::Logger;
use actix_web::web;
use anyhow::Context;
use std::sync::Arc;
use tokio_postgres::Client;

pub struct Server;

impl Server {
    #[rustfmt::skip]
    pub async fn run(config: Hosting) -> anyhow::Result<()> {
        let client = Postgres::parse(&config.url)
            .context("parse DB_URL")?
            .connect()
            .await
            .context("connect to database")?
            .shared();
        let client = web::Data::new(client);
        let key = web::Data::new(AdminKey::new(config.admin_key));
        log::info!("starting comment server on {}", config.bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(cors())
                .app_data(client.clone())
                .app_data(key.clone())
                .route("/health", web::get().to(handlers::health))
                .configure(routes::<Arc<Client>>)
        })
        .workers(config.workers)
        .bind(&config.bind)
        .with_context(|| format!("bind {}", config.bind))?
        .run()
        .await
        .context("run comment server")
    }
}

/// Storyboard pages are served from other origins.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
}

/// The `/api` routes over any comment store. Other methods get 405,
/// malformed queries and bodies get a JSON 400.
#[rustfmt::skip]
pub fn routes<R>(cfg: &mut web::ServiceConfig)
where
    R: CommentRepository + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::rejected::<JsonPayloadError>))
        .app_data(web::QueryConfig::default().error_handler(handlers::rejected::<QueryPayloadError>))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/comments")
                        .route(web::get().to(handlers::list::<R>))
                        .route(web::post().to(handlers::submit::<R>)),
                )
                .service(
                    web::resource("/admin/comments")
                        .route(web::get().to(handlers::search::<R>))
                        .route(web::patch().to(handlers::triage::<R>)),
                ),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test;
    use chrono::Utc;
    use serde_json::Value;
    use serde_json::json;
    use std::sync::Mutex;

    /// Comment store held in memory, newest last.
    #[derive(Default)]
    struct Memory {
        rows: Mutex<Vec<Comment>>,
    }

    impl CommentRepository for Memory {
        async fn storyboard(&self, board: &Storyboard, scene: Option<i32>) -> anyhow::Result<Vec<Comment>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|c| c.storyboard() == *board)
                .filter(|c| scene.is_none() || c.scene_number == scene)
                .cloned()
                .collect())
        }
        async fn submit(&self, draft: &Draft) -> anyhow::Result<Receipt> {
            let mut rows = self.rows.lock().unwrap();
            let receipt = Receipt {
                id: rows.len() as i32 + 1,
                created_at: Utc::now(),
            };
            rows.push(Comment {
                id: receipt.id,
                client_slug: draft.storyboard.client().to_string(),
                project_slug: draft.storyboard.project().to_string(),
                scene_number: draft.scene,
                author_name: draft.author_name.clone(),
                author_email: draft.author_email.clone(),
                comment_text: draft.comment_text.clone(),
                status: Status::New,
                team_response: None,
                created_at: receipt.created_at,
                resolved_at: None,
            });
            Ok(receipt)
        }
        async fn search(&self, filter: &Filter) -> anyhow::Result<Vec<Comment>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|c| filter.status.is_none_or(|s| s == c.status))
                .filter(|c| filter.client().is_none_or(|x| x == c.client_slug))
                .take(filter.limit().unwrap_or(i64::MAX) as usize)
                .cloned()
                .collect())
        }
        async fn triage(&self, change: &Change) -> anyhow::Result<Option<Comment>> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.iter_mut().find(|c| c.id == change.id).map(|c| {
                c.status = change.status.unwrap_or(c.status);
                c.team_response = change.team_response.clone().or(c.team_response.take());
                if change.resolves() {
                    c.resolved_at = Some(Utc::now());
                }
                c.clone()
            }))
        }
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .wrap(cors())
                    .app_data(web::Data::new(Memory::default()))
                    .app_data(web::Data::new(AdminKey::new("s3cret")))
                    .configure(routes::<Memory>),
            )
            .await
        };
    }

    fn comment(scene: i32) -> Value {
        json!({
            "client": "regentx",
            "project": "summit",
            "scene": scene,
            "author_name": "Dana",
            "author_email": "dana@example.com",
            "comment_text": "Swap the opening shot",
        })
    }

    fn is_json<B>(response: &actix_web::dev::ServiceResponse<B>) -> bool {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .is_some_and(|v| v == "application/json")
    }

    #[actix_web::test]
    async fn keyless_search_is_unauthorized_before_query_parsing() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/admin/comments?status=closed")
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }
    #[actix_web::test]
    async fn keyless_triage_is_unauthorized_before_body_parsing() {
        let app = app!();
        let req = test::TestRequest::patch()
            .uri("/api/admin/comments")
            .set_json(json!({ "id": "x" }))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    #[actix_web::test]
    async fn unknown_status_is_a_json_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/admin/comments?status=closed")
            .insert_header(("X-Admin-Key", "s3cret"))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(is_json(&response));
        let body: Value = test::read_body_json(response).await;
        assert!(body["error"].is_string());
    }
    #[actix_web::test]
    async fn mistyped_scene_is_a_json_bad_request() {
        let app = app!();
        let mut body = comment(3);
        body["scene"] = json!("3");
        let req = test::TestRequest::post()
            .uri("/api/comments")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(is_json(&response));
    }
    #[actix_web::test]
    async fn missing_board_is_a_json_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/comments?client=regentx")
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "client and project are required");
    }
    #[actix_web::test]
    async fn submitted_comment_is_listed_without_contact_details() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/comments")
            .set_json(comment(0))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["comment"]["id"], 1);
        let req = test::TestRequest::get()
            .uri("/api/comments?client=regentx&project=summit")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let comments = body["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["scene_number"], Value::Null);
        assert!(comments[0].get("author_email").is_none());
    }
    #[actix_web::test]
    async fn triage_resolves_known_comments_only() {
        let app = app!();
        let req = test::TestRequest::patch()
            .uri("/api/admin/comments")
            .insert_header(("X-Admin-Key", "s3cret"))
            .set_json(json!({ "id": 99, "status": "resolved" }))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let req = test::TestRequest::post()
            .uri("/api/comments")
            .set_json(comment(2))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::patch()
            .uri("/api/admin/comments")
            .insert_header(("X-Admin-Key", "s3cret"))
            .set_json(json!({ "id": 1, "status": "resolved", "team_response": "Done" }))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["comment"]["status"], "resolved");
        assert_eq!(body["comment"]["team_response"], "Done");
        assert!(body["comment"]["resolved_at"].is_string());
    }
    #[actix_web::test]
    async fn other_methods_are_not_allowed() {
        let app = app!();
        let req = test::TestRequest::delete().uri("/api/comments").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
    #[actix_web::test]
    async fn preflight_allows_any_origin() {
        let app = app!();
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/comments")
            .insert_header((header::ORIGIN, "https://boards.example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert!(response.status().is_success());
        assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
    #[actix_web::test]
    #[ignore = "requires DB_URL pointing at a scratch database"]
    async fn live_routes_guard_admin_and_methods() {
        let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
        let pg = Postgres::parse(url).unwrap();
        Bootstrap::new(pg.clone(), DEFAULT_SCHEMA).run().await.unwrap();
        let client = pg.connect().await.unwrap().shared();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(client))
                .app_data(web::Data::new(AdminKey::new("s3cret")))
                .configure(routes::<Arc<Client>>),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/admin/comments?status=closed")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
        let req = test::TestRequest::delete().uri("/api/admin/comments").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::METHOD_NOT_ALLOWED);
        let req = test::TestRequest::get()
            .uri("/api/admin/comments?status=new")
            .insert_header(("X-Admin-Key", "s3cret"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
