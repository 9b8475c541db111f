use axum::Json;
use serde_json::{Value, json};

pub mod admin_route;
pub mod verify_route;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::{
        app,
        state::AppState,
        store::file::{CsvKeyStore, CsvRosterStore},
    };

    const SECRET: &str = "test-admin-secret";

    const ROSTER: &str = "\
identifier,name,contact,affiliation,status,time
S01,Student 1,s01@example.com,CSE,Yes,2025-01-01 09:00:00
S02,Student 2,s02@example.com,CSE,yes,2025-01-01 09:01:00
S03,Student 3,s03@example.com,ECE,YES,2025-01-01 09:02:00
S04,Student 4,s04@example.com,ECE,present,2025-01-01 09:03:00
S05,Student 5,s05@example.com,ME,,
S06,Student 6,s06@example.com,ME,No,
S07,Student 7,s07@example.com,ME,,
S08,Student 8,s08@example.com,CE,,
S09,Student 9,s09@example.com,CE,,
ABC123,Asha Rao,asha@example.com,CSE,,
";

    struct TestApp {
        dir: TempDir,
        router: Router,
    }

    impl TestApp {
        fn new() -> Self {
            let dir = TempDir::new().expect("create temp dir");
            let roster_path = dir.path().join("students.csv");
            fs::write(&roster_path, ROSTER).expect("write roster");
            let state = AppState::with_stores(
                SECRET.to_string(),
                Arc::new(CsvRosterStore::new(roster_path)),
                Arc::new(CsvKeyStore::new(dir.path().join("volunteer_keys.csv"))),
            );
            Self {
                dir,
                router: app(state),
            }
        }

        fn roster(&self) -> String {
            fs::read_to_string(self.dir.path().join("students.csv")).expect("read roster")
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            let request = Request::post(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request");
            let response = self.router.clone().oneshot(request).await.expect("call router");
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("read body");
            (status, serde_json::from_slice(&bytes).expect("json body"))
        }

        async fn issue_key(&self) -> String {
            let (status, body) = self
                .post(
                    "/admin/generate-key",
                    json!({ "admin_secret": SECRET, "erp_id": "ERP-9" }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "success");
            assert_eq!(body["erp_id"], "ERP-9");
            body["pass_key"].as_str().expect("pass_key").to_string()
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let response = app
            .router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_verify_twice_returns_first_time() {
        let app = TestApp::new();
        let key = app.issue_key().await;

        let (status, first) = app
            .post("/verify", json!({ "volunteer_key": key, "uuid": "ABC123_7" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["status"], "valid");
        assert_eq!(first["already_verified"], false);
        assert_eq!(first["name"], "Asha Rao");
        assert_eq!(first["email"], "asha@example.com");
        assert_eq!(first["branch"], "CSE");
        assert_eq!(first["uuid"], "ABC123");

        let (_, second) = app
            .post("/verify", json!({ "volunteer_key": key, "uuid": "ABC123" }))
            .await;
        assert_eq!(second["status"], "valid");
        assert_eq!(second["already_verified"], true);
        assert_eq!(second["time"], first["time"]);
        assert!(app.roster().contains(&format!(
            "ABC123,Asha Rao,asha@example.com,CSE,Yes,{}",
            first["time"].as_str().unwrap()
        )));
    }

    #[tokio::test]
    async fn test_unknown_code_is_invalid_and_writes_nothing() {
        let app = TestApp::new();
        let key = app.issue_key().await;
        let before = app.roster();

        let (status, body) = app
            .post("/verify", json!({ "volunteer_key": key, "uuid": "NOPE_1" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "invalid" }));
        assert_eq!(app.roster(), before);
    }

    #[tokio::test]
    async fn test_revoked_key_is_forbidden() {
        let app = TestApp::new();
        let key = app.issue_key().await;

        let (status, body) = app
            .post(
                "/admin/delete-key",
                json!({ "admin_secret": SECRET, "pass_key": key }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let (status, body) = app
            .post("/verify", json!({ "volunteer_key": key, "uuid": "ABC123" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "status": "forbidden" }));

        let (_, keys) = app.post("/admin/keys", json!({ "admin_secret": SECRET })).await;
        assert_eq!(
            keys["keys"],
            json!([{ "erp_id": "ERP-9", "pass_key": key, "active": false }])
        );
    }

    #[tokio::test]
    async fn test_missing_uuid_is_bad_request() {
        let app = TestApp::new();
        let key = app.issue_key().await;
        let (status, body) = app.post("/verify", json!({ "volunteer_key": key })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = TestApp::new();
        let request = Request::post("/verify")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_count_status_tokens() {
        let app = TestApp::new();
        let (status, body) = app.post("/admin/stats", json!({ "admin_secret": SECRET })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "status": "success", "total_students": 10, "verified": 4, "unverified": 6 })
        );
    }

    #[tokio::test]
    async fn test_admin_routes_reject_wrong_secret() {
        let app = TestApp::new();
        let key = app.issue_key().await;
        let roster_before = app.roster();
        let keys_path = app.dir.path().join("volunteer_keys.csv");
        let keys_before = fs::read_to_string(&keys_path).unwrap();

        let requests = [
            ("/admin/generate-key", json!({ "admin_secret": "wrong", "erp_id": "ERP-1" })),
            ("/admin/delete-key", json!({ "admin_secret": "wrong", "pass_key": key })),
            ("/admin/stats", json!({ "admin_secret": "wrong" })),
            ("/admin/keys", json!({ "admin_secret": "wrong" })),
            ("/admin/keys", json!({})),
        ];
        for (uri, body) in requests {
            let (status, body) = app.post(uri, body).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body, json!({ "status": "unauthorized" }));
        }

        assert_eq!(app.roster(), roster_before);
        assert_eq!(fs::read_to_string(&keys_path).unwrap(), keys_before);
    }

    #[tokio::test]
    async fn test_missing_roster_is_error() {
        let app = TestApp::new();
        let key = app.issue_key().await;
        fs::remove_file(app.dir.path().join("students.csv")).unwrap();

        let (status, body) = app
            .post("/verify", json!({ "volunteer_key": key, "uuid": "ABC123" }))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("students.csv"));
    }
}
