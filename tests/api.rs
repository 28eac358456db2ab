//
//  seafile-cli
//  tests/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! API layer tests against a fake Seafile server.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use seafile_cli::api::{ApiError, AuthMode, Repo, SeafileClient};

const TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";
const REPO_ID: &str = "7f1c0e5a-3b2d-4c1e-9f8a-0123456789ab";

fn auth_header() -> String {
    format!("Token {}", TOKEN)
}

/// A client already holding a valid account token.
fn logged_in(server: &ServerGuard) -> SeafileClient {
    SeafileClient::with_token(&server.url(), "me@example.com", TOKEN).unwrap()
}

fn session_repo(server: &ServerGuard) -> Repo {
    Repo::by_session_token(&server.url(), TOKEN, REPO_ID).unwrap()
}

#[tokio::test]
async fn test_login_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api2/auth-token/")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "me@example.com".into()),
            Matcher::UrlEncoded("password".into(), "secret".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "token": TOKEN }).to_string())
        .create_async()
        .await;

    let mut client = SeafileClient::new(&server.url(), "me@example.com", "secret").unwrap();
    client.authenticate().await.unwrap();

    mock.assert_async().await;
    assert!(client.is_authenticated());
    assert_eq!(client.token(), Some(TOKEN));
    let headers = client.session().headers().unwrap();
    assert_eq!(headers["authorization"], auth_header().as_str());
    assert_eq!(headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_login_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api2/auth-token/")
        .with_status(400)
        .with_body(r#"{"non_field_errors":["Unable to login with provided credentials."]}"#)
        .create_async()
        .await;

    let mut client = SeafileClient::new(&server.url(), "me@example.com", "wrong").unwrap();
    let err = client.authenticate().await.unwrap_err();

    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Unable to login"));
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    assert!(!client.is_authenticated());
    assert!(client.session().headers().is_none());
}

#[tokio::test]
async fn test_login_with_malformed_token() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api2/auth-token/")
        .with_status(200)
        .with_body(json!({ "token": "too-short" }).to_string())
        .create_async()
        .await;

    let mut client = SeafileClient::new(&server.url(), "me@example.com", "secret").unwrap();
    let err = client.authenticate().await.unwrap_err();

    assert!(matches!(err, ApiError::AuthFailed(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_token() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api2/auth-token/")
        .with_status(200)
        .with_body(json!({ "token": "short" }).to_string())
        .create_async()
        .await;

    let mut client = logged_in(&server);
    let err = client.authenticate().await.unwrap_err();

    assert!(matches!(err, ApiError::AuthFailed(_)));
    assert!(client.is_authenticated());
    assert_eq!(client.token(), Some(TOKEN));
    let headers = client.session().headers().unwrap();
    assert_eq!(headers["authorization"], auth_header().as_str());
}

#[tokio::test]
async fn test_login_without_token_field() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api2/auth-token/")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let mut client = SeafileClient::new(&server.url(), "me@example.com", "secret").unwrap();
    assert!(matches!(
        client.authenticate().await,
        Err(ApiError::AuthFailed(_))
    ));
}

#[tokio::test]
async fn test_operations_require_login() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = SeafileClient::new(&server.url(), "me@example.com", "secret").unwrap();

    assert!(matches!(client.list_repositories().await, Err(ApiError::NotAuthenticated)));
    assert!(matches!(client.get_repository(REPO_ID).await, Err(ApiError::NotAuthenticated)));
    assert!(matches!(
        client.create_repository("demo", None, None).await,
        Err(ApiError::NotAuthenticated)
    ));
    assert!(matches!(
        client.delete_repository(REPO_ID).await,
        Err(ApiError::NotAuthenticated)
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_repositories() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api2/repos/")
        .match_header("authorization", auth_header().as_str())
        .with_status(200)
        .with_body(json!([{ "id": REPO_ID, "name": "My Library" }]).to_string())
        .create_async()
        .await;

    let repos = logged_in(&server).list_repositories().await.unwrap();

    mock.assert_async().await;
    assert_eq!(repos, Some(json!([{ "id": REPO_ID, "name": "My Library" }])));
}

#[tokio::test]
async fn test_get_repository() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/api2/repos/{}/", REPO_ID).as_str())
        .with_status(200)
        .with_body(json!({ "id": REPO_ID, "name": "My Library" }).to_string())
        .create_async()
        .await;

    let repo = logged_in(&server).get_repository(REPO_ID).await.unwrap().unwrap();

    assert_eq!(repo.repo_id(), Some(REPO_ID));
    assert_eq!(
        repo.auth_mode(),
        &AuthMode::BySessionToken {
            repo_id: REPO_ID.to_string()
        }
    );
}

#[tokio::test]
async fn test_get_missing_repository() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api2/repos/nope/")
        .with_status(404)
        .with_body(r#"{"error_msg":"Library not found."}"#)
        .create_async()
        .await;

    let repo = logged_in(&server).get_repository("nope").await.unwrap();
    assert!(repo.is_none());
}

#[tokio::test]
async fn test_find_repository_by_name() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api2/repos/")
        .with_status(200)
        .with_body(
            json!([
                { "id": "11111111-1111-1111-1111-111111111111", "name": "Photos" },
                { "id": REPO_ID, "name": "Notes" }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = logged_in(&server);
    let repo = client.find_repository("Notes").await.unwrap().unwrap();
    assert_eq!(repo.repo_id(), Some(REPO_ID));

    assert!(client.find_repository("Music").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_repository_omits_optional_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api2/repos/")
        .match_header("authorization", auth_header().as_str())
        .match_body(Matcher::Json(json!({ "name": "demo" })))
        .with_status(200)
        .with_body(json!({ "repo_id": REPO_ID, "repo_name": "demo" }).to_string())
        .create_async()
        .await;

    let repo = logged_in(&server)
        .create_repository("demo", Some(""), None)
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(repo.repo_id(), Some(REPO_ID));
}

#[tokio::test]
async fn test_create_encrypted_repository() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api2/repos/")
        .match_body(Matcher::Json(
            json!({ "name": "vault", "passwd": "pw", "story_id": "42" }),
        ))
        .with_status(200)
        .with_body(json!({ "repo_id": REPO_ID }).to_string())
        .create_async()
        .await;

    let repo = logged_in(&server)
        .create_repository("vault", Some("pw"), Some("42"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(repo.is_some());
}

#[tokio::test]
async fn test_create_repository_refused() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api2/repos/")
        .with_status(403)
        .with_body(r#"{"error_msg":"Permission denied."}"#)
        .create_async()
        .await;

    let repo = logged_in(&server)
        .create_repository("demo", None, None)
        .await
        .unwrap();
    assert!(repo.is_none());
}

#[tokio::test]
async fn test_delete_repository() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", format!("/api2/repos/{}/", REPO_ID).as_str())
        .with_status(200)
        .with_body(r#""success""#)
        .create_async()
        .await;

    logged_in(&server).delete_repository(REPO_ID).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_repository_propagates_http_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", format!("/api2/repos/{}/", REPO_ID).as_str())
        .with_status(403)
        .with_body(r#"{"error_msg":"Permission denied."}"#)
        .create_async()
        .await;

    let err = logged_in(&server).delete_repository(REPO_ID).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_session_mode_directory_listing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/api2/repos/{}/dir/", REPO_ID).as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/docs".into()))
        .match_header("authorization", auth_header().as_str())
        .with_status(200)
        .with_body(
            json!([
                { "name": "a.txt", "type": "file", "size": 12 },
                { "name": "img", "type": "dir" }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let entries = session_repo(&server).list_dir("/docs").await.unwrap();

    mock.assert_async().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name(), Some("a.txt"));
    assert!(entries[1].is_dir());
}

#[tokio::test]
async fn test_repo_token_mode_directory_listing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2.1/via-repo-token/dir/")
        .match_query(Matcher::UrlEncoded("path".into(), "/".into()))
        .match_header("authorization", "Token repo-api-token")
        .with_status(200)
        .with_body(json!({ "dirent_list": [{ "name": "sub", "type": "dir" }] }).to_string())
        .create_async()
        .await;

    let repo = Repo::by_repo_token(&server.url(), "repo-api-token").unwrap();
    let entries = repo.list_dir("/").await.unwrap();

    mock.assert_async().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), Some("sub"));
}

#[tokio::test]
async fn test_directory_mutations() {
    let mut server = Server::new_async().await;
    let path = format!("/api2/repos/{}/dir/", REPO_ID);

    let mkdir = server
        .mock("POST", path.as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/sub".into()))
        .match_body(Matcher::Json(json!({ "operation": "mkdir" })))
        .with_status(201)
        .with_body(r#""success""#)
        .create_async()
        .await;
    let rename = server
        .mock("POST", path.as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/sub".into()))
        .match_body(Matcher::Json(json!({ "operation": "rename", "newname": "renamed" })))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", path.as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/renamed".into()))
        .with_status(200)
        .with_body(r#""success""#)
        .create_async()
        .await;

    let repo = session_repo(&server);
    assert_eq!(repo.create_dir("/sub").await.unwrap(), Some(json!("success")));
    assert_eq!(repo.rename_dir("/sub", "renamed").await.unwrap(), None);
    assert_eq!(repo.delete_dir("/renamed").await.unwrap(), Some(json!("success")));

    mkdir.assert_async().await;
    rename.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_file_operations_by_repo_token() {
    let mut server = Server::new_async().await;

    let create = server
        .mock("POST", "/api/v2.1/via-repo-token/file/")
        .match_query(Matcher::UrlEncoded("path".into(), "/a.md".into()))
        .match_body(Matcher::Json(json!({ "operation": "create" })))
        .with_status(200)
        .with_body(json!({ "obj_name": "a.md" }).to_string())
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/api/v2.1/via-repo-token/file/")
        .match_query(Matcher::UrlEncoded("path".into(), "/a.md".into()))
        .with_status(200)
        .with_body(json!({ "name": "a.md", "size": 0 }).to_string())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/v2.1/via-repo-token/file/")
        .match_query(Matcher::UrlEncoded("path".into(), "/a.md".into()))
        .with_status(200)
        .with_body(json!({ "success": true, "commit_id": "abc" }).to_string())
        .create_async()
        .await;

    let repo = Repo::by_repo_token(&server.url(), "repo-api-token").unwrap();
    assert_eq!(
        repo.create_file("/a.md").await.unwrap(),
        Some(json!({ "obj_name": "a.md" }))
    );
    assert_eq!(
        repo.get_file("/a.md").await.unwrap(),
        Some(json!({ "name": "a.md", "size": 0 }))
    );
    let deleted = repo.delete_file("/a.md").await.unwrap().unwrap();
    assert_eq!(deleted["success"], json!(true));

    create.assert_async().await;
    detail.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_file_detail_and_rename_by_session_token() {
    let mut server = Server::new_async().await;

    let detail = server
        .mock("GET", format!("/api2/repos/{}/file/detail/", REPO_ID).as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/a.md".into()))
        .with_status(200)
        .with_body(json!({ "name": "a.md" }).to_string())
        .create_async()
        .await;
    let rename = server
        .mock("POST", format!("/api2/repos/{}/file/", REPO_ID).as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/a.md".into()))
        .match_body(Matcher::Json(json!({ "operation": "rename", "newname": "b.md" })))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let repo = session_repo(&server);
    assert!(repo.get_file("/a.md").await.unwrap().is_some());
    assert_eq!(repo.rename_file("/a.md", "b.md").await.unwrap(), None);

    detail.assert_async().await;
    rename.assert_async().await;
}

#[tokio::test]
async fn test_repo_details_both_modes() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2.1/via-repo-token/repo-info/")
        .with_status(200)
        .with_body(
            json!({ "repo_id": REPO_ID, "repo_name": "Notes", "size": 10, "file_count": 2 })
                .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", format!("/api2/repos/{}/", REPO_ID).as_str())
        .with_status(200)
        .with_body(json!({ "id": REPO_ID, "name": "Notes", "size": 10, "mtime": 0 }).to_string())
        .create_async()
        .await;

    let by_token = Repo::by_repo_token(&server.url(), "repo-api-token")
        .unwrap()
        .get_details()
        .await
        .unwrap();
    assert_eq!(by_token.repo_name.as_deref(), Some("Notes"));
    assert_eq!(by_token.file_count, Some(2));

    let by_session = session_repo(&server).get_details().await.unwrap();
    assert_eq!(by_session.repo_id.as_deref(), Some(REPO_ID));
    assert_eq!(by_session.file_count, None);
    assert_eq!(
        by_session.last_modified.as_deref(),
        Some("1970-01-01T00:00:00+00:00")
    );
}

#[tokio::test]
async fn test_empty_details_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2.1/via-repo-token/repo-info/")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let repo = Repo::by_repo_token(&server.url(), "repo-api-token").unwrap();
    assert!(repo.get_details().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_is_not_swallowed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("/api2/repos/{}/dir/", REPO_ID).as_str())
        .match_query(Matcher::UrlEncoded("p".into(), "/missing".into()))
        .with_status(404)
        .with_body(r#"{"error_msg":"Folder /missing not found."}"#)
        .create_async()
        .await;

    let err = session_repo(&server).list_dir("/missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        r#"ClientHttpError[404: {"error_msg":"Folder /missing not found."}]"#
    );
}

#[tokio::test]
async fn test_repo_by_token_from_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2.1/via-repo-token/dir/")
        .match_query(Matcher::UrlEncoded("path".into(), "/".into()))
        .match_header("authorization", "Token repo-api-token")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = SeafileClient::new(&server.url(), "me@example.com", "secret").unwrap();
    let repo = client.repo_by_token("repo-api-token").unwrap();
    assert!(repo.list_dir("/").await.unwrap().is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_repository_id_is_one_path_segment() {
    let mut server = Server::new_async().await;
    let truncated = server
        .mock("GET", Matcher::Regex(r"^/api2/repos/a/?(\?.*)?$".to_string()))
        .expect(0)
        .create_async()
        .await;
    let encoded = server
        .mock("GET", "/api2/repos/a%3Fb/")
        .with_status(404)
        .with_body(r#"{"error_msg":"Library not found."}"#)
        .create_async()
        .await;
    let nested = server
        .mock("DELETE", "/api2/repos/a%2Fb/")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let client = logged_in(&server);
    assert!(client.get_repository("a?b").await.unwrap().is_none());
    client.delete_repository("a/b").await.unwrap();

    encoded.assert_async().await;
    nested.assert_async().await;
    truncated.assert_async().await;
}

#[tokio::test]
async fn test_dot_segment_repository_ids_are_rejected() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = logged_in(&server);
    assert!(matches!(
        client.get_repository("..").await,
        Err(ApiError::InvalidRepoId(_))
    ));
    assert!(matches!(
        client.delete_repository(".").await,
        Err(ApiError::InvalidRepoId(_))
    ));
    assert!(matches!(
        client.delete_repository("").await,
        Err(ApiError::MissingRepoId)
    ));

    get.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let repo = Repo::by_repo_token("http://127.0.0.1:1", "repo-api-token").unwrap();
    let err = repo.list_dir("/").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
    assert_eq!(err.status(), None);

    let mut client = SeafileClient::new("http://127.0.0.1:1", "me@example.com", "secret").unwrap();
    assert!(matches!(
        client.authenticate().await,
        Err(ApiError::Network(_))
    ));
    assert!(!client.is_authenticated());
}
