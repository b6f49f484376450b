use axum::http::{self, Request, StatusCode};
use base64::{engine::general_purpose, Engine as _};
use http_body_util::BodyExt;
use mock_server::{app, auth_header_value, Host, HostGroup};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth_header_value())
        .body(String::new())
        .unwrap()
}

fn delete_request(uri: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth_header_value())
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth_header_value())
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn request_without_auth_returns_401() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/api/hosts").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_with_wrong_credentials_returns_401() {
    let app = app();
    let wrong = format!("Basic {}", general_purpose::STANDARD.encode("admin:wrong"));
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/hosts")
                .header(http::header::AUTHORIZATION, wrong)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- status ---

#[tokio::test]
async fn status_reports_ok() {
    let app = app();
    let resp = app.oneshot(get_request("/api/status")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let status: serde_json::Value = body_json(resp).await;
    assert_eq!(status["status"], "ok");
}

// --- hosts ---

#[tokio::test]
async fn list_hosts_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/api/hosts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let hosts: Vec<Host> = body_json(resp).await;
    assert!(hosts.is_empty());
}

#[tokio::test]
async fn create_host_returns_201() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/api/hosts", r#"{"name":"web01"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let host: Host = body_json(resp).await;
    assert_eq!(host.name, "web01");
    assert!(host.comment.is_none());
    assert!(host.host_group_id.is_none());
    assert!(!host.managed);
}

#[tokio::test]
async fn create_host_malformed_json_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/api/hosts", r#"{"managed":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_host_not_found() {
    let app = app();
    let resp = app.oneshot(get_request("/api/hosts/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_host_bad_id_returns_400() {
    let app = app();
    let resp = app.oneshot(get_request("/api/hosts/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_host_not_found() {
    let app = app();
    let resp = app
        .oneshot(json_request("PUT", "/api/hosts/999", r#"{"name":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_host_not_found() {
    let app = app();
    let resp = app.oneshot(delete_request("/api/hosts/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- group scoping ---

#[tokio::test]
async fn scoped_list_unknown_group_returns_404() {
    let app = app();
    let resp = app
        .oneshot(get_request("/api/host_groups/999/hosts"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_in_unknown_group_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/host_groups/999/hosts",
            r#"{"name":"orphan"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn nested_create_prefers_path_group() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/host_groups", r#"{"name":"racks"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group: HostGroup = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("/api/host_groups/{}/hosts", group.id),
            r#"{"name":"web01","host_group_id":999}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let host: Host = body_json(resp).await;
    assert_eq!(host.host_group_id, Some(group.id));
}

// --- full inventory lifecycle ---

#[tokio::test]
async fn inventory_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create a group
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/host_groups",
            r#"{"name":"edge","description":"edge racks"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group: HostGroup = body_json(resp).await;
    assert_eq!(group.name, "edge");
    let gid = group.id;

    // create a host inside the group
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("/api/host_groups/{gid}/hosts"),
            r#"{"name":"web01","managed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let web: Host = body_json(resp).await;
    assert_eq!(web.host_group_id, Some(gid));
    assert!(web.managed);

    // create an ungrouped host
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/hosts", r#"{"name":"db01"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // scoped list — only the group member
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/host_groups/{gid}/hosts")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let scoped: Vec<Host> = body_json(resp).await;
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].id, web.id);

    // flat list — both hosts
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/hosts"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let all: Vec<Host> = body_json(resp).await;
    assert_eq!(all.len(), 2);

    // update — set a comment
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/hosts/{}", web.id),
            r#"{"comment":"primary"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Host = body_json(resp).await;
    assert_eq!(updated.comment.as_deref(), Some("primary"));

    // update — an absent comment field leaves the comment alone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/hosts/{}", web.id),
            r#"{"name":"web01a"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Host = body_json(resp).await;
    assert_eq!(updated.name, "web01a");
    assert_eq!(updated.comment.as_deref(), Some("primary")); // unchanged

    // update — an explicit null clears the comment
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/hosts/{}", web.id),
            r#"{"comment":null}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Host = body_json(resp).await;
    assert!(updated.comment.is_none());

    // delete the group — members become ungrouped
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete_request(&format!("/api/host_groups/{gid}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/hosts/{}", web.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let detached: Host = body_json(resp).await;
    assert!(detached.host_group_id.is_none());

    // delete the host
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete_request(&format!("/api/hosts/{}", web.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/hosts/{}", web.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
