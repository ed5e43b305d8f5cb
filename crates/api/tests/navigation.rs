//! `GET /api/v1/navigation`: role links and tabs straight from the token.

mod common;

use agency_core::roles::Role;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, token_for};

#[tokio::test]
async fn moderator_gets_register_link_and_two_tabs() {
    let token = token_for(2, Role::Moderator);
    let response = get_auth(common::offline_app(), "/api/v1/navigation", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    let paths: Vec<&str> = data["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/clients/new"));
    assert_eq!(data["tabs"].as_array().unwrap().len(), 2);
    assert_eq!(data["tabs"][0]["value"], "my-clients");
    assert_eq!(data["default_tab"], "my-clients");
}

#[tokio::test]
async fn pr_gets_five_tabs() {
    let token = token_for(4, Role::Pr);
    let json = body_json(get_auth(common::offline_app(), "/api/v1/navigation", &token).await).await;
    let tabs: Vec<&str> = json["data"]["tabs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["value"].as_str().unwrap())
        .collect();
    assert_eq!(
        tabs,
        ["my-clients", "approved", "bad-clients", "today-calls", "not-started"]
    );
}

#[tokio::test]
async fn admin_has_no_links_and_the_single_default_tab() {
    let token = token_for(1, Role::Admin);
    let json = body_json(get_auth(common::offline_app(), "/api/v1/navigation", &token).await).await;
    assert_eq!(json["data"]["links"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["default_tab"], "my-tasks");
}

#[tokio::test]
async fn missing_token_is_401() {
    let response = get(common::offline_app(), "/api/v1/navigation").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let response = get_auth(common::offline_app(), "/api/v1/navigation", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
