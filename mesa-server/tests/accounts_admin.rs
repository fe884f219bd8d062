//! Employee management: admin guard, forced role, pagination, deactivation.

mod common;

use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn employee_endpoints_require_admin() {
    let app = common::spawn().await;
    let (employee, _) = app.login_account("emp@mesa.test", "EMPLOYEE").await;

    let (status, body) = app.get_auth("/api/accounts", &employee).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "admin_required");

    let (status, _) = app
        .post_auth(
            "/api/accounts",
            &employee,
            json!({ "email": "x@mesa.test", "name": "X", "password": "s3cret-pw!" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_creates_employees_with_forced_role() {
    let app = common::spawn().await;
    let (admin, _) = app.login_admin().await;

    // Even an explicit ADMIN request comes out as EMPLOYEE
    let (status, body) = app
        .post_auth(
            "/api/accounts",
            &admin,
            json!({
                "email": "new@mesa.test",
                "name": "New Hire",
                "password": "s3cret-pw!",
                "role": "ADMIN",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "create_employee_success");
    assert_eq!(body["data"]["role"], "EMPLOYEE");
    assert_eq!(body["data"]["owner_id"], 1);
}

#[tokio::test]
async fn list_is_paginated_and_employee_only() {
    let app = common::spawn().await;
    let (admin, _) = app.login_admin().await;

    for i in 0..3 {
        let (status, _) = app
            .post_auth(
                "/api/accounts",
                &admin,
                json!({
                    "email": format!("emp{i}@mesa.test"),
                    "name": format!("Employee {i}"),
                    "password": "s3cret-pw!",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get_auth("/api/accounts?limit=2&offset=0", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"], 3);
    assert_eq!(body["data"]["pagination"]["limit"], 2);

    let (_, body) = app.get_auth("/api/accounts?limit=2&offset=2", &admin).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    // The admin account itself never shows up
    let (_, body) = app.get_auth("/api/accounts?limit=100", &admin).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert!(items.iter().all(|a| a["role"] == "EMPLOYEE"));

    // Nor is it reachable by id through the employee detail route
    let (status, body) = app.get_auth("/api/accounts/detail/1", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "employee_not_found");
}

#[tokio::test]
async fn update_employee_and_deactivate() {
    let app = common::spawn().await;
    let (admin, _) = app.login_admin().await;

    let (_, created) = app
        .post_auth(
            "/api/accounts",
            &admin,
            json!({ "email": "emp@mesa.test", "name": "Emp", "password": "s3cret-pw!" }),
        )
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Email in the body is dropped, not applied
    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/accounts/detail/{id}"),
            Some(&admin),
            Some(json!({ "email": "other@mesa.test", "name": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["email"], "emp@mesa.test");

    // Deactivation locks the account out of login
    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/accounts/detail/{id}"),
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "emp@mesa.test", "password": "s3cret-pw!" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "account_disabled");
}

#[tokio::test]
async fn deactivated_account_cannot_refresh() {
    let app = common::spawn().await;
    let (admin, _) = app.login_admin().await;
    let (_, refresh) = app.login_account("emp@mesa.test", "EMPLOYEE").await;

    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/accounts/detail/2",
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Refresh fails like any other invalid token, not with a 403
    let (status, body) = app
        .post("/api/auth/refresh-token", json!({ "refreshToken": refresh }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "token_invalid");
}

#[tokio::test]
async fn delete_employee() {
    let app = common::spawn().await;
    let (admin, _) = app.login_admin().await;

    let (_, created) = app
        .post_auth(
            "/api/accounts",
            &admin,
            json!({ "email": "emp@mesa.test", "name": "Emp", "password": "s3cret-pw!" }),
        )
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/accounts/detail/{id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "delete_employee_success");

    let (status, _) = app
        .get_auth(&format!("/api/accounts/detail/{id}"), &admin)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
