//! Guest sessions: table-token login, atomic reservation, discriminator
//! separation from account tokens.

mod common;

use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn guest_login_validates_table_and_token() {
    let app = common::spawn().await;
    let (staff, _) = app.login_admin().await;
    let (number, table_token) = app.create_table(&staff, 1).await;

    // Unknown table
    let (status, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": "Ana", "tableNumber": 999, "tableToken": table_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["tableNumber"][0], "table_not_found");

    // Name too short
    let (status, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": " a ", "tableNumber": number, "tableToken": table_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["name"][0], "name_too_short");

    // Wrong table token
    let (status, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": "Ana", "tableNumber": number, "tableToken": "nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["tableToken"][0], "invalid_table_token");

    // Nothing above reserved the table
    let (_, body) = app
        .get_auth(&format!("/api/tables/{number}"), &staff)
        .await;
    assert_eq!(body["data"]["status"], "AVAILABLE");
}

#[tokio::test]
async fn guest_login_reserves_table_once() {
    let app = common::spawn().await;
    let (staff, _) = app.login_admin().await;
    let (number, table_token) = app.create_table(&staff, 5).await;

    let (status, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": "Ana", "tableNumber": number, "tableToken": table_token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "guest_login_success");
    assert!(body["data"]["accessToken"].is_string());
    assert!(body["data"]["refreshToken"].is_string());
    assert_eq!(body["data"]["guest"]["name"], "Ana");
    assert_eq!(body["data"]["guest"]["tableNumber"], number);

    let (_, table) = app
        .get_auth(&format!("/api/tables/{number}"), &staff)
        .await;
    assert_eq!(table["data"]["status"], "RESERVED");

    // Second guest with the correct token is turned away
    let (status, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": "Ben", "tableNumber": number, "tableToken": table_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["tableNumber"][0], "table_not_available");
}

#[tokio::test]
async fn guest_and_account_tokens_do_not_cross() {
    let app = common::spawn().await;
    let (staff, staff_refresh) = app.login_admin().await;
    let (number, table_token) = app.create_table(&staff, 2).await;

    let (_, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": "Ana", "tableNumber": number, "tableToken": table_token }),
        )
        .await;
    let guest_access = body["data"]["accessToken"].as_str().unwrap().to_string();
    let guest_refresh = body["data"]["refreshToken"].as_str().unwrap().to_string();

    // Guest access token is rejected on account endpoints
    let (status, _) = app.get_auth("/api/me", &guest_access).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Guest access token is rejected on staff endpoints
    let (status, _) = app.get_auth("/api/tables", &guest_access).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Account refresh token is rejected on the guest refresh endpoint
    let (status, body) = app
        .post(
            "/api/guests/refresh-token",
            json!({ "refreshToken": staff_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "token_invalid");

    // Account refresh token is rejected on the guest logout endpoint
    let (status, body) = app
        .post(
            "/api/guests/logout",
            json!({ "refreshToken": staff_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid_guest_token");

    // Guest refresh token is rejected on the account refresh endpoint
    let (status, _) = app
        .post(
            "/api/auth/refresh-token",
            json!({ "refreshToken": guest_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn guest_refresh_and_logout() {
    let app = common::spawn().await;
    let (staff, _) = app.login_admin().await;
    let (number, table_token) = app.create_table(&staff, 3).await;

    let (_, body) = app
        .post(
            "/api/guests/login",
            json!({ "name": "Ana", "tableNumber": number, "tableToken": table_token }),
        )
        .await;
    let guest_access = body["data"]["accessToken"].as_str().unwrap().to_string();
    let guest_refresh = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/guests/refresh-token",
            json!({ "refreshToken": guest_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "guest_token_refresh_success");
    let refreshed_access = body["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/guests/logout",
            json!({ "refreshToken": guest_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "guest_logout_success");

    // Every guest token is dead, including the one minted via refresh
    for token in [&guest_access, &refreshed_access] {
        let (status, _) = app
            .request(Method::GET, "/api/me", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (status, _) = app
        .post(
            "/api/guests/refresh-token",
            json!({ "refreshToken": guest_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn staff_creates_guest_without_tokens() {
    let app = common::spawn().await;
    let (staff, _) = app.login_admin().await;
    let (number, _) = app.create_table(&staff, 7).await;

    // Unauthenticated staff-guest creation is rejected
    let (status, _) = app
        .post(
            "/api/accounts/guests",
            json!({ "name": "Walk In", "tableNumber": number }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // No table token needed when staff vouch for the guest
    let (status, body) = app
        .post_auth(
            "/api/accounts/guests",
            &staff,
            json!({ "name": "Walk In", "tableNumber": number }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "guest_create_account_success");
    assert_eq!(body["data"]["guest"]["name"], "Walk In");
    assert!(body["data"].get("accessToken").is_none());

    let (_, table) = app
        .get_auth(&format!("/api/tables/{number}"), &staff)
        .await;
    assert_eq!(table["data"]["status"], "RESERVED");
}
