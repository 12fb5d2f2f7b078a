mod common;

use anyhow::Result;
use lead_dashboard::dashboard::{DashboardClient, HttpLeadSource, Navigation, Session};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_returns_token_and_sets_cookie() -> Result<()> {
    let server = common::spawn_server(common::generated_leads(3)).await?;
    let client = common::no_redirect_client();

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.starts_with("token="), "unexpected cookie: {}", set_cookie);
    assert!(set_cookie.contains("HttpOnly"));

    let body = res.json::<serde_json::Value>().await?;
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty(), "missing token: {}", body);

    // The stored session is enough for the dashboard.
    let res = client
        .get(server.url("/dashboard"))
        .header(COOKIE, format!("token={}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let mut view = DashboardClient::new(HttpLeadSource::new(&server.base_url)?, Session::with_token(token));
    assert_eq!(view.mount().await, Navigation::Stay);
    assert_eq!(view.leads().len(), 3);
    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(SET_COOKIE).is_none());
    assert_eq!(res.json::<serde_json::Value>().await?, json!({ "error": "Invalid credentials" }));

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "email": common::ADMIN_EMAIL }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!({ "error": "Email and password are required" })
    );
    Ok(())
}

#[tokio::test]
async fn form_login_then_logout_round_trip() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let client = common::no_redirect_client();

    let res = client
        .post(server.url("/login"))
        .form(&[("email", common::ADMIN_EMAIL), ("password", common::ADMIN_PASSWORD)])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/dashboard");
    assert!(res.headers().get(SET_COOKIE).is_some());

    let res = client
        .post(server.url("/login"))
        .form(&[("email", common::ADMIN_EMAIL), ("password", "wrong")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.text().await?.contains("Invalid credentials"));

    let res = client.get(server.url("/logout")).header(COOKIE, "token=x").send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[LOCATION], "/login");
    let cleared = res
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cleared.starts_with("token="), "unexpected cookie: {}", cleared);
    assert!(cleared.contains("Max-Age=0"), "cookie not expired: {}", cleared);
    Ok(())
}

#[tokio::test]
async fn login_page_skips_ahead_with_a_session() -> Result<()> {
    let server = common::spawn_server(vec![]).await?;
    let client = common::no_redirect_client();

    let res = client.get(server.url("/login")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("action=\"/login\""));

    let res = client.get(server.url("/login")).header(COOKIE, "token=x").send().await?;
    assert!(res.status().is_redirection());
    assert_eq!(res.headers()[LOCATION], "/dashboard");
    Ok(())
}

#[tokio::test]
async fn login_page_drops_a_cookie_the_guard_rejects() -> Result<()> {
    let mut config = lead_dashboard::config::AppConfig::development();
    config.security.verify_session_token = true;
    let server = common::spawn_server_with(config, vec![]).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(server.url("/login"))
        .header(COOKIE, "token=expired-or-forged")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = res
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cleared.contains("Max-Age=0"), "cookie not expired: {}", cleared);
    assert!(res.text().await?.contains("action=\"/login\""));

    // A following client lands on the form instead of looping.
    let res = reqwest::Client::new()
        .get(server.url("/dashboard"))
        .header(COOKIE, "token=expired-or-forged")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.url().path().ends_with("/login"));

    // A verified token still skips the form.
    let login = client
        .post(server.url("/api/login"))
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let token = login["token"].as_str().unwrap_or_default().to_string();
    let res = client
        .get(server.url("/login"))
        .header(COOKIE, format!("token={}", token))
        .send()
        .await?;
    assert!(res.status().is_redirection());
    assert_eq!(res.headers()[LOCATION], "/dashboard");
    Ok(())
}
