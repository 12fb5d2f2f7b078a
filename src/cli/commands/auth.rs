use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::cli::config::{load_session, save_session, SessionFile};
use crate::cli::utils::{output_notice, output_success};
use crate::cli::OutputFormat;
use crate::dashboard::Session;

#[derive(Debug, Deserialize)]
struct LoginReply {
    token: Option<String>,
    error: Option<String>,
}

pub async fn login(
    server: &str,
    email: &str,
    password: &str,
    force: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut file = load_session()?;
    if file.session.is_present() && !force {
        return output_success(&output_format, "Already logged in", Some(json!({ "server": file.server })));
    }

    let url = Url::parse(server)?.join("/api/login")?;
    let response = reqwest::Client::new()
        .post(url)
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;
    let ok = response.status().is_success();
    let reply: LoginReply = response.json().await?;

    match (ok, reply.token) {
        (true, Some(token)) => {
            file = SessionFile::new(server, Session::with_token(token));
            save_session(&file)?;
            output_success(&output_format, "Logged in", Some(json!({ "server": server })))
        }
        _ => {
            let message = reply.error.unwrap_or_else(|| "Login failed".to_string());
            anyhow::bail!("{}", message)
        }
    }
}

pub fn logout(output_format: OutputFormat) -> anyhow::Result<()> {
    let mut file = load_session()?;
    file.session.clear();
    save_session(&file)?;
    output_success(&output_format, "Logged out", None)
}

pub fn status(output_format: OutputFormat) -> anyhow::Result<()> {
    let file = load_session()?;
    if file.session.is_present() {
        output_success(
            &output_format,
            "Session present",
            Some(json!({ "server": file.server, "saved_at": file.saved_at })),
        )
    } else {
        output_notice(&output_format, "Not logged in")
    }
}
