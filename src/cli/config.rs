use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dashboard::Session;

const SESSION_FILE: &str = "session.json";

/// What the CLI keeps between invocations: the one session object plus the
/// server it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFile {
    pub server: Option<String>,
    pub session: Session,
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionFile {
    pub fn new(server: impl Into<String>, session: Session) -> Self {
        Self {
            server: Some(server.into()),
            session,
            saved_at: Some(Utc::now()),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("LEADS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("lead-dashboard").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<SessionFile> {
    load_session_from(&get_config_dir()?)
}

pub fn save_session(file: &SessionFile) -> anyhow::Result<()> {
    save_session_to(&get_config_dir()?, file)
}

pub fn load_session_from(dir: &Path) -> anyhow::Result<SessionFile> {
    let session_file = dir.join(SESSION_FILE);

    if !session_file.exists() {
        return Ok(SessionFile::default());
    }

    let content = fs::read_to_string(session_file)?;
    let file: SessionFile = serde_json::from_str(&content)?;
    Ok(file)
}

pub fn save_session_to(dir: &Path, file: &SessionFile) -> anyhow::Result<()> {
    let session_file = dir.join(SESSION_FILE);

    let content = serde_json::to_string_pretty(file)?;
    fs::write(session_file, content)?;
    Ok(())
}
