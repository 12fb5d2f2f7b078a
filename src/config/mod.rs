use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; `None` until DATABASE_URL is provided.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub leads_table: String,
    /// Serve leads from process memory instead of PostgreSQL (local runs only).
    pub use_memory_store: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub admin_email: String,
    #[serde(skip_serializing)]
    pub admin_password: String,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub session_cookie: String,
    pub secure_cookie: bool,
    /// Off keeps the presence-only guard; on requires a verifiable token.
    pub verify_session_token: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub export_file_name: String,
    pub export_sheet_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_LEADS_TABLE") {
            self.database.leads_table = v;
        }
        if let Ok(v) = env::var("LEADS_STORE") {
            self.database.use_memory_store = v.eq_ignore_ascii_case("memory");
        }

        // Server overrides
        if let Ok(v) = env::var("LEADS_BIND_ADDRESS") {
            self.server.bind_address = v;
        }
        let port = env::var("LEADS_API_PORT").ok().or_else(|| env::var("PORT").ok());
        if let Some(v) = port {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Security overrides
        if let Ok(v) = env::var("DASHBOARD_ADMIN_EMAIL") {
            self.security.admin_email = v;
        }
        if let Ok(v) = env::var("DASHBOARD_ADMIN_PASSWORD") {
            self.security.admin_password = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIE") {
            self.security.secure_cookie = v.parse().unwrap_or(self.security.secure_cookie);
        }
        if let Ok(v) = env::var("SECURITY_VERIFY_SESSION_TOKEN") {
            self.security.verify_session_token = v.parse().unwrap_or(self.security.verify_session_token);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Dashboard overrides
        if let Ok(v) = env::var("DASHBOARD_EXPORT_FILE_NAME") {
            self.dashboard.export_file_name = v;
        }
        if let Ok(v) = env::var("DASHBOARD_EXPORT_SHEET_NAME") {
            self.dashboard.export_sheet_name = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
                leads_table: "leads".to_string(),
                use_memory_store: false,
            },
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            security: SecurityConfig {
                admin_email: "admin@example.com".to_string(),
                admin_password: "admin".to_string(),
                jwt_secret: "development-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                session_cookie: "token".to_string(),
                secure_cookie: false,
                verify_session_token: false,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            dashboard: DashboardConfig::default(),
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.database.max_connections = 10;
        config.database.connection_timeout = 10;
        config.security.admin_password = String::new();
        config.security.jwt_secret = String::new();
        config.security.jwt_expiry_hours = 24;
        config.security.secure_cookie = true;
        config.security.cors_origins = vec!["https://staging.example.com".to_string()];
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.database.max_connections = 20;
        config.database.connection_timeout = 5;
        config.security.admin_password = String::new();
        config.security.jwt_secret = String::new();
        config.security.jwt_expiry_hours = 12;
        config.security.secure_cookie = true;
        config.security.cors_origins = vec!["https://app.example.com".to_string()];
        config
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            export_file_name: "Leads.xlsx".to_string(),
            export_sheet_name: "Leads Data".to_string(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
