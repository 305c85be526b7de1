use std::env;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub mail_api_url: String,
    pub mail_api_key: SecretString,
    pub mail_from: String,
    pub report_subject: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "survey-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt_secret: SecretString::from(env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string())),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "http://localhost:8025/api/send".to_string()),
            mail_api_key: SecretString::from(env::var("MAIL_API_KEY")
                .unwrap_or_else(|_| "mail_api_key".to_string())),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "reports@surveypro.local".to_string()),
            report_subject: env::var("REPORT_SUBJECT")
                .unwrap_or_else(|_| "Your SurveyPro Report".to_string()),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();
        let mail_key = self.mail_api_key.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if mail_key == "mail_api_key" {
            panic!(
                "FATAL: MAIL_API_KEY is using default value! Set MAIL_API_KEY environment variable."
            );
        }
    }

    /// Fixed settings for unit and integration tests.
    #[doc(hidden)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "survey-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            mail_api_url: "http://127.0.0.1:9/send".to_string(),
            mail_api_key: SecretString::from("test_mail_key".to_string()),
            mail_from: "reports@example.com".to_string(),
            report_subject: "Test Report".to_string(),
        }
    }
}
