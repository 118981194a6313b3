use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: String,
    pub model_inference_url: Option<String>,
    pub appointments_path: String,
    pub allowed_origins: Vec<String>,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| {
                    warn!("MODEL_PATH not set, using waiting_time_model.json");
                    "waiting_time_model.json".to_string()
                }),
            model_inference_url: env::var("MODEL_INFERENCE_URL").ok(),
            appointments_path: env::var("APPOINTMENTS_PATH")
                .unwrap_or_else(|_| {
                    warn!("APPOINTMENTS_PATH not set, using appointments.csv");
                    "appointments.csv".to_string()
                }),
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| {
                    vec![
                        "http://localhost:3000".to_string(),
                        "http://127.0.0.1:3000".to_string(),
                    ]
                }),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }

    /// True when predictions are served by a remote inference endpoint
    /// instead of a local model artifact.
    pub fn uses_remote_model(&self) -> bool {
        self.model_inference_url.is_some()
    }
}
