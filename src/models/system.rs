use serde::{Deserialize, Serialize};

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub environment: String,
    pub status: String,
}

/// Body of `GET /api/v1/system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// Body of `GET /api/v1/system/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
