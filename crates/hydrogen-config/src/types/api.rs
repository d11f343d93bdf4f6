use serde::Serialize;

/// REST API settings.
#[derive(Clone, Serialize)]
pub struct ApiConfig {
    /// Whether the API endpoints are mounted.
    pub enabled: bool,
    /// URL prefix all endpoints live under.
    pub prefix: String,
    /// HMAC secret for issued JWTs. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Value served in `Access-Control-Allow-Origin` for API routes.
    pub cors_origin: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("enabled", &self.enabled)
            .field("prefix", &self.prefix)
            .field("has_jwt_secret", &!self.jwt_secret.is_empty())
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "/api".to_owned(),
            jwt_secret: "hydrogen-api-secret".to_owned(),
            cors_origin: "*".to_owned(),
        }
    }
}
