use serde::Serialize;

/// OIDC identity provider settings.
#[derive(Clone, Serialize)]
pub struct OidcConfig {
    /// Whether the identity provider is mounted.
    pub enabled: bool,
    /// Issuer URL embedded in issued tokens.
    pub issuer: String,
    /// Registered client id.
    pub client_id: String,
    /// Registered client secret. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// Redirect URI registered for the client.
    pub redirect_uri: String,
    /// TCP port the provider listens on.
    pub port: u16,
    /// Client authentication method at the token endpoint.
    pub auth_method: String,
    /// Default scope granted to authorization requests.
    pub scope: String,
    /// Verify peer certificates on outbound calls.
    pub verify_ssl: bool,
    /// Endpoint paths, relative to the issuer.
    pub endpoints: OidcEndpoints,
    /// Key material locations and rotation policy.
    pub keys: OidcKeys,
    /// Token lifetimes and algorithms.
    pub tokens: OidcTokens,
}

impl std::fmt::Debug for OidcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcConfig")
            .field("enabled", &self.enabled)
            .field("issuer", &self.issuer)
            .field("client_id", &self.client_id)
            .field("has_client_secret", &!self.client_secret.is_empty())
            .field("redirect_uri", &self.redirect_uri)
            .field("port", &self.port)
            .field("auth_method", &self.auth_method)
            .field("scope", &self.scope)
            .field("verify_ssl", &self.verify_ssl)
            .field("endpoints", &self.endpoints)
            .field("keys", &self.keys)
            .field("tokens", &self.tokens)
            .finish()
    }
}

impl Default for OidcConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            issuer: "https://hydrogen.example.com".to_owned(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            port: 8443,
            auth_method: "client_secret_basic".to_owned(),
            scope: "openid profile email".to_owned(),
            verify_ssl: true,
            endpoints: OidcEndpoints::default(),
            keys: OidcKeys::default(),
            tokens: OidcTokens::default(),
        }
    }
}

/// Endpoint paths of the identity provider, relative to the issuer.
#[derive(Debug, Clone, Serialize)]
pub struct OidcEndpoints {
    /// Authorization endpoint.
    pub authorization: String,
    /// Token endpoint.
    pub token: String,
    /// UserInfo endpoint.
    pub userinfo: String,
    /// JWKS document endpoint.
    pub jwks: String,
    /// RP-initiated logout endpoint.
    pub end_session: String,
    /// Token introspection endpoint.
    pub introspection: String,
    /// Token revocation endpoint.
    pub revocation: String,
    /// Dynamic client registration endpoint.
    pub registration: String,
}

impl Default for OidcEndpoints {
    fn default() -> Self {
        Self {
            authorization: "/oauth/authorize".to_owned(),
            token: "/oauth/token".to_owned(),
            userinfo: "/oauth/userinfo".to_owned(),
            jwks: "/oauth/jwks".to_owned(),
            end_session: "/oauth/end_session".to_owned(),
            introspection: "/oauth/introspect".to_owned(),
            revocation: "/oauth/revoke".to_owned(),
            registration: "/oauth/register".to_owned(),
        }
    }
}

/// Key material locations and rotation policy.
#[derive(Clone, Serialize)]
pub struct OidcKeys {
    /// PEM-encoded signing key. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub signing_key: String,
    /// PEM-encoded encryption key. Sensitive; never logged in full.
    #[serde(skip_serializing)]
    pub encryption_key: String,
    /// External JWKS document to trust instead of local keys.
    pub jwks_uri: String,
    /// Directory persisted key material lives in.
    pub storage_path: String,
    /// Encrypt persisted key material at rest.
    pub encryption_enabled: bool,
    /// Days between automatic key rotations.
    pub rotation_interval_days: u64,
}

impl std::fmt::Debug for OidcKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcKeys")
            .field("has_signing_key", &!self.signing_key.is_empty())
            .field("has_encryption_key", &!self.encryption_key.is_empty())
            .field("jwks_uri", &self.jwks_uri)
            .field("storage_path", &self.storage_path)
            .field("encryption_enabled", &self.encryption_enabled)
            .field("rotation_interval_days", &self.rotation_interval_days)
            .finish()
    }
}

impl Default for OidcKeys {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            encryption_key: String::new(),
            jwks_uri: String::new(),
            storage_path: "/var/lib/hydrogen/oidc/keys".to_owned(),
            encryption_enabled: true,
            rotation_interval_days: 30,
        }
    }
}

/// Token lifetimes and algorithms.
#[derive(Debug, Clone, Serialize)]
pub struct OidcTokens {
    /// Access token lifetime, in seconds.
    pub access_token_lifetime_secs: u64,
    /// Refresh token lifetime, in seconds.
    pub refresh_token_lifetime_secs: u64,
    /// ID token lifetime, in seconds.
    pub id_token_lifetime_secs: u64,
    /// JWS algorithm for issued tokens.
    pub signing_alg: String,
    /// JWE algorithm for encrypted tokens.
    pub encryption_alg: String,
}

impl Default for OidcTokens {
    fn default() -> Self {
        Self {
            access_token_lifetime_secs: 3600,
            refresh_token_lifetime_secs: 2_592_000,
            id_token_lifetime_secs: 3600,
            signing_alg: "RS256".to_owned(),
            encryption_alg: "A256GCM".to_owned(),
        }
    }
}
