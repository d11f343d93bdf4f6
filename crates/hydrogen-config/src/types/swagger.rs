use serde::Serialize;

/// Swagger/OpenAPI UI settings.
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerConfig {
    /// Whether the documentation UI is mounted.
    pub enabled: bool,
    /// URL prefix the UI lives under.
    pub prefix: String,
    /// Document root holding the UI assets.
    pub web_root: String,
    /// Value served in `Access-Control-Allow-Origin` for UI routes.
    pub cors_origin: String,
    /// Entry page served at the prefix.
    pub index_page: String,
    /// API metadata shown in the UI header.
    pub metadata: SwaggerMetadata,
    /// UI behaviour knobs.
    pub ui_options: SwaggerUiOptions,
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "/apidocs".to_owned(),
            web_root: "/var/www/hydrogen/swagger".to_owned(),
            cors_origin: "*".to_owned(),
            index_page: "index.html".to_owned(),
            metadata: SwaggerMetadata::default(),
            ui_options: SwaggerUiOptions::default(),
        }
    }
}

/// API metadata block of the generated OpenAPI document.
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerMetadata {
    /// Document title.
    pub title: String,
    /// Document description.
    pub description: String,
    /// Advertised API version.
    pub version: String,
    /// Contact block.
    pub contact: ContactInfo,
    /// License block.
    pub license: LicenseInfo,
}

impl Default for SwaggerMetadata {
    fn default() -> Self {
        Self {
            title: "Hydrogen API".to_owned(),
            description: "Hydrogen application server REST API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            contact: ContactInfo::default(),
            license: LicenseInfo::default(),
        }
    }
}

/// Contact information advertised in the OpenAPI document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactInfo {
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact URL.
    pub url: String,
}

/// License information advertised in the OpenAPI document.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseInfo {
    /// License name.
    pub name: String,
    /// License URL.
    pub url: String,
}

impl Default for LicenseInfo {
    fn default() -> Self {
        Self {
            name: "MIT".to_owned(),
            url: "https://opensource.org/licenses/MIT".to_owned(),
        }
    }
}

/// Swagger UI behaviour knobs.
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerUiOptions {
    /// Enable the "Try it out" button.
    pub try_it_enabled: bool,
    /// Expand every operation on load.
    pub always_expanded: bool,
    /// Show operation ids next to summaries.
    pub display_operation_id: bool,
    /// Expansion depth for the models section.
    pub default_models_expand_depth: i64,
    /// Expansion depth for a single model.
    pub default_model_expand_depth: i64,
    /// Show vendor extensions.
    pub show_extensions: bool,
    /// Show common vendor extensions.
    pub show_common_extensions: bool,
    /// Initial doc expansion mode (`list`, `full`, or `none`).
    pub doc_expansion: String,
    /// Syntax highlighting theme for example payloads.
    pub syntax_highlight_theme: String,
}

impl Default for SwaggerUiOptions {
    fn default() -> Self {
        Self {
            try_it_enabled: true,
            always_expanded: false,
            display_operation_id: false,
            default_models_expand_depth: 1,
            default_model_expand_depth: 1,
            show_extensions: false,
            show_common_extensions: true,
            doc_expansion: "list".to_owned(),
            syntax_highlight_theme: "agate".to_owned(),
        }
    }
}
