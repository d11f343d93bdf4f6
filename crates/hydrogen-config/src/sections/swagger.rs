//! Swagger section loader: UI mount point, API metadata, UI options.

use serde_json::Value;

use super::{
    emit_group, emit_header, field_bool, field_i64, field_string, group_node, section_node,
    warn_unknown_keys,
};
use crate::error::ConfigResult;
use crate::resolve::EnvVars;
use crate::types::{AppConfig, SwaggerConfig};

const KNOWN_KEYS: &[&str] = &[
    "Enabled",
    "Prefix",
    "WebRoot",
    "CORSOrigin",
    "IndexPage",
    "Metadata",
    "UIOptions",
];
const KNOWN_METADATA_KEYS: &[&str] = &["Title", "Description", "Version", "Contact", "License"];
const KNOWN_CONTACT_KEYS: &[&str] = &["Name", "Email", "URL"];
const KNOWN_LICENSE_KEYS: &[&str] = &["Name", "URL"];
const KNOWN_UI_KEYS: &[&str] = &[
    "TryItEnabled",
    "AlwaysExpanded",
    "DisplayOperationId",
    "DefaultModelsExpandDepth",
    "DefaultModelExpandDepth",
    "ShowExtensions",
    "ShowCommonExtensions",
    "DocExpansion",
    "SyntaxHighlightTheme",
];

pub(crate) fn load(root: &Value, config: &mut AppConfig, env: &EnvVars) -> ConfigResult<()> {
    let node = section_node(root, "Swagger");
    emit_header("Swagger", node.is_some());
    warn_unknown_keys("Swagger", node, KNOWN_KEYS);

    let d = SwaggerConfig::default();
    let c = &mut config.swagger;
    c.enabled = field_bool(1, "Enabled", node, d.enabled, env);
    c.prefix = field_string(1, "Prefix", node, &d.prefix, env);
    c.web_root = field_string(1, "WebRoot", node, &d.web_root, env);
    c.cors_origin = field_string(1, "CORSOrigin", node, &d.cors_origin, env);
    c.index_page = field_string(1, "IndexPage", node, &d.index_page, env);

    let meta = group_node(node, "Metadata");
    emit_group(1, "Metadata");
    warn_unknown_keys("Swagger.Metadata", meta, KNOWN_METADATA_KEYS);
    c.metadata.title = field_string(2, "Title", meta, &d.metadata.title, env);
    c.metadata.description = field_string(2, "Description", meta, &d.metadata.description, env);
    c.metadata.version = field_string(2, "Version", meta, &d.metadata.version, env);

    let contact = group_node(meta, "Contact");
    emit_group(2, "Contact");
    warn_unknown_keys("Swagger.Metadata.Contact", contact, KNOWN_CONTACT_KEYS);
    c.metadata.contact.name = field_string(3, "Name", contact, &d.metadata.contact.name, env);
    c.metadata.contact.email = field_string(3, "Email", contact, &d.metadata.contact.email, env);
    c.metadata.contact.url = field_string(3, "URL", contact, &d.metadata.contact.url, env);

    let license = group_node(meta, "License");
    emit_group(2, "License");
    warn_unknown_keys("Swagger.Metadata.License", license, KNOWN_LICENSE_KEYS);
    c.metadata.license.name = field_string(3, "Name", license, &d.metadata.license.name, env);
    c.metadata.license.url = field_string(3, "URL", license, &d.metadata.license.url, env);

    let ui = group_node(node, "UIOptions");
    emit_group(1, "UIOptions");
    warn_unknown_keys("Swagger.UIOptions", ui, KNOWN_UI_KEYS);
    let o = &mut c.ui_options;
    o.try_it_enabled = field_bool(2, "TryItEnabled", ui, d.ui_options.try_it_enabled, env);
    o.always_expanded = field_bool(2, "AlwaysExpanded", ui, d.ui_options.always_expanded, env);
    o.display_operation_id =
        field_bool(2, "DisplayOperationId", ui, d.ui_options.display_operation_id, env);
    o.default_models_expand_depth = field_i64(
        2,
        "DefaultModelsExpandDepth",
        ui,
        d.ui_options.default_models_expand_depth,
        env,
    );
    o.default_model_expand_depth = field_i64(
        2,
        "DefaultModelExpandDepth",
        ui,
        d.ui_options.default_model_expand_depth,
        env,
    );
    o.show_extensions = field_bool(2, "ShowExtensions", ui, d.ui_options.show_extensions, env);
    o.show_common_extensions = field_bool(
        2,
        "ShowCommonExtensions",
        ui,
        d.ui_options.show_common_extensions,
        env,
    );
    o.doc_expansion = field_string(2, "DocExpansion", ui, &d.ui_options.doc_expansion, env);
    o.syntax_highlight_theme = field_string(
        2,
        "SyntaxHighlightTheme",
        ui,
        &d.ui_options.syntax_highlight_theme,
        env,
    );
    Ok(())
}
