use crate::domain::model::Module;
use crate::utils::error::{BuildError, Result};
use serde::Serialize;

pub const DEFAULT_PLACEHOLDER: &str = "modules: [/* MODULES_DATA */]";

/// 資料檔使用兩格縮排
pub fn render_json(modules: &[Module]) -> Result<String> {
    Ok(serde_json::to_string_pretty(modules)?)
}

fn to_json_with_indent(modules: &[Module], indent: &[u8]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    modules.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| BuildError::RenderError {
        message: format!("Serialized modules are not valid UTF-8: {}", e),
    })
}

/// Replaces the first `placeholder` in `template` with the module array.
///
/// The default placeholder is an object property slot and keeps its
/// `modules:` label; any other placeholder is replaced by the bare array.
/// Returns the template unchanged if the placeholder is missing.
pub fn render_html(template: &str, placeholder: &str, modules: &[Module]) -> Result<String> {
    if !template.contains(placeholder) {
        tracing::warn!(
            "Template does not contain placeholder '{}', writing it unchanged",
            placeholder
        );
        return Ok(template.to_string());
    }

    let data = to_json_with_indent(modules, b"    ")?;
    let replacement = if placeholder == DEFAULT_PLACEHOLDER {
        format!("modules: {}", data)
    } else {
        data
    };
    Ok(template.replacen(placeholder, &replacement, 1))
}
