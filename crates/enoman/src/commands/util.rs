//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use enoman_core::FormFields;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Turn a JSON object into editor fields. Scalars are stringified, `null`
/// becomes an empty value. Nested values are rejected.
pub fn json_to_fields(value: &serde_json::Value) -> Result<FormFields, CliError> {
    let object = value.as_object().ok_or_else(|| CliError::Validation {
        field: "from-file".into(),
        reason: "expected a JSON object of field: value pairs".into(),
    })?;

    let mut fields = FormFields::new();
    for (key, value) in object {
        let text = match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(CliError::Validation {
                    field: key.clone(),
                    reason: "nested values are not allowed; use dotted keys".into(),
                });
            }
        };
        fields.set(key.clone(), text);
    }
    Ok(fields)
}
