//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read an import document. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Write an exported document as pretty JSON, to `file` or stdout.
pub fn write_document<T: Serialize + ?Sized>(
    data: &T,
    file: Option<&Path>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(data)?;
    match file {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))?;
            output::status(global, &format!("Exported to {}", path.display()));
        }
        None => output::print_output(&rendered, global.quiet),
    }
    Ok(())
}

/// Compact rendering of an optional string column.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => "-".into(),
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::Value;

    use super::*;

    #[test]
    fn yaml_extension_selects_yaml_parser() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "name: provision\nsteps: 3").unwrap();

        let doc: Value = read_document(file.path()).unwrap();
        assert_eq!(doc["name"], "provision");
        assert_eq!(doc["steps"], 3);
    }

    #[test]
    fn other_extensions_parse_as_json() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "name: provision").unwrap();

        let err = read_document::<Value>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn confirm_short_circuits_on_yes() {
        assert!(confirm("Delete everything?", true).unwrap());
    }

    #[test]
    fn dash_for_missing_values() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
