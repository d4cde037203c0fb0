use crate::error::CliError;
use serde::Serialize;
use std::fs;

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(CliError::JsonSerialize)
}

/// Writes to `path` when given, stdout otherwise.
pub fn emit(json: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirq_compiler::compile;

    #[test]
    fn test_to_json() {
        let descriptor = compile("select(a), limit(1)").unwrap();
        assert_eq!(
            to_json(&descriptor, false).unwrap(),
            r#"{"select":["a"],"limit":1}"#
        );
        assert!(to_json(&descriptor, true).unwrap().contains('\n'));
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let path_str = path.to_string_lossy().into_owned();

        emit("{}", Some(&path_str)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
