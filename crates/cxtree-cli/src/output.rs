use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Render a JSON value, indented unless `compact`.
pub fn render(value: &Value, compact: bool) -> anyhow::Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}

/// Print a JSON value to stdout.
pub fn output(value: &Value, compact: bool) -> anyhow::Result<()> {
    let rendered = render(value, compact)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write to stdout")?;
    Ok(())
}

/// Write a JSON value to `path`, creating parent directories.
pub fn write_file(value: &Value, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let rendered = render(value, false)?;
    std::fs::write(path, format!("{rendered}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_rendering_has_no_newlines() {
        let value = json!({ "succeeded": 1, "failed": 0 });
        assert!(!render(&value, true).unwrap().contains('\n'));
        assert!(render(&value, false).unwrap().contains('\n'));
    }

    #[test]
    fn write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/batch.json");
        write_file(&json!({ "failed": 2 }), &path).unwrap();

        let back: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["failed"], 2);
    }
}
