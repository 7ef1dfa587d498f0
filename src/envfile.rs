use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Parse a dotenv-style file.
///
/// One `KEY=value` per line. Blank lines, lines starting with `#` and lines
/// without `=` are skipped. Only the first `=` splits, so values may contain
/// further `=` characters. Later assignments overwrite earlier ones.
pub fn parse_env(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.to_string(), value.to_string());
        }
    }
    vars
}

/// Read and parse an env file from disk.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file: {}", path.display()))?;
    Ok(parse_env(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_skips_comments_and_bare_lines() {
        let vars = parse_env(
            "# production\n\nNEXT_PUBLIC_BASE_URL=https://squad.cronberry.com\nnot an assignment\n  MONGO_URL=mongodb://db:27017/app  \n",
        );
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["NEXT_PUBLIC_BASE_URL"], "https://squad.cronberry.com");
        assert_eq!(vars["MONGO_URL"], "mongodb://db:27017/app");
    }

    #[test]
    fn test_parse_env_splits_on_first_equals() {
        let vars = parse_env("MONGO_URL=mongodb://u:p@db/app?retryWrites=true&w=majority");
        assert_eq!(vars["MONGO_URL"], "mongodb://u:p@db/app?retryWrites=true&w=majority");
    }

    #[test]
    fn test_parse_env_keeps_empty_values() {
        let vars = parse_env("NEXTAUTH_SECRET=\n#MONGO_URL=ignored");
        assert_eq!(vars.get("NEXTAUTH_SECRET").map(String::as_str), Some(""));
        assert!(!vars.contains_key("MONGO_URL"));
        assert!(!vars.contains_key("#MONGO_URL"));
    }

    #[test]
    fn test_load_env_file_missing() {
        let err = load_env_file(Path::new("/nonexistent/dir/.env")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read env file"));
    }
}
