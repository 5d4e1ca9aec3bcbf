//! 전역 옵션 JSON 파일 로더.
//!
//! 파일 형식: `[{"opt": "h", "longOpt": "help", "hasArg": false, "description": "show help"}, ...]`
//! 잘못된 항목은 기록 후 건너뛰고, 파일이 없거나 전체를 읽을 수 없으면 기본 옵션으로 대체한다.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::application::config::Config;
use crate::domain::options::{GlobalOption, default_global_options};

pub(crate) const GLOBAL_OPTIONS_ENV: &str = "DEVCON_GLOBAL_OPTIONS";

/// 설정 > 환경변수 > 프로젝트 로컬 기본 경로 순으로 파일 경로를 결정한다.
pub fn global_options_path(config: &Config) -> PathBuf {
    if let Some(path) = &config.defaults.global_options_path {
        return PathBuf::from(path);
    }
    if let Ok(path) = env::var(GLOBAL_OPTIONS_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(".devcon/global-options.json")
}

/// 전역 옵션을 로딩한다. 실패는 모두 기본 옵션으로 대체된다.
pub fn load_global_options(path: &Path) -> Vec<GlobalOption> {
    if !path.exists() {
        debug!(path = %path.display(), "global options file not found, using defaults");
        return default_global_options();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read global options file");
            return default_global_options();
        }
    };

    let options = parse_global_options(&raw);
    if options.is_empty() {
        warn!(path = %path.display(), "no usable global options, using defaults");
        return default_global_options();
    }
    options
}

/// JSON 배열을 항목 단위로 해석한다. 잘못된 항목만 건너뛴다.
pub fn parse_global_options(raw: &str) -> Vec<GlobalOption> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("global options file must contain a JSON array");
            return Vec::new();
        }
        Err(err) => {
            warn!(error = %err, "failed to parse global options file");
            return Vec::new();
        }
    };

    let mut options = Vec::new();
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<GlobalOption>(entry) {
            Ok(option) if option.key().is_some() => options.push(option),
            Ok(_) => warn!(index = idx, "global option without opt/longOpt skipped"),
            Err(err) => warn!(
                index = idx,
                error = %err,
                "error reading a global option, please check the global options file"
            ),
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_entries_are_skipped() {
        let raw = r#"[
            {"opt": "h", "longOpt": "help", "hasArg": false, "description": "show help"},
            {"opt": "x", "description": "no hasArg"},
            {"opt": "o", "longOpt": "output", "hasArg": "yes"},
            "not an object",
            {"hasArg": true},
            {"longOpt": "profile", "hasArg": true, "description": "profile name"}
        ]"#;

        let options = parse_global_options(raw);
        let keys: Vec<_> = options.iter().filter_map(|o| o.key()).collect();
        assert_eq!(keys, vec!["help", "profile"]);
        assert!(options[1].has_arg);
    }

    #[test]
    fn non_array_or_broken_json_yields_nothing() {
        assert!(parse_global_options(r#"{"opt": "h"}"#).is_empty());
        assert!(parse_global_options("[").is_empty());
    }

    #[test]
    fn missing_or_unusable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_global_options(&dir.path().join("absent.json")),
            default_global_options()
        );

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[{\"opt\": 1}]").unwrap();
        assert_eq!(load_global_options(&broken), default_global_options());
    }

    #[test]
    fn file_options_replace_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(
            &path,
            r#"[{"opt": "q", "longOpt": "quiet", "hasArg": false, "description": "quiet"}]"#,
        )
        .unwrap();

        let options = load_global_options(&path);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].display_flags(), "-q, --quiet");
    }

    #[test]
    fn configured_path_takes_precedence() {
        let mut config = Config::default();
        config.defaults.global_options_path = Some("/tmp/devcon-options.json".to_string());
        assert_eq!(
            global_options_path(&config),
            PathBuf::from("/tmp/devcon-options.json")
        );
    }
}
