//! 전역 옵션(`-h`, `-np`, `-v` 등) 선언 모델.

use serde::{Deserialize, Serialize};

/// 설정 파일 한 항목: `{opt, longOpt, hasArg, description}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlobalOption {
    #[serde(default)]
    pub opt: Option<String>,
    #[serde(default, rename = "longOpt")]
    pub long_opt: Option<String>,
    #[serde(rename = "hasArg")]
    pub has_arg: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl GlobalOption {
    pub fn new(opt: &str, long_opt: Option<&str>, has_arg: bool, description: &str) -> Self {
        Self {
            opt: Some(opt.to_string()),
            long_opt: long_opt.map(ToString::to_string),
            has_arg,
            description: Some(description.to_string()),
        }
    }

    /// 옵션을 식별하는 키. 긴 이름을 우선한다.
    pub fn key(&self) -> Option<&str> {
        self.long_opt
            .as_deref()
            .or(self.opt.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `-h, --help` 형태의 표시 문자열.
    pub fn display_flags(&self) -> String {
        let short = self.opt.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let long = self
            .long_opt
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        match (short, long) {
            (Some(s), Some(l)) => format!("-{s}, --{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, Some(l)) => format!("--{l}"),
            (None, None) => String::new(),
        }
    }
}

pub const HELP_OPTION: &str = "help";
pub const NO_PROMPT_OPTION: &str = "np";
pub const VERSION_OPTION: &str = "version";

/// 설정 파일이 없거나 읽을 수 없을 때 사용하는 기본 전역 옵션.
pub fn default_global_options() -> Vec<GlobalOption> {
    vec![
        GlobalOption::new("h", Some(HELP_OPTION), false, "show help"),
        GlobalOption::new(NO_PROMPT_OPTION, None, false, "no prompt"),
        GlobalOption::new("v", Some(VERSION_OPTION), false, "show the devcon version"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_help_no_prompt_and_version() {
        let keys: Vec<_> = default_global_options()
            .iter()
            .filter_map(|o| o.key().map(ToString::to_string))
            .collect();
        assert_eq!(keys, vec!["help", "np", "version"]);
    }

    #[test]
    fn display_flags_handles_missing_parts() {
        let np = GlobalOption::new("np", None, false, "no prompt");
        assert_eq!(np.display_flags(), "-np");

        let help = GlobalOption::new("h", Some("help"), false, "show help");
        assert_eq!(help.display_flags(), "-h, --help");
    }

    #[test]
    fn deserializes_camel_case_entry() {
        let raw = r#"{"opt":"q","longOpt":"quiet","hasArg":false,"description":"less output"}"#;
        let option: GlobalOption = serde_json::from_str(raw).unwrap();
        assert_eq!(option.long_opt.as_deref(), Some("quiet"));
        assert!(!option.has_arg);
    }
}
