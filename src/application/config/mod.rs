//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// 누락된 선택 파라미터를 묻지 않는다(`-np`와 동일)
    pub no_prompt: Option<bool>,
    /// 선택 파라미터 입력 대기 제한 시간(ms). 미지정이면 무제한
    pub prompt_timeout_ms: Option<u64>,
    /// 전역 옵션 JSON 파일 경로
    pub global_options_path: Option<String>,
}

impl Config {
    pub fn no_prompt(&self) -> bool {
        self.defaults.no_prompt.unwrap_or(false)
    }

    pub fn prompt_timeout(&self) -> Option<Duration> {
        self.defaults
            .prompt_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
    }
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.no_prompt.is_some() {
            self.no_prompt = other.no_prompt;
        }
        if other.prompt_timeout_ms.is_some() {
            self.prompt_timeout_ms = other.prompt_timeout_ms;
        }
        if other.global_options_path.is_some() {
            self.global_options_path = other.global_options_path;
        }
    }
}
