//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::help::{CommandHelp, GeneralHelp, ModuleHelp};
use crate::domain::options::GlobalOption;

/// 설정 로딩을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
}

/// 전역 옵션 목록을 제공하는 포트.
/// 구현체는 오류를 내부에서 기록하고 기본 목록으로 대체한다.
pub trait GlobalOptionsRepository: Send + Sync {
    fn load(&self, config: &Config) -> Vec<GlobalOption>;
}

/// 사용자 표시 출력 추상화 포트(콘솔/그래픽 등).
pub trait Output: Send + Sync {
    fn show_message(&self, message: &str);
    fn show_error(&self, message: &str);
    fn status(&self, message: &str);
    fn status_in_new_line(&self, message: &str);
    fn success(&self, message: &str);
    fn show_command_help(&self, help: &CommandHelp);
    fn show_module_help(&self, help: &ModuleHelp);
    fn show_general_help(&self, help: &GeneralHelp);
}

/// 누락 파라미터 값을 사용자에게 묻는 입력 포트.
#[async_trait]
pub trait Input: Send + Sync {
    /// 입력 값을 반환한다. 입력 종료(EOF)면 `None`.
    async fn prompt_for_argument(&self, name: &str) -> Result<Option<String>>;
}
