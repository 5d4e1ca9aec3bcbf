//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod console_output;
mod input;

pub use config_repository::{JsonConfigRepository, JsonGlobalOptionsRepository};
pub use console_output::ConsoleOutput;
pub use input::{NoPromptInput, ScriptedInput, StdinInput};
