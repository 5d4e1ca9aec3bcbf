//! 설정/전역 옵션 저장소 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{ConfigRepository, GlobalOptionsRepository};
use crate::domain::options::GlobalOption;
use crate::infrastructure::config;

/// JSON 기반 설정 저장소 어댑터.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Config> {
        config::load()
    }
}

/// JSON 배열 파일 기반 전역 옵션 저장소 어댑터.
pub struct JsonGlobalOptionsRepository;

impl GlobalOptionsRepository for JsonGlobalOptionsRepository {
    fn load(&self, config: &Config) -> Vec<GlobalOption> {
        config::load_global_options(&config::global_options_path(config))
    }
}
