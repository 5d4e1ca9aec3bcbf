//! 사용자 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고, 전역 옵션 파일을 해석한다.

mod global_options;
mod loader;

use anyhow::Result;
use tracing::debug;

pub use global_options::{global_options_path, load_global_options, parse_global_options};
pub use loader::config_paths;

pub use crate::application::config::{Config, DefaultsConfig};

/// 병합된 최종 설정을 로딩한다.
pub fn load() -> Result<Config> {
    let loaded = loader::load_merged_config()?;
    debug!(paths = ?loaded.loaded_paths, "loaded configuration files");
    Ok(loaded.config)
}
