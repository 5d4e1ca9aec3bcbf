//! Interface layer
//! 프로세스 진입점이 사용하는 CLI 파싱/의존성 조립.

pub mod cli;
