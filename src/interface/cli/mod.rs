//! CLI 인터페이스 모듈 묶음.
//! 인자 파싱/조립을 한 네임스페이스로 관리한다.

pub mod command;
pub mod composition;

pub use command::{Cli, CliAction, CliRequest};
pub use composition::AppComposition;
