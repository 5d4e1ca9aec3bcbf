//! 내장 명령 모듈과 정적 등록 테이블.
//!
//! 새 모듈 추가:
//! 1. 이 디렉터리에 파일을 만들고 `Command`를 구현한다.
//! 2. `pub fn module() -> CommandModule`로 명령을 묶는다.
//! 3. 아래 `BUILTIN_MODULES`에 `xxx::module`을 추가한다.

mod foo;
mod help;
mod info;
mod legacy;

use crate::application::registry::ModuleFactory;

pub use info::DEVCON_VERSION;

/// 시작 시 `CommandRegistry::discover`에 넘기는 등록 테이블.
pub static BUILTIN_MODULES: &[ModuleFactory] =
    &[help::module, info::module, foo::module, legacy::module];

/// 위치 기반 값 목록에서 `idx`번째 값을 꺼낸다. 직접 호출(값 없음)이면 빈 문자열.
fn value_at(values: &[String], idx: usize) -> &str {
    values.get(idx).map(String::as_str).unwrap_or_default()
}
