//! devcon library root.
//! Clean Architecture 계층(도메인/애플리케이션/인프라/인터페이스)과 내장 모듈을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod modules;

use domain::command::DispatchOutcome;
use domain::sentence::Sentence;
use interface::cli::AppComposition;

pub const DEVCON_BANNER: &str = "Hello, this is Devcon!";

/// 라이브러리 직접 호출용 실행 함수.
/// 토큰 목록(`<module> <command> --name value ...`)을 디스패치하며, 누락된 선택 파라미터는 묻지 않는다.
pub async fn run<S: AsRef<str>>(words: &[S]) -> Result<DispatchOutcome> {
    let composition = AppComposition::load();
    let sentence = Sentence::from_words(words)?;
    composition.manager(true).exec_cmd_line(&sentence).await
}
