//! Domain layer
//! 명령 디스패치 규칙(파라미터/결과/문장/도움말 데이터)을 외부 의존성 없이 표현한다.

pub mod command;
pub mod help;
pub mod options;
pub mod sentence;
