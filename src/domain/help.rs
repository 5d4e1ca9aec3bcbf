//! 도움말 렌더링에 넘기는 순수 데이터.
//! 포맷팅은 출력 어댑터가 담당한다.

use crate::domain::command::ParameterKind;
use crate::domain::options::GlobalOption;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterHelp {
    pub name: String,
    pub kind: ParameterKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHelp {
    pub module: String,
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterHelp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHelp {
    pub name: String,
    pub description: String,
    /// 모듈이 속한 영역(예: `global`). 비어 있으면 표시하지 않는다.
    pub context: String,
    pub deprecated: bool,
    /// (명령 이름, 설명), 이름 순.
    pub commands: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralHelp {
    pub usage: String,
    pub header: String,
    pub options: Vec<GlobalOption>,
    /// (모듈 이름, 설명), 이름 순.
    pub modules: Vec<(String, String)>,
    pub footer: String,
}
