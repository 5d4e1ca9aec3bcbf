//! 명령 파라미터 선언과 디스패치 결과 값 객체.

use std::fmt;

/// 파라미터 누락 시 처리 방식을 결정하는 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// 누락되면 실행을 거부한다.
    Mandatory,
    /// 누락되면 대화형 보완을 시도한다.
    Optional,
}

/// 명령이 선언한 파라미터 하나.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParameter {
    name: &'static str,
    kind: ParameterKind,
    description: &'static str,
}

impl CommandParameter {
    pub const fn mandatory(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::Mandatory,
            description,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::Optional,
            description,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn is_mandatory(&self) -> bool {
        self.kind == ParameterKind::Mandatory
    }
}

/// 디스패치 시도 한 번의 최종 결과 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Ok,
    ModuleNotRecognized,
    CommandNotRecognized,
    MandatoryParameterMissing,
    OptionalParameterMissing,
}

impl CommandResult {
    pub const OK_MSG: &'static str = "OK";

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// 로그/종료 코드 판단용 코드값.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ModuleNotRecognized => "module-not-recognized",
            Self::CommandNotRecognized => "command-not-recognized",
            Self::MandatoryParameterMissing => "mandatory-parameter-missing",
            Self::OptionalParameterMissing => "optional-parameter-missing",
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 결과 태그와 사용자 표시용 상세 문자열 쌍.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub result: CommandResult,
    pub detail: String,
}

impl DispatchOutcome {
    pub fn ok() -> Self {
        Self::new(CommandResult::Ok, CommandResult::OK_MSG)
    }

    pub fn new(result: CommandResult, detail: impl Into<String>) -> Self {
        Self {
            result,
            detail: detail.into(),
        }
    }
}

/// 이름 목록을 `, `로 이어 붙인다.
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (idx, name) in names.into_iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
    }
    out
}
