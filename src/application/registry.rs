//! 명령 모듈 레지스트리.
//!
//! 모듈은 정적 등록 테이블(`ModuleFactory` 배열)로 선언하고, 시작 시 한 번 `discover`로 조립한다.
//! 조립 이후에는 읽기 전용으로만 사용한다.

use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ports::Output;
use crate::domain::command::CommandParameter;
use crate::domain::help::{CommandHelp, GeneralHelp, ModuleHelp, ParameterHelp};
use crate::domain::options::GlobalOption;

/// 명령 실행 시 전달되는 읽기 전용 컨텍스트.
pub struct ExecContext<'a> {
    pub registry: &'a CommandRegistry,
    pub output: &'a dyn Output,
    pub options: &'a [GlobalOption],
    /// 명령을 소유한 모듈 이름.
    pub module: &'a str,
}

/// 실행 가능한 명령 하나.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// 선언된 파라미터(선언 순서 유지).
    fn defined_parameters(&self) -> &[CommandParameter] {
        &[]
    }

    /// `supplied`에 이름이 없는 선언 파라미터를 선언 순서대로 반환한다.
    fn parameters_diff(&self, supplied: &HashSet<&str>) -> Vec<&CommandParameter> {
        self.defined_parameters()
            .iter()
            .filter(|param| !supplied.contains(param.name()))
            .collect()
    }

    /// 선언 순서대로 정렬된 최종 값 목록으로 실행한다.
    /// 값 검증은 호출자(디스패처)의 책임이다.
    async fn exec(&self, ctx: &ExecContext<'_>, values: &[String]) -> Result<()>;
}

/// 이름/설명을 가진 명령 묶음.
pub struct CommandModule {
    name: String,
    description: String,
    context: String,
    deprecated: bool,
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandModule {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            context: String::new(),
            deprecated: false,
            commands: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn mark_deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// 명령을 추가한다.
    /// 파라미터 이름이 중복되거나 같은 이름의 명령이 이미 있으면 기록 후 건너뛴다.
    pub fn with_command(mut self, command: impl Command + 'static) -> Self {
        let name = command.name().to_string();

        let mut seen = HashSet::new();
        if let Some(dup) = command
            .defined_parameters()
            .iter()
            .find(|param| !seen.insert(param.name()))
        {
            warn!(
                module = %self.name,
                command = %name,
                parameter = dup.name(),
                "duplicate parameter declaration, command skipped"
            );
            return self;
        }

        if self.commands.contains_key(&name) {
            warn!(module = %self.name, command = %name, "duplicate command name, command skipped");
            return self;
        }

        self.commands.insert(name, Box::new(command));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// 이름이 정확히 일치하는 명령을 찾는다(대소문자 구분).
    pub fn command(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|c| c.as_ref())
    }

    pub fn help(&self) -> ModuleHelp {
        ModuleHelp {
            name: self.name.clone(),
            description: self.description.clone(),
            context: self.context.clone(),
            deprecated: self.deprecated,
            commands: self
                .commands()
                .map(|c| (c.name().to_string(), c.description().to_string()))
                .collect(),
        }
    }

    pub fn command_help(&self, command: &dyn Command) -> CommandHelp {
        CommandHelp {
            module: self.name.clone(),
            name: command.name().to_string(),
            description: command.description().to_string(),
            parameters: command
                .defined_parameters()
                .iter()
                .map(|p| ParameterHelp {
                    name: p.name().to_string(),
                    kind: p.kind(),
                    description: p.description().to_string(),
                })
                .collect(),
        }
    }
}

/// 정적 등록 테이블의 항목: 모듈 생성 함수.
pub type ModuleFactory = fn() -> CommandModule;

/// 사용 가능한 모든 명령 모듈 보관소.
#[derive(Default)]
pub struct CommandRegistry {
    modules: BTreeMap<String, CommandModule>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 등록 테이블을 순회해 레지스트리를 조립한다.
    pub fn discover(factories: &[ModuleFactory]) -> Self {
        let mut registry = Self::new();
        for factory in factories {
            registry.register(factory());
        }
        debug!(modules = registry.len(), "command registry populated");
        registry
    }

    /// 모듈을 등록한다. 같은 이름이 이미 있으면 기록 후 `false`.
    pub fn register(&mut self, module: CommandModule) -> bool {
        if self.modules.contains_key(module.name()) {
            warn!(module = module.name(), "duplicate module name, module skipped");
            return false;
        }
        self.modules.insert(module.name().to_string(), module);
        true
    }

    /// 이름이 정확히 일치하는 모듈을 찾는다(대소문자 구분).
    pub fn command_module(&self, name: &str) -> Option<&CommandModule> {
        self.modules.get(name)
    }

    /// 모든 모듈. 순서에 의존하지 않는다.
    pub fn command_modules(&self) -> impl Iterator<Item = &CommandModule> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// 전체 도움말 데이터. 폐기(deprecated) 모듈은 목록에서 제외한다.
    pub fn general_help(&self, options: &[GlobalOption]) -> GeneralHelp {
        GeneralHelp {
            usage: "devcon <module> <command> [--<parameter> <value> ...]".to_string(),
            header: "Available modules:".to_string(),
            options: options.to_vec(),
            modules: self
                .command_modules()
                .filter(|m| !m.is_deprecated())
                .map(|m| (m.name().to_string(), m.description().to_string()))
                .collect(),
            footer: "Run `devcon <module> -h` to list the commands of a module.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubCommand {
        name: &'static str,
        params: Vec<CommandParameter>,
    }

    #[async_trait]
    impl Command for StubCommand {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        fn defined_parameters(&self) -> &[CommandParameter] {
            &self.params
        }

        async fn exec(&self, _ctx: &ExecContext<'_>, _values: &[String]) -> Result<()> {
            Ok(())
        }
    }

    fn clone_command() -> StubCommand {
        StubCommand {
            name: "clone",
            params: vec![
                CommandParameter::mandatory("url", "repository url"),
                CommandParameter::optional("branch", "branch"),
                CommandParameter::optional("depth", "depth"),
            ],
        }
    }

    fn git_module() -> CommandModule {
        CommandModule::new("git", "git helpers")
            .with_context("vcs")
            .with_command(clone_command())
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = CommandRegistry::discover(&[git_module]);
        assert!(registry.command_module("git").is_some());
        assert!(registry.command_module("Git").is_none());
        assert!(registry.command_module("nope").is_none());

        let module = registry.command_module("git").unwrap();
        assert!(module.command("clone").is_some());
        assert!(module.command("CLONE").is_none());
    }

    #[test]
    fn duplicate_module_is_skipped() {
        let registry = CommandRegistry::discover(&[git_module, git_module]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_command_and_parameter_declarations_are_skipped() {
        let module = CommandModule::new("git", "git helpers")
            .with_command(clone_command())
            .with_command(StubCommand {
                name: "clone",
                params: vec![],
            })
            .with_command(StubCommand {
                name: "pull",
                params: vec![
                    CommandParameter::optional("remote", "remote"),
                    CommandParameter::optional("remote", "again"),
                ],
            });

        assert_eq!(module.commands().count(), 1);
        assert_eq!(module.command("clone").unwrap().defined_parameters().len(), 3);
        assert!(module.command("pull").is_none());
    }

    #[test]
    fn parameters_diff_is_name_set_difference() {
        let command = clone_command();

        let supplied: HashSet<&str> = ["depth", "url"].into_iter().collect();
        let names: Vec<_> = command.parameters_diff(&supplied).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["branch"]);

        let supplied: HashSet<&str> = ["url", "depth", "unknown"].into_iter().collect();
        let names: Vec<_> = command.parameters_diff(&supplied).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["branch"]);

        let names: Vec<_> = command
            .parameters_diff(&HashSet::new())
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["url", "branch", "depth"]);
    }

    #[test]
    fn general_help_hides_deprecated_modules() {
        fn legacy() -> CommandModule {
            CommandModule::new("legacy", "old stuff").mark_deprecated()
        }

        let registry = CommandRegistry::discover(&[git_module, legacy]);
        let help = registry.general_help(&[]);
        assert_eq!(
            help.modules,
            vec![("git".to_string(), "git helpers".to_string())]
        );
    }

    #[test]
    fn module_help_lists_commands() {
        let help = git_module().help();
        assert_eq!(help.commands, vec![("clone".to_string(), "stub".to_string())]);
        assert_eq!(help.context, "vcs");
        assert!(!help.deprecated);
    }
}
