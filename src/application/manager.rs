//! 문장(Sentence)을 모듈/명령으로 해석하고 파라미터를 보완해 실행하는 디스패처.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::application::ports::{Input, Output};
use crate::application::registry::{Command, CommandModule, CommandRegistry, ExecContext};
use crate::domain::command::{CommandParameter, CommandResult, DispatchOutcome, join_names};
use crate::domain::options::GlobalOption;
use crate::domain::sentence::Sentence;

/// 진행 중인 파라미터 입력 대기를 외부(호스트)에서 취소하는 핸들.
#[derive(Debug, Clone)]
pub struct PromptCanceller {
    tx: Arc<watch::Sender<bool>>,
    pending: Arc<AtomicBool>,
}

impl Default for PromptCanceller {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptCanceller {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 현재/이후의 모든 입력 대기를 중단시킨다.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// 지금 입력 대기 중인 파라미터가 있는지 여부.
    /// 대기 중이 아닐 때의 인터럽트는 호스트가 직접 처리한다.
    pub fn is_prompt_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    fn begin_prompt(&self) -> PendingPrompt<'_> {
        self.pending.store(true, Ordering::SeqCst);
        PendingPrompt(&self.pending)
    }

    async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// 입력 대기 구간. 해제 시 대기 표시를 내린다.
struct PendingPrompt<'a>(&'a AtomicBool);

impl Drop for PendingPrompt<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 누락된 선택 파라미터의 대화형 보완 정책.
#[derive(Debug, Clone)]
pub struct PromptPolicy {
    pub enabled: bool,
    /// 파라미터 하나당 입력 대기 제한 시간. `None`이면 무제한.
    pub timeout: Option<Duration>,
    pub canceller: PromptCanceller,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: None,
            canceller: PromptCanceller::new(),
        }
    }
}

/// 해석된 값 목록 또는 조기 종료 결과.
enum Resolution {
    Ready(Vec<String>),
    Rejected(DispatchOutcome),
}

enum PromptAnswer {
    Value(String),
    Blank,
    Stopped(&'static str),
}

/// 레지스트리/입출력 포트를 묶어 디스패치를 수행한다.
pub struct CommandManager<'a> {
    pub registry: &'a CommandRegistry,
    pub input: &'a dyn Input,
    pub output: &'a dyn Output,
    pub options: &'a [GlobalOption],
    pub prompt: PromptPolicy,
}

impl<'a> CommandManager<'a> {
    /// 전체 도움말(`help guide`)을 표시한다.
    pub async fn show_main_help(&self) -> Result<DispatchOutcome> {
        self.exec_command("help", "guide").await
    }

    /// 파라미터 없이 모듈/명령을 직접 실행한다(내부 고정 호출용).
    pub async fn exec_command(
        &self,
        module_name: &str,
        command_name: &str,
    ) -> Result<DispatchOutcome> {
        let Some(module) = self.resolve_module(module_name) else {
            return Ok(DispatchOutcome::new(CommandResult::ModuleNotRecognized, module_name));
        };
        let Some(command) = self.resolve_command(module, command_name) else {
            return Ok(DispatchOutcome::new(
                CommandResult::CommandNotRecognized,
                format!("{module_name} {command_name}"),
            ));
        };

        command.exec(&self.context(module), &[]).await?;
        Ok(DispatchOutcome::ok())
    }

    /// 문장 하나를 해석해 실행한다.
    /// 실패 태그는 모두 정상 결과 값이며, `Err`는 명령 자체의 실행 오류만 의미한다.
    pub async fn exec_cmd_line(&self, sentence: &Sentence) -> Result<DispatchOutcome> {
        let Some(module) = self.resolve_module(&sentence.module_name) else {
            return Ok(DispatchOutcome::new(
                CommandResult::ModuleNotRecognized,
                sentence.module_name.as_str(),
            ));
        };

        let command_name = match sentence.command_name.as_deref() {
            Some(name) if !sentence.help_requested => name,
            requested => {
                self.show_help(module, requested);
                return Ok(DispatchOutcome::ok());
            }
        };

        let Some(command) = self.resolve_command(module, command_name) else {
            return Ok(DispatchOutcome::new(
                CommandResult::CommandNotRecognized,
                format!("{} {}", sentence.module_name, command_name),
            ));
        };

        let values = match self.resolve_values(module, command, sentence).await {
            Resolution::Ready(values) => values,
            Resolution::Rejected(outcome) => return Ok(outcome),
        };

        debug!(module = module.name(), command = command.name(), "executing command");
        command.exec(&self.context(module), &values).await?;
        Ok(DispatchOutcome::ok())
    }

    /// 모든 모듈/명령에 선언된 파라미터 이름의 합집합.
    pub fn parameter_names(&self) -> BTreeSet<&'static str> {
        parameter_names(self.registry)
    }

    fn context(&self, module: &'a CommandModule) -> ExecContext<'_> {
        ExecContext {
            registry: self.registry,
            output: self.output,
            options: self.options,
            module: module.name(),
        }
    }

    fn resolve_module(&self, name: &str) -> Option<&'a CommandModule> {
        let Some(module) = self.registry.command_module(name) else {
            self.output.show_error(&format!(
                "[ERROR] The module {name} is not recognized as available module."
            ));
            return None;
        };

        if module.is_deprecated() {
            warn!(module = name, "dispatching to deprecated module");
            self.output
                .show_message(&format!("[WARNING] The module {name} is deprecated."));
        }
        Some(module)
    }

    fn resolve_command(&self, module: &'a CommandModule, name: &str) -> Option<&'a dyn Command> {
        let command = module.command(name);
        if command.is_none() {
            self.output.show_error(&format!(
                "[ERROR] The command {name} is not recognized as valid command of the {} module",
                module.name()
            ));
        }
        command
    }

    fn show_help(&self, module: &CommandModule, command_name: Option<&str>) {
        match command_name.and_then(|name| module.command(name)) {
            Some(command) => self.output.show_command_help(&module.command_help(command)),
            None => self.output.show_module_help(&module.help()),
        }
    }

    async fn resolve_values(
        &self,
        module: &CommandModule,
        command: &dyn Command,
        sentence: &Sentence,
    ) -> Resolution {
        let declared = command.defined_parameters();

        // 같은 이름이 반복되면 마지막 값이 남는다.
        let supplied: HashMap<&str, &str> = sentence
            .supplied_params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        self.report_unknown(module, command, &supplied);

        let supplied_names: HashSet<&str> = supplied.keys().copied().collect();
        let missing = command.parameters_diff(&supplied_names);

        let mut completed = HashMap::new();
        if !missing.is_empty() {
            let mandatory: Vec<&str> = missing
                .iter()
                .filter(|param| param.is_mandatory())
                .map(|param| param.name())
                .collect();
            if !mandatory.is_empty() {
                let detail = join_names(mandatory);
                self.output
                    .show_error(&format!("Missing mandatory parameter(s): {detail}"));
                return Resolution::Rejected(DispatchOutcome::new(
                    CommandResult::MandatoryParameterMissing,
                    detail,
                ));
            }

            let unfilled = self.complete_missing(&missing, &mut completed).await;
            if !unfilled.is_empty() {
                let detail = join_names(unfilled);
                self.output
                    .show_error(&format!("Missing parameter(s): {detail}"));
                return Resolution::Rejected(DispatchOutcome::new(
                    CommandResult::OptionalParameterMissing,
                    detail,
                ));
            }
        }

        let values = declared
            .iter()
            .map(|param| match supplied.get(param.name()) {
                Some(value) => value.to_string(),
                None => completed.remove(param.name()).unwrap_or_default(),
            })
            .collect();
        Resolution::Ready(values)
    }

    /// 누락된 선택 파라미터를 입력 포트로 하나씩 묻는다.
    /// 채우지 못한 이름 목록(선언 순서)을 반환한다.
    async fn complete_missing(
        &self,
        missing: &[&CommandParameter],
        completed: &mut HashMap<&'static str, String>,
    ) -> Vec<&'static str> {
        if !self.prompt.enabled {
            debug!("prompting disabled, optional parameters left unfilled");
            return missing.iter().map(|param| param.name()).collect();
        }

        let mut unfilled = Vec::new();
        let mut stopped = false;
        for param in missing {
            if stopped {
                unfilled.push(param.name());
                continue;
            }

            match self.prompt_one(param.name()).await {
                PromptAnswer::Value(value) => {
                    completed.insert(param.name(), value);
                }
                PromptAnswer::Blank => unfilled.push(param.name()),
                PromptAnswer::Stopped(reason) => {
                    debug!(parameter = param.name(), reason, "parameter completion stopped");
                    unfilled.push(param.name());
                    stopped = true;
                }
            }
        }
        unfilled
    }

    async fn prompt_one(&self, name: &str) -> PromptAnswer {
        let canceller = &self.prompt.canceller;
        if canceller.is_cancelled() {
            return PromptAnswer::Stopped("cancelled");
        }

        let asked = async {
            let ask = self.input.prompt_for_argument(name);
            match self.prompt.timeout {
                Some(limit) => tokio::time::timeout(limit, ask).await.ok(),
                None => Some(ask.await),
            }
        };

        let answer = {
            let _pending = canceller.begin_prompt();
            tokio::select! {
                answer = asked => answer,
                _ = canceller.cancelled() => return PromptAnswer::Stopped("cancelled"),
            }
        };

        match answer {
            None => PromptAnswer::Stopped("timed out"),
            Some(Err(err)) => {
                warn!(parameter = name, error = %err, "failed to read parameter value");
                PromptAnswer::Stopped("input error")
            }
            Some(Ok(None)) => PromptAnswer::Stopped("end of input"),
            Some(Ok(Some(value))) => {
                let value = value.trim();
                if value.is_empty() {
                    PromptAnswer::Blank
                } else {
                    PromptAnswer::Value(value.to_string())
                }
            }
        }
    }

    fn report_unknown(
        &self,
        module: &CommandModule,
        command: &dyn Command,
        supplied: &HashMap<&str, &str>,
    ) {
        let declared: HashSet<&str> = command
            .defined_parameters()
            .iter()
            .map(|param| param.name())
            .collect();
        let unknown: BTreeSet<&str> = supplied
            .keys()
            .copied()
            .filter(|name| !declared.contains(name))
            .collect();
        if unknown.is_empty() {
            return;
        }

        let names = join_names(unknown);
        warn!(
            module = module.name(),
            command = command.name(),
            parameters = %names,
            "ignoring undeclared parameters"
        );
        self.output.status(&format!(
            "Ignoring unknown parameter(s) for {} {}: {names}",
            module.name(),
            command.name()
        ));
    }
}

/// 레지스트리 전체에서 선언된 파라미터 이름을 중복 없이 모은다.
pub fn parameter_names(registry: &CommandRegistry) -> BTreeSet<&'static str> {
    registry
        .command_modules()
        .flat_map(|module| module.commands())
        .flat_map(|command| command.defined_parameters().iter().map(|p| p.name()))
        .collect()
}
