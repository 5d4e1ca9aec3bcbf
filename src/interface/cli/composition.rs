//! 애플리케이션 조립(composition root) 모듈.

use tracing::warn;

use crate::application::config::Config;
use crate::application::manager::{CommandManager, PromptCanceller, PromptPolicy};
use crate::application::ports::{ConfigRepository, GlobalOptionsRepository, Input, Output};
use crate::application::registry::CommandRegistry;
use crate::domain::options::GlobalOption;
use crate::infrastructure::adapters::{
    ConsoleOutput, JsonConfigRepository, JsonGlobalOptionsRepository, NoPromptInput, StdinInput,
};
use crate::modules::BUILTIN_MODULES;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Config,
    options: Vec<GlobalOption>,
    registry: CommandRegistry,
    output: Box<dyn Output>,
    input: Box<dyn Input>,
    canceller: PromptCanceller,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::load()
    }
}

impl AppComposition {
    /// 설정 파일/전역 옵션 파일을 읽어 콘솔 실행 조합을 만든다.
    /// 설정 오류는 기록 후 기본값으로 계속 진행한다.
    pub fn load() -> Self {
        let config = match JsonConfigRepository.load() {
            Ok(config) => config,
            Err(err) => {
                let detail = format!("{err:#}");
                warn!(error = %detail, "failed to load configuration, using defaults");
                Config::default()
            }
        };
        let options = JsonGlobalOptionsRepository.load(&config);
        Self::with_adapters(
            config,
            options,
            Box::new(ConsoleOutput::new()),
            Box::new(StdinInput::new()),
        )
    }

    /// 입출력 어댑터를 외부에서 주입한다.
    pub fn with_adapters(
        config: Config,
        options: Vec<GlobalOption>,
        output: Box<dyn Output>,
        input: Box<dyn Input>,
    ) -> Self {
        Self {
            config,
            options,
            registry: CommandRegistry::discover(BUILTIN_MODULES),
            output,
            input,
            canceller: PromptCanceller::new(),
        }
    }

    pub fn global_options(&self) -> &[GlobalOption] {
        &self.options
    }

    pub fn output(&self) -> &dyn Output {
        self.output.as_ref()
    }

    /// 입력 대기 취소 핸들(예: Ctrl-C 처리기에 연결).
    pub fn canceller(&self) -> PromptCanceller {
        self.canceller.clone()
    }

    /// 디스패처를 생성한다. `no_prompt`이거나 설정에서 끈 경우 입력을 묻지 않는다.
    pub fn manager(&self, no_prompt: bool) -> CommandManager<'_> {
        let prompt_enabled = !(no_prompt || self.config.no_prompt());
        let input: &dyn Input = if prompt_enabled {
            self.input.as_ref()
        } else {
            &NoPromptInput
        };

        CommandManager {
            registry: &self.registry,
            input,
            output: self.output.as_ref(),
            options: &self.options,
            prompt: PromptPolicy {
                enabled: prompt_enabled,
                timeout: self.config.prompt_timeout(),
                canceller: self.canceller.clone(),
            },
        }
    }
}
