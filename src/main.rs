//! `devcon` 바이너리 진입점.

use devcon::DEVCON_BANNER;
use devcon::domain::command::{CommandResult, DispatchOutcome};
use devcon::interface::cli::{AppComposition, Cli, CliAction};
use devcon::modules::DEVCON_VERSION;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let composition = AppComposition::load();

    let request = match Cli::parse_action(composition.global_options(), std::env::args_os()) {
        Ok(request) => request,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    // 입력 대기 중의 Ctrl-C는 대기만 취소하고, 그 밖에는 프로세스를 끝낸다.
    let canceller = composition.canceller();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if canceller.is_prompt_pending() {
                canceller.cancel();
            } else {
                std::process::exit(130);
            }
        }
    });

    let output = composition.output();
    output.show_message(DEVCON_BANNER);

    let manager = composition.manager(request.no_prompt);
    let dispatched = match request.action {
        CliAction::Version => {
            output.show_message(DEVCON_VERSION);
            Ok(DispatchOutcome::ok())
        }
        CliAction::GeneralHelp => manager.show_main_help().await,
        CliAction::Dispatch(sentence) => match manager.exec_cmd_line(&sentence).await {
            // 모듈을 찾지 못하면 전체 도움말을 이어서 보여 준다.
            Ok(outcome) if outcome.result == CommandResult::ModuleNotRecognized => {
                manager.show_main_help().await.map(|_| outcome)
            }
            other => other,
        },
    };

    match dispatched {
        Ok(outcome) if outcome.result.is_ok() => {}
        Ok(outcome) => {
            tracing::debug!(result = %outcome.result, detail = %outcome.detail, "dispatch rejected");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
