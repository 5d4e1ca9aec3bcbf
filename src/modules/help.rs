//! `help` 모듈: 전체 도움말.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandModule, ExecContext};

pub fn module() -> CommandModule {
    CommandModule::new("help", "Shows the devcon help")
        .with_context("global")
        .with_command(Guide)
}

/// 사용법/전역 옵션/모듈 목록을 출력한다.
struct Guide;

#[async_trait]
impl Command for Guide {
    fn name(&self) -> &str {
        "guide"
    }

    fn description(&self) -> &str {
        "Shows the general help: usage, global options and available modules"
    }

    async fn exec(&self, ctx: &ExecContext<'_>, _values: &[String]) -> Result<()> {
        ctx.output
            .show_general_help(&ctx.registry.general_help(ctx.options));
        Ok(())
    }
}
