//! `legacy` 모듈: 폐기 예정 모듈 예시.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::registry::{Command, CommandModule, ExecContext};

pub fn module() -> CommandModule {
    CommandModule::new("legacy", "Old commands kept for compatibility")
        .mark_deprecated()
        .with_command(Ping)
}

struct Ping;

#[async_trait]
impl Command for Ping {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Answers pong"
    }

    async fn exec(&self, ctx: &ExecContext<'_>, _values: &[String]) -> Result<()> {
        ctx.output.show_message("pong");
        Ok(())
    }
}
