//! `info` 모듈: 버전/파라미터 목록 조회.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::manager::parameter_names;
use crate::application::registry::{Command, CommandModule, ExecContext};

pub const DEVCON_VERSION: &str = concat!("devcon v.", env!("CARGO_PKG_VERSION"));

pub fn module() -> CommandModule {
    CommandModule::new("info", "Information about devcon itself")
        .with_context("global")
        .with_command(Version)
        .with_command(Params)
}

struct Version;

#[async_trait]
impl Command for Version {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Shows the devcon version"
    }

    async fn exec(&self, ctx: &ExecContext<'_>, _values: &[String]) -> Result<()> {
        ctx.output.show_message(DEVCON_VERSION);
        Ok(())
    }
}

/// 등록된 모든 명령의 파라미터 이름(자동완성 후보).
struct Params;

#[async_trait]
impl Command for Params {
    fn name(&self) -> &str {
        "params"
    }

    fn description(&self) -> &str {
        "Lists every parameter name declared by any command"
    }

    async fn exec(&self, ctx: &ExecContext<'_>, _values: &[String]) -> Result<()> {
        for name in parameter_names(ctx.registry) {
            ctx.output.show_message(name);
        }
        Ok(())
    }
}
