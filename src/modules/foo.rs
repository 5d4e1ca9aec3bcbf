//! `foo` 모듈: 필수/선택 파라미터 처리를 보여 주는 예제 명령.

use anyhow::Result;
use async_trait::async_trait;

use super::value_at;
use crate::application::registry::{Command, CommandModule, ExecContext};
use crate::domain::command::CommandParameter;

pub fn module() -> CommandModule {
    CommandModule::new("foo", "Sample commands")
        .with_context("samples")
        .with_command(Greet)
        .with_command(Echo)
}

const GREET_PARAMS: &[CommandParameter] = &[
    CommandParameter::mandatory("name", "who to greet"),
    CommandParameter::optional("salutation", "greeting word, e.g. Hello"),
];

struct Greet;

#[async_trait]
impl Command for Greet {
    fn name(&self) -> &str {
        "greet"
    }

    fn description(&self) -> &str {
        "Greets someone"
    }

    fn defined_parameters(&self) -> &[CommandParameter] {
        GREET_PARAMS
    }

    async fn exec(&self, ctx: &ExecContext<'_>, values: &[String]) -> Result<()> {
        let name = value_at(values, 0);
        let salutation = match value_at(values, 1) {
            "" => "Hello",
            other => other,
        };
        ctx.output.success(&format!("{salutation}, {name}!"));
        Ok(())
    }
}

const ECHO_PARAMS: &[CommandParameter] = &[CommandParameter::mandatory("text", "text to print")];

struct Echo;

#[async_trait]
impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Prints the given text"
    }

    fn defined_parameters(&self) -> &[CommandParameter] {
        ECHO_PARAMS
    }

    async fn exec(&self, ctx: &ExecContext<'_>, values: &[String]) -> Result<()> {
        ctx.output.show_message(value_at(values, 0));
        Ok(())
    }
}
