//! 파라미터 입력 포트 구현 어댑터.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex as AsyncMutex;

use crate::application::ports::Input;

/// stdin에서 한 줄씩 값을 읽는 어댑터.
pub struct StdinInput {
    reader: AsyncMutex<BufReader<Stdin>>,
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinInput {
    pub fn new() -> Self {
        Self {
            reader: AsyncMutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

#[async_trait]
impl Input for StdinInput {
    async fn prompt_for_argument(&self, name: &str) -> Result<Option<String>> {
        eprint!("Please introduce value for missing param {name}: ");
        io::stderr().flush()?;

        let mut line = String::new();
        let read = self.reader.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// 묻지 않고 항상 입력 종료로 응답하는 어댑터(`-np`, 비대화형 실행용).
pub struct NoPromptInput;

#[async_trait]
impl Input for NoPromptInput {
    async fn prompt_for_argument(&self, _name: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// 미리 정해 둔 응답을 순서대로 돌려주는 어댑터(스크립트/라이브러리 호출용).
/// 응답이 소진되면 입력 종료로 처리한다.
#[derive(Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// 지금까지 질문된 파라미터 이름(질문 순서).
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Input for ScriptedInput {
    async fn prompt_for_argument(&self, name: &str) -> Result<Option<String>> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(name.to_string());
        }
        Ok(self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_input_answers_in_order_then_ends() {
        let input = ScriptedInput::new(["dev", "3"]);
        assert_eq!(input.prompt_for_argument("branch").await.unwrap().as_deref(), Some("dev"));
        assert_eq!(input.prompt_for_argument("depth").await.unwrap().as_deref(), Some("3"));
        assert_eq!(input.prompt_for_argument("extra").await.unwrap(), None);
        assert_eq!(input.asked(), vec!["branch", "depth", "extra"]);
    }

    #[tokio::test]
    async fn no_prompt_input_always_ends() {
        assert_eq!(NoPromptInput.prompt_for_argument("branch").await.unwrap(), None);
    }
}
