//! 사용자 호출 한 건을 파싱한 문장(Sentence) 모델.

use anyhow::{Result, bail};

/// `<module> [<command>] [--name value ...]` 형태의 파싱 결과.
///
/// 입력된 파라미터 이름은 검증하지 않는다. 선언 여부/중복 판정은 디스패처가 담당한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub module_name: String,
    pub command_name: Option<String>,
    pub help_requested: bool,
    pub supplied_params: Vec<(String, String)>,
}

impl Sentence {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            ..Self::default()
        }
    }

    pub fn with_command(mut self, command_name: impl Into<String>) -> Self {
        self.command_name = Some(command_name.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.supplied_params.push((name.into(), value.into()));
        self
    }

    pub fn with_help(mut self) -> Self {
        self.help_requested = true;
        self
    }

    /// 토큰 목록을 문장으로 변환한다.
    /// - 첫 단어는 모듈, 두 번째 단어가 `-`로 시작하지 않으면 명령이다.
    /// - `-h`/`--help`는 도움말 요청 플래그다.
    /// - `--name value`, `--name=value`, `-name value` 모두 허용한다.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let mut iter = words.iter().map(AsRef::as_ref).peekable();

        let Some(module) = iter.next() else {
            bail!("module name is missing");
        };
        if module.starts_with('-') {
            bail!("expected a module name, found option: {module}");
        }

        let mut sentence = Sentence::new(module);
        if let Some(next) = iter.peek()
            && !next.starts_with('-')
        {
            sentence.command_name = iter.next().map(ToString::to_string);
        }

        while let Some(word) = iter.next() {
            if word == "-h" || word == "--help" {
                sentence.help_requested = true;
                continue;
            }

            let Some(flag) = word.strip_prefix('-') else {
                bail!("unexpected argument: {word} (parameters are given as --name value)");
            };
            let flag = flag.strip_prefix('-').unwrap_or(flag);
            if flag.is_empty() {
                bail!("empty parameter name: {word}");
            }

            if let Some((name, value)) = flag.split_once('=') {
                if name.is_empty() {
                    bail!("empty parameter name: {word}");
                }
                sentence.supplied_params.push((name.to_string(), value.to_string()));
                continue;
            }

            match iter.next_if(|next| !is_parameter_word(next)) {
                Some(value) => sentence
                    .supplied_params
                    .push((flag.to_string(), value.to_string())),
                None => bail!(
                    "missing value for parameter: {word} \
                     (use {word}=<value> for values starting with '-')"
                ),
            }
        }

        Ok(sentence)
    }

    /// 이름으로 값을 찾는다. 같은 이름이 여러 번 입력되면 마지막 값이 이긴다.
    pub fn supplied_value(&self, name: &str) -> Option<&str> {
        self.supplied_params
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// 파라미터 이름 단어인지 판정한다. 음수(`-5`, `-.5`)와 단독 `-`는 값으로 본다.
fn is_parameter_word(word: &str) -> bool {
    let Some(rest) = word.strip_prefix('-') else {
        return false;
    };
    !(rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_command_and_params() {
        let sentence =
            Sentence::from_words(&["git", "clone", "--url", "repo.git", "-branch", "dev"]).unwrap();
        assert_eq!(sentence.module_name, "git");
        assert_eq!(sentence.command_name.as_deref(), Some("clone"));
        assert!(!sentence.help_requested);
        assert_eq!(
            sentence.supplied_params,
            vec![
                ("url".to_string(), "repo.git".to_string()),
                ("branch".to_string(), "dev".to_string()),
            ]
        );
    }

    #[test]
    fn module_only_has_no_command() {
        let sentence = Sentence::from_words(&["git"]).unwrap();
        assert_eq!(sentence.command_name, None);
        assert!(sentence.supplied_params.is_empty());
    }

    #[test]
    fn help_flag_is_recognized_anywhere_after_module() {
        let sentence = Sentence::from_words(&["git", "--help"]).unwrap();
        assert!(sentence.help_requested);
        assert_eq!(sentence.command_name, None);

        let sentence = Sentence::from_words(&["git", "clone", "-h"]).unwrap();
        assert!(sentence.help_requested);
        assert_eq!(sentence.command_name.as_deref(), Some("clone"));
    }

    #[test]
    fn inline_values_are_split_on_first_equals() {
        let sentence = Sentence::from_words(&["foo", "echo", "--text=a=b"]).unwrap();
        assert_eq!(sentence.supplied_value("text"), Some("a=b"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Sentence::from_words::<&str>(&[]).is_err());
        assert!(Sentence::from_words(&["--help"]).is_err());
        assert!(Sentence::from_words(&["git", "clone", "stray"]).is_err());
        assert!(Sentence::from_words(&["git", "clone", "--url"]).is_err());
        assert!(Sentence::from_words(&["git", "clone", "--url", "--branch", "x"]).is_err());
        assert!(Sentence::from_words(&["git", "clone", "--=x"]).is_err());
    }

    #[test]
    fn negative_numbers_and_dash_are_values() {
        let sentence =
            Sentence::from_words(&["log", "tail", "--offset", "-5", "--file", "-"]).unwrap();
        assert_eq!(sentence.supplied_value("offset"), Some("-5"));
        assert_eq!(sentence.supplied_value("file"), Some("-"));

        let sentence = Sentence::from_words(&["log", "tail", "--pattern=-v"]).unwrap();
        assert_eq!(sentence.supplied_value("pattern"), Some("-v"));
    }

    #[test]
    fn dash_value_error_suggests_inline_form() {
        let err = Sentence::from_words(&["log", "tail", "--pattern", "-v"]).unwrap_err();
        assert!(err.to_string().contains("--pattern=<value>"));
    }

    #[test]
    fn last_duplicate_value_wins() {
        let sentence = Sentence::new("git")
            .with_command("clone")
            .with_param("url", "a")
            .with_param("url", "b");
        assert_eq!(sentence.supplied_value("url"), Some("b"));
        assert_eq!(sentence.supplied_params.len(), 2);
    }
}
