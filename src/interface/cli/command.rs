//! CLI 인자 파싱 모듈.
//!
//! 전역 옵션은 설정 파일에서 오므로 clap 명령을 런타임에 조립한다.
//! 첫 단어(모듈) 이후의 인자는 모두 문장(Sentence) 토큰으로 넘긴다.

use std::collections::HashSet;
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};
use tracing::warn;

use crate::domain::options::{GlobalOption, HELP_OPTION, NO_PROMPT_OPTION, VERSION_OPTION};
use crate::domain::sentence::Sentence;

const WORDS: &str = "words";

pub enum CliAction {
    Version,
    GeneralHelp,
    Dispatch(Sentence),
}

pub struct CliRequest {
    pub action: CliAction,
    /// 누락된 선택 파라미터를 묻지 않는다.
    pub no_prompt: bool,
}

pub struct Cli;

impl Cli {
    /// 전역 옵션으로 clap 명령을 조립한다.
    /// 키/짧은 이름/긴 이름이 겹치는 옵션은 기록 후 제외한다.
    pub fn command(options: &[GlobalOption]) -> clap::Command {
        let mut cmd = clap::Command::new("devcon")
            .about("Pluggable command line dispatcher")
            .override_usage("devcon [OPTIONS] <module> [<command>] [--<parameter> <value> ...]")
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(
                Arg::new(WORDS)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true)
                    .value_name("MODULE COMMAND PARAMS"),
            );

        for option in accepted_options(options) {
            cmd = cmd.arg(build_arg(option));
        }
        cmd
    }

    /// OS 인자를 그대로 받는다. UTF-8이 아닌 단어는 clap 파싱 오류가 된다.
    pub fn parse_action<I, T>(options: &[GlobalOption], args: I) -> Result<CliRequest, String>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let accepted = accepted_options(options);
        let args = normalize_args(&accepted, args.into_iter().map(Into::into).collect());
        let matches = Self::command(options)
            .try_get_matches_from(args)
            .map_err(|err| err.to_string())?;

        let is_set = |key: &str| {
            accepted.iter().any(|o| o.key() == Some(key))
                && matches.value_source(key) == Some(ValueSource::CommandLine)
        };
        let no_prompt = is_set(NO_PROMPT_OPTION);

        let action = if is_set(HELP_OPTION) {
            CliAction::GeneralHelp
        } else if is_set(VERSION_OPTION) {
            CliAction::Version
        } else {
            let words = collect_words(&matches);
            if words.is_empty() {
                CliAction::GeneralHelp
            } else {
                let sentence =
                    Sentence::from_words(words.as_slice()).map_err(|err| err.to_string())?;
                CliAction::Dispatch(sentence)
            }
        };

        Ok(CliRequest { action, no_prompt })
    }
}

fn collect_words(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>(WORDS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn accepted_options(options: &[GlobalOption]) -> Vec<&GlobalOption> {
    let mut keys = HashSet::from([WORDS.to_string()]);
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();
    let mut accepted = Vec::new();

    for option in options {
        let Some(key) = option.key() else {
            continue;
        };
        let (short, long_names) = flag_names(option);

        let clash = keys.contains(key)
            || short.is_some_and(|c| shorts.contains(&c))
            || long_names.iter().any(|l| longs.contains(l));
        if clash {
            warn!(option = key, "global option clashes with an earlier one, skipped");
            continue;
        }

        keys.insert(key.to_string());
        shorts.extend(short);
        longs.extend(long_names);
        accepted.push(option);
    }
    accepted
}

/// 한 글자 `opt`는 짧은 옵션, 여러 글자 `opt`(`-np`)는 긴 이름(`--np`)으로 등록한다.
fn flag_names(option: &GlobalOption) -> (Option<char>, Vec<String>) {
    let mut short = None;
    let mut longs = Vec::new();

    if let Some(opt) = trimmed(option.opt.as_deref()) {
        let mut chars = opt.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => short = Some(c),
            _ => longs.push(opt.to_string()),
        }
    }
    if let Some(long) = trimmed(option.long_opt.as_deref()) {
        longs.push(long.to_string());
    }
    (short, longs)
}

fn build_arg(option: &GlobalOption) -> Arg {
    let key = option.key().unwrap_or_default().to_string();
    let (short, longs) = flag_names(option);

    let mut arg = Arg::new(key).help(
        trimmed(option.description.as_deref())
            .unwrap_or_default()
            .to_string(),
    );
    if let Some(c) = short {
        arg = arg.short(c);
    }
    let mut longs = longs.into_iter();
    if let Some(primary) = longs.next() {
        arg = arg.long(primary);
    }
    for alias in longs {
        arg = arg.alias(alias);
    }

    if option.has_arg {
        arg.action(ArgAction::Set).value_name("ARG")
    } else {
        arg.action(ArgAction::SetTrue)
    }
}

/// 모듈 이전의 `-np` 같은 여러 글자 단일 대시 옵션을 `--np`로 바꾼다.
fn normalize_args(options: &[&GlobalOption], args: Vec<OsString>) -> Vec<OsString> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    out.extend(iter.next());

    while let Some(arg) = iter.next() {
        // UTF-8이 아닌 단어는 옵션일 수 없으므로 모듈 이후 단어로 취급한다.
        let Some(flag) = arg.to_str().filter(|a| a.starts_with('-')) else {
            out.push(arg);
            break;
        };

        let matched = options.iter().find(|o| {
            let (short, longs) = flag_names(o);
            short.is_some_and(|c| flag == format!("-{c}"))
                || longs
                    .iter()
                    .any(|l| flag == format!("--{l}") || flag == format!("-{l}"))
        });

        let takes_value = matched.is_some_and(|o| o.has_arg);
        match matched.map(|o| flag_names(o).1) {
            Some(longs) if longs.iter().any(|l| flag == format!("-{l}")) => {
                out.push(OsString::from(format!("-{flag}")));
            }
            _ => out.push(arg),
        }
        if takes_value {
            out.extend(iter.next());
        }
    }

    out.extend(iter);
    out
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::default_global_options;

    fn parse(args: &[&str]) -> Result<CliRequest, String> {
        let mut argv = vec!["devcon"];
        argv.extend_from_slice(args);
        Cli::parse_action(&default_global_options(), argv)
    }

    #[test]
    fn no_words_means_general_help() {
        let request = parse(&[]).unwrap();
        assert!(matches!(request.action, CliAction::GeneralHelp));
        assert!(!request.no_prompt);
    }

    #[test]
    fn help_and_version_flags() {
        assert!(matches!(parse(&["-h"]).unwrap().action, CliAction::GeneralHelp));
        assert!(matches!(parse(&["--help"]).unwrap().action, CliAction::GeneralHelp));
        assert!(matches!(parse(&["-v"]).unwrap().action, CliAction::Version));
        assert!(matches!(parse(&["--version"]).unwrap().action, CliAction::Version));
    }

    #[test]
    fn words_become_a_sentence() {
        let request = parse(&["-np", "foo", "greet", "--name", "Ana", "-h"]).unwrap();
        assert!(request.no_prompt);

        let CliAction::Dispatch(sentence) = request.action else {
            panic!("expected dispatch");
        };
        assert_eq!(sentence.module_name, "foo");
        assert_eq!(sentence.command_name.as_deref(), Some("greet"));
        assert!(sentence.help_requested);
        assert_eq!(sentence.supplied_value("name"), Some("Ana"));
    }

    #[test]
    fn options_after_the_module_are_not_global() {
        let request = parse(&["foo", "-v"]).unwrap();
        let CliAction::Dispatch(sentence) = request.action else {
            panic!("expected dispatch");
        };
        assert_eq!(sentence.module_name, "foo");
    }

    #[test]
    fn malformed_sentence_is_an_error() {
        assert!(parse(&["foo", "greet", "--name"]).is_err());
        assert!(parse(&["--unknown"]).is_err());
    }

    #[test]
    fn file_defined_option_with_argument() {
        let mut options = default_global_options();
        options.push(GlobalOption::new("p", Some("profile"), true, "profile name"));

        let request =
            Cli::parse_action(&options, ["devcon", "-p", "dev", "info", "version"]).unwrap();
        let CliAction::Dispatch(sentence) = request.action else {
            panic!("expected dispatch");
        };
        assert_eq!(sentence.module_name, "info");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_words_are_a_parse_error() {
        use std::os::unix::ffi::OsStringExt;

        let argv = vec![
            OsString::from("devcon"),
            OsString::from("foo"),
            OsString::from("greet"),
            OsString::from("--name"),
            OsString::from_vec(b"A\xff".to_vec()),
        ];
        assert!(Cli::parse_action(&default_global_options(), argv).is_err());

        let argv = vec![OsString::from("devcon"), OsString::from_vec(b"f\xffoo".to_vec())];
        assert!(Cli::parse_action(&default_global_options(), argv).is_err());
    }

    #[test]
    fn clashing_options_are_dropped() {
        let mut options = default_global_options();
        options.push(GlobalOption::new("h", Some("host"), false, "clashes on -h"));
        options.push(GlobalOption::new("x", Some("help"), false, "clashes on --help"));

        let accepted = accepted_options(&options);
        assert_eq!(accepted.len(), 3);
        Cli::command(&options).debug_assert();
    }
}
