//! 콘솔 출력 포트 구현 어댑터.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use crate::application::ports::Output;
use crate::domain::command::ParameterKind;
use crate::domain::help::{CommandHelp, GeneralHelp, ModuleHelp};

/// 콘솔 전용 출력 어댑터.
pub struct ConsoleOutput {
    interactive: bool,
    /// 줄바꿈 없이 덮어쓰는 상태 줄이 열려 있는지 여부.
    status_open: Mutex<bool>,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleOutput {
    /// stdout이 TTY일 때만 색상/제자리 상태 줄을 사용한다.
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
            status_open: Mutex::new(false),
        }
    }

    /// 열린 상태 줄을 닫아 다음 출력이 새 줄에서 시작되도록 한다.
    fn close_status(&self) {
        if let Ok(mut open) = self.status_open.lock()
            && *open
        {
            println!();
            *open = false;
        }
    }

    fn print_lines(&self, lines: &[String]) {
        self.close_status();
        for line in lines {
            println!("{line}");
        }
    }
}

impl Output for ConsoleOutput {
    fn show_message(&self, message: &str) {
        self.close_status();
        println!("{message}");
    }

    fn show_error(&self, message: &str) {
        self.close_status();
        eprintln!("{}", paint(message, "31", self.interactive));
    }

    fn status(&self, message: &str) {
        if !self.interactive {
            println!("{message}");
            return;
        }

        let mut out = io::stdout();
        let _ = write!(out, "\r\x1b[K{message}");
        let _ = out.flush();
        if let Ok(mut open) = self.status_open.lock() {
            *open = true;
        }
    }

    fn status_in_new_line(&self, message: &str) {
        self.close_status();
        if !self.interactive {
            println!("{message}");
            return;
        }

        let mut out = io::stdout();
        let _ = write!(out, "{message}");
        let _ = out.flush();
        if let Ok(mut open) = self.status_open.lock() {
            *open = true;
        }
    }

    fn success(&self, message: &str) {
        self.close_status();
        println!("{}", paint(message, "32", self.interactive));
    }

    fn show_command_help(&self, help: &CommandHelp) {
        self.print_lines(&render_command_help(help));
    }

    fn show_module_help(&self, help: &ModuleHelp) {
        self.print_lines(&render_module_help(help));
    }

    fn show_general_help(&self, help: &GeneralHelp) {
        self.print_lines(&render_general_help(help));
    }
}

pub(crate) fn render_command_help(help: &CommandHelp) -> Vec<String> {
    let mut usage = format!("usage: devcon {} {}", help.module, help.name);
    for param in &help.parameters {
        match param.kind {
            ParameterKind::Mandatory => usage.push_str(&format!(" --{} <value>", param.name)),
            ParameterKind::Optional => usage.push_str(&format!(" [--{} <value>]", param.name)),
        }
    }

    let mut lines = vec![usage, help.description.clone()];
    if !help.parameters.is_empty() {
        lines.push(String::new());
        lines.push("Parameters:".to_string());
        for param in &help.parameters {
            let kind = match param.kind {
                ParameterKind::Mandatory => "mandatory",
                ParameterKind::Optional => "optional",
            };
            lines.push(format!(
                "  --{:<16} {:<10} {}",
                param.name, kind, param.description
            ));
        }
    }
    lines
}

pub(crate) fn render_module_help(help: &ModuleHelp) -> Vec<String> {
    let mut lines = vec![
        format!("usage: devcon {} <command> [--<parameter> <value> ...]", help.name),
        help.description.clone(),
    ];
    if !help.context.is_empty() {
        lines.push(format!("Context: {}", help.context));
    }
    if help.deprecated {
        lines.push("(deprecated)".to_string());
    }
    lines.push(String::new());
    lines.push(format!("Available commands for module: {}", help.name));
    for (name, description) in &help.commands {
        lines.push(format!("> {:<16} {}", name, description));
    }
    lines
}

pub(crate) fn render_general_help(help: &GeneralHelp) -> Vec<String> {
    let mut lines = vec![format!("usage: {}", help.usage)];

    if !help.options.is_empty() {
        lines.push(String::new());
        lines.push("Global options:".to_string());
        for option in &help.options {
            let mut flags = option.display_flags();
            if option.has_arg {
                flags.push_str(" <arg>");
            }
            lines.push(format!(
                "  {:<20} {}",
                flags,
                option.description.as_deref().unwrap_or("").trim()
            ));
        }
    }

    lines.push(String::new());
    lines.push(help.header.clone());
    for (name, description) in &help.modules {
        lines.push(format!("  {:<16} {}", name, description));
    }

    if !help.footer.is_empty() {
        lines.push(String::new());
        lines.push(help.footer.clone());
    }
    lines
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::help::ParameterHelp;
    use crate::domain::options::GlobalOption;

    #[test]
    fn command_help_marks_optional_parameters() {
        let help = CommandHelp {
            module: "git".to_string(),
            name: "clone".to_string(),
            description: "Clone a repository".to_string(),
            parameters: vec![
                ParameterHelp {
                    name: "url".to_string(),
                    kind: ParameterKind::Mandatory,
                    description: "repository url".to_string(),
                },
                ParameterHelp {
                    name: "branch".to_string(),
                    kind: ParameterKind::Optional,
                    description: "branch".to_string(),
                },
            ],
        };

        let lines = render_command_help(&help);
        assert_eq!(
            lines[0],
            "usage: devcon git clone --url <value> [--branch <value>]"
        );
        assert!(lines.iter().any(|l| l.contains("--url") && l.contains("mandatory")));
        assert!(lines.iter().any(|l| l.contains("--branch") && l.contains("optional")));
    }

    #[test]
    fn module_help_lists_commands() {
        let help = ModuleHelp {
            name: "foo".to_string(),
            description: "Sample commands".to_string(),
            context: "samples".to_string(),
            deprecated: true,
            commands: vec![("greet".to_string(), "Say hello".to_string())],
        };

        let lines = render_module_help(&help);
        assert!(lines.contains(&"Context: samples".to_string()));
        assert!(lines.contains(&"(deprecated)".to_string()));
        assert!(lines.contains(&"Available commands for module: foo".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("> greet")));
    }

    #[test]
    fn general_help_shows_options_and_modules() {
        let help = GeneralHelp {
            usage: "devcon <module> <command>".to_string(),
            header: "Available modules:".to_string(),
            options: vec![GlobalOption::new("p", Some("profile"), true, "profile name")],
            modules: vec![("help".to_string(), "Help".to_string())],
            footer: String::new(),
        };

        let lines = render_general_help(&help);
        assert_eq!(lines[0], "usage: devcon <module> <command>");
        assert!(lines.iter().any(|l| l.contains("-p, --profile <arg>")));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("help")));
    }
}
