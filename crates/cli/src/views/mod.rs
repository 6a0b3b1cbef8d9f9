//! Терминальные экраны
//!
//! Ввод идёт через trait `Prompt`, чтобы сценарии регистрации можно было
//! прогонять в тестах без терминала.

pub mod landing;
pub mod registration;

pub use landing::LandingView;
pub use registration::RegistrationView;

use console::style;
use domain::HospitalField;
use std::io::{self, BufRead, Write};

/// Источник ответов на вопросы формы и приёмник сообщений
pub trait Prompt {
    /// Спросить значение поля; `current` - предыдущий ответ (при повторе)
    fn ask(&mut self, field: HospitalField, hint: Option<&str>, current: &str) -> io::Result<String>;

    /// Сообщение об ошибке, которую пользователь может исправить
    fn report_error(&mut self, message: &str) -> io::Result<()>;

    fn report_success(&mut self, message: &str) -> io::Result<()>;
}

/// Prompt поверх stdin/stdout
pub struct TerminalPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, field: HospitalField, hint: Option<&str>, current: &str) -> io::Result<String> {
        let marker = if field.is_mandatory() {
            style("*").red().bold().to_string()
        } else {
            " ".to_string()
        };
        write!(self.output, "{marker} {}", style(field.label()).bold())?;
        if let Some(hint) = hint {
            write!(self.output, " {}", style(format!("[{hint}]")).dim())?;
        }
        if !current.is_empty() {
            write!(self.output, " {}", style(format!("(was: {current})")).dim())?;
        }
        write!(self.output, ": ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the form was completed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn report_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{} {}",
            style("[!]").red().bold(),
            style(message).red()
        )
    }

    fn report_success(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{} {}",
            style("[✓]").green().bold(),
            style(message).bright()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_prompt_reads_lines_and_detects_eof() {
        let input = io::Cursor::new("Metropolis\r\n");
        let mut output = Vec::new();
        let mut prompt = TerminalPrompt::new(input, &mut output);

        assert_eq!(
            prompt.ask(HospitalField::City, None, "").unwrap(),
            "Metropolis"
        );
        let eof = prompt.ask(HospitalField::State, None, "").unwrap_err();
        assert_eq!(eof.kind(), io::ErrorKind::UnexpectedEof);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("City"));
    }
}
