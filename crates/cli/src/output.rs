use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use shiftopt::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Shell words for `eval set -- "$(shiftopt ...)"`
    #[default]
    Shell,
    /// One element per line, program name included
    Lines,
    /// JSON object with program, options and positionals
    Json,
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub program: &'a str,
    pub options: &'a [String],
    pub positionals: &'a [String],
}

impl<'a> From<&'a Args> for Report<'a> {
    fn from(args: &'a Args) -> Self {
        Self {
            program: args.program(),
            options: args.options(),
            positionals: args.positionals(),
        }
    }
}

pub fn render(args: &Args, format: Format) -> Result<String> {
    let out = match format {
        Format::Shell => {
            let words: Vec<String> = args.iter().skip(1).map(|w| shell_quote(w)).collect();
            format!(" {}", words.join(" "))
        }
        Format::Lines => args.join("\n"),
        Format::Json => serde_json::to_string_pretty(&Report::from(args))
            .context("failed to serialize arguments")?,
    };
    Ok(out)
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quote `word` for POSIX sh; words made of safe characters pass unchanged.
pub fn shell_quote(word: &str) -> String {
    if !word.is_empty() && word.chars().all(is_shell_safe) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r#"'\''"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting() {
        assert_eq!(shell_quote("-a"), "-a");
        assert_eq!(shell_quote("/etc"), "/etc");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("it's"), r#"'it'\''s'"#);
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
    }

    #[test]
    fn shell_format_skips_program_name() {
        let args = shiftopt::getopt(&["ls", "-al", "my dir"], "al", "").unwrap();
        assert_eq!(render(&args, Format::Shell).unwrap(), " -a -l -- 'my dir'");
    }

    #[test]
    fn lines_format_keeps_everything() {
        let args = shiftopt::getopt(&["ls", "-a", "x"], "a", "").unwrap();
        assert_eq!(render(&args, Format::Lines).unwrap(), "ls\n-a\n--\nx");
    }

    #[test]
    fn json_format_splits_segments() {
        let args = shiftopt::getopt(&["ls", "--size=3", "x"], "", "size::").unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render(&args, Format::Json).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "program": "ls",
                "options": ["--size", "3"],
                "positionals": ["x"],
            })
        );
    }
}
