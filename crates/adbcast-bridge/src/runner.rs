//! Child process invocation
//!
//! [`CommandRunner`] is the seam between the session logic and the operating
//! system. Production code uses [`TokioCommandRunner`]; tests script a fake.

use std::path::Path;
use std::process::Stdio;

use adbcast_core::prelude::*;
use tokio::process::Command;

/// Captured output of a successful child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs a program to completion
///
/// Implementations must report a non-zero exit status as an error; there is
/// no timeout and no cancellation.
#[trait_variant::make(CommandRunner: Send)]
pub trait LocalCommandRunner {
    async fn run(&self, program: &Path, args: &[String], cwd: &Path) -> Result<ProcessOutput>;
}

/// Runner backed by `tokio::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &Path, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        debug!("Running {} {:?} in {}", program.display(), args, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::bridge_not_found(program)
                } else {
                    Error::process_spawn(format!("{}: {}", program.display(), e))
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!("{} stdout: {}", program.display(), stdout);
        if !stderr.is_empty() {
            debug!("{} stderr: {}", program.display(), stderr);
        }

        if !output.status.success() {
            warn!(
                "{} exited with code {:?}",
                program.display(),
                output.status.code()
            );
            return Err(Error::process_exit(
                output.status.code(),
                stderr.trim().to_string(),
            ));
        }

        Ok(ProcessOutput { stdout, stderr })
    }
}

/// Tokenize a command string the way a plain (non-shell) command runner does
///
/// Splits on runs of spaces. A token ending in a backslash is joined with the
/// next token by a single literal space, the backslash dropped. Quotes are
/// not interpreted; they reach the program verbatim.
pub fn split_command_line(command: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for token in command.trim().split(' ').filter(|t| !t.is_empty()) {
        match tokens.last_mut() {
            Some(previous) if previous.ends_with('\\') => {
                previous.pop();
                previous.push(' ');
                previous.push_str(token);
            }
            _ => tokens.push(token.to_string()),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_command_line("devices"), vec!["devices"]);
        assert_eq!(
            split_command_line("-s EMU001 shell"),
            vec!["-s", "EMU001", "shell"]
        );
    }

    #[test]
    fn test_split_collapses_repeated_spaces() {
        assert_eq!(split_command_line("  a   b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_split_keeps_quotes_verbatim() {
        assert_eq!(
            split_command_line(r#"-a "android.intent.action.VIEW" --es EAN "hello%sworld""#),
            vec![
                "-a",
                "\"android.intent.action.VIEW\"",
                "--es",
                "EAN",
                "\"hello%sworld\""
            ]
        );
    }

    #[test]
    fn test_split_backslash_escapes_space() {
        assert_eq!(split_command_line(r"a\ b c"), vec!["a b", "c"]);
    }

    #[test]
    fn test_split_unreplaced_spaces_split_message() {
        // Only the first space of a message is replaced by the placeholder
        assert_eq!(
            split_command_line(r#""one%stwo three""#),
            vec!["\"one%stwo", "three\""]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_command_line("   ").is_empty());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_tokio_runner_missing_program() {
        let runner = TokioCommandRunner;
        let result = CommandRunner::run(
            &runner,
            Path::new("/definitely/not/here/adb"),
            &["devices".to_string()],
            Path::new("/"),
        )
        .await;
        assert!(matches!(result, Err(Error::BridgeNotFound { .. })));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_tokio_runner_captures_stdout() {
        let runner = TokioCommandRunner;
        let output = CommandRunner::run(
            &runner,
            Path::new("/bin/sh"),
            &["-c".to_string(), "echo hello".to_string()],
            Path::new("/"),
        )
        .await;
        assert!(output.is_ok());
        assert_eq!(output.unwrap().stdout.trim(), "hello");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_tokio_runner_non_zero_exit_is_error() {
        let runner = TokioCommandRunner;
        let result = CommandRunner::run(
            &runner,
            Path::new("/bin/sh"),
            &["-c".to_string(), "echo boom >&2; exit 3".to_string()],
            Path::new("/"),
        )
        .await;
        match result {
            Err(Error::ProcessExit { code, stderr }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected ProcessExit, got {:?}", other),
        }
    }
}
