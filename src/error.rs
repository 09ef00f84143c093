use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::option::DrafterOption;

/// Everything that can go wrong while building or running a drafter command.
///
/// Each variant carries the raw diagnostic text it was produced from, so
/// callers can match on the kind of failure instead of inspecting message
/// substrings.
#[derive(Debug)]
pub enum DrafterError {
    /// The executable could not be spawned (missing file, not executable, ...).
    Launch { program: PathBuf, source: io::Error },
    /// `run` was called without an input argument, and no option that makes
    /// one unnecessary was set. Nothing was spawned.
    InputMissing,
    /// drafter ran but exited unsuccessfully. `stderr` is kept verbatim.
    ExternalTool { status: Option<i32>, stderr: String },
    /// The child was spawned but talking to it over stdio failed.
    Io {
        context: &'static str,
        source: io::Error,
    },
    /// An option name outside the set drafter recognizes.
    UnknownOption {
        name: String,
        suggestion: Option<DrafterOption>,
    },
}

impl fmt::Display for DrafterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrafterError::Launch { program, source } => {
                if source.kind() == io::ErrorKind::NotFound {
                    write!(f, "{}: command not found", program.display())
                } else {
                    write!(f, "{}: {source}", program.display())
                }
            }
            DrafterError::InputMissing => f.write_str("Input argument missing"),
            DrafterError::ExternalTool { status, stderr } => {
                let stderr = stderr.trim_end();
                if !stderr.is_empty() {
                    f.write_str(stderr)
                } else if let Some(code) = status {
                    write!(f, "drafter exited with status {code}")
                } else {
                    f.write_str("drafter was terminated by a signal")
                }
            }
            DrafterError::Io { context, source } => write!(f, "{context}: {source}"),
            DrafterError::UnknownOption { name, .. } => {
                write!(f, "unrecognized drafter option `{name}`")
            }
        }
    }
}

impl std::error::Error for DrafterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrafterError::Launch { source, .. } | DrafterError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl miette::Diagnostic for DrafterError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            DrafterError::Launch { .. } => "drafter::launch",
            DrafterError::InputMissing => "drafter::input_missing",
            DrafterError::ExternalTool { .. } => "drafter::external_tool",
            DrafterError::Io { .. } => "drafter::io",
            DrafterError::UnknownOption { .. } => "drafter::unknown_option",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            DrafterError::Launch { .. } => Some(Box::new(
                "install drafter, or point DRAFTER_BIN at the binary",
            )),
            DrafterError::InputMissing => Some(Box::new(
                "pass an API Blueprint file, or `-` to read from stdin",
            )),
            DrafterError::UnknownOption {
                suggestion: Some(option),
                ..
            } => Some(Box::new(format!("did you mean `{option}`?"))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_reads_as_command_not_found() {
        let err = DrafterError::Launch {
            program: PathBuf::from("INVALID"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "INVALID: command not found");
    }

    #[test]
    fn other_launch_failures_keep_the_io_message() {
        let err = DrafterError::Launch {
            program: PathBuf::from("/etc/passwd"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        assert_eq!(err.to_string(), "/etc/passwd: Permission denied");
    }

    #[test]
    fn tool_failure_shows_trimmed_stderr() {
        let err = DrafterError::ExternalTool {
            status: Some(1),
            stderr: "fatal: unable to open file 'INVALID'\n".to_string(),
        };
        assert_eq!(err.to_string(), "fatal: unable to open file 'INVALID'");
    }

    #[test]
    fn silent_tool_failure_reports_status() {
        let err = DrafterError::ExternalTool {
            status: Some(3),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "drafter exited with status 3");
    }

    #[test]
    fn unknown_option_help_names_suggestion() {
        use miette::Diagnostic;

        let err = DrafterError::UnknownOption {
            name: "--sourcemapp".to_string(),
            suggestion: Some(DrafterOption::Sourcemap),
        };
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("did you mean `--sourcemap`?"));
    }
}
