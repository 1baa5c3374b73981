//! Preflight rules
//!
//! Pure validation of a build definition before any filesystem or repository
//! work. IO-dependent checks (entry point present, packages resolvable) live
//! in the check use case; everything here is a function of the config values
//! alone.

use std::collections::BTreeMap;

use crate::domain::entities::{CommandSpec, UNBUFFERED_ENV_NAME, UNBUFFERED_ENV_VALUE};
use crate::domain::value_objects::is_valid_name;

/// How bad a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One preflight finding
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Config area the finding belongs to (`image`, `runtime`, ...)
    pub section: String,
    pub message: String,
    pub recommendation: Option<String>,
}

impl CheckFinding {
    pub fn error(section: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            section: section.to_string(),
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn warning(section: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            section: section.to_string(),
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Env names that look like credentials
const SECRET_SUFFIXES: [&str; 4] = ["_TOKEN", "_KEY", "_SECRET", "_PASSWORD"];

/// True when the env name looks like it should carry a credential
pub fn is_secret_shaped(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    SECRET_SUFFIXES.iter().any(|suffix| upper.ends_with(suffix))
}

/// Validate image name and tag charsets
pub fn check_identity(name: &str, tag: &str) -> Vec<CheckFinding> {
    let mut findings = Vec::new();
    if !is_valid_name(name) {
        findings.push(
            CheckFinding::error("image", format!("invalid image name '{}'", name))
                .with_recommendation("use lowercase letters, digits, '.', '_' or '-'"),
        );
    }
    if !is_valid_name(tag) {
        findings.push(
            CheckFinding::error("image", format!("invalid image tag '{}'", tag))
                .with_recommendation("use lowercase letters, digits, '.', '_' or '-'"),
        );
    }
    findings
}

/// Validate the advisory exposed port
pub fn check_port(port: u16) -> Vec<CheckFinding> {
    if port == 0 {
        vec![CheckFinding::error("runtime", "exposed port must not be 0")]
    } else {
        Vec::new()
    }
}

/// Cross-check the startup command against the exposed port
///
/// The exposed port is advisory, but the command is expected to carry
/// explicit host/port flags matching it.
pub fn check_command(command: &CommandSpec, exposed_port: u16) -> Vec<CheckFinding> {
    let mut findings = Vec::new();

    match command.flag_value("--port") {
        Some(value) if value == exposed_port.to_string() => {}
        Some(value) => {
            findings.push(
                CheckFinding::error(
                    "runtime",
                    format!(
                        "command binds port {} but the exposed port is {}",
                        value, exposed_port
                    ),
                )
                .with_recommendation("align [runtime] port with the command's --port flag"),
            );
        }
        None => {
            findings.push(CheckFinding::warning(
                "runtime",
                "command has no --port flag; cannot verify it binds the exposed port",
            ));
        }
    }

    match command.flag_value("--host") {
        Some("0.0.0.0") | None => {}
        Some(host) => {
            findings.push(CheckFinding::warning(
                "runtime",
                format!("command binds host {} instead of 0.0.0.0", host),
            ));
        }
    }

    findings
}

/// Validate placeholder environment defaults
///
/// Placeholders exist so values can be supplied at run time; a secret-shaped
/// name carrying a baked-in value defeats that. The unbuffered toggle is
/// stamped by the assembler regardless of what the config says.
pub fn check_env_defaults(env: &BTreeMap<String, String>) -> Vec<CheckFinding> {
    let mut findings = Vec::new();

    for (name, value) in env {
        if name == UNBUFFERED_ENV_NAME {
            if value != UNBUFFERED_ENV_VALUE {
                findings.push(CheckFinding::warning(
                    "runtime",
                    format!(
                        "{}={} in the build definition is overridden to {} at assembly",
                        UNBUFFERED_ENV_NAME, value, UNBUFFERED_ENV_VALUE
                    ),
                ));
            }
            continue;
        }
        if is_secret_shaped(name) && !value.is_empty() {
            findings.push(
                CheckFinding::warning(
                    "runtime",
                    format!("'{}' has a value baked into the image", name),
                )
                .with_recommendation(format!("leave it empty and pass --env {}=... at run time", name)),
            );
        }
    }

    findings
}
