//! CLI mode dispatch
//!
//! One invocation is one submission:
//! - resolve and validate config
//! - build the orchestrator
//! - read the input (args, stdin, or a local `.sol` file)
//! - submit and print the outcome

use crate::assistant::{resolve_explain_input, Mode, Outcome, RequestOrchestrator, Session};
use crate::cli::{Args, Error, Result, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::AssistantConfig;
use std::io::Read;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run CLI mode and return exit code
///
/// Called from main() after argument parsing and logging setup.
pub async fn run_cli_mode(args: Args) -> ExitCode {
    let orchestrator = match build_orchestrator(&args) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code_for_error(&e);
        }
    };

    let mode = args.command.mode();
    let input = match read_input(&args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code_for_error(&e);
        }
    };

    tracing::debug!(mode = %mode, base_url = orchestrator.base_url(), "submitting");
    let session = Session::new(mode);
    let outcome = orchestrator.submit(&session, mode, &input).await;

    match render_outcome(&outcome, args.json) {
        Ok(rendered) => {
            if outcome.is_success() || args.json {
                println!("{}", rendered);
            } else {
                eprintln!("{}", rendered);
            }
            exit_code_for(&outcome)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Resolve config and build the orchestrator it describes
fn build_orchestrator(args: &Args) -> Result<RequestOrchestrator> {
    let config = AssistantConfig::load(args.config.as_deref())?
        .with_overrides(args.base_url.clone(), args.timeout)
        .validate()?;
    Ok(RequestOrchestrator::from_config(&config)?)
}

fn read_input(args: &Args) -> Result<String> {
    let raw = if args.command.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.command.joined_text()
    };
    prepare_input(args.command.mode(), &raw)
}

/// Text to submit for `raw` in `mode`
///
/// Explain input naming a local `.sol` file is replaced by the file's
/// contents. Blank text is passed through so the core reports `EmptyInput`.
pub fn prepare_input(mode: Mode, raw: &str) -> Result<String> {
    match mode {
        Mode::Explain if !raw.trim().is_empty() => Ok(resolve_explain_input(raw)?),
        _ => Ok(raw.to_string()),
    }
}

/// Human or JSON rendering of an outcome
pub fn render_outcome(outcome: &Outcome, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(outcome)?)
    } else {
        Ok(outcome.to_string())
    }
}

/// Exit code for a settled outcome
pub fn exit_code_for(outcome: &Outcome) -> ExitCode {
    if outcome.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Exit code for a setup error
pub fn exit_code_for_error(error: &Error) -> ExitCode {
    match error {
        Error::Config(_) | Error::Assistant(_) => EXIT_CONFIG_ERROR,
        Error::Io(_) | Error::Serialization(_) => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&Outcome::success("ok")), 0);
        assert_eq!(
            exit_code_for(&Outcome::failure(ErrorKind::HttpError(500), "boom")),
            1
        );
        assert_eq!(
            exit_code_for(&Outcome::failure(ErrorKind::EmptyInput, "no input provided")),
            1
        );
    }

    #[test]
    fn test_setup_error_exit_codes() {
        let config = Error::Config(crate::config::ConfigError::InvalidTimeout);
        assert_eq!(exit_code_for_error(&config), 2);

        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(exit_code_for_error(&io), 1);
    }

    #[test]
    fn test_render_human() {
        let rendered = render_outcome(&Outcome::success("contract Foo {}"), false).unwrap();
        assert_eq!(rendered, "contract Foo {}");

        let rendered = render_outcome(
            &Outcome::failure(ErrorKind::NetworkUnavailable, "backend unreachable: connection refused"),
            false,
        )
        .unwrap();
        assert_eq!(
            rendered,
            "Error (network unavailable): backend unreachable: connection refused"
        );
    }

    #[test]
    fn test_render_json() {
        let rendered =
            render_outcome(&Outcome::failure(ErrorKind::HttpError(404), "Not Found"), true)
                .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["outcome"], "failure");
        assert_eq!(value["kind"]["status"], 404);
        assert_eq!(value["message"], "Not Found");
    }

    #[test]
    fn test_prepare_input_reads_sol_file_for_explain_only() {
        let mut file = tempfile::Builder::new().suffix(".sol").tempfile().unwrap();
        write!(file, "contract Vault {{}}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        assert_eq!(
            prepare_input(Mode::Explain, &path).unwrap(),
            "contract Vault {}"
        );
        assert_eq!(prepare_input(Mode::Generate, &path).unwrap(), path);
    }

    #[test]
    fn test_prepare_input_keeps_blank_text() {
        assert_eq!(prepare_input(Mode::Explain, "   ").unwrap(), "   ");
        assert_eq!(prepare_input(Mode::Generate, "").unwrap(), "");
    }
}
