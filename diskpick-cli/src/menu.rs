// SPDX-License-Identifier: GPL-3.0-only

//! Bridge to dmenu-compatible pickers: lines in on stdin, one line back on stdout.

use diskpick_core::ResolvedDevice;
use thiserror::Error;

use crate::format::Rendered;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("no menu command given and none configured")]
    NoCommand,

    #[error("menu command `{command}` failed: {source}")]
    Failed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("selection does not match any listed device: {0:?}")]
    NoMatch(String),
}

/// Command line of the menu: the one given, else the configured one.
pub fn menu_command<'a>(
    given: &'a [String],
    configured: &'a [String],
) -> Result<&'a [String], MenuError> {
    if !given.is_empty() {
        return Ok(given);
    }
    if !configured.is_empty() {
        return Ok(configured);
    }
    Err(MenuError::NoCommand)
}

/// Run the menu with `input` on stdin and return what it printed, minus
/// trailing newlines. A non-zero exit status is an error.
pub fn run_menu(command: &[String], input: &str) -> Result<String, MenuError> {
    let (program, args) = command.split_first().ok_or(MenuError::NoCommand)?;

    tracing::debug!("Running menu command: {}", command.join(" "));

    duct::cmd(program.as_str(), args)
        .stdin_bytes(input.as_bytes())
        .read()
        .map_err(|source| MenuError::Failed {
            command: command.join(" "),
            source,
        })
}

/// Show the rendered lines in the menu and return the device picked.
pub fn pick<'a>(
    command: &[String],
    rendered: &Rendered<'a>,
) -> Result<&'a ResolvedDevice, MenuError> {
    let selection = run_menu(command, &rendered.lines.join("\n"))?;
    rendered
        .device_for(&selection)
        .ok_or(MenuError::NoMatch(selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn given_command_wins_over_configured() {
        let given = strings(&["rofi", "-dmenu"]);
        let configured = strings(&["dmenu", "-l", "20"]);

        assert_eq!(menu_command(&given, &configured).unwrap(), given.as_slice());
        assert_eq!(menu_command(&[], &configured).unwrap(), configured.as_slice());
        assert!(matches!(menu_command(&[], &[]), Err(MenuError::NoCommand)));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(run_menu(&[], "a\nb"), Err(MenuError::NoCommand)));
    }

    #[test]
    fn menu_output_is_returned_without_trailing_newline() {
        let command = strings(&["sed", "-n", "1p"]);
        assert_eq!(run_menu(&command, "first\nsecond").unwrap(), "first");
    }

    #[test]
    fn failing_menu_is_an_error() {
        let command = strings(&["false"]);
        assert!(matches!(
            run_menu(&command, "first"),
            Err(MenuError::Failed { .. })
        ));
    }
}
