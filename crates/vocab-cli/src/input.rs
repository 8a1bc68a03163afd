//! Line-oriented key bindings for the terminal front end.
//!
//! Each stdin line is one command. The bindings follow the overlay's
//! shortcuts where there is one (`n` for next, `p` for previous, `m` for the
//! meaning toggle) and use short words for the menu-only actions.

use thiserror::Error;
use vocab_core::{Command, Geometry};

/// A stdin line that does not map to a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command '{0}' (type 'h' for help)")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{command}': '{value}' is not {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Help,
}

/// Key reference printed by `h`.
pub const HELP: &str = "\
keys:
  n, <enter>   reveal, then next        f            next now
  p            previous                 g N          go to entry N
  r            restart                  s            shuffle
  a            toggle auto-next         m            toggle meaning
  w            toggle word              t            toggle always-on-top
  b            toggle border            x            toggle transparency
  c [COLOR]    text color (empty resets)
  cw           copy word                cp           copy phonetic
  move W H X Y set window geometry
  i MINUTES    change interval          d SECONDS    reveal delay
  h            help                     q            quit";

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let (key, rest) = match line.split_once(char::is_whitespace) {
        Some((key, rest)) => (key, rest.trim()),
        None => (line, ""),
    };

    let command = match key {
        "" | "n" => Command::Next,
        "f" => Command::NextNow,
        "p" => Command::Prev,
        "g" => Command::Goto(parse_number("g", rest, "an entry number")?),
        "r" => Command::Restart,
        "s" => Command::Shuffle,
        "a" => Command::ToggleAutoNext,
        "m" => Command::ToggleMeaning,
        "w" => Command::ToggleWord,
        "t" => Command::ToggleAlwaysOnTop,
        "b" => Command::ToggleBorder,
        "x" => Command::ToggleTransparency,
        "c" => Command::ChangeColor(rest.to_string()),
        "cw" => Command::CopyWord,
        "cp" => Command::CopyPhonetic,
        "move" => Command::SetGeometry(parse_geometry(rest)?),
        "i" => Command::SetChangeInterval(parse_number("i", rest, "a number of minutes")?),
        "d" => Command::SetRevealDelay(parse_number("d", rest, "a number of seconds")?),
        "h" | "?" => return Ok(Input::Help),
        "q" => Command::Exit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Input::Command(command))
}

fn parse_number<T: std::str::FromStr>(
    command: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, InputError> {
    if value.is_empty() {
        return Err(InputError::MissingArgument { command, expected });
    }
    value.parse().map_err(|_| InputError::InvalidArgument {
        command,
        value: value.to_string(),
        expected,
    })
}

fn parse_geometry(rest: &str) -> Result<Geometry, InputError> {
    const EXPECTED: &str = "WIDTH HEIGHT X Y";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let [width, height, x, y] = parts.as_slice() else {
        return Err(InputError::MissingArgument {
            command: "move",
            expected: EXPECTED,
        });
    };
    Ok(Geometry {
        width: parse_number("move", width, EXPECTED)?,
        height: parse_number("move", height, EXPECTED)?,
        x: parse_number("move", x, EXPECTED)?,
        y: parse_number("move", y, EXPECTED)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line).unwrap() {
            Input::Command(command) => command,
            Input::Help => panic!("expected a command for {line:?}"),
        }
    }

    #[test]
    fn test_enter_means_next() {
        assert_eq!(command(""), Command::Next);
        assert_eq!(command("  n "), Command::Next);
    }

    #[test]
    fn test_arguments() {
        assert_eq!(command("g 12"), Command::Goto(12));
        assert_eq!(command("g -1"), Command::Goto(-1));
        assert_eq!(command("i 0.5"), Command::SetChangeInterval(0.5));
        assert_eq!(command("c  #ff0000"), Command::ChangeColor("#ff0000".into()));
        assert_eq!(command("c"), Command::ChangeColor(String::new()));
        assert_eq!(
            command("move 320 240 -10 5"),
            Command::SetGeometry(Geometry {
                width: 320,
                height: 240,
                x: -10,
                y: 5,
            })
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_line("g"),
            Err(InputError::MissingArgument {
                command: "g",
                expected: "an entry number",
            })
        );
        assert!(matches!(
            parse_line("g two"),
            Err(InputError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_line("move 1 2 3"),
            Err(InputError::MissingArgument { command: "move", .. })
        ));
        assert_eq!(
            parse_line("zz").unwrap_err().to_string(),
            "unknown command 'zz' (type 'h' for help)"
        );
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_line("?"), Ok(Input::Help));
    }
}
