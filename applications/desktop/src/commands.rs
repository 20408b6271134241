//! Host command language
//!
//! One command per line; `#` starts a comment. Stands in for the widget
//! toolkit's buttons, sliders and window events.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Artist/album used when `add` leaves them out
pub const UNKNOWN: &str = "Unknown";

/// Parsed host command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Toggle the side menu drawer
    Menu,
    /// Toggle the queue drawer
    Queue,
    /// Window content area resized
    Resize { width: f32, height: f32 },
    /// Transport controls changed height
    Controls(f32),
    /// Append a track
    Add {
        title: String,
        artist: String,
        album: String,
    },
    /// Remove the track shown at this row of the queue drawer
    Remove(usize),
    /// Print the queue
    List,
    /// Set volume (0-100)
    Volume(u8),
    /// Toggle mute
    Mute,
    /// Seek within the current media
    Seek(Duration),
    /// Transport report from the multimedia collaborator
    Report {
        position: Duration,
        duration: Duration,
    },
    /// Select a menu page
    Page(usize),
    /// Keep animating for a while before reading the next command
    Wait(Duration),
    /// Stop the host
    Quit,
}

/// Command parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: invalid <{argument}> '{value}'")]
    InvalidNumber {
        command: &'static str,
        argument: &'static str,
        value: String,
    },
}

/// Parse one input line
///
/// Blank lines and comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    if line.trim().is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, rest) = match s.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (s, ""),
        };
        let mut args = Args {
            command: "",
            parts: rest.split_whitespace(),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "menu" => Command::Menu,
            "queue" => Command::Queue,
            "resize" => {
                args.command = "resize";
                Command::Resize {
                    width: args.number("width")?,
                    height: args.number("height")?,
                }
            }
            "controls" => {
                args.command = "controls";
                Command::Controls(args.number("height")?)
            }
            "add" => parse_add(rest)?,
            "remove" => {
                args.command = "remove";
                Command::Remove(args.number("index")?)
            }
            "list" => Command::List,
            "volume" => {
                args.command = "volume";
                Command::Volume(args.number("level")?)
            }
            "mute" => Command::Mute,
            "seek" => {
                args.command = "seek";
                Command::Seek(args.millis("ms")?)
            }
            "report" => {
                args.command = "report";
                Command::Report {
                    position: args.millis("position_ms")?,
                    duration: args.millis("duration_ms")?,
                }
            }
            "page" => {
                args.command = "page";
                Command::Page(args.number("index")?)
            }
            "wait" => {
                args.command = "wait";
                Command::Wait(args.millis("ms")?)
            }
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

/// `add <title> | <artist> | <album>`
fn parse_add(rest: &str) -> Result<Command, CommandError> {
    let mut fields = rest.split('|').map(str::trim);

    let title = match fields.next() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            return Err(CommandError::MissingArgument {
                command: "add",
                argument: "title",
            })
        }
    };
    let mut field_or_unknown = || {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string()
    };
    let artist = field_or_unknown();
    let album = field_or_unknown();

    Ok(Command::Add {
        title,
        artist,
        album,
    })
}

struct Args<'a> {
    command: &'static str,
    parts: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn number<T: FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        let value = self.parts.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })?;
        value.parse().map_err(|_| CommandError::InvalidNumber {
            command: self.command,
            argument,
            value: value.to_string(),
        })
    }

    fn millis(&mut self, argument: &'static str) -> Result<Duration, CommandError> {
        self.number(argument).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("menu"), Command::Menu);
        assert_eq!(parse("  QUEUE  "), Command::Queue);
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("mute"), Command::Mute);
        assert_eq!(parse("quit"), Command::Quit);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn test_numeric_commands() {
        assert_eq!(
            parse("resize 1600 900"),
            Command::Resize {
                width: 1600.0,
                height: 900.0
            }
        );
        assert_eq!(parse("controls 62.5"), Command::Controls(62.5));
        assert_eq!(parse("remove 2"), Command::Remove(2));
        assert_eq!(parse("volume 80"), Command::Volume(80));
        assert_eq!(parse("seek 1500"), Command::Seek(Duration::from_millis(1500)));
        assert_eq!(
            parse("report 1000 180000"),
            Command::Report {
                position: Duration::from_secs(1),
                duration: Duration::from_secs(180)
            }
        );
        assert_eq!(parse("page 1"), Command::Page(1));
        assert_eq!(parse("wait 250"), Command::Wait(Duration::from_millis(250)));
    }

    #[test]
    fn test_add_fields() {
        assert_eq!(
            parse("add Song A | Artist A | Album A"),
            Command::Add {
                title: "Song A".to_string(),
                artist: "Artist A".to_string(),
                album: "Album A".to_string(),
            }
        );
        assert_eq!(
            parse("add Lonely Title"),
            Command::Add {
                title: "Lonely Title".to_string(),
                artist: UNKNOWN.to_string(),
                album: UNKNOWN.to_string(),
            }
        );
    }

    #[test]
    fn test_comments_and_blanks() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# open the menu"), Ok(None));
        assert_eq!(parse_line("menu # open it"), Ok(Some(Command::Menu)));
    }

    #[test]
    fn test_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            parse_line("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            parse_line("resize 100"),
            Err(CommandError::MissingArgument {
                command: "resize",
                argument: "height"
            })
        );
        assert_eq!(
            parse_line("volume loud"),
            Err(CommandError::InvalidNumber {
                command: "volume",
                argument: "level",
                value: "loud".to_string()
            })
        );
        assert!(matches!(
            parse_line("volume 300"),
            Err(CommandError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_line("add | Artist"),
            Err(CommandError::MissingArgument { argument: "title", .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_line("seek").unwrap_err();
        assert_eq!(err.to_string(), "seek: missing <ms>");

        let err = parse_line("page x").unwrap_err();
        assert_eq!(err.to_string(), "page: invalid <index> 'x'");
    }
}
