//! Usage and help rendering.
//!
//! Both renderers are cheap [fmt::Display] wrappers over a borrowed
//! parser; [ArgumentParser::format_usage][crate::ArgumentParser::format_usage]
//! and friends stringify them.

use std::fmt;

use crate::{Action, ActionType, Arity, ArgumentParser};

/// Left-aligned field width for the name column in help blocks. Fixed, not
/// content-adaptive.
const NAME_COLUMN: usize = 20;

/// The value placeholder shown for an action: the configured metavar, or
/// the uppercased destination.
fn placeholder(action: &Action) -> String {
    match action.metavar_text() {
        Some(metavar) => metavar.to_owned(),
        None => action.dest().to_uppercase(),
    }
}

/// Renders the single `usage:` line.
pub(crate) struct Usage<'a> {
    parser: &'a ArgumentParser,
}

impl<'a> Usage<'a> {
    pub(crate) fn new(parser: &'a ArgumentParser) -> Self {
        Self { parser }
    }
}

impl fmt::Display for Usage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usage: {}", self.parser.prog())?;

        for action in self.parser.actions() {
            // The parser's own help flag is not part of the usage line.
            if !action.is_optional() || action.kind() == ActionType::Help {
                continue;
            }

            let first = action.option_strings().first().map(String::as_str).unwrap_or_default();

            if action.arity() == Arity::Zero {
                write!(f, " [{first}]")?;
            } else {
                write!(f, " [{first} {}]", placeholder(action))?;
            }
        }

        for action in self.parser.positional_actions() {
            write!(f, " {}", placeholder(action))?;
        }

        Ok(())
    }
}

/// Renders the full help text: usage, description, the positional and
/// optional argument blocks, and the epilog.
pub(crate) struct HelpText<'a> {
    parser: &'a ArgumentParser,
}

impl<'a> HelpText<'a> {
    pub(crate) fn new(parser: &'a ArgumentParser) -> Self {
        Self { parser }
    }
}

impl fmt::Display for HelpText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Usage::new(self.parser))?;
        writeln!(f)?;

        if let Some(description) = self.parser.description_text() {
            writeln!(f, "{description}")?;
            writeln!(f)?;
        }

        let mut has_positional = false;

        for action in self.parser.positional_actions() {
            if !has_positional {
                writeln!(f, "positional arguments:")?;
                has_positional = true;
            }

            write_entry(f, action.dest(), action.help_text())?;
        }

        if has_positional {
            writeln!(f)?;
        }

        let mut has_optional = false;

        for action in self.parser.actions() {
            if !action.is_optional() {
                continue;
            }

            if !has_optional {
                writeln!(f, "optional arguments:")?;
                has_optional = true;
            }

            write_entry(f, &action.option_strings().join(", "), action.help_text())?;
        }

        if let Some(epilog) = self.parser.epilog_text() {
            writeln!(f)?;
            write!(f, "{epilog}")?;
        }

        Ok(())
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, name: &str, help: Option<&str>) -> fmt::Result {
    write!(f, "  {name:<NAME_COLUMN$}")?;

    if let Some(help) = help {
        write!(f, "{help}")?;
    }

    writeln!(f)
}
