//! Declarative command-line argument parsing with runtime registration.
//!
//! Callers register argument descriptors (positional and optional) on an
//! [ArgumentParser], then hand it a token sequence and get back a typed
//! result set or a structured failure. The parser never exits the process
//! on its own: help, version and error paths are all explicit values (see
//! [ParseOutcome]), and the conventional exit behavior is available as the
//! opt-in [ArgumentParser::parse_or_exit].
//!
//! We provide:
//! * Runtime registration of `store`, `store_const`, `store_true`,
//!   `store_false`, `help` and `version` behaviors.
//! * An arity model (`nargs`) covering single, optional, zero-or-more and
//!   one-or-more value consumption.
//! * A string-backed value store ([Namespace]) with typed, checked access
//!   on demand.
//! * Plain usage and help text generation.
//!
//! We *do not* provide:
//! * Subcommands, argument groups, mutually exclusive groups or
//!   abbreviation matching. One flat destination namespace per parser.
//! * Combined short flags (`-vx`) or `--flag=value` splitting; tokens are
//!   matched exactly.
//! * A way to pass a negative number as a positional value; any token
//!   starting with `-` is classified as a flag.
//!
//! # Examples
//!
//! > This is available as a runnable example:
//! > ```sh
//! > cargo run --example tour
//! > ```
//!
//! ```rust
//! use argot::{ActionType, ArgumentParser, Nargs, ParseOutcome};
//!
//! # fn main() -> Result<(), argot::Error> {
//! let mut parser = ArgumentParser::new("tour")
//!     .description("A command touring the capabilities of argot.");
//!
//! parser.add_argument(["filename"], ActionType::Store)?
//!     .help("Input filename to process");
//! parser.add_argument(["-v", "--verbose"], ActionType::StoreTrue)?
//!     .help("Enable verbose output");
//! parser.add_argument(["-n", "--count"], ActionType::Store)?
//!     .default("1")
//!     .metavar("N")
//!     .help("Number of iterations");
//! parser.add_argument(["-i", "--include"], ActionType::Store)?
//!     .nargs(Nargs::OneOrMore)
//!     .metavar("PATH")
//!     .help("Extra paths to include");
//!
//! let outcome = parser.parse_args(["notes.txt", "-v", "-i", "a", "b"])?;
//!
//! let args = match outcome {
//!     ParseOutcome::Parsed(args) => args,
//!     ParseOutcome::HelpRequested(text) | ParseOutcome::VersionRequested(text) => {
//!         println!("{text}");
//!         return Ok(());
//!     }
//! };
//!
//! assert_eq!(args.get::<String>("filename")?, "notes.txt");
//! assert!(args.get::<bool>("verbose")?);
//! assert_eq!(args.get::<u32>("count")?, 1);
//! assert_eq!(args.get::<String>("include")?, "a b");
//! # Ok(()) }
//! ```

#![deny(missing_docs)]

use std::error;
use std::fmt;

mod action;
mod help;
mod namespace;
mod parser;

pub use self::action::{Action, ActionType, Arity, Nargs};
pub use self::namespace::{ArgValue, ConversionError, Namespace};
pub use self::parser::ArgumentParser;

/// An error raised by argot.
#[derive(Debug)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    /// Construct a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Access the underlying error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The process exit status conventionally reported for this error.
    ///
    /// Every parse and registration failure maps to status 2; help and
    /// version requests are not errors and exit 0 through
    /// [ArgumentParser::parse_or_exit].
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        error::Error::source(&*self.kind)
    }
}

/// The kind of an error.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// An argument was registered without any name or flag.
    #[error("At least one name or flag is required")]
    NoNames,
    /// An unknown action tag was used at registration.
    #[error("Unknown action: {action}")]
    UnknownAction {
        /// The tag that did not match any action type.
        action: Box<str>,
    },
    /// An unknown arity tag was used at registration. Tags are validated
    /// eagerly rather than silently treated as consuming nothing.
    #[error("Unknown nargs: '{nargs}'")]
    UnknownNargs {
        /// The tag that did not match any arity.
        nargs: Box<str>,
    },
    /// A flag spelling or resolved destination collided with an already
    /// registered argument.
    ///
    /// Aliases share one `add_argument` call; a second registration
    /// reaching the same destination is a conflict, not an alias.
    #[error("Conflicting argument: '{name}' is already in use")]
    DuplicateArgument {
        /// The flag spelling or destination that collided.
        name: Box<str>,
    },
    /// Encountered a flag-like token that matched no registered option
    /// string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ActionType, ArgumentParser, ErrorKind};
    ///
    /// # fn main() -> Result<(), argot::Error> {
    /// let mut parser = ArgumentParser::new("tool");
    /// parser.add_argument(["--file"], ActionType::Store)?;
    ///
    /// let error = parser.parse_args(["--path"]).unwrap_err();
    /// assert!(matches!(error.kind(), ErrorKind::UnrecognizedArgument { .. }));
    /// # Ok(()) }
    /// ```
    #[error("Unrecognized argument: {argument}")]
    UnrecognizedArgument {
        /// The token that matched no option string.
        argument: Box<str>,
    },
    /// An option required a value and none was consumable.
    ///
    /// Raised when a `+` arity finds no following non-flag token, and when
    /// a single-value store receives nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ActionType, ArgumentParser, ErrorKind, Nargs};
    ///
    /// # fn main() -> Result<(), argot::Error> {
    /// let mut parser = ArgumentParser::new("tool");
    /// parser.add_argument(["--input"], ActionType::Store)?.nargs(Nargs::OneOrMore);
    ///
    /// let error = parser.parse_args(["--input"]).unwrap_err();
    /// assert!(matches!(error.kind(), ErrorKind::ValueExpected { .. }));
    /// # Ok(()) }
    /// ```
    #[error("Argument {option} expected at least one argument")]
    ValueExpected {
        /// The option string that was missing its value.
        option: Box<str>,
    },
    /// A supplied value was outside the argument's closed choice set.
    #[error("Invalid choice: '{value}' (choose from {choices})")]
    InvalidChoice {
        /// The offending value.
        value: Box<str>,
        /// The permitted values, quoted and comma-separated.
        choices: Box<str>,
    },
    /// A positional token arrived after every registered positional had
    /// been bound.
    #[error("Too many positional arguments: {argument}")]
    TooManyArguments {
        /// The surplus token.
        argument: Box<str>,
    },
    /// A required optional argument was never supplied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ActionType, ArgumentParser, ErrorKind};
    ///
    /// # fn main() -> Result<(), argot::Error> {
    /// let mut parser = ArgumentParser::new("tool");
    /// parser.add_argument(["--token"], ActionType::Store)?.required(true);
    ///
    /// let error = parser.parse_args(Vec::<String>::new()).unwrap_err();
    /// assert!(matches!(error.kind(), ErrorKind::RequiredArgument { .. }));
    /// # Ok(()) }
    /// ```
    #[error("Argument {dest} is required")]
    RequiredArgument {
        /// The destination of the omitted argument.
        dest: Box<str>,
    },
    /// A registered positional argument was never reached by the token
    /// stream. Positional arguments are implicitly required.
    #[error("The following arguments are required: {dest}")]
    MissingArgument {
        /// The destination of the unreached positional.
        dest: Box<str>,
    },
    /// A typed lookup was made for a destination with no stored value.
    #[error("Argument '{key}' not found")]
    ArgumentNotFound {
        /// The destination that held no value.
        key: Box<str>,
    },
    /// A stored value failed to convert to the requested type.
    ///
    /// The underlying parse error is retained as the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ErrorKind, Namespace};
    ///
    /// let mut ns = Namespace::new();
    /// ns.set("count", "many");
    ///
    /// let error = ns.get::<i64>("count").unwrap_err();
    /// assert!(matches!(error.kind(), ErrorKind::InvalidValue { .. }));
    /// ```
    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue {
        /// The destination being read.
        key: Box<str>,
        /// The raw stored value.
        value: Box<str>,
        /// The conversion failure.
        #[source]
        source: ConversionError,
    },
}

/// The result of a successful parse run.
///
/// Help and version actions terminate the parse successfully without
/// scanning further tokens or running required-argument validation; the
/// host decides what to do with the rendered text.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The token stream was fully consumed and validated.
    Parsed(Namespace),
    /// A help action fired; carries the full rendered help text.
    HelpRequested(String),
    /// A version action fired; carries the configured version string.
    VersionRequested(String),
}

impl ParseOutcome {
    /// The parsed namespace, if this outcome is [ParseOutcome::Parsed].
    pub fn into_namespace(self) -> Option<Namespace> {
        match self {
            Self::Parsed(namespace) => Some(namespace),
            _ => None,
        }
    }
}
