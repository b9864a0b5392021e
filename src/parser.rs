//! The parser engine: registration, the token-consumption loop and
//! post-loop validation.

use std::collections::HashMap;
use std::process;

use crate::action::Flow;
use crate::help::{HelpText, Usage};
use crate::{Action, ActionType, Arity, Error, ErrorKind, Namespace, ParseOutcome};

/// Whether a token is treated as a flag by the scanner.
///
/// A token is optional-looking iff it is non-empty and starts with `-`.
/// This heuristic cannot tell a negative numeric positional value apart
/// from a flag; such values are misclassified.
fn is_option_token(token: &str) -> bool {
    token.starts_with('-')
}

/// Derive the storage key for a set of names per the registration rules:
/// the first long flag stripped of `--` with `-` replaced by `_`, else the
/// first short flag stripped of `-`, else (positional) the first name
/// itself.
fn resolve_dest(names: &[String]) -> String {
    for name in names {
        if let Some(long) = name.strip_prefix("--") {
            return long.replace('-', "_");
        }
    }

    for name in names {
        if let Some(short) = name.strip_prefix('-') {
            if !short.is_empty() {
                return short.to_owned();
            }
        }
    }

    names.first().cloned().unwrap_or_default()
}

/// A declarative command-line argument parser.
///
/// Arguments are registered up front with [add_argument][Self::add_argument];
/// [parse_args][Self::parse_args] then feeds a token sequence through the
/// engine and produces a [ParseOutcome]: a populated [Namespace], or a
/// help/version short-circuit. Nothing here terminates the process; hosts
/// that want the conventional exit behavior use
/// [parse_or_exit][Self::parse_or_exit].
///
/// # Examples
///
/// ```rust
/// use argot::{ActionType, ArgumentParser, ParseOutcome};
///
/// # fn main() -> Result<(), argot::Error> {
/// let mut parser = ArgumentParser::new("tool").description("A simple tool.");
///
/// parser.add_argument(["filename"], ActionType::Store)?
///     .help("Input file to process");
/// parser.add_argument(["-v", "--verbose"], ActionType::StoreTrue)?
///     .help("Enable verbose output");
///
/// let outcome = parser.parse_args(["notes.txt", "-v"])?;
///
/// let args = match outcome {
///     ParseOutcome::Parsed(args) => args,
///     other => unreachable!("{other:?}"),
/// };
///
/// assert_eq!(args.get::<String>("filename")?, "notes.txt");
/// assert!(args.get::<bool>("verbose")?);
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct ArgumentParser {
    prog: String,
    description: Option<String>,
    epilog: Option<String>,
    actions: Vec<Action>,
    option_index: HashMap<String, usize>,
    positionals: Vec<usize>,
}

impl ArgumentParser {
    /// Construct a parser with a help action pre-registered under `-h` and
    /// `--help`.
    pub fn new(prog: impl Into<String>) -> Self {
        let mut parser = Self::without_help(prog);
        parser.register_builtin_help();
        parser
    }

    /// Construct a parser without the built-in help action.
    pub fn without_help(prog: impl Into<String>) -> Self {
        let prog = prog.into();

        Self {
            prog: if prog.is_empty() {
                "program".to_owned()
            } else {
                prog
            },
            description: None,
            epilog: None,
            actions: Vec::new(),
            option_index: HashMap::new(),
            positionals: Vec::new(),
        }
    }

    fn register_builtin_help(&mut self) {
        let index = self.actions.len();
        let names = vec!["-h".to_owned(), "--help".to_owned()];

        for name in &names {
            self.option_index.insert(name.clone(), index);
        }

        let mut action = Action::new(ActionType::Help, names, "help".to_owned());
        action.help("show this help message and exit");
        self.actions.push(action);
    }

    /// Set the description shown between the usage line and the argument
    /// blocks in help output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set the epilog appended after the argument blocks in help output.
    pub fn epilog(mut self, text: impl Into<String>) -> Self {
        self.epilog = Some(text.into());
        self
    }

    /// The program name used in usage and error output.
    pub fn prog(&self) -> &str {
        &self.prog
    }

    /// The configured description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The configured epilog, if any.
    pub fn epilog_text(&self) -> Option<&str> {
        self.epilog.as_deref()
    }

    pub(crate) fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub(crate) fn positional_actions(&self) -> impl Iterator<Item = &Action> {
        self.positionals.iter().map(|&index| &self.actions[index])
    }

    /// Register an argument.
    ///
    /// `names` is the set of flag spellings (for an optional argument) or a
    /// single bare name (for a positional). All flag spellings of one call
    /// are aliases sharing a single destination. The returned mutable
    /// reference allows further descriptor tuning before parsing.
    ///
    /// Registration fails if `names` is empty, or if a flag spelling or
    /// the resolved destination collides with an already registered
    /// argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ActionType, ArgumentParser, ErrorKind};
    ///
    /// # fn main() -> Result<(), argot::Error> {
    /// let mut parser = ArgumentParser::new("tool");
    /// parser.add_argument(["-o", "--output"], ActionType::Store)?
    ///     .default("out.txt")
    ///     .metavar("FILE");
    ///
    /// // `--output` is taken, so this collides.
    /// let error = parser.add_argument(["--output"], ActionType::Store).unwrap_err();
    /// assert!(matches!(error.kind(), ErrorKind::DuplicateArgument { .. }));
    /// # Ok(()) }
    /// ```
    pub fn add_argument<I, S>(&mut self, names: I, kind: ActionType) -> Result<&mut Action, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(Error::new(ErrorKind::NoNames));
        }

        let dest = resolve_dest(&names);

        if self.actions.iter().any(|a| a.dest() == dest) {
            return Err(Error::new(ErrorKind::DuplicateArgument {
                name: dest.into_boxed_str(),
            }));
        }

        for name in names.iter().filter(|n| n.starts_with('-')) {
            if self.option_index.contains_key(name.as_str()) {
                return Err(Error::new(ErrorKind::DuplicateArgument {
                    name: name.clone().into_boxed_str(),
                }));
            }
        }

        let index = self.actions.len();

        for name in names.iter().filter(|n| n.starts_with('-')) {
            self.option_index.insert(name.clone(), index);
        }

        let action = Action::new(kind, names, dest);

        if action.is_positional() {
            self.positionals.push(index);
        }

        self.actions.push(action);
        Ok(&mut self.actions[index])
    }

    /// Parse an explicit token sequence.
    ///
    /// Returns [ParseOutcome::Parsed] with the populated namespace on
    /// success, or the help/version short-circuit outcomes. A help or
    /// version action anywhere in the tokens wins immediately: remaining
    /// tokens are not scanned and no required-argument validation runs.
    pub fn parse_args<I>(&self, args: I) -> Result<ParseOutcome, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tokens: Vec<String> = args.into_iter().map(|s| s.as_ref().to_owned()).collect();
        let (outcome, _) = self.parse_tokens(&tokens, false)?;
        Ok(outcome)
    }

    /// Parse the process's own arguments, skipping the program name.
    pub fn parse_env(&self) -> Result<ParseOutcome, Error> {
        let mut args = std::env::args();
        args.next();
        self.parse_args(args)
    }

    /// Parse a token sequence, collecting unknown tokens instead of
    /// failing on them.
    ///
    /// Unrecognized flags and surplus positional tokens are returned in
    /// the remainder vector; every other failure mode behaves exactly as
    /// [parse_args][Self::parse_args], including required-argument
    /// validation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ActionType, ArgumentParser, ParseOutcome};
    ///
    /// # fn main() -> Result<(), argot::Error> {
    /// let mut parser = ArgumentParser::new("tool");
    /// parser.add_argument(["-v", "--verbose"], ActionType::StoreTrue)?;
    ///
    /// let (outcome, rest) = parser.parse_known_args(["-v", "--unknown", "extra"])?;
    ///
    /// assert!(matches!(outcome, ParseOutcome::Parsed(..)));
    /// assert_eq!(rest, vec!["--unknown".to_owned(), "extra".to_owned()]);
    /// # Ok(()) }
    /// ```
    pub fn parse_known_args<I>(&self, args: I) -> Result<(ParseOutcome, Vec<String>), Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tokens: Vec<String> = args.into_iter().map(|s| s.as_ref().to_owned()).collect();
        self.parse_tokens(&tokens, true)
    }

    fn parse_tokens(
        &self,
        tokens: &[String],
        known: bool,
    ) -> Result<(ParseOutcome, Vec<String>), Error> {
        let mut namespace = Namespace::new();
        let mut rest = Vec::new();

        for action in &self.actions {
            if let Some(default) = action.default_value() {
                if !default.is_empty() {
                    namespace.set(action.dest(), default);
                }
            }
        }

        let mut positional_index = 0;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];

            if is_option_token(token) {
                let index = match self.option_index.get(token.as_str()) {
                    Some(&index) => index,
                    None if known => {
                        rest.push(token.clone());
                        i += 1;
                        continue;
                    }
                    None => {
                        return Err(Error::new(ErrorKind::UnrecognizedArgument {
                            argument: token.clone().into_boxed_str(),
                        }));
                    }
                };

                let action = &self.actions[index];
                let mut values = Vec::new();

                match action.arity() {
                    Arity::Zero => {}
                    Arity::AtMostOne => {
                        if let Some(next) = tokens.get(i + 1) {
                            if !is_option_token(next) {
                                values.push(next.clone());
                                i += 1;
                            }
                        }
                    }
                    Arity::ZeroOrMore => {
                        while let Some(next) = tokens.get(i + 1) {
                            if is_option_token(next) {
                                break;
                            }
                            values.push(next.clone());
                            i += 1;
                        }
                    }
                    Arity::OneOrMore => {
                        match tokens.get(i + 1) {
                            Some(next) if !is_option_token(next) => {}
                            _ => {
                                return Err(Error::new(ErrorKind::ValueExpected {
                                    option: token.clone().into_boxed_str(),
                                }));
                            }
                        }

                        while let Some(next) = tokens.get(i + 1) {
                            if is_option_token(next) {
                                break;
                            }
                            values.push(next.clone());
                            i += 1;
                        }
                    }
                }

                match action.invoke(&mut namespace, &values, token)? {
                    Flow::Continue => {}
                    Flow::Help => {
                        return Ok((ParseOutcome::HelpRequested(self.format_help()), rest));
                    }
                    Flow::Version => {
                        let version = action.const_value().unwrap_or_default().to_owned();
                        return Ok((ParseOutcome::VersionRequested(version), rest));
                    }
                }
            } else if positional_index < self.positionals.len() {
                let action = &self.actions[self.positionals[positional_index]];
                positional_index += 1;

                let values = std::slice::from_ref(token);

                match action.invoke(&mut namespace, values, token)? {
                    Flow::Continue => {}
                    Flow::Help => {
                        return Ok((ParseOutcome::HelpRequested(self.format_help()), rest));
                    }
                    Flow::Version => {
                        let version = action.const_value().unwrap_or_default().to_owned();
                        return Ok((ParseOutcome::VersionRequested(version), rest));
                    }
                }
            } else if known {
                rest.push(token.clone());
            } else {
                return Err(Error::new(ErrorKind::TooManyArguments {
                    argument: token.clone().into_boxed_str(),
                }));
            }

            i += 1;
        }

        for action in &self.actions {
            if action.is_required() && !namespace.contains(action.dest()) {
                return Err(Error::new(ErrorKind::RequiredArgument {
                    dest: action.dest().into(),
                }));
            }
        }

        if let Some(&index) = self.positionals.get(positional_index) {
            return Err(Error::new(ErrorKind::MissingArgument {
                dest: self.actions[index].dest().into(),
            }));
        }

        Ok((ParseOutcome::Parsed(namespace), rest))
    }

    /// Render the single usage line.
    pub fn format_usage(&self) -> String {
        Usage::new(self).to_string()
    }

    /// Render the full help text.
    pub fn format_help(&self) -> String {
        HelpText::new(self).to_string()
    }

    /// Write the usage line to stdout.
    pub fn print_usage(&self) {
        println!("{}", Usage::new(self));
    }

    /// Write the full help text to stdout.
    pub fn print_help(&self) {
        println!("{}", HelpText::new(self));
    }

    /// Render the standard error report for a parse failure: the
    /// `<prog>: error: <message>` line followed by the usage line.
    pub fn format_error(&self, error: &Error) -> String {
        format!("{}: error: {}\n{}", self.prog, error, Usage::new(self))
    }

    /// Parse an explicit token sequence, terminating the process on any
    /// non-[Parsed][ParseOutcome::Parsed] outcome.
    ///
    /// Help and version output goes to stdout with exit status 0; errors
    /// are reported to stderr with the usage line and exit status 2. This
    /// is the only place the crate exits the process.
    pub fn parse_or_exit<I>(&self, args: I) -> Namespace
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        match self.parse_args(args) {
            Ok(ParseOutcome::Parsed(namespace)) => namespace,
            Ok(ParseOutcome::HelpRequested(text)) | Ok(ParseOutcome::VersionRequested(text)) => {
                println!("{text}");
                process::exit(0);
            }
            Err(error) => {
                eprintln!("{}", self.format_error(&error));
                process::exit(error.exit_code());
            }
        }
    }
}
