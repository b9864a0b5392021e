//! Argument descriptors and their behavior.
//!
//! Every registered argument is an [Action]: the descriptor attributes
//! shared by all behaviors (flags, destination, arity, defaults, choices,
//! presentation text) plus an [ActionType] tag selecting what happens when
//! the engine hands it the values collected for one occurrence.

use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorKind, Namespace};

/// The behavior bound to a registered argument.
///
/// A closed set: the engine dispatches on this tag when an action is
/// invoked, and arity classification is derived from it (see
/// [Action::arity]).
///
/// The tags parse from the string names used at registration:
///
/// ```rust
/// use argot::ActionType;
///
/// assert_eq!("store_true".parse::<ActionType>().unwrap(), ActionType::StoreTrue);
/// assert!("append".parse::<ActionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    /// Store the collected value (or values, space-joined) at the
    /// destination.
    Store,
    /// Ignore collected values and store the configured constant.
    StoreConst,
    /// [ActionType::StoreConst] preset with constant `"true"` and default
    /// `"false"`.
    StoreTrue,
    /// [ActionType::StoreConst] preset with constant `"false"` and default
    /// `"true"`.
    StoreFalse,
    /// Render the full help text and terminate the parse successfully.
    Help,
    /// Emit the configured version string and terminate the parse
    /// successfully.
    Version,
}

impl ActionType {
    /// The registration tag for this action type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::StoreConst => "store_const",
            Self::StoreTrue => "store_true",
            Self::StoreFalse => "store_false",
            Self::Help => "help",
            Self::Version => "version",
        }
    }
}

impl FromStr for ActionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store" => Ok(Self::Store),
            "store_const" => Ok(Self::StoreConst),
            "store_true" => Ok(Self::StoreTrue),
            "store_false" => Ok(Self::StoreFalse),
            "help" => Ok(Self::Help),
            "version" => Ok(Self::Version),
            other => Err(Error::new(ErrorKind::UnknownAction {
                action: other.into(),
            })),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared arity tag of an argument.
///
/// Unknown tags are rejected when parsed, rather than silently treated as
/// consuming nothing:
///
/// ```rust
/// use argot::Nargs;
///
/// assert_eq!("+".parse::<Nargs>().unwrap(), Nargs::OneOrMore);
/// assert!("2".parse::<Nargs>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Nargs {
    /// The unspecified tag (`""`): exactly one value.
    #[default]
    Default,
    /// `"0"`: no values.
    Zero,
    /// `"1"`: exactly one value.
    One,
    /// `"?"`: one value if present, otherwise fall back to the constant,
    /// then the default.
    Optional,
    /// `"*"`: every following non-flag value, possibly none.
    ZeroOrMore,
    /// `"+"`: every following non-flag value, at least one.
    OneOrMore,
}

impl Nargs {
    /// The registration tag for this arity.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Zero => "0",
            Self::One => "1",
            Self::Optional => "?",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
        }
    }
}

impl FromStr for Nargs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Default),
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            "?" => Ok(Self::Optional),
            "*" => Ok(Self::ZeroOrMore),
            "+" => Ok(Self::OneOrMore),
            other => Err(Error::new(ErrorKind::UnknownNargs {
                nargs: other.into(),
            })),
        }
    }
}

/// How many tokens the engine consumes for one occurrence of an argument.
///
/// Carried explicitly on every action so the consumption loop never needs
/// to know which concrete behavior it is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Consume no tokens.
    Zero,
    /// Consume the single next token if it exists and does not look like a
    /// flag.
    AtMostOne,
    /// Consume following tokens greedily while they do not look like
    /// flags; zero is fine.
    ZeroOrMore,
    /// As [Arity::ZeroOrMore], but the first token must be consumable.
    OneOrMore,
}

/// Control transfer requested by an invoked action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Keep scanning tokens.
    Continue,
    /// Short-circuit the parse with the rendered help text.
    Help,
    /// Short-circuit the parse with the configured version string.
    Version,
}

/// A registered argument descriptor.
///
/// Created through [ArgumentParser::add_argument][crate::ArgumentParser::add_argument],
/// which returns a mutable reference for further tuning. Once parsing
/// starts the descriptor is read-only; the engine owns it for its whole
/// lifetime.
///
/// ```rust
/// use argot::{ActionType, ArgumentParser, Nargs};
///
/// # fn main() -> Result<(), argot::Error> {
/// let mut parser = ArgumentParser::new("tool");
///
/// parser
///     .add_argument(["-i", "--include"], ActionType::Store)?
///     .nargs(Nargs::OneOrMore)
///     .metavar("PATH")
///     .help("Paths to include");
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Action {
    kind: ActionType,
    option_strings: Vec<String>,
    dest: String,
    nargs: Nargs,
    const_value: Option<String>,
    default_value: Option<String>,
    required: bool,
    choices: Vec<String>,
    help: Option<String>,
    metavar: Option<String>,
}

impl Action {
    pub(crate) fn new(kind: ActionType, option_strings: Vec<String>, dest: String) -> Self {
        let (const_value, default_value) = match kind {
            ActionType::StoreTrue => (Some("true".to_owned()), Some("false".to_owned())),
            ActionType::StoreFalse => (Some("false".to_owned()), Some("true".to_owned())),
            _ => (None, None),
        };

        Self {
            kind,
            option_strings,
            dest,
            nargs: Nargs::Default,
            const_value,
            default_value,
            required: false,
            choices: Vec::new(),
            help: None,
            metavar: None,
        }
    }

    /// The behavior tag of this action.
    pub fn kind(&self) -> ActionType {
        self.kind
    }

    /// The flag spellings this action was registered under. Empty for a
    /// positional argument.
    pub fn option_strings(&self) -> &[String] {
        &self.option_strings
    }

    /// The destination key this action stores under.
    pub fn dest(&self) -> &str {
        &self.dest
    }

    /// The declared arity tag.
    pub fn nargs_tag(&self) -> Nargs {
        self.nargs
    }

    /// The default value applied before parsing, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// The constant stored by `store_const`-family actions, or the version
    /// text of a `version` action.
    pub fn const_value(&self) -> Option<&str> {
        self.const_value.as_deref()
    }

    /// Whether omitting this argument fails the parse.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The help text shown for this action, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The configured metavar, if any.
    pub fn metavar_text(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    /// Set the arity tag.
    pub fn nargs(&mut self, nargs: Nargs) -> &mut Self {
        self.nargs = nargs;
        self
    }

    /// Set the stored constant (or, for a `version` action, the version
    /// text).
    pub fn constant(&mut self, value: impl Into<String>) -> &mut Self {
        self.const_value = Some(value.into());
        self
    }

    /// Set the default value applied before parsing.
    pub fn default(&mut self, value: impl Into<String>) -> &mut Self {
        self.default_value = Some(value.into());
        self
    }

    /// Mark this argument as required.
    pub fn required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Restrict supplied values to a closed set.
    pub fn choices<I, S>(&mut self, choices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Set the help text.
    pub fn help(&mut self, text: impl Into<String>) -> &mut Self {
        self.help = Some(text.into());
        self
    }

    /// Set the display name used for the value placeholder in usage text.
    pub fn metavar(&mut self, text: impl Into<String>) -> &mut Self {
        self.metavar = Some(text.into());
        self
    }

    /// Whether this action is identified by flag strings.
    pub fn is_optional(&self) -> bool {
        self.option_strings
            .first()
            .map(|s| s.starts_with('-'))
            .unwrap_or(false)
    }

    /// Whether this action is identified by position.
    pub fn is_positional(&self) -> bool {
        !self.is_optional()
    }

    /// The consumption class the engine uses for this action.
    pub fn arity(&self) -> Arity {
        match self.kind {
            ActionType::StoreConst
            | ActionType::StoreTrue
            | ActionType::StoreFalse
            | ActionType::Help
            | ActionType::Version => Arity::Zero,
            ActionType::Store => match self.nargs {
                Nargs::Zero => Arity::Zero,
                Nargs::Default | Nargs::One | Nargs::Optional => Arity::AtMostOne,
                Nargs::ZeroOrMore => Arity::ZeroOrMore,
                Nargs::OneOrMore => Arity::OneOrMore,
            },
        }
    }

    /// Apply this action to the namespace for one occurrence.
    ///
    /// `values` holds the tokens the engine collected per [Action::arity];
    /// `option_string` is the flag spelling that matched, or the token
    /// itself for a positional.
    pub(crate) fn invoke(
        &self,
        namespace: &mut Namespace,
        values: &[String],
        option_string: &str,
    ) -> Result<Flow, Error> {
        match self.kind {
            ActionType::Store => {
                self.check_choices(values)?;
                self.store(namespace, values, option_string)?;
            }
            ActionType::StoreConst | ActionType::StoreTrue | ActionType::StoreFalse => {
                let value = self.const_value.as_deref().unwrap_or_default();
                namespace.set(self.dest.clone(), value);
            }
            ActionType::Help => return Ok(Flow::Help),
            ActionType::Version => return Ok(Flow::Version),
        }

        Ok(Flow::Continue)
    }

    fn store(
        &self,
        namespace: &mut Namespace,
        values: &[String],
        option_string: &str,
    ) -> Result<(), Error> {
        match self.nargs {
            Nargs::Default | Nargs::One => {
                let value = values.first().ok_or_else(|| {
                    Error::new(ErrorKind::ValueExpected {
                        option: option_string.into(),
                    })
                })?;
                namespace.set(self.dest.clone(), value.clone());
            }
            Nargs::ZeroOrMore | Nargs::OneOrMore => {
                if !values.is_empty() {
                    namespace.set(self.dest.clone(), values.join(" "));
                }
            }
            Nargs::Optional => {
                // Fall back through const and default; with neither the
                // destination stays unset.
                if let Some(value) = values.first() {
                    namespace.set(self.dest.clone(), value.clone());
                } else if let Some(value) = &self.const_value {
                    namespace.set(self.dest.clone(), value.clone());
                } else if let Some(value) = &self.default_value {
                    namespace.set(self.dest.clone(), value.clone());
                }
            }
            Nargs::Zero => {}
        }

        Ok(())
    }

    fn check_choices(&self, values: &[String]) -> Result<(), Error> {
        if self.choices.is_empty() {
            return Ok(());
        }

        for value in values {
            if !self.choices.iter().any(|c| c == value) {
                let choices = self
                    .choices
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect::<Vec<_>>()
                    .join(", ");

                return Err(Error::new(ErrorKind::InvalidChoice {
                    value: value.clone().into_boxed_str(),
                    choices: choices.into_boxed_str(),
                }));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dest: &str) -> Action {
        Action::new(ActionType::Store, vec![format!("--{dest}")], dest.into())
    }

    #[test]
    fn zero_arity_is_declared_not_inferred() {
        for kind in [
            ActionType::StoreConst,
            ActionType::StoreTrue,
            ActionType::StoreFalse,
            ActionType::Help,
            ActionType::Version,
        ] {
            let action = Action::new(kind, vec!["-x".into()], "x".into());
            assert_eq!(action.arity(), Arity::Zero, "{kind} must consume nothing");
        }

        let mut action = store("x");
        action.nargs(Nargs::Zero);
        assert_eq!(action.arity(), Arity::Zero);
    }

    #[test]
    fn store_requires_a_value_for_single_arity() {
        let mut ns = Namespace::new();
        let action = store("file");

        let error = action.invoke(&mut ns, &[], "--file").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ValueExpected { .. }));
    }

    #[test]
    fn store_joins_multiple_values_with_spaces() {
        let mut ns = Namespace::new();
        let mut action = store("input");
        action.nargs(Nargs::OneOrMore);

        let values = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        action.invoke(&mut ns, &values, "--input").unwrap();

        assert_eq!(ns.get::<String>("input").unwrap(), "a b c");
    }

    #[test]
    fn store_zero_or_more_with_no_values_leaves_dest_unset() {
        let mut ns = Namespace::new();
        let mut action = store("input");
        action.nargs(Nargs::ZeroOrMore);

        action.invoke(&mut ns, &[], "--input").unwrap();
        assert!(!ns.contains("input"));
    }

    #[test]
    fn optional_nargs_falls_back_to_const_then_default() {
        let mut action = store("level");
        action.nargs(Nargs::Optional).constant("full").default("none");

        let mut ns = Namespace::new();
        action.invoke(&mut ns, &["basic".to_owned()], "--level").unwrap();
        assert_eq!(ns.get::<String>("level").unwrap(), "basic");

        let mut ns = Namespace::new();
        action.invoke(&mut ns, &[], "--level").unwrap();
        assert_eq!(ns.get::<String>("level").unwrap(), "full");

        let mut bare = store("level");
        bare.nargs(Nargs::Optional).default("none");
        let mut ns = Namespace::new();
        bare.invoke(&mut ns, &[], "--level").unwrap();
        assert_eq!(ns.get::<String>("level").unwrap(), "none");

        let mut unset = store("level");
        unset.nargs(Nargs::Optional);
        let mut ns = Namespace::new();
        unset.invoke(&mut ns, &[], "--level").unwrap();
        assert!(!ns.contains("level"));
    }

    #[test]
    fn choices_are_enforced_per_value() {
        let mut action = store("mode");
        action.nargs(Nargs::OneOrMore).choices(["auto", "manual"]);

        let mut ns = Namespace::new();
        let values = vec!["auto".to_owned(), "debug".to_owned()];
        let error = action.invoke(&mut ns, &values, "--mode").unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::InvalidChoice { .. }));
        assert!(error.to_string().contains("Invalid choice: 'debug'"));
    }

    #[test]
    fn store_true_presets() {
        let action = Action::new(ActionType::StoreTrue, vec!["-v".into()], "verbose".into());
        assert_eq!(action.const_value(), Some("true"));
        assert_eq!(action.default_value(), Some("false"));

        let mut ns = Namespace::new();
        assert_eq!(action.invoke(&mut ns, &[], "-v").unwrap(), Flow::Continue);
        assert!(ns.get::<bool>("verbose").unwrap());
    }

    #[test]
    fn help_and_version_request_short_circuit() {
        let help = Action::new(ActionType::Help, vec!["-h".into()], "help".into());
        let version = Action::new(ActionType::Version, vec!["-V".into()], "version".into());

        let mut ns = Namespace::new();
        assert_eq!(help.invoke(&mut ns, &[], "-h").unwrap(), Flow::Help);
        assert_eq!(version.invoke(&mut ns, &[], "-V").unwrap(), Flow::Version);
        assert!(ns.is_empty());
    }
}
