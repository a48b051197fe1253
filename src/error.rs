use thiserror::Error;

use crate::value::ConvertErr;

/// Argument parsing error.
///
/// These are problems with the user's input. They end parsing and are
/// reported together with the usage listing, see [`crate::ParseOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErr {
    /// A flag token that no option is registered under.
    #[error("Unrecognized option: {0}")]
    UnrecognizedOption(String),

    /// The last token was an option that takes a value.
    #[error("Option {0} needs an argument value")]
    MissingArgument(String),

    /// Required options that never appeared, in display form.
    #[error("Options: {} is required", .0.join(" and "))]
    MissingOption(Vec<String>),
}

/// Error in how a command declares its options, or a value that could not
/// be converted to its field type.
///
/// Unlike [`ParseErr`] this is never turned into a help request.
#[derive(Error, Debug)]
pub enum OptionErr {
    #[error("option `{key}` of field `{field}` conflicts with field `{previous}`")]
    Conflict {
        key: String,
        field: String,
        previous: String,
    },

    #[error("the type of field `{field}` must be boolean, as it is declared as no args")]
    NotBoolean { field: String },

    #[error("the value of field `{field}` must be false, as it is declared as no args")]
    TrueDefault { field: String },

    #[error("neither short nor long option is set for field `{field}`")]
    Unnamed { field: String },

    #[error("illegal option name `{name}` for field `{field}`: {reason}")]
    InvalidName {
        field: String,
        name: String,
        reason: String,
    },

    /// A converted value whose tag does not match its field. Guards the
    /// store step; values produced by the parser always match.
    #[error("can't convert [{value}] to type {kind}")]
    Unconvertible { value: String, kind: String },

    #[error("invalid value `{value}` for option {option}")]
    InvalidValue {
        option: String,
        value: String,
        #[source]
        source: ConvertErr,
    },
}

impl OptionErr {
    /// Suggested process exit status, distinct from the one used for
    /// user input problems.
    pub fn exit_code(&self) -> i32 {
        2
    }

    /// Whether the error comes from the command's declarations rather than
    /// from an argument value.
    pub fn is_declaration(&self) -> bool {
        !matches!(self, OptionErr::InvalidValue { .. })
    }
}
