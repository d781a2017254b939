//! GS1 Application Identifier syntax engine
//!
//! Parses and validates AI element strings in their bracketed
//! (`(01)12345678901231(10)ABC123`) and unbracketed
//! (`^0112345678901231^10ABC123`, `^` standing for FNC1) forms as well as
//! GS1 Digital Link URIs, and synthesises canonical Digital Link URIs from
//! parsed AI data.

/// AI dictionary, lookup and vivification
pub mod dictionary;
/// Digital Link URI parser and generator
mod dl;
/// Element-string parsers
mod elements;
/// Engine state
pub mod engine;
/// Key-qualifier association index
mod keyquals;
/// Per-component character-set and semantic linters
pub mod lint;
/// Cross-AI validators
pub mod validate;

/// Definitions from the GS1 General Specifications AI index
mod schema {
    /// Default Application Identifier table rows
    pub(crate) mod ais;
}

pub use self::dictionary::{AiDictionary, AiEntry, Component, Cset, DictionaryError, DlAttr};
pub use self::dl::{escape_uri, unescape_uri};
pub use self::engine::{Engine, ParsedAi};
pub use self::lint::LintError;
pub use self::validate::Validation;
use std::{error, fmt};

/// Longest input accepted by any of the three parsers, in bytes.
pub const MAX_DATA: usize = 8191;

/// Most parsed AIs a single engine holds.
pub const MAX_AIS: usize = 16;

/// Failures reported while parsing, validating or generating AI data.
///
/// The first error aborts the operation; the engine's canonical buffer and
/// parsed-AI list are left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input exceeds [`MAX_DATA`] bytes
    DataTooLong,
    /// More than [`MAX_AIS`] AIs in one input
    TooManyAis,
    /// Unbracketed data must begin with `^`
    MissingFnc1InFirstPosition,
    /// Bracketed element expected `(` at this position
    ExpectedOpeningBracket,
    /// Bracketed AI has no closing `)`
    UnterminatedAi,
    /// The 2-digit prefix declares no AI length
    NoAiForPrefix { ai: String },
    /// No dictionary entry matches and vivification is off or impossible
    AiUnrecognised { ai: String },
    /// The AI carries no value
    AiDataEmpty { ai: String },
    /// Value length outside the AI's schema bounds
    AiDataHasIncorrectLength { ai: String },
    /// FNC1-terminated AI ran past its maximum length
    AiDataIsTooLong { ai: String },
    /// Element-string value contains the reserved `^`
    AiValueContainsFnc1 { ai: String },
    /// DL URI scheme is not `http`/`https` in a single case
    UnsupportedUriScheme,
    /// DL URI domain contains a forbidden character
    DomainContainsIllegalCharacters,
    /// DL URI contains a byte outside the URI alphabet, or a percent
    /// escape decoding to NUL
    UriContainsIllegalCharacters,
    /// No path component pair starts with a primary-key AI
    NoPrimaryKeyInDlUriPath,
    /// An AI code occurs twice in a DL URI
    DuplicateAi { ai: String },
    /// The DL path AI sequence is not a known key-qualifier sequence
    InvalidKeyQualifierSequence { sequence: String },
    /// A query AI belongs in the URI path for this primary key
    AiShouldBeInPathInfo { ai: String },
    /// The AI may not be used as a DL data attribute
    AiIsNotValidDataAttribute { ai: String },
    /// No parsed AI is a DL primary key
    CannotCreateDlUriWithoutPrimaryKeyAi,
    /// Two mutually exclusive AIs are both present
    InvalidAiPairs { ai: String, other: String },
    /// None of the AI's requisite groups is wholly present
    RequiredAisNotSatisfied { ai: String },
    /// Repeated AI instances carry different values
    InstancesOfAiHaveDifferentValues { ai: String },
    /// AI 8030 requires the serial component of this key AI
    SerialNotPresent { ai: String },
    /// The validation may not be toggled
    ValidationIsLocked { validation: Validation },
    /// A component linter rejected the value; `markup` is the
    /// `(AI)prefix|bad|suffix` rendering of the failure
    Lint {
        ai: String,
        code: LintError,
        markup: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataTooLong => write!(f, "input is longer than {MAX_DATA} characters"),
            Self::TooManyAis => write!(f, "too many AIs (maximum {MAX_AIS})"),
            Self::MissingFnc1InFirstPosition => {
                write!(f, "unbracketed AI data must start with FNC1 (\"^\")")
            }
            Self::ExpectedOpeningBracket => write!(f, "expected \"(\" at start of AI element"),
            Self::UnterminatedAi => write!(f, "AI is missing its closing \")\""),
            Self::NoAiForPrefix { ai } => write!(f, "no defined AI length for prefix ({ai})"),
            Self::AiUnrecognised { ai } => write!(f, "unrecognised AI ({ai})"),
            Self::AiDataEmpty { ai } => write!(f, "AI ({ai}) data is empty"),
            Self::AiDataHasIncorrectLength { ai } => {
                write!(f, "AI ({ai}) data has incorrect length")
            }
            Self::AiDataIsTooLong { ai } => write!(f, "AI ({ai}) data is too long"),
            Self::AiValueContainsFnc1 { ai } => {
                write!(f, "AI ({ai}) value contains the FNC1 character \"^\"")
            }
            Self::UnsupportedUriScheme => {
                write!(f, "scheme must be http or https in a single case")
            }
            Self::DomainContainsIllegalCharacters => {
                write!(f, "domain contains illegal characters")
            }
            Self::UriContainsIllegalCharacters => write!(f, "URI contains illegal characters"),
            Self::NoPrimaryKeyInDlUriPath => {
                write!(f, "no primary key AI in the Digital Link URI path")
            }
            Self::DuplicateAi { ai } => write!(f, "duplicate AI ({ai})"),
            Self::InvalidKeyQualifierSequence { sequence } => {
                write!(f, "invalid key-qualifier sequence: {sequence}")
            }
            Self::AiShouldBeInPathInfo { ai } => {
                write!(f, "AI ({ai}) from the query belongs in the URI path")
            }
            Self::AiIsNotValidDataAttribute { ai } => {
                write!(f, "AI ({ai}) is not a valid DL URI data attribute")
            }
            Self::CannotCreateDlUriWithoutPrimaryKeyAi => {
                write!(f, "cannot create a DL URI without a primary key AI")
            }
            Self::InvalidAiPairs { ai, other } => {
                write!(f, "AIs ({ai}) and ({other}) are invalid together")
            }
            Self::RequiredAisNotSatisfied { ai } => {
                write!(f, "AIs required by ({ai}) are not present")
            }
            Self::InstancesOfAiHaveDifferentValues { ai } => {
                write!(f, "instances of AI ({ai}) have different values")
            }
            Self::SerialNotPresent { ai } => {
                write!(f, "AI (8030) requires a serial component in AI ({ai})")
            }
            Self::ValidationIsLocked { validation } => {
                write!(f, "validation {validation:?} may not be toggled")
            }
            Self::Lint { code, markup, .. } => write!(f, "{code}: {markup}"),
        }
    }
}

impl error::Error for Error {}
