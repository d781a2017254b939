use crate::dictionary::{AiDictionary, AiEntry};
use crate::keyquals::KeyQualifiers;
use crate::validate::{self, Validation};
use crate::{Error, MAX_AIS};
use std::ops::Range;
use std::sync::Arc;

/// One element of the parsed-AI list.
///
/// `Value` spans index into the engine's canonical buffer
/// ([`Engine::data_str`]); concatenating each value's `^` prefix (where
/// required), AI digits and value reproduces the buffer exactly.
#[derive(Debug, Clone)]
pub enum ParsedAi {
    Value {
        entry: Arc<AiEntry>,
        /// AI digits span
        ai: Range<usize>,
        /// Value span
        value: Range<usize>,
        /// Digital Link path position; `None` marks a data attribute
        dl_path_order: Option<usize>,
    },
    /// A non-AI Digital Link query segment, preserved verbatim
    DlIgnored { param: String },
}

impl ParsedAi {
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value { .. })
    }

    /// The dictionary entry, for `Value` elements.
    #[must_use]
    pub fn entry(&self) -> Option<&Arc<AiEntry>> {
        match self {
            Self::Value { entry, .. } => Some(entry),
            Self::DlIgnored { .. } => None,
        }
    }
}

/// The syntax engine: one dictionary binding plus the canonical buffer,
/// parsed-AI list and configuration for a sequence of operations.
///
/// An engine is single-threaded; distinct engines share nothing and may
/// run concurrently. Each parse invalidates the previous buffer and
/// list; a failed parse leaves both empty.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) dict: AiDictionary,
    pub(crate) keyquals: KeyQualifiers,
    pub(crate) permit_unknown_ais: bool,
    pub(crate) permit_zero_suppressed_gtin_in_dl_uris: bool,
    include_data_titles_in_hri: bool,
    pub(crate) enabled: [bool; Validation::COUNT],
    pub(crate) data: String,
    pub(crate) ais: Vec<ParsedAi>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine bound to the embedded default AI table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dictionary(AiDictionary::default())
    }

    /// An engine bound to a caller-supplied dictionary.
    #[must_use]
    pub fn with_dictionary(dict: AiDictionary) -> Self {
        let keyquals = KeyQualifiers::new(&dict);
        Self {
            dict,
            keyquals,
            permit_unknown_ais: false,
            permit_zero_suppressed_gtin_in_dl_uris: false,
            include_data_titles_in_hri: false,
            enabled: [true; Validation::COUNT],
            data: String::new(),
            ais: Vec::new(),
        }
    }

    /// Rebinds the dictionary, rebuilding the key-qualifier index and
    /// discarding any parsed state.
    pub fn set_dictionary(&mut self, dict: AiDictionary) {
        self.keyquals = KeyQualifiers::new(&dict);
        self.dict = dict;
        self.reset();
    }

    #[must_use]
    pub fn dictionary(&self) -> &AiDictionary {
        &self.dict
    }

    /// Parses any of the three accepted forms, dispatching on the first
    /// characters: `^` for unbracketed data, `(` for bracketed data and
    /// an `http`/`https` scheme for a Digital Link URI.
    pub fn set_data_str(&mut self, input: &str) -> Result<(), Error> {
        if input.starts_with('^') {
            self.parse_unbracketed(input)
        } else if input.starts_with('(') {
            self.parse_bracketed(input)
        } else if input.len() >= 4 && input.as_bytes()[..4].eq_ignore_ascii_case(b"http") {
            self.parse_dl_uri(input)
        } else {
            self.reset();
            Err(Error::ExpectedOpeningBracket)
        }
    }

    /// The canonical unbracketed form of the parsed data.
    #[must_use]
    pub fn data_str(&self) -> &str {
        &self.data
    }

    /// The bracketed rendering of the parsed data, values escaping `(`
    /// as `\(`.
    #[must_use]
    pub fn ai_data_str(&self) -> String {
        let mut out = String::with_capacity(self.data.len() + 2 * self.ais.len());
        for (ai, value) in self.ai_data() {
            out.push('(');
            out.push_str(ai);
            out.push(')');
            out.push_str(&value.replace('(', "\\("));
        }
        out
    }

    /// `(code, value)` pairs of the parsed AIs, in parse order.
    pub fn ai_data(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ais.iter().filter_map(|a| match a {
            ParsedAi::Value { ai, value, .. } => {
                Some((&self.data[ai.clone()], &self.data[value.clone()]))
            }
            ParsedAi::DlIgnored { .. } => None,
        })
    }

    /// The parsed-AI list, including preserved non-AI DL query segments.
    #[must_use]
    pub fn parsed_ais(&self) -> &[ParsedAi] {
        &self.ais
    }

    /// Non-AI Digital Link query segments of the last parse, in received
    /// order.
    pub fn dl_ignored_query_params(&self) -> impl Iterator<Item = &str> {
        self.ais.iter().filter_map(|a| match a {
            ParsedAi::DlIgnored { param } => Some(param.as_str()),
            ParsedAi::Value { .. } => None,
        })
    }

    #[must_use]
    pub fn permit_unknown_ais(&self) -> bool {
        self.permit_unknown_ais
    }

    pub fn set_permit_unknown_ais(&mut self, permit: bool) {
        self.permit_unknown_ais = permit;
    }

    #[must_use]
    pub fn permit_zero_suppressed_gtin_in_dl_uris(&self) -> bool {
        self.permit_zero_suppressed_gtin_in_dl_uris
    }

    pub fn set_permit_zero_suppressed_gtin_in_dl_uris(&mut self, permit: bool) {
        self.permit_zero_suppressed_gtin_in_dl_uris = permit;
    }

    #[must_use]
    pub fn include_data_titles_in_hri(&self) -> bool {
        self.include_data_titles_in_hri
    }

    pub fn set_include_data_titles_in_hri(&mut self, include: bool) {
        self.include_data_titles_in_hri = include;
    }

    #[must_use]
    pub fn validation_enabled(&self, validation: Validation) -> bool {
        self.enabled[validation as usize]
    }

    /// Toggles a validation; locked validations reject the change.
    pub fn set_validation_enabled(
        &mut self,
        validation: Validation,
        enabled: bool,
    ) -> Result<(), Error> {
        if validation.locked() {
            return Err(Error::ValidationIsLocked { validation });
        }
        self.enabled[validation as usize] = enabled;
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.data.clear();
        self.ais.clear();
    }

    /// Replaces the engine state with a successfully parsed buffer/list.
    pub(crate) fn commit(&mut self, data: String, ais: Vec<ParsedAi>) {
        self.data = data;
        self.ais = ais;
    }

    /// Runs the enabled cross-AI validators over a candidate list.
    pub(crate) fn run_validators(&self, data: &str, ais: &[ParsedAi]) -> Result<(), Error> {
        let values: Vec<(Arc<AiEntry>, &str)> = ais
            .iter()
            .filter_map(|a| match a {
                ParsedAi::Value { entry, value, .. } => {
                    Some((Arc::clone(entry), &data[value.clone()]))
                }
                ParsedAi::DlIgnored { .. } => None,
            })
            .collect();
        validate::run(&self.enabled, &values)
    }

    /// The error for a failed AI lookup at the start of `data`.
    pub(crate) fn unknown_ai_error(&self, data: &str) -> Error {
        let digits = data.bytes().take_while(u8::is_ascii_digit).count();
        if digits < 2 {
            return Error::AiUnrecognised {
                ai: data.chars().take(4).collect(),
            };
        }
        let declared = self.dict.declared_length(data);
        if declared == 0 {
            Error::NoAiForPrefix {
                ai: data[..2].to_string(),
            }
        } else {
            Error::AiUnrecognised {
                ai: data[..declared.min(digits)].to_string(),
            }
        }
    }
}

/// Appends one AI to a candidate buffer/list pair, inserting the `^`
/// separator demanded by the canonical form: always at the start, and
/// after any value whose AI requires FNC1 termination.
///
/// The parsed-AI list is bounded by [`MAX_AIS`]; values and preserved
/// DL query segments ([`push_dl_ignored`]) occupy the same list.
pub(crate) fn emit_ai(
    data: &mut String,
    ais: &mut Vec<ParsedAi>,
    entry: Arc<AiEntry>,
    value: &str,
    dl_path_order: Option<usize>,
) -> Result<(), Error> {
    if ais.len() == MAX_AIS {
        return Err(Error::TooManyAis);
    }
    let needs_sep = ais
        .iter()
        .rev()
        .find_map(|a| a.entry())
        .is_none_or(|prev| prev.fnc1);
    if needs_sep {
        data.push('^');
    }
    let ai_start = data.len();
    data.push_str(&entry.ai);
    let value_start = data.len();
    data.push_str(value);
    ais.push(ParsedAi::Value {
        entry,
        ai: ai_start..value_start,
        value: value_start..data.len(),
        dl_path_order,
    });
    Ok(())
}

/// Appends a preserved non-AI DL query segment, enforcing the same
/// [`MAX_AIS`] bound as [`emit_ai`].
pub(crate) fn push_dl_ignored(ais: &mut Vec<ParsedAi>, param: String) -> Result<(), Error> {
    if ais.len() == MAX_AIS {
        return Err(Error::TooManyAis);
    }
    ais.push(ParsedAi::DlIgnored { param });
    Ok(())
}

#[test]
fn test_validation_toggles() {
    let mut engine = Engine::new();
    assert!(engine.validation_enabled(Validation::RequisiteAis));
    engine
        .set_validation_enabled(Validation::RequisiteAis, false)
        .unwrap();
    assert!(!engine.validation_enabled(Validation::RequisiteAis));
    assert_eq!(
        engine.set_validation_enabled(Validation::RepeatedAis, false),
        Err(Error::ValidationIsLocked {
            validation: Validation::RepeatedAis
        })
    );
}

#[test]
fn test_set_data_str_dispatch() {
    let mut engine = Engine::new();
    engine.set_data_str("(01)12312312312326").unwrap();
    assert_eq!(engine.data_str(), "^0112312312312326");
    engine.set_data_str("^0112312312312326").unwrap();
    assert_eq!(engine.ai_data_str(), "(01)12312312312326");
    engine
        .set_data_str("https://id.gs1.org/01/12312312312326")
        .unwrap();
    assert_eq!(engine.data_str(), "^0112312312312326");
    assert_eq!(
        engine.set_data_str("hello"),
        Err(Error::ExpectedOpeningBracket)
    );
}