use crate::lint::{self, Linter};
pub use crate::lint::Cset;
use crate::schema::ais;
use crate::Error;
use std::cmp::Ordering;
use std::sync::Arc;
use std::{error, fmt};

/// Shortest AI code, in digits.
pub const MIN_AI_LEN: usize = 2;
/// Longest AI code, in digits.
pub const MAX_AI_LEN: usize = 4;

/// Longest value a vivified unknown AI accepts.
const UNKNOWN_AI_MAX: usize = 90;

/// Whether an AI may appear as a data attribute in a Digital Link URI
/// query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlAttr {
    /// Never a valid data attribute
    No,
    /// Valid data attribute
    Permitted,
    /// Vivified entry; acceptance is governed by the
    /// [`Validation::UnknownAiNotDlAttr`](crate::Validation) toggle
    Unknown,
}

/// One field of an AI's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub cset: Cset,
    pub min: usize,
    pub max: usize,
    pub mandatory: bool,
    pub linters: Vec<Linter>,
}

/// A dictionary entry: the schema for one Application Identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiEntry {
    /// AI code digits; empty for the generic unknown pseudo-entry
    pub ai: String,
    /// Whether the value must be FNC1-terminated (variable length)
    pub fnc1: bool,
    pub dl_attr: DlAttr,
    pub components: Vec<Component>,
    /// `Some` when this AI is a DL primary key; each inner list is one
    /// alternative ordered qualifier chain
    pub dl_key_chains: Option<Vec<Vec<String>>>,
    /// `ex=` tokens: AIs (or digit prefixes) that may not co-occur
    pub exclusions: Vec<String>,
    /// `req=` tokens: each is a list of `+`-joined all-of groups, any one
    /// of which satisfies the token
    pub requisites: Vec<Vec<Vec<String>>>,
}

impl AiEntry {
    /// Sum of the mandatory components' minimum lengths.
    #[must_use]
    pub fn min_length(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.mandatory)
            .map(|c| c.min)
            .sum()
    }

    /// Sum of all components' maximum lengths.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.components.iter().map(|c| c.max).sum()
    }

    #[must_use]
    pub fn is_dl_primary_key(&self) -> bool {
        self.dl_key_chains.is_some()
    }

    /// Full value validation: length window, then per-component
    /// character-set and additional linters, first failure wins.
    pub(crate) fn check_value(&self, value: &str) -> Result<(), Error> {
        let ai = || self.ai.clone();
        if value.is_empty() {
            return Err(Error::AiDataEmpty { ai: ai() });
        }
        if value.contains('^') {
            return Err(Error::AiValueContainsFnc1 { ai: ai() });
        }
        if value.len() < self.min_length() || value.len() > self.max_length() {
            return Err(Error::AiDataHasIncorrectLength { ai: ai() });
        }
        let mut off = 0;
        for comp in &self.components {
            let remaining = value.len() - off;
            if remaining == 0 {
                if comp.mandatory {
                    return Err(Error::AiDataHasIncorrectLength { ai: ai() });
                }
                break;
            }
            let take = remaining.min(comp.max);
            if take < comp.min {
                return Err(Error::AiDataHasIncorrectLength { ai: ai() });
            }
            let slice = &value.as_bytes()[off..off + take];
            let lints = std::iter::once(None)
                .chain(comp.linters.iter().map(Some))
                .map(|l| match l {
                    None => comp.cset.check(slice),
                    Some(l) => l.check(slice),
                });
            for result in lints {
                if let Err(failure) = result {
                    return Err(Error::Lint {
                        ai: ai(),
                        code: failure.code,
                        markup: lint::markup(&self.ai, value, off + failure.pos, failure.len),
                    });
                }
            }
            off += take;
        }
        if off < value.len() {
            return Err(Error::AiDataHasIncorrectLength { ai: ai() });
        }
        Ok(())
    }
}

/// Dictionary load failures. All are fatal to the load; the embedded
/// default table remains available as a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    BadAiCode { ai: String },
    DuplicateAiCode { ai: String },
    /// Two AIs sharing a 2-digit prefix declare different code lengths
    ConflictingPrefixLength { prefix: String },
    BadComponentSpec { ai: String, spec: String },
    UnknownLinter { ai: String, name: String },
    BadAttribute { ai: String, attr: String },
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadAiCode { ai } => write!(f, "AI code `{ai}` is not 2 to 4 digits"),
            Self::DuplicateAiCode { ai } => write!(f, "AI `{ai}` defined twice"),
            Self::ConflictingPrefixLength { prefix } => {
                write!(f, "AIs with prefix `{prefix}` declare different lengths")
            }
            Self::BadComponentSpec { ai, spec } => {
                write!(f, "AI `{ai}` has a malformed component spec `{spec}`")
            }
            Self::UnknownLinter { ai, name } => {
                write!(f, "AI `{ai}` names an unknown linter `{name}`")
            }
            Self::BadAttribute { ai, attr } => {
                write!(f, "AI `{ai}` has a malformed attribute `{attr}`")
            }
        }
    }
}

impl error::Error for DictionaryError {}

/// The immutable AI table: sorted entries plus the derived
/// length-by-prefix index.
#[derive(Debug, Clone)]
pub struct AiDictionary {
    entries: Vec<Arc<AiEntry>>,
    length_by_prefix: [u8; 100],
}

impl Default for AiDictionary {
    /// The embedded GenSpecs table. Its well-formedness is pinned by a
    /// unit test, so the load cannot fail here.
    fn default() -> Self {
        Self::from_rows(ais::DEFAULT_AIS).expect("embedded AI table is well-formed")
    }
}

impl AiDictionary {
    /// Builds a dictionary from compact table rows of the form
    /// `(code, fnc1, component spec, attributes)`.
    pub fn from_rows(
        rows: &[(&str, bool, &str, &str)],
    ) -> Result<Self, DictionaryError> {
        let mut entries = Vec::with_capacity(rows.len());
        for &(ai, fnc1, spec, attrs) in rows {
            entries.push(Arc::new(parse_row(ai, fnc1, spec, attrs)?));
        }
        entries.sort_by(|a, b| a.ai.cmp(&b.ai));
        if let Some(w) = entries.windows(2).find(|w| w[0].ai == w[1].ai) {
            return Err(DictionaryError::DuplicateAiCode { ai: w[0].ai.clone() });
        }
        let mut length_by_prefix = [0u8; 100];
        for entry in &entries {
            let pp = prefix_index(entry.ai.as_bytes());
            let len = entry.ai.len() as u8;
            if length_by_prefix[pp] != 0 && length_by_prefix[pp] != len {
                return Err(DictionaryError::ConflictingPrefixLength {
                    prefix: entry.ai[..2].to_string(),
                });
            }
            length_by_prefix[pp] = len;
        }
        Ok(Self {
            entries,
            length_by_prefix,
        })
    }

    pub(crate) fn entries(&self) -> &[Arc<AiEntry>] {
        &self.entries
    }

    /// The AI code length declared for `data`'s 2-digit prefix, or 0.
    pub(crate) fn declared_length(&self, data: &str) -> usize {
        let bytes = data.as_bytes();
        if bytes.len() < 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
            return 0;
        }
        self.length_by_prefix[prefix_index(bytes)] as usize
    }

    /// Resolves the AI at the start of `data`.
    ///
    /// With `exact_len == 0` the code length is inferred from the table;
    /// otherwise the match must have exactly that length. When
    /// `permit_unknown` is set, unrecognised codes are vivified into
    /// pseudo-entries subject to the prefix-length rules. Pure: reads
    /// only the dictionary and its arguments.
    pub fn lookup(
        &self,
        data: &str,
        exact_len: usize,
        permit_unknown: bool,
    ) -> Option<Arc<AiEntry>> {
        let bytes = data.as_bytes();
        if exact_len > 0 && !(MIN_AI_LEN..=MAX_AI_LEN).contains(&exact_len) {
            return None;
        }
        let need = exact_len.max(MIN_AI_LEN);
        if bytes.len() < need || !bytes[..need].iter().all(u8::is_ascii_digit) {
            return None;
        }

        if let Ok(idx) = self
            .entries
            .binary_search_by(|e| cmp_code_prefix(&e.ai, data))
        {
            let entry = &self.entries[idx];
            if exact_len == 0 || exact_len == entry.ai.len() {
                return Some(Arc::clone(entry));
            }
            return None;
        }

        if !permit_unknown {
            return None;
        }
        // Never vivify a code that is a proper prefix of a known AI.
        if exact_len > 0 && self.has_code_with_prefix(&data[..exact_len]) {
            return None;
        }
        let pp = prefix_index(bytes);
        let fnc1 = !ais::FIXED_VALUE_PREFIX[pp];
        let declared = self.length_by_prefix[pp] as usize;
        if declared != 0 {
            if exact_len != 0 && declared != exact_len {
                return None;
            }
            if bytes.len() < declared || !bytes[..declared].iter().all(u8::is_ascii_digit) {
                return None;
            }
            return Some(Arc::new(unknown_entry(&data[..declared], fnc1)));
        }
        if exact_len != 0 {
            return Some(Arc::new(unknown_entry(&data[..exact_len], fnc1)));
        }
        // Prefix length indeterminate: the generic unknown pseudo-entry.
        Some(Arc::new(unknown_entry("", fnc1)))
    }

    fn has_code_with_prefix(&self, prefix: &str) -> bool {
        self.entries
            .binary_search_by(|e| {
                if e.ai.starts_with(prefix) {
                    Ordering::Equal
                } else {
                    e.ai.as_str().cmp(prefix)
                }
            })
            .is_ok()
    }
}

fn prefix_index(code: &[u8]) -> usize {
    (code[0] - b'0') as usize * 10 + (code[1] - b'0') as usize
}

/// Orders `code` against `data` treating a code that prefixes `data` as
/// equal.
fn cmp_code_prefix(code: &str, data: &str) -> Ordering {
    let n = code.len().min(data.len());
    match code.as_bytes()[..n].cmp(&data.as_bytes()[..n]) {
        Ordering::Equal if code.len() <= data.len() => Ordering::Equal,
        Ordering::Equal => Ordering::Greater,
        other => other,
    }
}

fn unknown_entry(ai: &str, fnc1: bool) -> AiEntry {
    AiEntry {
        ai: ai.to_string(),
        fnc1,
        dl_attr: DlAttr::Unknown,
        components: vec![Component {
            cset: Cset::X,
            min: 1,
            max: UNKNOWN_AI_MAX,
            mandatory: true,
            linters: Vec::new(),
        }],
        dl_key_chains: None,
        exclusions: Vec::new(),
        requisites: Vec::new(),
    }
}

fn parse_row(
    ai: &str,
    fnc1: bool,
    spec: &str,
    attrs: &str,
) -> Result<AiEntry, DictionaryError> {
    if !(MIN_AI_LEN..=MAX_AI_LEN).contains(&ai.len())
        || !ai.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(DictionaryError::BadAiCode { ai: ai.to_string() });
    }
    let mut components = Vec::new();
    for token in spec.split_ascii_whitespace() {
        components.push(parse_component(ai, token)?);
    }
    if components.is_empty() {
        return Err(DictionaryError::BadComponentSpec {
            ai: ai.to_string(),
            spec: spec.to_string(),
        });
    }

    let mut entry = AiEntry {
        ai: ai.to_string(),
        fnc1,
        dl_attr: DlAttr::Permitted,
        components,
        dl_key_chains: None,
        exclusions: Vec::new(),
        requisites: Vec::new(),
    };
    for attr in attrs.split_ascii_whitespace() {
        let bad = || DictionaryError::BadAttribute {
            ai: ai.to_string(),
            attr: attr.to_string(),
        };
        if attr == "dlpkey" {
            entry.dl_key_chains = Some(Vec::new());
        } else if let Some(chains) = attr.strip_prefix("dlpkey=") {
            let chains: Vec<Vec<String>> = chains
                .split('|')
                .map(|chain| chain.split(',').map(str::to_string).collect())
                .collect();
            if chains.iter().flatten().any(String::is_empty) {
                return Err(bad());
            }
            entry.dl_key_chains = Some(chains);
        } else if let Some(list) = attr.strip_prefix("ex=") {
            if list.split(',').any(str::is_empty) {
                return Err(bad());
            }
            entry.exclusions.extend(list.split(',').map(str::to_string));
        } else if let Some(list) = attr.strip_prefix("req=") {
            let groups: Vec<Vec<String>> = list
                .split(',')
                .map(|group| group.split('+').map(str::to_string).collect())
                .collect();
            if groups.iter().flatten().any(String::is_empty) {
                return Err(bad());
            }
            entry.requisites.push(groups);
        } else if attr == "nodlattr" {
            entry.dl_attr = DlAttr::No;
        } else {
            return Err(bad());
        }
    }
    Ok(entry)
}

/// Parses one component token: `N14`, `X..20`, `N6..12`, `[N4,hhmm]`,
/// with an optional comma-separated linter list.
fn parse_component(ai: &str, token: &str) -> Result<Component, DictionaryError> {
    let bad = || DictionaryError::BadComponentSpec {
        ai: ai.to_string(),
        spec: token.to_string(),
    };
    let (token, mandatory) = match token.strip_prefix('[') {
        Some(inner) => (inner.strip_suffix(']').ok_or_else(bad)?, false),
        None => (token, true),
    };
    let mut parts = token.split(',');
    let lenspec = parts.next().ok_or_else(bad)?;
    let cset = Cset::from_tag(*lenspec.as_bytes().first().ok_or_else(bad)?).ok_or_else(bad)?;
    let lenspec = &lenspec[1..];
    let (min, max) = match lenspec.split_once("..") {
        Some(("", max)) => (1, max.parse().map_err(|_| bad())?),
        Some((min, max)) => (
            min.parse().map_err(|_| bad())?,
            max.parse().map_err(|_| bad())?,
        ),
        None => {
            let len = lenspec.parse().map_err(|_| bad())?;
            (len, len)
        }
    };
    if min == 0 || max < min {
        return Err(bad());
    }
    let mut linters = Vec::new();
    for name in parts {
        linters.push(Linter::from_name(name).ok_or_else(|| DictionaryError::UnknownLinter {
            ai: ai.to_string(),
            name: name.to_string(),
        })?);
    }
    Ok(Component {
        cset,
        min,
        max,
        mandatory,
        linters,
    })
}

#[test]
fn test_default_table_loads() {
    let dict = AiDictionary::default();
    // every AI's code length matches its prefix declaration
    for entry in dict.entries() {
        assert_eq!(entry.ai.len(), dict.declared_length(&entry.ai), "{}", entry.ai);
    }
}

#[test]
fn test_lookup_known() {
    let dict = AiDictionary::default();
    let gtin = dict.lookup("0112345678901231", 0, false).unwrap();
    assert_eq!(gtin.ai, "01");
    assert!(!gtin.fnc1);
    assert!(gtin.is_dl_primary_key());
    assert_eq!(dict.lookup("01", 2, false).unwrap().ai, "01");
    assert_eq!(dict.lookup("8013XYZ", 0, false).unwrap().ai, "8013");
    // 253 must not resolve for exact_len 2 or 4
    assert!(dict.lookup("2531234567890", 2, false).is_none());
    assert!(dict.lookup("2531234567890", 4, false).is_none());
    // non-digit rejected up front
    assert!(dict.lookup("x1", 0, false).is_none());
    assert!(dict.lookup("0x", 2, false).is_none());
}

#[test]
fn test_lookup_vivification() {
    let dict = AiDictionary::default();
    // unknown AIs are not resolved unless permitted
    assert!(dict.lookup("89ABC", 0, false).is_none());
    let viv = dict.lookup("89ABC", 2, true).unwrap();
    assert_eq!(viv.ai, "89");
    assert!(viv.fnc1);
    assert_eq!(viv.dl_attr, DlAttr::Unknown);
    // with no declared prefix length and no exact length, only the
    // generic unknown pseudo-entry is available
    let generic = dict.lookup("89ABC", 0, true).unwrap();
    assert_eq!(generic.ai, "");
    // prefix 25 declares length 3, so a 2-digit AI cannot be vivified
    assert!(dict.lookup("25", 2, true).is_none());
    // prefix 23 declares length 3 (235); 234 vivifies at that length
    let viv = dict.lookup("234X", 0, true).unwrap();
    assert_eq!(viv.ai, "234");
    assert!(viv.fnc1);
    // a predefined-length prefix yields a non-FNC1 pseudo-entry
    let viv = dict.lookup("14123", 2, true).unwrap();
    assert_eq!(viv.ai, "14");
    assert!(!viv.fnc1);
    // lookup is deterministic
    let a = dict.lookup("0112345678901231", 0, false).unwrap();
    let b = dict.lookup("0112345678901231", 0, false).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_conflicting_prefix_length() {
    let rows = [
        ("80", true, "X..20", ""),
        ("8001", true, "N14", ""),
    ];
    assert_eq!(
        AiDictionary::from_rows(&rows).unwrap_err(),
        DictionaryError::ConflictingPrefixLength {
            prefix: "80".to_string()
        }
    );
}

#[test]
fn test_check_value() {
    let dict = AiDictionary::default();
    let gtin = dict.lookup("01", 2, false).unwrap();
    assert!(gtin.check_value("12312312312326").is_ok());
    assert_eq!(
        gtin.check_value("123"),
        Err(Error::AiDataHasIncorrectLength { ai: "01".into() })
    );
    assert_eq!(
        gtin.check_value(""),
        Err(Error::AiDataEmpty { ai: "01".into() })
    );
    let batch = dict.lookup("10", 2, false).unwrap();
    assert_eq!(
        batch.check_value("AB^C"),
        Err(Error::AiValueContainsFnc1 { ai: "10".into() })
    );
    // optional serial component of (253) may be absent
    let gdti = dict.lookup("253", 3, false).unwrap();
    assert!(gdti.check_value("1231231231232").is_ok());
    assert!(gdti.check_value("1231231231232ABC").is_ok());
    // lint failure carries the markup
    assert_eq!(
        gtin.check_value("12345678901234"),
        Err(Error::Lint {
            ai: "01".into(),
            code: crate::LintError::IncorrectCheckDigit,
            markup: "(01)1234567890123|4|".into(),
        })
    );
}