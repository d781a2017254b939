use crate::dictionary::DlAttr;
use crate::engine::{emit_ai, push_dl_ignored, Engine, ParsedAi};
use crate::lint;
use crate::validate::Validation;
use crate::{Error, MAX_DATA};

/// Default stem for generated Digital Link URIs.
const DEFAULT_STEM: &str = "https://id.gs1.org";

/// GTIN value lengths eligible for zero-padding to 14 digits.
const ZERO_SUPPRESSED_GTIN_LENGTHS: [usize; 3] = [8, 12, 13];

/// Percent-decodes one URI component.
///
/// `%HH` with two hex digits decodes to the byte; malformed escapes are
/// copied verbatim. In query mode `+` decodes to a space, in path mode
/// it stays literal. Returns `None` for a decoded NUL or a byte
/// sequence that is not UTF-8.
#[must_use]
pub fn unescape_uri(input: &str, query: bool) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                let hi = (bytes[i + 1] as char).to_digit(16).unwrap_or(0) as u8;
                let lo = (bytes[i + 2] as char).to_digit(16).unwrap_or(0) as u8;
                let byte = hi << 4 | lo;
                if byte == 0 {
                    return None;
                }
                out.push(byte);
                i += 3;
            }
            b'+' if query => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

/// Percent-encodes one URI component: unreserved characters pass
/// through, a space becomes `+` in query mode and `%20` in path mode,
/// everything else is `%HH`.
#[must_use]
pub fn escape_uri(value: &str, query: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' if query => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from_digit(u32::from(b >> 4), 16).unwrap_or('0').to_ascii_uppercase());
                out.push(char::from_digit(u32::from(b & 15), 16).unwrap_or('0').to_ascii_uppercase());
            }
        }
    }
    out
}

/// Left-pads a zero-suppressed GTIN to its full 14 digits.
fn pad_gtin(value: &mut String) {
    if ZERO_SUPPRESSED_GTIN_LENGTHS.contains(&value.len())
        && value.bytes().all(|b| b.is_ascii_digit())
    {
        let mut padded = "0".repeat(14 - value.len());
        padded.push_str(value);
        *value = padded;
    }
}

impl Engine {
    /// Parses a GS1 Digital Link URI into the canonical form.
    ///
    /// The rightmost path pair whose AI is a DL primary key starts the
    /// AI portion of the path (everything to its left is the stem); the
    /// path sequence must be a known key-qualifier sequence, and each
    /// query AI must be a valid data attribute that could not instead
    /// extend the path.
    pub fn parse_dl_uri(&mut self, uri: &str) -> Result<(), Error> {
        self.reset();
        if uri.len() > MAX_DATA {
            return Err(Error::DataTooLong);
        }
        if uri.bytes().any(|b| !lint::is_uri_char(b)) {
            return Err(Error::UriContainsIllegalCharacters);
        }
        let rest = ["https://", "http://", "HTTPS://", "HTTP://"]
            .iter()
            .find_map(|scheme| uri.strip_prefix(scheme))
            .ok_or(Error::UnsupportedUriScheme)?;

        // drop the fragment, then split off the query
        let rest = rest.split('#').next().unwrap_or(rest);
        let (rest, query) = match rest.split_once('?') {
            Some((r, q)) => (r, Some(q)),
            None => (rest, None),
        };

        let (domain, path) = rest
            .split_once('/')
            .ok_or(Error::NoPrimaryKeyInDlUriPath)?;
        if domain.is_empty() || domain.bytes().any(lint::is_bad_domain_char) {
            return Err(Error::DomainContainsIllegalCharacters);
        }

        let comps: Vec<&str> = path.split('/').collect();
        let key_i = (0..comps.len().saturating_sub(1))
            .rev()
            .find(|&i| self.keyquals.is_primary_key(comps[i]))
            .ok_or(Error::NoPrimaryKeyInDlUriPath)?;

        let mut data = String::new();
        let mut ais = Vec::new();
        let pairs = &comps[key_i..];
        if pairs.len() % 2 != 0 {
            return Err(Error::AiDataEmpty {
                ai: pairs[pairs.len() - 1].to_string(),
            });
        }
        let mut path_codes: Vec<String> = Vec::with_capacity(pairs.len() / 2);
        for (j, pair) in pairs.chunks_exact(2).enumerate() {
            let (code, raw) = (pair[0], pair[1]);
            let entry = self
                .dict
                .lookup(code, code.len(), self.permit_unknown_ais)
                .ok_or_else(|| self.unknown_ai_error(code))?;
            if raw.is_empty() {
                return Err(Error::AiDataEmpty {
                    ai: entry.ai.clone(),
                });
            }
            let mut value =
                unescape_uri(raw, false).ok_or(Error::UriContainsIllegalCharacters)?;
            if entry.ai == "01" && self.permit_zero_suppressed_gtin_in_dl_uris {
                pad_gtin(&mut value);
            }
            entry.check_value(&value)?;
            path_codes.push(entry.ai.clone());
            emit_ai(&mut data, &mut ais, entry, &value, Some(j))?;
        }

        let seq: Vec<&str> = path_codes.iter().map(String::as_str).collect();
        if !self.keyquals.contains(&seq) {
            return Err(Error::InvalidKeyQualifierSequence {
                sequence: seq.join(" "),
            });
        }

        for seg in query.unwrap_or_default().split('&').filter(|s| !s.is_empty()) {
            let Some((key, raw)) = seg.split_once('=') else {
                push_dl_ignored(&mut ais, seg.to_string())?;
                continue;
            };
            if key.is_empty() || key.bytes().any(|b| !b.is_ascii_digit()) {
                push_dl_ignored(&mut ais, seg.to_string())?;
                continue;
            }
            let entry = self
                .dict
                .lookup(key, key.len(), self.permit_unknown_ais)
                .ok_or_else(|| self.unknown_ai_error(key))?;
            if raw.is_empty() {
                return Err(Error::AiDataEmpty {
                    ai: entry.ai.clone(),
                });
            }
            let mut value =
                unescape_uri(raw, true).ok_or(Error::UriContainsIllegalCharacters)?;
            if entry.ai == "01" {
                // query position pads regardless of the zero-suppression flag
                pad_gtin(&mut value);
            }
            entry.check_value(&value)?;
            emit_ai(&mut data, &mut ais, entry, &value, None)?;
        }

        self.check_attribute_placement(&data, &ais, &seq)?;
        self.run_validators(&data, &ais)?;
        self.commit(data, ais);
        Ok(())
    }

    /// Post-parse checks for each query data attribute: no duplicate of
    /// any parsed AI, a permitted DL attribute class, and no position in
    /// the path where the AI would extend the key-qualifier sequence.
    fn check_attribute_placement(
        &self,
        data: &str,
        ais: &[ParsedAi],
        path_seq: &[&str],
    ) -> Result<(), Error> {
        let codes: Vec<Option<&str>> = ais
            .iter()
            .map(|a| match a {
                ParsedAi::Value { ai, .. } => Some(&data[ai.clone()]),
                ParsedAi::DlIgnored { .. } => None,
            })
            .collect();
        for (i, parsed) in ais.iter().enumerate() {
            let ParsedAi::Value {
                entry,
                dl_path_order: None,
                ..
            } = parsed
            else {
                continue;
            };
            let code = codes[i].unwrap_or_default();
            if codes
                .iter()
                .enumerate()
                .any(|(j, c)| j != i && *c == Some(code))
            {
                return Err(Error::DuplicateAi {
                    ai: code.to_string(),
                });
            }
            match entry.dl_attr {
                DlAttr::Permitted => {}
                DlAttr::No => {
                    return Err(Error::AiIsNotValidDataAttribute {
                        ai: code.to_string(),
                    });
                }
                DlAttr::Unknown => {
                    if self.enabled[Validation::UnknownAiNotDlAttr as usize] {
                        return Err(Error::AiIsNotValidDataAttribute {
                            ai: code.to_string(),
                        });
                    }
                }
            }
            for j in 1..=path_seq.len() {
                let mut candidate = path_seq.to_vec();
                candidate.insert(j, code);
                if self.keyquals.contains(&candidate) {
                    return Err(Error::AiShouldBeInPathInfo {
                        ai: code.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Synthesises a canonical Digital Link URI from the parsed AIs.
    ///
    /// The primary key is the first parsed AI eligible as one; the
    /// qualifier chain is the index entry for that key maximising the
    /// qualifiers actually present (ties resolve to index order).
    /// Remaining AIs become query data attributes, fixed-length first.
    /// On success `dl_path_order` is reassigned to record the chosen
    /// path.
    pub fn dl_uri(&mut self, stem: Option<&str>) -> Result<String, Error> {
        struct Slot {
            idx: usize,
            code: String,
            value: String,
            fnc1: bool,
            dl_attr: DlAttr,
        }
        let slots: Vec<Slot> = self
            .ais
            .iter()
            .enumerate()
            .filter_map(|(idx, a)| match a {
                ParsedAi::Value {
                    entry, ai, value, ..
                } => Some(Slot {
                    idx,
                    code: self.data[ai.clone()].to_string(),
                    value: self.data[value.clone()].to_string(),
                    fnc1: entry.fnc1,
                    dl_attr: entry.dl_attr,
                }),
                ParsedAi::DlIgnored { .. } => None,
            })
            .collect();

        let key = slots
            .iter()
            .find(|s| self.keyquals.is_primary_key(&s.code))
            .ok_or(Error::CannotCreateDlUriWithoutPrimaryKeyAi)?;

        let mut chain: Vec<&str> = Vec::new();
        for seq in self.keyquals.sequences_for_key(&key.code) {
            let parts: Vec<&str> = seq.split(' ').collect();
            if parts.len() > chain.len()
                && parts[1..].iter().all(|q| slots.iter().any(|s| s.code == *q))
            {
                chain = parts;
            }
        }

        // first instance of each chain element carries the path value
        let mut path_slots: Vec<&Slot> = Vec::with_capacity(chain.len());
        for code in &chain {
            let slot = slots
                .iter()
                .find(|s| s.code == *code && !path_slots.iter().any(|p| p.idx == s.idx))
                .ok_or(Error::CannotCreateDlUriWithoutPrimaryKeyAi)?;
            path_slots.push(slot);
        }

        let stem = stem.unwrap_or(DEFAULT_STEM);
        let mut out = String::from(stem.strip_suffix('/').unwrap_or(stem));
        for slot in &path_slots {
            out.push('/');
            out.push_str(&slot.code);
            out.push('/');
            out.push_str(&escape_uri(&slot.value, false));
        }

        // data attributes: fixed-length AIs first, then FNC1-terminated,
        // each in received order, duplicates of emitted codes skipped
        let mut emitted: Vec<&str> = chain.clone();
        let mut query = String::new();
        for pass_fnc1 in [false, true] {
            for slot in &slots {
                if slot.fnc1 != pass_fnc1
                    || path_slots.iter().any(|p| p.idx == slot.idx)
                    || emitted.contains(&slot.code.as_str())
                {
                    continue;
                }
                let permitted = match slot.dl_attr {
                    DlAttr::Permitted => true,
                    DlAttr::No => false,
                    DlAttr::Unknown => {
                        !self.enabled[Validation::UnknownAiNotDlAttr as usize]
                    }
                };
                if !permitted {
                    return Err(Error::AiIsNotValidDataAttribute {
                        ai: slot.code.clone(),
                    });
                }
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&slot.code);
                query.push('=');
                query.push_str(&escape_uri(&slot.value, true));
                emitted.push(slot.code.as_str());
            }
        }
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query);
        }

        let path_order: Vec<usize> = path_slots.iter().map(|s| s.idx).collect();
        for a in &mut self.ais {
            if let ParsedAi::Value { dl_path_order, .. } = a {
                *dl_path_order = None;
            }
        }
        for (order, idx) in path_order.into_iter().enumerate() {
            if let ParsedAi::Value { dl_path_order, .. } = &mut self.ais[idx] {
                *dl_path_order = Some(order);
            }
        }
        Ok(out)
    }
}

#[test]
fn test_unescape_uri() {
    assert_eq!(unescape_uri("%20AB", true).unwrap(), " AB");
    assert_eq!(unescape_uri("+", false).unwrap(), "+");
    assert_eq!(unescape_uri("+", true).unwrap(), " ");
    assert_eq!(unescape_uri("A%2BB", false).unwrap(), "A+B");
    // malformed escapes are copied verbatim
    assert_eq!(unescape_uri("A%2GB", false).unwrap(), "A%2GB");
    assert_eq!(unescape_uri("A%2", false).unwrap(), "A%2");
    // a decoded NUL poisons the whole component
    assert_eq!(unescape_uri("A%00B", true), None);
    assert_eq!(unescape_uri("A%00B", false), None);
}

#[test]
fn test_escape_uri() {
    assert_eq!(escape_uri("ABC+123", false), "ABC%2B123");
    assert_eq!(escape_uri("XYZ QWERTY", true), "XYZ+QWERTY");
    assert_eq!(escape_uri("a b", false), "a%20b");
    assert_eq!(escape_uri("x.y-z_1~", true), "x.y-z_1~");
    assert_eq!(escape_uri("/?#", false), "%2F%3F%23");
}

#[test]
fn test_scheme_and_domain_policing() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.parse_dl_uri("Https://a/01/12312312312333"),
        Err(Error::UnsupportedUriScheme)
    );
    engine
        .parse_dl_uri("HTTPS://A/01/12312312312333")
        .unwrap();
    assert_eq!(
        engine.parse_dl_uri("https://ex_ample.com/01/12312312312333"),
        Err(Error::DomainContainsIllegalCharacters)
    );
    assert_eq!(
        engine.parse_dl_uri("https://a/01/123 123"),
        Err(Error::UriContainsIllegalCharacters)
    );
    assert_eq!(
        engine.parse_dl_uri("https://a.example.com"),
        Err(Error::NoPrimaryKeyInDlUriPath)
    );
    assert_eq!(
        engine.parse_dl_uri("https://a/99/XYZ"),
        Err(Error::NoPrimaryKeyInDlUriPath)
    );
}

#[test]
fn test_zero_suppressed_gtin() {
    let mut engine = Engine::new();
    // path position pads only under the flag
    assert_eq!(
        engine.parse_dl_uri("https://a/01/00000017"),
        Err(Error::AiDataHasIncorrectLength { ai: "01".into() })
    );
    engine.set_permit_zero_suppressed_gtin_in_dl_uris(true);
    engine.parse_dl_uri("https://a/01/00000017").unwrap();
    assert_eq!(engine.data_str(), "^0100000000000017");
    // query position pads unconditionally
    engine.set_permit_zero_suppressed_gtin_in_dl_uris(false);
    engine
        .parse_dl_uri("https://a/00/006141411234567890?01=00000017")
        .unwrap();
    assert_eq!(
        engine.data_str(),
        "^000061414112345678900100000000000017"
    );
}

#[test]
fn test_dl_ignored_query_params() {
    let mut engine = Engine::new();
    engine
        .parse_dl_uri("https://a/01/12312312312333?foo=bar&singleton&99=ABC")
        .unwrap();
    let ignored: Vec<&str> = engine.dl_ignored_query_params().collect();
    assert_eq!(ignored, ["foo=bar", "singleton"]);
    assert_eq!(engine.data_str(), "^011231231231233399ABC");
}

#[test]
fn test_fragment_is_dropped() {
    let mut engine = Engine::new();
    engine
        .parse_dl_uri("https://a/01/12312312312333?99=ABC#frag")
        .unwrap();
    assert_eq!(engine.data_str(), "^011231231231233399ABC");
    engine
        .parse_dl_uri("https://a/01/12312312312333#frag")
        .unwrap();
    assert_eq!(engine.data_str(), "^0112312312312333");
}
