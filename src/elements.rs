use crate::engine::{emit_ai, Engine};
use crate::{Error, MAX_DATA};

impl Engine {
    /// Parses a bracketed AI element string such as
    /// `(01)12312312312326(10)ABC123`.
    ///
    /// Each element is `(` digits `)` value, the value running to the
    /// next unescaped `(`; `\(` denotes a literal `(`. The canonical
    /// unbracketed form is built with `^` separators and the parsed AIs
    /// are fully validated.
    pub fn parse_bracketed(&mut self, input: &str) -> Result<(), Error> {
        self.reset();
        if input.len() > MAX_DATA {
            return Err(Error::DataTooLong);
        }
        let mut data = String::with_capacity(input.len());
        let mut ais = Vec::new();
        let mut rest = input;
        if rest.is_empty() {
            return Err(Error::ExpectedOpeningBracket);
        }
        while !rest.is_empty() {
            rest = rest.strip_prefix('(').ok_or(Error::ExpectedOpeningBracket)?;
            let (code, after) = rest.split_once(')').ok_or(Error::UnterminatedAi)?;
            let (raw, next) = split_element_value(after);
            let entry = self
                .dict
                .lookup(code, code.len(), self.permit_unknown_ais)
                .ok_or_else(|| self.unknown_ai_error(code))?;
            let value = raw.replace("\\(", "(");
            entry.check_value(&value)?;
            emit_ai(&mut data, &mut ais, entry, &value, None)?;
            rest = next;
        }
        self.run_validators(&data, &ais)?;
        self.commit(data, ais);
        Ok(())
    }

    /// Parses the canonical unbracketed form, `^` standing for FNC1.
    pub fn parse_unbracketed(&mut self, input: &str) -> Result<(), Error> {
        self.process_ai_data(input, true)
    }

    /// Validates unbracketed AI data, committing the parse only when
    /// `extract` is set.
    ///
    /// A leading `^` is required. At each position the AI is resolved by
    /// prefix; a fixed-length AI consumes its schema-fixed span while an
    /// FNC1-requiring AI runs to the next `^` or the end of input,
    /// failing if that exceeds its maximum. A trailing `^` is tolerated.
    pub fn process_ai_data(&mut self, input: &str, extract: bool) -> Result<(), Error> {
        self.reset();
        if input.len() > MAX_DATA {
            return Err(Error::DataTooLong);
        }
        let mut data = String::with_capacity(input.len());
        let mut ais = Vec::new();
        let mut rest = input
            .strip_prefix('^')
            .ok_or(Error::MissingFnc1InFirstPosition)?;
        while !rest.is_empty() {
            let entry = self
                .dict
                .lookup(rest, 0, self.permit_unknown_ais)
                .ok_or_else(|| self.unknown_ai_error(rest))?;
            if extract && entry.ai.is_empty() {
                // the generic unknown pseudo-entry has no derivable AI
                // length, so nothing can be extracted from it
                return Err(self.unknown_ai_error(rest));
            }
            let after = &rest[entry.ai.len()..];
            let avail = after.find('^').unwrap_or(after.len());
            // a schema-fixed value consumes exactly its span and may be
            // followed directly by the next AI; anything else runs to
            // the separator
            let schema_fixed = !entry.fnc1 && entry.min_length() == entry.max_length();
            let vallen = if schema_fixed {
                let fixed = entry.max_length();
                if avail < fixed {
                    return Err(Error::AiDataHasIncorrectLength {
                        ai: entry.ai.clone(),
                    });
                }
                fixed
            } else {
                if avail > entry.max_length() {
                    return Err(Error::AiDataIsTooLong {
                        ai: entry.ai.clone(),
                    });
                }
                avail
            };
            let value = after
                .get(..vallen)
                .ok_or_else(|| Error::AiDataHasIncorrectLength {
                    ai: entry.ai.clone(),
                })?;
            entry.check_value(value)?;
            emit_ai(&mut data, &mut ais, entry, value, None)?;
            rest = &after[vallen..];
            if let Some(stripped) = rest.strip_prefix('^') {
                rest = stripped;
            }
        }
        self.run_validators(&data, &ais)?;
        if extract {
            self.commit(data, ais);
        }
        Ok(())
    }
}

/// Splits a bracketed element value from the rest of the input at the
/// next `(` not escaped by a backslash.
fn split_element_value(input: &str) -> (&str, &str) {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'(' && (i == 0 || bytes[i - 1] != b'\\') {
            return (&input[..i], &input[i..]);
        }
        i += 1;
    }
    (input, "")
}

#[test]
fn test_split_element_value() {
    assert_eq!(split_element_value("ABC(10)X"), ("ABC", "(10)X"));
    assert_eq!(split_element_value("12345\\(11)99"), ("12345\\(11)99", ""));
    assert_eq!(split_element_value(""), ("", ""));
}

#[test]
fn test_parse_bracketed() {
    let mut engine = Engine::new();
    engine
        .parse_bracketed("(01)12312312312333(10)ABC123")
        .unwrap();
    assert_eq!(engine.data_str(), "^011231231231233310ABC123");
    let pairs: Vec<_> = engine.ai_data().collect();
    assert_eq!(pairs, [("01", "12312312312333"), ("10", "ABC123")]);

    // escaped bracket folds into the value
    engine
        .parse_bracketed("(10)12345\\(11)991225(01)12312312312333")
        .unwrap();
    assert_eq!(engine.data_str(), "^1012345(11)991225^0112312312312333");

    assert_eq!(
        engine.parse_bracketed("10)ABC"),
        Err(Error::ExpectedOpeningBracket)
    );
    assert_eq!(engine.parse_bracketed("(10ABC"), Err(Error::UnterminatedAi));
    assert_eq!(
        engine.parse_bracketed("(1)X"),
        Err(Error::AiUnrecognised { ai: "1".into() })
    );
    assert_eq!(
        engine.parse_bracketed("(10)"),
        Err(Error::AiDataEmpty { ai: "10".into() })
    );
    assert_eq!(
        engine.parse_bracketed("(10)AB^C"),
        Err(Error::AiValueContainsFnc1 { ai: "10".into() })
    );
    // failure leaves no partial state
    assert_eq!(engine.data_str(), "");
    assert!(engine.parsed_ais().is_empty());
}

#[test]
fn test_parse_unbracketed() {
    let mut engine = Engine::new();
    engine
        .parse_unbracketed("^011231231231233322TEST^10ABC^21XYZ")
        .unwrap();
    let pairs: Vec<_> = engine.ai_data().collect();
    assert_eq!(
        pairs,
        [
            ("01", "12312312312333"),
            ("22", "TEST"),
            ("10", "ABC"),
            ("21", "XYZ"),
        ]
    );
    // the canonical buffer reproduces the input
    assert_eq!(engine.data_str(), "^011231231231233322TEST^10ABC^21XYZ");

    // trailing FNC1 is tolerated
    engine
        .set_validation_enabled(crate::Validation::RequisiteAis, false)
        .unwrap();
    engine.parse_unbracketed("^10ABC^").unwrap();
    assert_eq!(engine.data_str(), "^10ABC");

    assert_eq!(
        engine.parse_unbracketed("10ABC"),
        Err(Error::MissingFnc1InFirstPosition)
    );
    // FNC1-requiring AI overrunning its maximum
    let long = format!("^10{}", "A".repeat(21));
    assert_eq!(
        engine.parse_unbracketed(&long),
        Err(Error::AiDataIsTooLong { ai: "10".into() })
    );
    // fixed-length AI cut short by a separator
    assert_eq!(
        engine.parse_unbracketed("^011231^10ABC"),
        Err(Error::AiDataHasIncorrectLength { ai: "01".into() })
    );
}

#[test]
fn test_bracketed_unbracketed_equivalence() {
    let mut a = Engine::new();
    let mut b = Engine::new();
    for input in [
        "(01)12312312312333(10)ABC123(99)XYZ",
        "(00)006141411234567890",
        "(01)12312312312326(21)abc123(17)260731",
        "(8010)1234ABC(8011)1234",
    ] {
        a.parse_bracketed(input).unwrap();
        b.parse_unbracketed(&a.data_str().to_string()).unwrap();
        let left: Vec<_> = a.ai_data().map(|(x, y)| (x.to_string(), y.to_string())).collect();
        let right: Vec<_> = b.ai_data().map(|(x, y)| (x.to_string(), y.to_string())).collect();
        assert_eq!(left, right, "{input}");
        assert_eq!(a.data_str(), b.data_str(), "{input}");
    }
}