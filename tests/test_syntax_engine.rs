use gs1_syntax::{unescape_uri, AiDictionary, Engine, Error, LintError, Validation};

#[test]
fn test_dl_uri_parsing() {
    let mut engine = Engine::new();

    engine
        .parse_dl_uri("https://a/00/006141411234567890")
        .unwrap();
    assert_eq!(engine.data_str(), "^00006141411234567890");

    engine
        .parse_dl_uri("https://a/01/12312312312333/22/TEST/10/ABC/21/XYZ")
        .unwrap();
    assert_eq!(engine.data_str(), "^011231231231233322TEST^10ABC^21XYZ");
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

    engine
        .parse_dl_uri("https://a/01/12312312312333?99=ABC&98=XYZ")
        .unwrap();
    assert_eq!(engine.data_str(), "^011231231231233399ABC^98XYZ");

    assert_eq!(
        engine.parse_dl_uri(
            "https://id.gs1.org/01/09520123456788/10/ABC123?99=XYZ789&01=09520123456788"
        ),
        Err(Error::DuplicateAi { ai: "01".into() })
    );

    assert_eq!(
        engine.parse_dl_uri("https://example.com/01/09520123456788?10=ABC123"),
        Err(Error::AiShouldBeInPathInfo { ai: "10".into() })
    );

    // a failed parse leaves no partial state
    assert_eq!(engine.data_str(), "");
    assert!(engine.parsed_ais().is_empty());
}

#[test]
fn test_dl_uri_generation() {
    let mut engine = Engine::new();

    engine.parse_bracketed("(01)12312312312326(21)abc123").unwrap();
    assert_eq!(
        engine.dl_uri(None).unwrap(),
        "https://id.gs1.org/01/12312312312326/21/abc123"
    );

    engine
        .parse_bracketed("(01)12312312312333(10)ABC+123(99)XYZ+QWERTY")
        .unwrap();
    assert_eq!(
        engine.dl_uri(Some("https://example.com")).unwrap(),
        "https://example.com/01/12312312312333/10/ABC%2B123?99=XYZ%2BQWERTY"
    );
    // a single trailing slash on the stem is trimmed
    assert_eq!(
        engine.dl_uri(Some("https://example.com/")).unwrap(),
        "https://example.com/01/12312312312333/10/ABC%2B123?99=XYZ%2BQWERTY"
    );

    engine.parse_bracketed("(99)ONLYATTR").unwrap();
    assert_eq!(
        engine.dl_uri(None),
        Err(Error::CannotCreateDlUriWithoutPrimaryKeyAi)
    );
}

#[test]
fn test_fixed_length_attributes_precede_variable() {
    let mut engine = Engine::new();
    engine
        .parse_bracketed("(01)12312312312326(99)LAST(11)260331(21)ser")
        .unwrap();
    // 11 is schema-fixed, so it is emitted before the variable-length 99
    assert_eq!(
        engine.dl_uri(None).unwrap(),
        "https://id.gs1.org/01/12312312312326/21/ser?11=260331&99=LAST"
    );
}

#[test]
fn test_bracketed_escape() {
    let mut engine = Engine::new();
    engine
        .set_validation_enabled(Validation::RequisiteAis, false)
        .unwrap();
    engine.parse_bracketed("(10)12345\\(11)991225").unwrap();
    assert_eq!(engine.data_str(), "^1012345(11)991225");
    let pairs: Vec<_> = engine.ai_data().collect();
    assert_eq!(pairs, [("10", "12345(11)991225")]);
}

#[test]
fn test_incorrect_check_digit() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.parse_unbracketed("^0112345678901234"),
        Err(Error::Lint {
            ai: "01".into(),
            code: LintError::IncorrectCheckDigit,
            markup: "(01)1234567890123|4|".into(),
        })
    );
}

#[test]
fn test_uri_unescape_contract() {
    assert_eq!(unescape_uri("%20AB", true).unwrap(), " AB");
    assert_eq!(unescape_uri("+", false).unwrap(), "+");
    assert_eq!(unescape_uri("A%00B", true), None);
    assert_eq!(unescape_uri("A%00B", false), None);
}

#[test]
fn test_dl_round_trip() {
    let mut engine = Engine::new();
    for input in [
        "(01)12312312312326(21)abc123",
        "(01)12312312312333(10)ABC+123(99)XYZ+QWERTY",
        "(8010)1234ABC(8011)1234",
        "(00)006141411234567890(99)XYZ+Q",
        "(414)1231231231232(254)EXT1",
        "(01)12312312312333(22)CPV(10)LOT(21)SER(17)260731",
    ] {
        engine.parse_bracketed(input).unwrap();
        let mut before: Vec<(String, String)> = engine
            .ai_data()
            .map(|(a, v)| (a.to_string(), v.to_string()))
            .collect();
        let uri = engine.dl_uri(None).unwrap();
        engine.parse_dl_uri(&uri).unwrap();
        let mut after: Vec<(String, String)> = engine
            .ai_data()
            .map(|(a, v)| (a.to_string(), v.to_string()))
            .collect();
        // attribute order is not preserved, the multiset is
        before.sort();
        after.sort();
        assert_eq!(before, after, "{input} via {uri}");
    }
}

#[test]
fn test_per_ai_schema_round_trip() {
    // each sample satisfies its AI's component schema; the canonical
    // form re-parses to the identical (code, value) list
    let samples = [
        ("00", "006141411234567890"),
        ("01", "12312312312326"),
        ("10", "ABC123"),
        ("11", "991231"),
        ("13", "260228"),
        ("15", "270331"),
        ("17", "280430"),
        ("20", "42"),
        ("21", "SER-1"),
        ("22", "CPV9"),
        ("235", "TPX9"),
        ("240", "ADD1"),
        ("241", "CUSTPART"),
        ("242", "123456"),
        ("243", "PCN"),
        ("250", "SECSER"),
        ("251", "REF1"),
        ("253", "1231231231232ABC"),
        ("254", "EXT1"),
        ("255", "1231231231232123"),
        ("30", "12"),
        ("3100", "000123"),
        ("3105", "123456"),
        ("37", "24"),
        ("3910", "978100"),
        ("3920", "1999"),
        ("400", "PO123"),
        ("401", "1234GINC"),
        ("402", "12345678901234560"),
        ("410", "1231231231232"),
        ("414", "1231231231232"),
        ("420", "ZIP123"),
        ("421", "276ABC"),
        ("423", "276756"),
        ("7001", "1234567890123"),
        ("7003", "2612312359"),
        ("7006", "260531"),
        ("8002", "CELL1"),
        ("8003", "01231231231232XYZ"),
        ("8004", "1234SERIAL"),
        ("8005", "000100"),
        ("8010", "1234ABC"),
        ("8011", "1234"),
        ("8013", "0000E8"),
        ("8017", "123456789012345675"),
        ("90", "INTERNAL"),
        ("99", "XYZ"),
    ];
    let mut engine = Engine::new();
    engine
        .set_validation_enabled(Validation::RequisiteAis, false)
        .unwrap();
    for (ai, value) in samples {
        engine
            .parse_bracketed(&format!("({ai}){value}"))
            .unwrap_or_else(|e| panic!("({ai}){value}: {e}"));
        let canonical = engine.data_str().to_string();
        engine
            .parse_unbracketed(&canonical)
            .unwrap_or_else(|e| panic!("{canonical}: {e}"));
        let pairs: Vec<_> = engine.ai_data().collect();
        assert_eq!(pairs, [(ai, value)], "{canonical}");
    }
}

#[test]
fn test_unknown_ais() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.parse_bracketed("(89)X"),
        Err(Error::NoAiForPrefix { ai: "89".into() })
    );
    assert_eq!(
        engine.parse_unbracketed("^89X"),
        Err(Error::NoAiForPrefix { ai: "89".into() })
    );
    // a declared prefix with an unknown code
    assert_eq!(
        engine.parse_bracketed("(236)X"),
        Err(Error::AiUnrecognised { ai: "236".into() })
    );

    engine.set_permit_unknown_ais(true);
    engine.parse_bracketed("(89)X").unwrap();
    assert_eq!(engine.data_str(), "^89X");
    engine.parse_bracketed("(236)X").unwrap();
    assert_eq!(engine.data_str(), "^236X");
    // the vivified code length comes from the prefix declaration, so
    // unbracketed extraction agrees with the bracketed parse
    engine.parse_unbracketed("^236X").unwrap();
    let pairs: Vec<_> = engine.ai_data().collect();
    assert_eq!(pairs, [("236", "X")]);
}

#[test]
fn test_unknown_ai_as_dl_attribute() {
    let mut engine = Engine::new();
    engine.set_permit_unknown_ais(true);
    // rejected while the UnknownAiNotDlAttr tunable is enabled
    assert_eq!(
        engine.parse_dl_uri("https://a/01/12312312312333?236=X"),
        Err(Error::AiIsNotValidDataAttribute { ai: "236".into() })
    );
    engine
        .set_validation_enabled(Validation::UnknownAiNotDlAttr, false)
        .unwrap();
    engine
        .parse_dl_uri("https://a/01/12312312312333?236=X")
        .unwrap();
    assert_eq!(engine.data_str(), "^0112312312312333236X");
}

#[test]
fn test_cross_ai_validators() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.parse_bracketed("(01)12312312312326(02)12312312312326"),
        Err(Error::InvalidAiPairs {
            ai: "01".into(),
            other: "02".into()
        })
    );
    assert_eq!(
        engine.parse_bracketed("(02)12312312312326"),
        Err(Error::RequiredAisNotSatisfied { ai: "02".into() })
    );
    engine.parse_bracketed("(02)12312312312326(37)24").unwrap();
    // an all-of requisite group: (8026) needs both (02) and (37)
    assert_eq!(
        engine.parse_bracketed("(8026)123123123123260102(37)5"),
        Err(Error::RequiredAisNotSatisfied { ai: "8026".into() })
    );
    engine
        .parse_bracketed("(8026)123123123123260102(02)12312312312326(37)5")
        .unwrap();
    assert_eq!(
        engine.parse_bracketed("(91)A(91)B"),
        Err(Error::InstancesOfAiHaveDifferentValues { ai: "91".into() })
    );
    engine.parse_bracketed("(91)A(91)A").unwrap();
    assert_eq!(
        engine.parse_bracketed("(8030)ABC123(253)1231231231232"),
        Err(Error::SerialNotPresent { ai: "253".into() })
    );
    engine
        .parse_bracketed("(8030)ABC123(253)1231231231232AB")
        .unwrap();
}

#[test]
fn test_limits() {
    let mut engine = Engine::new();
    let mut input = String::new();
    for _ in 0..17 {
        input.push_str("(91)AAAA");
    }
    assert_eq!(engine.parse_bracketed(&input), Err(Error::TooManyAis));
    // non-AI query segments occupy parsed-AI list slots too
    let segments: Vec<String> = (0..17).map(|i| format!("x{i}")).collect();
    let uri = format!(
        "https://id.gs1.org/01/12312312312326?{}",
        segments.join("&")
    );
    assert_eq!(engine.parse_dl_uri(&uri), Err(Error::TooManyAis));
    let oversized = format!("(91){}", "A".repeat(8200));
    assert_eq!(engine.parse_bracketed(&oversized), Err(Error::DataTooLong));
}

#[test]
fn test_caller_supplied_dictionary() {
    let rows = [
        ("01", false, "N14,csum,key", "dlpkey=10"),
        ("10", true, "X..20", "req=01"),
    ];
    let dict = AiDictionary::from_rows(&rows).unwrap();
    let mut engine = Engine::with_dictionary(dict);
    engine.parse_bracketed("(01)12312312312326(10)LOT1").unwrap();
    assert_eq!(engine.data_str(), "^011231231231232610LOT1");
    assert_eq!(
        engine.dl_uri(None).unwrap(),
        "https://id.gs1.org/01/12312312312326/10/LOT1"
    );
    // AIs outside the caller's table are unknown
    assert_eq!(
        engine.parse_bracketed("(99)X"),
        Err(Error::NoAiForPrefix { ai: "99".into() })
    );
    // rebinding restores the default coverage
    engine.set_dictionary(AiDictionary::default());
    engine.parse_bracketed("(99)X").unwrap();
}