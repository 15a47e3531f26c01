use super::*;

#[test]
fn test_all_variants_listed() {
    // Every code belongs to exactly one phase.
    for code in ErrorCode::ALL {
        let phases = [
            code.is_lexer_error(),
            code.is_parser_error(),
            code.is_resolve_error(),
            code.is_internal_error(),
        ];
        assert_eq!(phases.iter().filter(|&&p| p).count(), 1, "{code}");
    }
    assert_eq!(ErrorCode::ALL.len(), 13);
}

#[test]
fn test_codes_are_unique() {
    for (i, a) in ErrorCode::ALL.iter().enumerate() {
        for b in &ErrorCode::ALL[i + 1..] {
            assert_ne!(a.as_str(), b.as_str());
        }
    }
}

#[test]
fn test_display_and_parse() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!("e1001".parse::<ErrorCode>(), Ok(ErrorCode::E1001));
    assert_eq!("E7777".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_descriptions() {
    assert_eq!(ErrorCode::E1001.description(), "missing right parenthesis");
    assert_eq!(ErrorCode::E9001.description(), "out of memory");
    assert!(ErrorCode::ALL.iter().all(|code| !code.description().is_empty()));
}
