//! Reserved identifiers.
//!
//! Keyword names are FNV-1a hashes evaluated at compile time, so recognising a
//! keyword in the parser is a single `Name` compare.

use crate::Name;

pub const LET: Name = Name::of("let");
pub const IF: Name = Name::of("if");
pub const LAMBDA: Name = Name::of("lambda");
pub const DO: Name = Name::of("do");
pub const CAR: Name = Name::of("car");
pub const CDR: Name = Name::of("cdr");
pub const CONS: Name = Name::of("cons");
pub const LIST: Name = Name::of("list");
pub const MATCH: Name = Name::of("match");
pub const MACRO: Name = Name::of("macro");

pub const TRUE: Name = Name::of("true");
pub const FALSE: Name = Name::of("false");
pub const NIL: Name = Name::of("nil");

/// Text of every reserved identifier, in the order the interner registers
/// them.
pub const RESERVED: &[&str] = &[
    "let", "if", "lambda", "do", "car", "cdr", "cons", "list", "match", "macro", "true", "false",
    "nil",
];

const FORMS: [Name; 10] = [LET, IF, LAMBDA, DO, CAR, CDR, CONS, LIST, MATCH, MACRO];

/// Whether `name` heads a special form (as opposed to a literal keyword like
/// `true`).
pub const fn is_form_keyword(name: Name) -> bool {
    let mut i = 0;
    while i < FORMS.len() {
        if FORMS[i].raw() == name.raw() {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names_are_distinct() {
        let names: Vec<Name> = RESERVED.iter().map(|text| Name::of(text)).collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_form_keywords() {
        assert!(is_form_keyword(LET));
        assert!(is_form_keyword(MACRO));
        assert!(is_form_keyword(Name::of("cons")));
        assert!(!is_form_keyword(TRUE));
        assert!(!is_form_keyword(Name::of("foo")));
    }
}
