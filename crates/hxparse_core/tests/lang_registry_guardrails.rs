use std::collections::HashMap;

use hxparse_core::lang::directives;
use hxparse_core::lang::keywords;
use hxparse_core::lang::operators::{self, Associativity, Fixity, OperatorId};
use hxparse_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(keywords::as_str(info.id), info.canonical, "keyword as_str mismatch for {:?}", info.id);
        assert!(!info.usage.is_empty(), "keyword {:?} has no usage hint", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate keyword spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn operators_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, OperatorId> = HashMap::new();

    for info in operators::OPERATORS {
        assert_eq!(
            operators::from_str(info.spelling),
            Some(info.id),
            "operator spelling not resolvable: {}",
            info.spelling
        );
        assert!(!info.fixities.is_empty(), "operator {:?} has no fixity", info.id);
        if let Some(prev) = seen.insert(info.spelling, info.id) {
            panic!("duplicate operator spelling {:?}: {:?} and {:?}", info.spelling, prev, info.id);
        }
    }
}

#[test]
fn infix_operators_have_a_precedence_and_unary_ones_do_not() {
    for info in operators::OPERATORS {
        let infix = info.fixities.contains(&Fixity::Infix);
        assert_eq!(
            infix,
            info.precedence > 0,
            "operator {:?}: infix={infix} but precedence={}",
            info.id,
            info.precedence
        );
    }
}

#[test]
fn composed_operators_all_start_with_gt() {
    for info in operators::OPERATORS.iter().filter(|o| o.composed) {
        assert!(info.spelling.starts_with('>'), "{:?} is composed but not `>`-led", info.id);
        assert!(info.spelling.len() > 1);
    }
    // every multi-char `>`-led operator must be composed, the lexer never produces them
    for info in operators::OPERATORS {
        if info.spelling.starts_with('>') && info.spelling.len() > 1 {
            assert!(info.composed, "{:?} must be composed", info.id);
        }
    }
}

#[test]
fn precedence_ladder_matches_grammar_levels() {
    let prec = |id| operators::binary_info(id).map(|(p, _)| p).unwrap_or(0);

    assert!(prec(OperatorId::Percent) > prec(OperatorId::Star));
    assert!(prec(OperatorId::Star) > prec(OperatorId::Plus));
    assert!(prec(OperatorId::Plus) > prec(OperatorId::Shl));
    assert!(prec(OperatorId::Shl) > prec(OperatorId::Amp));
    // range binds tighter than comparison, looser than arithmetic
    assert!(prec(OperatorId::Amp) > prec(OperatorId::Interval));
    assert!(prec(OperatorId::Interval) > prec(OperatorId::EqEq));
    assert!(prec(OperatorId::EqEq) > prec(OperatorId::AndAnd));
    assert!(prec(OperatorId::AndAnd) > prec(OperatorId::OrOr));
    assert!(prec(OperatorId::OrOr) > prec(OperatorId::QuestionQuestion));
    assert!(prec(OperatorId::QuestionQuestion) > operators::TERNARY_PRECEDENCE);
    assert!(operators::TERNARY_PRECEDENCE > prec(OperatorId::Eq));
}

#[test]
fn assignment_and_range_are_right_associative() {
    for info in operators::OPERATORS.iter().filter(|o| operators::is_assignment(o.id)) {
        assert_eq!(info.associativity, Associativity::Right, "{:?}", info.id);
    }
    assert_eq!(operators::info_for(OperatorId::Interval).associativity, Associativity::Right);
    assert_eq!(operators::info_for(OperatorId::Plus).associativity, Associativity::Left);
}

#[test]
fn minus_and_increment_have_unary_forms() {
    assert!(operators::has_fixity(OperatorId::Minus, Fixity::Prefix));
    assert!(operators::has_fixity(OperatorId::Minus, Fixity::Infix));
    assert!(operators::has_fixity(OperatorId::Increment, Fixity::Postfix));
    assert!(!operators::has_fixity(OperatorId::Not, Fixity::Postfix));
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
        assert!(
            operators::from_str(info.canonical).is_none(),
            "{} is both punctuation and an operator",
            info.canonical
        );
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate punctuation spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn directives_are_hash_prefixed_and_shadow_keywords_only_after_hash() {
    for info in directives::DIRECTIVES {
        assert!(info.canonical.starts_with('#'));
        assert_eq!(directives::from_str(info.canonical), Some(info.id));
        assert_eq!(directives::from_str(&info.canonical[1..]), None);
    }
    assert!(keywords::from_str("if").is_some());
    assert!(keywords::from_str("#if").is_none());
}
