//! End-to-end behavior of the public surface: parse, diagnose, generate
//! and transform working together on realistic snippets.

use htsl::{Action, ActionHolder, CodeStyle, Severity};
use htsl_parser::error::ErrorCode;

#[test]
fn plain_message_parses_cleanly() {
    let holders = htsl::actions("chat \"Hello\"").unwrap();
    assert_eq!(
        holders,
        vec![ActionHolder::Unknown {
            actions: Some(vec![Action::Message {
                message: Some("Hello".into()),
            }]),
        }]
    );
    assert!(htsl::diagnostics("chat \"Hello\"").is_empty());
}

#[test]
fn integer_overflow_keeps_a_usable_tree() {
    let src = "stat x += 999999999999999999999999999999";
    let result = htsl::parse(src);

    let codes: Vec<_> = result.diagnostics.iter().filter_map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::IntegerOverflow), "{codes:?}");

    // The statement still lowers, with the amount clamped.
    assert_eq!(result.holders.len(), 1);
    assert_eq!(result.holders[0].actions.len(), 1);
}

#[test]
fn nested_randoms_are_reported_but_kept() {
    let src = "random {\nrandom {\nchat \"x\"\n}\n}";
    let result = htsl::parse(src);

    let nesting: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.code == Some(ErrorCode::IllegalNesting))
        .collect();
    assert_eq!(nesting.len(), 1);

    // The outer random survives in the tree.
    assert_eq!(result.holders[0].actions.len(), 1);
}

#[test]
fn generate_kill_is_exactly_the_keyword() {
    let holders = vec![ActionHolder::Unknown {
        actions: Some(vec![Action::Kill]),
    }];
    assert_eq!(htsl::generate(&holders, &CodeStyle::default()), "kill\n");
}

#[test]
fn transform_touches_only_the_changed_literal() {
    let src = "chat      \"Hello\"";
    let target = vec![ActionHolder::Unknown {
        actions: Some(vec![Action::Message {
            message: Some("Goodbye".into()),
        }]),
    }];
    let out = htsl::transform(src, &target, &CodeStyle::default()).unwrap();
    assert_eq!(out, "chat      \"Goodbye\"");
}

#[test]
fn one_broken_statement_does_not_sink_its_siblings() {
    let src = "bogusAction 5\nkill\n";
    let result = htsl::parse(src);

    assert!(result.has_errors());
    let actions = &result.holders[0].actions;
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].action_kind(), htsl::ActionKind::Kill);
}

#[test]
fn warnings_still_lower_to_a_tree() {
    let src = "function \"tick\"\nfunction \"tick\"\n";
    let result = htsl::parse(src);

    assert!(!result.has_errors());
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning));
    assert_eq!(result.lower().len(), 1);
}

#[test]
fn parse_is_deterministic() {
    let src = "stat kills += 1\nif or (isSneaking) {\nkill\n}\n";
    assert_eq!(htsl::parse(src), htsl::parse(src));
}
