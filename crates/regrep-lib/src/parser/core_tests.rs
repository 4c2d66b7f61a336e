use super::*;

fn dump(pattern: &str) -> String {
    let res = parse(pattern).expect("pattern should parse");
    res.root.to_string()
}

fn error(pattern: &str) -> ParseError {
    let err = parse(pattern).expect_err("pattern should not parse");
    err.parse_error().copied().expect("syntax error")
}

#[test]
fn single_literal_is_not_wrapped() {
    insta::assert_snapshot!(dump("a"), @"Literal 'a'");
}

#[test]
fn concatenation() {
    insta::assert_snapshot!(dump(r"a\d.\w"), @r"
    Sequence
      Literal 'a'
      Digit
      Any
      Word
    ");
}

#[test]
fn empty_pattern_is_empty_sequence() {
    let res = parse("").unwrap();
    assert_eq!(res.root, Node::empty());
    assert_eq!(res.group_count, 0);
}

#[test]
fn quantifiers() {
    insta::assert_snapshot!(dump("a+b?"), @r"
    Sequence
      Repetition 1..
        Literal 'a'
      Repetition 0..=1
        Literal 'b'
    ");
}

#[test]
fn quantifier_applies_once() {
    // The second `+` has nothing to repeat and is read as a literal.
    insta::assert_snapshot!(dump("a++"), @r"
    Sequence
      Repetition 1..
        Literal 'a'
      Literal '+'
    ");
}

#[test]
fn star_is_a_literal() {
    insta::assert_snapshot!(dump("a*"), @r"
    Sequence
      Literal 'a'
      Literal '*'
    ");
}

#[test]
fn alternation_inside_group() {
    insta::assert_snapshot!(dump("(cat|dog)"), @r"
    Capture 1
      Alternation
        Sequence
          Literal 'c'
          Literal 'a'
          Literal 't'
        Sequence
          Literal 'd'
          Literal 'o'
          Literal 'g'
    ");
}

#[test]
fn top_level_alternation_with_empty_branch() {
    insta::assert_snapshot!(dump("a|"), @r"
    Alternation
      Literal 'a'
      Sequence
    ");
}

#[test]
fn nested_groups_number_by_opening_paren() {
    insta::assert_snapshot!(dump("((a)(b))"), @r"
    Capture 1
      Sequence
        Capture 2
          Literal 'a'
        Capture 3
          Literal 'b'
    ");
    assert_eq!(parse("((a)(b))").unwrap().group_count, 3);
}

#[test]
fn empty_group() {
    insta::assert_snapshot!(dump("()+"), @r"
    Repetition 1..
      Capture 1
        Sequence
    ");
}

#[test]
fn char_classes() {
    insta::assert_snapshot!(dump("[abc][^xyz]"), @r"
    Sequence
      CharClass [abc]
      CharClass [^xyz]
    ");
}

#[test]
fn char_class_members_are_verbatim() {
    let res = parse(r"[a-z\d]").unwrap();
    let Node::CharClass(class) = res.root else {
        panic!("expected a char class");
    };
    assert!(!class.negated);
    assert_eq!(class.set.len(), 5);
    assert!(class.matches('-'));
    assert!(class.matches('\\'));
    assert!(!class.matches('b'));
}

#[test]
fn caret_after_first_class_member_is_a_member() {
    let res = parse("[a^]").unwrap();
    let Node::CharClass(class) = res.root else {
        panic!("expected a char class");
    };
    assert!(!class.negated);
    assert!(class.matches('^'));
}

#[test]
fn backreferences() {
    insta::assert_snapshot!(dump(r"(\w+) \1"), @r"
    Sequence
      Capture 1
        Repetition 1..
          Word
      Literal ' '
      Backreference 1
    ");
}

#[test]
fn backreference_consumes_all_digits() {
    assert_eq!(parse(r"\12").unwrap().root, Node::Backreference(12));
    assert_eq!(parse(r"\10").unwrap().root, Node::Backreference(10));
}

#[test]
fn unterminated_group() {
    let err = error("(");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedGroup);
    assert_eq!(err.position, 0);

    let err = error("ab(cd|ef");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedGroup);
    assert_eq!(err.position, 2);
}

#[test]
fn unterminated_char_class() {
    let err = error("x[abc");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedCharClass);
    assert_eq!(err.position, 1);
}

#[test]
fn dangling_escape() {
    let err = error(r"ab\");
    assert_eq!(err.kind, ParseErrorKind::DanglingEscape);
    assert_eq!(err.position, 2);
}

#[test]
fn unsupported_escape() {
    let err = error(r"a\s");
    assert_eq!(err.kind, ParseErrorKind::UnsupportedEscape('s'));
    assert_eq!(err.position, 2);

    // `\0` is not a backreference.
    assert_eq!(error(r"\0").kind, ParseErrorKind::UnsupportedEscape('0'));
}

#[test]
fn unbalanced_close_paren() {
    let err = error("ab)c");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter(')'));
    assert_eq!(err.position, 2);
}

#[test]
fn error_positions_count_characters() {
    let err = error("héllo(");
    assert_eq!(err.position, 5);
}

#[test]
fn error_display() {
    insta::assert_snapshot!(error("(").to_string(), @"unterminated group at position 0");
    insta::assert_snapshot!(error(r"\q").to_string(), @r"unsupported escape: \q at position 1");
    insta::assert_snapshot!(error("a)").to_string(), @"unexpected character `)` at position 1");
}

#[test]
fn parsing_is_deterministic() {
    let pattern = r"^(\d+|[^ab]?)x\1$";
    assert_eq!(parse(pattern).unwrap(), parse(pattern).unwrap());
}

#[test]
fn unescape_collapses_doubled_backslashes() {
    assert_eq!(unescape(r"\\d+"), r"\d+");
    assert_eq!(unescape(r"\\\\"), r"\\");
    assert_eq!(unescape(r"\w"), r"\w");
    assert!(matches!(unescape("plain"), std::borrow::Cow::Borrowed(_)));
}
