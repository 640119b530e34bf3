use super::*;
use crate::foundation::time::from_unix_seconds;

#[test]
fn layout_has_title_message_and_footer() {
    let img = compose_error("token 12 could not be read", from_unix_seconds(1_700_000_000));
    assert_eq!(img.background, Color::ERROR_BACKGROUND);
    assert_eq!(
        img.texts(),
        vec![
            "Error",
            "token 12 could not be read",
            "2023-11-14T22:13:20.000Z"
        ]
    );
    let svg = img.to_svg();
    assert!(svg.contains("fill=\"#ff4444\""));
    assert!(svg.contains("fill=\"#1a1a1a\""));
}

#[test]
fn empty_message_still_renders() {
    let img = compose_error("   ", from_unix_seconds(0));
    assert!(img.texts().contains(&"Unknown error"));
}

#[test]
fn long_messages_wrap_and_truncate() {
    let words = "lorem ipsum dolor sit amet ".repeat(20);
    let lines = wrap(&words);
    assert_eq!(lines.len(), MESSAGE_MAX_LINES);
    assert!(lines.last().unwrap().ends_with("..."));
    for line in &lines[..MESSAGE_MAX_LINES - 1] {
        assert!(line.chars().count() <= MESSAGE_WIDTH_CHARS);
    }
}

#[test]
fn overlong_words_are_split() {
    let word = "x".repeat(90);
    let lines = wrap(&word);
    assert_eq!(lines, vec!["x".repeat(40), "x".repeat(40), "x".repeat(10)]);
}

#[test]
fn error_image_is_fully_deterministic() {
    let t = from_unix_seconds(1_000);
    let a = compose_error("boom", t);
    let b = compose_error("boom", t);
    assert_eq!(a, b);
    assert_eq!(a.to_svg(), b.to_svg());
}
