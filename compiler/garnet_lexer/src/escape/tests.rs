use super::*;

#[test]
fn plain_text_is_unchanged() {
    assert_eq!(unescape("hello world"), "hello world");
}

#[test]
fn known_escapes_decode() {
    assert_eq!(unescape(r"a\nb\tc"), "a\nb\tc");
    assert_eq!(unescape(r"\r\f"), "\r\u{0c}");
    assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
    assert_eq!(unescape(r"it\'s"), "it's");
    assert_eq!(unescape(r"C:\\dir"), r"C:\dir");
}

#[test]
fn escaped_backslash_does_not_start_another_escape() {
    assert_eq!(unescape(r"\\n"), r"\n");
}

#[test]
fn unknown_and_dangling_escapes_kept_verbatim() {
    assert_eq!(unescape(r"\q"), r"\q");
    assert_eq!(unescape("end\\"), "end\\");
}
