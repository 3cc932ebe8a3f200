use super::*;

#[test]
fn word_segment_never_runs_backwards() {
    let w = WordSegment::new("hola", 2.0, 1.5);
    assert_eq!(w.start, 2.0);
    assert_eq!(w.end, 2.0);
    assert_eq!(w.duration(), 0.0);
}

#[test]
fn line_bounds_follow_first_and_last_word() {
    let words = vec![
        WordSegment::new("a", 1.0, 1.5),
        WordSegment::new("b", 1.5, 2.0),
        WordSegment::new("c", 2.25, 3.0),
    ];
    let line = LyricLine::from_words("a b c", words).unwrap();
    assert_eq!(line.start, 1.0);
    assert_eq!(line.end, 3.0);
    assert_eq!(line.duration(), 2.0);
    assert_eq!(line.display_words().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn line_requires_words() {
    assert!(LyricLine::from_words("nothing", Vec::new()).is_none());
}

#[test]
fn line_serializes_to_json() {
    let line = LyricLine::from_words("x", vec![WordSegment::new("x", 0.0, 1.0)]).unwrap();
    let v = serde_json::to_value(&line).unwrap();
    assert_eq!(v["text"], "x");
    assert_eq!(v["words"][0]["end"], 1.0);
}
