use super::*;

const SAMPLE: &str = "1
00:00:01,000 --> 00:00:03,000
hello there
world

2
00:00:03,000 --> 00:00:03,500
again

";

fn parser() -> TranscriptParser {
    TranscriptParser::new(TranscriptConfig::default())
}

#[test]
fn splits_block_interval_evenly_across_tokens() {
    let segs = parser().parse(SAMPLE);
    let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["hello", "there", "world", "again"]);

    let step = 2.0 / 3.0;
    assert!((segs[0].start - 1.0).abs() < 1e-12);
    assert!((segs[0].end - (1.0 + step)).abs() < 1e-12);
    assert!((segs[2].end - 3.0).abs() < 1e-12);
    assert_eq!((segs[3].start, segs[3].end), (3.0, 3.5));
}

#[test]
fn skips_blocks_with_bad_time_lines() {
    let text = "1
00:00:01,000 -> broken
lost words

2
00:00:04,000 --> 00:00:05,000
kept
";
    let segs = parser().parse(text);
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].text, "kept");
    assert_eq!(segs[0].start, 4.0);
}

#[test]
fn skips_blocks_that_end_before_they_start() {
    let text = "1
00:00:05,000 --> 00:00:04,000
al reves

2
00:00:06,000 --> 00:00:07,000
bien
";
    let segs = parser().parse(text);
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].text, "bien");
    assert_eq!((segs[0].start, segs[0].end), (6.0, 7.0));
}

#[test]
fn tolerates_bom_crlf_and_missing_trailing_blank() {
    let text = "\u{feff}1\r\n00:00:00,000 --> 00:00:01,000\r\nuno dos\r\n\r\n2\r\n00:00:01,000 --> 00:00:02,000\r\ntres";
    let segs = parser().parse(text);
    assert_eq!(segs.len(), 3);
    assert_eq!(segs[2].text, "tres");
    assert_eq!(segs[2].end, 2.0);
}

#[test]
fn empty_or_textless_input_yields_nothing() {
    assert!(parser().parse("").is_empty());
    assert!(parser().parse("1\n00:00:01,000 --> 00:00:02,000\n\n").is_empty());
    assert!(parser().parse("1\n").is_empty());
}

#[test]
fn long_segments_are_clamped_to_ceiling() {
    let text = "1
00:00:10,000 --> 00:00:20,000
sostenido
";
    let segs = parser().parse(text);
    assert_eq!(segs.len(), 1);
    assert!((segs[0].duration() - 3.0).abs() < 1e-9);
    assert_eq!(segs[0].start, 10.0);
}

#[test]
fn clamp_leaves_short_segments_untouched() {
    let input = vec![
        WordSegment::new("a", 0.0, 1.0),
        WordSegment::new("b", 1.1, 9.7),
        WordSegment::new("c", 9.7, 12.7),
    ];
    let out = clamp_word_durations(input.clone(), 3.0);
    assert_eq!(out[0], input[0]);
    assert!((out[1].duration() - 3.0).abs() < 1e-9);
    assert_eq!(out[2], input[2]);
    for seg in &out {
        assert!(seg.duration() <= 3.0 + 1e-9);
    }
}

#[test]
fn missing_file_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let segs = parser().parse_file(&dir.path().join("none.srt")).unwrap();
    assert!(segs.is_empty());

    let path = dir.path().join("words.srt");
    std::fs::write(&path, SAMPLE).unwrap();
    assert_eq!(parser().parse_file(&path).unwrap().len(), 4);
}

#[test]
fn lines_serialize_back_to_line_level_blocks() {
    let lines = vec![
        LyricLine::from_words(
            "hola mundo",
            vec![
                WordSegment::new("hola", 1.0, 1.5),
                WordSegment::new("mundo", 1.5, 2.25),
            ],
        )
        .unwrap(),
    ];
    assert_eq!(
        lines_to_srt(&lines),
        "1\n00:00:01,000 --> 00:00:02,250\nhola mundo\n\n"
    );
}
