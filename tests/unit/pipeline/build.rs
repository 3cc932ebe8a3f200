use super::*;

const TRANSCRIPT: &str = "1
00:00:01,000 --> 00:00:02,000
uno dos

2
00:00:02,000 --> 00:00:04,000
tres cuatro cinco seis
";

#[test]
fn fixed_window_lines_from_transcript() {
    let mut cfg = KaraokeConfig::default();
    cfg.grouping.words_per_line = 4;
    let lines = build_lines(TRANSCRIPT, None, &cfg).unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["uno dos tres cuatro", "cinco seis"]);
    assert_eq!(lines[0].start, 1.0);
    assert_eq!(lines[1].end, 4.0);
}

#[test]
fn manual_lyrics_drive_line_text() {
    let cfg = KaraokeConfig::default();
    let lines = build_lines(TRANSCRIPT, Some("[Coro]\nUno, dos,\ntres, cuatro, cinco, seis"), &cfg)
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "Uno, dos,");
    assert_eq!(lines[0].words.len(), 2);
    assert_eq!(lines[1].words.len(), 4);
}

#[test]
fn nothing_to_align_is_reported() {
    let cfg = KaraokeConfig::default();
    let err = build_lines("", None, &cfg).unwrap_err();
    assert!(err.is_no_alignable_content());

    let err = build_lines(TRANSCRIPT, Some("[Instrumental]\n\n"), &cfg).unwrap_err();
    assert!(err.is_no_alignable_content());
}

#[test]
fn invalid_config_is_rejected_before_parsing() {
    let mut cfg = KaraokeConfig::default();
    cfg.grouping.words_per_line = 0;
    let err = build_lines(TRANSCRIPT, None, &cfg).unwrap_err();
    assert!(matches!(err, KaraokeError::Validation(_)));
}

#[test]
fn files_are_read_and_missing_transcript_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = KaraokeConfig::default();

    let err = build_lines_from_files(&dir.path().join("none.srt"), None, &cfg).unwrap_err();
    assert!(err.is_no_alignable_content());

    let srt = dir.path().join("words.srt");
    let lyrics = dir.path().join("lyrics.txt");
    std::fs::write(&srt, TRANSCRIPT).unwrap();
    std::fs::write(&lyrics, "uno dos tres\ncuatro cinco seis").unwrap();
    let lines = build_lines_from_files(&srt, Some(&lyrics), &cfg).unwrap();
    assert_eq!(lines.len(), 2);

    let err = build_lines_from_files(&srt, Some(&dir.path().join("gone.txt")), &cfg).unwrap_err();
    assert!(matches!(err, KaraokeError::Other(_)));
}

#[test]
fn clips_preview_their_successor() {
    let cfg = KaraokeConfig::default();
    let lines = build_lines(TRANSCRIPT, Some("uno dos\ntres cuatro\ncinco seis"), &cfg).unwrap();
    let clips = build_clips(&lines, &cfg);
    assert_eq!(clips.len(), 3);
    assert_eq!(clips[0].next.as_ref(), Some(&lines[1]));
    assert_eq!(clips[2].next, None);
    assert_eq!(clips[1].line, lines[1]);
}
