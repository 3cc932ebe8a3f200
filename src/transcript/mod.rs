pub(crate) mod lyrics;
pub(crate) mod srt;
pub(crate) mod timecode;
