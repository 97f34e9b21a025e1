use unicode_segmentation::UnicodeSegmentation;

/// Lowercased words of `text` on Unicode word boundaries; punctuation is dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Split running text into segments separated by blank lines.
///
/// A segment is the unit `range` counts over (one song, one document).
/// Text without blank lines is a single segment; empty text has none.
pub fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                segments.push(&text[s..end]);
            }
        } else {
            if start.is_none() {
                start = Some(offset);
            }
            end = offset + line.trim_end().len();
        }
        offset += line.len();
    }

    if let Some(s) = start {
        segments.push(&text[s..end]);
    }

    segments
}
