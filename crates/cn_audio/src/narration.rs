use cn_core::{ComparativeReport, Sentiment};

/// Longest piece of text the speech endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Hindi script read out for a report.
///
/// Only the three plain labels are counted; degraded entries are left out of
/// the spoken totals.
pub fn hindi_narration(report: &ComparativeReport) -> String {
    let distribution = &report.sentiment_distribution;
    format!(
        "कंपनी: {}. भावना: सकारात्मक {}, नकारात्मक {}, तटस्थ {}. अंतर्दृष्टि: {}",
        report.company,
        distribution.get(Sentiment::Positive.as_str()),
        distribution.get(Sentiment::Negative.as_str()),
        distribution.get(Sentiment::Neutral.as_str()),
        report.insights.join(" "),
    )
}

/// Break `text` into pieces of at most `max_chars` characters.
///
/// Splits happen on whitespace; a single word longer than the limit is cut
/// at character boundaries.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
