use std::collections::VecDeque;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::model::Correction;

/// Common misspellings, applied in order to every occurrence.
const REPLACEMENTS: [(&str, &str); 5] = [
    ("teh", "the"),
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("definately", "definitely"),
    ("loose", "lose"),
];

/// Measured in UTF-16 code units, as browsers count string length.
const LONG_TEXT_THRESHOLD: usize = 50;
const LONG_TEXT_SUFFIX: &str = " This sentence has been improved for clarity and flow.";
const SHORT_TEXT_SUFFIX: &str = " Fixed common spelling errors.";

pub fn polish_text(text: &str) -> String {
    let mut corrected = REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, &(from, to)| acc.replace(from, to));

    if text.encode_utf16().count() > LONG_TEXT_THRESHOLD {
        corrected.push_str(LONG_TEXT_SUFFIX);
    } else {
        corrected.push_str(SHORT_TEXT_SUFFIX);
    }

    corrected
}

pub fn polish(text: &str) -> Correction {
    Correction {
        original: text.to_string(),
        corrected: polish_text(text),
        timestamp: Utc::now(),
    }
}

/// Most-recent-first list of corrections, never longer than its capacity.
pub struct CorrectionHistory {
    capacity: usize,
    entries: RwLock<VecDeque<Correction>>,
}

impl CorrectionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn record(&self, correction: Correction) {
        let mut entries = self.entries.write().await;
        entries.push_front(correction);
        entries.truncate(self.capacity);
    }

    pub async fn recent(&self) -> Vec<Correction> {
        self.entries.read().await.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polish_text_fixes_every_occurrence() {
        assert_eq!(
            polish_text("teh cat and teh dog"),
            "the cat and the dog Fixed common spelling errors."
        );
        assert_eq!(
            polish_text("recieve seperate"),
            "receive separate Fixed common spelling errors."
        );
        assert_eq!(
            polish_text("definately loose"),
            "definitely lose Fixed common spelling errors."
        );
    }

    #[test]
    fn test_polish_text_is_case_sensitive() {
        assert_eq!(polish_text("Teh"), "Teh Fixed common spelling errors.");
    }

    #[test]
    fn test_polish_text_replaces_inside_words() {
        // plain substring replacement, "loosen" becomes "losen"
        assert_eq!(polish_text("loosen"), "losen Fixed common spelling errors.");
    }

    #[test]
    fn test_suffix_threshold_uses_original_length() {
        let fifty = "a".repeat(50);
        assert!(polish_text(&fifty).ends_with(SHORT_TEXT_SUFFIX));

        let fifty_one = "a".repeat(51);
        assert!(polish_text(&fifty_one).ends_with(LONG_TEXT_SUFFIX));

        // 50 chars of two-byte text still counts as short
        let accented = "é".repeat(50);
        assert!(polish_text(&accented).ends_with(SHORT_TEXT_SUFFIX));
    }

    #[test]
    fn test_suffix_threshold_counts_utf16_units() {
        // each emoji is a surrogate pair, two units
        let twenty_five = "😀".repeat(25);
        assert!(polish_text(&twenty_five).ends_with(SHORT_TEXT_SUFFIX));

        let twenty_six = "😀".repeat(26);
        assert!(polish_text(&twenty_six).ends_with(LONG_TEXT_SUFFIX));
    }

    #[test]
    fn test_polish_keeps_original() {
        let correction = polish("teh end");
        assert_eq!(correction.original, "teh end");
        assert_eq!(correction.corrected, "the end Fixed common spelling errors.");
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first_and_capped() {
        let history = CorrectionHistory::new(2);
        for text in ["one", "two", "three"] {
            history.record(polish(text)).await;
        }

        let recent: Vec<String> = history
            .recent()
            .await
            .into_iter()
            .map(|c| c.original)
            .collect();
        assert_eq!(recent, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn test_history_capacity_is_at_least_one() {
        let history = CorrectionHistory::new(0);
        history.record(polish("only")).await;
        assert_eq!(history.recent().await.len(), 1);
    }
}
