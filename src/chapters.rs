//! Chapter enumeration and display labels.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::Question;

/// Distinct chapter ids in display order.
///
/// When every id carries a number (`"7"`, `"Chapter 12"`), chapters are
/// ordered by the first number in each id, ties broken by the id itself.
/// If any id has no number the whole list falls back to plain string order,
/// so `["10", "2", "General"]` stays `["10", "2", "General"]`.
pub fn sorted_chapters(questions: &[Question]) -> Vec<String> {
    let unique: BTreeSet<&str> = questions.iter().map(|q| q.chapter.as_str()).collect();

    let keyed: Option<Vec<(u64, &str)>> = unique
        .iter()
        .map(|id| numeric_key(id).map(|n| (n, *id)))
        .collect();

    match keyed {
        Some(mut keyed) => {
            keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
            keyed.into_iter().map(|(_, id)| id.to_string()).collect()
        }
        // BTreeSet iteration is already string order.
        None => unique.into_iter().map(str::to_string).collect(),
    }
}

/// First run of ASCII digits in `id`, if it fits in a `u64`.
pub fn numeric_key(id: &str) -> Option<u64> {
    let start = id.find(|c: char| c.is_ascii_digit())?;
    let digits = &id[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

pub fn chapter_label(id: &str, titles: &BTreeMap<String, String>) -> String {
    match titles.get(id) {
        Some(title) => format!("CHAPTER {}: {}", id, title),
        None if numeric_key(id).is_some() => format!("Chapter {}", id),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(chapters: &[&str]) -> Vec<Question> {
        chapters
            .iter()
            .map(|chapter| Question::new(*chapter, "q", ["a", "b"], "a"))
            .collect()
    }

    #[test]
    fn test_numeric_chapters_sort_by_value() {
        let sorted = sorted_chapters(&questions(&["10", "2", "1", "2", "19"]));
        assert_eq!(sorted, ["1", "2", "10", "19"]);
    }

    #[test]
    fn test_mixed_chapters_fall_back_to_string_order() {
        let sorted = sorted_chapters(&questions(&["10", "2", "General"]));
        assert_eq!(sorted, ["10", "2", "General"]);
    }

    #[test]
    fn test_embedded_numbers_and_ties() {
        let sorted = sorted_chapters(&questions(&["Part 3", "Ch 10", "3", "Unit 1b"]));
        assert_eq!(sorted, ["Unit 1b", "3", "Part 3", "Ch 10"]);
    }

    #[test]
    fn test_empty_bank_has_no_chapters() {
        assert!(sorted_chapters(&[]).is_empty());
    }

    #[test]
    fn test_numeric_key() {
        assert_eq!(numeric_key("12"), Some(12));
        assert_eq!(numeric_key("Chapter 4a5"), Some(4));
        assert_eq!(numeric_key("General"), None);
        assert_eq!(numeric_key("99999999999999999999999"), None);
    }

    #[test]
    fn test_chapter_label() {
        let titles = BTreeMap::from([("1".to_string(), "THERMODYNAMICS".to_string())]);
        assert_eq!(chapter_label("1", &titles), "CHAPTER 1: THERMODYNAMICS");
        assert_eq!(chapter_label("2", &titles), "Chapter 2");
        assert_eq!(chapter_label("General", &titles), "General");
    }
}
