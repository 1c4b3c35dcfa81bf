//! Lexical and phonetic ranking of directory entries.
//!
//! Each entry is scored against a query by the first matching rule of a
//! fixed ladder, from exact name match (10000) down to a phonetic-key
//! substring match (5000 minus the match offset). Entries matching no rule
//! are excluded.

use super::phonetic::{is_initial_only, phonetic_key};
use super::snapshot::IndexEntry;

/// How an entry matched a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Name equals the query.
    Exact,
    /// Name equals the query ignoring case.
    ExactIgnoreCase,
    /// Name starts with the query.
    Prefix,
    /// Name starts with the query ignoring case.
    PrefixIgnoreCase,
    /// Phonetic key starts with a consonant-only query.
    InitialsPrefix,
    /// Phonetic key starts with the query's own phonetic key.
    PhoneticPrefix,
    /// Name contains the query.
    Substring,
    /// Name contains the query ignoring case.
    SubstringIgnoreCase,
    /// Phonetic key contains a consonant-only query.
    InitialsSubstring,
    /// Phonetic key contains the query's own phonetic key.
    PhoneticSubstring,
}

impl MatchRule {
    /// Score before offset and single-character adjustments.
    pub fn base_score(self) -> i64 {
        match self {
            MatchRule::Exact => 10000,
            MatchRule::ExactIgnoreCase => 9000,
            MatchRule::Prefix => 8500,
            MatchRule::PrefixIgnoreCase => 8000,
            MatchRule::InitialsPrefix => 7500,
            MatchRule::PhoneticPrefix => 7000,
            MatchRule::Substring => 6500,
            MatchRule::SubstringIgnoreCase => 6000,
            MatchRule::InitialsSubstring => 5500,
            MatchRule::PhoneticSubstring => 5000,
        }
    }
}

/// A query with its derived forms computed once.
#[derive(Debug, Clone)]
pub struct PreparedQuery<'a> {
    raw: &'a str,
    lower: String,
    phonetic: String,
    initial_only: bool,
    single_char: bool,
}

impl<'a> PreparedQuery<'a> {
    pub fn new(raw: &'a str) -> Self {
        let mut chars = raw.chars();
        let single_char = chars.next().is_some() && chars.next().is_none();

        Self {
            raw,
            lower: raw.to_lowercase(),
            phonetic: phonetic_key(raw),
            initial_only: is_initial_only(raw),
            single_char,
        }
    }

    /// Whether the query is compared verbatim against phonetic keys.
    pub fn is_initial_only(&self) -> bool {
        self.initial_only
    }

    /// Find the first rule of the ladder that matches, with the byte offset
    /// of the match for substring rules.
    pub fn match_rule(&self, entry: &IndexEntry) -> Option<(MatchRule, usize)> {
        if self.raw.is_empty() {
            return None;
        }

        let name = entry.school().name();
        let key = entry.phonetic_key();

        if name == self.raw {
            return Some((MatchRule::Exact, 0));
        }

        let name_lower = name.to_lowercase();
        if name_lower == self.lower {
            return Some((MatchRule::ExactIgnoreCase, 0));
        }
        if name.starts_with(self.raw) {
            return Some((MatchRule::Prefix, 0));
        }
        if name_lower.starts_with(&self.lower) {
            return Some((MatchRule::PrefixIgnoreCase, 0));
        }
        if self.initial_only && key.starts_with(self.raw) {
            return Some((MatchRule::InitialsPrefix, 0));
        }
        if !self.initial_only && key.starts_with(&self.phonetic) {
            return Some((MatchRule::PhoneticPrefix, 0));
        }
        if let Some(at) = name.find(self.raw) {
            return Some((MatchRule::Substring, at));
        }
        if let Some(at) = name_lower.find(&self.lower) {
            return Some((MatchRule::SubstringIgnoreCase, at));
        }
        if self.initial_only {
            key.find(self.raw)
                .map(|at| (MatchRule::InitialsSubstring, at))
        } else {
            key.find(&self.phonetic)
                .map(|at| (MatchRule::PhoneticSubstring, at))
        }
    }

    /// Score an entry; 0 means the entry does not match.
    ///
    /// A single-character query scores half unless the name or the phonetic
    /// key starts with it verbatim, so one-letter hits buried inside names
    /// (or matched only by ignoring case) do not crowd out direct prefix hits.
    pub fn score(&self, entry: &IndexEntry) -> i64 {
        let Some((rule, offset)) = self.match_rule(entry) else {
            return 0;
        };

        let mut score = rule.base_score() - offset as i64;
        if self.single_char && !self.is_direct_prefix(entry) {
            score /= 2;
        }
        score.max(0)
    }

    fn is_direct_prefix(&self, entry: &IndexEntry) -> bool {
        entry.school().name().starts_with(self.raw) || entry.phonetic_key().starts_with(self.raw)
    }
}

/// An entry that matched a query.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub entry: &'a IndexEntry,
    pub score: i64,
}

/// Score every entry against `query` and return the best `limit` matches,
/// highest score first.
///
/// The sort is stable, so entries with equal scores keep their order in
/// `entries`. Callers should not rely on that order.
pub fn rank<'a>(entries: &'a [IndexEntry], query: &str, limit: usize) -> Vec<Ranked<'a>> {
    let query = PreparedQuery::new(query);

    let mut matches: Vec<Ranked<'a>> = entries
        .iter()
        .filter_map(|entry| {
            let score = query.score(entry);
            (score > 0).then_some(Ranked { entry, score })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SchoolRecord;

    fn entry(name: &str) -> IndexEntry {
        IndexEntry::new(SchoolRecord::new(name, "B10", name, "", "").unwrap())
    }

    fn entries(names: &[&str]) -> Vec<IndexEntry> {
        names.iter().map(|n| entry(n)).collect()
    }

    fn score(query: &str, name: &str) -> i64 {
        PreparedQuery::new(query).score(&entry(name))
    }

    fn rule(query: &str, name: &str) -> Option<MatchRule> {
        PreparedQuery::new(query)
            .match_rule(&entry(name))
            .map(|(rule, _)| rule)
    }

    #[test]
    fn exact_match_ranks_first() {
        let index = entries(&["서울여자고등학교", "서울고등학교", "부산고등학교"]);
        let ranked = rank(&index, "서울고등학교", 100);

        assert_eq!(ranked[0].entry.school().name(), "서울고등학교");
        assert_eq!(ranked[0].score, 10000);
        assert!(ranked[1..].iter().all(|r| r.score < 10000));
    }

    #[test]
    fn initials_query_matches_by_phonetic_prefix() {
        let index = entries(&["서울고등학교", "서울여자고등학교", "부산고등학교"]);
        let ranked = rank(&index, "ㅅㅇ", 100);

        let names: Vec<_> = ranked.iter().map(|r| r.entry.school().name()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"서울고등학교"));
        assert!(names.contains(&"서울여자고등학교"));
        assert!(ranked.iter().all(|r| r.score == 7500));
    }

    #[test]
    fn ladder_scores() {
        assert_eq!(score("KAIST", "KAIST"), 10000);
        assert_eq!(score("kaist", "KAIST"), 9000);
        assert_eq!(score("서울", "서울고등학교"), 8500);
        assert_eq!(score("kai", "KAIST고"), 8000);
        assert_eq!(score("ㅅㅇㄱ", "서울고등학교"), 7500);
        assert_eq!(score("서ㅇ", "서울고등학교"), 7000);
        // Byte offsets: each syllable is three bytes in UTF-8.
        assert_eq!(score("고등", "서울고등학교"), 6500 - 6);
        assert_eq!(score("ist", "KAIST고"), 6000 - 2);
        assert_eq!(score("ㄱㄷ", "서울고등학교"), 5500 - 6);
        assert_eq!(score("고ㄷ", "서울고등학교"), 5000 - 6);
    }

    #[test]
    fn ladder_rules() {
        assert_eq!(rule("서울", "서울고등학교"), Some(MatchRule::Prefix));
        assert_eq!(rule("ㄱㄷ", "서울고등학교"), Some(MatchRule::InitialsSubstring));
        assert_eq!(rule("고ㄷ", "서울고등학교"), Some(MatchRule::PhoneticSubstring));
        assert_eq!(rule("대구", "서울고등학교"), None);
    }

    #[test]
    fn single_char_substring_is_halved() {
        // 부산고등학교 → ㅂㅅㄱㄷㅎㄱ: "ㅅ" is found at byte 3, not at the start.
        assert_eq!(score("ㅅ", "부산고등학교"), (5500 - 3) / 2);
        assert_eq!(score("고", "서울고등학교"), (6500 - 6) / 2);
    }

    #[test]
    fn single_char_prefix_is_not_halved() {
        assert_eq!(score("ㅅ", "서울고등학교"), 7500);
        assert_eq!(score("서", "서울고등학교"), 8500);
        assert_eq!(score("S", "Seoul"), 8500);
    }

    #[test]
    fn single_char_case_insensitive_match_is_halved() {
        assert_eq!(score("s", "Seoul"), 8000 / 2);
        assert_eq!(score("a", "A"), 9000 / 2);
        assert_eq!(rule("a", "A"), Some(MatchRule::ExactIgnoreCase));
    }

    #[test]
    fn single_char_phonetic_prefix_is_halved() {
        // 수원고 → ㅅㅇㄱ starts with the key of 서, but not with 서 itself.
        assert_eq!(rule("서", "수원고"), Some(MatchRule::PhoneticPrefix));
        assert_eq!(score("서", "수원고"), 7000 / 2);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = entries(&["서울고등학교", "부산고등학교"]);
        assert!(rank(&index, "", 100).is_empty());
        assert_eq!(score("", "서울고등학교"), 0);
    }

    #[test]
    fn longer_query_than_name_matches_nothing() {
        assert_eq!(score("서울고등학교부설", "서울고"), 0);
    }

    #[test]
    fn mixed_query_is_not_initial_only() {
        assert!(!PreparedQuery::new("서울a").is_initial_only());
        assert!(!PreparedQuery::new("ㅅa").is_initial_only());
        assert!(PreparedQuery::new("ㅅㅇ").is_initial_only());
    }

    #[test]
    fn results_are_truncated() {
        let names: Vec<String> = (0..150).map(|i| format!("서울{i}고등학교")).collect();
        let index: Vec<IndexEntry> = names.iter().map(|n| entry(n)).collect();

        assert_eq!(rank(&index, "서울", 100).len(), 100);
        assert_eq!(rank(&index, "서울", 10).len(), 10);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let index = entries(&["서울고등학교", "서울여자고등학교"]);
        let ranked = rank(&index, "서울", 100);
        assert_eq!(ranked[0].entry.school().name(), "서울고등학교");
        assert_eq!(ranked[1].entry.school().name(), "서울여자고등학교");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::SchoolRecord;
    use proptest::prelude::*;

    fn index_strategy() -> impl Strategy<Value = Vec<IndexEntry>> {
        prop::collection::vec("[가-힣a-zA-Z ]{1,12}", 0..200).prop_map(|names| {
            names
                .into_iter()
                .enumerate()
                .filter_map(|(i, name)| SchoolRecord::new(i.to_string(), "B10", name, "", "").ok())
                .map(IndexEntry::new)
                .collect()
        })
    }

    proptest! {
        #[test]
        fn ranked_results_are_sorted_and_bounded(
            index in index_strategy(),
            query in "[가-힣ㄱ-ㅎa-z]{0,4}",
            limit in 0usize..120,
        ) {
            let ranked = rank(&index, &query, limit);

            prop_assert!(ranked.len() <= limit);
            prop_assert!(ranked.iter().all(|r| r.score > 0));
            prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }

        #[test]
        fn every_name_finds_itself_exactly(index in index_strategy()) {
            for entry in &index {
                let query = PreparedQuery::new(entry.school().name());
                prop_assert_eq!(query.score(entry), 10000);
            }
        }

        #[test]
        fn score_is_zero_iff_no_rule(name in "[가-힣a-z]{1,8}", query in "[가-힣ㄱ-ㅎa-z]{0,3}") {
            let entry = IndexEntry::new(SchoolRecord::new("1", "B10", name, "", "").unwrap());
            let prepared = PreparedQuery::new(&query);
            prop_assert_eq!(prepared.score(&entry) == 0, prepared.match_rule(&entry).is_none());
        }
    }
}
