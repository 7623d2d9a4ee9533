// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic keyword heuristics.
//!
//! Classifies with zero cost and zero latency: no LLM call, no network. The
//! keyword tables are data, kept separate from the decision logic so they can
//! be extended per language without touching the classifier.

use rutina_core::{Classification, PlanPeriod};

/// Prefix markers that force a message to be filed as a note.
const NOTE_MARKERS: &[&str] = &["note:", "заметка:"];

/// Mood/journal phrasings (contains, on lowercased text).
const NOTE_KEYWORDS: &[&str] = &[
    "i feel",
    "mood",
    "feeling",
    "journal",
    "reflection",
    "заметка",
    "мысл",
    "наблюден",
    "чувств",
    "настроен",
    "дневник",
    "итоги",
    "сегодня было",
    "сегодня я",
];

/// Period keyword sets in match priority order (first bucket wins).
const PERIOD_KEYWORDS: &[(PlanPeriod, &[&str])] = &[
    (PlanPeriod::Urgent, &["urgent", "срочно"]),
    (
        PlanPeriod::ThroughDay,
        &["through day", "through-day", "today", "сегодня"],
    ),
    (
        PlanPeriod::Daily,
        &["daily", "every day", "каждый день", "ежедневно"],
    ),
    (
        PlanPeriod::Weekly,
        &[
            "weekly",
            "every week",
            "каждую неделю",
            "еженедельно",
            "на этой неделе",
        ],
    ),
    (
        PlanPeriod::Monthly,
        &[
            "monthly",
            "every month",
            "каждый месяц",
            "ежемесячно",
            "в этом месяце",
        ],
    ),
    (PlanPeriod::Life, &["life", "long term", "long-term"]),
];

/// Action/intent markers implying a goal with no explicit horizon.
const GOAL_KEYWORDS: &[&str] = &[
    "need to",
    "i need",
    "i have to",
    "plan to",
    "todo",
    "task",
    "goal",
    "надо",
    "нужно",
    "хочу",
    "план",
    "сделать",
    "купить",
    "позвонить",
    "написать",
    "подготовить",
    "записаться",
    "отправить",
    "сегодня",
    "завтра",
];

/// Strips a leading note marker, returning the trimmed remainder.
///
/// Markers are matched case-insensitively; both markers lowercase without
/// changing byte length, so the prefix can be cut from the original text.
pub fn strip_note_marker(text: &str) -> Option<&str> {
    let lower = text.to_lowercase();
    for marker in NOTE_MARKERS {
        if lower.starts_with(marker) {
            return Some(text[marker.len()..].trim());
        }
    }
    None
}

/// Finds the first matching period bucket, in priority order
/// `Urgent > ThroughDay > Daily > Weekly > Monthly > Life`.
pub fn find_period(lower: &str) -> Option<PlanPeriod> {
    PERIOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(period, _)| *period)
}

/// Whether the text reads like a journal entry rather than a plan.
pub fn looks_like_note(lower: &str) -> bool {
    NOTE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether the text carries an action/intent marker.
pub fn looks_like_goal(lower: &str) -> bool {
    GOAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Classifies a message using keyword heuristics alone.
///
/// This is the complete offline classifier: every rule of the decision order
/// except the remote layer. Decision order (first match wins):
/// 1. empty input is an empty note
/// 2. explicit `note:` / `заметка:` marker, stripped
/// 3. mood/journal keywords
/// 4. explicit period keywords (a match implies a goal)
/// 5. action/intent keywords (implicit goal, defaults to through_day)
/// 6. otherwise a note
pub fn heuristic_classify(raw: &str) -> Classification {
    let text = raw.trim();
    if text.is_empty() {
        return Classification::note("");
    }

    if let Some(rest) = strip_note_marker(text) {
        return Classification::note(rest);
    }

    let lower = text.to_lowercase();
    if looks_like_note(&lower) {
        return Classification::note(text);
    }

    if let Some(period) = find_period(&lower) {
        return Classification::goal(period, text);
    }

    if looks_like_goal(&lower) {
        return Classification::goal(PlanPeriod::ThroughDay, text);
    }

    Classification::note(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rutina_core::RecordKind;

    #[test]
    fn note_marker_is_stripped_english() {
        let result = heuristic_classify("note: slept badly, headache all day");
        assert_eq!(result.kind, RecordKind::Note);
        assert_eq!(result.period, None);
        assert_eq!(result.text, "slept badly, headache all day");
    }

    #[test]
    fn note_marker_is_stripped_russian() {
        let result = heuristic_classify("заметка: отличная прогулка в парке");
        assert_eq!(result.kind, RecordKind::Note);
        assert_eq!(result.text, "отличная прогулка в парке");
    }

    #[test]
    fn note_marker_is_case_insensitive() {
        let result = heuristic_classify("Note: whatever");
        assert_eq!(result, Classification::note("whatever"));
        let result = heuristic_classify("ЗАМЕТКА: что-то");
        assert_eq!(result, Classification::note("что-то"));
    }

    #[test]
    fn note_marker_beats_period_keywords() {
        // The remainder mentions "urgent" but the marker already decided.
        let result = heuristic_classify("note: urgent feeling about tomorrow");
        assert_eq!(result.kind, RecordKind::Note);
        assert_eq!(result.period, None);
    }

    #[test]
    fn empty_input_is_empty_note() {
        assert_eq!(heuristic_classify(""), Classification::note(""));
        assert_eq!(heuristic_classify("  \t "), Classification::note(""));
    }

    #[test]
    fn mood_phrases_are_notes() {
        for input in [
            "i feel tired after the gym",
            "mood is great",
            "настроение так себе",
            "итоги недели: выжил",
            "сегодня было солнечно",
        ] {
            let result = heuristic_classify(input);
            assert_eq!(result.kind, RecordKind::Note, "input: {input}");
            assert_eq!(result.period, None, "input: {input}");
        }
    }

    #[test]
    fn period_keywords_map_to_their_buckets() {
        for (input, expected) in [
            ("urgent: fix the heating", PlanPeriod::Urgent),
            ("срочно оплатить счет", PlanPeriod::Urgent),
            ("finish slides today", PlanPeriod::ThroughDay),
            ("run every day", PlanPeriod::Daily),
            ("ежедневно делать зарядку", PlanPeriod::Daily),
            ("weekly budget review", PlanPeriod::Weekly),
            ("закончить отчет на этой неделе", PlanPeriod::Weekly),
            ("pay rent every month", PlanPeriod::Monthly),
            ("ежемесячно откладывать 10%", PlanPeriod::Monthly),
            ("learn japanese, long-term", PlanPeriod::Life),
        ] {
            let result = heuristic_classify(input);
            assert_eq!(result.kind, RecordKind::Goal, "input: {input}");
            assert_eq!(result.period, Some(expected), "input: {input}");
            assert_eq!(result.text, input, "text must be kept verbatim");
        }
    }

    #[test]
    fn urgent_beats_every_other_bucket() {
        let result = heuristic_classify("urgent: prepare the weekly and monthly numbers today");
        assert_eq!(result.period, Some(PlanPeriod::Urgent));
    }

    #[test]
    fn through_day_beats_daily_and_below() {
        let result = heuristic_classify("today start the daily stretching habit");
        assert_eq!(result.period, Some(PlanPeriod::ThroughDay));
    }

    #[test]
    fn implicit_goal_defaults_to_through_day() {
        let result = heuristic_classify("нужно купить молоко");
        assert_eq!(result.kind, RecordKind::Goal);
        assert_eq!(result.period, Some(PlanPeriod::ThroughDay));
        assert_eq!(result.text, "нужно купить молоко");
    }

    #[test]
    fn implicit_goal_markers_english() {
        for input in ["need to renew my passport", "todo: clean the desk", "plan to visit grandma"] {
            let result = heuristic_classify(input);
            assert_eq!(result.kind, RecordKind::Goal, "input: {input}");
            assert_eq!(result.period, Some(PlanPeriod::ThroughDay), "input: {input}");
        }
    }

    #[test]
    fn plain_observation_defaults_to_note() {
        let result = heuristic_classify("the new coffee place on 5th is decent");
        assert_eq!(result.kind, RecordKind::Note);
        assert_eq!(result.period, None);
    }

    #[test]
    fn segodnya_bylo_is_a_note_despite_the_period_keyword() {
        // "сегодня" alone is a through-day signal, but the day-recap phrasing
        // is checked first.
        let result = heuristic_classify("сегодня было тяжело на работе");
        assert_eq!(result.kind, RecordKind::Note);

        let result = heuristic_classify("сегодня сходить в банк");
        assert_eq!(result.kind, RecordKind::Goal);
        assert_eq!(result.period, Some(PlanPeriod::ThroughDay));
    }

    #[test]
    fn strip_note_marker_leaves_unmarked_text_alone() {
        assert_eq!(strip_note_marker("buy milk"), None);
        assert_eq!(strip_note_marker("note: buy milk"), Some("buy milk"));
        assert_eq!(strip_note_marker("noted for later"), None);
    }
}
