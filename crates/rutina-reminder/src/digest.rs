// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Digest message composition.

use rutina_core::{Goal, ReminderScope};

/// Scope-specific digest header.
pub fn digest_header(scope: ReminderScope) -> &'static str {
    match scope {
        ReminderScope::Daily => {
            "Хе-хей! Вот твои планы и цели на сегодня, которые еще не выполнены:"
        }
        ReminderScope::Weekly => {
            "Хе-хей! Вот планы и цели этой недели, которые еще не выполнены:"
        }
        ReminderScope::Monthly => {
            "Хе-хей! Вот планы и цели этого месяца, которые еще не выполнены:"
        }
    }
}

/// Builds the digest message: header plus one bullet line per goal.
///
/// Callers pass goals already ordered newest-first and capped.
pub fn compose_digest(scope: ReminderScope, goals: &[Goal]) -> String {
    let lines: Vec<String> = goals
        .iter()
        .map(|goal| format!("• [{}] {}", goal.period, goal.text))
        .collect();
    format!("{}\nЦели:\n{}", digest_header(scope), lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rutina_core::PlanPeriod;

    fn goal(period: PlanPeriod, text: &str) -> Goal {
        Goal {
            id: 1,
            user_profile_id: 1,
            period,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn digest_lists_goals_with_period_tags() {
        let goals = vec![
            goal(PlanPeriod::Urgent, "оплатить счет"),
            goal(PlanPeriod::ThroughDay, "buy milk"),
        ];
        let message = compose_digest(ReminderScope::Daily, &goals);
        assert!(message.starts_with(digest_header(ReminderScope::Daily)));
        assert!(message.contains("• [urgent] оплатить счет"));
        assert!(message.contains("• [through_day] buy milk"));
    }

    #[test]
    fn headers_differ_per_scope() {
        assert_ne!(
            digest_header(ReminderScope::Daily),
            digest_header(ReminderScope::Weekly)
        );
        assert_ne!(
            digest_header(ReminderScope::Weekly),
            digest_header(ReminderScope::Monthly)
        );
    }

    #[test]
    fn goal_order_is_preserved() {
        let goals = vec![
            goal(PlanPeriod::Weekly, "newest"),
            goal(PlanPeriod::Weekly, "older"),
        ];
        let message = compose_digest(ReminderScope::Weekly, &goals);
        let newest = message.find("newest").unwrap();
        let older = message.find("older").unwrap();
        assert!(newest < older);
    }
}
