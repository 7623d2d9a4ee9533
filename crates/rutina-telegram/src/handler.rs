// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message routing helpers and reply formatting.
//!
//! Everything here is pure: command parsing, chat-type checks, and the
//! user-facing reply strings, kept separate from the teloxide plumbing so
//! they can be tested without a network.

use chrono::{DateTime, Utc};
use rutina_core::{Goal, Note, PlanPeriod};
use teloxide::types::{ChatKind, Message};

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`; the diary is
/// personal.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Splits a leading-slash command into `(command, argument)`.
///
/// The command is lowercased; the argument keeps its original casing and is
/// trimmed. Returns `None` for non-command text.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().unwrap_or("").trim().to_string();
    Some((command, argument))
}

/// Parsed form of a `/goal <period> <text>` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalCommand {
    Save(PlanPeriod, String),
    /// Missing period or text.
    Usage,
    /// Period token present but not recognized.
    UnknownPeriod,
}

/// Splits a `/goal` argument into its period and text.
pub fn parse_goal_command(argument: &str) -> GoalCommand {
    let mut parts = argument.trim().splitn(2, char::is_whitespace);
    let (Some(first), Some(rest)) = (parts.next(), parts.next()) else {
        return GoalCommand::Usage;
    };
    let rest = rest.trim();
    if first.is_empty() || rest.is_empty() {
        return GoalCommand::Usage;
    }
    match PlanPeriod::parse(first) {
        Some(period) => GoalCommand::Save(period, rest.to_string()),
        None => GoalCommand::UnknownPeriod,
    }
}

pub fn help_text() -> &'static str {
    "Send a message or voice note. I will file it as a goal or note.\n\
     Commands:\n\
     /goals [period] - list goals (urgent, through_day, daily, weekly, monthly, life).\n\
     /notes [since date] - list notes (optional ISO date).\n\
     /goal <period> <text> - save a goal manually.\n\
     /note <text> - save a note manually."
}

pub fn goal_saved_reply(period: PlanPeriod) -> String {
    format!("Saved goal for {period}.")
}

pub const NOTE_SAVED_REPLY: &str = "Saved note.";
pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Type /help.";
pub const EMPTY_MESSAGE_REPLY: &str = "Send text or a voice note.";
pub const TRANSCRIPTION_FAILED_REPLY: &str =
    "I received a voice message but could not transcribe it yet. Please try again or send text.";
pub const NO_GOALS_REPLY: &str = "No goals found for that period.";
pub const NO_NOTES_REPLY: &str = "No notes found.";
pub const GOAL_USAGE_REPLY: &str = "Usage: /goal monthly Invest $3k monthly";
pub const GOAL_PERIOD_REPLY: &str =
    "Unknown period. Use urgent, through_day, daily, weekly, monthly, life.";
pub const NOTE_USAGE_REPLY: &str = "Usage: /note I felt great today";

/// Formats the `/goals` listing.
pub fn format_goal_list(period: Option<PlanPeriod>, goals: &[Goal]) -> String {
    let header = match period {
        None => "Your latest goals:".to_string(),
        Some(p) => format!("Your {p} goals:"),
    };
    let body: Vec<String> = goals
        .iter()
        .map(|goal| format!("• [{}] {}", goal.period, goal.text))
        .collect();
    format!("{header}\n{}", body.join("\n"))
}

/// Formats the `/notes` listing.
pub fn format_note_list(notes: &[Note]) -> String {
    let body: Vec<String> = notes
        .iter()
        .map(|note| format!("• {} {}", note.created_at.format("%Y-%m-%d %H:%M"), note.text))
        .collect();
    format!("Your latest notes:\n{}", body.join("\n"))
}

/// Parses the optional `/notes` argument as an ISO date or datetime cutoff.
pub fn parse_since_argument(argument: &str) -> Option<DateTime<Utc>> {
    let trimmed = argument.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}
