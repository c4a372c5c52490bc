//! Mock-interview question parsing and formatting.

use resumate_core::Interview;

/// A question line starts with `N.` or `-`.
fn is_question_line(line: &str) -> bool {
    if line.starts_with('-') {
        return true;
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with('.')
}

/// Pull the numbered or bulleted lines out of a model reply.
#[must_use]
pub fn parse_questions(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| is_question_line(line))
        .map(str::to_string)
        .collect()
}

/// Message asking the interview's current question.
#[must_use]
pub fn format_question(interview: &Interview) -> String {
    format!(
        "❓ Question {}/{}:\n\n{}",
        interview.current_index() + 1,
        interview.total(),
        interview.current_question()
    )
}
