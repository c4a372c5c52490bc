//! Inline keyboards shown by the bot.

use resumate_core::{Button, Keyboard};

use crate::event::Action;

fn button(label: &str, action: &Action) -> Button {
    Button::new(label, action.code())
}

/// Top-level menu sent with the welcome message.
#[must_use]
pub fn main_menu() -> Keyboard {
    Keyboard::column([
        button("📝 Upload Resume", &Action::UploadResume),
        button("📊 Check ATS Score", &Action::AtsScore),
        button("❓ Generate Questions", &Action::GenerateQuestions),
        button("🎤 Start Mock Interview", &Action::MockInterview),
        button("🛠️ Resume Analysis", &Action::AnalyzeResume),
        button("ℹ️ Help", &Action::Help),
    ])
}

/// Question-bank submenu behind "Generate Questions".
#[must_use]
pub fn question_type_menu() -> Keyboard {
    Keyboard::column([
        button("From Resume", &Action::GenerateFromResume),
        button("General Questions", &Action::GeneralQuestions),
        button("Technical Questions", &Action::TechQuestions),
        button("Behavioral Questions", &Action::BehavioralQuestions),
    ])
}

/// Actions offered once a résumé has been processed.
#[must_use]
pub fn resume_action_menu() -> Keyboard {
    Keyboard::column([
        button("📊 Get ATS Score", &Action::ResumeAts),
        button("❓ Generate Questions", &Action::ResumeQuestions),
        button("🔍 Analyze Content", &Action::ResumeAnalysis),
        button("💼 Optimize for Role", &Action::ResumeOptimizeRole),
    ])
}
