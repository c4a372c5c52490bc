//! User-facing texts and LLM prompt builders.

pub const WELCOME: &str = "🌟 Welcome to Resume Assistant Bot 🌟

I can help you with:
• Resume optimization
• Interview preparation
• ATS score checking
• Mock interviews";

pub const HELP: &str = "🆘 Help Guide 🆘

📝 Upload Resume - Analyze and optimize your resume PDF
📊 ATS Score - Check how well your resume passes automated systems
❓ Interview Questions - Get tailored questions for practice
🎤 Mock Interview - Practice with simulated interview
🛠️ Resume Analysis - Get detailed feedback on your resume

Commands:
/start - Show main menu
/end_interview - Stop mock interview
/help - Show this message

🔍 For best results, upload your resume first to get personalized suggestions.";

pub const UPLOAD_PROMPT: &str = "📤 Please upload your resume in PDF format";
pub const ATS_UPLOAD_PROMPT: &str = "📊 To check your ATS score, please upload your resume (PDF)";
pub const ANALYSIS_UPLOAD_PROMPT: &str =
    "🔍 For detailed resume analysis, please upload your resume (PDF)";
pub const FROM_RESUME_UPLOAD_PROMPT: &str =
    "📄 To generate questions from your resume, please upload it (PDF)";
pub const QUESTION_TYPE_PROMPT: &str = "❓ What type of questions would you like?";

pub const ONLY_PDF: &str = "⚠️ Please upload a PDF file only.";
pub const PROCESSING_RESUME: &str = "⏳ Processing your resume...";
pub const PROCESSING_FAILED: &str =
    "⚠️ Error processing your resume. Please ensure it's a valid PDF and try again.";

pub const NO_SKILLS_FOR_QUESTIONS: &str =
    "⚠️ No skills detected to generate specific questions. Try general questions instead.";
pub const GENERATING_TAILORED: &str = "⏳ Generating tailored interview questions...";
pub const ANALYZING_CONTENT: &str = "🔍 Analyzing your resume content...";
pub const JOB_TITLE_PROMPT: &str =
    "💼 Please reply with the exact job title you're targeting (e.g., \"Senior Frontend Developer\"):";

pub const INTERVIEW_INTRO: &str = "🎤 Starting Mock Interview\n\nI will ask you questions one by one. Reply to each question.\nType /end_interview to stop.";
pub const INTERVIEW_FAILED: &str = "⚠️ Could not generate questions. Please try again.";
pub const INTERVIEW_COMPLETE: &str = "🎉 Mock Interview Completed!\n\nReview your answers and feedback. Practice makes perfect!\n\nType /start to explore other features.";
pub const NO_ACTIVE_INTERVIEW: &str = "⚠️ No active mock interview to end.";

/// Generic question lists offered from the question-bank submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionBank {
    General,
    Technical,
    Behavioral,
}

impl QuestionBank {
    #[must_use]
    pub const fn progress(self) -> &'static str {
        match self {
            Self::General => "⏳ Generating general interview questions...",
            Self::Technical => "⏳ Generating technical interview questions...",
            Self::Behavioral => "⏳ Generating behavioral interview questions...",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::General => "📝 General Interview Questions",
            Self::Technical => "💻 Technical Interview Questions",
            Self::Behavioral => "🤝 Behavioral Interview Questions",
        }
    }

    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::General => {
                "Generate 10 comprehensive general interview questions for software engineers covering:\n- Technical concepts\n- Problem-solving\n- Teamwork\n- Career goals\n\nFormat as a numbered list with clear questions."
            }
            Self::Technical => {
                "Generate 10 challenging technical interview questions covering:\n- Data structures & algorithms\n- System design\n- Language-specific concepts\n- Debugging scenarios\n\nFormat as a numbered list."
            }
            Self::Behavioral => {
                "Generate 10 behavioral interview questions focusing on:\n- Team conflicts\n- Leadership\n- Failure experiences\n- Time management\n- Work ethics\n\nFormat as a numbered list."
            }
        }
    }
}

/// Summary sent after a résumé was processed.
#[must_use]
pub fn resume_processed(skills: &[String]) -> String {
    if skills.is_empty() {
        "✅ Resume processed, but no specific skills detected. Consider adding more keywords.\n\nWhat would you like to do?".to_string()
    } else {
        format!(
            "✅ Resume processed successfully!\n\n🔧 Skills detected:\n{}\n\nWhat would you like to do?",
            skills.join(", ")
        )
    }
}

#[must_use]
pub fn mock_interview(question_count: usize) -> String {
    format!(
        "Generate {question_count} interview questions (mix of technical, behavioral, and situational) for a software engineering mock interview. Format as a numbered list."
    )
}

#[must_use]
pub fn answer_feedback(question: &str, answer: &str) -> String {
    format!(
        "Question: {question}\nAnswer: {answer}\n\nProvide brief constructive feedback focusing on:\n- Technical accuracy\n- Clarity\n- Completeness\n- Improvement suggestions\n\nKeep it under 100 words."
    )
}

#[must_use]
pub fn tailored_questions(skills: &[String]) -> String {
    format!(
        "Generate 10 interview questions for a candidate with these skills:\n{}\n\nInclude:\n- 4 technical questions (mix of conceptual and practical)\n- 3 behavioral questions\n- 2 system design questions\n- 1 situational question\n\nFormat as a numbered list.",
        skills.join(", ")
    )
}

#[must_use]
pub fn content_analysis(resume_text: &str) -> String {
    format!(
        "Provide detailed analysis of this resume:\n\n{resume_text}\n\nCover:\n1. Strengths\n2. Areas for improvement\n3. Missing sections\n4. Formatting suggestions\n5. Keyword optimization\n\nBe constructive and specific."
    )
}

#[must_use]
pub fn optimize_for_role(resume_text: &str, job_title: &str) -> String {
    format!(
        "Optimize this resume for a \"{job_title}\" role:\n\n{resume_text}\n\nProvide:\n1. 5-10 missing keywords for this role\n2. Suggested improvements to summary/objective\n3. Relevant skills to highlight\n4. Any role-specific formatting tips\n\nBe specific and actionable."
    )
}

#[must_use]
pub fn optimizing_for_role(job_title: &str) -> String {
    format!("⏳ Optimizing your resume for \"{job_title}\"...")
}

#[must_use]
pub fn optimization_result(job_title: &str, optimization: &str) -> String {
    format!("💼 Optimization for {job_title}\n\n{optimization}")
}

#[must_use]
pub fn feedback(text: &str) -> String {
    format!("💡 Feedback:\n{text}")
}

#[must_use]
pub fn titled(title: &str, body: &str) -> String {
    format!("{title}\n\n{body}")
}
