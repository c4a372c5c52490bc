//! Pseudo ATS (applicant tracking system) scoring.
//!
//! The score is not a real ATS evaluation: it is drawn uniformly from
//! `70..=100` and paired with a random sample of vocabulary skills the résumé
//! does not mention.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::skills::missing_skills;

/// Number of missing keywords suggested per report.
pub const SUGGESTED_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtsReport {
    pub score: u8,
    pub suggested_keywords: Vec<String>,
}

impl AtsReport {
    /// Score `resume_text` using the supplied random source.
    pub fn compute<R: Rng + ?Sized>(resume_text: &str, rng: &mut R) -> Self {
        let score = rng.gen_range(70..=100);
        let missing = missing_skills(resume_text);
        let suggested_keywords = missing
            .choose_multiple(rng, SUGGESTED_KEYWORDS)
            .map(|skill| (*skill).to_string())
            .collect();

        Self {
            score,
            suggested_keywords,
        }
    }

    /// Render the report as a single chat message.
    #[must_use]
    pub fn render(&self) -> String {
        let keywords = if self.suggested_keywords.is_empty() {
            "More relevant keywords for your target role".to_string()
        } else {
            self.suggested_keywords.join(", ")
        };
        format!(
            "📊 Your ATS Score: {}/100\n\n🔍 To improve, consider adding:\n{keywords}",
            self.score
        )
    }
}
