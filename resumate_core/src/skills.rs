//! Skill vocabulary and whole-word skill extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical skill names, grouped by category. Extraction results follow
/// this order.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "JavaScript",
    "Python",
    "Java",
    "C#",
    "TypeScript",
    "PHP",
    "Ruby",
    "Go",
    "Swift",
    "Kotlin",
    "Rust",
    "Scala",
    "Perl",
    "R",
    "Dart",
    // Web development
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue.js",
    "Svelte",
    "Next.js",
    "Nuxt.js",
    "Django",
    "Flask",
    "Spring",
    "Laravel",
    "Express.js",
    "NestJS",
    "GraphQL",
    // Mobile development
    "React Native",
    "Flutter",
    "Android SDK",
    "iOS Development",
    "Xamarin",
    // Databases
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "Cassandra",
    "Firebase",
    "Oracle",
    "SQLite",
    "Elasticsearch",
    "DynamoDB",
    // DevOps & cloud
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Terraform",
    "Ansible",
    "Jenkins",
    "CI/CD",
    "GitHub Actions",
    "CircleCI",
    "Prometheus",
    "Grafana",
    // Data science & AI
    "Machine Learning",
    "Deep Learning",
    "TensorFlow",
    "PyTorch",
    "Keras",
    "NLP",
    "Computer Vision",
    "Data Analysis",
    "Pandas",
    "NumPy",
    "SciPy",
    "Big Data",
    "Hadoop",
    "Spark",
    "Tableau",
    "Power BI",
    // Other technologies
    "Blockchain",
    "Smart Contracts",
    "Solidity",
    "Web3",
    "Cryptography",
    "Cybersecurity",
    "Penetration Testing",
    "Ethical Hacking",
    // Methodologies
    "Agile",
    "Scrum",
    "Kanban",
    "DevOps",
    "TDD",
    "BDD",
    "Pair Programming",
    // Soft skills
    "Problem Solving",
    "Teamwork",
    "Communication",
    "Leadership",
    "Time Management",
    "Critical Thinking",
    "Adaptability",
    "Creativity",
    "Emotional Intelligence",
];

/// One case-insensitive matcher per vocabulary entry.
///
/// `\b` cannot be used because several entries end in non-word characters
/// (`C#`, `CI/CD`); a boundary here is the edge of the text or any character
/// that is not alphanumeric or `_`.
static MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILL_VOCABULARY
        .iter()
        .filter_map(|&skill| {
            let pattern = format!(r"(?i)(?:^|[^\w]){}(?:$|[^\w])", regex::escape(skill));
            Regex::new(&pattern).ok().map(|re| (skill, re))
        })
        .collect()
});

/// Whether `text` mentions `skill` as a whole word.
#[must_use]
pub fn mentions(text: &str, skill: &str) -> bool {
    MATCHERS
        .iter()
        .find(|(name, _)| *name == skill)
        .is_some_and(|(_, re)| re.is_match(text))
}

/// Extract every vocabulary skill mentioned in `text`, in vocabulary order.
#[must_use]
pub fn extract_skills(text: &str) -> Vec<String> {
    MATCHERS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| (*skill).to_string())
        .collect()
}

/// Vocabulary skills not mentioned in `text`, in vocabulary order.
#[must_use]
pub fn missing_skills(text: &str) -> Vec<&'static str> {
    MATCHERS
        .iter()
        .filter(|(_, re)| !re.is_match(text))
        .map(|(skill, _)| *skill)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vocabulary_entry_compiles() {
        assert_eq!(MATCHERS.len(), SKILL_VOCABULARY.len());
    }

    #[test]
    fn java_does_not_match_inside_javascript() {
        assert_eq!(extract_skills("Five years of JavaScript"), vec!["JavaScript"]);
        assert_eq!(
            extract_skills("I use Java and JavaScript"),
            vec!["JavaScript", "Java"]
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let skills = extract_skills("docker, KUBERNETES and postgresql");
        assert_eq!(skills, vec!["PostgreSQL", "Docker", "Kubernetes"]);
    }

    #[test]
    fn symbols_and_multi_word_entries_match() {
        let skills = extract_skills("Shipped C# services with CI/CD on GitHub Actions.");
        assert!(skills.contains(&"C#".to_string()));
        assert!(skills.contains(&"CI/CD".to_string()));
        assert!(skills.contains(&"GitHub Actions".to_string()));
    }

    #[test]
    fn no_substring_matches() {
        assert!(extract_skills("Gopher Rusty Scalable Reactive").is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "Python, python, PYTHON and Rust";
        assert_eq!(extract_skills(text), extract_skills(text));
        assert_eq!(extract_skills(text), vec!["Python", "Rust"]);
    }

    #[test]
    fn mentions_checks_a_single_entry() {
        assert!(mentions("Led an Agile team", "Agile"));
        assert!(!mentions("Led an Agile team", "Scrum"));
        assert!(!mentions("anything", "Cobol"));
    }

    #[test]
    fn missing_skills_complement_extracted_ones() {
        let text = "Rust, Go and Docker on AWS";
        let found = extract_skills(text);
        let missing = missing_skills(text);
        assert_eq!(found.len() + missing.len(), SKILL_VOCABULARY.len());
        assert!(missing.iter().all(|skill| !found.iter().any(|f| f == skill)));
        assert!(!missing.contains(&"Rust"));
        assert!(missing.contains(&"Python"));
        assert_eq!(missing_skills("").len(), SKILL_VOCABULARY.len());
    }
}
