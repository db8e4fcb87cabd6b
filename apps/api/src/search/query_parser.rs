//! Query Interpreter — turns a free-text job search phrase into structured search parameters.
//!
//! Matching is case-insensitive substring containment against the ordered tables in
//! `search::vocabulary`. There is no tokenization, so "backend" also matches inside
//! "backendish". Callers should expect the occasional over-match.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::vocabulary::{
    first_match, DEFAULT_TITLE, LOCATION_RULES, MAX_SKILLS, SKILL_VOCABULARY, TITLE_RULES,
};

/// Employment type requested by the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority requested by the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Senior,
    Junior,
    Entry,
    #[default]
    #[serde(rename = "Mid-level")]
    MidLevel,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::MidLevel => "Mid-level",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job-type phrases in priority order. "full time" is checked before "remote",
/// so "full time remote" is Full-time.
const JOB_TYPE_RULES: &[(&str, JobType)] = &[
    ("full time", JobType::FullTime),
    ("part time", JobType::PartTime),
    ("contract", JobType::Contract),
    ("remote", JobType::Remote),
    ("internship", JobType::Internship),
];

const EXPERIENCE_RULES: &[(&str, ExperienceLevel)] = &[
    ("senior", ExperienceLevel::Senior),
    ("junior", ExperienceLevel::Junior),
    ("entry", ExperienceLevel::Entry),
];

/// Structured output of query interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub job_title: String,
    /// Empty string means "unspecified".
    pub location: String,
    pub skills: Vec<String>,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub original_query: String,
}

/// Interprets a free-text job query. Total over all inputs: anything unrecognised
/// falls through to the defaults.
pub fn parse_job_query(query: &str) -> ParsedQuery {
    let lower = query.to_lowercase();

    let parsed = ParsedQuery {
        job_title: extract_title(&lower),
        location: extract_location(&lower),
        skills: extract_skills(&lower),
        job_type: extract_job_type(&lower),
        experience_level: extract_experience(&lower),
        original_query: query.to_string(),
    };

    debug!(
        title = %parsed.job_title,
        location = %parsed.location,
        skills = ?parsed.skills,
        job_type = %parsed.job_type,
        experience = %parsed.experience_level,
        "Parsed job query"
    );

    parsed
}

fn extract_title(lower: &str) -> String {
    first_match(lower, TITLE_RULES)
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

fn extract_location(lower: &str) -> String {
    first_match(lower, LOCATION_RULES)
        .map(String::from)
        .unwrap_or_default()
}

fn extract_skills(lower: &str) -> Vec<String> {
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(*skill))
        .take(MAX_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

fn extract_job_type(lower: &str) -> JobType {
    JOB_TYPE_RULES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, job_type)| *job_type)
        .unwrap_or_default()
}

fn extract_experience(lower: &str) -> ExperienceLevel {
    EXPERIENCE_RULES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, level)| *level)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_react_remote_india() {
        let parsed = parse_job_query("react developer remote india");
        assert_eq!(parsed.job_title, "React Developer");
        assert_eq!(parsed.job_type, JobType::Remote);
        assert_eq!(parsed.location, "India");
        assert!(parsed.skills.contains(&"react".to_string()));
        assert_eq!(parsed.experience_level, ExperienceLevel::MidLevel);
    }

    #[test]
    fn test_empty_query_falls_back_to_defaults() {
        let parsed = parse_job_query("");
        assert_eq!(parsed.job_title, "Software Developer");
        assert_eq!(parsed.location, "");
        assert!(parsed.skills.is_empty());
        assert_eq!(parsed.job_type, JobType::FullTime);
        assert_eq!(parsed.experience_level, ExperienceLevel::MidLevel);
        assert_eq!(parsed.original_query, "");
    }

    #[test]
    fn test_original_query_preserved_verbatim() {
        let parsed = parse_job_query("  Senior RUST Engineer, Berlin ");
        assert_eq!(parsed.original_query, "  Senior RUST Engineer, Berlin ");
        assert_eq!(parsed.job_title, "Rust Developer");
        assert_eq!(parsed.location, "Berlin");
        assert_eq!(parsed.experience_level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let upper = parse_job_query("PYTHON DJANGO LONDON INTERNSHIP");
        let lower = parse_job_query("python django london internship");
        assert_eq!(upper.job_title, lower.job_title);
        assert_eq!(upper.location, "London");
        assert_eq!(upper.skills, vec!["python", "django"]);
        assert_eq!(upper.job_type, JobType::Internship);
    }

    #[test]
    fn test_full_time_wins_over_part_time() {
        let parsed = parse_job_query("part time or full time frontend");
        assert_eq!(parsed.job_type, JobType::FullTime);
    }

    #[test]
    fn test_full_time_wins_over_remote() {
        let parsed = parse_job_query("remote full time backend");
        assert_eq!(parsed.job_type, JobType::FullTime);
        assert_eq!(parsed.job_title, "Backend Developer");
    }

    #[test]
    fn test_hyphenated_full_time_is_not_a_phrase_match() {
        // Only the spaced phrase is recognised; "full-time" falls through to the default.
        let parsed = parse_job_query("contract full-time");
        assert_eq!(parsed.job_type, JobType::Contract);
    }

    #[test]
    fn test_senior_beats_junior() {
        let parsed = parse_job_query("junior or senior devops");
        assert_eq!(parsed.experience_level, ExperienceLevel::Senior);
        assert_eq!(parsed.job_title, "DevOps Engineer");
    }

    #[test]
    fn test_part_time_wins_over_contract() {
        let parsed = parse_job_query("contract or part time qa");
        assert_eq!(parsed.job_type, JobType::PartTime);
    }

    #[test]
    fn test_contract_wins_over_remote() {
        assert_eq!(parse_job_query("remote contract").job_type, JobType::Contract);
    }

    #[test]
    fn test_remote_wins_over_internship() {
        assert_eq!(parse_job_query("internship remote").job_type, JobType::Remote);
    }

    #[test]
    fn test_junior_beats_entry() {
        let parsed = parse_job_query("junior entry");
        assert_eq!(parsed.experience_level, ExperienceLevel::Junior);
    }

    #[test]
    fn test_entry_level() {
        let parsed = parse_job_query("entry level data analyst");
        assert_eq!(parsed.experience_level, ExperienceLevel::Entry);
        assert_eq!(parsed.job_title, "Data Analyst");
    }

    #[test]
    fn test_full_stack_spellings_agree() {
        assert_eq!(
            parse_job_query("full stack").job_title,
            parse_job_query("fullstack").job_title
        );
    }

    #[test]
    fn test_skills_follow_vocabulary_order_not_input_order() {
        let parsed = parse_job_query("docker python react");
        assert_eq!(parsed.skills, vec!["react", "python", "docker"]);
    }

    #[test]
    fn test_skills_capped_at_six() {
        let parsed =
            parse_job_query("javascript typescript react angular vue node python rust docker");
        assert_eq!(parsed.skills.len(), MAX_SKILLS);
        assert_eq!(
            parsed.skills,
            vec!["javascript", "typescript", "react", "angular", "vue", "node"]
        );
    }

    #[test]
    fn test_known_over_match_java_inside_javascript() {
        // Substring matching is loose by construction: "javascript" also yields "java".
        let parsed = parse_job_query("javascript");
        assert_eq!(parsed.skills, vec!["javascript", "java"]);
        assert_eq!(parsed.job_title, "JavaScript Developer");
    }

    #[test]
    fn test_known_over_match_inside_longer_word() {
        let parsed = parse_job_query("backendish");
        assert_eq!(parsed.job_title, "Backend Developer");
    }

    #[test]
    fn test_non_ascii_input_is_total() {
        let parsed = parse_job_query("développeur à Zürich 東京");
        assert_eq!(parsed.job_title, DEFAULT_TITLE);
        assert_eq!(parsed.location, "");
    }

    #[test]
    fn test_remote_only_location() {
        let parsed = parse_job_query("remote react");
        assert_eq!(parsed.location, "Remote");
        assert_eq!(parsed.job_type, JobType::Remote);
    }

    #[test]
    fn test_serializes_with_camel_case_and_display_strings() {
        let parsed = parse_job_query("senior java contract");
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["jobTitle"], "Java Developer");
        assert_eq!(json["jobType"], "Contract");
        assert_eq!(json["experienceLevel"], "Senior");
        assert_eq!(json["originalQuery"], "senior java contract");

        let defaults = serde_json::to_value(parse_job_query("")).unwrap();
        assert_eq!(defaults["jobType"], "Full-time");
        assert_eq!(defaults["experienceLevel"], "Mid-level");
    }

    #[test]
    fn test_job_type_deserializes_from_display_string() {
        let job_type: JobType = serde_json::from_str(r#""Part-time""#).unwrap();
        assert_eq!(job_type, JobType::PartTime);
        assert!(serde_json::from_str::<JobType>(r#""Freelance""#).is_err());
    }

    proptest! {
        #[test]
        fn test_parse_is_total_and_well_formed(query in ".*") {
            let parsed = parse_job_query(&query);
            prop_assert!(!parsed.job_title.is_empty());
            prop_assert!(!parsed.job_type.as_str().is_empty());
            prop_assert!(!parsed.experience_level.as_str().is_empty());
            prop_assert!(parsed.skills.len() <= MAX_SKILLS);

            let unique: HashSet<_> = parsed.skills.iter().collect();
            prop_assert_eq!(unique.len(), parsed.skills.len());
            for skill in &parsed.skills {
                prop_assert!(SKILL_VOCABULARY.contains(&skill.as_str()));
            }
        }

        #[test]
        fn test_parse_is_deterministic(query in ".*") {
            prop_assert_eq!(parse_job_query(&query), parse_job_query(&query));
        }
    }
}
