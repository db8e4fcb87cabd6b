//! Placeholder description for aggregator results that arrive without one.

use crate::search::vocabulary::DEFAULT_TITLE;

const DEFAULT_COMPANY: &str = "We";

/// Builds a generic job description. Blank `title` becomes "Software Developer",
/// blank `company` becomes "We".
pub fn generate_fallback_description(title: &str, company: &str) -> String {
    let title = non_blank(title).unwrap_or(DEFAULT_TITLE);
    let company = non_blank(company).unwrap_or(DEFAULT_COMPANY);
    let verb = if company == DEFAULT_COMPANY { "are" } else { "is" };

    format!(
        "{company} {verb} looking for a talented {title} to join the team. \
         In this role you will design, build and maintain high-quality software, \
         collaborate with cross-functional teammates, and help ship features that \
         matter to users. We value curiosity, ownership and clear communication. \
         Apply now to learn more about this {title} opportunity."
    )
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
