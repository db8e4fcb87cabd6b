//! Vocabulary tables for the query interpreter.
//!
//! Every table is an ordered slice: the first rule whose phrase occurs in the
//! lower-cased query wins. Phrases are plain substrings, not words, so longer
//! or more specific phrases must come before the phrases they contain
//! (e.g. "javascript" before "java", "full stack" before "stack"-like tails).

/// Fallback title when no title rule matches.
pub const DEFAULT_TITLE: &str = "Software Developer";

/// Maximum number of skills kept from a single query.
pub const MAX_SKILLS: usize = 6;

/// phrase → canonical title
pub const TITLE_RULES: &[(&str, &str)] = &[
    ("full stack", "Full Stack Developer"),
    ("fullstack", "Full Stack Developer"),
    ("frontend", "Frontend Developer"),
    ("front end", "Frontend Developer"),
    ("backend", "Backend Developer"),
    ("back end", "Backend Developer"),
    ("react native", "React Native Developer"),
    ("react", "React Developer"),
    ("angular", "Angular Developer"),
    ("vue", "Vue.js Developer"),
    ("node", "Node.js Developer"),
    ("javascript", "JavaScript Developer"),
    ("typescript", "TypeScript Developer"),
    ("python", "Python Developer"),
    ("java", "Java Developer"),
    ("golang", "Go Developer"),
    ("rust", "Rust Developer"),
    ("php", "PHP Developer"),
    ("ruby", "Ruby Developer"),
    ("android", "Android Developer"),
    ("ios developer", "iOS Developer"),
    ("flutter", "Flutter Developer"),
    ("mobile", "Mobile Developer"),
    ("devops", "DevOps Engineer"),
    ("cloud", "Cloud Engineer"),
    ("data scientist", "Data Scientist"),
    ("data science", "Data Scientist"),
    ("data analyst", "Data Analyst"),
    ("data engineer", "Data Engineer"),
    ("machine learning", "Machine Learning Engineer"),
    ("ml engineer", "Machine Learning Engineer"),
    ("qa", "QA Engineer"),
    ("tester", "QA Engineer"),
    ("ui/ux", "UI/UX Designer"),
    ("designer", "UI/UX Designer"),
    ("product manager", "Product Manager"),
    ("software engineer", "Software Engineer"),
];

/// phrase → canonical location. Cities and countries precede "remote" so that
/// "remote india" resolves to a place.
pub const LOCATION_RULES: &[(&str, &str)] = &[
    ("bangalore", "Bangalore"),
    ("bengaluru", "Bangalore"),
    ("mumbai", "Mumbai"),
    ("new delhi", "New Delhi"),
    ("delhi", "New Delhi"),
    ("hyderabad", "Hyderabad"),
    ("pune", "Pune"),
    ("chennai", "Chennai"),
    ("kolkata", "Kolkata"),
    ("noida", "Noida"),
    ("gurgaon", "Gurgaon"),
    ("new york", "New York"),
    ("san francisco", "San Francisco"),
    ("seattle", "Seattle"),
    ("austin", "Austin"),
    ("london", "London"),
    ("berlin", "Berlin"),
    ("toronto", "Toronto"),
    ("singapore", "Singapore"),
    ("dubai", "Dubai"),
    ("india", "India"),
    ("united states", "United States"),
    ("usa", "United States"),
    ("united kingdom", "United Kingdom"),
    ("canada", "Canada"),
    ("germany", "Germany"),
    ("australia", "Australia"),
    ("remote", "Remote"),
];

/// Recognised skills, scanned in this order. Tokens that are substrings of
/// everyday words ("go", "r", "c") are left out on purpose.
pub const SKILL_VOCABULARY: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node",
    "python",
    "java",
    "golang",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "c++",
    "c#",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "graphql",
    "redux",
    "django",
    "flask",
    "spring",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "html",
    "css",
    "tailwind",
    "machine learning",
    "tensorflow",
    "pytorch",
    "figma",
    "git",
];

/// Returns the canonical value of the first rule whose phrase occurs in `haystack`.
///
/// `haystack` must already be lower-cased.
pub fn first_match<'a>(haystack: &str, rules: &[(&str, &'a str)]) -> Option<&'a str> {
    rules
        .iter()
        .find(|(phrase, _)| haystack.contains(phrase))
        .map(|(_, canonical)| *canonical)
}
