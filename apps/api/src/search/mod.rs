// Job search core: free-text query interpretation, listing match scoring and
// fallback descriptions. Everything below `handlers` is pure and synchronous.

pub mod description;
pub mod handlers;
pub mod match_scorer;
pub mod query_parser;
pub mod vocabulary;
