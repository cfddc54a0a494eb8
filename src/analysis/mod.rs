pub mod domain;
pub mod scorer;

pub use domain::extract_urls;
pub use scorer::analyze_message_text;
