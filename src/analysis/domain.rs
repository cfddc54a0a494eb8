use once_cell::sync::Lazy;
use regex::Regex;

static DOMAIN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://([^/\s]+)").expect("valid domain regex"));
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("valid url regex"));

const IMPERSONATION_KEYWORDS: &[&str] = &[
    "login", "secure", "verify", "career", "support", "account", "update", "portal",
];
const LOW_TRUST_SUFFIXES: &[&str] = &[".info", ".xyz", ".top", ".site", ".online"];
const MAX_DOMAIN_LEN: usize = 25;

/// Reasons a domain looks like it was registered for phishing, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainFlag {
    Hyphenated,
    ImpersonationKeyword,
    LowTrustExtension,
    UnusuallyLong,
}

impl DomainFlag {
    pub fn reason(self) -> &'static str {
        match self {
            DomainFlag::Hyphenated => "Uses hyphenated domain structure",
            DomainFlag::ImpersonationKeyword => "Contains impersonation-related keywords",
            DomainFlag::LowTrustExtension => "Uses low-trust domain extension",
            DomainFlag::UnusuallyLong => "Unusually long domain name",
        }
    }
}

/// Host portion of the first `http(s)://` link in `text`, lowercased.
pub fn extract_domain(text: &str) -> Option<String> {
    DOMAIN_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|host| host.as_str().to_lowercase())
}

pub fn is_suspicious_domain(domain: &str) -> Vec<DomainFlag> {
    let mut flags = Vec::new();
    if domain.contains('-') {
        flags.push(DomainFlag::Hyphenated);
    }
    if IMPERSONATION_KEYWORDS.iter().any(|word| domain.contains(word)) {
        flags.push(DomainFlag::ImpersonationKeyword);
    }
    if LOW_TRUST_SUFFIXES.iter().any(|suffix| domain.ends_with(suffix)) {
        flags.push(DomainFlag::LowTrustExtension);
    }
    if domain.chars().count() > MAX_DOMAIN_LEN {
        flags.push(DomainFlag::UnusuallyLong);
    }
    flags
}

/// Every `http(s)://` link in `text`, up to `limit`, with trailing punctuation removed.
pub fn extract_urls(text: &str, limit: usize) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| normalize_url(m.as_str()))
        .filter(|url| !url.is_empty())
        .take(limit)
        .collect()
}

fn normalize_url(raw: &str) -> String {
    let mut cleaned = raw.to_string();
    while let Some(last) = cleaned.chars().last() {
        let unbalanced = match last {
            ')' => !cleaned.contains('('),
            ']' => !cleaned.contains('['),
            '>' => !cleaned.contains('<'),
            '"' | '\'' => cleaned.matches(last).count() % 2 == 1,
            ',' | '.' | '!' | '?' | ';' | ':' => true,
            _ => false,
        };
        if !unbalanced {
            break;
        }
        cleaned.pop();
    }
    cleaned
}
