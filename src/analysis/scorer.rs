use crate::domain::{Explanation, RiskTier, Verdict};

use super::domain::{extract_domain, is_suspicious_domain};

const SUSPICIOUS_DOMAIN_WEIGHT: u32 = 30;
const URGENCY_WEIGHT: u32 = 20;
const PAYMENT_WEIGHT: u32 = 25;
const WEAK_IDENTITY_WEIGHT: u32 = 10;

const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "limited slots",
    "immediately",
    "today",
    "last chance",
    "suspended",
    "blocked",
];
const PAYMENT_KEYWORDS: &[&str] = &["pay", "fee", "deposit", "registration", "processing"];

const RECOMMEND_VERIFY: &str = "Only interact through verified official websites.";
const RECOMMEND_NONE: &str = "No immediate action required.";

/// Scores a message against the fixed scam heuristics.
///
/// Every check runs regardless of earlier results, and explanations are
/// appended in check order. The function is total: empty or garbled input
/// lands on the "no domain" path with a low score.
pub fn analyze_message_text(message: &str) -> Verdict {
    let message = message.to_lowercase();
    let mut score = 0;
    let mut analysis = Vec::new();

    let domain = extract_domain(&message);
    match domain.as_deref() {
        Some(domain) => {
            let flags = is_suspicious_domain(domain);
            if !flags.is_empty() {
                score += SUSPICIOUS_DOMAIN_WEIGHT;
                analysis.push(Explanation::new(
                    "Suspicious Link Detected",
                    format!("The link ({domain}) shows patterns commonly used in phishing scams."),
                ));
                analysis.extend(
                    flags
                        .into_iter()
                        .map(|flag| Explanation::new("Domain Analysis", flag.reason())),
                );
            }
        }
        None => analysis.push(Explanation::new(
            "No Domain Found",
            "No website link was detected in this message.",
        )),
    }

    if contains_any(&message, URGENCY_KEYWORDS) {
        score += URGENCY_WEIGHT;
        analysis.push(Explanation::new(
            "Urgency Pressure",
            "The message pressures you to act quickly without verification.",
        ));
    }

    if contains_any(&message, PAYMENT_KEYWORDS) {
        score += PAYMENT_WEIGHT;
        analysis.push(Explanation::new(
            "Payment Request Detected",
            "The message asks for money which is a common scam pattern.",
        ));
    }

    if !message.contains('@') && !message.contains("official") {
        score += WEAK_IDENTITY_WEIGHT;
        analysis.push(Explanation::new(
            "Unverified Sender Identity",
            "No official sender identity is provided.",
        ));
    }

    let overall_risk = RiskTier::from_score(score);

    if analysis.is_empty() {
        analysis.push(Explanation::new(
            "No Strong Scam Indicators",
            "The message does not show clear scam patterns.",
        ));
    }

    tracing::debug!(
        target: "analysis",
        score,
        risk = %overall_risk,
        domain = domain.as_deref().unwrap_or("-"),
        "message scored"
    );

    Verdict {
        overall_risk,
        confidence_score: score,
        analysis,
        recommendation: if overall_risk == RiskTier::Low {
            RECOMMEND_NONE
        } else {
            RECOMMEND_VERIFY
        }
        .to_string(),
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
