use std::sync::Arc;

use crate::{
    analysis::{analyze_message_text, extract_urls},
    domain::{Explanation, ImageVerdict, RiskTier, Verdict},
    ocr::TextExtractor,
};

const MAX_LOGGED_URLS: usize = 16;

/// Stateless front door for both analysis operations.
#[derive(Clone)]
pub struct ScamAnalyzer {
    extractor: Arc<dyn TextExtractor>,
}

impl ScamAnalyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    pub fn analyze_text(&self, message: &str) -> Verdict {
        let links = extract_urls(message, MAX_LOGGED_URLS);
        tracing::debug!(
            target: "analysis",
            chars = message.chars().count(),
            links = links.len(),
            "analyzing text"
        );
        for link in &links {
            tracing::trace!(target: "analysis", %link, "link found");
        }
        analyze_message_text(message)
    }

    /// OCR failures are treated like an image without text.
    pub async fn analyze_image(&self, image: &[u8]) -> ImageVerdict {
        let extracted_text = match self.extractor.extract_text(image).await {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                tracing::warn!(target: "ocr", error = %err, "text extraction failed");
                String::new()
            }
        };

        if extracted_text.is_empty() {
            return unreadable_image_verdict();
        }

        let verdict = self.analyze_text(&extracted_text);
        ImageVerdict {
            extracted_text,
            verdict,
        }
    }
}

fn unreadable_image_verdict() -> ImageVerdict {
    ImageVerdict {
        extracted_text: String::new(),
        verdict: Verdict {
            overall_risk: RiskTier::Low,
            confidence_score: 0,
            analysis: vec![Explanation::new(
                "No readable text detected",
                "The uploaded image does not contain readable text.",
            )],
            recommendation: "Ensure the image is clear and readable.".to_string(),
        },
    }
}
