pub mod tesseract;

use async_trait::async_trait;
use thiserror::Error;

pub use tesseract::TesseractExtractor;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image payload is empty")]
    EmptyImage,
    #[error("failed to start OCR engine `{cmd}`: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("OCR engine i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR engine did not finish within {0:?}")]
    Timeout(std::time::Duration),
    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Turns image bytes into text. Implementations trim surrounding whitespace.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError>;
}
