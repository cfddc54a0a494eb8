use std::process::Stdio;

use async_trait::async_trait;
use tokio::{io::AsyncWriteExt, process::Command, time::timeout};

use crate::config::OcrConfig;

use super::{OcrError, TextExtractor};

/// Runs the Tesseract CLI, piping the image through stdin and reading text from stdout.
#[derive(Debug, Clone)]
pub struct TesseractExtractor {
    config: OcrConfig,
}

impl TesseractExtractor {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    async fn run(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.config.tesseract_cmd)
            .args(["stdin", "stdout", "-l", self.config.languages.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| OcrError::Spawn {
                cmd: self.config.tesseract_cmd.clone(),
                source,
            })?;

        // stdout and stderr are drained while stdin is still being fed
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(image).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let output = output?;
        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        fed?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError> {
        if image.is_empty() {
            return Err(OcrError::EmptyImage);
        }

        tracing::debug!(target: "ocr", bytes = image.len(), "running tesseract");
        timeout(self.config.timeout, self.run(image))
            .await
            .map_err(|_| OcrError::Timeout(self.config.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn extractor(cmd: &str) -> TesseractExtractor {
        TesseractExtractor::new(OcrConfig {
            tesseract_cmd: cmd.to_string(),
            languages: "eng".to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn empty_image_is_rejected_without_spawning() {
        let err = extractor("/nonexistent/tesseract")
            .extract_text(&[])
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::EmptyImage));
    }

    #[tokio::test]
    async fn missing_binary_reports_spawn_error() {
        let err = extractor("/nonexistent/tesseract")
            .extract_text(b"\x89PNG")
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/tesseract"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn chatty_engine_does_not_stall_on_large_image() {
        use std::{fs, os::unix::fs::PermissionsExt};

        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("fake-tesseract");
        fs::write(
            &script,
            "#!/bin/sh\nhead -c 200000 /dev/zero | tr '\\0' w >&2\ncat\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let image = "a".repeat(300_000);
        let text = extractor(script.to_str().unwrap())
            .extract_text(image.as_bytes())
            .await
            .unwrap();
        assert_eq!(text.len(), 300_000);
    }
}
