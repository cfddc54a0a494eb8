use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ImageVerdict, Verdict};

use super::{error::ApiError, AppState};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}

/// `GET /`
pub async fn home() -> &'static str {
    "Sentinel backend running"
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let uptime = Utc::now().signed_duration_since(state.started_at);
    Json(HealthReport {
        status: "ok",
        started_at: state.started_at,
        uptime_seconds: uptime.num_seconds().max(0),
    })
}

/// `POST /analyze`
///
/// Accepts any body. Anything that is not a JSON object with a string
/// `message` is analyzed as an empty message.
pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Json<Verdict> {
    let request: AnalyzeRequest = serde_json::from_slice(&body).unwrap_or_default();
    let message = request.message.unwrap_or_default();
    Json(state.analyzer.analyze_text(&message))
}

/// `POST /analyze-image`
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageVerdict>, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::MissingImage);
    };

    while let Some(field) = multipart.next_field().await? {
        // plain form values named `image` are not uploads
        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            continue;
        }
        let image = field.bytes().await?;
        tracing::info!(target: "http", bytes = image.len(), "image received");
        return Ok(Json(state.analyzer.analyze_image(&image).await));
    }

    Err(ApiError::MissingImage)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header, Request, StatusCode},
        response::IntoResponse,
    };

    use super::*;
    use crate::{domain::RiskTier, service::tests::FixedText, service::ScamAnalyzer};

    const BOUNDARY: &str = "sentinel-test-boundary";

    fn state(ocr_text: &'static str) -> AppState {
        AppState::new(ScamAnalyzer::new(Arc::new(FixedText::returning(ocr_text))))
    }

    async fn multipart_with(field: &str, payload: &str) -> Result<Multipart, MultipartRejection> {
        let disposition = format!("name=\"{field}\"; filename=\"shot.png\"");
        multipart_raw(&disposition, payload).await
    }

    async fn multipart_raw(
        disposition: &str,
        payload: &str,
    ) -> Result<Multipart, MultipartRejection> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; {disposition}\r\n\r\n\
             {payload}\r\n\
             --{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/analyze-image")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await
    }

    #[tokio::test]
    async fn analyze_scores_message() {
        let body = Bytes::from_static(
            br#"{"message": "Urgent! Verify your account at http://secure-login.xyz now, pay a $5 fee immediately."}"#,
        );
        let Json(verdict) = analyze(State(state("")), body).await;
        assert_eq!(verdict.confidence_score, 85);
        assert_eq!(verdict.overall_risk, RiskTier::High);
    }

    #[tokio::test]
    async fn analyze_treats_missing_message_as_empty() {
        let bodies: [&[u8]; 4] = [b"", b"not json", b"{}", br#"{"message": null}"#];
        for body in bodies {
            let Json(verdict) = analyze(State(state("")), Bytes::copy_from_slice(body)).await;
            assert_eq!(verdict.overall_risk, RiskTier::Low);
            assert_eq!(verdict.analysis[0].title, "No Domain Found");
        }
    }

    #[tokio::test]
    async fn analyze_image_scores_extracted_text() {
        let multipart = multipart_with("image", "PNGDATA").await;
        let Json(result) = analyze_image(State(state("Registration fee due today")), multipart)
            .await
            .unwrap();
        assert_eq!(result.extracted_text, "Registration fee due today");
        assert_eq!(result.verdict.confidence_score, 55);
        assert_eq!(result.verdict.overall_risk, RiskTier::MediumHigh);
    }

    #[tokio::test]
    async fn analyze_image_without_image_field_is_rejected() {
        let multipart = multipart_with("photo", "PNGDATA").await;
        let err = analyze_image(State(state("text")), multipart)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingImage));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn text_field_named_image_is_not_an_upload() {
        let multipart = multipart_raw("name=\"image\"", "hello").await;
        let err = analyze_image(State(state("text")), multipart)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingImage));
    }

    #[tokio::test]
    async fn analyze_image_without_multipart_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze-image")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let multipart = Multipart::from_request(request, &()).await;
        let err = analyze_image(State(state("text")), multipart)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No image uploaded");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(report) = health(State(state(""))).await;
        assert_eq!(report.status, "ok");
        assert!(report.uptime_seconds >= 0);
    }
}
