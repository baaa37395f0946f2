use pager_logging::pager_debug;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use crate::fetch::{map_reqwest_error, FetchSettings};
use crate::{EnvelopeCode, FailureKind, FetchError};

/// Admin panel actions that sit next to the listing: feedback replies and
/// the statistics workbook.
#[async_trait::async_trait]
pub trait AdminClient: Send + Sync {
    /// Text the reply to the phone number behind a feedback row.
    async fn send_feedback_answer(
        &self,
        phone: &str,
        message: &str,
    ) -> Result<EnvelopeCode, FetchError>;

    /// Record that a feedback row was answered and with what.
    async fn mark_feedback_replied(
        &self,
        feedback_id: &str,
        reply_content: &str,
    ) -> Result<EnvelopeCode, FetchError>;

    /// Ask the server to write the statistics workbook.
    async fn generate_report(&self) -> Result<EnvelopeCode, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRoutes {
    pub feedback_answer: String,
    pub report: String,
}

impl Default for AdminRoutes {
    fn default() -> Self {
        Self {
            feedback_answer: "/fbanswer".to_string(),
            report: "/totalstatics".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestAdminClient {
    base: Url,
    routes: AdminRoutes,
    settings: FetchSettings,
}

impl ReqwestAdminClient {
    pub fn new(base: &str, routes: AdminRoutes, settings: FetchSettings) -> Result<Self, FetchError> {
        let base = Url::parse(base)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self {
            base,
            routes,
            settings,
        })
    }

    async fn post_form(
        &self,
        route: &str,
        pairs: &[(&str, &str)],
    ) -> Result<EnvelopeCode, FetchError> {
        let url = self
            .base
            .join(route)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter().copied())
            .finish();
        let client = self.settings.build_client()?;

        pager_debug!("POST {} ({} form fields)", url, pairs.len());
        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        parse_envelope(&text)
    }
}

#[async_trait::async_trait]
impl AdminClient for ReqwestAdminClient {
    async fn send_feedback_answer(
        &self,
        phone: &str,
        message: &str,
    ) -> Result<EnvelopeCode, FetchError> {
        self.post_form(
            &self.routes.feedback_answer,
            &[("message", message), ("phone", phone)],
        )
        .await
    }

    async fn mark_feedback_replied(
        &self,
        feedback_id: &str,
        reply_content: &str,
    ) -> Result<EnvelopeCode, FetchError> {
        self.post_form(
            &self.routes.feedback_answer,
            &[
                ("fid", feedback_id),
                ("if_reply", "1"),
                ("reply_content", reply_content),
            ],
        )
        .await
    }

    async fn generate_report(&self) -> Result<EnvelopeCode, FetchError> {
        self.post_form(&self.routes.report, &[("download_args", "1")])
            .await
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: serde_json::Value,
}

/// Parse `{ "code": ... }`. The server sends this as text/html, so the
/// declared content type is not consulted.
pub fn parse_envelope(text: &str) -> Result<EnvelopeCode, FetchError> {
    let envelope: Envelope = serde_json::from_str(text.trim())
        .map_err(|err| FetchError::new(FailureKind::InvalidEnvelope, err.to_string()))?;
    match envelope.code {
        serde_json::Value::Number(n) => n.as_i64().map(EnvelopeCode::Number).ok_or_else(|| {
            FetchError::new(FailureKind::InvalidEnvelope, format!("non-integer code {n}"))
        }),
        serde_json::Value::String(s) => Ok(EnvelopeCode::Text(s)),
        other => Err(FetchError::new(
            FailureKind::InvalidEnvelope,
            format!("unexpected code {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_text_codes() {
        assert_eq!(parse_envelope(r#"{"code": 0}"#).unwrap(), EnvelopeCode::Number(0));
        assert_eq!(
            parse_envelope("{\"code\": \"success\"}\n").unwrap(),
            EnvelopeCode::Text("success".to_string())
        );
    }

    #[test]
    fn rejects_missing_or_odd_codes() {
        assert_eq!(
            parse_envelope("{}").unwrap_err().kind,
            FailureKind::InvalidEnvelope
        );
        assert_eq!(
            parse_envelope(r#"{"code": null}"#).unwrap_err().kind,
            FailureKind::InvalidEnvelope
        );
        assert_eq!(
            parse_envelope("<html>oops</html>").unwrap_err().kind,
            FailureKind::InvalidEnvelope
        );
    }
}
