//! Blocking `reqwest` transport for the Polarion importer

use super::{ImporterTransport, ReporterError, TransportResponse};
use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::ACCEPT;
use tracing::debug;

/// Importer transport authenticating with basic auth
///
/// Certificates are not verified and no request timeout is applied.
pub struct HttpTransport {
    client: Client,
    username: String,
    password: String,
}

impl HttpTransport {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ReporterError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| ReporterError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            username: username.into(),
            password: password.into(),
        })
    }
}

impl ImporterTransport for HttpTransport {
    fn post_file(
        &self,
        url: &str,
        filename: &str,
        content: &str,
    ) -> Result<TransportResponse, ReporterError> {
        let form = Form::new().part(
            "file",
            Part::text(content.to_string()).file_name(filename.to_string()),
        );

        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .map_err(|e| ReporterError::Transport(format!("POST {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ReporterError::Transport(format!("Failed to read response: {}", e)))?;
        debug!("HTTP Response [Code: {}]: {}", status, body);

        Ok(TransportResponse { status, body })
    }

    fn get_text(&self, url: &str) -> Result<String, ReporterError> {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .and_then(|response| response.text())
            .map_err(|e| ReporterError::Transport(format!("GET {} failed: {}", url, e)))
    }
}
