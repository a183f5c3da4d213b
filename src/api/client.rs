use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::EstimationError;
use crate::utils::mask_token;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

fn log_request(url: &str, api_key: &str, body: &Value) {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new("POST").fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

    if !api_key.is_empty() {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new(format!("'Authorization: Bearer {}'", mask_token(api_key))).fg(yansi::Color::Magenta)
        ));
    }
    parts.push(format!("{} {}",
        Paint::new("-H").fg(yansi::Color::Magenta),
        Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
    ));

    let json_str = serde_json::to_string(body).unwrap_or_default();
    let escaped_json = json_str.replace('\'', "'\\''");
    parts.push(format!("{} {}",
        Paint::new("-d").fg(yansi::Color::Blue),
        Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
    ));
    log_output(format!("Request:\n{}", parts.join(" ")));
}

/// POST a JSON body with a bearer token and decode the JSON answer.
///
/// Transport failures, non-2xx statuses and non-JSON bodies are all reported
/// as [`EstimationError`]; nothing is retried.
pub async fn post_json(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    body: &Value,
) -> Result<Value, EstimationError> {
    log_request(url, api_key, body);

    let mut req = client.post(url).json(body);
    if !api_key.is_empty() {
        req = req.bearer_auth(api_key);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| EstimationError::Network(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| EstimationError::Network(e.to_string()))?;

    // Grayed out so the request line stays the focus
    log_output(format!("Response ({}):\n{}", status.as_u16(), Paint::new(&text).rgb(100, 100, 100)));

    if !status.is_success() {
        return Err(EstimationError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| EstimationError::Decode(e.to_string()))
}
