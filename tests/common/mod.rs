#![allow(dead_code)]

use carbonlens::api::{self, ClimatiqClient};
use httpmock::MockServer;

pub const TEST_KEY: &str = "test-key";

/// Nothing listens on the discard port, so every request fails to connect.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/estimate";

pub fn client_for(server: &MockServer) -> ClimatiqClient {
    api::set_silent(true);
    ClimatiqClient::new(reqwest::Client::new(), &server.url("/estimate"), TEST_KEY)
}

pub fn unreachable_client() -> ClimatiqClient {
    api::set_silent(true);
    ClimatiqClient::new(reqwest::Client::new(), UNREACHABLE_URL, TEST_KEY)
}
