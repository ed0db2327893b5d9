// system-tests/tests/helpers/requests.rs
// ============================================================================
// Module: Request Helpers
// Description: Browser-like form posts and scripted JSON posts.
// Purpose: Drive both submission channels the way real clients do.
// Dependencies: reqwest, url
// ============================================================================

use contact_form_core::ContactPayload;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// Accept header sent by browsers for document navigations.
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Encodes `payload` the way a browser submits the no-script form.
pub fn form_body(payload: &ContactPayload) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("message", &payload.message);
    serializer.append_pair("email", &payload.email);
    if payload.terms {
        serializer.append_pair("terms", "on");
    }
    serializer.finish()
}

/// Posts the no-script form.
pub async fn post_form(
    client: &reqwest::Client,
    endpoint: Url,
    payload: &ContactPayload,
) -> Result<reqwest::Response, String> {
    client
        .post(endpoint)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT, BROWSER_ACCEPT)
        .body(form_body(payload))
        .send()
        .await
        .map_err(|err| err.to_string())
}

/// Fetches a page as a browser navigation.
pub async fn get_page(client: &reqwest::Client, url: Url) -> Result<(u16, String), String> {
    let response = client
        .get(url)
        .header(ACCEPT, BROWSER_ACCEPT)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(|err| err.to_string())?;
    Ok((status, body))
}
