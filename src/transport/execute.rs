//! One physical HTTP attempt via a blocking curl Easy handle.

use std::str;
use std::time::Duration;

use url::Url;

use super::request::{Method, RequestBody, RequestSpec};
use super::response::RawResponse;

const API_KEY_HEADER_NAME: &str = "X-TYPESENSE-API-KEY";
const USER_AGENT: &str = "Typesense Rust Client";

/// Perform exactly one attempt against `url`.
///
/// Returns the raw response for anything that reached the HTTP layer,
/// non-2xx statuses included; classification is the caller's job. An
/// `Err` means no HTTP response was obtained at all (connect, DNS,
/// timeout, reset).
pub fn execute(
    url: &Url,
    spec: &RequestSpec,
    api_key: &str,
    timeout: Duration,
) -> Result<RawResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str())?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;
    easy.useragent(USER_AGENT)?;

    match spec.method {
        Method::Get => easy.get(true)?,
        Method::Post => easy.post(true)?,
        Method::Put | Method::Patch | Method::Delete => {
            easy.custom_request(spec.method.as_str())?;
        }
    }

    let mut list = curl::easy::List::new();
    list.append(&format!("{}: {}", API_KEY_HEADER_NAME, api_key))?;
    match &spec.body {
        RequestBody::None => {
            // A bodied verb with nothing to send still needs an explicit
            // zero-length body so curl does not wait on a read callback.
            if spec.method == Method::Post {
                easy.post_fields_copy(&[])?;
            }
        }
        RequestBody::Json(value) => {
            list.append("Content-Type: application/json")?;
            set_body(&mut easy, spec.method, value.to_string().into_bytes())?;
        }
        RequestBody::Raw(text) => {
            list.append("Content-Type: text/plain")?;
            set_body(&mut easy, spec.method, text.clone().into_bytes())?;
        }
    }
    for (name, value) in &spec.headers {
        list.append(&format!("{}: {}", name.trim(), value.trim()))?;
    }
    easy.http_headers(list)?;

    let mut header_lines: Vec<String> = Vec::new();
    let mut body_buf: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body_buf.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(RawResponse {
        status,
        headers: parse_header_lines(&header_lines),
        body: String::from_utf8_lossy(&body_buf).into_owned(),
    })
}

fn set_body(easy: &mut curl::easy::Easy, method: Method, bytes: Vec<u8>) -> Result<(), curl::Error> {
    // The body rides the POST machinery; custom_request (set by the
    // caller) keeps the verb on the request line for PUT/PATCH/DELETE.
    if method != Method::Post {
        easy.post(true)?;
    }
    easy.post_fields_copy(&bytes)?;
    Ok(())
}

/// Split collected header lines into (name, value) pairs, dropping the
/// status line and blank separators.
fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with("HTTP/") {
                return None;
            }
            line.split_once(':')
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
