//! `Content-Disposition` filename extraction.

/// Name used when the response does not carry one.
pub const FALLBACK_FILENAME: &str = "downloaded_file";

/// File name from a `Content-Disposition` header value.
///
/// Takes the text after `filename=`, drops double quotes and anything after
/// a following `;`. Missing header, missing parameter, or an empty value
/// yields [`FALLBACK_FILENAME`].
pub fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split("filename=").nth(1))
        .map(|rest| rest.split(';').next().unwrap_or_default().replace('"', ""))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}
