use super::api_client::ApiResponse;

/// Extract `fileUrl` from a successful create response and check its shape
pub fn assert_speech_created(response: &ApiResponse) -> String {
    let body = response.body.as_ref().expect("Missing JSON body");
    assert_eq!(body.get("success").and_then(|v| v.as_bool()), Some(true));

    let file_url = body
        .get("fileUrl")
        .and_then(|v| v.as_str())
        .expect("Missing fileUrl field")
        .to_string();

    let filename = file_url
        .strip_prefix("/download/")
        .unwrap_or_else(|| panic!("Unexpected fileUrl '{}'", file_url));
    let id = filename
        .strip_suffix(".mp3")
        .unwrap_or_else(|| panic!("fileUrl '{}' is not an mp3", file_url));
    assert_eq!(id.len(), 32, "Unexpected id '{}'", id);
    assert!(id.bytes().all(|b| b.is_ascii_hexdigit()));

    file_url
}

/// Filename component of a `/download/<filename>` URL
pub fn filename_of(file_url: &str) -> &str {
    file_url.trim_start_matches("/download/")
}

pub fn assert_mp3_download(response: &ApiResponse, filename: &str) {
    response
        .assert_header("content-type", "audio/mpeg")
        .assert_header(
            "content-disposition",
            &format!("attachment; filename=\"{}\"", filename),
        )
        .assert_header("content-length", &response.body_bytes.len().to_string());
    assert!(!response.body_bytes.is_empty(), "Downloaded audio is empty");
}
