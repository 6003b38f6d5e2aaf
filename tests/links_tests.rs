//! Link utility integration tests
//!
//! Drive ID extraction and GitHub link resolution through the public API.

use course_portal::links::{
    LocatorKind, ResourceLocator, build_github_download_url, build_github_preview_url,
    extract_drive_id, resolve_github_links,
};

// =============================================================================
// Drive ID extraction
// =============================================================================

#[test]
fn test_drive_path_segment_id() {
    for url in [
        "https://drive.google.com/file/d/1AbC_dEf-123/view?usp=sharing",
        "https://drive.google.com/file/d/1AbC_dEf-123",
        "https://docs.google.com/document/d/1AbC_dEf-123/edit",
    ] {
        assert_eq!(extract_drive_id(url).as_deref(), Some("1AbC_dEf-123"), "{url}");
    }
}

#[test]
fn test_drive_query_id() {
    assert_eq!(
        extract_drive_id("https://drive.google.com/open?id=XyZ_987-abc&authuser=0").as_deref(),
        Some("XyZ_987-abc")
    );
    assert_eq!(
        extract_drive_id("https://drive.google.com/uc?export=download&id=XyZ_987").as_deref(),
        Some("XyZ_987")
    );
}

#[test]
fn test_drive_resourcekey_needs_separator() {
    assert_eq!(
        extract_drive_id("https://drive.google.com/folder?resourcekey=0-KeyValue").as_deref(),
        Some("0-KeyValue")
    );
    assert_eq!(extract_drive_id("noresourcekey=0-KeyValue"), None);
}

#[test]
fn test_drive_bare_token_length() {
    let token = "a".repeat(25);
    assert_eq!(extract_drive_id(&token), Some(token.clone()));
    assert_eq!(extract_drive_id("abcdefghij"), None);
    assert_eq!(extract_drive_id(""), None);
}

#[test]
fn test_drive_input_is_trimmed() {
    assert_eq!(
        extract_drive_id("  1AbCdEfGhIjKlMnOpQrStUvWxYz \n").as_deref(),
        Some("1AbCdEfGhIjKlMnOpQrStUvWxYz")
    );
}

// =============================================================================
// GitHub link resolution
// =============================================================================

#[test]
fn test_github_pdf_previews_directly() {
    let links = resolve_github_links("https://github.com/o/r/blob/main/docs/report.pdf").unwrap();
    assert_eq!(links.page_url, "https://github.com/o/r/blob/main/docs/report.pdf");
    assert_eq!(
        links.download_url,
        "https://raw.githubusercontent.com/o/r/main/docs/report.pdf"
    );
    assert_eq!(links.preview_url, links.download_url);
}

#[test]
fn test_github_docx_wrapped_in_gview() {
    let links = resolve_github_links("https://github.com/o/r/blob/main/notes.docx").unwrap();
    assert_eq!(links.page_url, "https://github.com/o/r/blob/main/notes.docx");
    assert_eq!(
        links.download_url,
        "https://raw.githubusercontent.com/o/r/main/notes.docx"
    );
    assert_eq!(
        links.preview_url,
        "https://docs.google.com/gview?embedded=1&url=https%3A%2F%2Fraw.githubusercontent.com%2Fo%2Fr%2Fmain%2Fnotes.docx"
    );
}

#[test]
fn test_github_raw_and_blob_canonicalize_identically() {
    let from_raw =
        resolve_github_links("https://raw.githubusercontent.com/o/r/main/img/a.png").unwrap();
    let from_blob = resolve_github_links("https://github.com/o/r/blob/main/img/a.png").unwrap();
    assert_eq!(from_raw.page_url, from_blob.page_url);
    assert_eq!(from_raw.download_url, from_blob.download_url);
    assert_eq!(from_raw, from_blob);
}

#[test]
fn test_github_raw_segment_uppercase_extension() {
    let links = resolve_github_links("https://github.com/o/r/raw/main/a.PNG").unwrap();
    assert_eq!(links.download_url, "https://raw.githubusercontent.com/o/r/main/a.PNG");
    assert_eq!(links.preview_url, links.download_url);
}

#[test]
fn test_github_host_prefix_exact_case() {
    assert_eq!(resolve_github_links("HTTPS://GITHUB.COM/o/r/blob/main/a.pdf"), None);
    assert_eq!(resolve_github_links("https://GitHub.com/o/r/blob/main/a.pdf"), None);

    let links = resolve_github_links("https://github.com/o/r/BLOB/main/a.pdf").unwrap();
    assert_eq!(links.page_url, "https://github.com/o/r/blob/main/a.pdf");
}

#[test]
fn test_github_gview_keeps_parentheses() {
    let links = resolve_github_links("https://github.com/o/r/blob/main/notes (1).docx").unwrap();
    assert!(links.preview_url.ends_with("main%2Fnotes%20(1).docx"));
}

#[test]
fn test_github_foreign_host_is_absent() {
    assert_eq!(resolve_github_links("https://example.com/x"), None);
    assert_eq!(build_github_download_url("https://example.com/x"), None);
    assert_eq!(build_github_preview_url("https://example.com/x"), None);
}

#[test]
fn test_github_wrappers_match_resolver() {
    let links = resolve_github_links("https://github.com/o/r/blob/main/notes.docx").unwrap();
    assert_eq!(
        build_github_download_url("https://github.com/o/r/blob/main/notes.docx"),
        Some(links.download_url)
    );
    assert_eq!(
        build_github_preview_url("https://github.com/o/r/blob/main/notes.docx"),
        Some(links.preview_url)
    );
}

// =============================================================================
// ResourceLocator
// =============================================================================

#[test]
fn test_locator_kind_is_authoritative() {
    let github = "https://github.com/o/r/blob/main/docs/report.pdf";
    assert!(ResourceLocator::parse(LocatorKind::Github, github).is_some());
    // GitHub URL 里没有 Drive ID 形态
    assert!(ResourceLocator::parse(LocatorKind::Drive, github).is_none());
}

#[test]
fn test_locator_canonical_roundtrip() {
    let locator = ResourceLocator::parse(
        LocatorKind::Github,
        "https://raw.githubusercontent.com/o/r/main/img/a.png",
    )
    .unwrap();
    let canonical = locator.canonical();
    assert_eq!(canonical, "https://github.com/o/r/blob/main/img/a.png");

    let stored = ResourceLocator::from_stored(LocatorKind::Github, &canonical).unwrap();
    assert_eq!(stored, locator);
    assert_eq!(stored.links(), locator.links());
}

#[test]
fn test_drive_locator_links() {
    let locator = ResourceLocator::parse(
        LocatorKind::Drive,
        "https://drive.google.com/file/d/1AbCdEfGhIjKlMnOpQrStUvWxYz/view",
    )
    .unwrap();
    assert_eq!(locator.kind(), LocatorKind::Drive);
    assert_eq!(locator.canonical(), "1AbCdEfGhIjKlMnOpQrStUvWxYz");

    let links = locator.links();
    assert!(links.page_url.contains("1AbCdEfGhIjKlMnOpQrStUvWxYz"));
    assert!(links.preview_url.ends_with("/preview"));
}
