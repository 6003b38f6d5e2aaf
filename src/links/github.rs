//! GitHub 文件链接解析
//!
//! 识别三种 URL 形态并还原为 `(owner, repo, branch, path)`：
//! - `https://github.com/<owner>/<repo>/blob/<branch>/<path>`
//! - `https://raw.githubusercontent.com/<owner>/<repo>/<branch>/<path>`
//! - `https://github.com/<owner>/<repo>/raw/<branch>/<path>`
//!
//! 页面链接与下载链接始终重新拼接，等价输入得到相同结果。

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ResolvedLinks;

const GITHUB_PREFIX: &str = "https://github.com";
const GITHUB_RAW_PREFIX: &str = "https://raw.githubusercontent.com";

/// 浏览器或嵌入框可以直接渲染的扩展名
pub const DIRECT_PREVIEW_EXTENSIONS: &[&str] =
    &["pdf", "png", "jpg", "jpeg", "gif", "svg", "mp4", "webm"];

/// 其他格式交给 Google Docs Viewer
const DOCS_VIEWER_PREFIX: &str = "https://docs.google.com/gview?embedded=1&url=";

/// `urlencoding` 会转义、但 URI 组件编码保留原样的字符
const URI_COMPONENT_UNRESERVED: &[(&str, &str)] = &[
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

static GITHUB_BLOB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https://github\.com/([^/\s]+)/([^/\s]+)/blob/([^/\s]+)/(.+)$")
        .expect("valid blob pattern")
});

static GITHUB_RAW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https://raw\.githubusercontent\.com/([^/\s]+)/([^/\s]+)/([^/\s]+)/(.+)$")
        .expect("valid raw pattern")
});

static GITHUB_OBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https://github\.com/([^/\s]+)/([^/\s]+)/raw/([^/\s]+)/(.+)$")
        .expect("valid raw object pattern")
});

/// 已识别的 GitHub 文件引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubFileRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl GithubFileRef {
    fn new(owner: &str, repo: &str, branch: &str, path: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            path: sanitize_path(path).to_string(),
        }
    }

    /// `blob` 形式的页面链接
    pub fn html_url(&self) -> String {
        format!(
            "{}/{}/{}/blob/{}/{}",
            GITHUB_PREFIX, self.owner, self.repo, self.branch, self.path
        )
    }

    /// `raw.githubusercontent.com` 形式的下载链接
    pub fn raw_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            GITHUB_RAW_PREFIX, self.owner, self.repo, self.branch, self.path
        )
    }

    /// 小写扩展名，没有 `.` 时为空串
    pub fn extension(&self) -> String {
        file_extension(&self.path)
    }

    pub fn is_direct_preview(&self) -> bool {
        DIRECT_PREVIEW_EXTENSIONS.contains(&self.extension().as_str())
    }

    pub fn preview_url(&self) -> String {
        let raw_url = self.raw_url();
        if self.is_direct_preview() {
            raw_url
        } else {
            format!("{}{}", DOCS_VIEWER_PREFIX, encode_uri_component(&raw_url))
        }
    }

    pub fn links(&self) -> ResolvedLinks {
        ResolvedLinks {
            page_url: self.html_url(),
            download_url: self.raw_url(),
            preview_url: self.preview_url(),
        }
    }
}

fn sanitize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

fn file_extension(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// 百分号编码，`! ' ( ) *` 保持原样
fn encode_uri_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, literal) in URI_COMPONENT_UNRESERVED {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, literal);
        }
    }
    encoded
}

/// 前缀区分大小写，`(?i)` 只作用于之后的路径匹配
fn has_github_prefix(value: &str) -> bool {
    value.starts_with(GITHUB_PREFIX) || value.starts_with(GITHUB_RAW_PREFIX)
}

/// 解析 GitHub 文件 URL
///
/// 非 GitHub 前缀或三种形态都不匹配时返回 `None`。
pub fn parse_github_file_url(input: &str) -> Option<GithubFileRef> {
    let value = input.trim();

    if !has_github_prefix(value) {
        return None;
    }

    [&*GITHUB_BLOB_REGEX, &*GITHUB_RAW_REGEX, &*GITHUB_OBJECT_REGEX]
        .into_iter()
        .find_map(|pattern| pattern.captures(value))
        .map(|caps| GithubFileRef::new(&caps[1], &caps[2], &caps[3], &caps[4]))
}

/// 解析并生成页面、下载、预览三种链接
pub fn resolve_github_links(input: &str) -> Option<ResolvedLinks> {
    parse_github_file_url(input).map(|file| file.links())
}

pub fn build_github_download_url(input: &str) -> Option<String> {
    parse_github_file_url(input).map(|file| file.raw_url())
}

pub fn build_github_preview_url(input: &str) -> Option<String> {
    parse_github_file_url(input).map(|file| file.preview_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blob_url() {
        let file = parse_github_file_url("https://github.com/o/r/blob/main/docs/report.pdf")
            .expect("blob url should parse");
        assert_eq!(file.owner, "o");
        assert_eq!(file.repo, "r");
        assert_eq!(file.branch, "main");
        assert_eq!(file.path, "docs/report.pdf");
    }

    #[test]
    fn test_parse_raw_object_url() {
        let file = parse_github_file_url("https://github.com/o/r/raw/dev/a/b.sql")
            .expect("raw object url should parse");
        assert_eq!(file.branch, "dev");
        assert_eq!(file.path, "a/b.sql");
        assert_eq!(file.html_url(), "https://github.com/o/r/blob/dev/a/b.sql");
    }

    #[test]
    fn test_leading_slash_stripped() {
        let file = parse_github_file_url("https://github.com/o/r/blob/main//notes.md")
            .expect("should parse");
        assert_eq!(file.path, "notes.md");
        assert_eq!(file.raw_url(), "https://raw.githubusercontent.com/o/r/main/notes.md");
    }

    #[test]
    fn test_host_prefix_is_case_sensitive() {
        assert_eq!(parse_github_file_url("HTTPS://GitHub.com/o/r/BLOB/main/x.pdf"), None);
        assert_eq!(parse_github_file_url("https://GitHub.com/o/r/blob/main/x.pdf"), None);
        assert_eq!(
            parse_github_file_url("HTTPS://RAW.GITHUBUSERCONTENT.COM/o/r/main/x.pdf"),
            None
        );
    }

    #[test]
    fn test_segment_keywords_case_insensitive() {
        let file = parse_github_file_url("https://github.com/o/r/BLOB/main/x.pdf")
            .expect("should parse");
        assert_eq!(file.html_url(), "https://github.com/o/r/blob/main/x.pdf");

        let file = parse_github_file_url("https://github.com/o/r/RAW/main/x.pdf")
            .expect("should parse");
        assert_eq!(file.raw_url(), "https://raw.githubusercontent.com/o/r/main/x.pdf");
    }

    #[test]
    fn test_rejects_other_hosts() {
        assert_eq!(parse_github_file_url("https://example.com/x"), None);
        assert_eq!(parse_github_file_url("http://github.com/o/r/blob/main/a.pdf"), None);
        assert_eq!(parse_github_file_url(""), None);
    }

    #[test]
    fn test_rejects_repo_root() {
        assert_eq!(parse_github_file_url("https://github.com/o/r"), None);
        assert_eq!(parse_github_file_url("https://github.com/o/r/tree/main/docs"), None);
    }

    #[test]
    fn test_extension() {
        let file = parse_github_file_url("https://github.com/o/r/blob/main/Makefile").unwrap();
        assert_eq!(file.extension(), "");
        let file = parse_github_file_url("https://github.com/o/r/blob/main/a.PNG").unwrap();
        assert_eq!(file.extension(), "png");
        assert!(file.is_direct_preview());
    }

    #[test]
    fn test_preview_wraps_non_direct_formats() {
        let preview =
            build_github_preview_url("https://github.com/o/r/blob/main/notes.docx").unwrap();
        assert_eq!(
            preview,
            "https://docs.google.com/gview?embedded=1&url=https%3A%2F%2Fraw.githubusercontent.com%2Fo%2Fr%2Fmain%2Fnotes.docx"
        );
    }

    #[test]
    fn test_preview_keeps_uri_component_marks() {
        let preview =
            build_github_preview_url("https://github.com/o/r/blob/main/notes (1).docx").unwrap();
        assert_eq!(
            preview,
            "https://docs.google.com/gview?embedded=1&url=https%3A%2F%2Fraw.githubusercontent.com%2Fo%2Fr%2Fmain%2Fnotes%20(1).docx"
        );

        assert_eq!(
            encode_uri_component("a!b'c*d~e_f.g-h"),
            "a!b'c*d~e_f.g-h"
        );
        assert_eq!(encode_uri_component("100%28"), "100%2528");
    }

    #[test]
    fn test_download_url_helper() {
        assert_eq!(
            build_github_download_url("https://github.com/o/r/blob/main/a.sql").as_deref(),
            Some("https://raw.githubusercontent.com/o/r/main/a.sql")
        );
        assert_eq!(build_github_download_url("not a url"), None);
    }
}
