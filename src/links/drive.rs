//! Google Drive 文件 ID 提取
//!
//! 接受三种输入：分享链接（`/file/d/<id>/view`）、带查询参数的 open 链接
//! （`open?id=<id>`、`?resourcekey=<id>`）以及裸 ID。

use std::sync::LazyLock;

use regex::Regex;

use super::ResolvedLinks;

/// 按优先级排列的匹配规则
static DRIVE_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("valid /d/ pattern"),
        Regex::new(r"id=([a-zA-Z0-9_-]+)").expect("valid id= pattern"),
        Regex::new(r"[?&]resourcekey=([a-zA-Z0-9_-]+)").expect("valid resourcekey= pattern"),
    ]
});

/// 裸 ID 至少 20 个字符
static BARE_DRIVE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{20,}$").expect("valid bare id pattern"));

/// 从任意文本中提取 Drive 文件 ID
///
/// 输入先 trim，然后依次尝试 `/d/<id>`、`id=<id>`、`[?&]resourcekey=<id>`，
/// 都不匹配时仅当整个输入是长度 ≥ 20 的 `[a-zA-Z0-9_-]` 串才原样接受。
/// 无法识别时返回 `None`。
pub fn extract_drive_id(input: &str) -> Option<String> {
    let value = input.trim();

    for pattern in DRIVE_ID_PATTERNS.iter() {
        if let Some(id) = pattern.captures(value).and_then(|caps| caps.get(1)) {
            return Some(id.as_str().to_string());
        }
    }

    if BARE_DRIVE_ID.is_match(value) {
        return Some(value.to_string());
    }

    None
}

pub fn drive_view_url(id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", id)
}

pub fn drive_download_url(id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={}", id)
}

/// Drive 自带的嵌入预览页，任何文件类型都可用
pub fn drive_preview_url(id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/preview", id)
}

/// 由已规范化的 Drive ID 生成三种链接
pub fn drive_links(id: &str) -> ResolvedLinks {
    ResolvedLinks {
        page_url: drive_view_url(id),
        download_url: drive_download_url(id),
        preview_url: drive_preview_url(id),
    }
}
