//! 资源定位符
//!
//! 每个部署只使用一种资源来源（Drive 或 GitHub），由 `portal.locator_kind`
//! 决定。用户输入按该来源解析，只持久化规范形式。

pub mod drive;
pub mod github;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use drive::extract_drive_id;
pub use github::{
    GithubFileRef, build_github_download_url, build_github_preview_url, parse_github_file_url,
    resolve_github_links,
};

/// 页面、下载、预览三种链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLinks {
    pub page_url: String,
    pub download_url: String,
    pub preview_url: String,
}

/// 部署级别的资源来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LocatorKind {
    Drive,
    Github,
}

/// 已解析的资源定位符
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocator {
    DriveId(String),
    GithubRef(GithubFileRef),
}

impl ResourceLocator {
    /// 按指定来源解析用户输入，无法识别时返回 `None`
    pub fn parse(kind: LocatorKind, input: &str) -> Option<Self> {
        match kind {
            LocatorKind::Drive => extract_drive_id(input).map(Self::DriveId),
            LocatorKind::Github => parse_github_file_url(input).map(Self::GithubRef),
        }
    }

    /// 从数据库中读出的值重新解析
    ///
    /// 规范形式本身就是合法输入，所以与 `parse` 等价。
    pub fn from_stored(kind: LocatorKind, stored: &str) -> Option<Self> {
        Self::parse(kind, stored)
    }

    pub fn kind(&self) -> LocatorKind {
        match self {
            Self::DriveId(_) => LocatorKind::Drive,
            Self::GithubRef(_) => LocatorKind::Github,
        }
    }

    /// 持久化用的规范字符串：Drive 为 ID，GitHub 为 blob URL
    pub fn canonical(&self) -> String {
        match self {
            Self::DriveId(id) => id.clone(),
            Self::GithubRef(file) => file.html_url(),
        }
    }

    pub fn links(&self) -> ResolvedLinks {
        match self {
            Self::DriveId(id) => drive::drive_links(id),
            Self::GithubRef(file) => file.links(),
        }
    }
}
