//! 表单输入校验
//!
//! 所有函数先 trim，再检查长度，错误信息直接返回给前端显示。

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::PortalError;
use crate::links::{LocatorKind, ResourceLocator};
use crate::utils::password::check_new_password;

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_RESOURCE_NAME_LEN: usize = 3;
pub const MIN_GITHUB_LOCATOR_LEN: usize = 10;

/// 登录成功后的默认跳转
pub const DEFAULT_REDIRECT: &str = "/dashboard";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_week_title(titulo: &str) -> Result<String, PortalError> {
    let titulo = titulo.trim();
    if titulo.is_empty() {
        return Err(PortalError::validation("Title is required"));
    }
    if char_len(titulo) < MIN_TITLE_LEN {
        return Err(PortalError::validation(format!(
            "Title must be at least {} characters",
            MIN_TITLE_LEN
        )));
    }
    Ok(titulo.to_string())
}

/// 描述可选，空白视为未填写
pub fn validate_week_description(descripcion: Option<&str>) -> Result<Option<String>, PortalError> {
    match descripcion.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if char_len(text) < MIN_DESCRIPTION_LEN => Err(PortalError::validation(
            format!(
                "Description must be at least {} characters",
                MIN_DESCRIPTION_LEN
            ),
        )),
        Some(text) => Ok(Some(text.to_string())),
    }
}

pub fn validate_week_number(numero: i32) -> Result<i32, PortalError> {
    if numero < 1 {
        return Err(PortalError::validation("Week number must be a positive integer"));
    }
    Ok(numero)
}

pub fn validate_resource_name(nombre: &str) -> Result<String, PortalError> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return Err(PortalError::validation("Name is required"));
    }
    if char_len(nombre) < MIN_RESOURCE_NAME_LEN {
        return Err(PortalError::validation(format!(
            "Name must be at least {} characters",
            MIN_RESOURCE_NAME_LEN
        )));
    }
    Ok(nombre.to_string())
}

/// 按部署的资源来源解析定位符，无法解析时拒绝写入
pub fn validate_locator(kind: LocatorKind, input: &str) -> Result<ResourceLocator, PortalError> {
    let input = input.trim();

    match kind {
        LocatorKind::Github => {
            if input.is_empty() {
                return Err(PortalError::validation("GitHub link is required"));
            }
            if char_len(input) < MIN_GITHUB_LOCATOR_LEN {
                return Err(PortalError::validation(format!(
                    "GitHub link must be at least {} characters",
                    MIN_GITHUB_LOCATOR_LEN
                )));
            }
            ResourceLocator::parse(kind, input)
                .ok_or_else(|| PortalError::validation("Enter a valid GitHub file link"))
        }
        LocatorKind::Drive => {
            if input.is_empty() {
                return Err(PortalError::validation("Google Drive link or ID is required"));
            }
            ResourceLocator::parse(kind, input)
                .ok_or_else(|| PortalError::validation("Enter a valid Google Drive link or ID"))
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// 规范化邮箱（trim + 小写），格式不合法时报错
pub fn normalize_email(email: &str) -> Result<String, PortalError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(PortalError::validation("Email is required"));
    }
    if !is_valid_email(&email) {
        return Err(PortalError::validation("Enter a valid email address"));
    }
    Ok(email)
}

/// 登录表单校验，返回规范化后的邮箱
pub fn validate_login(email: &str, password: &str) -> Result<String, PortalError> {
    let email = normalize_email(email)?;
    check_new_password(password).map_err(PortalError::validation)?;
    Ok(email)
}

/// 只接受站内路径，`//host` 这种协议相对地址也会回落到默认页
pub fn sanitize_redirect(redirect_to: Option<&str>) -> String {
    match redirect_to.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_title() {
        assert_eq!(validate_week_title("  Semana 1 ").unwrap(), "Semana 1");
        assert!(validate_week_title("   ").is_err());
        assert!(validate_week_title("ab").is_err());
        assert!(validate_week_title("abc").is_ok());
    }

    #[test]
    fn test_week_description() {
        assert_eq!(validate_week_description(None).unwrap(), None);
        assert_eq!(validate_week_description(Some("   ")).unwrap(), None);
        assert!(validate_week_description(Some("corta")).is_err());
        assert_eq!(
            validate_week_description(Some(" Normalización y SQL ")).unwrap(),
            Some("Normalización y SQL".to_string())
        );
    }

    #[test]
    fn test_week_number() {
        assert!(validate_week_number(0).is_err());
        assert!(validate_week_number(-3).is_err());
        assert_eq!(validate_week_number(16).unwrap(), 16);
    }

    #[test]
    fn test_resource_name() {
        assert!(validate_resource_name("").is_err());
        assert!(validate_resource_name("ab").is_err());
        assert_eq!(validate_resource_name(" Guía 1 ").unwrap(), "Guía 1");
    }

    #[test]
    fn test_locator_github() {
        let err = validate_locator(LocatorKind::Github, "https://x").unwrap_err();
        assert!(err.message().contains("at least"));

        let err = validate_locator(LocatorKind::Github, "https://example.com/file.pdf").unwrap_err();
        assert_eq!(err.message(), "Enter a valid GitHub file link");

        let locator =
            validate_locator(LocatorKind::Github, " https://github.com/o/r/blob/main/a.sql ")
                .unwrap();
        assert_eq!(locator.canonical(), "https://github.com/o/r/blob/main/a.sql");
    }

    #[test]
    fn test_locator_drive() {
        let err = validate_locator(LocatorKind::Drive, "short").unwrap_err();
        assert_eq!(err.message(), "Enter a valid Google Drive link or ID");

        let locator = validate_locator(
            LocatorKind::Drive,
            "https://drive.google.com/open?id=1AbCdEfGhIjKlMnOpQrStUv",
        )
        .unwrap();
        assert_eq!(locator.canonical(), "1AbCdEfGhIjKlMnOpQrStUv");
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("profe@universidad.edu.pe"));
        assert!(!is_valid_email("profe@universidad"));
        assert!(!is_valid_email("no spaces@x.com"));
        assert_eq!(
            normalize_email(" Profe@Uni.EDU ").unwrap(),
            "profe@uni.edu"
        );
    }

    #[test]
    fn test_login() {
        assert!(validate_login("profe@uni.edu", "12345").is_err());
        assert!(validate_login("nope", "123456").is_err());
        assert_eq!(
            validate_login("Profe@Uni.edu", "123456").unwrap(),
            "profe@uni.edu"
        );
    }

    #[test]
    fn test_sanitize_redirect() {
        assert_eq!(sanitize_redirect(Some("/weeks/3")), "/weeks/3");
        assert_eq!(sanitize_redirect(Some("https://evil.com")), DEFAULT_REDIRECT);
        assert_eq!(sanitize_redirect(Some("//evil.com")), DEFAULT_REDIRECT);
        assert_eq!(sanitize_redirect(None), DEFAULT_REDIRECT);
    }
}
