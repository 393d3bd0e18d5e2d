//! # Parse کردن جواب مدل‌ها
//!
//! مدل‌ها همیشه JSON تمیز برنمیگردونن. مسیر parse:
//! 1. پاک کردن code fence و نقل‌قول دور متن
//! 2. parse به عنوان JSON
//! 3. در صورت شکست، استخراج خط‌های برچسب‌دار (上联:، 下联:، ...)
//!
//! اگه هر دو مرحله fail بشن، جواب provider غیرقابل استفاده‌ست و
//! زنجیره fallback سراغ provider بعدی میره.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::models::CoupletResult;

/// شرح پیش‌فرض وقتی مدل explanation نفرستاده
const DEFAULT_EXPLANATION: &str = "此对联对仗工整，寓意深远。";

/// سردر پیش‌فرض وقتی استخراج برچسبی 横批 پیدا نکرده
const DEFAULT_CENTER: &str = "吉祥如意";

// =====================================
// Labeled-line extractors
// =====================================
static TOP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"上联[:：]\s*["']?([^"'\n]+)["']?"#).expect("Invalid regex pattern")
});

static BOTTOM_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"下联[:：]\s*["']?([^"'\n]+)["']?"#).expect("Invalid regex pattern")
});

static CENTER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"横批[:：]\s*["']?([^"'\n]+)["']?"#).expect("Invalid regex pattern")
});

static EXPLANATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"寓意[:：]?\s*["']?([^"'\n]+)["']?"#).expect("Invalid regex pattern")
});

// =====================================
// JSON shape
// =====================================
/// شکل JSON مورد انتظار - explanation ممکنه نباشه
#[derive(Debug, Deserialize)]
struct RawCouplet {
    top: String,
    bottom: String,
    center: String,

    #[serde(default)]
    explanation: Option<String>,
}

// =====================================
// Public API
// =====================================
/// پاک کردن محتوای خام: code fence و نقل‌قول دور متن
#[must_use]
pub fn clean_content(raw: &str) -> String {
    let mut content = raw.trim();

    // حذف ```json ... ``` یا ``` ... ```
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }

    let mut content = content.trim();

    // حذف نقل‌قول دور کل متن
    if content.len() >= 2 && content.starts_with('"') && content.ends_with('"') {
        content = &content[1..content.len() - 1];
    }

    content.trim().to_string()
}

/// تبدیل جواب provider به دوبیتی - None یعنی جواب غیرقابل استفاده
#[must_use]
pub fn parse_couplet(raw: &str) -> Option<CoupletResult> {
    let content = clean_content(raw);

    if let Some(couplet) = parse_json(&content) {
        return Some(couplet);
    }

    extract_labeled(&content)
}

/// تلاش برای parse مستقیم JSON
fn parse_json(content: &str) -> Option<CoupletResult> {
    let raw: RawCouplet = serde_json::from_str(content).ok()?;

    // سه فیلد اصلی باید پر باشن
    if raw.top.is_empty() || raw.bottom.is_empty() || raw.center.is_empty() {
        return None;
    }

    Some(CoupletResult {
        top: raw.top,
        bottom: raw.bottom,
        center: raw.center,
        explanation: raw
            .explanation
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
    })
}

/// استخراج خط‌های برچسب‌دار از متن آزاد
///
/// 上联 و 下联 اجباری‌ان؛ 横批 و 寓意 در نبودشون مقدار پیش‌فرض میگیرن
fn extract_labeled(text: &str) -> Option<CoupletResult> {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let top = capture(&TOP_LINE)?;
    let bottom = capture(&BOTTOM_LINE)?;

    Some(CoupletResult {
        top,
        bottom,
        center: capture(&CENTER_LINE).unwrap_or_else(|| DEFAULT_CENTER.to_string()),
        explanation: capture(&EXPLANATION_LINE)
            .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
    })
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let raw = r#"{"top": "张灯结彩迎新岁", "bottom": "喜气盈门贺吉年", "center": "新春快乐", "explanation": "节日祝福"}"#;
        let couplet = parse_couplet(raw).unwrap();

        assert_eq!(couplet.top, "张灯结彩迎新岁");
        assert_eq!(couplet.explanation, "节日祝福");
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"top\": \"上\", \"bottom\": \"下\", \"center\": \"横\", \"explanation\": \"解\"}\n```";
        let couplet = parse_couplet(raw).unwrap();
        assert_eq!(couplet.center, "横");
    }

    #[test]
    fn test_parse_quoted_json() {
        let raw = "\"{\\\"top\\\": \\\"上\\\", \\\"bottom\\\": \\\"下\\\", \\\"center\\\": \\\"横\\\"}\"";
        // نقل‌قول بیرونی حذف میشه ولی JSON داخلی escape شده‌ست -
        // این حالت به استخراج برچسبی میرسه و اونم fail میشه
        assert!(parse_couplet(raw).is_none());
    }

    #[test]
    fn test_json_missing_explanation_gets_default() {
        let raw = r#"{"top": "上", "bottom": "下", "center": "横"}"#;
        let couplet = parse_couplet(raw).unwrap();
        assert_eq!(couplet.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn test_json_with_empty_field_falls_through() {
        let raw = r#"{"top": "", "bottom": "下", "center": "横"}"#;
        assert!(parse_couplet(raw).is_none());
    }

    #[test]
    fn test_extract_labeled_lines() {
        let raw = "好的，为您创作：\n上联：张灯结彩迎新岁\n下联：喜气盈门贺吉年\n横批：新春快乐\n寓意：表达节日喜庆氛围";
        let couplet = parse_couplet(raw).unwrap();

        assert_eq!(couplet.top, "张灯结彩迎新岁");
        assert_eq!(couplet.bottom, "喜气盈门贺吉年");
        assert_eq!(couplet.center, "新春快乐");
        assert_eq!(couplet.explanation, "表达节日喜庆氛围");
    }

    #[test]
    fn test_extract_requires_top_and_bottom() {
        let raw = "上联：只有上联\n横批：不够";
        assert!(parse_couplet(raw).is_none());
    }

    #[test]
    fn test_extract_defaults_center() {
        let raw = "上联：上\n下联：下";
        let couplet = parse_couplet(raw).unwrap();
        assert_eq!(couplet.center, DEFAULT_CENTER);
        assert_eq!(couplet.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_couplet("抱歉，我无法完成这个请求。").is_none());
        assert!(parse_couplet("").is_none());
    }

    #[test]
    fn test_clean_content() {
        assert_eq!(clean_content("```json\n{}\n```"), "{}");
        assert_eq!(clean_content("```\nabc\n```"), "abc");
        assert_eq!(clean_content("\"abc\""), "abc");
        assert_eq!(clean_content("  plain  "), "plain");
    }
}
