//! # ساخت Prompt
//!
//! قالب prompt مشترک همه‌ی providerها
//!
//! مدل نقش استاد ادبیات سنتی میگیره و خروجی JSON سخت‌گیرانه
//! خواسته میشه؛ parser بعدا با جواب‌های نامرتب کنار میاد.

/// ساخت prompt تولید دوبیتی
///
/// # Arguments
/// * `name1` - کلیدواژه اول (ابتدای مصراع اول)
/// * `name2` - کلیدواژه دوم (اختیاری، ابتدای مصراع دوم)
/// * `occasion` - مناسبت، همونطور که کاربر فرستاده
/// * `length` - تعداد حروف هر مصراع
/// * `other_requirements` - خواسته‌های آزاد کاربر
#[must_use]
pub fn build_prompt(
    name1: &str,
    name2: Option<&str>,
    occasion: &str,
    length: u16,
    other_requirements: Option<&str>,
) -> String {
    let name2 = name2.filter(|n| !n.is_empty());

    let keywords = match name2 {
        Some(second) => format!("{}、{}", name1, second),
        None => name1.to_string(),
    };

    let second_rule = if name2.is_some() {
        "下联以第二个关键词开头"
    } else {
        ""
    };

    let mut prompt = format!(
        "角色设定：你是一位精通中国传统文化的国学大师，擅长撰写对联，讲究对仗工整、平仄合律、意境优美。\n\
         \n\
         任务：请根据用户提供的【关键词】和【场景】，创作一副{length}字对联。\n\
         \n\
         输入信息：\n\
         类型：藏头联\n\
         关键词：{keywords}\n\
         场景：{occasion}\n\
         要求：\n\
         1. 上联必须以第一个关键词开头，{second_rule}。\n\
         2. 字数要求：{length}字。\n\
         3. 请确保对联对仗工整，平仄协调。\n\
         4. 结合指定场景，让对联更贴合情境。"
    );

    if let Some(extra) = other_requirements.filter(|r| !r.is_empty()) {
        prompt.push_str(&format!("\n5. 其他要求：{}", extra));
    }

    prompt.push_str(
        "\n\n请以JSON格式输出，不要包含任何额外的解释或文字，只需要JSON对象，\
         包含 top (上联), bottom (下联), center (横批), explanation (寓意解释)。\n\
         输出示例：{\"top\": \"...\", \"bottom\": \"...\", \"center\": \"...\", \"explanation\": \"...\"}",
    );

    prompt
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_inputs() {
        let prompt = build_prompt("张", Some("王"), "结婚", 7, None);

        assert!(prompt.contains("张、王"));
        assert!(prompt.contains("场景：结婚"));
        assert!(prompt.contains("7字对联"));
        assert!(prompt.contains("下联以第二个关键词开头"));
        assert!(prompt.contains("JSON"));
    }

    #[test]
    fn test_prompt_single_keyword() {
        let prompt = build_prompt("李", None, "春节", 7, None);

        assert!(prompt.contains("关键词：李\n"));
        assert!(!prompt.contains("下联以第二个关键词开头"));
    }

    #[test]
    fn test_prompt_extra_requirements() {
        let prompt = build_prompt("李", None, "开业", 9, Some("要提到茶馆"));

        assert!(prompt.contains("9字对联"));
        assert!(prompt.contains("5. 其他要求：要提到茶馆"));
    }

    #[test]
    fn test_empty_second_name_is_ignored() {
        let prompt = build_prompt("李", Some(""), "春节", 7, None);
        assert!(!prompt.contains("下联以第二个关键词开头"));
    }
}
