//! # قالب‌های محلی
//!
//! آخرین پله‌ی زنجیره fallback: وقتی همه providerها fail بشن،
//! از این جدول ثابت یه دوبیتی ساخته میشه.
//!
//! ## ساختار
//!
//! هر مناسبت دو variant داره. کلیدواژه اول به ابتدای مصراع اول
//! میچسبه؛ کلیدواژه دوم به ابتدای مصراع دوم، و در نبودش یه مصراع
//! جایگزین کامل استفاده میشه (نه جای خالی).
//!
//! انتخاب بین دو variant تصادفیه ولی منبع تصادف تزریق میشه تا
//! زیر تست قطعی باشه.

use rand::Rng;

use crate::models::{CoupletResult, Occasion};

/// یک variant قالب برای یک مناسبت
#[derive(Debug, Clone, Copy)]
pub struct TemplateVariant {
    /// دنباله‌ی مصراع اول - بعد از کلیدواژه اول
    top_tail: &'static str,

    /// دنباله‌ی مصراع دوم - بعد از کلیدواژه دوم
    bottom_tail: &'static str,

    /// مصراع دوم کامل وقتی کلیدواژه دوم نداریم
    bottom_solo: &'static str,

    /// سردر
    center: &'static str,

    /// شرح
    explanation: &'static str,
}

impl TemplateVariant {
    /// ساخت دوبیتی با جایگذاری کلیدواژه‌ها
    #[must_use]
    pub fn render(&self, name1: &str, name2: Option<&str>) -> CoupletResult {
        let bottom = match name2.filter(|n| !n.is_empty()) {
            Some(second) => format!("{}{}", second, self.bottom_tail),
            None => self.bottom_solo.to_string(),
        };

        CoupletResult {
            top: format!("{}{}", name1, self.top_tail),
            bottom,
            center: self.center.to_string(),
            explanation: self.explanation.to_string(),
        }
    }
}

/// جمله‌ای که در صورت وجود خواسته‌های اضافی به شرح اضافه میشه
const PERSONALIZED_NOTE: &str = " 根据您的特殊要求，对联特别融入了您的个性化期望。";

// =====================================
// Template table
// =====================================
/// جدول قالب‌ها - دو variant برای هر مناسبت
#[must_use]
pub fn variants_for(occasion: Occasion) -> [TemplateVariant; 2] {
    match occasion {
        Occasion::SpringFestival => [
            TemplateVariant {
                top_tail: "灯结彩迎新岁",
                bottom_tail: "语欢歌贺吉年",
                bottom_solo: "喜气盈门贺吉年",
                center: "新春快乐",
                explanation: "上联以姓名开头，表达节日喜庆氛围；下联呼应上联，共同传递新春祝福。",
            },
            TemplateVariant {
                top_tail: "门焕彩添祥瑞",
                bottom_tail: "宅生辉纳福康",
                bottom_solo: "福宅生辉纳福康",
                center: "吉祥如意",
                explanation: "上下联对仗工整，描绘了春节期间家家户户焕然一新、迎接福气的景象。",
            },
        ],
        Occasion::Wedding => [
            TemplateVariant {
                top_tail: "府呈祥鸾凤舞",
                bottom_tail: "门集庆燕莺歌",
                bottom_solo: "喜门集庆燕莺歌",
                center: "百年好合",
                explanation: "此联以喜庆的语言祝福新人，鸾凤和燕莺象征夫妻和谐美满。",
            },
            TemplateVariant {
                top_tail: "家有喜结连理",
                bottom_tail: "宅添福成佳偶",
                bottom_solo: "福宅添福成佳偶",
                center: "永结同心",
                explanation: "对联表达了对新人喜结良缘的美好祝福，寓意婚姻长久美满。",
            },
        ],
        Occasion::Longevity => [
            TemplateVariant {
                top_tail: "松永翠春常在",
                bottom_tail: "鹤长鸣福无疆",
                bottom_solo: "福鹤长鸣福无疆",
                center: "寿比南山",
                explanation: "对联以松柏和仙鹤为喻，祝福寿星健康长寿，福气绵绵。",
            },
            TemplateVariant {
                top_tail: "岁高龄添百福",
                bottom_tail: "年益寿纳千祥",
                bottom_solo: "寿年益寿纳千祥",
                center: "福禄寿喜",
                explanation: "上下联对仗工整，表达了对寿星健康长寿、多福多寿的美好祝愿。",
            },
        ],
        Occasion::Housewarming => [
            TemplateVariant {
                top_tail: "居焕彩财源广",
                bottom_tail: "宅生辉福运长",
                bottom_solo: "福宅生辉福运长",
                center: "乔迁之喜",
                explanation: "对联祝贺乔迁新居，同时祝福新居带来财运和好运。",
            },
            TemplateVariant {
                top_tail: "门旭日临吉宅",
                bottom_tail: "院春风入华堂",
                bottom_solo: "福院春风入华堂",
                center: "吉祥如意",
                explanation: "此联描绘了新居在阳光和春风中的生机景象，寓意吉祥如意。",
            },
        ],
        Occasion::Opening => [
            TemplateVariant {
                top_tail: "开伟业财源广",
                bottom_tail: "启宏图生意隆",
                bottom_solo: "喜启宏图生意隆",
                center: "开业大吉",
                explanation: "对联祝贺开业之喜，同时祝愿生意兴隆，财源广进。",
            },
            TemplateVariant {
                top_tail: "门旭日财源广",
                bottom_tail: "店春风顾客多",
                bottom_solo: "福店春风顾客多",
                center: "财源广进",
                explanation: "此联以旭日和春风为喻，祝愿店铺生意红火，顾客盈门。",
            },
        ],
        Occasion::Humorous => [
            TemplateVariant {
                top_tail: "氏有才长得帅",
                bottom_tail: "家多金还可爱",
                bottom_solo: "全家多金还可爱",
                center: "人生赢家",
                explanation: "幽默风趣的对联，调侃中带有赞美，增添欢乐气氛。",
            },
            TemplateVariant {
                top_tail: "吃海喝不长胖",
                bottom_tail: "玩大闹没烦恼",
                bottom_solo: "玩闹没烦恼",
                center: "快乐至上",
                explanation: "轻松幽默的对联，表达了一种洒脱、快乐的生活态度。",
            },
        ],
    }
}

// =====================================
// Template Library
// =====================================
/// نقطه ورود قالب‌ها
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateLibrary;

impl TemplateLibrary {
    /// ساخت دوبیتی از قالب
    ///
    /// # Arguments
    /// * `occasion` - مناسبت خام؛ ناشناخته → قالب عید بهار
    /// * `rng` - منبع تصادف تزریق‌شده برای انتخاب variant
    #[must_use]
    pub fn render(
        &self,
        occasion: &str,
        name1: &str,
        name2: Option<&str>,
        other_requirements: Option<&str>,
        rng: &mut impl Rng,
    ) -> CoupletResult {
        let variants = variants_for(Occasion::parse_or_default(occasion));
        let variant = variants[rng.gen_range(0..variants.len())];

        let mut couplet = variant.render(name1, name2);

        // خواسته اضافی محتوای قالب رو عوض نمیکنه، فقط در شرح تایید میشه
        if other_requirements.filter(|r| !r.is_empty()).is_some() {
            couplet.explanation.push_str(PERSONALIZED_NOTE);
        }

        couplet
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_render_with_both_names() {
        let mut rng = StdRng::seed_from_u64(0);
        let couplet =
            TemplateLibrary.render("结婚", "张", Some("王"), None, &mut rng);

        assert!(couplet.top.starts_with('张'));
        assert!(couplet.bottom.starts_with('王'));
        assert!(couplet.is_complete());
    }

    #[test]
    fn test_render_single_name_uses_solo_line() {
        let mut rng = StdRng::seed_from_u64(0);
        let couplet = TemplateLibrary.render("春节", "李", None, None, &mut rng);

        assert!(couplet.top.starts_with('李'));
        // مصراع دوم جایگزین کامله، نه خالی
        assert!(!couplet.bottom.is_empty());
        assert!(!couplet.bottom.starts_with('李'));
    }

    #[test]
    fn test_unknown_occasion_defaults_to_spring_festival() {
        let mut rng = StdRng::seed_from_u64(1);
        let couplet = TemplateLibrary.render("毕业", "赵", None, None, &mut rng);

        let expected = variants_for(Occasion::SpringFestival);
        assert!(expected
            .iter()
            .any(|v| couplet.top == format!("赵{}", v.top_tail)));
    }

    #[test]
    fn test_deterministic_with_seeded_rng() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        let a = TemplateLibrary.render("开业", "钱", Some("孙"), None, &mut rng1);
        let b = TemplateLibrary.render("开业", "钱", Some("孙"), None, &mut rng2);

        assert_eq!(a, b);
    }

    #[test]
    fn test_extra_requirements_extend_explanation() {
        let mut rng = StdRng::seed_from_u64(0);
        let plain = TemplateLibrary.render("祝寿", "周", None, None, &mut rng);

        let mut rng = StdRng::seed_from_u64(0);
        let noted =
            TemplateLibrary.render("祝寿", "周", None, Some("多提福字"), &mut rng);

        assert!(noted.explanation.starts_with(&plain.explanation));
        assert!(noted.explanation.len() > plain.explanation.len());
    }

    #[test]
    fn test_every_occasion_has_two_complete_variants() {
        for occasion in Occasion::all() {
            for variant in variants_for(occasion) {
                let couplet = variant.render("测", Some("试"));
                assert!(couplet.is_complete(), "incomplete variant for {:?}", occasion);
            }
        }
    }
}
