use crate::analysis::{ArmType, BodyType};

/// 肩まわりのきつさ警告
pub const SHOULDER_TIGHT_WARNING: &str =
    "Shoulder area may feel tight. Consider relaxed or stretch fabric.";

/// 袖が短く感じる警告
pub const SLEEVE_SHORT_WARNING: &str =
    "Sleeves may feel short. Consider sizing up or long-sleeve variants.";

/// 袖が長く見える警告
pub const SLEEVE_LONG_WARNING: &str = "Sleeves may appear longer than usual.";

/// ジャケット丈の警告
pub const JACKET_HIP_WARNING: &str = "Jacket length may feel short around the hips.";

/// フィット警告を生成
///
/// 各チェックは独立で、該当するものがすべて追加される。
/// 出力順は固定: 肩 → 袖 → 丈。
pub fn fit_warnings(body_type: BodyType, garment: &str, arm_type: ArmType) -> Vec<String> {
    let mut warnings = Vec::new();

    // 肩まわり
    if body_type == BodyType::BroadShoulders && matches!(garment, "tshirt" | "jacket") {
        warnings.push(SHOULDER_TIGHT_WARNING.to_string());
    }

    // 袖
    if arm_type == ArmType::LongArms {
        warnings.push(SLEEVE_SHORT_WARNING.to_string());
    }
    if arm_type == ArmType::ShortArms {
        warnings.push(SLEEVE_LONG_WARNING.to_string());
    }

    // 丈
    if garment == "jacket" && body_type == BodyType::PearShape {
        warnings.push(JACKET_HIP_WARNING.to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broad_shoulders_tshirt_warns() {
        let w = fit_warnings(BodyType::BroadShoulders, "tshirt", ArmType::AverageArms);
        assert_eq!(w, vec![SHOULDER_TIGHT_WARNING.to_string()]);
    }

    #[test]
    fn test_broad_shoulders_hoodie_does_not_warn() {
        // オーバーサイズのフーディーは肩警告の対象外
        let w = fit_warnings(
            BodyType::BroadShoulders,
            "oversized hoodie",
            ArmType::AverageArms,
        );
        assert!(w.is_empty());
    }

    #[test]
    fn test_long_arms_warn() {
        let w = fit_warnings(BodyType::Balanced, "tshirt", ArmType::LongArms);
        assert_eq!(w, vec![SLEEVE_SHORT_WARNING.to_string()]);
    }

    #[test]
    fn test_short_arms_warn() {
        let w = fit_warnings(BodyType::Balanced, "tshirt", ArmType::ShortArms);
        assert_eq!(w, vec![SLEEVE_LONG_WARNING.to_string()]);
    }

    #[test]
    fn test_jacket_pear_shape_warns() {
        let w = fit_warnings(BodyType::PearShape, "jacket", ArmType::AverageArms);
        assert_eq!(w, vec![JACKET_HIP_WARNING.to_string()]);
    }

    #[test]
    fn test_warnings_accumulate_in_fixed_order() {
        let w = fit_warnings(BodyType::BroadShoulders, "jacket", ArmType::LongArms);
        assert_eq!(
            w,
            vec![
                SHOULDER_TIGHT_WARNING.to_string(),
                SLEEVE_SHORT_WARNING.to_string(),
            ]
        );
    }

    #[test]
    fn test_no_warnings_for_balanced_average() {
        let w = fit_warnings(BodyType::Balanced, "tshirt", ArmType::AverageArms);
        assert!(w.is_empty());
    }

    #[test]
    fn test_unknown_labels_produce_no_warnings() {
        let w = fit_warnings(BodyType::Unknown, "tshirt", ArmType::Unknown);
        assert!(w.is_empty());
    }
}
