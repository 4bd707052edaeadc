use serde::{Deserialize, Serialize};

use super::ratios::BodyRatios;

/// 肩比率がこの値を超えると Broad Shoulders（境界値は含まない）
pub const BROAD_SHOULDER_MIN: f32 = 0.95;

/// 腰比率が肩比率をこのマージン超過で上回ると Pear Shape（境界値は含まない）
pub const PEAR_HIP_MARGIN: f32 = 0.1;

/// 腕比率がこの値を超えると Long Arms
pub const LONG_ARM_MIN: f32 = 1.15;

/// 腕比率がこの値を下回ると Short Arms
pub const SHORT_ARM_MAX: f32 = 0.95;

/// 体型ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    #[serde(rename = "Broad Shoulders")]
    BroadShoulders,
    #[serde(rename = "Pear Shape")]
    PearShape,
    Balanced,
    Unknown,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BroadShoulders => "Broad Shoulders",
            Self::PearShape => "Pear Shape",
            Self::Balanced => "Balanced",
            Self::Unknown => "Unknown",
        }
    }
}

/// 腕長ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmType {
    #[serde(rename = "Long Arms")]
    LongArms,
    #[serde(rename = "Short Arms")]
    ShortArms,
    #[serde(rename = "Average Arms")]
    AverageArms,
    Unknown,
}

impl ArmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongArms => "Long Arms",
            Self::ShortArms => "Short Arms",
            Self::AverageArms => "Average Arms",
            Self::Unknown => "Unknown",
        }
    }
}

/// 判定ルール: 述語が真なら対応するラベルを返す
struct BodyRule {
    label: BodyType,
    matches: fn(&BodyRatios) -> bool,
}

/// 体型判定テーブル（上から順に評価、最初に一致したものが勝つ）
const BODY_RULES: &[BodyRule] = &[
    BodyRule {
        label: BodyType::BroadShoulders,
        matches: |r| r.shoulder_to_torso > BROAD_SHOULDER_MIN,
    },
    BodyRule {
        label: BodyType::PearShape,
        matches: |r| r.hip_to_torso > r.shoulder_to_torso + PEAR_HIP_MARGIN,
    },
];

struct ArmRule {
    label: ArmType,
    matches: fn(&BodyRatios) -> bool,
}

/// 腕長判定テーブル
const ARM_RULES: &[ArmRule] = &[
    ArmRule {
        label: ArmType::LongArms,
        matches: |r| r.arm_to_torso > LONG_ARM_MIN,
    },
    ArmRule {
        label: ArmType::ShortArms,
        matches: |r| r.arm_to_torso < SHORT_ARM_MAX,
    },
];

/// 体型を分類。測定値がなければ Unknown
pub fn classify_body_type(ratios: Option<&BodyRatios>) -> BodyType {
    let Some(ratios) = ratios else {
        return BodyType::Unknown;
    };
    for rule in BODY_RULES {
        if (rule.matches)(ratios) {
            return rule.label;
        }
    }
    BodyType::Balanced
}

/// 腕長を分類。測定値がなければ Unknown
pub fn classify_arm_type(ratios: Option<&BodyRatios>) -> ArmType {
    let Some(ratios) = ratios else {
        return ArmType::Unknown;
    };
    for rule in ARM_RULES {
        if (rule.matches)(ratios) {
            return rule.label;
        }
    }
    ArmType::AverageArms
}
