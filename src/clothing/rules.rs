use serde::{Deserialize, Serialize};

use crate::analysis::BodyType;

/// サイズラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeLabel {
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
}

impl SizeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
        }
    }
}

/// 推奨サイズの決定ルール
///
/// body が None のエントリはそのカテゴリのワイルドカード。
struct SizeRule {
    garment: &'static str,
    body: Option<BodyType>,
    size: SizeLabel,
}

/// (ガーメントカテゴリ, 体型) → サイズの決定テーブル
/// 上から順に評価、最初に一致したものが勝つ
const SIZE_RULES: &[SizeRule] = &[
    SizeRule {
        garment: "tshirt",
        body: Some(BodyType::BroadShoulders),
        size: SizeLabel::Xl,
    },
    SizeRule {
        garment: "tshirt",
        body: Some(BodyType::PearShape),
        size: SizeLabel::L,
    },
    SizeRule {
        garment: "tshirt",
        body: None,
        size: SizeLabel::M,
    },
    SizeRule {
        garment: "oversized hoodie",
        body: Some(BodyType::BroadShoulders),
        size: SizeLabel::Xl,
    },
    SizeRule {
        garment: "oversized hoodie",
        body: None,
        size: SizeLabel::L,
    },
    SizeRule {
        garment: "jacket",
        body: Some(BodyType::BroadShoulders),
        size: SizeLabel::Xxl,
    },
    SizeRule {
        garment: "jacket",
        body: Some(BodyType::PearShape),
        size: SizeLabel::Xl,
    },
    SizeRule {
        garment: "jacket",
        body: None,
        size: SizeLabel::L,
    },
];

/// 未知カテゴリのデフォルトサイズ
const DEFAULT_SIZE: SizeLabel = SizeLabel::M;

/// 体型とガーメントカテゴリから推奨サイズを決定
///
/// 未知のカテゴリはエラーにせずデフォルト (M) に落ちる。
pub fn recommend_size(body_type: BodyType, garment: &str) -> SizeLabel {
    for rule in SIZE_RULES {
        if rule.garment == garment && rule.body.map_or(true, |b| b == body_type) {
            return rule.size;
        }
    }
    DEFAULT_SIZE
}
