use serde::{Deserialize, Serialize};

use super::chart::SizeChart;
use super::rules::SizeLabel;
use crate::analysis::{round3, BodyRatios};

/// フィット判定の許容帯（±、境界値は good に含む）
pub const FIT_TOLERANCE: f32 = 0.05;

/// 比率ごとのフィット判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitStatus {
    Tight,
    Loose,
    Good,
}

impl FitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Loose => "loose",
            Self::Good => "good",
        }
    }
}

/// 1比率分の比較結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioComparison {
    pub user: f32,
    pub ideal: f32,
    pub difference: f32,
    pub status: FitStatus,
}

/// 基準サイズとの比較（チャートに登録される比率キーごと）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeComparison {
    pub shoulder_to_torso: RatioComparison,
    pub arm_to_torso: RatioComparison,
}

/// 確定した体型比率を (カテゴリ, サイズ) の基準比率と比較
///
/// チャートにエントリがなければ None（比較不能は正常な結果）。
pub fn compare_size(
    ratios: &BodyRatios,
    chart: &SizeChart,
    garment: &str,
    size: SizeLabel,
) -> Option<SizeComparison> {
    let entry = chart.lookup(garment, size)?;

    Some(SizeComparison {
        shoulder_to_torso: compare_ratio(ratios.shoulder_to_torso, entry.shoulder_to_torso),
        arm_to_torso: compare_ratio(ratios.arm_to_torso, entry.arm_to_torso),
    })
}

fn compare_ratio(user: f32, ideal: f32) -> RatioComparison {
    let difference = round3(user - ideal);
    let status = if difference > FIT_TOLERANCE {
        FitStatus::Tight
    } else if difference < -FIT_TOLERANCE {
        FitStatus::Loose
    } else {
        FitStatus::Good
    };

    RatioComparison {
        user,
        ideal,
        difference,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios(shoulder: f32, arm: f32) -> BodyRatios {
        BodyRatios::new(shoulder, 0.8, arm)
    }

    #[test]
    fn test_tight_when_user_exceeds_ideal() {
        let chart = SizeChart::default();
        // tshirt M: shoulder 0.85 / arm 1.00
        let cmp = compare_size(&ratios(0.95, 1.0), &chart, "tshirt", SizeLabel::M).unwrap();
        assert_eq!(cmp.shoulder_to_torso.status, FitStatus::Tight);
        assert_eq!(cmp.shoulder_to_torso.difference, 0.1);
        assert_eq!(cmp.arm_to_torso.status, FitStatus::Good);
    }

    #[test]
    fn test_loose_when_user_below_ideal() {
        let chart = SizeChart::default();
        let cmp = compare_size(&ratios(0.7, 0.8), &chart, "tshirt", SizeLabel::M).unwrap();
        assert_eq!(cmp.shoulder_to_torso.status, FitStatus::Loose);
        assert_eq!(cmp.arm_to_torso.status, FitStatus::Loose);
    }

    #[test]
    fn test_tolerance_boundary_is_good() {
        // 1.00 vs 0.95 → 差はちょうど 0.05 → tight ではなく good
        let chart = SizeChart::default();
        let cmp = compare_size(&ratios(1.0, 1.10), &chart, "tshirt", SizeLabel::Xl).unwrap();
        assert_eq!(cmp.shoulder_to_torso.difference, 0.05);
        assert_eq!(cmp.shoulder_to_torso.status, FitStatus::Good);
    }

    #[test]
    fn test_negative_tolerance_boundary_is_good() {
        let chart = SizeChart::default();
        // 0.90 vs 0.95 → 差 -0.05 → good
        let cmp = compare_size(&ratios(0.90, 1.10), &chart, "tshirt", SizeLabel::Xl).unwrap();
        assert_eq!(cmp.shoulder_to_torso.difference, -0.05);
        assert_eq!(cmp.shoulder_to_torso.status, FitStatus::Good);
    }

    #[test]
    fn test_difference_is_rounded() {
        let chart = SizeChart::default();
        let cmp = compare_size(&ratios(0.8637, 1.0), &chart, "tshirt", SizeLabel::M).unwrap();
        assert_eq!(cmp.shoulder_to_torso.difference, 0.014);
    }

    #[test]
    fn test_missing_chart_entry_is_none() {
        let chart = SizeChart::default();
        // jacket XL はチャートに存在しない → 比較不能
        assert!(compare_size(&ratios(0.8, 1.0), &chart, "jacket", SizeLabel::Xl).is_none());
        assert!(compare_size(&ratios(0.8, 1.0), &chart, "kimono", SizeLabel::M).is_none());
    }

    #[test]
    fn test_fit_status_as_str() {
        assert_eq!(FitStatus::Tight.as_str(), "tight");
        assert_eq!(FitStatus::Loose.as_str(), "loose");
        assert_eq!(FitStatus::Good.as_str(), "good");
    }
}
