use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::rules::SizeLabel;

/// 1サイズ分の基準比率
///
/// チャートには肩と腕の基準のみ登録される（腰は比較対象外）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub shoulder_to_torso: f32,
    pub arm_to_torso: f32,
}

/// ガーメントカテゴリ → サイズ → 基準比率の参照チャート
///
/// コード変更なしで差し替え可能な設定データ。TOMLファイルから
/// 読み込むか、組み込みのデフォルトを使う。登録のない
/// (カテゴリ, サイズ) の参照は None になるだけでエラーではない。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeChart {
    categories: HashMap<String, HashMap<String, SizeEntry>>,
}

impl SizeChart {
    /// (カテゴリ, サイズ) の基準比率を引く
    pub fn lookup(&self, garment: &str, size: SizeLabel) -> Option<&SizeEntry> {
        self.categories.get(garment)?.get(size.as_str())
    }

    /// TOMLファイルから読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let chart: SizeChart = toml::from_str(&content)?;
        Ok(chart)
    }

    /// 読み込み失敗時は組み込みチャートを使う
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

impl Default for SizeChart {
    fn default() -> Self {
        let mut categories = HashMap::new();

        let entry = |shoulder: f32, arm: f32| SizeEntry {
            shoulder_to_torso: shoulder,
            arm_to_torso: arm,
        };

        let mut tshirt = HashMap::new();
        tshirt.insert("M".to_string(), entry(0.85, 1.00));
        tshirt.insert("L".to_string(), entry(0.90, 1.05));
        tshirt.insert("XL".to_string(), entry(0.95, 1.10));
        categories.insert("tshirt".to_string(), tshirt);

        let mut hoodie = HashMap::new();
        hoodie.insert("L".to_string(), entry(0.95, 1.10));
        hoodie.insert("XL".to_string(), entry(1.00, 1.15));
        categories.insert("oversized hoodie".to_string(), hoodie);

        let mut jacket = HashMap::new();
        jacket.insert("L".to_string(), entry(0.90, 1.10));
        jacket.insert("XXL".to_string(), entry(1.00, 1.15));
        categories.insert("jacket".to_string(), jacket);

        Self { categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart_tshirt_xl() {
        let chart = SizeChart::default();
        let entry = chart.lookup("tshirt", SizeLabel::Xl).unwrap();
        assert_eq!(entry.shoulder_to_torso, 0.95);
        assert_eq!(entry.arm_to_torso, 1.10);
    }

    #[test]
    fn test_missing_size_is_none() {
        let chart = SizeChart::default();
        // jacket には XL のエントリがない（L と XXL のみ）
        assert!(chart.lookup("jacket", SizeLabel::Xl).is_none());
        assert!(chart.lookup("oversized hoodie", SizeLabel::M).is_none());
    }

    #[test]
    fn test_missing_category_is_none() {
        let chart = SizeChart::default();
        assert!(chart.lookup("kimono", SizeLabel::M).is_none());
    }

    #[test]
    fn test_chart_from_toml() {
        let toml_src = r#"
            [tshirt.M]
            shoulder_to_torso = 0.80
            arm_to_torso = 0.95

            ["oversized hoodie".L]
            shoulder_to_torso = 0.93
            arm_to_torso = 1.08
        "#;
        let chart: SizeChart = toml::from_str(toml_src).unwrap();
        let entry = chart.lookup("tshirt", SizeLabel::M).unwrap();
        assert_eq!(entry.shoulder_to_torso, 0.80);
        let entry = chart.lookup("oversized hoodie", SizeLabel::L).unwrap();
        assert_eq!(entry.arm_to_torso, 1.08);
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let chart = SizeChart::load_or_default("no_such_chart.toml");
        assert!(chart.lookup("tshirt", SizeLabel::M).is_some());
    }
}
