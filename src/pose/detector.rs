use anyhow::{Context, Result};
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::landmark::{Landmark, LandmarkIndex, LandmarkSet};

/// ランドマーカーの入力サイズ
pub const LANDMARKER_INPUT_SIZE: i32 = 256;

/// 被写体存在スコアのデフォルト閾値
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.5;

/// MediaPipe Pose Landmarker を使用した姿勢検出器
///
/// グローバル状態を持たない。呼び出し側が構築して所有し、
/// 検出が必要な場所へ渡す。
pub struct PoseDetector {
    session: Session,
    presence_threshold: f32,
}

impl PoseDetector {
    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        Self::with_presence_threshold(model_path, DEFAULT_PRESENCE_THRESHOLD)
    }

    /// 存在スコア閾値を指定して初期化
    pub fn with_presence_threshold<P: AsRef<Path>>(
        model_path: P,
        presence_threshold: f32,
    ) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path.as_ref())
            .context("Failed to load ONNX model")?;

        Ok(Self {
            session,
            presence_threshold,
        })
    }

    /// 前処理済みテンソルから被写体のランドマークを検出
    ///
    /// 入力: [1, 256, 256, 3] の f32 テンソル (0.0-1.0)
    /// 出力: 被写体が検出されなければ None
    ///
    /// 出力テンソルは [1, 195] (33ランドマーク x 5: x, y, z, visibility,
    /// presence、座標は入力ピクセル単位)と、[1, 1] の存在スコア。
    pub fn detect(&mut self, input: Array4<f32>) -> Result<Option<LandmarkSet>> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["input_1" => input_tensor])
            .context("Inference failed")?;

        let score: ndarray::ArrayViewD<f32> = outputs["Identity_1"]
            .try_extract_array()
            .context("Failed to extract presence score")?;
        if score[[0, 0]] < self.presence_threshold {
            return Ok(None);
        }

        let raw: ndarray::ArrayViewD<f32> = outputs["Identity"]
            .try_extract_array()
            .context("Failed to extract landmark tensor")?;

        let scale = LANDMARKER_INPUT_SIZE as f32;
        let mut landmarks = [Landmark::default(); LandmarkIndex::COUNT];
        for i in 0..LandmarkIndex::COUNT {
            let x = raw[[0, i * 5]] / scale;
            let y = raw[[0, i * 5 + 1]] / scale;
            // visibilityはロジット出力
            let visibility = sigmoid(raw[[0, i * 5 + 3]]);
            landmarks[i] = Landmark::new(x, y, visibility);
        }

        Ok(Some(LandmarkSet::new(landmarks)))
    }
}

fn sigmoid(v: f32) -> f32 {
    1.0 / (1.0 + (-v).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sigmoid_saturates() {
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }
}
