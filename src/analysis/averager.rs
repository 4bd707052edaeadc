use std::collections::VecDeque;

use super::ratios::{round3, BodyRatios};

/// デフォルトのウィンドウ容量（フレーム数）
pub const DEFAULT_MAX_FRAMES: usize = 30;

/// 固定容量FIFOウィンドウによるフレーム平均化
///
/// フレームごとの検出ジッタを、容量いっぱいまで蓄積したサンプルの
/// 平均で1つの安定した測定値に変換する。容量を超えると最古の
/// サンプルが押し出される。
pub struct FrameAverager {
    max_frames: usize,
    buffer: VecDeque<BodyRatios>,
}

impl FrameAverager {
    pub fn new(max_frames: usize) -> Self {
        Self {
            max_frames,
            buffer: VecDeque::with_capacity(max_frames),
        }
    }

    /// サンプルを追加。None は無視される（進捗に数えない）
    pub fn add(&mut self, ratios: Option<BodyRatios>) {
        if let Some(ratios) = ratios {
            if self.buffer.len() == self.max_frames {
                self.buffer.pop_front();
            }
            self.buffer.push_back(ratios);
        }
    }

    /// ウィンドウが容量に達したか
    pub fn is_ready(&self) -> bool {
        self.buffer.len() >= self.max_frames
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_frames
    }

    /// 蓄積サンプルの比率ごとの算術平均（小数第3位丸め）
    /// 空の場合は None
    pub fn average(&self) -> Option<BodyRatios> {
        if self.buffer.is_empty() {
            return None;
        }

        let n = self.buffer.len() as f32;
        let mut shoulder = 0.0;
        let mut hip = 0.0;
        let mut arm = 0.0;
        for ratios in &self.buffer {
            shoulder += ratios.shoulder_to_torso;
            hip += ratios.hip_to_torso;
            arm += ratios.arm_to_torso;
        }

        Some(BodyRatios {
            shoulder_to_torso: round3(shoulder / n),
            hip_to_torso: round3(hip / n),
            arm_to_torso: round3(arm / n),
        })
    }

    /// 全サンプルを破棄して新しいスキャンを開始できる状態に戻す
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

impl Default for FrameAverager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAMES)
    }
}
