use serde::{Deserialize, Serialize};

use crate::pose::{LandmarkIndex, LandmarkSet};

/// 計測に必要なランドマークの最低可視性
pub const MIN_VISIBILITY: f32 = 0.2;

/// 比率の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    ShoulderToTorso,
    HipToTorso,
    ArmToTorso,
}

impl RatioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShoulderToTorso => "shoulder_to_torso",
            Self::HipToTorso => "hip_to_torso",
            Self::ArmToTorso => "arm_to_torso",
        }
    }
}

/// 1フレーム分の無次元体型比率
///
/// 各比率は胴体長（左肩→左腰の距離）で正規化されるため、
/// カメラからの距離に依存しない。小数第3位に丸める。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyRatios {
    pub shoulder_to_torso: f32,
    pub hip_to_torso: f32,
    pub arm_to_torso: f32,
}

impl BodyRatios {
    pub fn new(shoulder_to_torso: f32, hip_to_torso: f32, arm_to_torso: f32) -> Self {
        Self {
            shoulder_to_torso,
            hip_to_torso,
            arm_to_torso,
        }
    }

    pub fn get(&self, kind: RatioKind) -> f32 {
        match kind {
            RatioKind::ShoulderToTorso => self.shoulder_to_torso,
            RatioKind::HipToTorso => self.hip_to_torso,
            RatioKind::ArmToTorso => self.arm_to_torso,
        }
    }
}

/// 小数第3位に丸める
pub fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

/// ランドマークから体型比率を計算
///
/// 必要ランドマーク: 両肩・両肘・両手首・両腰。
/// いずれかが低可視性、または胴体長が0の場合は None（測定不能は
/// 正常な空結果であってエラーではない）。
pub fn body_ratios(set: &LandmarkSet) -> Option<BodyRatios> {
    use LandmarkIndex::*;

    let required = [
        LeftShoulder,
        RightShoulder,
        LeftElbow,
        RightElbow,
        LeftWrist,
        RightWrist,
        LeftHip,
        RightHip,
    ];
    if required
        .iter()
        .any(|&idx| !set.get(idx).is_valid(MIN_VISIBILITY))
    {
        return None;
    }

    let left_shoulder = set.get(LeftShoulder);
    let right_shoulder = set.get(RightShoulder);
    let left_hip = set.get(LeftHip);
    let right_hip = set.get(RightHip);

    let shoulder_width = left_shoulder.distance(right_shoulder);
    let hip_width = left_hip.distance(right_hip);
    let torso_height = left_shoulder.distance(left_hip);

    if torso_height == 0.0 {
        return None;
    }

    let left_arm = left_shoulder.distance(set.get(LeftElbow))
        + set.get(LeftElbow).distance(set.get(LeftWrist));
    let right_arm = right_shoulder.distance(set.get(RightElbow))
        + set.get(RightElbow).distance(set.get(RightWrist));
    let avg_arm_length = (left_arm + right_arm) / 2.0;

    Some(BodyRatios {
        shoulder_to_torso: round3(shoulder_width / torso_height),
        hip_to_torso: round3(hip_width / torso_height),
        arm_to_torso: round3(avg_arm_length / torso_height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;

    /// 両肩・両肘・両手首・両腰を指定したLandmarkSetを生成
    fn make_upper_body(
        left_shoulder: (f32, f32),
        right_shoulder: (f32, f32),
        left_elbow: (f32, f32),
        right_elbow: (f32, f32),
        left_wrist: (f32, f32),
        right_wrist: (f32, f32),
        left_hip: (f32, f32),
        right_hip: (f32, f32),
    ) -> LandmarkSet {
        let mut set = LandmarkSet::default();
        let points = [
            (LandmarkIndex::LeftShoulder, left_shoulder),
            (LandmarkIndex::RightShoulder, right_shoulder),
            (LandmarkIndex::LeftElbow, left_elbow),
            (LandmarkIndex::RightElbow, right_elbow),
            (LandmarkIndex::LeftWrist, left_wrist),
            (LandmarkIndex::RightWrist, right_wrist),
            (LandmarkIndex::LeftHip, left_hip),
            (LandmarkIndex::RightHip, right_hip),
        ];
        for (idx, (x, y)) in points {
            *set.get_mut(idx) = Landmark::new(x, y, 0.9);
        }
        set
    }

    /// 肩幅0.2, 腰幅0.2, 胴体長0.4, 腕長0.4（両側）の直立ポーズ
    fn standing_set() -> LandmarkSet {
        make_upper_body(
            (0.4, 0.3),
            (0.6, 0.3),
            (0.35, 0.5),
            (0.65, 0.5),
            (0.35, 0.7),
            (0.65, 0.7),
            (0.4, 0.7),
            (0.6, 0.7),
        )
    }

    #[test]
    fn test_ratios_from_standing_pose() {
        let ratios = body_ratios(&standing_set()).unwrap();
        // 肩幅0.2 / 胴体長0.4 = 0.5, 腰幅0.2 / 0.4 = 0.5
        assert!((ratios.shoulder_to_torso - 0.5).abs() < 1e-3);
        assert!((ratios.hip_to_torso - 0.5).abs() < 1e-3);
        assert!(ratios.arm_to_torso > 0.0);
    }

    #[test]
    fn test_ratios_are_non_negative_and_rounded() {
        let ratios = body_ratios(&standing_set()).unwrap();
        for kind in [
            RatioKind::ShoulderToTorso,
            RatioKind::HipToTorso,
            RatioKind::ArmToTorso,
        ] {
            let v = ratios.get(kind);
            assert!(v >= 0.0);
            // 3桁に丸め済み: 再丸めしても値が変わらない
            assert_eq!(v, round3(v));
        }
    }

    #[test]
    fn test_zero_torso_height_gives_none() {
        // 左肩と左腰が同一点 → 胴体長0
        let set = make_upper_body(
            (0.4, 0.5),
            (0.6, 0.5),
            (0.35, 0.5),
            (0.65, 0.5),
            (0.3, 0.5),
            (0.7, 0.5),
            (0.4, 0.5),
            (0.6, 0.5),
        );
        assert!(body_ratios(&set).is_none());
    }

    #[test]
    fn test_missing_landmark_gives_none() {
        let mut set = standing_set();
        // 左手首の可視性を落とす → 測定不能
        set.get_mut(LandmarkIndex::LeftWrist).visibility = 0.0;
        assert!(body_ratios(&set).is_none());
    }

    #[test]
    fn test_empty_set_gives_none() {
        assert!(body_ratios(&LandmarkSet::default()).is_none());
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(0.9996), 1.0);
        assert_eq!(round3(1.0), 1.0);
    }

    #[test]
    fn test_ratio_kind_as_str() {
        assert_eq!(RatioKind::ShoulderToTorso.as_str(), "shoulder_to_torso");
        assert_eq!(RatioKind::HipToTorso.as_str(), "hip_to_torso");
        assert_eq!(RatioKind::ArmToTorso.as_str(), "arm_to_torso");
    }
}
