use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// 測定確定に必要なフレーム数（ウィンドウ容量）
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
    /// デフォルトのガーメントカテゴリ
    #[serde(default = "default_garment")]
    pub garment: String,
    /// ONNXモデルのパス
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// サイズチャートTOMLのパス（未設定なら組み込みチャート）
    #[serde(default)]
    pub chart_path: Option<String>,
    /// 被写体存在スコアの閾値
    #[serde(default = "default_presence_threshold")]
    pub presence_threshold: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラインデックス
    #[serde(default)]
    pub index: i32,
    /// キャプチャ幅
    #[serde(default = "default_camera_width")]
    pub width: u32,
    /// キャプチャ高さ
    #[serde(default = "default_camera_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// スキャンサーバのアドレス
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_max_frames() -> usize { 30 }
fn default_garment() -> String { "tshirt".to_string() }
fn default_model_path() -> String { "models/pose_landmarker_lite.onnx".to_string() }
fn default_presence_threshold() -> f32 { 0.5 }
fn default_camera_width() -> u32 { 640 }
fn default_camera_height() -> u32 { 480 }
fn default_server_addr() -> String { "127.0.0.1:39610".to_string() }

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_frames: default_max_frames(),
            garment: default_garment(),
            model_path: default_model_path(),
            chart_path: None,
            presence_threshold: default_presence_threshold(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: default_camera_width(),
            height: default_camera_height(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 読み込み失敗時はデフォルト設定を使う
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.max_frames, 30);
        assert_eq!(config.scan.garment, "tshirt");
        assert!(config.scan.chart_path.is_none());
        assert_eq!(config.camera.index, 0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scan]
            max_frames = 45
            garment = "jacket"
        "#,
        )
        .unwrap();
        assert_eq!(config.scan.max_frames, 45);
        assert_eq!(config.scan.garment, "jacket");
        assert_eq!(config.scan.presence_threshold, 0.5);
        assert_eq!(config.camera.width, 640);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default("no_such_config.toml");
        assert_eq!(config.scan.max_frames, 30);
    }
}
