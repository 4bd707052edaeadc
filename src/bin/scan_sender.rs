use anyhow::Result;

use fitscan::analysis::ratios::MIN_VISIBILITY;
use fitscan::camera::OpenCvCamera;
use fitscan::clothing::SizeChart;
use fitscan::config::Config;
use fitscan::pose::{preprocess_for_landmarker, PoseDetector};
use fitscan::render::{Key, MinifbRenderer};
use fitscan::scan::{ScanResult, ScanSession, ScanState};

const CONFIG_PATH: &str = "config.toml";

/// ローカルスキャンループ
///
/// カメラ → 検出 → スキャンセッション → オーバーレイ表示。
/// 確定後は [R] で再スキャン、[Esc] で終了。
fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    let chart = match &config.scan.chart_path {
        Some(path) => SizeChart::load_or_default(path),
        None => SizeChart::default(),
    };

    println!("fitscan - Scan Sender ({})", env!("GIT_VERSION"));
    println!("Garment: {}", config.scan.garment);
    println!("Window: {} frames", config.scan.max_frames);
    println!();
    println!("操作: [R] 再スキャン  [Esc] 終了");
    println!();

    let mut camera = OpenCvCamera::open_with_resolution(
        config.camera.index,
        Some(config.camera.width),
        Some(config.camera.height),
    )?;
    let (width, height) = camera.resolution();
    println!("Camera: {}x{}", width, height);

    let mut detector = PoseDetector::with_presence_threshold(
        &config.scan.model_path,
        config.scan.presence_threshold,
    )?;
    println!("Model loaded");

    let mut renderer = MinifbRenderer::new("fitscan", width as usize, height as usize)?;
    let mut session = ScanSession::new(chart, config.scan.garment.clone(), config.scan.max_frames);
    let mut reported = false;

    while renderer.is_open() {
        let frame = camera.read_frame()?;
        let input = preprocess_for_landmarker(&frame)?;
        let detected = detector.detect(input)?;

        if renderer.is_key_pressed(Key::R) {
            session.reset();
            reported = false;
            println!("[scan] restarted");
        }

        session.feed(detected.as_ref());

        renderer.draw_frame(&frame)?;
        if let Some(ref set) = detected {
            renderer.draw_landmarks(set, MIN_VISIBILITY);
        }
        let (frames, capacity) = session.progress();
        renderer.draw_progress(frames, capacity, session.state() == ScanState::Locked);
        renderer.update()?;

        if !reported {
            if let Some(result) = session.result() {
                print_result(result);
                reported = true;
            }
        }
    }

    println!("Shutting down...");
    Ok(())
}

fn print_result(result: &ScanResult) {
    println!("[scan] SCAN COMPLETE");
    println!("[scan] body type: {}", result.body_type.as_str());
    println!("[scan] arm type: {}", result.arm_type.as_str());
    println!("[scan] recommended size: {}", result.recommend_size.as_str());
    for w in &result.warnings {
        println!("[scan] warning: {}", w);
    }
    match &result.comparison {
        Some(cmp) => {
            println!(
                "[scan] shoulder_to_torso: {:+.3} [{}]",
                cmp.shoulder_to_torso.difference,
                cmp.shoulder_to_torso.status.as_str()
            );
            println!(
                "[scan] arm_to_torso: {:+.3} [{}]",
                cmp.arm_to_torso.difference,
                cmp.arm_to_torso.status.as_str()
            );
        }
        None => println!("[scan] no chart entry for this garment/size"),
    }
}
