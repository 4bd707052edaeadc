use anyhow::Result;
use std::io::{self, Write};

use fitscan::analysis::BodyRatios;
use fitscan::clothing::SizeChart;
use fitscan::config::Config;
use fitscan::scan::{ScanSession, ScanState};

const CONFIG_PATH: &str = "config.toml";

/// パイプライン動作確認用のコンソールツール
///
/// カメラなしで比率サンプルを直接流し込み、分類から比較までの
/// 結果を確認できる。
fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    let chart = match &config.scan.chart_path {
        Some(path) => SizeChart::load_or_default(path),
        None => SizeChart::default(),
    };

    println!("=== fitscan - Pipeline Test ({}) ===", env!("GIT_VERSION"));
    println!("ガーメント: {}", config.scan.garment);
    println!("ウィンドウ容量: {}", config.scan.max_frames);
    println!();
    println!("コマンド:");
    println!("  g <garment>   - ガーメントを変更して再スキャン (例: g jacket)");
    println!("  r s h a       - 比率サンプルを1つ投入 (例: r 1.0 0.8 1.2)");
    println!("  f s h a       - 同じサンプルで確定まで埋める");
    println!("  n             - 被写体なしフレームを投入");
    println!("  s             - 現在の状態を表示");
    println!("  x             - リセット");
    println!("  q             - 終了");
    println!();

    let mut session = ScanSession::new(chart, config.scan.garment.clone(), config.scan.max_frames);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "g" if parts.len() >= 2 => {
                let garment = parts[1..].join(" ");
                session.set_garment(garment.clone());
                println!("ガーメント: {} (スキャンをやり直します)", garment);
            }
            "r" if parts.len() == 4 => {
                let ratios = parse_ratios(&parts)?;
                feed_and_report(&mut session, Some(ratios));
            }
            "f" if parts.len() == 4 => {
                let ratios = parse_ratios(&parts)?;
                while session.state() == ScanState::Scanning {
                    session.feed_sample(Some(ratios));
                }
                print_result(&session);
            }
            "n" => {
                feed_and_report(&mut session, None);
            }
            "s" => {
                let (frames, capacity) = session.progress();
                println!("状態: {:?}", session.state());
                println!("ガーメント: {}", session.garment());
                println!("進捗: {}/{}", frames, capacity);
                if session.result().is_some() {
                    print_result(&session);
                }
            }
            "x" => {
                session.reset();
                println!("リセットしました");
            }
            "q" => {
                println!("終了します");
                break;
            }
            _ => {
                println!("不明なコマンド: {}", parts[0]);
            }
        }
    }

    Ok(())
}

fn parse_ratios(parts: &[&str]) -> Result<BodyRatios> {
    let shoulder: f32 = parts[1].parse()?;
    let hip: f32 = parts[2].parse()?;
    let arm: f32 = parts[3].parse()?;
    Ok(BodyRatios::new(shoulder, hip, arm))
}

fn feed_and_report(session: &mut ScanSession, ratios: Option<BodyRatios>) {
    let locked = session.feed_sample(ratios).is_some();
    let (frames, capacity) = session.progress();
    println!("進捗: {}/{}", frames, capacity);
    if locked {
        print_result(session);
    }
}

fn print_result(session: &ScanSession) {
    if let Some(result) = session.result() {
        println!("--- スキャン結果 ---");
        println!("体型: {}", result.body_type.as_str());
        println!("腕長: {}", result.arm_type.as_str());
        println!("推奨サイズ: {}", result.recommend_size.as_str());
        if result.warnings.is_empty() {
            println!("警告: なし");
        } else {
            for w in &result.warnings {
                println!("警告: {}", w);
            }
        }
        match &result.comparison {
            Some(cmp) => {
                println!(
                    "肩: user={:.3} ideal={:.3} diff={:+.3} [{}]",
                    cmp.shoulder_to_torso.user,
                    cmp.shoulder_to_torso.ideal,
                    cmp.shoulder_to_torso.difference,
                    cmp.shoulder_to_torso.status.as_str()
                );
                println!(
                    "腕: user={:.3} ideal={:.3} diff={:+.3} [{}]",
                    cmp.arm_to_torso.user,
                    cmp.arm_to_torso.ideal,
                    cmp.arm_to_torso.difference,
                    cmp.arm_to_torso.status.as_str()
                );
            }
            None => println!("比較: チャートに該当エントリなし"),
        }
    }
}
