use anyhow::Result;
use opencv::core::{Mat, Vector};
use opencv::imgcodecs;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::net::TcpStream;

use fitscan::camera::OpenCvCamera;
use fitscan::config::Config;
use fitscan::protocol::{message_stream, recv_message, send_message, ClientMessage, ServerMessage};

const CONFIG_PATH: &str = "config.toml";
const JPEG_QUALITY: i32 = 80;
const FRAME_INTERVAL_MS: u64 = 33;

/// スキャンクライアント
///
/// カメラフレームをJPEGでサーバへ送り、確定した結果を表示して終了。
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("fitscan - Scan Client ({})", env!("GIT_VERSION"));
    println!("[config] server={}, garment={}", config.server.addr, config.scan.garment);

    let mut camera = OpenCvCamera::open_with_resolution(
        config.camera.index,
        Some(config.camera.width),
        Some(config.camera.height),
    )?;
    let (width, height) = camera.resolution();
    println!("[client] camera: {}x{}", width, height);

    let stream = TcpStream::connect(&config.server.addr).await?;
    let mut stream = message_stream(stream);
    println!("[client] connected");

    send_message(
        &mut stream,
        &ClientMessage::SetGarment {
            garment: config.scan.garment.clone(),
        },
    )
    .await?;
    let _: ServerMessage = recv_message(&mut stream).await?;

    let mut last_progress = 0usize;
    loop {
        let loop_start = Instant::now();

        let frame = camera.read_frame()?;
        let jpeg_data = jpeg_encode(&frame, JPEG_QUALITY)?;
        let timestamp_us = SystemTime::now()
            .duration_since(UNIX_EPOCH)?
            .as_micros() as u64;

        send_message(
            &mut stream,
            &ClientMessage::Frame {
                timestamp_us,
                jpeg_data,
            },
        )
        .await?;

        match recv_message::<ServerMessage>(&mut stream).await? {
            ServerMessage::Progress { frames, capacity } => {
                if frames != last_progress {
                    println!("[client] scanning... {}/{}", frames, capacity);
                    last_progress = frames;
                }
            }
            ServerMessage::NoSubject => {
                println!("[client] no subject detected");
            }
            ServerMessage::Locked { result } => {
                println!("[client] SCAN COMPLETE");
                println!("[client] body type: {}", result.body_type.as_str());
                println!("[client] arm type: {}", result.arm_type.as_str());
                println!(
                    "[client] recommended size: {}",
                    result.recommend_size.as_str()
                );
                for w in &result.warnings {
                    println!("[client] warning: {}", w);
                }
                match &result.comparison {
                    Some(cmp) => {
                        println!(
                            "[client] shoulder_to_torso: {:+.3} [{}]",
                            cmp.shoulder_to_torso.difference,
                            cmp.shoulder_to_torso.status.as_str()
                        );
                        println!(
                            "[client] arm_to_torso: {:+.3} [{}]",
                            cmp.arm_to_torso.difference,
                            cmp.arm_to_torso.status.as_str()
                        );
                    }
                    None => println!("[client] no chart entry for this garment/size"),
                }
                break;
            }
            ServerMessage::Ack => {}
        }

        // フレームレート上限
        let elapsed = loop_start.elapsed();
        if elapsed < Duration::from_millis(FRAME_INTERVAL_MS) {
            tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS) - elapsed).await;
        }
    }

    Ok(())
}

fn jpeg_encode(frame: &Mat, quality: i32) -> Result<Vec<u8>> {
    let params = Vector::from_iter([imgcodecs::IMWRITE_JPEG_QUALITY, quality]);
    let mut buf: Vector<u8> = Vector::new();
    imgcodecs::imencode(".jpg", frame, &mut buf, &params)?;
    Ok(buf.to_vec())
}
