use anyhow::Result;
use opencv::core::Vector;
use opencv::imgcodecs;
use tokio::net::{TcpListener, TcpStream};

use fitscan::clothing::SizeChart;
use fitscan::config::{Config, ScanConfig};
use fitscan::pose::{preprocess_for_landmarker, PoseDetector};
use fitscan::protocol::{message_stream, recv_message, send_message, ClientMessage, ServerMessage};
use fitscan::scan::ScanSession;

const CONFIG_PATH: &str = "config.toml";

/// スキャンサーバ
///
/// クライアントからJPEGフレームを受信して検出・蓄積し、
/// 確定したスキャン結果を返す。セッションは接続ごとに独立。
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    let chart = match &config.scan.chart_path {
        Some(path) => SizeChart::load_or_default(path),
        None => SizeChart::default(),
    };

    println!("fitscan - Scan Server ({})", env!("GIT_VERSION"));
    println!("[config] addr={}, window={} frames", config.server.addr, config.scan.max_frames);

    let mut detector = PoseDetector::with_presence_threshold(
        &config.scan.model_path,
        config.scan.presence_threshold,
    )?;
    println!("[server] model loaded");

    let listener = TcpListener::bind(&config.server.addr).await?;
    println!("[server] listening on {}", config.server.addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        println!("[server] client connected: {}", peer);
        // スキャンは1接続1セッションで逐次処理
        if let Err(e) = handle_client(stream, &mut detector, &chart, &config.scan).await {
            eprintln!("[server] client error: {:#}", e);
        }
        println!("[server] client disconnected: {}", peer);
    }
}

async fn handle_client(
    stream: TcpStream,
    detector: &mut PoseDetector,
    chart: &SizeChart,
    scan_config: &ScanConfig,
) -> Result<()> {
    let mut stream = message_stream(stream);
    let mut session = ScanSession::new(
        chart.clone(),
        scan_config.garment.clone(),
        scan_config.max_frames,
    );

    loop {
        let msg: ClientMessage = match recv_message(&mut stream).await {
            Ok(msg) => msg,
            Err(_) => return Ok(()), // 切断
        };

        match msg {
            ClientMessage::SetGarment { garment } => {
                println!("[server] garment: {}", garment);
                session.set_garment(garment);
                send_message(&mut stream, &ServerMessage::Ack).await?;
            }
            ClientMessage::Reset => {
                session.reset();
                send_message(&mut stream, &ServerMessage::Ack).await?;
            }
            ClientMessage::Frame { jpeg_data, .. } => {
                // ロック済みなら推論せず結果を返すだけ
                if let Some(result) = session.result() {
                    let reply = ServerMessage::Locked {
                        result: result.clone(),
                    };
                    send_message(&mut stream, &reply).await?;
                    continue;
                }

                let buf = Vector::<u8>::from_iter(jpeg_data.iter().copied());
                let frame = imgcodecs::imdecode(&buf, imgcodecs::IMREAD_COLOR)?;
                let input = preprocess_for_landmarker(&frame)?;
                let detected = detector.detect(input)?;

                let before = session.progress().0;
                let reply = match session.feed(detected.as_ref()) {
                    Some(result) => {
                        println!(
                            "[server] scan locked: {} / {}",
                            result.body_type.as_str(),
                            result.recommend_size.as_str()
                        );
                        ServerMessage::Locked {
                            result: result.clone(),
                        }
                    }
                    None => {
                        let (frames, capacity) = session.progress();
                        if frames > before {
                            ServerMessage::Progress { frames, capacity }
                        } else {
                            ServerMessage::NoSubject
                        }
                    }
                };
                send_message(&mut stream, &reply).await?;
            }
        }
    }
}
