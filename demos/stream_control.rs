//! Drive the stream controller from the command line
//!
//! Run with: cargo run --example stream_control <CHANNEL> <SOURCE> [--loop]
//!
//! Examples:
//!   cargo run --example stream_control video /media/clip.mp4 --loop
//!   cargo run --example stream_control audio rtmp://localhost/live/test_key
//!
//! The binary is taken from `FFMPEG_BIN` (default `ffmpeg`). The stream runs
//! until Ctrl+C, then the controller shuts down and waits for the process.
//!
//! Set `RUST_LOG=streamctl=debug` to see the full argument list.

use streamctl::{ControllerConfig, StreamController, StreamSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("streamctl=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(channel), Some(source)) = (args.next(), args.next()) else {
        eprintln!("usage: stream_control <audio|video> <SOURCE> [--loop]");
        std::process::exit(2);
    };
    let looped = args.any(|a| a == "--loop");

    let config = ControllerConfig::from_env();
    println!("Launching {} for channel {}", config.program, channel);

    let controller = StreamController::new(config);
    controller
        .start(&channel, StreamSpec::new(source).looped(looped))
        .await?;

    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(5));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                for status in controller.list().await {
                    match status.exit {
                        None => println!(
                            "{}: pid={:?} up {:?} -> {}",
                            status.channel, status.pid, status.uptime, status.sink
                        ),
                        Some(exit) => println!("{}: stale ({})", status.channel, exit),
                    }
                }
            }
        }
    }

    println!("Shutting down");
    controller.shutdown().await;
    Ok(())
}
