use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use mock_interview::client::console::{ChannelRecognizer, ConsoleSynthesizer, NoCamera};
use mock_interview::client::proxy::{ProxyClient, DEFAULT_PROXY_URL};
use mock_interview::client::session::{InterviewSession, VideoPanel};
use mock_interview::error::{InterviewError, Result};

#[derive(Parser, Debug)]
#[command(name = "mock-interview")]
#[command(about = "Terminal client for the mock interview proxy")]
struct Cli {
    #[arg(long, default_value = DEFAULT_PROXY_URL)]
    proxy: String,

    /// Reading speed used to pace spoken replies.
    #[arg(long, default_value_t = 180)]
    words_per_minute: u32,

    /// Run without a speech recognizer.
    #[arg(long, default_value_t = false)]
    no_voice: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    mock_interview::logging::init_tracing("mock_interview_cli");
    let cli = Cli::parse();

    let (speech_tx, speech_rx) = mpsc::channel(8);
    let mut session = InterviewSession::new(
        ProxyClient::new(cli.proxy),
        Arc::new(ConsoleSynthesizer::new(cli.words_per_minute)),
        Arc::new(NoCamera),
    );
    if !cli.no_voice {
        session = session.with_recognizer(Arc::new(ChannelRecognizer::new(speech_rx)));
    }

    println!("{}", session.history().assistant_caption());
    println!("Press Enter to begin the interview.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if lines
        .next_line()
        .await
        .map_err(|e| InterviewError::Runtime(e.to_string()))?
        .is_none()
    {
        return Ok(());
    }

    // Failures are already logged by the session.
    let _ = session.launch().await;
    print_panels(&session);

    loop {
        session.finish_speaking().await;
        println!("Speak (type your answer), /camera to toggle video, /quit to leave:");
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| InterviewError::Runtime(e.to_string()))?
        else {
            break;
        };

        match line.trim() {
            "/quit" => break,
            "/camera" => {
                session.toggle_camera().await;
                print_panels(&session);
                continue;
            }
            _ => {}
        }

        if !cli.no_voice && speech_tx.send(line).await.is_err() {
            break;
        }
        match session.capture_voice().await {
            Ok(_) => print_panels(&session),
            Err(InterviewError::Unsupported(message)) => {
                println!("[alert] {message}");
            }
            Err(_) => {}
        }
    }

    session.close();
    Ok(())
}

fn print_panels(session: &InterviewSession) {
    let video = match session.video_panel() {
        VideoPanel::Live(stream) => format!("{} ({}x{})", stream.device, stream.width, stream.height),
        VideoPanel::Placeholder => "Camera Offline".to_string(),
    };
    println!(
        "[candidate] {} | camera: {}",
        session.history().candidate_caption(),
        video
    );
}
