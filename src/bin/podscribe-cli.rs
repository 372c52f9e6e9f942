// CLI front end for the transcript pipeline: recognize one audio file via an
// external ASR command and write the plain, formatted, and timestamp
// artifacts next to it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use podscribe::Podscribe;
use podscribe::engine::CommandEngine;
use podscribe::opts::Opts;

#[derive(Parser, Debug)]
#[command(name = "podscribe")]
#[command(about = "Transcribe a podcast episode into structured documents")]
struct Args {
    /// Audio file to transcribe.
    #[arg(long = "audio")]
    audio: PathBuf,

    /// Output directory. Defaults to a location derived from the audio path.
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// External recognizer command printing result JSON on stdout.
    #[arg(long = "asr-command", default_value = "funasr-cli")]
    asr_command: String,

    /// External diarization command printing segment JSON on stdout.
    #[arg(long = "diarization-command")]
    diarization_command: Option<String>,

    /// Space-separated recognition bias words.
    #[arg(long = "hotword", default_value = "")]
    hotword: String,

    /// Seconds of audio per inference batch.
    #[arg(long = "batch-size", default_value_t = 300)]
    batch_size: u32,

    /// Disable speaker diarization.
    #[arg(long = "no-diarization", default_value_t = false)]
    no_diarization: bool,

    /// Disable paragraph segmentation of the formatted body.
    #[arg(long = "no-segmentation", default_value_t = false)]
    no_segmentation: bool,
}

fn main() -> ExitCode {
    podscribe::logging::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("[ERROR] {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("podscribe");
    println!("{}", "=".repeat(50));
    println!();

    println!("[INFO] audio file: {}", args.audio.display());
    println!("[INFO] batch size: {} seconds", args.batch_size);
    println!(
        "[INFO] speaker diarization: {}",
        on_off(!args.no_diarization)
    );
    println!(
        "[INFO] smart segmentation: {}",
        on_off(!args.no_segmentation)
    );
    if !args.hotword.is_empty() {
        println!("[INFO] hotwords: {}", args.hotword);
    }

    let opts = Opts {
        batch_size_seconds: args.batch_size,
        hotwords: args.hotword.clone(),
        enable_diarization: !args.no_diarization,
        enable_segmentation: !args.no_segmentation,
        output_dir: args.output_dir.clone(),
        ..Opts::default()
    };

    let mut engine = CommandEngine::new(args.asr_command.clone());
    if let Some(command) = &args.diarization_command {
        engine = engine.with_diarization_command(command.clone());
    }

    println!("[INFO] loading recognition model...");
    let mut pipeline = Podscribe::new(engine, opts)?;
    println!("[INFO] model loaded (device: {})", pipeline.device());
    if !pipeline.diarization_available() && !args.no_diarization {
        println!("[WARN] diarization unavailable, continuing without speaker attribution");
    }

    println!("[INFO] transcribing...");
    let outcome = pipeline.transcribe(&args.audio)?;

    println!();
    println!("{}", "=".repeat(50));
    println!("[SUCCESS] transcription complete");
    println!("{}", "=".repeat(50));
    println!("characters: {}", outcome.char_count);
    if outcome.diarized {
        println!("speakers: {}", outcome.speaker_count);
    }
    println!("transcript: {}", outcome.paths.transcript.display());
    println!("formatted:  {}", outcome.paths.formatted.display());
    if let Some(timestamps) = &outcome.paths.timestamps {
        println!("timestamps: {}", timestamps.display());
    }

    println!();
    println!("[preview] (first 500 characters)");
    println!("{}", "-".repeat(50));
    let preview: String = outcome.transcript.chars().take(500).collect();
    println!("{preview}");
    if outcome.transcript.chars().count() > 500 {
        println!("...");
    }
    println!("{}", "-".repeat(50));

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}
