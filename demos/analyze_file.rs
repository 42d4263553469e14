//! Example: Check the delay of a single hit sound
//!
//! Usage:
//!   cargo run --example analyze_file -- <file.wav>

use hitsound_analysis::analysis::delay_check::check_clip_delay;
use hitsound_analysis::features::onset::delay::estimate_onset_delay;
use hitsound_analysis::io::decoder::decode_file;
use hitsound_analysis::AnalysisConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: analyze_file <file.wav>")?;

    let config = AnalysisConfig::default();
    let clip = decode_file(&path)?;

    println!("Clip: {}", clip.name());
    println!("  Channels: {}", clip.channels());
    println!("  Samples: {} @ {} Hz", clip.len(), clip.sample_rate());
    println!("  Onset delay: {:.2} ms", estimate_onset_delay(&clip, &config));

    match check_clip_delay(&path, clip, &config) {
        Some(report) => println!("  {:?}: {}", report.severity(), report),
        None => println!("  No delay worth reporting"),
    }

    Ok(())
}
