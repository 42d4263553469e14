//! Example: Check every hit sound of a song folder in parallel
//!
//! Usage:
//!   cargo run --release --example check_folder -- [--jobs N] [--json] <folder> [event_lists.json]
//!
//! Notes:
//! - Without an event list file, every .wav in the folder is treated as a hit
//!   sound used once by a single list, which is enough for the delay check.
//! - Parallelism is across files. Each file is still analyzed single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use std::env;
use std::fs;
use std::path::Path;

use hitsound_analysis::pool::{EventList, GameMode, SongFolder, TriggerEvent};
use hitsound_analysis::{analyze_pool, AnalysisConfig, PoolAnalysis};

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

/// Load event lists from a JSON array
fn load_event_lists(path: &str) -> Result<Vec<EventList>, Box<dyn std::error::Error>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// One list referencing every .wav file in the folder
fn folder_event_list(folder: &Path) -> Result<EventList, Box<dyn std::error::Error>> {
    let mut files: Vec<String> = fs::read_dir(folder)?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.to_ascii_lowercase().ends_with(".wav"))
        .collect();
    files.sort();
    Ok(EventList::new(
        "folder",
        GameMode::Standard,
        0.0,
        vec![TriggerEvent::new(0.0, files)],
    )?)
}

fn print_text(analysis: &PoolAnalysis) {
    let total = analysis.delay_reports.len();
    for (idx, report) in analysis.delay_reports.iter().enumerate() {
        println!("[{}/{}] {:?}: {}", idx + 1, total, report.severity(), report);
    }

    for usage in analysis.usage.iter().filter(|u| u.total_uses() > 0) {
        print!("{}: {} use(s)", usage.file, usage.total_uses());
        if let Some(common) = usage.common_list() {
            print!(", commonly used in {}", common.list);
        }
        if let Some(peak) = &usage.peak {
            print!(", most frequent at {}", peak);
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut positional: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: check_folder [--jobs N] [--json] <folder> [event_lists.json]\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => positional.push(a),
        }
    }

    let Some(folder) = positional.first() else {
        eprintln!("ERROR: Provide a song folder. Use --help for usage.");
        std::process::exit(2);
    };

    let lists = match positional.get(1) {
        Some(path) => load_event_lists(path)?,
        None => vec![folder_event_list(Path::new(folder))?],
    };
    let pool = SongFolder::new(folder, lists);

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Folder: {}, jobs={}", folder, jobs);

    let rayon_pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let analysis = rayon_pool.install(|| analyze_pool(&pool, AnalysisConfig::default()))?;

    if json {
        for report in &analysis.delay_reports {
            println!("{}", serde_json::to_string(report)?);
        }
        for usage in &analysis.usage {
            println!("{}", serde_json::to_string(usage)?);
        }
    } else {
        print_text(&analysis);
    }

    eprintln!(
        "Done: {} file(s), {} report(s), {:.0}ms",
        analysis.metadata.files_checked,
        analysis.delay_reports.len(),
        analysis.metadata.processing_time_ms
    );

    Ok(())
}
