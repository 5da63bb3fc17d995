//! Basic usage example: index a few recordings, search, and resolve seek targets.
//!
//! Run with: RUST_LOG=transcript_seek=debug cargo run --example basic_usage

use tracing_subscriber::EnvFilter;

use transcript_seek::{
    Result, SearchConfig, SeekTarget, TimedWord, Transcript, TranscriptSearch, format_play_time,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== transcript-seek Basic Usage Example ===\n");

    // ========================================
    // 1. CONFIGURE the handle
    // ========================================
    let config = SearchConfig::from_json(r#"{ "context_width": 3, "language": "english" }"#)?;
    let search = TranscriptSearch::new(config)?;

    // ========================================
    // 2. REBUILD from the current collection
    // ========================================
    let standup = Transcript::new(
        "standup-0412",
        "Morning everyone. The deploy is blocked on the audio player fix.",
        [
            ("Morning", 0),
            ("everyone.", 620),
            ("The", 1400),
            ("deploy", 1580),
            ("is", 2010),
            ("blocked", 2150),
            ("on", 2600),
            ("the", 2710),
            ("audio", 2850),
            ("player", 3240),
            ("fix.", 3700),
        ]
        .into_iter()
        .map(|(text, ms)| TimedWord::new(text, ms))
        .collect(),
    );
    let memo = Transcript::from_text_evenly_spaced(
        "memo-0413",
        "Reminder to myself: the player volume slider needs fixing before the deploy",
        410,
    );
    let outcome = search.rebuild(vec![standup, memo, Transcript::untranscribed("memo-0414")])?;
    println!("Rebuild: {outcome:?}\n");

    // ========================================
    // 3. SEARCH and seek
    // ========================================
    for phrase in ["player", "deploying fixes", "   "] {
        let response = search.search(phrase);
        println!(
            "Search {:?}: {} entries from {} transcripts (snapshot v{})",
            phrase,
            response.entries.len(),
            response.matched_transcripts,
            response.snapshot_version
        );
        for (rank, entry) in response.entries.iter().enumerate() {
            let target = SeekTarget::from_entry(entry);
            println!(
                "  {}. [{}] \"{}\" -> seek to word {} at {:.2}s ({})",
                rank + 1,
                entry.transcript_id,
                entry.excerpt,
                target.word_index,
                target.seconds(),
                format_play_time(target.offset_ms / 1000)
            );
        }
        for warning in &response.warnings {
            println!("  warning: {warning:?}");
        }
        println!();
    }

    Ok(())
}
