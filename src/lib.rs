//! Channelscope - dashboards for YouTube channel analytics exports
//!
//! Turns the two JSON exports produced by a channel analytics pipeline into
//! self-contained HTML dashboards: a channel analysis page and a
//! sponsor-facing media kit.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Load and validate the JSON exports | [`load`], [`model`] |
//! | Segment the narrative patterns report | [`report`] |
//! | Format metrics for display | [`format`] |
//! | Aggregate channel-level figures | [`summary`] |
//! | Render the HTML dashboards | [`render`] |
//! | Serve them over HTTP | [`serve`] |
//!
//! # Quick Start
//!
//! ```no_run
//! use channelscope::{load, render};
//!
//! let doc = load::load_analysis("youtube_analysis_ui.json").unwrap();
//! let mut out = Vec::new();
//! render::analysis::write(&mut out, &doc).unwrap();
//! ```
//!
//! The patterns segmenter is usable on its own:
//!
//! ```
//! use channelscope::report::segment;
//!
//! let entries = segment("1. **Strong Hooks**: open with a question.");
//! assert_eq!(entries[0].title, "Strong Hooks");
//! ```

pub mod config;
pub mod format;
pub mod load;
pub mod model;
pub mod render;
pub mod report;
pub mod serve;
pub mod summary;

pub use config::Config;
pub use format::{
    classify_rate, format_compact_number, format_date, format_duration, format_percent,
    RateBand, NOT_AVAILABLE,
};
pub use load::{load_analysis, load_media_kit, LoadError};
pub use model::{AnalysisDocument, MediaKitDocument, MetricValue, PatternsReport};
pub use report::{second_half, segment, NumberedEntry};
pub use summary::ChannelSummary;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify core types are re-exported from crate root
        let _ = NOT_AVAILABLE;
        let _ = segment("");
    }
}
