//! Channel-level aggregation
//!
//! Derives the header summary and the video table rows from an analysis
//! document. Absent fields stay absent: a video without a parseable
//! engagement rate is excluded from the mean, not counted as zero.

use serde::Serialize;

use crate::format::{
    classify_rate, format_percent, ENGAGEMENT_THRESHOLDS, NOT_AVAILABLE, RETENTION_THRESHOLDS,
};
use crate::model::AnalysisDocument;

/// Aggregate figures for the channel header.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    pub subscribers: Option<u64>,
    /// Sum over the top-video list, not a channel lifetime total.
    pub total_views: u64,
    /// Mean over videos exposing a parseable engagement value.
    pub average_engagement: Option<f64>,
}

impl ChannelSummary {
    pub fn from_document(doc: &AnalysisDocument) -> Self {
        let subscribers = doc
            .channel_subscribers
            .as_ref()
            .and_then(|v| v.as_u64());

        let total_views = doc.top_videos.iter().filter_map(|v| v.views).sum();

        let rates: Vec<f64> = doc
            .video_analyses
            .values()
            .filter_map(|a| a.structured_analysis.metrics.engagement_rate.as_ref())
            .filter_map(|v| v.as_f64())
            .collect();
        let average_engagement = if rates.is_empty() {
            None
        } else {
            Some(rates.iter().sum::<f64>() / rates.len() as f64)
        };

        Self {
            subscribers,
            total_views,
            average_engagement,
        }
    }

    /// "3.0%" to one decimal, or the sentinel when no video qualified.
    pub fn average_engagement_display(&self) -> String {
        match self.average_engagement {
            Some(rate) => format_percent(rate),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// One row of the video table, joined from the ranked list and the
/// per-video analysis. Rates keep their upstream display string; the band
/// drives the badge class.
#[derive(Debug, Clone, Serialize)]
pub struct VideoRow {
    pub video_id: String,
    pub rank: Option<u32>,
    pub title: String,
    pub views: Option<u64>,
    pub engagement_display: String,
    pub engagement_value: f64,
    pub engagement_band: String,
    pub retention_display: String,
    pub retention_value: f64,
    pub retention_band: String,
}

/// Build table rows in ranked order. Videos without an analysis entry are
/// skipped, matching the upstream table.
pub fn video_rows(doc: &AnalysisDocument) -> Vec<VideoRow> {
    doc.top_videos
        .iter()
        .filter_map(|video| {
            let analysis = doc.analysis_for(&video.video_id)?;
            let metrics = &analysis.structured_analysis.metrics;

            let engagement_display = metrics
                .engagement_rate
                .as_ref()
                .map(|v| v.display())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let engagement_value = metrics
                .engagement_rate
                .as_ref()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);

            let retention_display = metrics
                .retention_rate
                .as_ref()
                .map(|v| v.display())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let retention_value = metrics
                .retention_rate
                .as_ref()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);

            Some(VideoRow {
                video_id: video.video_id.clone(),
                rank: video.rank,
                title: video.title.clone(),
                views: video.views,
                engagement_display,
                engagement_value,
                engagement_band: classify_rate(engagement_value, ENGAGEMENT_THRESHOLDS)
                    .as_str()
                    .to_string(),
                retention_display,
                retention_value,
                retention_band: classify_rate(retention_value, RETENTION_THRESHOLDS)
                    .as_str()
                    .to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetricValue, StructuredAnalysis, TopVideo, VideoAnalysis, VideoMetrics};

    fn doc_with_rates(rates: &[Option<&str>]) -> AnalysisDocument {
        let mut doc = AnalysisDocument::default();
        for (i, rate) in rates.iter().enumerate() {
            let id = format!("vid{}", i);
            doc.top_videos.push(TopVideo {
                video_id: id.clone(),
                rank: Some(i as u32 + 1),
                title: format!("Video {}", i),
                views: Some(1_000 * (i as u64 + 1)),
            });
            doc.video_analyses.insert(
                id,
                VideoAnalysis {
                    structured_analysis: StructuredAnalysis {
                        metrics: VideoMetrics {
                            engagement_rate: rate.map(|r| MetricValue::Text(r.to_string())),
                            ..VideoMetrics::default()
                        },
                        ..StructuredAnalysis::default()
                    },
                },
            );
        }
        doc
    }

    #[test]
    fn test_average_engagement_excludes_missing() {
        // [2.0%, 4.0%, null] -> mean of 2.0 and 4.0, not /3.
        let doc = doc_with_rates(&[Some("2.0%"), Some("4.0%"), None]);
        let summary = ChannelSummary::from_document(&doc);
        assert_eq!(summary.average_engagement, Some(3.0));
        assert_eq!(summary.average_engagement_display(), "3.0%");
    }

    #[test]
    fn test_average_engagement_all_missing_is_na() {
        let doc = doc_with_rates(&[None, None]);
        let summary = ChannelSummary::from_document(&doc);
        assert_eq!(summary.average_engagement, None);
        assert_eq!(summary.average_engagement_display(), "N/A");
    }

    #[test]
    fn test_total_views_summed_from_top_videos() {
        let doc = doc_with_rates(&[Some("2.0%"), Some("4.0%")]);
        let summary = ChannelSummary::from_document(&doc);
        assert_eq!(summary.total_views, 3_000);
    }

    #[test]
    fn test_subscribers_parsed_from_string() {
        let mut doc = doc_with_rates(&[]);
        doc.channel_subscribers = Some(MetricValue::Text("125000".to_string()));
        let summary = ChannelSummary::from_document(&doc);
        assert_eq!(summary.subscribers, Some(125_000));
    }

    #[test]
    fn test_video_rows_skip_unanalyzed() {
        let mut doc = doc_with_rates(&[Some("2.5%")]);
        doc.top_videos.push(TopVideo {
            video_id: "orphan".to_string(),
            rank: Some(2),
            title: "No analysis".to_string(),
            views: Some(5),
        });

        let rows = video_rows(&doc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].video_id, "vid0");
    }

    #[test]
    fn test_video_row_bands_and_sentinels() {
        let doc = doc_with_rates(&[Some("4.0%"), None]);
        let rows = video_rows(&doc);

        assert_eq!(rows[0].engagement_display, "4.0%");
        assert_eq!(rows[0].engagement_band, "high");

        // Missing rate shows the sentinel but classifies low for the badge.
        assert_eq!(rows[1].engagement_display, "N/A");
        assert_eq!(rows[1].engagement_value, 0.0);
        assert_eq!(rows[1].engagement_band, "low");
        assert_eq!(rows[1].retention_display, "N/A");
    }
}
