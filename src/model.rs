//! Document models for the two JSON exports
//!
//! Upstream exporters are best-effort: any leaf field may be missing, and
//! numeric fields sometimes arrive as formatted strings ("3.2%", "1543").
//! Every field here is therefore either defaulted or optional, and metric
//! leaves use [`MetricValue`] to accept both shapes. Deserialization of a
//! structurally valid JSON document never fails on absent fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::format::parse_leading_number;

/// A metric leaf that may arrive as a bare JSON number or a formatted
/// string. Display keeps the upstream formatting; numeric access parses
/// the leading number out of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric view: strings parse their leading number ("3.2%" -> 3.2).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) if n.is_finite() => Some(*n),
            MetricValue::Number(_) => None,
            MetricValue::Text(s) => parse_leading_number(s),
        }
    }

    /// Integer view for count-like fields.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64)
    }

    /// Display string preserving upstream formatting; whole numbers drop
    /// the fractional part.
    pub fn display(&self) -> String {
        match self {
            MetricValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                format!("{}", *n as i64)
            }
            MetricValue::Number(n) => n.to_string(),
            MetricValue::Text(s) => s.clone(),
        }
    }
}

// --- Analysis document ---

/// Top-level shape of the channel analysis export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDocument {
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub channel_subscribers: Option<MetricValue>,
    #[serde(default)]
    pub top_videos: Vec<TopVideo>,
    #[serde(default)]
    pub video_analyses: BTreeMap<String, VideoAnalysis>,
    #[serde(default)]
    pub patterns_report: PatternsReport,
}

impl AnalysisDocument {
    /// Analysis for one video id, if the exporter produced one.
    pub fn analysis_for(&self, video_id: &str) -> Option<&VideoAnalysis> {
        self.video_analyses.get(video_id)
    }
}

/// One row of the ranked top-video list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopVideo {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub views: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoAnalysis {
    #[serde(default)]
    pub structured_analysis: StructuredAnalysis,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    #[serde(default)]
    pub metrics: VideoMetrics,
    #[serde(default)]
    pub title_analysis: AnalysisText,
    #[serde(default)]
    pub thumbnail_analysis: AnalysisText,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Per-video metrics. All optional: absence renders as "N/A" downstream,
/// never as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetrics {
    #[serde(default)]
    pub views: Option<MetricValue>,
    #[serde(default)]
    pub likes: Option<MetricValue>,
    #[serde(default)]
    pub comments: Option<MetricValue>,
    #[serde(default)]
    pub engagement_rate: Option<MetricValue>,
    #[serde(default)]
    pub retention_rate: Option<MetricValue>,
    #[serde(default)]
    pub avg_view_duration: Option<MetricValue>,
}

/// Narrative analysis block: the full text plus labeled highlight
/// sections extracted upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisText {
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
}

/// The patterns report: free-form narrative text keyed by section label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternsReport {
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
}

impl PatternsReport {
    pub const COMMON_PATTERNS: &'static str = "common patterns and success factors";
    pub const RECOMMENDATIONS: &'static str = "actionable recommendations";

    /// Section text for a label, if present.
    pub fn section(&self, label: &str) -> Option<&str> {
        self.sections.get(label).map(String::as_str)
    }
}

// --- Media kit document ---

/// Top-level shape of the media-kit export. Upstream keys are camelCase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaKitDocument {
    #[serde(default)]
    pub channel_info: ChannelInfo,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub top_content: TopContent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub video_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// Best available image URL, preferring higher resolutions.
    pub fn best_url(&self) -> Option<&str> {
        self.maxres
            .as_ref()
            .or(self.high.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

/// Audience demographics: age/gender percentage matrix, country shares,
/// device shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    /// gender -> { "age13-17": pct, ... }
    #[serde(default)]
    pub age_gender: BTreeMap<String, BTreeMap<String, f64>>,
    /// country code -> audience percentage
    #[serde(default)]
    pub countries: BTreeMap<String, f64>,
    /// device kind -> share
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceShare>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceShare {
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub views: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default)]
    pub averages: Averages,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    #[serde(default)]
    pub average_view_percentage: Option<f64>,
    #[serde(default)]
    pub daily_views: Option<u64>,
    #[serde(default)]
    pub views_per_video: Option<u64>,
    #[serde(default)]
    pub engagement_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopContent {
    #[serde(default)]
    pub top_videos: Vec<KitVideo>,
}

/// One card in the media kit's top-content section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitVideo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comment_count: Option<u64>,
}
