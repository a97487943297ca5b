//! Channel analysis dashboard

use std::io::{self, Write};

use serde::Serialize;

use super::{escape_html, json_for_script};
use crate::format::{format_compact_number, format_duration, NOT_AVAILABLE};
use crate::model::{AnalysisDocument, AnalysisText, MetricValue, PatternsReport};
use crate::report::{self, capitalize_first, NumberedEntry};
use crate::summary::{video_rows, ChannelSummary};

/// Everything the page script needs, fully formatted.
#[derive(Debug, Serialize)]
struct AnalysisView {
    videos: Vec<RowView>,
    tabs: Vec<TabView>,
    patterns: PatternsView,
}

#[derive(Debug, Serialize)]
struct RowView {
    video_id: String,
    rank: Option<u32>,
    title: String,
    thumb_url: String,
    watch_url: String,
    views_display: String,
    views_value: u64,
    engagement_display: String,
    engagement_value: f64,
    engagement_band: String,
    retention_display: String,
    retention_band: String,
}

#[derive(Debug, Serialize)]
struct TabView {
    video_id: String,
    title: String,
    short_title: String,
    thumb_url: String,
    watch_url: String,
    views_display: String,
    likes_display: String,
    comments_display: String,
    engagement_display: String,
    duration_display: String,
    retention_display: String,
    title_analysis: BlockView,
    thumbnail_analysis: BlockView,
}

#[derive(Debug, Serialize)]
struct BlockView {
    full_text: String,
    highlights: Vec<HighlightView>,
}

#[derive(Debug, Serialize)]
struct HighlightView {
    title: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct PatternsView {
    common: Vec<NumberedEntry>,
    success_factors: Vec<NumberedEntry>,
    recommendations: Vec<NumberedEntry>,
}

/// Tab labels get truncated to keep the strip readable.
fn short_title(title: &str) -> String {
    let mut chars = title.chars();
    let taken: String = chars.by_ref().take(25).collect();
    if chars.next().is_some() {
        format!("{}...", taken)
    } else {
        taken
    }
}

fn metric_display(value: Option<&MetricValue>) -> String {
    value
        .map(|m| m.display())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn count_display(value: Option<&MetricValue>) -> String {
    value
        .and_then(|m| m.as_u64())
        .map(format_compact_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Average view duration may arrive as an ISO-8601 duration or as an
/// already formatted clock string; render the ISO form, pass through the
/// rest.
fn duration_display(value: Option<&MetricValue>) -> String {
    let raw = metric_display(value);
    if raw == NOT_AVAILABLE {
        return raw;
    }
    let clock = format_duration(&raw);
    if clock.is_empty() {
        raw
    } else {
        clock
    }
}

/// Highlight sections keyed by emphasized labels; strip the emphasis and
/// capitalize for display.
fn highlights(block: &AnalysisText) -> Vec<HighlightView> {
    block
        .sections
        .iter()
        .map(|(label, content)| HighlightView {
            title: capitalize_first(label.replace(|c| c == '*' || c == '_', "").trim()),
            content: content.clone(),
        })
        .collect()
}

fn block_view(block: &AnalysisText) -> BlockView {
    BlockView {
        full_text: block.full_text.clone(),
        highlights: highlights(block),
    }
}

fn view_model(doc: &AnalysisDocument) -> AnalysisView {
    let videos = video_rows(doc)
        .into_iter()
        .map(|row| {
            let watch_url = doc
                .analysis_for(&row.video_id)
                .and_then(|a| a.structured_analysis.video_url.clone())
                .unwrap_or_else(|| {
                    format!("https://www.youtube.com/watch?v={}", row.video_id)
                });
            RowView {
                thumb_url: format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", row.video_id),
                watch_url,
                views_display: row
                    .views
                    .map(format_compact_number)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                views_value: row.views.unwrap_or(0),
                video_id: row.video_id,
                rank: row.rank,
                title: row.title,
                engagement_display: row.engagement_display,
                engagement_value: row.engagement_value,
                engagement_band: row.engagement_band,
                retention_display: row.retention_display,
                retention_band: row.retention_band,
            }
        })
        .collect();

    let tabs = doc
        .top_videos
        .iter()
        .filter_map(|video| {
            let analysis = &doc.analysis_for(&video.video_id)?.structured_analysis;
            let metrics = &analysis.metrics;
            Some(TabView {
                video_id: video.video_id.clone(),
                title: video.title.clone(),
                short_title: short_title(&video.title),
                thumb_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video.video_id),
                watch_url: analysis.video_url.clone().unwrap_or_else(|| {
                    format!("https://www.youtube.com/watch?v={}", video.video_id)
                }),
                views_display: video
                    .views
                    .map(format_compact_number)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                likes_display: count_display(metrics.likes.as_ref()),
                comments_display: count_display(metrics.comments.as_ref()),
                engagement_display: metric_display(metrics.engagement_rate.as_ref()),
                duration_display: duration_display(metrics.avg_view_duration.as_ref()),
                retention_display: metric_display(metrics.retention_rate.as_ref()),
                title_analysis: block_view(&analysis.title_analysis),
                thumbnail_analysis: block_view(&analysis.thumbnail_analysis),
            })
        })
        .collect();

    let report = &doc.patterns_report;
    let patterns = PatternsView {
        common: report::segment_section(report, PatternsReport::COMMON_PATTERNS),
        success_factors: report::second_half_of_section(report, PatternsReport::COMMON_PATTERNS),
        recommendations: report::segment_section(report, PatternsReport::RECOMMENDATIONS),
    };

    AnalysisView {
        videos,
        tabs,
        patterns,
    }
}

/// Write the complete analysis dashboard.
pub fn write<W: Write>(writer: &mut W, doc: &AnalysisDocument) -> io::Result<()> {
    let summary = ChannelSummary::from_document(doc);
    let view = view_model(doc);

    let name = escape_html(&doc.channel_name);
    let subscribers = summary
        .subscribers
        .map(format_compact_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    write!(
        writer,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{} - Channel Analysis</title>\n<style>",
        name
    )?;
    writer.write_all(STYLE.as_bytes())?;
    writer.write_all(b"</style>\n</head>\n<body>\n<div class=\"container\">\n")?;

    write!(
        writer,
        "<div class=\"header\">\n\
           <div>\n\
             <h1 class=\"channel-name\">{}</h1>\n\
             <div class=\"subtitle\">Channel Analysis</div>\n\
           </div>\n\
         </div>\n\
         <div class=\"stats\">\n\
           <div class=\"stat\"><div class=\"stat-value\">{}</div><div class=\"stat-label\">Subscribers</div></div>\n\
           <div class=\"stat\"><div class=\"stat-value\">{}</div><div class=\"stat-label\">Top Video Views</div></div>\n\
           <div class=\"stat\"><div class=\"stat-value\">{}</div><div class=\"stat-label\">Avg Engagement</div></div>\n\
         </div>\n",
        name,
        subscribers,
        format_compact_number(summary.total_views),
        summary.average_engagement_display(),
    )?;

    writer.write_all(BODY.as_bytes())?;

    writeln!(
        writer,
        "<script>\nconst data = {};",
        json_for_script(&view)
    )?;
    writer.write_all(SCRIPT.as_bytes())?;
    writer.write_all(b"</script>\n</body>\n</html>\n")?;
    Ok(())
}

const STYLE: &str = r##"
:root {
    --bg: #f5f5f7;
    --card: #ffffff;
    --border: #d2d2d7;
    --text: #1d1d1f;
    --dim: #86868b;
    --high: #34c759;
    --medium: #ff9f0a;
    --low: #ff3b30;
    --accent: #007aff;
    --shadow: 0 2px 8px rgba(0,0,0,0.08), 0 1px 2px rgba(0,0,0,0.04);
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Helvetica Neue', Helvetica, Arial, sans-serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.5;
}
.container { max-width: 1280px; margin: 0 auto; padding: 3rem 2rem; }
.header {
    display: flex;
    align-items: center;
    gap: 1rem;
    margin-bottom: 2rem;
    padding-bottom: 1.5rem;
    border-bottom: 1px solid var(--border);
}
.channel-name { font-size: 2rem; font-weight: 700; letter-spacing: -0.02em; }
.subtitle { color: var(--dim); font-size: 0.9375rem; }
.stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.25rem; margin-bottom: 2.5rem; }
.stat {
    background: var(--card);
    border-radius: 16px;
    padding: 1.75rem;
    text-align: center;
    box-shadow: var(--shadow);
}
.stat-value { font-size: 2.25rem; font-weight: 600; line-height: 1; }
.stat-label { color: var(--dim); font-size: 0.8125rem; font-weight: 500; text-transform: uppercase; letter-spacing: 0.04em; margin-top: 0.5rem; }
.section { margin-bottom: 2.5rem; }
.section-title { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }
.controls { display: flex; gap: 0.75rem; margin-bottom: 1rem; }
.controls input, .controls select {
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 8px;
    font-size: 0.875rem;
    background: var(--card);
}
.controls input { flex: 1; }
.table-container { background: var(--card); border-radius: 16px; overflow: hidden; box-shadow: var(--shadow); }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 0.875rem 1.125rem; text-align: left; }
th {
    background: rgba(0,0,0,0.02);
    font-weight: 600;
    font-size: 0.6875rem;
    text-transform: uppercase;
    letter-spacing: 0.06em;
    color: var(--dim);
    border-bottom: 1px solid var(--border);
}
td { border-bottom: 1px solid rgba(0,0,0,0.06); }
tr:last-child td { border-bottom: none; }
.video-thumbnail-small { width: 80px; border-radius: 6px; display: block; }
.video-title-text { font-weight: 500; max-width: 360px; }
.badge {
    display: inline-block;
    padding: 0.3125rem 0.625rem;
    border-radius: 6px;
    font-size: 0.75rem;
    font-weight: 600;
}
.badge.high { background: rgba(52,199,89,0.12); color: #1d8348; }
.badge.medium { background: rgba(255,159,10,0.12); color: #b36b00; }
.badge.low { background: rgba(255,59,48,0.12); color: #c9302c; }
.action-button {
    display: inline-block;
    padding: 0.375rem 0.75rem;
    border: none;
    border-radius: 8px;
    background: rgba(0,122,255,0.1);
    color: var(--accent);
    font-size: 0.75rem;
    font-weight: 600;
    cursor: pointer;
    text-decoration: none;
    margin-right: 0.375rem;
}
.action-button:hover { background: rgba(0,122,255,0.2); }
.tab-strip { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 1rem; }
.tab-button {
    padding: 0.5rem 0.875rem;
    border: 1px solid var(--border);
    border-radius: 10px;
    background: var(--card);
    font-size: 0.8125rem;
    font-weight: 500;
    cursor: pointer;
}
.tab-button.active { background: var(--accent); border-color: var(--accent); color: #ffffff; }
.tab-pane { display: none; }
.tab-pane.active { display: block; }
.analysis-card { background: var(--card); border-radius: 16px; padding: 1.75rem; box-shadow: var(--shadow); }
.video-header { display: flex; gap: 1.5rem; margin-bottom: 1.5rem; }
.video-thumbnail-large { width: 240px; border-radius: 12px; display: block; }
.video-title-large { font-size: 1.25rem; font-weight: 600; margin-bottom: 0.75rem; }
.metrics-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.75rem 1.5rem; margin-bottom: 0.75rem; }
.metric-item { font-size: 0.875rem; }
.metric-value { font-weight: 600; margin-right: 0.375rem; }
.metric-label { color: var(--dim); font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.04em; }
.video-url { color: var(--accent); font-size: 0.8125rem; text-decoration: none; font-weight: 500; }
.analysis-section { margin-top: 1.25rem; padding-top: 1.25rem; border-top: 1px solid rgba(0,0,0,0.06); }
.analysis-section h3 { font-size: 1rem; margin-bottom: 0.5rem; }
.analysis-text { white-space: pre-wrap; font-size: 0.875rem; color: var(--text); }
.highlight-item { margin-top: 0.75rem; padding: 0.875rem 1rem; background: rgba(0,122,255,0.05); border-radius: 10px; }
.highlight-item h4 { font-size: 0.8125rem; margin-bottom: 0.25rem; }
.highlight-item p { font-size: 0.8125rem; color: var(--dim); white-space: pre-wrap; }
.pattern-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(340px, 1fr)); gap: 1rem; }
.pattern-item { background: var(--card); border-radius: 12px; padding: 1.25rem; box-shadow: var(--shadow); }
.pattern-item h4 { font-size: 0.9375rem; margin-bottom: 0.375rem; }
.pattern-item p { font-size: 0.8125rem; color: var(--dim); white-space: pre-wrap; }
.empty-note { color: var(--dim); font-size: 0.875rem; }
.footer {
    margin-top: 3rem;
    padding-top: 1.5rem;
    border-top: 1px solid var(--border);
    color: var(--dim);
    font-size: 0.8125rem;
    text-align: center;
}
"##;

const BODY: &str = r##"
<div class="section" id="top-videos">
  <div class="section-title">Top Videos</div>
  <div class="controls">
    <input type="text" id="video-search" placeholder="Search videos by title...">
    <select id="sort-by">
      <option value="rank">Rank</option>
      <option value="views-desc">Views (high to low)</option>
      <option value="views-asc">Views (low to high)</option>
      <option value="engagement-desc">Engagement (high to low)</option>
      <option value="engagement-asc">Engagement (low to high)</option>
    </select>
  </div>
  <div class="table-container">
    <table>
      <thead>
        <tr>
          <th>#</th><th></th><th>Title</th><th>Views</th><th>Engagement</th><th>Retention</th><th></th>
        </tr>
      </thead>
      <tbody id="videos-table-body"></tbody>
    </table>
  </div>
</div>

<div class="section" id="video-analysis">
  <div class="section-title">Video Analysis</div>
  <div class="tab-strip" id="video-tabs"></div>
  <div id="video-tab-content"></div>
</div>

<div class="section" id="patterns">
  <div class="section-title">Common Patterns</div>
  <div class="pattern-grid" id="patterns-common"></div>
</div>

<div class="section">
  <div class="section-title">Success Factors</div>
  <div class="pattern-grid" id="patterns-success"></div>
</div>

<div class="section">
  <div class="section-title">Recommendations</div>
  <div class="pattern-grid" id="recommendations"></div>
</div>

<div class="footer">Generated by channelscope</div>
</div>
"##;

const SCRIPT: &str = r##"
function el(tag, className, text) {
    const node = document.createElement(tag);
    if (className) node.className = className;
    if (text !== undefined) node.textContent = text;
    return node;
}

function renderVideos() {
    const tbody = document.getElementById('videos-table-body');
    tbody.innerHTML = '';

    data.videos.forEach(video => {
        const row = document.createElement('tr');
        row.dataset.title = video.title.toLowerCase();
        row.dataset.rank = video.rank === null ? '' : video.rank;
        row.dataset.views = video.views_value;
        row.dataset.engagement = video.engagement_value;

        row.appendChild(el('td', null, video.rank === null ? '' : String(video.rank)));

        const thumbCell = el('td');
        const thumb = el('img', 'video-thumbnail-small');
        thumb.src = video.thumb_url;
        thumb.alt = video.title;
        thumbCell.appendChild(thumb);
        row.appendChild(thumbCell);

        const titleCell = el('td');
        titleCell.appendChild(el('div', 'video-title-text', video.title));
        row.appendChild(titleCell);

        row.appendChild(el('td', null, video.views_display));

        const engagementCell = el('td');
        engagementCell.appendChild(el('span', 'badge ' + video.engagement_band, video.engagement_display));
        row.appendChild(engagementCell);

        const retentionCell = el('td');
        retentionCell.appendChild(el('span', 'badge ' + video.retention_band, video.retention_display));
        row.appendChild(retentionCell);

        const actionsCell = el('td');
        const analysisButton = el('button', 'action-button view-analysis', 'Analysis');
        analysisButton.dataset.videoId = video.video_id;
        actionsCell.appendChild(analysisButton);
        const watchLink = el('a', 'action-button', 'Watch');
        watchLink.href = video.watch_url;
        watchLink.target = '_blank';
        watchLink.rel = 'noopener noreferrer';
        actionsCell.appendChild(watchLink);
        row.appendChild(actionsCell);

        tbody.appendChild(row);
    });
}

function renderAnalysisBlock(pane, heading, block) {
    if (!block.full_text && block.highlights.length === 0) return;
    const section = el('div', 'analysis-section');
    section.appendChild(el('h3', null, heading));
    if (block.full_text) {
        section.appendChild(el('div', 'analysis-text', block.full_text));
    }
    block.highlights.forEach(h => {
        const item = el('div', 'highlight-item');
        item.appendChild(el('h4', null, h.title));
        item.appendChild(el('p', null, h.content));
        section.appendChild(item);
    });
    pane.appendChild(section);
}

function renderTabs() {
    const strip = document.getElementById('video-tabs');
    const content = document.getElementById('video-tab-content');
    strip.innerHTML = '';
    content.innerHTML = '';

    data.tabs.forEach((tab, index) => {
        const button = el('button', 'tab-button' + (index === 0 ? ' active' : ''));
        button.dataset.tab = 'video-' + tab.video_id;
        button.textContent = (index + 1) + '. ' + tab.short_title;
        strip.appendChild(button);

        const pane = el('div', 'tab-pane' + (index === 0 ? ' active' : ''));
        pane.id = 'video-' + tab.video_id;

        const card = el('div', 'analysis-card');
        const header = el('div', 'video-header');
        const thumb = el('img', 'video-thumbnail-large');
        thumb.src = tab.thumb_url;
        thumb.alt = tab.title;
        header.appendChild(thumb);

        const info = el('div');
        info.appendChild(el('h2', 'video-title-large', tab.title));
        const grid = el('div', 'metrics-grid');
        [[tab.views_display, 'Views'],
         [tab.likes_display, 'Likes'],
         [tab.comments_display, 'Comments'],
         [tab.engagement_display, 'Engagement'],
         [tab.duration_display, 'Avg Duration'],
         [tab.retention_display, 'Retention']].forEach(pair => {
            const item = el('div', 'metric-item');
            item.appendChild(el('span', 'metric-value', pair[0]));
            item.appendChild(el('span', 'metric-label', pair[1]));
            grid.appendChild(item);
        });
        info.appendChild(grid);
        const link = el('a', 'video-url', 'Watch on YouTube');
        link.href = tab.watch_url;
        link.target = '_blank';
        info.appendChild(link);
        header.appendChild(info);
        card.appendChild(header);

        renderAnalysisBlock(card, 'Title Analysis', tab.title_analysis);
        renderAnalysisBlock(card, 'Thumbnail Analysis', tab.thumbnail_analysis);

        pane.appendChild(card);
        content.appendChild(pane);
    });
}

function renderPatternList(containerId, entries) {
    const container = document.getElementById(containerId);
    container.innerHTML = '';
    if (entries.length === 0) {
        container.appendChild(el('div', 'empty-note', 'No entries found in the report.'));
        return;
    }
    entries.forEach(entry => {
        const item = el('div', 'pattern-item');
        item.appendChild(el('h4', null, entry.title));
        item.appendChild(el('p', null, entry.content));
        container.appendChild(item);
    });
}

function activateTab(button) {
    document.querySelectorAll('.tab-button').forEach(b => b.classList.remove('active'));
    button.classList.add('active');
    document.querySelectorAll('.tab-pane').forEach(p => p.classList.remove('active'));
    const pane = document.getElementById(button.dataset.tab);
    if (pane) pane.classList.add('active');
}

// Pending delayed tab activation; cancelled before rescheduling and on
// teardown so a timer never fires into a dismantled page.
let pendingActivation = null;

function setupEventListeners() {
    document.querySelectorAll('.tab-button').forEach(button => {
        button.addEventListener('click', () => activateTab(button));
    });

    document.querySelectorAll('.view-analysis').forEach(button => {
        button.addEventListener('click', () => {
            const target = document.querySelector('.tab-button[data-tab="video-' + button.dataset.videoId + '"]');
            if (!target) return;
            document.getElementById('video-analysis').scrollIntoView({ behavior: 'smooth' });
            if (pendingActivation !== null) clearTimeout(pendingActivation);
            pendingActivation = setTimeout(() => {
                pendingActivation = null;
                activateTab(target);
            }, 500);
        });
    });

    window.addEventListener('beforeunload', () => {
        if (pendingActivation !== null) clearTimeout(pendingActivation);
    });

    document.getElementById('video-search').addEventListener('input', event => {
        const term = event.target.value.toLowerCase();
        document.querySelectorAll('#videos-table-body tr').forEach(row => {
            row.style.display = row.dataset.title.includes(term) ? '' : 'none';
        });
    });

    document.getElementById('sort-by').addEventListener('change', event => {
        const key = event.target.value;
        const tbody = document.getElementById('videos-table-body');
        const rows = Array.from(tbody.querySelectorAll('tr'));

        rows.sort((a, b) => {
            if (key === 'rank') {
                return (parseInt(a.dataset.rank) || 0) - (parseInt(b.dataset.rank) || 0);
            }
            const field = key.startsWith('views') ? 'views' : 'engagement';
            const diff = parseFloat(a.dataset[field]) - parseFloat(b.dataset[field]);
            return key.endsWith('asc') ? diff : -diff;
        });

        rows.forEach(row => tbody.appendChild(row));
    });
}

renderVideos();
renderTabs();
renderPatternList('patterns-common', data.patterns.common);
renderPatternList('patterns-success', data.patterns.success_factors);
renderPatternList('recommendations', data.patterns.recommendations);
setupEventListeners();
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TopVideo;

    fn render(doc: &AnalysisDocument) -> String {
        let mut out = Vec::new();
        write(&mut out, doc).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_doc() -> AnalysisDocument {
        serde_json::from_str(
            r#"{
                "channel_name": "Tech <Lab>",
                "channel_subscribers": "125000",
                "top_videos": [
                    {"video_id": "abc", "rank": 1, "title": "Big Video", "views": 2300000}
                ],
                "video_analyses": {
                    "abc": {
                        "structured_analysis": {
                            "metrics": {"engagement_rate": "4.0%", "likes": "12000"},
                            "title_analysis": {"full_text": "Solid title."},
                            "thumbnail_analysis": {"full_text": "Bright colors."}
                        }
                    }
                },
                "patterns_report": {
                    "sections": {
                        "common patterns and success factors":
                            "1. **Hooks**: a. 2. **Pacing**: b. 3. **CTA**: c. 4. **Titles**: d."
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_write_escapes_channel_name() {
        let html = render(&sample_doc());
        assert!(html.contains("Tech &lt;Lab&gt;"));
        assert!(!html.contains("<Lab>"));
    }

    #[test]
    fn test_write_embeds_view_model() {
        let html = render(&sample_doc());
        assert!(html.contains("const data = "));
        assert!(html.contains("\"Big Video\""));
        assert!(html.contains("\"engagement_band\":\"high\""));
        // Second half of the 4-entry list.
        assert!(html.contains("\"success_factors\""));
        assert!(html.contains("\"CTA\""));
    }

    #[test]
    fn test_write_formats_header_stats() {
        let html = render(&sample_doc());
        assert!(html.contains("125.0K"));
        assert!(html.contains("2.3M"));
        assert!(html.contains("4.0%"));
    }

    #[test]
    fn test_write_empty_document_never_fails() {
        let html = render(&AnalysisDocument::default());
        assert!(html.contains("const data = "));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn test_tabs_skip_videos_without_analysis() {
        let mut doc = sample_doc();
        doc.top_videos.push(TopVideo {
            video_id: "zzz".to_string(),
            rank: Some(2),
            title: "Orphan".to_string(),
            views: None,
        });
        let view = view_model(&doc);
        assert_eq!(view.tabs.len(), 1);
        assert_eq!(view.videos.len(), 1);
    }

    #[test]
    fn test_short_title_truncation() {
        assert_eq!(short_title("short"), "short");
        let long = "a".repeat(30);
        let shortened = short_title(&long);
        assert_eq!(shortened, format!("{}...", "a".repeat(25)));
    }

    #[test]
    fn test_duration_display_forms() {
        assert_eq!(
            duration_display(Some(&MetricValue::Text("PT8M12S".into()))),
            "8:12"
        );
        assert_eq!(
            duration_display(Some(&MetricValue::Text("8:12".into()))),
            "8:12"
        );
        assert_eq!(duration_display(None), NOT_AVAILABLE);
    }

    #[test]
    fn test_highlights_strip_emphasis() {
        let mut block = AnalysisText::default();
        block
            .sections
            .insert("**hook strength**".to_string(), "Works well.".to_string());
        let views = highlights(&block);
        assert_eq!(views[0].title, "Hook strength");
        assert_eq!(views[0].content, "Works well.");
    }
}
