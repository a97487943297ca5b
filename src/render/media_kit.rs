//! Media-kit dashboard
//!
//! A sponsor-facing page: channel banner, audience demographics charts,
//! performance averages, and a top-content grid. Charts are drawn by
//! Chart.js from the embedded view model.

use std::io::{self, Write};

use serde::Serialize;

use super::{escape_html, json_for_script};
use crate::format::{format_compact_number, format_date, format_duration, NOT_AVAILABLE};
use crate::model::{KitVideo, MediaKitDocument};

/// Demographics buckets in presentation order. Upstream keys each bucket
/// as `age{label}` under its gender.
const AGE_GROUPS: [&str; 7] = ["13-17", "18-24", "25-34", "35-44", "45-54", "55-64", "65+"];

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

#[derive(Debug, Serialize)]
struct MediaKitView {
    channel: ChannelView,
    age_groups: Vec<AgeGroupView>,
    countries: Vec<CountryView>,
    devices: Vec<DeviceView>,
    averages: AveragesView,
    videos: Vec<KitVideoView>,
}

#[derive(Debug, Serialize)]
struct ChannelView {
    title: String,
    custom_url: String,
    thumbnail: String,
    subscribers_display: String,
    views_display: String,
    videos_display: String,
}

#[derive(Debug, Serialize)]
struct AgeGroupView {
    label: String,
    male: f64,
    female: f64,
}

#[derive(Debug, Serialize)]
struct CountryView {
    code: String,
    percentage: f64,
}

#[derive(Debug, Serialize)]
struct DeviceView {
    name: String,
    percentage: f64,
    views_display: String,
}

#[derive(Debug, Serialize)]
struct AveragesView {
    view_percentage: String,
    daily_views: String,
    views_per_video: String,
    engagement_rate: String,
}

#[derive(Debug, Serialize)]
struct KitVideoView {
    id: String,
    title: String,
    watch_url: String,
    thumbnail: String,
    published_display: String,
    duration_display: String,
    views_display: String,
    likes_display: String,
    comments_display: String,
}

fn opt_count(n: Option<u64>) -> String {
    n.map(format_compact_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn opt_percent(p: Option<f64>) -> String {
    p.map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn video_view(video: &KitVideo) -> KitVideoView {
    KitVideoView {
        id: video.id.clone(),
        title: video.title.clone(),
        watch_url: format!("https://www.youtube.com/watch?v={}", video.id),
        thumbnail: video
            .thumbnails
            .best_url()
            .map(str::to_string)
            .unwrap_or_else(|| format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video.id)),
        published_display: video
            .published_at
            .as_deref()
            .map(format_date)
            .unwrap_or_default(),
        duration_display: video
            .duration
            .as_deref()
            .map(format_duration)
            .unwrap_or_default(),
        views_display: opt_count(video.view_count),
        likes_display: opt_count(video.like_count),
        comments_display: opt_count(video.comment_count),
    }
}

fn view_model(doc: &MediaKitDocument) -> MediaKitView {
    let info = &doc.channel_info;
    let channel = ChannelView {
        title: info.title.clone(),
        custom_url: info.custom_url.clone().unwrap_or_default(),
        thumbnail: info
            .thumbnails
            .best_url()
            .unwrap_or_default()
            .to_string(),
        subscribers_display: opt_count(info.subscriber_count),
        views_display: opt_count(info.view_count),
        videos_display: opt_count(info.video_count),
    };

    // Fixed bucket order; genders missing a bucket chart as zero.
    let age_gender = &doc.audience.age_gender;
    let bucket = |gender: &str, label: &str| -> f64 {
        age_gender
            .get(gender)
            .and_then(|buckets| buckets.get(&format!("age{}", label)))
            .copied()
            .unwrap_or(0.0)
    };
    let age_groups = AGE_GROUPS
        .iter()
        .map(|label| AgeGroupView {
            label: label.to_string(),
            male: bucket("male", label),
            female: bucket("female", label),
        })
        .collect();

    // Top ten countries by audience share.
    let mut countries: Vec<CountryView> = doc
        .audience
        .countries
        .iter()
        .map(|(code, pct)| CountryView {
            code: code.clone(),
            percentage: *pct,
        })
        .collect();
    countries.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    countries.truncate(10);

    let devices = doc
        .audience
        .devices
        .iter()
        .map(|(name, share)| DeviceView {
            name: name.clone(),
            percentage: share.percentage.unwrap_or(0.0),
            views_display: opt_count(share.views),
        })
        .collect();

    let avg = &doc.performance.averages;
    let averages = AveragesView {
        view_percentage: opt_percent(avg.average_view_percentage),
        daily_views: opt_count(avg.daily_views),
        views_per_video: opt_count(avg.views_per_video),
        engagement_rate: opt_percent(avg.engagement_rate),
    };

    let videos = doc.top_content.top_videos.iter().map(video_view).collect();

    MediaKitView {
        channel,
        age_groups,
        countries,
        devices,
        averages,
        videos,
    }
}

/// Write the complete media-kit dashboard.
pub fn write<W: Write>(writer: &mut W, doc: &MediaKitDocument) -> io::Result<()> {
    let view = view_model(doc);
    let title = escape_html(&doc.channel_info.title);

    write!(
        writer,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{} - Media Kit</title>\n\
         <script src=\"{}\"></script>\n<style>",
        title, CHART_JS_CDN
    )?;
    writer.write_all(STYLE.as_bytes())?;
    writer.write_all(b"</style>\n</head>\n<body>\n<div class=\"container\">\n")?;
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
.channel-banner {
    display: flex;
    align-items: center;
    gap: 1.5rem;
    background: var(--card);
    border-radius: 16px;
    padding: 2rem;
    box-shadow: var(--shadow);
    margin-bottom: 2.5rem;
}
.channel-avatar { width: 96px; height: 96px; border-radius: 50%; object-fit: cover; }
.channel-title { font-size: 1.75rem; font-weight: 700; letter-spacing: -0.02em; }
.channel-url { color: var(--accent); font-size: 0.9375rem; font-weight: 500; }
.banner-stats { display: flex; gap: 2.5rem; margin-left: auto; }
.banner-stat { text-align: center; }
.banner-stat .value { font-size: 1.75rem; font-weight: 600; line-height: 1.1; }
.banner-stat .label { color: var(--dim); font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; margin-top: 0.25rem; }
.section { margin-bottom: 2.5rem; }
.section-title { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }
.chart-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(340px, 1fr)); gap: 1.25rem; }
.chart-card {
    background: var(--card);
    border-radius: 16px;
    padding: 1.5rem;
    box-shadow: var(--shadow);
}
.chart-card h3 { font-size: 1rem; margin-bottom: 1rem; }
.chart-card canvas { max-height: 300px; }
.averages-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1.25rem; }
.average-card {
    background: var(--card);
    border-radius: 16px;
    padding: 1.5rem;
    text-align: center;
    box-shadow: var(--shadow);
}
.average-card .value { font-size: 1.75rem; font-weight: 600; }
.average-card .label { color: var(--dim); font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; margin-top: 0.375rem; }
.video-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1.25rem; }
.video-card {
    background: var(--card);
    border-radius: 16px;
    overflow: hidden;
    box-shadow: var(--shadow);
    text-decoration: none;
    color: inherit;
    display: block;
}
.video-card img { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; display: block; }
.video-card-body { padding: 1rem 1.125rem 1.25rem; }
.video-card-title { font-size: 0.9375rem; font-weight: 600; margin-bottom: 0.375rem; }
.video-card-meta { color: var(--dim); font-size: 0.75rem; margin-bottom: 0.625rem; }
.video-card-stats { display: flex; gap: 1rem; font-size: 0.8125rem; }
.video-card-stats .stat-value { font-weight: 600; margin-right: 0.25rem; }
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
<div class="channel-banner" id="channel-banner"></div>

<div class="section">
  <div class="section-title">Audience</div>
  <div class="chart-grid">
    <div class="chart-card">
      <h3>Age &amp; Gender</h3>
      <canvas id="age-gender-chart"></canvas>
    </div>
    <div class="chart-card">
      <h3>Top Countries</h3>
      <canvas id="countries-chart"></canvas>
    </div>
    <div class="chart-card">
      <h3>Devices</h3>
      <canvas id="devices-chart"></canvas>
    </div>
  </div>
</div>

<div class="section">
  <div class="section-title">Performance Averages</div>
  <div class="averages-grid" id="averages"></div>
</div>

<div class="section">
  <div class="section-title">Top Content</div>
  <div class="video-grid" id="top-content"></div>
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

function renderBanner() {
    const banner = document.getElementById('channel-banner');
    if (data.channel.thumbnail) {
        const avatar = el('img', 'channel-avatar');
        avatar.src = data.channel.thumbnail;
        avatar.alt = data.channel.title;
        banner.appendChild(avatar);
    }
    const info = el('div');
    info.appendChild(el('div', 'channel-title', data.channel.title));
    if (data.channel.custom_url) {
        info.appendChild(el('div', 'channel-url', data.channel.custom_url));
    }
    banner.appendChild(info);

    const stats = el('div', 'banner-stats');
    [[data.channel.subscribers_display, 'Subscribers'],
     [data.channel.views_display, 'Total Views'],
     [data.channel.videos_display, 'Videos']].forEach(pair => {
        const stat = el('div', 'banner-stat');
        stat.appendChild(el('div', 'value', pair[0]));
        stat.appendChild(el('div', 'label', pair[1]));
        stats.appendChild(stat);
    });
    banner.appendChild(stats);
}

function renderCharts() {
    new Chart(document.getElementById('age-gender-chart'), {
        type: 'bar',
        data: {
            labels: data.age_groups.map(g => g.label),
            datasets: [
                { label: 'Male', data: data.age_groups.map(g => g.male), backgroundColor: '#007aff' },
                { label: 'Female', data: data.age_groups.map(g => g.female), backgroundColor: '#ff375f' }
            ]
        },
        options: {
            responsive: true,
            scales: { y: { beginAtZero: true, ticks: { callback: v => v + '%' } } }
        }
    });

    new Chart(document.getElementById('countries-chart'), {
        type: 'bar',
        data: {
            labels: data.countries.map(c => c.code),
            datasets: [{ label: 'Audience %', data: data.countries.map(c => c.percentage), backgroundColor: '#34c759' }]
        },
        options: {
            indexAxis: 'y',
            responsive: true,
            plugins: { legend: { display: false } },
            scales: { x: { beginAtZero: true, ticks: { callback: v => v + '%' } } }
        }
    });

    new Chart(document.getElementById('devices-chart'), {
        type: 'doughnut',
        data: {
            labels: data.devices.map(d => d.name),
            datasets: [{
                data: data.devices.map(d => d.percentage),
                backgroundColor: ['#007aff', '#34c759', '#ff9f0a', '#ff375f', '#5e5ce6', '#86868b']
            }]
        },
        options: { responsive: true }
    });
}

function renderAverages() {
    const grid = document.getElementById('averages');
    [[data.averages.view_percentage, 'Avg View Percentage'],
     [data.averages.daily_views, 'Daily Views'],
     [data.averages.views_per_video, 'Views Per Video'],
     [data.averages.engagement_rate, 'Engagement Rate']].forEach(pair => {
        const card = el('div', 'average-card');
        card.appendChild(el('div', 'value', pair[0]));
        card.appendChild(el('div', 'label', pair[1]));
        grid.appendChild(card);
    });
}

function renderTopContent() {
    const grid = document.getElementById('top-content');
    if (data.videos.length === 0) {
        grid.appendChild(el('div', 'empty-note', 'No top content available.'));
        return;
    }
    data.videos.forEach(video => {
        const card = el('a', 'video-card');
        card.href = video.watch_url;
        card.target = '_blank';
        card.rel = 'noopener noreferrer';

        const thumb = el('img');
        thumb.src = video.thumbnail;
        thumb.alt = video.title;
        thumb.loading = 'lazy';
        card.appendChild(thumb);

        const body = el('div', 'video-card-body');
        body.appendChild(el('div', 'video-card-title', video.title));
        const meta = [video.published_display, video.duration_display]
            .filter(part => part.length > 0)
            .join(' · ');
        if (meta) body.appendChild(el('div', 'video-card-meta', meta));

        const stats = el('div', 'video-card-stats');
        [[video.views_display, 'views'],
         [video.likes_display, 'likes'],
         [video.comments_display, 'comments']].forEach(pair => {
            const stat = el('span');
            stat.appendChild(el('span', 'stat-value', pair[0]));
            stat.appendChild(document.createTextNode(pair[1]));
            stats.appendChild(stat);
        });
        body.appendChild(stats);
        card.appendChild(body);
        grid.appendChild(card);
    });
}

renderBanner();
renderCharts();
renderAverages();
renderTopContent();
"##;
