//! Report rendering.
//!
//! Produces one self-contained HTML document: inline CSS, one embedded JSON
//! payload (records, platforms, year bounds, stopwords), and an inline script
//! that re-derives every table from the payload on each filter change. The
//! initial tables are rendered server-side from the same engine so the
//! document has content before the script runs.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::aggregate::AggregateView;
use crate::engine::{self, FilterState};
use crate::models::ExportedRecord;
use crate::sentiment::Stopwords;
use crate::settings::ReportSettings;

/// Everything the in-report script needs, embedded as one JSON blob.
#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    records: &'a [ExportedRecord],
    platforms: &'a [String],
    min_year: i32,
    max_year: i32,
    stop_words: Vec<String>,
}

/// Render the full report document.
pub fn render(
    records: &[ExportedRecord],
    platforms: &[String],
    stopwords: &Stopwords,
    settings: &ReportSettings,
) -> Result<String> {
    let state = FilterState::full_range(records);
    let (min_year, max_year) = engine::year_bounds(records)
        .unwrap_or_else(|| current_year_bounds());
    let view = engine::recompute(records, &state, stopwords, settings.top_words);

    let payload = ReportPayload {
        records,
        platforms,
        min_year,
        max_year,
        stop_words: stopwords.to_sorted_vec(),
    };
    let payload_json = serde_json::to_string(&payload)
        .context("failed to serialize report payload")?
        // keep "</script>" inside review text from closing the data tag
        .replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Review Sentiment Report</title>
    <style>{css}</style>
</head>
<body>
<div class="container">
    <h1>Review Sentiment Report</h1>
    <div class="platform-tabs" id="platformTabs"></div>
    <div class="year-filter">
        <label><b>Filter by year range:</b></label>
        <div class="year-controls">
            <input type="range" id="yearStart" min="{min_year}" max="{max_year}" value="{min_year}" step="1">
            <input type="range" id="yearEnd" min="{min_year}" max="{max_year}" value="{max_year}" step="1">
            <span class="year-values" id="yearValues">{min_year} - {max_year}</span>
        </div>
    </div>
    <div class="summary" id="summary">{summary}</div>
    <div class="flex-row">
        <div>
            <h2>Star Rating Summary</h2>
            <div id="score-summary">{star_table}</div>
        </div>
        <div>
            <h2>Score vs. Sentiment Type</h2>
            <div id="cross-tab">{cross_tab}</div>
        </div>
    </div>
    <div class="flex-row">
        <div>
            <h2>Top Words in Negative Reviews</h2>
            <p class="word-hint"><em>Click a word to see the top negative comments containing it.</em></p>
            <div id="top-words-neg">{top_words_neg}</div>
        </div>
        <div>
            <h2>Top Words in Positive Reviews</h2>
            <p class="word-hint"><em>Click a word to see the top positive comments containing it.</em></p>
            <div id="top-words-pos">{top_words_pos}</div>
        </div>
    </div>
    <h2 id="comments-title" style="display:none;"></h2>
    <table id="comments-table" style="display:none;">
        <thead>
            <tr><th>Score</th><th>Sentiment</th><th>Review</th><th style="width:120px;">Date</th></tr>
        </thead>
        <tbody></tbody>
    </table>
</div>
<script id="report-data" type="application/json">{payload}</script>
<script>{js}</script>
</body>
</html>
"#,
        css = inline_css(),
        js = inline_javascript(),
        min_year = min_year,
        max_year = max_year,
        summary = render_summary(&view),
        star_table = render_star_table(&view),
        cross_tab = render_cross_tab(&view),
        top_words_neg = render_top_words(&view.top_negative, "negative"),
        top_words_pos = render_top_words(&view.top_positive, "positive"),
        payload = payload_json,
    ))
}

fn current_year_bounds() -> (i32, i32) {
    use chrono::Datelike;
    let year = chrono::Utc::now().year();
    (year, year)
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_summary(view: &AggregateView) -> String {
    format!(
        "<span><b>Total reviews:</b> {}</span>\
         <span><b>Average sentiment:</b> {:.2}</span>\
         <span><b>% Positive:</b> {:.1}%</span>\
         <span><b>% Neutral:</b> {:.1}%</span>\
         <span><b>% Negative:</b> {:.1}%</span>",
        view.total, view.mean_polarity, view.pct_positive, view.pct_neutral, view.pct_negative
    )
}

fn render_star_table(view: &AggregateView) -> String {
    let mut html = String::from("<table><tr><th>Stars</th><th>Count</th></tr>");
    for star in (1..=5usize).rev() {
        html.push_str(&format!(
            "<tr><td>{star}</td><td>{}</td></tr>",
            view.star_histogram[star - 1]
        ));
    }
    html.push_str("</table>");
    html
}

fn render_cross_tab(view: &AggregateView) -> String {
    let mut html = String::from(
        "<table class=\"cross-tab\"><tr><th>Stars</th>\
         <th>Positive</th><th>Neutral</th><th>Negative</th></tr>",
    );
    for star in (1..=5usize).rev() {
        let row = view.cross_tab[star - 1];
        html.push_str(&format!(
            "<tr><td>{star}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            row[0], row[1], row[2]
        ));
    }
    html.push_str("</table>");
    html
}

fn render_top_words(words: &[(String, u64)], side: &str) -> String {
    let mut html = String::from("<table><tr><th>Word</th><th>Count</th></tr>");
    for (word, count) in words {
        let escaped = escape_html(word);
        html.push_str(&format!(
            "<tr><td><a href=\"#\" class=\"word-link\" data-word=\"{escaped}\" \
             data-side=\"{side}\">{escaped}</a></td><td>{count}</td></tr>"
        ));
    }
    html.push_str("</table>");
    html
}

/// Write the artifact; a failed write is fatal for the run.
pub fn write_report(html: &str, path: &Path) -> Result<()> {
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}

/// Best-effort open of the written report in the default browser.
pub fn open_in_browser(path: &Path) {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(path);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    if let Err(err) = command.spawn() {
        warn!("Failed to open report in browser: {err}");
    }
}

fn inline_css() -> &'static str {
    r#"
body { font-family: Arial, sans-serif; background: #f8f9fa; margin: 0; padding: 0; }
.container { max-width: 1200px; margin: 40px auto; background: #fff; border-radius: 8px; box-shadow: 0 2px 8px #0001; padding: 32px; }
h1 { color: #222; }
.summary { margin-bottom: 32px; }
.summary span { display: inline-block; margin-right: 32px; font-size: 1.1em; }
.flex-row { display: flex; gap: 40px; margin-bottom: 32px; }
.flex-row > div { flex: 1; }
table { border-collapse: collapse; width: 100%; background: #fff; }
th, td { padding: 10px 8px; text-align: left; }
th { background: #222; color: #fff; }
tr:nth-child(even) { background: #f2f2f2; }
.sentiment-pos { color: #228B22; font-weight: bold; }
.sentiment-neg { color: #B22222; font-weight: bold; }
.sentiment-neu { color: #888; }
.cross-tab th, .cross-tab td { border: 1px solid #ccc; }
.word-link { color: #0074d9; text-decoration: underline; cursor: pointer; }
.word-link:hover { color: #B22222; }
.word-hint { margin-bottom: 12px; color: #555; }
.year-filter { margin-bottom: 32px; font-size: 1.1em; }
.year-controls { display: flex; align-items: center; gap: 12px; margin-top: 8px; }
.year-controls input[type=range] { width: 200px; }
.year-values { font-weight: bold; }
.platform-tabs { display: flex; justify-content: center; gap: 16px; margin-bottom: 32px; }
.platform-tab { padding: 10px 28px; border-radius: 6px 6px 0 0; background: #ececf6; color: #333; cursor: pointer; font-weight: 500; border: none; outline: none; transition: background 0.2s; }
.platform-tab.active { background: #2d72d9; color: #fff; }
"#
}

fn inline_javascript() -> &'static str {
    r##"
document.addEventListener('DOMContentLoaded', function() {
    const REPORT = JSON.parse(document.getElementById('report-data').textContent);
    const stopWords = new Set(REPORT.stop_words);
    let yearStart = REPORT.min_year;
    let yearEnd = REPORT.max_year;
    let selectedPlatform = null;
    let activeWord = null;
    let activeSide = 'negative';

    function escapeHtml(text) {
        return String(text)
            .replace(/&/g, '&amp;')
            .replace(/</g, '&lt;')
            .replace(/>/g, '&gt;')
            .replace(/"/g, '&quot;');
    }

    function formatNumber(n) {
        return n.toLocaleString();
    }

    function getFiltered() {
        let filtered = REPORT.records.filter(r => r.year !== null && r.year >= yearStart && r.year <= yearEnd);
        if (selectedPlatform) {
            filtered = filtered.filter(r => r.platform === selectedPlatform);
        }
        return filtered;
    }

    function renderPlatformTabs() {
        const container = document.getElementById('platformTabs');
        let html = '<button class="platform-tab' + (selectedPlatform === null ? ' active' : '') + '" data-platform="">Show All</button>';
        REPORT.platforms.forEach(function(p) {
            html += '<button class="platform-tab' + (selectedPlatform === p ? ' active' : '') + '" data-platform="' + escapeHtml(p) + '">' + escapeHtml(p) + '</button>';
        });
        container.innerHTML = html;
        container.querySelectorAll('.platform-tab').forEach(btn => {
            btn.addEventListener('click', function() {
                container.querySelectorAll('.platform-tab').forEach(b => b.classList.remove('active'));
                this.classList.add('active');
                selectedPlatform = this.getAttribute('data-platform') || null;
                updateAll();
            });
        });
    }

    function updateSummary(filtered) {
        const total = filtered.length;
        const avg = total ? filtered.reduce((a, r) => a + (r.sentiment_raw || 0), 0) / total : 0;
        const pos = filtered.filter(r => r.sentiment_raw > 0.15).length / (total || 1) * 100;
        const neg = filtered.filter(r => r.sentiment_raw < -0.15).length / (total || 1) * 100;
        const neu = filtered.filter(r => r.sentiment_raw !== null && r.sentiment_raw >= -0.15 && r.sentiment_raw <= 0.15).length / (total || 1) * 100;
        document.getElementById('summary').innerHTML =
            '<span><b>Total reviews:</b> ' + formatNumber(total) + '</span>' +
            '<span><b>Average sentiment:</b> ' + avg.toFixed(2) + '</span>' +
            '<span><b>% Positive:</b> ' + pos.toFixed(1) + '%</span>' +
            '<span><b>% Neutral:</b> ' + neu.toFixed(1) + '%</span>' +
            '<span><b>% Negative:</b> ' + neg.toFixed(1) + '%</span>';
    }

    function updateStarTable(filtered) {
        const counts = {1: 0, 2: 0, 3: 0, 4: 0, 5: 0};
        filtered.forEach(r => {
            if (counts.hasOwnProperty(r.score)) counts[r.score]++;
        });
        let html = '<table><tr><th>Stars</th><th>Count</th></tr>';
        for (let i = 5; i >= 1; i--) {
            html += '<tr><td>' + i + '</td><td>' + formatNumber(counts[i]) + '</td></tr>';
        }
        html += '</table>';
        document.getElementById('score-summary').innerHTML = html;
    }

    function updateCrossTab(filtered) {
        const sentiments = ['positive', 'neutral', 'negative'];
        let html = '<table class="cross-tab"><tr><th>Stars</th><th>Positive</th><th>Neutral</th><th>Negative</th></tr>';
        for (let score = 5; score >= 1; score--) {
            html += '<tr><td>' + score + '</td>';
            sentiments.forEach(sent => {
                const count = filtered.filter(r => r.score === score && r.sentiment_type === sent).length;
                html += '<td>' + formatNumber(count) + '</td>';
            });
            html += '</tr>';
        }
        html += '</table>';
        document.getElementById('cross-tab').innerHTML = html;
    }

    function updateTopWords(filtered, side, id) {
        let allText = filtered
            .filter(r => r.sentiment_type === side)
            .map(r => r.review ? r.review.toLowerCase() : '')
            .join(' ');
        allText = allText.replace(/[^a-z\s]/g, '');
        const tokens = allText.split(/\s+/).filter(w => w && w.length > 2 && !stopWords.has(w));
        const counts = {};
        tokens.forEach(w => counts[w] = (counts[w] || 0) + 1);
        const ranked = Object.entries(counts).sort((a, b) => b[1] - a[1]).slice(0, 10);
        let html = '<table><tr><th>Word</th><th>Count</th></tr>';
        ranked.forEach(([word, count]) => {
            html += '<tr><td><a href="#" class="word-link" data-word="' + escapeHtml(word) + '" data-side="' + side + '">' + escapeHtml(word) + '</a></td><td>' + formatNumber(count) + '</td></tr>';
        });
        html += '</table>';
        document.getElementById(id).innerHTML = html;
    }

    function rankedComments(filtered) {
        let rows = filtered.filter(r => r.sentiment_raw !== null);
        if (activeSide === 'negative') {
            rows = rows.filter(r => r.sentiment_raw < -0.15);
        } else {
            rows = rows.filter(r => r.sentiment_raw > 0.15);
        }
        if (activeWord) {
            const boundary = new RegExp('\\b' + activeWord + '\\b', 'i');
            rows = rows.filter(r => {
                if (!r.words || !boundary.test(r.words)) return false;
                if (!r.review) return false;
                return String(r.review).trim().split(/\s+/).filter(w => w.length > 0).length >= 10;
            });
        }
        rows.sort((a, b) => {
            if (a.date !== b.date) return a.date < b.date ? 1 : -1;
            if (a.sentiment_raw !== b.sentiment_raw) {
                return activeSide === 'negative'
                    ? a.sentiment_raw - b.sentiment_raw
                    : b.sentiment_raw - a.sentiment_raw;
            }
            return activeSide === 'negative' ? a.score - b.score : b.score - a.score;
        });
        return rows.slice(0, 20);
    }

    function updateComments(filtered) {
        const table = document.getElementById('comments-table');
        const title = document.getElementById('comments-title');
        const tbody = table.getElementsByTagName('tbody')[0];
        tbody.innerHTML = '';

        // Table stays hidden until a word filter is active.
        if (!activeWord) {
            table.style.display = 'none';
            title.style.display = 'none';
            return;
        }

        const rows = rankedComments(filtered);
        const sideLabel = activeSide === 'negative' ? 'Negative' : 'Positive';
        title.innerText = 'Top ' + Math.min(20, rows.length) + ' Most ' + sideLabel + ' Comments Containing "' + activeWord + '"';

        rows.forEach(row => {
            let reviewHtml = escapeHtml(row.review);
            const highlight = new RegExp('\\b(' + activeWord + ')\\b', 'gi');
            reviewHtml = reviewHtml.replace(highlight, '<b>$1</b>');
            const cls = row.sentiment_raw > 0.15 ? 'sentiment-pos' : (row.sentiment_raw < -0.15 ? 'sentiment-neg' : 'sentiment-neu');
            const tr = tbody.insertRow();
            tr.innerHTML = '<td>' + formatNumber(row.score) + '</td>' +
                '<td class="' + cls + '">' + row.sentiment + '</td>' +
                '<td>' + reviewHtml + '</td>' +
                '<td>' + row.date + '</td>';
        });

        table.style.display = rows.length ? '' : 'none';
        title.style.display = '';
    }

    function updateAll() {
        const filtered = getFiltered();
        updateSummary(filtered);
        updateStarTable(filtered);
        updateCrossTab(filtered);
        updateTopWords(filtered, 'negative', 'top-words-neg');
        updateTopWords(filtered, 'positive', 'top-words-pos');
        updateComments(filtered);
    }

    document.addEventListener('click', function(e) {
        if (e.target.classList.contains('word-link')) {
            e.preventDefault();
            activeWord = e.target.getAttribute('data-word');
            activeSide = e.target.getAttribute('data-side');
            updateAll();
        }
    });

    const startInput = document.getElementById('yearStart');
    const endInput = document.getElementById('yearEnd');
    function onYearChange() {
        const a = parseInt(startInput.value, 10);
        const b = parseInt(endInput.value, 10);
        yearStart = Math.min(a, b);
        yearEnd = Math.max(a, b);
        document.getElementById('yearValues').innerText = yearStart + ' - ' + yearEnd;
        updateAll();
    }
    startInput.addEventListener('input', onYearChange);
    endInput.addEventListener('input', onYearChange);

    renderPlatformTabs();
    updateAll();
});
"##
}
