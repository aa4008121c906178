//! Self-contained HTML rendering of a [`ReportData`].
//!
//! Every interpolated value goes through [`esc`] or [`attr`]. Screenshots are
//! referenced by file name, so the report must sit next to them.

use std::collections::BTreeSet;

use super::format::{
    attr, esc, file_name, format_bytes, format_ms, or_dash, score_or_dash, status_class,
};
use crate::audit::ReportData;
use crate::config::{DESCRIPTION_LENGTH_RANGE, TITLE_LENGTH_RANGE};
use crate::site::SecurityWarning;

const MAX_LIST_ITEMS: usize = 10;
const MAX_TAGS: usize = 12;

const STYLE: &str = r#"
:root { --bg: #f2f4f8; --card: #fff; --text: #1a1c23; --muted: #8f95a3; --line: #f0f2f6;
  --ok: #34c759; --ok-bg: #ebf9ee; --bad: #ff3b30; --bad-bg: #fff0ef; --info: #3e7bfa; --info-bg: #ecf2ff; }
* { box-sizing: border-box; }
body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background: var(--bg); color: var(--text);
  margin: 0; padding: 32px 16px; line-height: 1.5; }
.container { max-width: 1400px; margin: 0 auto; display: grid; grid-template-columns: repeat(12, 1fr); gap: 20px; }
.col-12 { grid-column: span 12; } .col-8 { grid-column: span 8; } .col-4 { grid-column: span 4; }
@media (max-width: 1100px) { .col-4 { grid-column: span 6; } .col-8 { grid-column: span 12; } }
@media (max-width: 768px) { .col-4, .col-8 { grid-column: span 12; } }
@media print { body { padding: 0; background: #fff; } .card { break-inside: avoid; box-shadow: none; border: 1px solid #ddd; } }
.card { background: var(--card); border-radius: 20px; padding: 24px; box-shadow: 0 8px 24px rgba(149,157,165,.08); overflow: hidden; }
.card-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; }
h1 { font-size: 28px; margin: 0; word-break: break-all; }
h2 { font-size: 18px; margin: 0; }
h3 { font-size: 13px; color: var(--muted); text-transform: uppercase; letter-spacing: .5px; margin: 16px 0 8px; }
.display-score { font-size: 56px; font-weight: 800; line-height: 1; }
.muted { color: var(--muted); font-size: 13px; }
.pill { display: inline-flex; padding: 4px 12px; border-radius: 99px; font-size: 12px; font-weight: 700;
  background: var(--bg); color: var(--muted); margin: 0 6px 6px 0; }
.status-badge { padding: 4px 10px; border-radius: 8px; font-size: 12px; font-weight: 700; display: inline-flex; }
.status-ok { background: var(--ok-bg); color: var(--ok); }
.status-bad { background: var(--bad-bg); color: var(--bad); }
.status-info { background: var(--info-bg); color: var(--info); }
.data-row { display: flex; justify-content: space-between; gap: 12px; padding: 8px 0; border-bottom: 1px dashed var(--line); }
.data-row:last-child { border-bottom: none; }
.row-value { font-weight: 600; text-align: right; word-break: break-all; }
.scores { display: grid; grid-template-columns: repeat(6, 1fr); gap: 12px; }
.score-tile { background: #fafafc; border-radius: 14px; padding: 14px; }
.score-tile .value { font-size: 24px; font-weight: 800; }
.track { height: 10px; background: var(--bg); border-radius: 5px; overflow: hidden; margin-bottom: 14px; }
.bar { height: 100%; background: var(--info); }
ul { padding-left: 20px; margin: 0; font-size: 13px; }
.shot img { width: 100%; border-radius: 12px; border: 1px solid var(--line); }
"#;

/// Renders the full report document.
pub fn render_html(report: &ReportData) -> String {
    let cards = [
        header_card(report),
        scores_card(report),
        seo_card(report),
        lighthouse_card(report),
        links_card(report),
        tech_card(report),
        health_card(report),
        indexing_card(report),
        images_card(report),
        navigation_card(report),
        structured_data_card(report),
        mobile_card(report),
        degraded_card(report),
    ];

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Site audit: {title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
{cards}
</div>
</body>
</html>
"#,
        title = esc(&report.requested_url),
        cards = cards.join("\n"),
    )
}

fn card(span: &str, heading: &str, badge: &str, body: &str) -> String {
    format!(
        r#"<section class="card {span}"><div class="card-header"><h2>{heading}</h2>{badge}</div>{body}</section>"#
    )
}

fn row(label: &str, value: &str) -> String {
    format!(r#"<div class="data-row"><span>{label}</span><span class="row-value">{value}</span></div>"#)
}

fn badge(class: &str, text: &str) -> String {
    format!(r#"<span class="status-badge {class}">{text}</span>"#)
}

fn list<I, S>(items: I, empty: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items
        .into_iter()
        .take(MAX_LIST_ITEMS)
        .map(|item| format!("<li>{}</li>", esc(item.as_ref())))
        .collect();
    if items.is_empty() {
        format!(r#"<ul><li class="muted">{empty}</li></ul>"#)
    } else {
        format!("<ul>{}</ul>", items.concat())
    }
}

fn tags(items: &[String]) -> String {
    if items.is_empty() {
        return r#"<span class="muted">-</span>"#.to_string();
    }
    items
        .iter()
        .take(MAX_TAGS)
        .map(|item| format!(r#"<span class="pill">{}</span>"#, esc(item)))
        .collect()
}

fn bar(value: usize, full: usize) -> String {
    let percent = (value as f64 / full.max(1) as f64 * 100.0).min(100.0);
    format!(r#"<div class="track"><div class="bar" style="width: {percent:.0}%"></div></div>"#)
}

fn screenshot(path: &str, alt_text: &str, missing: &str) -> String {
    match file_name(path) {
        name if name.is_empty() => format!(r#"<div class="muted">{missing}</div>"#),
        name => format!(
            r#"<div class="shot"><img src="{}" alt="{alt_text}"></div>"#,
            attr(&name)
        ),
    }
}

fn header_card(report: &ReportData) -> String {
    let body = format!(
        r#"<div style="display:flex; justify-content:space-between; flex-wrap:wrap; gap:20px; align-items:center;">
<div>{badge} <span class="muted">{generated}</span>
<h1>{url}</h1><div class="muted">Final URL: {final_url}</div><div class="muted">{title}</div></div>
<div style="text-align:right;"><div class="display-score">{composite}</div><div class="muted">Composite score</div></div>
</div>"#,
        badge = badge("status-info", "Report generated"),
        generated = esc(&report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        url = esc(&report.requested_url),
        final_url = esc(&report.final_url),
        title = esc(&report.title),
        composite = report.scores.composite,
    );
    format!(r#"<section class="card col-12">{body}</section>"#)
}

fn scores_card(report: &ReportData) -> String {
    let s = &report.scores;
    let lh = &report.quality.scores;
    let tiles = [
        ("On-page", s.onpage.to_string()),
        ("Links", s.links.to_string()),
        ("Performance", s.performance.to_string()),
        ("Usability", s.usability.to_string()),
        ("Social", s.social.to_string()),
        ("Best practices", score_or_dash(lh.best_practices)),
    ]
    .iter()
    .map(|(label, value)| {
        format!(r#"<div class="score-tile"><div class="muted">{label}</div><div class="value">{value}</div></div>"#)
    })
    .collect::<String>();

    let lighthouse_line = format!(
        r#"<p class="muted">Lighthouse: performance {}, accessibility {}, best practices {}, SEO {}</p>"#,
        score_or_dash(lh.performance),
        score_or_dash(lh.accessibility),
        score_or_dash(lh.best_practices),
        score_or_dash(lh.seo),
    );
    card(
        "col-12",
        "Scores",
        "",
        &format!(r#"<div class="scores">{tiles}</div>{lighthouse_line}"#),
    )
}

fn seo_card(report: &ReportData) -> String {
    let onpage = &report.onpage;
    let title_ok = TITLE_LENGTH_RANGE.contains(&onpage.title_length);
    let description_ok = DESCRIPTION_LENGTH_RANGE.contains(&onpage.meta_description_length);
    let verdict = |ok: bool| if ok { "Good" } else { "Adjust" };

    let headings: Vec<String> = onpage
        .headings
        .levels()
        .iter()
        .flat_map(|(tag, texts)| texts.iter().map(move |t| format!("{} {t}", tag.to_uppercase())))
        .collect();
    let hreflangs: Vec<String> = onpage.hreflang.iter().map(|h| h.hreflang.clone()).collect();

    let body = format!(
        r#"{title_row}{title_bar}{description_row}{description_bar}{links_row}{links_bar}
<div style="display:grid; grid-template-columns:1fr 1fr; gap:20px;">
<div><h3>Heading outline</h3>{headings}</div>
<div><h3>Language tags</h3>{hreflangs}<h3>Technologies</h3>{detected}</div>
</div>"#,
        title_row = row(&format!("Title length ({})", onpage.title_length), verdict(title_ok)),
        title_bar = bar(onpage.title_length, *TITLE_LENGTH_RANGE.end()),
        description_row = row(
            &format!("Meta description ({})", onpage.meta_description_length),
            verdict(description_ok)
        ),
        description_bar = bar(onpage.meta_description_length, *DESCRIPTION_LENGTH_RANGE.end()),
        links_row = row("Links total", &report.links.total.to_string()),
        links_bar = bar(report.links.total, 100),
        headings = list(&headings, "No headings"),
        hreflangs = tags(&hreflangs),
        detected = tags(&report.tech.detected),
    );
    card(
        "col-8",
        "SEO analysis",
        &badge(
            if report.scores.onpage > 80 { "status-ok" } else { "status-info" },
            &format!("On-page score: {}", report.scores.onpage),
        ),
        &body,
    )
}

fn lighthouse_card(report: &ReportData) -> String {
    let m = &report.quality.metrics;
    let metric = |value: &Option<String>| or_dash(value.as_deref().unwrap_or_default());
    let body = [
        row("Largest Contentful Paint", &metric(&m.largest_contentful_paint)),
        row("First Contentful Paint", &metric(&m.first_contentful_paint)),
        row("Cumulative Layout Shift", &metric(&m.cumulative_layout_shift)),
        row("Total Blocking Time", &metric(&m.total_blocking_time)),
        row("Speed Index", &metric(&m.speed_index)),
        row("Time to Interactive", &metric(&m.time_to_interactive)),
        "<h3>Desktop screenshot</h3>".to_string(),
        screenshot(&report.screenshots.desktop, "Desktop", "No screenshot"),
    ]
    .concat();
    let status = match &report.quality.error {
        Some(e) => badge("status-bad", &esc(e)),
        None => String::new(),
    };
    card("col-4", "Lighthouse metrics", &status, &body)
}

fn links_card(report: &ReportData) -> String {
    let l = &report.links;
    let broken: Vec<String> = l
        .broken_samples
        .iter()
        .map(|b| format!("{} ({})", b.href, b.http_status))
        .collect();
    let body = [
        row("Internal", &l.internal.to_string()),
        row("External", &l.external.to_string()),
        row("External follow", &l.external_follow.to_string()),
        row("Nofollow", &l.external_nofollow.to_string()),
        row("Noopener", &l.external_noopener.to_string()),
        row("UGC / sponsored", &format!("{} / {}", l.external_ugc, l.external_sponsored)),
        row("Empty anchors", &l.empty_anchors.to_string()),
        row("\"Click here\" anchors", &l.click_here_anchors.to_string()),
        "<h3>Broken links</h3>".to_string(),
        list(&broken, "No broken links found."),
    ]
    .concat();
    card(
        "col-4",
        "Link status",
        &badge(status_class(l.broken_total == 0), &format!("{} broken", l.broken_total)),
        &body,
    )
}

fn tech_card(report: &ReportData) -> String {
    let t = &report.tech;
    let summary = &report.resource_summary;
    let warnings = report.site.security_headers.warnings(&report.final_url);
    let security: String = SecurityWarning::ALL
        .iter()
        .map(|check| badge(status_class(!warnings.contains(check)), check.label()))
        .collect::<Vec<_>>()
        .join(" ");
    let domains: Vec<String> = summary
        .top_domains
        .iter()
        .map(|d| format!("{} ({})", d.domain, d.count))
        .collect();

    let body = [
        row("Requests", &summary.requests.to_string()),
        row("Page weight", &format_bytes(summary.total_bytes)),
        row("Server", &or_dash(&t.server)),
        row("Powered by", &or_dash(&t.powered_by)),
        row(
            "CMS",
            &badge(
                "status-info",
                &if t.cms.is_empty() { "Unknown".to_string() } else { esc(&t.cms) },
            ),
        ),
        format!("<h3>Frameworks</h3>{}", tags(&t.frameworks)),
        format!("<h3>UI libraries</h3>{}", tags(&t.ui_libraries)),
        format!("<h3>Analytics</h3>{}", tags(&t.analytics)),
        format!("<h3>CDN</h3>{}", tags(&t.cdn)),
        format!("<h3>Top domains</h3>{}", list(&domains, "No resource timing data")),
        format!(r#"<h3>Security</h3><div style="display:flex; gap:8px; flex-wrap:wrap;">{security}</div>"#),
    ]
    .concat();
    card("col-4", "Technology &amp; resources", "", &body)
}

fn health_card(report: &ReportData) -> String {
    let onpage = &report.onpage;
    let robots = &report.site.robots;
    let mixed = report.resource_summary.mixed_content_count;
    let warnings: Vec<&str> = report
        .site
        .security_headers
        .warnings(&report.final_url)
        .iter()
        .map(SecurityWarning::description)
        .collect();

    let body = [
        row(
            "Canonical",
            &badge(
                status_class(!onpage.canonical.is_empty()),
                if onpage.canonical.is_empty() { "Missing" } else { "OK" },
            ),
        ),
        row(
            "robots.txt",
            &badge(
                status_class(robots.allows_target),
                if robots.allows_target { "OK" } else { "Blocked" },
            ),
        ),
        row(
            "Alt texts",
            &badge(
                status_class(onpage.images.missing_alt == 0),
                &format!("{} missing", onpage.images.missing_alt),
            ),
        ),
        row(
            "Mixed content",
            &badge(status_class(mixed == 0), &mixed.to_string()),
        ),
        row(
            "Multiple / empty H1",
            &format!(
                "{} / {}",
                yes_no(onpage.heading_issues.multiple_h1),
                yes_no(onpage.heading_issues.empty_h1)
            ),
        ),
        "<h3>Security warnings</h3>".to_string(),
        list(&warnings, "None"),
    ]
    .concat();
    card("col-4", "Health &amp; issues", "", &body)
}

fn indexing_card(report: &ReportData) -> String {
    let onpage = &report.onpage;
    let site = &report.site;
    let x_robots = if onpage.x_robots_tag.is_empty() {
        &site.robots.x_robots_header
    } else {
        &onpage.x_robots_tag
    };
    let sitemap = match (site.sitemap.urls.first(), site.sitemap.discovered_by_default_probe) {
        (Some(url), true) => format!("{} (default location)", esc(url)),
        (Some(url), false) => esc(url),
        (None, _) => "missing".to_string(),
    };
    let robots_status = match (site.robots.status, &site.robots.error) {
        (Some(status), _) => status.to_string(),
        (None, Some(e)) => esc(e),
        (None, None) => "-".to_string(),
    };
    let hreflang: Vec<String> = onpage
        .hreflang
        .iter()
        .map(|h| format!("{} \u{2192} {}", h.hreflang, h.href))
        .collect();

    let body = [
        row("Meta robots", &or_dash(&onpage.robots_meta.to_lowercase())),
        row("X-Robots-Tag", &or_dash(&x_robots.to_lowercase())),
        row("Googlebot", &or_dash(&onpage.googlebot_meta.to_lowercase())),
        row("robots.txt status", &robots_status),
        row("Disallow rules", &site.robots.disallow_rule_count.to_string()),
        row(
            "Robots allow",
            if site.robots.allows_target { "OK" } else { "Blocked" },
        ),
        row("Sitemap", &sitemap),
        row("Hreflang", &onpage.hreflang.len().to_string()),
        "<h3>Hreflang details</h3>".to_string(),
        list(&hreflang, "None"),
    ]
    .concat();
    card("col-4", "Indexing", "", &body)
}

fn images_card(report: &ReportData) -> String {
    let images = &report.onpage.images;
    let aria = &report.onpage.aria_issues;
    let samples: Vec<&str> = images
        .missing_alt_samples
        .iter()
        .map(|s| s.src.as_str())
        .collect();
    let body = [
        row("Images without alt", &images.missing_alt.to_string()),
        row(
            "With dimensions",
            &format!("{} / {}", images.with_dimensions, images.total),
        ),
        row("Lazy-loaded", &images.lazy.to_string()),
        row("Base64 images", &images.base64.to_string()),
        row("Missing width/height", &images.missing_dimensions.to_string()),
        row("Words", &report.onpage.word_count.to_string()),
        "<h3>Accessibility quick check</h3>".to_string(),
        list(
            [
                format!("{} buttons without a label", aria.buttons_missing_label),
                format!("{} inputs/fields without a label", aria.inputs_missing_label),
                format!("{} elements with tabindex=-1", aria.tabindex_negative),
            ],
            "",
        ),
        "<h3>Missing alt samples</h3>".to_string(),
        list(samples, "None"),
    ]
    .concat();
    card("col-4", "Images &amp; accessibility", "", &body)
}

fn navigation_card(report: &ReportData) -> String {
    let summary = &report.resource_summary;
    let chain: Vec<String> = report
        .redirect_chain
        .iter()
        .map(|hop| match hop.status {
            Some(status) => format!("{} {} ({status})", hop.method, hop.url),
            None => format!("{} {}", hop.method, hop.url),
        })
        .collect();
    let body = [
        row(
            "HTTP status",
            &report
                .http_status
                .map_or_else(|| "unknown".to_string(), |s| s.to_string()),
        ),
        row("Redirect hops", &report.redirect_chain.len().to_string()),
        row("TTFB", &format_ms(report.timings.ttfb)),
        row("DOMContentLoaded", &format_ms(report.timings.dom_content_loaded)),
        row("Load", &format_ms(report.timings.load)),
        row("Cached responses", &summary.cached_count.to_string()),
        row("Missing cache-control", &summary.cache_control_missing.to_string()),
        row("Mixed content", &summary.mixed_content_count.to_string()),
        "<h3>Chain</h3>".to_string(),
        list(&chain, "No redirects"),
    ]
    .concat();
    card("col-4", "Redirects &amp; status", "", &body)
}

fn structured_data_card(report: &ReportData) -> String {
    let data = &report.onpage.structured_data;
    let types: BTreeSet<&str> = data
        .json_ld_types
        .iter()
        .chain(&data.microdata_types)
        .map(String::as_str)
        .collect();
    let joined = types.into_iter().collect::<Vec<_>>().join(", ");
    let body = [
        row(
            "Types",
            &if joined.is_empty() { "None found".to_string() } else { esc(&joined) },
        ),
        row("JSON-LD", &data.json_ld_types.len().to_string()),
        row("Microdata", &data.microdata_types.len().to_string()),
    ]
    .concat();
    card("col-4", "Structured data", "", &body)
}

fn mobile_card(report: &ReportData) -> String {
    card(
        "col-4",
        "Mobile view",
        "",
        &screenshot(&report.screenshots.mobile, "Mobile", "No mobile screenshot"),
    )
}

fn degraded_card(report: &ReportData) -> String {
    if report.degraded_stages.is_empty() {
        return String::new();
    }
    let items: Vec<String> = report
        .degraded_stages
        .iter()
        .map(|d| format!("{}: {}", d.stage, d.reason))
        .collect();
    let complete: Vec<&str> = report.complete_stages().iter().map(|s| s.as_str()).collect();
    let body = format!(
        "{}<p class=\"muted\">Complete: {}</p>",
        list(&items, ""),
        esc(&or_dash(&complete.join(", ")))
    );
    card(
        "col-12",
        "Incomplete data",
        &badge("status-bad", &report.degraded_stages.len().to_string()),
        &body,
    )
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
