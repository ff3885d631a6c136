//! HTML rendering
//!
//! Pure functions from [`Resolution`] to a complete page. Every value coming
//! from the backend goes through [`escape_html`], and only http(s) URLs are
//! ever placed in `href`/`src` attributes.

use pr0sauce_common::ItemRecord;

use crate::services::Resolution;

const SITE_NAME: &str = "pr0sauce";
const GITHUB_URL: &str = "https://github.com/Pacerino/pr0music";
const PR0GRAMM_POST_URL: &str = "https://pr0gramm.com/top/4625113";

const STYLESHEET: &str = r#"
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
            -webkit-font-smoothing: antialiased;
            background: #161618;
            color: #f2f5f4;
        }
        a { color: #3b82f6; text-decoration: none; }
        a:hover { text-decoration: underline; }
        nav { background: #1f2937; padding: 1rem; }
        nav .container {
            max-width: 1024px;
            margin: 0 auto;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        nav h1 { margin: 0; font-size: 1.5rem; }
        nav h1 a { color: #f2f5f4; }
        nav .links a { color: #f2f5f4; margin-left: 1rem; }
        main {
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            padding: 1rem;
        }
        .center { text-align: center; }
        .card {
            max-width: 56rem;
            width: 100%;
            background: #2a2e31;
            border-radius: 0.5rem;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.4);
            padding: 1rem;
            display: grid;
            grid-template-columns: 1fr;
            gap: 1rem;
        }
        @media (min-width: 640px) {
            .card { grid-template-columns: 1fr 2fr; }
            .row { display: grid; grid-template-columns: 1fr 2fr; gap: 1rem; }
        }
        .summary { background: #374151; padding: 1.25rem 1.5rem; text-align: center; }
        .summary h3 { margin: 0; font-size: 1.125rem; font-weight: 500; }
        .summary p { margin: 0.25rem 0 0; font-size: 0.875rem; color: #9ca3af; }
        .cover { width: 12rem; height: 12rem; object-fit: cover; border-radius: 0.5rem; margin-top: 1rem; }
        dl { margin: 0; }
        .row { padding: 1.25rem 1.5rem; font-size: 0.875rem; }
        .row:nth-child(odd) { background: #374151; }
        .row:nth-child(even) { background: #1f2937; }
        dt { color: #9ca3af; font-weight: 500; }
        dd { margin: 0; word-break: break-all; }
        .actions { display: flex; gap: 1rem; }
        .button { display: inline-block; color: #fff; padding: 0.5rem 1rem; border-radius: 0.25rem; }
        .button:hover { text-decoration: none; }
        .spotify { background: #22c55e; }
        .spotify:hover { background: #16a34a; }
        .youtube { background: #ef4444; }
        .youtube:hover { background: #dc2626; }
        .spinner {
            display: inline-block;
            width: 2rem;
            height: 2rem;
            border: 4px solid #f2f5f4;
            border-right-color: transparent;
            border-radius: 50%;
            animation: spin 0.75s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        form input {
            padding: 0.5rem;
            border-radius: 0.25rem;
            border: 1px solid #4b5563;
            background: #1f2937;
            color: #f2f5f4;
        }
        form button {
            padding: 0.5rem 1rem;
            border: 0;
            border-radius: 0.25rem;
            background: #3b82f6;
            color: #fff;
            cursor: pointer;
        }
"#;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only http(s) URLs may become links
fn is_web_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Wrap page content in the shared chrome
fn layout(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{site}</title>
    <style>{style}</style>
</head>
<body>
    <nav>
        <div class="container">
            <h1><a href="/">{site}</a></h1>
            <div class="links">
                <a href="{github}" target="_blank" rel="noopener noreferrer">GitHub</a>
                <a href="{post}" target="_blank" rel="noopener noreferrer">pr0gramm Post</a>
            </div>
        </div>
    </nav>
    <main>
{content}
    </main>
</body>
</html>
"#,
        site = SITE_NAME,
        style = STYLESHEET,
        github = GITHUB_URL,
        post = PR0GRAMM_POST_URL,
        content = content,
    )
}

/// Landing page with an item id form
pub fn render_index() -> String {
    layout(
        r#"        <div class="center">
            <h2>Which song was that?</h2>
            <p>Enter a pr0gramm item id to see the recognized song.</p>
            <form action="/lookup" method="get">
                <input type="text" name="id" inputmode="numeric" placeholder="Item ID" required>
                <button type="submit">Look up</button>
            </form>
        </div>"#,
    )
}

/// Render any resolution state as a full page
pub fn render_resolution(resolution: &Resolution) -> String {
    let content = match resolution {
        Resolution::Loading => render_loading(),
        Resolution::Error { message } => render_error(message),
        Resolution::NotFound => render_not_found(),
        Resolution::Success {
            record,
            artwork_url,
        } => render_item(record, artwork_url.as_deref()),
    };
    layout(&content)
}

fn render_loading() -> String {
    r#"        <div class="center">
            <div class="spinner" role="status"></div>
        </div>"#
        .to_string()
}

fn render_error(message: &str) -> String {
    format!(
        r#"        <div class="center">
            <p>Error: {}</p>
        </div>"#,
        escape_html(message)
    )
}

fn render_not_found() -> String {
    r#"        <div class="center">
            <h1>Content Not Found</h1>
            <p>The content you requested could not be found.</p>
        </div>"#
        .to_string()
}

fn render_item(record: &ItemRecord, artwork_url: Option<&str>) -> String {
    let cover = match artwork_url.filter(|url| is_web_url(url)) {
        Some(url) => format!(
            r#"<div><img class="cover" src="{}" alt="{} cover"></div>"#,
            escape_html(url),
            escape_html(&record.title)
        ),
        None => String::new(),
    };

    let source_url = if is_web_url(&record.url) {
        format!(
            r#"<a href="{0}">{0}</a>"#,
            escape_html(&record.url)
        )
    } else {
        escape_html(&record.url)
    };

    let mut actions = String::new();
    if let Some(url) = record.spotify_url.as_deref().filter(|url| is_web_url(url)) {
        actions.push_str(&format!(
            r#"<a class="button spotify" href="{}" target="_blank" rel="noopener noreferrer">Open in Spotify</a>"#,
            escape_html(url)
        ));
    }
    if let Some(url) = record.youtube_url.as_deref().filter(|url| is_web_url(url)) {
        actions.push_str(&format!(
            r#"<a class="button youtube" href="{}" target="_blank" rel="noopener noreferrer">Open in YouTube</a>"#,
            escape_html(url)
        ));
    }

    let rows = [
        ("ID", escape_html(&record.id)),
        (
            "Item ID",
            format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                escape_html(&record.post_url()),
                escape_html(&record.item_id)
            ),
        ),
        ("Album", escape_html(&record.album)),
        ("URL", source_url),
        ("Provider", escape_html(&record.provider)),
        ("Links", format!(r#"<div class="actions">{}</div>"#, actions)),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"                <div class="row"><dt>{}</dt><dd>{}</dd></div>"#,
            label, value
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        r#"        <div class="card">
            <div class="summary">
                <h3>{title}</h3>
                <p>{artist}</p>
                {cover}
            </div>
            <dl>
{rows}
            </dl>
        </div>"#,
        title = escape_html(&record.title),
        artist = escape_html(&record.artist),
        cover = cover,
        rows = rows,
    )
}
