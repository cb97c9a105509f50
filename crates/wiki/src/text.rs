//! Text helpers for upstream payloads: snippet markup, URLs, word counts.

/// Remove HTML tags and decode the handful of entities search snippets use.
///
/// Search snippets wrap matches in `<span class="searchmatch">` and escape
/// quotes and ampersands; everything else passes through.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Build a `/wiki/<Title>` URL under `base`, percent-encoding the title.
///
/// Spaces become underscores the way the encyclopedia links its pages.
pub fn article_url(base: &str, title: &str) -> String {
    let slug = title.trim().replace(' ', "_");

    match reqwest::Url::parse(base) {
        Ok(mut url) if !url.cannot_be_a_base() => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(&slug);
            }
            url.to_string()
        }
        _ => format!("{}{}", base, slug),
    }
}

/// Whitespace-delimited word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
