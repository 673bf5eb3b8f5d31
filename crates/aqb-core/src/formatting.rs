//! Small helpers for Telegram HTML output.

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Section heading followed by a horizontal rule line.
pub fn section_heading(icon: &str, title: &str) -> String {
    format!("{icon} <b>{}</b>\n{RULE}\n", escape_html(title))
}

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━";

/// Render a concentration without a trailing `.0` for whole numbers.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Display label for a WAQI pollutant code (`pm25` → `PM2.5`).
pub fn pollutant_label(code: &str) -> String {
    match code {
        "pm25" => "PM2.5".to_string(),
        "pm10" => "PM10".to_string(),
        other => other.to_uppercase(),
    }
}

/// Shorten Telegram HTML to at most `max` characters, ending in `…`.
///
/// Cuts at the last line break that fits so rendered lines stay whole. A line
/// cut mid-way loses any partial tag or entity and gets its open tags closed.
pub fn truncate_html(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut budget = max.saturating_sub(1);
    loop {
        let mut kept: String = text.chars().take(budget).collect();
        match kept.rfind('\n') {
            Some(nl) if nl > 0 => kept.truncate(nl),
            _ => drop_partial_markup(&mut kept),
        }
        let closing = closing_tags(&kept);

        let used = kept.chars().count() + closing.chars().count() + 1;
        if used <= max || budget == 0 {
            kept.push_str(&closing);
            kept.push('…');
            return kept;
        }
        budget = budget.saturating_sub(used - max);
    }
}

fn drop_partial_markup(html: &mut String) {
    if let Some(lt) = html.rfind('<') {
        if !html[lt..].contains('>') {
            html.truncate(lt);
        }
    }
    if let Some(amp) = html.rfind('&') {
        if !html[amp..].contains(';') {
            html.truncate(amp);
        }
    }
}

/// Closing tags for every element still open at the end of `html`.
fn closing_tags(html: &str) -> String {
    let mut open: Vec<&str> = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };
        let tag = &after[..end];
        if let Some(name) = tag.strip_prefix('/') {
            if let Some(pos) = open.iter().rposition(|o| *o == name.trim()) {
                open.truncate(pos);
            }
        } else if let Some(name) = tag.split_whitespace().next() {
            open.push(name);
        }
        rest = &after[end + 1..];
    }
    open.iter().rev().map(|name| format!("</{name}>")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html() {
        let s = r#"<a href="x&y">"#;
        assert_eq!(escape_html(s), "&lt;a href=&quot;x&amp;y&quot;&gt;");
    }

    #[test]
    fn whole_numbers_drop_fraction() {
        assert_eq!(format_number(55.0), "55");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn pollutant_labels() {
        assert_eq!(pollutant_label("pm25"), "PM2.5");
        assert_eq!(pollutant_label("no2"), "NO2");
    }

    #[test]
    fn short_html_is_untouched() {
        assert_eq!(truncate_html("<b>hi</b>", 9), "<b>hi</b>");
    }

    #[test]
    fn truncation_prefers_line_boundaries() {
        let html = "<b>aaaa</b>\n<b>bbbbbbbb</b>";
        assert_eq!(truncate_html(html, 20), "<b>aaaa</b>…");
    }

    #[test]
    fn truncation_inside_a_line_closes_open_tags() {
        let out = truncate_html("<b>0123456789</b>", 10);
        assert_eq!(out, "<b>01</b>…");
        assert!(out.chars().count() <= 10);

        let out = truncate_html("<b><i>0123456789</i></b>", 16);
        assert_eq!(out, "<b><i>0</i></b>…");
    }

    #[test]
    fn truncation_never_splits_tags_or_entities() {
        assert_eq!(truncate_html("a &amp; bcdefgh", 6), "a …");
        assert_eq!(truncate_html("ab<b>cdefgh</b>", 5), "ab…");
    }

    #[test]
    fn truncated_report_stays_balanced() {
        let line = format!("📍 <b>{}</b>: 42 &amp; more\n", "Jakarta Selatan");
        let html = line.repeat(200);
        for max in [50, 97, 333, 1000, 4096] {
            let out = truncate_html(&html, max);
            assert!(out.chars().count() <= max, "{max}");
            assert_eq!(out.matches("<b>").count(), out.matches("</b>").count(), "{max}");
            assert!(out.ends_with('…'));
        }
    }
}
