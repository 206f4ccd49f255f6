//! HTML building blocks shared by the public pages.

use std::collections::HashMap;

use crate::db::{Setting, setting_keys};

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whole rubles with thin-space thousands grouping: `15 000 ₽`.
pub fn format_rubles(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}\u{a0}₽")
}

/// Five stars, `rating` of them filled.
pub fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Site settings as read by the templates, with fallbacks for missing keys.
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    values: HashMap<String, String>,
}

impl SiteSettings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn site_name(&self) -> &str {
        self.get(setting_keys::SITE_NAME).unwrap_or("Ателье")
    }
}

impl From<Vec<Setting>> for SiteSettings {
    fn from(settings: Vec<Setting>) -> Self {
        Self {
            values: settings.into_iter().map(|s| (s.key, s.value)).collect(),
        }
    }
}

const NAV: &[(&str, &str)] = &[
    ("/", "Главная"),
    ("/about", "О нас"),
    ("/gallery", "Галерея"),
    ("/fabrics", "Ткани"),
];

/// Wrap a page body in the shared document shell.
pub fn layout(title: &str, current: &str, settings: &SiteSettings, body: &str) -> String {
    let site_name = escape(settings.site_name());
    let page_title = if title.is_empty() {
        site_name.clone()
    } else {
        format!("{} | {}", escape(title), site_name)
    };

    let nav: String = NAV
        .iter()
        .map(|(href, label)| {
            let class = if *href == current { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect();

    let contacts: String = [
        (setting_keys::CONTACT_PHONE, "Телефон"),
        (setting_keys::CONTACT_EMAIL, "Email"),
        (setting_keys::CONTACT_ADDRESS, "Адрес"),
    ]
    .iter()
    .filter_map(|(key, label)| {
        settings
            .get(key)
            .map(|value| format!("<li>{}: {}</li>", label, escape(value)))
    })
    .collect();

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"ru\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{page_title}</title>\n\
<link rel=\"stylesheet\" href=\"/css/site.css\">\n\
</head>\n\
<body>\n\
<header><a class=\"brand\" href=\"/\">{site_name}</a><nav>{nav}</nav></header>\n\
<main>\n{body}\n</main>\n\
<footer><ul class=\"contacts\">{contacts}</ul><p>&copy; {site_name}</p></footer>\n\
</body>\n\
</html>\n"
    )
}

/// Category filter links; the selected one is marked active.
pub fn category_links(base: &str, categories: &[String], selected: Option<&str>) -> String {
    if categories.is_empty() {
        return String::new();
    }
    let mut out = String::from("<nav class=\"categories\">");
    let all_class = if selected.is_none() { " class=\"active\"" } else { "" };
    out.push_str(&format!("<a href=\"{base}\"{all_class}>Все</a>"));
    for category in categories {
        let class = if selected == Some(category.as_str()) {
            " class=\"active\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<a href=\"{base}?category={}\"{class}>{}</a>",
            escape(&encode_query_value(category)),
            escape(category)
        ));
    }
    out.push_str("</nav>");
    out
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass).
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
