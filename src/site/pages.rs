//! Public page templates. Pure functions from content to HTML.

use crate::db::{Fabric, Faq, GalleryItem, Service, Testimonial, setting_keys};

use super::html::{SiteSettings, category_links, escape, format_rubles, layout, stars};
use super::markdown;

/// Outcome banner shown after a contact form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Sent,
    Error,
}

impl Notice {
    pub fn query(self) -> &'static str {
        match self {
            Notice::Sent => "sent=1",
            Notice::Error => "error=1",
        }
    }

    fn render(self) -> &'static str {
        match self {
            Notice::Sent => {
                "<div class=\"notice success\">Спасибо! Мы свяжемся с вами в ближайшее время.</div>"
            }
            Notice::Error => {
                "<div class=\"notice error\">Не удалось отправить заявку. Проверьте имя, email и сообщение.</div>"
            }
        }
    }
}

/// Content of the home page.
#[derive(Debug, Clone, Default)]
pub struct HomeContent {
    /// All active services; featured ones are shown, all are offered in the form.
    pub services: Vec<Service>,
    pub gallery: Vec<GalleryItem>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<Faq>,
}

fn service_card(service: &Service) -> String {
    let mut card = String::from("<article class=\"service\">");
    if let Some(url) = &service.image_url {
        card.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape(url),
            escape(&service.title)
        ));
    }
    card.push_str(&format!(
        "<h3>{}</h3><p>{}</p>",
        escape(&service.title),
        escape(&service.description)
    ));
    if !service.features.is_empty() {
        card.push_str("<ul>");
        for feature in &service.features {
            card.push_str(&format!("<li>{}</li>", escape(feature)));
        }
        card.push_str("</ul>");
    }
    if let Some(price) = service.price_from {
        card.push_str(&format!(
            "<p class=\"price\">от {}</p>",
            format_rubles(price)
        ));
    }
    if let Some(duration) = &service.duration {
        card.push_str(&format!("<p class=\"duration\">{}</p>", escape(duration)));
    }
    card.push_str("</article>");
    card
}

fn gallery_card(item: &GalleryItem) -> String {
    let description = item
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", escape(d)))
        .unwrap_or_default();
    format!(
        "<figure class=\"work\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">\
<figcaption><h3>{}</h3>{}</figcaption></figure>",
        escape(&item.image_url),
        escape(&item.title),
        escape(&item.title),
        description
    )
}

fn testimonial_card(testimonial: &Testimonial) -> String {
    format!(
        "<blockquote class=\"testimonial\"><p>{}</p>\
<footer><span class=\"rating\">{}</span> {}</footer></blockquote>",
        escape(&testimonial.content),
        stars(testimonial.rating),
        escape(&testimonial.client_name)
    )
}

fn fabric_card(fabric: &Fabric) -> String {
    let mut card = String::from("<article class=\"fabric\">");
    if let Some(url) = &fabric.image_url {
        card.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape(url),
            escape(&fabric.name)
        ));
    }
    card.push_str(&format!("<h3>{}</h3>", escape(&fabric.name)));
    for value in [&fabric.composition, &fabric.color, &fabric.description]
        .into_iter()
        .flatten()
    {
        card.push_str(&format!("<p>{}</p>", escape(value)));
    }
    if let Some(price) = fabric.price_per_meter {
        card.push_str(&format!(
            "<p class=\"price\">{} / м</p>",
            format_rubles(price)
        ));
    }
    if !fabric.in_stock {
        card.push_str("<p class=\"stock\">Под заказ</p>");
    }
    card.push_str("</article>");
    card
}

fn section(class: &str, heading: &str, items: String) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("<section class=\"{class}\"><h2>{heading}</h2>{items}</section>")
}

fn faq_section(faqs: &[Faq]) -> String {
    let items: String = faqs
        .iter()
        .map(|faq| {
            format!(
                "<details><summary>{}</summary>{}</details>",
                escape(&faq.question),
                markdown::render(&faq.answer)
            )
        })
        .collect();
    section("faq", "Частые вопросы", items)
}

fn contact_form(services: &[Service]) -> String {
    let options: String = services
        .iter()
        .map(|s| {
            format!(
                "<option value=\"{}\">{}</option>",
                escape(&s.id),
                escape(&s.title)
            )
        })
        .collect();

    format!(
        "<section class=\"contact\" id=\"contact\"><h2>Записаться</h2>\
<form method=\"post\" action=\"/contact\">\
<label>Имя <input name=\"name\" required maxlength=\"200\"></label>\
<label>Email <input name=\"email\" type=\"email\" required></label>\
<label>Телефон <input name=\"phone\" type=\"tel\"></label>\
<label>Услуга <select name=\"service_id\"><option value=\"\">Не выбрана</option>{options}</select></label>\
<label>Тема <input name=\"subject\"></label>\
<label>Сообщение <textarea name=\"message\" required maxlength=\"5000\"></textarea></label>\
<button type=\"submit\">Отправить</button>\
</form></section>"
    )
}

pub fn home(settings: &SiteSettings, content: &HomeContent, notice: Option<Notice>) -> String {
    let hero_title = settings
        .get(setting_keys::HERO_TITLE)
        .unwrap_or(settings.site_name());
    let hero_subtitle = settings
        .get(setting_keys::HERO_SUBTITLE)
        .map(|s| format!("<p>{}</p>", escape(s)))
        .unwrap_or_default();

    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(notice.render());
    }
    body.push_str(&format!(
        "<section class=\"hero\"><h1>{}</h1>{}<a class=\"button\" href=\"#contact\">Записаться</a></section>",
        escape(hero_title),
        hero_subtitle
    ));

    let featured: String = content
        .services
        .iter()
        .filter(|s| s.featured)
        .map(service_card)
        .collect();
    body.push_str(&section("services", "Услуги", featured));
    body.push_str(&section(
        "gallery",
        "Наши работы",
        content.gallery.iter().map(gallery_card).collect(),
    ));
    body.push_str(&section(
        "testimonials",
        "Отзывы",
        content.testimonials.iter().map(testimonial_card).collect(),
    ));
    body.push_str(&faq_section(&content.faqs));
    body.push_str(&contact_form(&content.services));

    layout("", "/", settings, &body)
}

pub fn about(settings: &SiteSettings, services: &[Service], faqs: &[Faq]) -> String {
    let mut body = String::from("<section class=\"about\"><h1>О нас</h1>");
    if let Some(text) = settings.get(setting_keys::ABOUT_TEXT) {
        body.push_str(&markdown::render(text));
    }
    body.push_str("</section>");
    body.push_str(&section(
        "services",
        "Услуги",
        services.iter().map(service_card).collect(),
    ));
    body.push_str(&faq_section(faqs));

    layout("О нас", "/about", settings, &body)
}

pub fn gallery(
    settings: &SiteSettings,
    items: &[GalleryItem],
    categories: &[String],
    selected: Option<&str>,
) -> String {
    let mut body = String::from("<h1>Галерея</h1>");
    body.push_str(&category_links("/gallery", categories, selected));
    if items.is_empty() {
        body.push_str("<p class=\"empty\">Здесь пока ничего нет.</p>");
    } else {
        body.push_str("<div class=\"grid\">");
        body.extend(items.iter().map(gallery_card));
        body.push_str("</div>");
    }

    layout("Галерея", "/gallery", settings, &body)
}

pub fn fabrics(
    settings: &SiteSettings,
    fabrics: &[Fabric],
    categories: &[String],
    selected: Option<&str>,
) -> String {
    let mut body = String::from("<h1>Ткани</h1>");
    body.push_str(&category_links("/fabrics", categories, selected));
    if fabrics.is_empty() {
        body.push_str("<p class=\"empty\">Здесь пока ничего нет.</p>");
    } else {
        body.push_str("<div class=\"grid\">");
        body.extend(fabrics.iter().map(fabric_card));
        body.push_str("</div>");
    }

    layout("Ткани", "/fabrics", settings, &body)
}
