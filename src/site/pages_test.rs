use super::html::SiteSettings;
use super::pages::*;
use crate::db::{Fabric, Faq, GalleryItem, Service, Setting, Testimonial};

fn settings() -> SiteSettings {
    SiteSettings::from(vec![
        Setting {
            key: "site_name".to_string(),
            value: "Ателье".to_string(),
            updated_at: String::new(),
        },
        Setting {
            key: "hero_title".to_string(),
            value: "Одежда по вашим меркам".to_string(),
            updated_at: String::new(),
        },
        Setting {
            key: "about_text".to_string(),
            value: "Работаем **с 2010 года**.".to_string(),
            updated_at: String::new(),
        },
    ])
}

fn service(id: &str, title: &str, featured: bool) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        slug: id.to_string(),
        description: "Описание".to_string(),
        price_from: Some(15000),
        duration: Some("2-3 недели".to_string()),
        features: vec!["Примерки".to_string()],
        image_url: None,
        featured,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn gallery_item(title: &str) -> GalleryItem {
    GalleryItem {
        id: "g1".to_string(),
        title: title.to_string(),
        description: None,
        image_url: "/uploads/coats/coat-1.jpg".to_string(),
        category: "coats".to_string(),
        tags: vec![],
        fabric_ids: vec![],
        featured: true,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn faq() -> Faq {
    Faq {
        id: "f1".to_string(),
        question: "Сколько длится пошив?".to_string(),
        answer: "Обычно *две недели*.".to_string(),
        category: None,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn home_shows_featured_services_and_offers_all_in_form() {
    let content = HomeContent {
        services: vec![
            service("tailoring", "Пошив", true),
            service("repair", "Ремонт", false),
        ],
        gallery: vec![gallery_item("Пальто")],
        testimonials: vec![Testimonial {
            id: "t1".to_string(),
            client_name: "Мария".to_string(),
            content: "Спасибо!".to_string(),
            rating: 5,
            service_id: None,
            image_url: None,
            featured: true,
            active: true,
            order: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }],
        faqs: vec![faq()],
    };

    let page = home(&settings(), &content, None);

    assert!(page.contains("<h1>Одежда по вашим меркам</h1>"));
    assert!(page.contains("<h3>Пошив</h3>"));
    assert!(!page.contains("<h3>Ремонт</h3>"));
    assert!(page.contains("<option value=\"repair\">Ремонт</option>"));
    assert!(page.contains("src=\"/uploads/coats/coat-1.jpg\""));
    assert!(page.contains("★★★★★"));
    assert!(page.contains("<em>две недели</em>"));
    assert!(page.contains("action=\"/contact\""));
    assert!(!page.contains("class=\"notice"));
}

#[test]
fn home_without_content_skips_empty_sections() {
    let page = home(&settings(), &HomeContent::default(), Some(Notice::Sent));

    assert!(page.contains("notice success"));
    assert!(!page.contains("Наши работы"));
    assert!(!page.contains("Отзывы"));
    assert!(page.contains("<form"));
}

#[test]
fn error_notice_is_rendered() {
    let page = home(&settings(), &HomeContent::default(), Some(Notice::Error));
    assert!(page.contains("notice error"));
}

#[test]
fn about_renders_markdown_setting() {
    let page = about(&settings(), &[service("tailoring", "Пошив", false)], &[faq()]);

    assert!(page.contains("<strong>с 2010 года</strong>"));
    assert!(page.contains("<h3>Пошив</h3>"));
    assert!(page.contains("Сколько длится пошив?"));
    assert!(page.contains("<title>О нас | Ателье</title>"));
}

#[test]
fn gallery_escapes_titles_and_shows_categories() {
    let items = vec![gallery_item("<b>Пальто</b>")];
    let categories = vec!["coats".to_string(), "dresses".to_string()];
    let page = gallery(&settings(), &items, &categories, Some("coats"));

    assert!(page.contains("&lt;b&gt;Пальто&lt;/b&gt;"));
    assert!(!page.contains("<b>Пальто</b>"));
    assert!(page.contains("?category=dresses"));
    assert!(page.contains("class=\"active\">coats</a>"));
}

#[test]
fn empty_listings_say_so() {
    assert!(gallery(&settings(), &[], &[], None).contains("Здесь пока ничего нет"));
    assert!(fabrics(&settings(), &[], &[], None).contains("Здесь пока ничего нет"));
}

#[test]
fn fabrics_show_price_and_stock() {
    let fabric = Fabric {
        id: "fa1".to_string(),
        name: "Кашемир".to_string(),
        description: None,
        composition: Some("100% кашемир".to_string()),
        color: None,
        category: "wool".to_string(),
        price_per_meter: Some(4500),
        image_url: None,
        in_stock: false,
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    let page = fabrics(&settings(), &[fabric], &["wool".to_string()], None);

    assert!(page.contains("<h3>Кашемир</h3>"));
    assert!(page.contains("100% кашемир"));
    assert!(page.contains("4\u{202f}500\u{a0}₽ / м"));
    assert!(page.contains("Под заказ"));
}
