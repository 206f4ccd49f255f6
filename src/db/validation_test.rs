//! Tests for entity validation.

use chrono::NaiveDate;

use crate::db::{
    Contact, ContactStatus, DbError, Event, EventStatus, EventType, GalleryItem, Service,
    Testimonial, Validate, is_valid_email, is_valid_slug,
};

fn contact(name: &str, email: &str, message: &str) -> Contact {
    Contact {
        id: String::new(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        subject: None,
        message: message.to_string(),
        service_id: None,
        status: ContactStatus::New,
        notes: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn validation_message(err: DbError) -> String {
    match err {
        DbError::Validation { message } => message,
        other => panic!("Expected Validation, got {:?}", other),
    }
}

#[test]
fn email_format() {
    assert!(is_valid_email("anna@example.com"));
    assert!(is_valid_email("a.b+c@mail.example.ru"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("anna"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("anna@example"));
    assert!(!is_valid_email("anna@@example.com"));
    assert!(!is_valid_email("an na@example.com"));
    assert!(!is_valid_email("anna@.com"));
}

#[test]
fn contact_requires_email() {
    let err = contact("Анна", "", "Хочу сшить платье")
        .validate()
        .unwrap_err();
    assert_eq!(validation_message(err), "Укажите email");

    let err = contact("Анна", "not-an-email", "Хочу сшить платье")
        .validate()
        .unwrap_err();
    assert_eq!(validation_message(err), "Некорректный email");
}

#[test]
fn contact_requires_name_and_message() {
    assert!(contact("  ", "anna@example.com", "text").validate().is_err());
    assert!(contact("Анна", "anna@example.com", "").validate().is_err());
    assert!(
        contact("Анна", "anna@example.com", "Хочу сшить платье")
            .validate()
            .is_ok()
    );
}

#[test]
fn event_end_must_not_precede_start() {
    let start = NaiveDate::from_ymd_opt(2026, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let mut event = Event {
        id: String::new(),
        title: "Примерка".to_string(),
        description: None,
        event_type: EventType::Fitting,
        status: EventStatus::Scheduled,
        start_at: start,
        end_at: Some(start - chrono::Duration::hours(1)),
        all_day: false,
        location: None,
        contact_id: None,
        created_at: String::new(),
        updated_at: String::new(),
    };
    assert!(event.validate().is_err());

    event.end_at = Some(start + chrono::Duration::hours(1));
    assert!(event.validate().is_ok());

    event.end_at = None;
    assert!(event.validate().is_ok());
}

#[test]
fn testimonial_rating_range() {
    let mut t = Testimonial {
        id: String::new(),
        client_name: "Мария".to_string(),
        content: "Отличная работа".to_string(),
        rating: 0,
        service_id: None,
        image_url: None,
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    assert!(t.validate().is_err());
    t.rating = 6;
    assert!(t.validate().is_err());
    t.rating = 5;
    assert!(t.validate().is_ok());
}

#[test]
fn slug_format() {
    assert!(is_valid_slug("individualnyj-poshiv"));
    assert!(is_valid_slug("remont2"));
    assert!(!is_valid_slug(""));
    assert!(!is_valid_slug("Poshiv"));
    assert!(!is_valid_slug("-poshiv"));
    assert!(!is_valid_slug("poshiv--odezhdy"));
    assert!(!is_valid_slug("пошив"));
}

#[test]
fn service_rejects_bad_slug_and_negative_price() {
    let mut s = Service {
        id: String::new(),
        title: "Пошив".to_string(),
        slug: "poshiv".to_string(),
        description: "Индивидуальный пошив".to_string(),
        price_from: Some(5000),
        duration: None,
        features: vec![],
        image_url: None,
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    assert!(s.validate().is_ok());

    s.price_from = Some(-1);
    assert!(s.validate().is_err());

    s.price_from = None;
    s.slug = "Bad Slug".to_string();
    assert!(s.validate().is_err());
}

#[test]
fn gallery_item_requires_image_reference() {
    let mut item = GalleryItem {
        id: String::new(),
        title: "Пальто".to_string(),
        description: None,
        image_url: String::new(),
        category: "coats".to_string(),
        tags: vec![],
        fabric_ids: vec![],
        featured: false,
        active: true,
        order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    assert!(item.validate().is_err());

    item.image_url = "javascript:alert(1)".to_string();
    assert!(item.validate().is_err());

    item.image_url = "/uploads/gallery/coat.jpg".to_string();
    assert!(item.validate().is_ok());
}
