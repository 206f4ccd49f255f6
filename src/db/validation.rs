//! Input validation for domain models.
//!
//! Every entity is validated before it reaches storage. Messages are shown
//! to site visitors and admins verbatim, so they are short and in Russian.

use crate::db::{
    Contact, DbError, DbResult, Event, Fabric, Faq, GalleryItem, Service, Setting, Testimonial,
    User,
};

/// Types that can check their own invariants before being persisted.
pub trait Validate {
    fn validate(&self) -> DbResult<()>;
}

fn require(value: &str, message: &str) -> DbResult<()> {
    if value.trim().is_empty() {
        return Err(DbError::validation(message));
    }
    Ok(())
}

fn max_len(value: &str, max: usize, message: &str) -> DbResult<()> {
    if value.chars().count() > max {
        return Err(DbError::validation(message));
    }
    Ok(())
}

fn non_negative(value: Option<i64>, message: &str) -> DbResult<()> {
    if value.is_some_and(|v| v < 0) {
        return Err(DbError::validation(message));
    }
    Ok(())
}

/// Loose structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Image references are absolute http(s) URLs or site-relative paths.
pub fn is_valid_image_url(url: &str) -> bool {
    url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://")
}

/// Slugs are lowercase ascii letters, digits and single dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn optional_image(url: Option<&String>) -> DbResult<()> {
    match url {
        Some(u) if !u.is_empty() && !is_valid_image_url(u) => {
            Err(DbError::validation("Некорректная ссылка на изображение"))
        }
        _ => Ok(()),
    }
}

fn email(value: &str) -> DbResult<()> {
    require(value, "Укажите email")?;
    if !is_valid_email(value.trim()) {
        return Err(DbError::validation("Некорректный email"));
    }
    Ok(())
}

impl Validate for User {
    fn validate(&self) -> DbResult<()> {
        email(&self.email)?;
        require(&self.name, "Укажите имя")?;
        require(&self.password_hash, "Пароль не задан")
    }
}

impl Validate for Contact {
    fn validate(&self) -> DbResult<()> {
        require(&self.name, "Укажите имя")?;
        max_len(&self.name, 200, "Имя слишком длинное")?;
        email(&self.email)?;
        require(&self.message, "Введите сообщение")?;
        max_len(&self.message, 5000, "Сообщение слишком длинное")
    }
}

impl Validate for Event {
    fn validate(&self) -> DbResult<()> {
        require(&self.title, "Укажите название события")?;
        if let Some(end) = self.end_at
            && end < self.start_at
        {
            return Err(DbError::validation(
                "Окончание события не может быть раньше начала",
            ));
        }
        Ok(())
    }
}

impl Validate for Fabric {
    fn validate(&self) -> DbResult<()> {
        require(&self.name, "Укажите название ткани")?;
        require(&self.category, "Укажите категорию")?;
        non_negative(self.price_per_meter, "Цена не может быть отрицательной")?;
        non_negative(Some(self.order), "Порядок не может быть отрицательным")?;
        optional_image(self.image_url.as_ref())
    }
}

impl Validate for Faq {
    fn validate(&self) -> DbResult<()> {
        require(&self.question, "Укажите вопрос")?;
        require(&self.answer, "Укажите ответ")?;
        non_negative(Some(self.order), "Порядок не может быть отрицательным")
    }
}

impl Validate for GalleryItem {
    fn validate(&self) -> DbResult<()> {
        require(&self.title, "Укажите название работы")?;
        require(&self.category, "Укажите категорию")?;
        require(&self.image_url, "Добавьте изображение")?;
        if !is_valid_image_url(&self.image_url) {
            return Err(DbError::validation("Некорректная ссылка на изображение"));
        }
        non_negative(Some(self.order), "Порядок не может быть отрицательным")
    }
}

impl Validate for Service {
    fn validate(&self) -> DbResult<()> {
        require(&self.title, "Укажите название услуги")?;
        require(&self.description, "Укажите описание услуги")?;
        if !is_valid_slug(&self.slug) {
            return Err(DbError::validation(
                "Адрес услуги может содержать только латинские буквы, цифры и дефис",
            ));
        }
        non_negative(self.price_from, "Цена не может быть отрицательной")?;
        non_negative(Some(self.order), "Порядок не может быть отрицательным")?;
        optional_image(self.image_url.as_ref())
    }
}

impl Validate for Testimonial {
    fn validate(&self) -> DbResult<()> {
        require(&self.client_name, "Укажите имя клиента")?;
        require(&self.content, "Введите текст отзыва")?;
        if !(1..=5).contains(&self.rating) {
            return Err(DbError::validation("Оценка должна быть от 1 до 5"));
        }
        non_negative(Some(self.order), "Порядок не может быть отрицательным")?;
        optional_image(self.image_url.as_ref())
    }
}

impl Validate for Setting {
    fn validate(&self) -> DbResult<()> {
        require(&self.key, "Укажите ключ настройки")?;
        max_len(&self.key, 100, "Ключ настройки слишком длинный")
    }
}
