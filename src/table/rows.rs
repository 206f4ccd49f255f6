//! [`TableRow`] for the admin-managed entities.

use super::{SortValue, TableRow};
use crate::db::{
    Contact, Event, Fabric, Faq, GalleryItem, Service, Setting, Testimonial, User,
};

impl TableRow for Contact {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.message.as_str()];
        fields.extend(self.phone.as_deref());
        fields.extend(self.subject.as_deref());
        fields
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "name" => SortValue::text(&self.name),
            "email" => SortValue::text(&self.email),
            "status" => SortValue::text(&self.status.to_string()),
            "created_at" => SortValue::text(&self.created_at),
            "updated_at" => SortValue::text(&self.updated_at),
            _ => return None,
        })
    }
}

impl TableRow for Event {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.location.as_deref());
        fields
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "title" => SortValue::text(&self.title),
            "event_type" => SortValue::text(&self.event_type.to_string()),
            "status" => SortValue::text(&self.status.to_string()),
            "start_at" => SortValue::Int(self.start_at.and_utc().timestamp()),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}

impl TableRow for Fabric {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.category.as_str()];
        fields.extend(self.composition.as_deref());
        fields.extend(self.color.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "name" => SortValue::text(&self.name),
            "category" => SortValue::text(&self.category),
            "price_per_meter" => SortValue::optional_int(self.price_per_meter),
            "in_stock" => SortValue::Bool(self.in_stock),
            "featured" => SortValue::Bool(self.featured),
            "active" => SortValue::Bool(self.active),
            "order" => SortValue::Int(self.order),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}

impl TableRow for Faq {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.question.as_str(), self.answer.as_str()];
        fields.extend(self.category.as_deref());
        fields
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "question" => SortValue::text(&self.question),
            "category" => SortValue::optional_text(self.category.as_deref()),
            "active" => SortValue::Bool(self.active),
            "order" => SortValue::Int(self.order),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}

impl TableRow for GalleryItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.category.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "title" => SortValue::text(&self.title),
            "category" => SortValue::text(&self.category),
            "featured" => SortValue::Bool(self.featured),
            "active" => SortValue::Bool(self.active),
            "order" => SortValue::Int(self.order),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}

impl TableRow for Service {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.slug.as_str(),
            self.description.as_str(),
        ]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "title" => SortValue::text(&self.title),
            "slug" => SortValue::text(&self.slug),
            "price_from" => SortValue::optional_int(self.price_from),
            "featured" => SortValue::Bool(self.featured),
            "active" => SortValue::Bool(self.active),
            "order" => SortValue::Int(self.order),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}

impl TableRow for Testimonial {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.client_name.as_str(), self.content.as_str()]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "client_name" => SortValue::text(&self.client_name),
            "rating" => SortValue::Int(self.rating),
            "featured" => SortValue::Bool(self.featured),
            "active" => SortValue::Bool(self.active),
            "order" => SortValue::Int(self.order),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}

impl TableRow for Setting {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.key.as_str(), self.value.as_str()]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "key" => SortValue::text(&self.key),
            "updated_at" => SortValue::text(&self.updated_at),
            _ => return None,
        })
    }
}

impl TableRow for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str(), self.name.as_str()]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        Some(match field {
            "email" => SortValue::text(&self.email),
            "name" => SortValue::text(&self.name),
            "created_at" => SortValue::text(&self.created_at),
            _ => return None,
        })
    }
}
