//! API route configuration.

use std::path::PathBuf;

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, patch, post, put};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::ErrorResponse;
use super::session::require_admin;
use super::state::AppState;
use super::v1::{self, *};
use super::websocket;
use crate::db::Database;
use crate::site;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelier API",
        version = "0.3.0",
        description = "Content management API for the atelier site",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::health,
        v1::login,
        v1::logout,
        v1::me,
        v1::change_password,
        v1::submit_contact,
        v1::public_services,
        v1::public_gallery,
        v1::public_fabrics,
        v1::public_testimonials,
        v1::public_faqs,
        v1::list_contacts,
        v1::get_contact,
        v1::create_contact,
        v1::update_contact,
        v1::set_contact_status,
        v1::delete_contact,
        v1::list_events,
        v1::event_calendar,
        v1::get_event,
        v1::create_event,
        v1::update_event,
        v1::delete_event,
        v1::list_fabrics,
        v1::get_fabric,
        v1::create_fabric,
        v1::update_fabric,
        v1::delete_fabric,
        v1::toggle_fabric_active,
        v1::toggle_fabric_featured,
        v1::list_faqs,
        v1::get_faq,
        v1::create_faq,
        v1::update_faq,
        v1::delete_faq,
        v1::toggle_faq_active,
        v1::list_gallery,
        v1::get_gallery_item,
        v1::create_gallery_item,
        v1::reorder_gallery,
        v1::update_gallery_item,
        v1::delete_gallery_item,
        v1::toggle_gallery_active,
        v1::toggle_gallery_featured,
        v1::list_services,
        v1::get_service,
        v1::create_service,
        v1::update_service,
        v1::delete_service,
        v1::toggle_service_active,
        v1::toggle_service_featured,
        v1::list_testimonials,
        v1::get_testimonial,
        v1::create_testimonial,
        v1::update_testimonial,
        v1::delete_testimonial,
        v1::toggle_testimonial_active,
        v1::toggle_testimonial_featured,
        v1::list_settings,
        v1::update_settings,
        v1::delete_setting,
        v1::get_stats,
    ),
    components(
        schemas(
            ErrorResponse,
            SuccessResponse,
            HealthResponse,
            UserResponse,
            LoginRequest,
            LoginResponse,
            ChangePasswordRequest,
            ContactFormRequest,
            ContactFormResponse,
            ContactResponse,
            ContactRequest,
            ContactStatusRequest,
            PaginatedContacts,
            EventResponse,
            EventRequest,
            PaginatedEvents,
            MonthRef,
            CalendarDay,
            CalendarResponse,
            FabricResponse,
            FabricRequest,
            PaginatedFabrics,
            FaqResponse,
            FaqRequest,
            PaginatedFaqs,
            GalleryItemResponse,
            GalleryItemRequest,
            ReorderItem,
            ReorderRequest,
            PaginatedGalleryItems,
            ServiceResponse,
            ServiceRequest,
            PaginatedServices,
            TestimonialResponse,
            TestimonialRequest,
            PaginatedTestimonials,
            SettingResponse,
            StatsResponse,
        )
    ),
    tags(
        (name = "system", description = "System health"),
        (name = "auth", description = "Admin login and sessions"),
        (name = "public", description = "Contact form and public listings"),
        (name = "contacts", description = "Contact request inbox"),
        (name = "events", description = "Appointments calendar"),
        (name = "fabrics", description = "Fabric catalog"),
        (name = "faqs", description = "Frequently asked questions"),
        (name = "gallery", description = "Gallery of finished work"),
        (name = "services", description = "Services offered"),
        (name = "testimonials", description = "Client reviews"),
        (name = "settings", description = "Site settings"),
        (name = "dashboard", description = "Admin dashboard counters")
    )
)]
pub struct ApiDoc;

/// Create the application router.
///
/// `public_dir`, when given, is served for any path no route claims
/// (stylesheets, uploaded images).
pub fn create_router<D: Database + 'static>(
    state: AppState<D>,
    public_dir: Option<PathBuf>,
) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new()
        .route("/health", get(v1::health))
        .route("/ws", get(websocket::ws_handler::<D>));

    let open_routes = routes!(D => {
        post "/api/v1/auth/login" => v1::login,
        post "/api/v1/auth/logout" => v1::logout,
        post "/api/v1/contact" => v1::submit_contact,
        get "/api/v1/public/services" => v1::public_services,
        get "/api/v1/public/gallery" => v1::public_gallery,
        get "/api/v1/public/fabrics" => v1::public_fabrics,
        get "/api/v1/public/testimonials" => v1::public_testimonials,
        get "/api/v1/public/faqs" => v1::public_faqs,
    });

    let account_routes = routes!(D => {
        put "/api/v1/auth/password" => v1::change_password,
    })
    .route("/api/v1/auth/me", get(v1::me));

    let admin_routes = routes!(D => {
        get "/contacts" => v1::list_contacts,
        post "/contacts" => v1::create_contact,
        get "/contacts/{id}" => v1::get_contact,
        put "/contacts/{id}" => v1::update_contact,
        delete "/contacts/{id}" => v1::delete_contact,
        patch "/contacts/{id}/status" => v1::set_contact_status,

        get "/events" => v1::list_events,
        post "/events" => v1::create_event,
        get "/events/calendar" => v1::event_calendar,
        get "/events/{id}" => v1::get_event,
        put "/events/{id}" => v1::update_event,
        delete "/events/{id}" => v1::delete_event,

        get "/fabrics" => v1::list_fabrics,
        post "/fabrics" => v1::create_fabric,
        get "/fabrics/{id}" => v1::get_fabric,
        put "/fabrics/{id}" => v1::update_fabric,
        delete "/fabrics/{id}" => v1::delete_fabric,
        post "/fabrics/{id}/toggle-active" => v1::toggle_fabric_active,
        post "/fabrics/{id}/toggle-featured" => v1::toggle_fabric_featured,

        get "/faqs" => v1::list_faqs,
        post "/faqs" => v1::create_faq,
        get "/faqs/{id}" => v1::get_faq,
        put "/faqs/{id}" => v1::update_faq,
        delete "/faqs/{id}" => v1::delete_faq,
        post "/faqs/{id}/toggle-active" => v1::toggle_faq_active,

        get "/gallery" => v1::list_gallery,
        post "/gallery" => v1::create_gallery_item,
        put "/gallery/reorder" => v1::reorder_gallery,
        get "/gallery/{id}" => v1::get_gallery_item,
        put "/gallery/{id}" => v1::update_gallery_item,
        delete "/gallery/{id}" => v1::delete_gallery_item,
        post "/gallery/{id}/toggle-active" => v1::toggle_gallery_active,
        post "/gallery/{id}/toggle-featured" => v1::toggle_gallery_featured,

        get "/services" => v1::list_services,
        post "/services" => v1::create_service,
        get "/services/{id}" => v1::get_service,
        put "/services/{id}" => v1::update_service,
        delete "/services/{id}" => v1::delete_service,
        post "/services/{id}/toggle-active" => v1::toggle_service_active,
        post "/services/{id}/toggle-featured" => v1::toggle_service_featured,

        get "/testimonials" => v1::list_testimonials,
        post "/testimonials" => v1::create_testimonial,
        get "/testimonials/{id}" => v1::get_testimonial,
        put "/testimonials/{id}" => v1::update_testimonial,
        delete "/testimonials/{id}" => v1::delete_testimonial,
        post "/testimonials/{id}/toggle-active" => v1::toggle_testimonial_active,
        post "/testimonials/{id}/toggle-featured" => v1::toggle_testimonial_featured,

        get "/settings" => v1::list_settings,
        put "/settings" => v1::update_settings,
        delete "/settings/{key}" => v1::delete_setting,

        get "/stats" => v1::get_stats,
    });

    let protected = Router::new()
        .nest("/api/v1/admin", admin_routes)
        .merge(account_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin::<D>,
        ));

    let router = system_routes
        .merge(open_routes)
        .merge(protected)
        .merge(site::router::<D>())
        .merge(Scalar::with_url("/docs", api))
        .with_state(state);

    match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}
