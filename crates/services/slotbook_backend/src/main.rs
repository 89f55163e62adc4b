// File: services/slotbook_backend/src/main.rs
use axum::{routing::get, Router};
use slotbook_common::logging;
use slotbook_common::services::ServiceFactory;
use slotbook_config::load_config;
use slotbook_db::{DbClientFactory, SqlStores};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod service_factory;
use service_factory::SlotbookServiceFactory;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    logging::init();

    // Database bootstrap: a local SQLite file unless configured otherwise
    let db_factory = DbClientFactory::new();
    let db_client = match config.database.as_ref() {
        Some(_) => db_factory.from_app_config(&config).await,
        None => db_factory.from_url("sqlite:slotbook.db").await,
    }
    .expect("Failed to connect to database");

    let stores = SqlStores::new(db_client);
    stores
        .init_schema()
        .await
        .expect("Failed to initialize database schema");

    let factory = SlotbookServiceFactory::new(config.clone());
    let notifier = factory.notification_service();

    let api_router = Router::new().route("/", get(|| async { "Welcome to the Slotbook API!" }));

    #[cfg(feature = "booking")]
    let booking_router =
        slotbook_booking::routes::routes(config.clone(), stores.clone(), notifier.clone());
    #[cfg(feature = "calendar")]
    let calendar_router = slotbook_calendar::routes::routes(
        config.clone(),
        stores.days.clone(),
        stores.window.clone(),
    );
    #[cfg(feature = "notify")]
    let notify_router = notifier
        .clone()
        .map(|n| slotbook_notify::routes::routes(config.clone(), n, stores.bookings.clone()));

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "booking")]
        {
            router = router.merge(booking_router);
        }
        #[cfg(feature = "calendar")]
        {
            router = router.merge(calendar_router);
        }
        #[cfg(feature = "notify")]
        {
            if let Some(notify_router) = notify_router {
                router = router.merge(notify_router);
            }
        }
        router
    });

    #[allow(unused_mut)] // mutated when the openapi feature is enabled
    let mut app = api_router.layer(CorsLayer::permissive());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "booking")]
        use slotbook_booking::doc::BookingApiDoc;
        #[cfg(feature = "calendar")]
        use slotbook_calendar::doc::CalendarApiDoc;
        #[cfg(feature = "notify")]
        use slotbook_notify::doc::NotifyApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Slotbook API",
                version = "0.1.0",
                description = "Studio booking service API docs",
            ),
            components(),
            tags( (name = "Slotbook", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "booking")]
        openapi_doc.merge(BookingApiDoc::openapi());
        #[cfg(feature = "calendar")]
        openapi_doc.merge(CalendarApiDoc::openapi());
        #[cfg(feature = "notify")]
        openapi_doc.merge(NotifyApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
