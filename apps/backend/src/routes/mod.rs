use actix_web::web;

pub mod games;
pub mod health;
pub mod realtime;

/// Register every route. `main.rs` and the integration tests share this so
/// both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Polling interface: /api/game/**
    cfg.service(web::scope("/api/game").configure(games::configure_routes));

    // Push interface: /api/ws
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));
}
