use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::infra::state::build_state;
use backend::middleware::{cors_middleware, log_completion, request_trace};
use backend::routes;
use backend::services::sweeper::spawn_sweeper;
use tracing::{info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("tracing already initialised: {e}");
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = build_state().with_config(config.game.clone()).build();

    info!(
        host = %config.host,
        port = config.port,
        time_limit_secs = config.game.time_limit.as_secs(),
        seeded = config.game.rng_seed.is_some(),
        "Starting Lifeline backend"
    );
    if config.game.rng_seed.is_some() {
        warn!("GAME_RNG_SEED is set; event draws are reproducible");
    }

    let _sweeper = spawn_sweeper(app_state.clone());

    let data = web::Data::new(app_state);
    let origins = config.cors_origins.clone();

    // Last wrap runs first: request_trace opens the span log_completion logs in.
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(from_fn(log_completion))
            .wrap(from_fn(request_trace))
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
