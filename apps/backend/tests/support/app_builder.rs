use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::from_fn;
use actix_web::{test, web, App, Error};
use backend::middleware::{log_completion, request_trace};
use backend::routes;
use backend::state::app_state::AppState;

/// In-process service with the production routes and tracing middleware.
///
/// CORS is left out; browsers are not involved in these tests.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let data = web::Data::new(state);

    test::init_service(
        App::new()
            .wrap(from_fn(log_completion))
            .wrap(from_fn(request_trace))
            .app_data(data)
            .configure(routes::configure),
    )
    .await
}
