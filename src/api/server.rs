use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;

/// Ответ эндпоинта жизнеспособности.
pub const LIVENESS_TEXT: &str = "Tournament is running!";

/// Адрес по умолчанию.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body(LIVENESS_TEXT)
}

/// Маршруты эндпоинта: `GET /`.
pub fn liveness_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}

/// Поднять HTTP-сервер. Возвращённый `Server` нужно запустить (await или spawn);
/// остановить: через `Server::handle()`.
pub fn run_liveness(bind: &str) -> Result<Server, std::io::Error> {
    log::info!("starting liveness endpoint on {bind}");
    let server = HttpServer::new(|| {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .configure(liveness_app)
    })
    .workers(1)
    .bind(bind)?
    .run();
    Ok(server)
}
