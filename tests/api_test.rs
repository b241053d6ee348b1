use actix_web::{http::StatusCode, test, App};

use poker_tournament::api::{liveness_app, LIVENESS_TEXT};

#[actix_web::test]
async fn liveness_endpoint_answers_on_root() {
    let app = test::init_service(App::new().configure(liveness_app)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, LIVENESS_TEXT.as_bytes());
}

#[actix_web::test]
async fn liveness_endpoint_has_no_other_routes() {
    let app = test::init_service(App::new().configure(liveness_app)).await;

    let req = test::TestRequest::get().uri("/status").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.status(), StatusCode::OK);
}
