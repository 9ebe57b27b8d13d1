use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::{json, Value};

use tailrisk::service::{self, ServiceLimits};

#[actix_web::test]
async fn test_liveness() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_var_endpoint() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/risk/var")
        .set_json(json!({"confidence_level": 0.95, "trials": 10, "success_probability": 0.5}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"VaR": 3.0}));
}

#[actix_web::test]
async fn test_cvar_endpoint() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/risk/cvar")
        .set_json(json!({"confidence_level": 0.95, "trials": 10, "success_probability": 0.5}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let cvar = body["CVaR"].as_f64().unwrap();
    assert!((cvar - 180.0 / 1024.0 / 0.05).abs() < 1e-9);
}

#[actix_web::test]
async fn test_cvar_rejects_full_confidence() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/risk/cvar")
        .set_json(json!({"confidence_level": 1.0, "trials": 10, "success_probability": 0.5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("confidence level"));
}

#[actix_web::test]
async fn test_exhausted_search_is_unprocessable() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/risk/var")
        .set_json(json!({"confidence_level": 0.0, "trials": 4, "success_probability": 1.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_standard_deviation_endpoint() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/statistics/std")
        .set_json(json!({"values": [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"StandardDeviation": 2.0}));

    let req = test::TestRequest::post()
        .uri("/statistics/std")
        .set_json(json!({"values": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/risk/var")
        .set_json(json!({"confidence_level": 0.95, "trials": -3, "success_probability": 0.5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("error").is_some());
}

#[actix_web::test]
async fn test_option_endpoint_is_reproducible_with_seed() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let payload = json!({
        "form": "Call",
        "strike": 100.0,
        "generator": {"kind": "gaussian", "rate": 0.0001, "periods": 252, "sigma": 0.001, "spot": 100.0},
        "max_samples": 50000,
        "seed": 11
    });
    let first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/simulation/option")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    let second: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/simulation/option")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(first, second);
    let price = first["Price"].as_f64().unwrap();
    assert!(price > 2.2 && price < 2.9);
    assert!(first["Samples"].as_u64().unwrap() <= 50000);
}

#[actix_web::test]
async fn test_option_endpoint_rejects_negative_volatility() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/simulation/option")
        .set_json(json!({
            "form": "Put",
            "strike": 100.0,
            "generator": {"kind": "mixture", "rate": 0.0, "periods": 10, "sigma_one": -0.1, "sigma_two": 0.1, "spot": 100.0}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_oversized_trials_rejected_before_scanning() {
    let app = test::init_service(App::new().configure(service::configure)).await;
    let req = test::TestRequest::post()
        .uri("/risk/var")
        .set_json(json!({"confidence_level": 0.95, "trials": 50_000_000u64, "success_probability": 0.5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("trials"));
}

#[actix_web::test]
async fn test_configured_limits_apply_to_every_endpoint() {
    let limits = ServiceLimits {
        max_trials: 10,
        max_samples: 1_000,
    };
    let app = test::init_service(App::new().configure(service::configure_with(limits))).await;

    let at_limit = test::TestRequest::post()
        .uri("/risk/var")
        .set_json(json!({"confidence_level": 0.95, "trials": 10, "success_probability": 0.5}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, at_limit).await;
    assert_eq!(body, json!({"VaR": 3.0}));

    let over = test::TestRequest::post()
        .uri("/risk/cvar")
        .set_json(json!({"confidence_level": 0.95, "trials": 11, "success_probability": 0.5}))
        .to_request();
    assert_eq!(test::call_service(&app, over).await.status(), StatusCode::BAD_REQUEST);

    let too_many_samples = test::TestRequest::post()
        .uri("/simulation/option")
        .set_json(json!({
            "form": "Call",
            "strike": 100.0,
            "generator": {"kind": "gaussian", "rate": 0.0, "periods": 1, "sigma": 0.01, "spot": 100.0},
            "max_samples": 1_001
        }))
        .to_request();
    let resp = test::call_service(&app, too_many_samples).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("max_samples"));
}
