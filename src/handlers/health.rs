// src/handlers/health.rs
// DOCUMENTATION: Status handler
// PURPOSE: Simple endpoint to verify service status

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "service": "hbnb-places",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_status() {
        let app = test::init_service(App::new().service(web::scope("/api/v1").configure(config))).await;

        let req = test::TestRequest::get().uri("/api/v1/status").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "OK");
    }
}
