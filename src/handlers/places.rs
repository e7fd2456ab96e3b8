// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::db::Storage;
use crate::errors::PlacesError;
use crate::models::{CreatePlaceRequest, SearchFilter, UpdatePlaceRequest};
use crate::services::{PlaceSearch, PlaceService};
use actix_web::{web, HttpResponse, Responder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Body extraction shared by every JSON endpoint
/// DOCUMENTATION: A missing or unparsable body, or anything but a JSON object, is "Not a JSON".
/// Objects whose fields have the wrong types are validation errors.
fn json_object<T: DeserializeOwned>(body: Option<web::Json<Value>>) -> Result<T, PlacesError> {
    let value = match body.map(web::Json::into_inner) {
        Some(value @ Value::Object(_)) => value,
        _ => return Err(PlacesError::InvalidInput("Not a JSON".to_string())),
    };

    serde_json::from_value(value).map_err(|e| PlacesError::ValidationError(e.to_string()))
}

/// GET /cities/{city_id}/places
/// List the places of a city
pub async fn get_city_places(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let places = PlaceService::list_city_places(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// GET /places/{place_id}
pub async fn get_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let place = PlaceService::get_place(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// DELETE /places/{place_id}
pub async fn delete_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    PlaceService::delete_place(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// POST /cities/{city_id}/places
/// Create a place; the city is checked before the body is looked at
pub async fn create_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
    body: Option<web::Json<Value>>,
) -> Result<impl Responder, PlacesError> {
    let city_id = path.into_inner();
    if storage.get_city(&city_id).await?.is_none() {
        return Err(PlacesError::NotFound(format!("City {}", city_id)));
    }

    let req: CreatePlaceRequest = json_object(body)?;
    let place = PlaceService::create_place(storage.get_ref(), &city_id, req).await?;
    Ok(HttpResponse::Created().json(place))
}

/// PUT /places/{place_id}
pub async fn update_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
    body: Option<web::Json<Value>>,
) -> Result<impl Responder, PlacesError> {
    let place_id = path.into_inner();
    PlaceService::get_place(storage.get_ref(), &place_id).await?;

    let req: UpdatePlaceRequest = json_object(body)?;
    let place = PlaceService::update_place(storage.get_ref(), &place_id, req).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// GET /places/{place_id}/amenities
/// Amenities linked to a place (also what the search's membership client reads)
pub async fn get_place_amenities(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let amenities = PlaceService::place_amenities(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /places_search
/// Search places by states, cities and amenities
pub async fn search_places(
    search: web::Data<PlaceSearch>,
    body: Option<web::Json<Value>>,
) -> Result<impl Responder, PlacesError> {
    let filter: SearchFilter = json_object(body)?;
    let places = search.resolve(&filter).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/places_search", web::post().to(search_places))
        .service(
            web::resource("/cities/{city_id}/places")
                .route(web::get().to(get_city_places))
                .route(web::post().to(create_place)),
        )
        .service(
            web::resource("/places/{place_id}")
                .route(web::get().to(get_place))
                .route(web::put().to(update_place))
                .route(web::delete().to(delete_place)),
        )
        .route(
            "/places/{place_id}/amenities",
            web::get().to(get_place_amenities),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStorage;
    use crate::services::testing::{sample_dump, ScriptedMembership, AMENITY_POOL};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn app_data() -> (web::Data<dyn Storage>, web::Data<PlaceSearch>) {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::from_dump(sample_dump(), None));
        let membership = Arc::new(ScriptedMembership::from_dump(&sample_dump()));
        let search = PlaceSearch::new(storage.clone(), membership, 4);
        (web::Data::from(storage), web::Data::new(search))
    }

    macro_rules! service {
        () => {{
            let (storage, search) = app_data();
            test::init_service(
                App::new()
                    .app_data(storage)
                    .app_data(search)
                    .service(web::scope("/api/v1").configure(config)),
            )
            .await
        }};
    }

    fn place_ids(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn test_search_with_empty_body_object() {
        let app = service!();

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(place_ids(&body).len(), 4);
        // Flat place representation
        assert_eq!(body[0]["city_id"], "city-sf");
        assert_eq!(body[0]["max_guest"], 4);
    }

    #[actix_web::test]
    async fn test_search_by_state_and_amenity() {
        let app = service!();

        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .set_json(json!({"states": ["state-ca", "state-nv"], "amenities": [AMENITY_POOL]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(place_ids(&body), vec!["place-loft", "place-suite"]);
    }

    #[actix_web::test]
    async fn test_search_rejects_non_object_bodies() {
        let app = service!();

        for payload in ["[]", "\"states\"", "null", "{not json"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/places_search")
                .insert_header(("content-type", "application/json"))
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["message"], "Invalid input: Not a JSON", "payload {}", payload);
        }

        // No body and no content type: the extractor yields None
        let req = test::TestRequest::post()
            .uri("/api/v1/places_search")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Invalid input: Not a JSON");
    }

    #[actix_web::test]
    async fn test_get_place_and_missing_place() {
        let app = service!();

        let req = test::TestRequest::get()
            .uri("/api/v1/places/place-studio")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Bay Studio");

        let req = test::TestRequest::get()
            .uri("/api/v1/places/place-ghost")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_city_places() {
        let app = service!();

        let req = test::TestRequest::get()
            .uri("/api/v1/cities/city-sf/places")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(place_ids(&body), vec!["place-loft", "place-studio"]);

        let req = test::TestRequest::get()
            .uri("/api/v1/cities/city-ghost/places")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_place() {
        let app = service!();

        let req = test::TestRequest::post()
            .uri("/api/v1/cities/city-vegas/places")
            .set_json(json!({"user_id": "user-1", "name": "Desert Dome", "max_guest": 2}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["city_id"], "city-vegas");

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/places/{}", body["id"].as_str().unwrap()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_create_place_errors() {
        let app = service!();

        let cases = [
            ("city-ghost", json!({"user_id": "user-1", "name": "X"}), StatusCode::NOT_FOUND),
            ("city-sf", json!({"name": "X"}), StatusCode::BAD_REQUEST),
            ("city-sf", json!({"user_id": "ghost", "name": "X"}), StatusCode::NOT_FOUND),
            ("city-sf", json!({"user_id": "user-1"}), StatusCode::BAD_REQUEST),
            ("city-sf", json!({"user_id": "user-1", "name": "X", "max_guest": -1}), StatusCode::BAD_REQUEST),
        ];

        for (city_id, payload, expected) in cases {
            let req = test::TestRequest::post()
                .uri(&format!("/api/v1/cities/{}/places", city_id))
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "payload {}", payload);
        }
    }

    #[actix_web::test]
    async fn test_update_place_ignores_protected_keys() {
        let app = service!();

        let req = test::TestRequest::put()
            .uri("/api/v1/places/place-loft")
            .set_json(json!({"name": "Renamed Loft", "city_id": "city-vegas", "id": "x"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], "place-loft");
        assert_eq!(body["name"], "Renamed Loft");
        assert_eq!(body["city_id"], "city-sf");
    }

    #[actix_web::test]
    async fn test_delete_place() {
        let app = service!();

        let req = test::TestRequest::delete()
            .uri("/api/v1/places/place-bungalow")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({}));

        let req = test::TestRequest::delete()
            .uri("/api/v1/places/place-bungalow")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_place_amenities() {
        let app = service!();

        let req = test::TestRequest::get()
            .uri("/api/v1/places/place-loft/amenities")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(place_ids(&body), vec!["amenity-wifi", "amenity-pool"]);
    }
}
