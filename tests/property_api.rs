mod common;

use actix_web::{test, App};
use serde_json::{json, Value};

use settlr_be::configure;

use common::bearer;

fn listing() -> Value {
    json!({
        "title": "Sunny 1BHK near FC Road",
        "propertyType": "Rented Apartment",
        "city": "Pune",
        "address": "12 FC Road, Shivajinagar",
        "bhkType": "1bhk",
        "furnishing": "semi",
        "availableFrom": "2025-08-01",
        "preferredTenant": "Working Professional",
        "preferredGender": "",
        "pricing": {
            "rent": 18000,
            "deposit": 36000,
            "maintenanceCharges": "extra",
            "maintenanceAmount": 1500,
            "electricity": "metered",
            "electricityAmount": 0,
            "waterCharges": "included"
        },
        "amenities": ["wifi", "lift"],
        "rules": {
            "smokingAllowed": false,
            "alcoholAllowed": false,
            "petsAllowed": true,
            "visitorRestrictions": false,
            "curfewRestrictions": ""
        },
        "ownerPhone": "9876543210",
        "images": []
    })
}

#[actix_web::test]
async fn owner_creates_and_lists_properties() {
    let app = test::init_service(App::new().app_data(common::state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("owner-1"))
        .set_json(listing())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["property"]["ownerId"], "owner-1");
    assert_eq!(body["property"]["pricing"]["rent"], 18000.0);
    assert_eq!(body["property"]["rules"]["petsAllowed"], true);

    let mut second = listing();
    second["title"] = json!("Second listing");
    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("owner-1"))
        .set_json(second)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("owner-2"))
        .set_json(listing())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::get()
        .uri("/api/properties/my-properties")
        .insert_header(bearer("owner-1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let mine = body.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["title"], "Second listing");
}

#[actix_web::test]
async fn incomplete_stage_is_reported() {
    let app = test::init_service(App::new().app_data(common::state()).configure(configure)).await;

    let mut payload = listing();
    payload["pricing"]["rent"] = json!("");

    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("owner-1"))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Stage 3 (Pricing Details) is incomplete: pricing.rent is required"
    );
}

#[actix_web::test]
async fn only_the_owner_can_update_or_delete() {
    let app = test::init_service(App::new().app_data(common::state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("owner-1"))
        .set_json(listing())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["property"]["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/properties/{}", id);

    let mut changed = listing();
    changed["pricing"]["rent"] = json!(20000);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer("intruder"))
        .set_json(&changed)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("intruder"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer("owner-1"))
        .set_json(&changed)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["property"]["pricing"]["rent"], 20000.0);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer("tenant-browsing"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("owner-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Property deleted successfully");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer("owner-1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn malformed_ids_are_404() {
    let app = test::init_service(App::new().app_data(common::state()).configure(configure)).await;

    let req = test::TestRequest::delete()
        .uri("/api/properties/not-a-uuid")
        .insert_header(bearer("owner-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Property not found");
}

#[actix_web::test]
async fn listing_requires_token() {
    let app = test::init_service(App::new().app_data(common::state()).configure(configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/properties/my-properties")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}
