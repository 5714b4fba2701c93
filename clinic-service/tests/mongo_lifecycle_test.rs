//! Record lifecycle against a real MongoDB.

mod common;

use common::TestApp;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::json;

#[tokio::test]
#[ignore] // Requires MongoDB
async fn appointment_lifecycle_against_mongodb() {
    let app = TestApp::spawn_with_mongo().await;

    let health = app.get("/health").await;
    assert_eq!(health.status(), 200);

    assert!(app.list("/api/appointments").await.is_empty());

    let created = app
        .create(
            "/api/appointments",
            &json!({ "patientName": "A", "doctorName": "B", "date": "2024-01-01" }),
        )
        .await;
    let path = format!("/api/appointments/{}", created["_id"].as_str().unwrap());

    let response = app.put(&path, &json!({ "date": "2024-01-09" })).await;
    assert_eq!(response.status(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["date"], "2024-01-09");
    assert_eq!(updated["patientName"], "A");

    let listed = app.list("/api/appointments").await;
    assert_eq!(listed, vec![updated]);

    assert_eq!(app.delete(&path).await.status(), 200);
    assert_eq!(app.delete(&path).await.status(), 404);
    assert!(app.list("/api/appointments").await.is_empty());

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn patient_validation_against_mongodb() {
    let app = TestApp::spawn_with_mongo().await;

    let response = app
        .post(
            "/api/patients",
            &json!({ "name": "Ada", "age": -1, "gender": "Unknown" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let created = app
        .create(
            "/api/patients",
            &json!({ "name": "Ada", "age": 36, "gender": "Female" }),
        )
        .await;
    let path = format!("/api/patients/{}", created["_id"].as_str().unwrap());

    let response = app.put(&path, &json!({ "gender": "Other" })).await;
    assert_eq!(response.status(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["gender"], "Other");
    assert_eq!(updated["age"], 36);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires MongoDB
async fn existing_mongoose_documents_are_served() {
    let app = TestApp::spawn_with_mongo().await;
    let db = app.db.as_ref().expect("Mongo backend has a database");

    let id = ObjectId::new();
    db.client()
        .database(&app.db_name)
        .collection::<Document>("doctors")
        .insert_one(
            doc! {
                "_id": id,
                "name": "Grey",
                "specialization": "Surgery",
                "phone": "555-0100",
                "__v": 0,
            },
            None,
        )
        .await
        .expect("Failed to seed doctor");

    let doctors = app.list("/api/doctors").await;
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["_id"], id.to_hex());
    assert_eq!(doctors[0]["name"], "Grey");

    let path = format!("/api/doctors/{}", id.to_hex());
    let response = app.put(&path, &json!({ "phone": "555-0199" })).await;
    assert_eq!(response.status(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["phone"], "555-0199");

    assert_eq!(app.delete(&path).await.status(), 200);

    app.cleanup().await;
}
