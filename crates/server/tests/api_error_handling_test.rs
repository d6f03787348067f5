use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use database::entities::{enrollments, grades};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

// Helper to build the app on a fresh in-memory SQLite database
async fn setup_test_app() -> (Router, DatabaseConnection) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("Failed to init DB");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    (server::app(db.clone()), db)
}

async fn read_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response was not JSON")
    };
    (status, body)
}

// Helper to send a JSON request and decode the JSON response
async fn send_json(app: &Router, method: &str, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    read_body(response).await
}

// Helper to send a bodyless request and decode the JSON response
async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    read_body(response).await
}

// Helper that only cares about the status, for responses with non-JSON bodies
async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    response.status()
}

async fn create_student(app: &Router, student_id: &str, email: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": student_id,
            "first_name": "Alice",
            "last_name": "Johnson",
            "email": email,
            "date_of_birth": "2004-05-17"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "student create failed: {body}");
    body
}

async fn create_subject(app: &Router, code: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/subjects/",
        &json!({
            "code": code,
            "name": "Placeholder Course",
            "credits": 3
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "subject create failed: {body}");
    body
}

async fn create_enrollment(app: &Router, student: &Value, subject: &Value) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/enrollments/",
        &json!({
            "student": student["id"],
            "subject": subject["id"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "enrollment create failed: {body}");
    body
}

async fn create_grade(app: &Router, enrollment: &Value, score: f64) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/grades/",
        &json!({
            "enrollment": enrollment["id"],
            "grade_type": "quiz",
            "title": "Quiz",
            "score": score
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "grade create failed: {body}");
    body
}

#[tokio::test]
async fn test_missing_resources_return_not_found_body() {
    let (app, _db) = setup_test_app().await;
    let missing = Uuid::new_v4();

    // Every entity answers an unknown id the same way
    for uri in [
        format!("/api/students/{missing}/"),
        format!("/api/subjects/{missing}/"),
        format!("/api/enrollments/{missing}/"),
        format!("/api/grades/{missing}/"),
    ] {
        let (status, body) = send(&app, "GET", &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    // So do writes against an unknown id
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/students/{missing}/"),
        &json!({
            "student_id": "S-404",
            "first_name": "No",
            "last_name": "One",
            "email": "noone@example.com",
            "date_of_birth": "2004-05-17"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");

    let (status, _) = send_json(&app, "PATCH", &format!("/api/grades/{missing}/"), &json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &format!("/api/subjects/{missing}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}

#[tokio::test]
async fn test_malformed_requests_are_rejected() {
    let (app, _db) = setup_test_app().await;

    // Garbage that is not JSON at all
    let status = send_raw(&app, "POST", "/api/students/", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Valid JSON missing required fields
    let status = send_raw(&app, "POST", "/api/students/", "{}").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Wrong type in a typed field
    let status = send_raw(
        &app,
        "POST",
        "/api/grades/",
        r#"{"enrollment": "not-a-uuid", "grade_type": "quiz", "title": "Quiz", "score": 50}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Unparseable id in the path
    let request = Request::builder()
        .uri("/api/students/not-a-uuid/")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_field_validation() {
    let (app, _db) = setup_test_app().await;

    // Blank identifier
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": "   ",
            "first_name": "Alice",
            "last_name": "Johnson",
            "email": "alice@example.com",
            "date_of_birth": "2004-05-17"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["student_id"], json!(["this field may not be blank"]));

    // Identifier over the 20-character cap
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": "S".repeat(21),
            "first_name": "Alice",
            "last_name": "Johnson",
            "email": "alice@example.com",
            "date_of_birth": "2004-05-17"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["student_id"], json!(["no more than 20 characters allowed"]));

    // Email without a domain
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": "S-1",
            "first_name": "Alice",
            "last_name": "Johnson",
            "email": "not-an-email",
            "date_of_birth": "2004-05-17"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], json!(["enter a valid email address"]));

    // Phone over the 15-character cap
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": "S-1",
            "first_name": "Alice",
            "last_name": "Johnson",
            "email": "alice@example.com",
            "date_of_birth": "2004-05-17",
            "phone": "0".repeat(16)
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["phone"], json!(["no more than 15 characters allowed"]));
}

#[tokio::test]
async fn test_student_uniqueness_conflicts() {
    let (app, _db) = setup_test_app().await;

    create_student(&app, "S-1", "alice@example.com").await;

    // Same student_id, different email
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": "S-1",
            "first_name": "Bob",
            "last_name": "Jones",
            "email": "bob@example.com",
            "date_of_birth": "2003-01-02"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["student_id"],
        json!(["a student with this student_id already exists"])
    );

    // Same email, different student_id
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/students/",
        &json!({
            "student_id": "S-2",
            "first_name": "Bob",
            "last_name": "Jones",
            "email": "alice@example.com",
            "date_of_birth": "2003-01-02"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], json!(["a student with this email already exists"]));

    // Updating into another student's email is also a conflict
    let bob = create_student(&app, "S-2", "bob@example.com").await;
    let bob_id = bob["id"].as_str().unwrap();
    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/students/{bob_id}/"),
        &json!({ "email": "alice@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["email"], json!(["a student with this email already exists"]));

    // Re-sending your own value is not a conflict
    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/students/{bob_id}/"),
        &json!({ "email": "bob@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "bob@example.com");
}

#[tokio::test]
async fn test_subject_validation_and_uniqueness() {
    let (app, _db) = setup_test_app().await;

    for credits in [0, 7] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/subjects/",
            &json!({
                "code": "CS101",
                "name": "Intro to Computer Science",
                "credits": credits
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "credits {credits}");
        assert_eq!(body["credits"], json!(["must be between 1 and 6"]));
    }

    // The bounds themselves are fine
    create_subject(&app, "CS101").await;
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/subjects/",
        &json!({ "code": "SEM600", "name": "Graduate Seminar", "credits": 6 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Duplicate code
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/subjects/",
        &json!({ "code": "CS101", "name": "Another Intro", "credits": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(["a subject with this code already exists"]));

    // Code over the 10-character cap
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/subjects/",
        &json!({ "code": "LONGCODE-01", "name": "Too Long", "credits": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(["no more than 10 characters allowed"]));
}

#[tokio::test]
async fn test_enrollment_references_and_duplicates() {
    let (app, _db) = setup_test_app().await;

    let student = create_student(&app, "S-1", "alice@example.com").await;
    let subject = create_subject(&app, "CS101").await;
    let missing = Uuid::new_v4();

    // Unknown student
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/enrollments/",
        &json!({ "student": missing, "subject": subject["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["student"],
        json!([format!("student \"{missing}\" does not exist")])
    );

    // Unknown subject
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/enrollments/",
        &json!({ "student": student["id"], "subject": missing }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["subject"],
        json!([format!("subject \"{missing}\" does not exist")])
    );

    // Enrolling twice in the same subject
    create_enrollment(&app, &student, &subject).await;
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/enrollments/",
        &json!({ "student": student["id"], "subject": subject["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["subject"],
        json!(["this student is already enrolled in this subject"])
    );

    // Updating a second enrollment onto an existing pair
    let other = create_subject(&app, "MTH201").await;
    let second = create_enrollment(&app, &student, &other).await;
    let second_id = second["id"].as_str().unwrap();
    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/enrollments/{second_id}/"),
        &json!({ "subject": subject["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["subject"],
        json!(["this student is already enrolled in this subject"])
    );
}

#[tokio::test]
async fn test_grade_validation() {
    let (app, _db) = setup_test_app().await;

    let student = create_student(&app, "S-1", "alice@example.com").await;
    let subject = create_subject(&app, "CS101").await;
    let enrollment = create_enrollment(&app, &student, &subject).await;

    // Only the three known labels are accepted
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/grades/",
        &json!({
            "enrollment": enrollment["id"],
            "grade_type": "final",
            "title": "Final Exam",
            "score": 90
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["grade_type"],
        json!(["\"final\" is not a valid grade type"])
    );

    // Score bounds
    for score in [-1, 101] {
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/grades/",
            &json!({
                "enrollment": enrollment["id"],
                "grade_type": "quiz",
                "title": "Quiz",
                "score": score
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {score}");
        assert_eq!(body["score"], json!(["must be between 0 and 100"]));
    }

    // Too many decimal places
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/grades/",
        &json!({
            "enrollment": enrollment["id"],
            "grade_type": "quiz",
            "title": "Quiz",
            "score": "85.555"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["score"], json!(["no more than 2 decimal places allowed"]));

    // Max score below 1
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/grades/",
        &json!({
            "enrollment": enrollment["id"],
            "grade_type": "quiz",
            "title": "Quiz",
            "score": 0,
            "max_score": 0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["max_score"], json!(["must be at least 1"]));

    // Unknown enrollment
    let missing = Uuid::new_v4();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/grades/",
        &json!({
            "enrollment": missing,
            "grade_type": "quiz",
            "title": "Quiz",
            "score": 50
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["enrollment"],
        json!([format!("enrollment \"{missing}\" does not exist")])
    );

    // The score bounds themselves are fine
    for score in [0, 100] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/grades/",
            &json!({
                "enrollment": enrollment["id"],
                "grade_type": "quiz",
                "title": format!("Quiz {score}"),
                "score": score
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "score {score}");
    }
}

#[tokio::test]
async fn test_empty_patch_is_accepted() {
    let (app, _db) = setup_test_app().await;

    let student = create_student(&app, "S-1", "alice@example.com").await;
    let student_id = student["id"].as_str().unwrap();
    let (status, body) = send_json(&app, "PATCH", &format!("/api/students/{student_id}/"), &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Alice Johnson");

    // A grade save always refreshes its update timestamp
    let subject = create_subject(&app, "CS101").await;
    let enrollment = create_enrollment(&app, &student, &subject).await;
    let grade = create_grade(&app, &enrollment, 80.0).await;
    let grade_id = grade["id"].as_str().unwrap();
    let (status, body) = send_json(&app, "PATCH", &format!("/api/grades/{grade_id}/"), &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["date_updated"], grade["date_updated"]);
    assert_eq!(body["date_recorded"], grade["date_recorded"]);
}

#[tokio::test]
async fn test_deleting_student_removes_enrollments_and_grades() {
    let (app, db) = setup_test_app().await;

    let alice = create_student(&app, "S-1", "alice@example.com").await;
    let bob = create_student(&app, "S-2", "bob@example.com").await;
    let cs = create_subject(&app, "CS101").await;
    let mth = create_subject(&app, "MTH201").await;

    let first = create_enrollment(&app, &alice, &cs).await;
    let second = create_enrollment(&app, &alice, &mth).await;
    create_grade(&app, &first, 80.0).await;
    create_grade(&app, &second, 90.0).await;

    // Bob's enrollment must survive
    let kept = create_enrollment(&app, &bob, &cs).await;
    create_grade(&app, &kept, 70.0).await;

    let alice_id = alice["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/students/{alice_id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/api/enrollments/").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student"], bob["id"]);

    assert_eq!(enrollments::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(grades::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_deleting_subject_removes_enrollments_and_grades() {
    let (app, db) = setup_test_app().await;

    let student = create_student(&app, "S-1", "alice@example.com").await;
    let cs = create_subject(&app, "CS101").await;
    let mth = create_subject(&app, "MTH201").await;

    let doomed = create_enrollment(&app, &student, &cs).await;
    let kept = create_enrollment(&app, &student, &mth).await;
    create_grade(&app, &doomed, 80.0).await;
    create_grade(&app, &kept, 90.0).await;

    let cs_id = cs["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/subjects/{cs_id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/api/enrollments/").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["subject_code"], "MTH201");

    assert_eq!(grades::Entity::find().count(&db).await.unwrap(), 1);

    // The student is untouched
    let student_id = student["id"].as_str().unwrap();
    let (status, _) = send(&app, "GET", &format!("/api/students/{student_id}/")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleting_enrollment_removes_grades_only() {
    let (app, db) = setup_test_app().await;

    let student = create_student(&app, "S-1", "alice@example.com").await;
    let subject = create_subject(&app, "CS101").await;
    let enrollment = create_enrollment(&app, &student, &subject).await;
    create_grade(&app, &enrollment, 80.0).await;
    create_grade(&app, &enrollment, 90.0).await;

    let enrollment_id = enrollment["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/enrollments/{enrollment_id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(grades::Entity::find().count(&db).await.unwrap(), 0);
    let (status, body) = send(&app, "GET", "/api/grades/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Both ends of the pair survive
    let student_id = student["id"].as_str().unwrap();
    let (status, _) = send(&app, "GET", &format!("/api/students/{student_id}/")).await;
    assert_eq!(status, StatusCode::OK);
    let subject_id = subject["id"].as_str().unwrap();
    let (status, _) = send(&app, "GET", &format!("/api/subjects/{subject_id}/")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_put_requires_every_field() {
    let (app, _db) = setup_test_app().await;

    let student = create_student(&app, "S-1", "alice@example.com").await;
    let student_id = student["id"].as_str().unwrap();

    // A full update without the email does not deserialize
    let status = send_raw(
        &app,
        "PUT",
        &format!("/api/students/{student_id}/"),
        r#"{"student_id": "S-1", "first_name": "Alice", "last_name": "Johnson", "date_of_birth": "2004-05-17"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // A partial update with the same subset is fine
    let (status, _) = send_json(
        &app,
        "PATCH",
        &format!("/api/students/{student_id}/"),
        &json!({ "first_name": "Alicia" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
