//! End-to-end API tests: the full router against an in-memory database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use chrono::NaiveDate;
use coop_core::validation::{MemberInput, ProductInput};
use coop_core::{Member, MemberStatus, Product, Role, CREDIT_CEILING_CENTS};
use coop_db::{Database, DbConfig};
use coop_server::auth::IDENTITY_HEADER;
use coop_server::config::ServerConfig;
use coop_server::{build_router, AppState};

const ROOT: &str = "root@coop.example";
const CASHIER: &str = "till@coop.example";
const VIEWER: &str = "viewer@coop.example";

/// Builds a router over a fresh in-memory database with one user per
/// interesting role. The raw Database handle is returned so tests can
/// inspect ledger state behind the API's back.
async fn test_app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    // Password hashes are opaque strings to the API; no login flow
    // exists to verify them, so tests use placeholders.
    db.users()
        .create("Root", ROOT, "$argon2$placeholder", Role::SuperAdmin)
        .await
        .unwrap();
    db.users()
        .create("Till Operator", CASHIER, "$argon2$placeholder", Role::Cashier)
        .await
        .unwrap();
    db.users()
        .create("Auditor", VIEWER, "$argon2$placeholder", Role::Viewer)
        .await
        .unwrap();

    let state = AppState {
        db: db.clone(),
        config: ServerConfig::load().unwrap(),
    };

    (build_router(state), db)
}

async fn seed_product(db: &Database, name: &str, price_cents: i64, stock: i64) -> Product {
    db.products()
        .create(&ProductInput {
            name: name.to_string(),
            barcode: None,
            sku: None,
            category: "Grocery".to_string(),
            selling_price_cents: price_cents,
            cost_price_cents: price_cents / 2,
            current_stock: stock,
            min_stock: 2,
            unit: "piece".to_string(),
            description: None,
        })
        .await
        .unwrap()
}

async fn seed_member(db: &Database, code: &str, balance_cents: i64) -> Member {
    let member = db
        .members()
        .create(&MemberInput {
            name: format!("Member {code}"),
            email: None,
            phone: None,
            member_code: code.to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: MemberStatus::Active,
            notes: None,
        })
        .await
        .unwrap();

    if balance_cents != 0 {
        sqlx::query("UPDATE members SET balance_cents = ?2 WHERE id = ?1")
            .bind(&member.id)
            .bind(balance_cents)
            .execute(db.pool())
            .await
            .unwrap();
    }

    member
}

fn get(uri: &str, who: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(IDENTITY_HEADER, who)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, who: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(IDENTITY_HEADER, who)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Health & Identity
// =============================================================================

#[tokio::test]
async fn health_needs_no_identity() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/api/products").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_identity_is_unauthorized() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(get("/api/products", "nobody@coop.example"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn checkout_decrements_stock_and_raises_balance() {
    let (app, db) = test_app().await;
    let product = seed_product(&db, "Rice 5kg", 1000, 5).await;
    let member = seed_member(&db, "MBR-001", 0).await;

    let response = app
        .oneshot(post_json(
            "/api/checkout",
            CASHIER,
            json!({
                "member_id": member.id,
                "cart": [{ "id": product.id, "quantity": 2 }],
                "total_cents": 2000,
                "payment_method": "cash"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Sale processed successfully!");
    assert_eq!(body["totalCents"], 2000);
    assert_eq!(body["lineCount"], 1);

    let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
    assert_eq!(product.current_stock, 3);

    let member = db.members().get_by_id(&member.id).await.unwrap().unwrap();
    assert_eq!(member.balance_cents, 2000);
}

#[tokio::test]
async fn checkout_rejects_member_at_credit_ceiling() {
    let (app, db) = test_app().await;
    let product = seed_product(&db, "Rice 5kg", 1000, 5).await;
    let member = seed_member(&db, "MBR-002", CREDIT_CEILING_CENTS).await;

    let response = app
        .oneshot(post_json(
            "/api/checkout",
            CASHIER,
            json!({
                "member_id": member.id,
                "cart": [{ "id": product.id, "quantity": 1 }],
                "total_cents": 1000,
                "payment_method": "cash"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], "CREDIT_LIMIT");

    // Nothing moved
    let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
    assert_eq!(product.current_stock, 5);
}

#[tokio::test]
async fn checkout_rejects_insufficient_stock_naming_the_product() {
    let (app, db) = test_app().await;
    let product = seed_product(&db, "Soap", 350, 1).await;

    let response = app
        .oneshot(post_json(
            "/api/checkout",
            CASHIER,
            json!({
                "member_id": null,
                "cart": [{ "id": product.id, "quantity": 2 }],
                "total_cents": 700,
                "payment_method": "card"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["message"].as_str().unwrap().contains("Soap"));
}

#[tokio::test]
async fn checkout_rejects_empty_cart() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/checkout",
            CASHIER,
            json!({
                "member_id": null,
                "cart": [],
                "total_cents": 100,
                "payment_method": "cash"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn viewer_cannot_checkout() {
    let (app, db) = test_app().await;
    let product = seed_product(&db, "Soap", 350, 5).await;

    let response = app
        .oneshot(post_json(
            "/api/checkout",
            VIEWER,
            json!({
                "member_id": null,
                "cart": [{ "id": product.id, "quantity": 1 }],
                "total_cents": 350,
                "payment_method": "cash"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "PERMISSION_DENIED");

    // Permission failures must not mutate the ledger
    let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
    assert_eq!(product.current_stock, 5);
}

// =============================================================================
// Product CRUD
// =============================================================================

#[tokio::test]
async fn product_crud_roundtrip() {
    let (app, _db) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/products",
            ROOT,
            json!({
                "name": "Cooking Oil 1L",
                "barcode": null,
                "sku": "OIL-1",
                "category": "Grocery",
                "selling_price_cents": 850,
                "cost_price_cents": 600,
                "current_stock": 24,
                "min_stock": 6,
                "unit": "bottle",
                "description": null
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/products/{id}"), CASHIER))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["name"], "Cooking Oil 1L");
    assert_eq!(fetched["selling_price_cents"], 850);

    let response = app
        .oneshot(get("/api/products?in_stock=true", CASHIER))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let catalog = body_json(response).await;
    assert_eq!(catalog.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cashier_cannot_create_products() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/products",
            CASHIER,
            json!({
                "name": "Contraband",
                "barcode": null,
                "sku": null,
                "category": "Grocery",
                "selling_price_cents": 1,
                "cost_price_cents": 1,
                "current_stock": 1,
                "min_stock": 0,
                "unit": "piece",
                "description": null
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn negative_price_is_a_validation_error() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/products",
            ROOT,
            json!({
                "name": "Broken",
                "barcode": null,
                "sku": null,
                "category": "Grocery",
                "selling_price_cents": -5,
                "cost_price_cents": 0,
                "current_stock": 0,
                "min_stock": 0,
                "unit": "piece",
                "description": null
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("selling_price_cents"));
}

// =============================================================================
// Member CRUD
// =============================================================================

#[tokio::test]
async fn duplicate_member_code_is_a_validation_error() {
    let (app, db) = test_app().await;
    seed_member(&db, "MBR-010", 0).await;

    let response = app
        .oneshot(post_json(
            "/api/members",
            ROOT,
            json!({
                "name": "Second",
                "email": null,
                "phone": null,
                "member_code": "MBR-010",
                "join_date": "2025-01-15",
                "status": "active",
                "notes": null
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("member_code"));
}

// =============================================================================
// Users & Roles
// =============================================================================

#[tokio::test]
async fn only_super_admin_sees_users_and_roles() {
    let (app, _db) = test_app().await;

    let response = app.clone().oneshot(get("/api/users", ROOT)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 3);
    // Hashes never leak
    assert!(users[0].get("password_hash").is_none());

    let response = app.clone().oneshot(get("/api/roles", ROOT)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let roles = body_json(response).await;
    assert_eq!(roles.as_array().unwrap().len(), 5);

    let response = app.oneshot(get("/api/users", CASHIER)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_user_hashes_password() {
    let (app, db) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/users",
            ROOT,
            json!({
                "name": "New Treasurer",
                "email": "treasurer@coop.example",
                "password": "longenoughpassword",
                "role": "treasurer"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = db
        .users()
        .get_by_email("treasurer@coop.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.role, Role::Treasurer);
    assert!(stored.password_hash.starts_with("$argon2"));
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn dashboard_reports_ledger_sums() {
    let (app, db) = test_app().await;
    seed_product(&db, "Rice 5kg", 1000, 5).await;
    seed_member(&db, "MBR-001", 1500).await;

    let response = app.clone().oneshot(get("/api/dashboard", VIEWER)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["stats"]["totalMembers"], 1);
    assert_eq!(body["stats"]["totalProducts"], 1);
    assert_eq!(body["stats"]["totalUsers"], 3);
    assert_eq!(body["stats"]["totalUnpaidCents"], 1500);
    assert_eq!(body["memberGrowth"].as_array().unwrap().len(), 12);
    assert_eq!(body["membersWithUnpaid"][0]["balanceCents"], 1500);

    // Cashier lacks view-all-reports
    let response = app.oneshot(get("/api/dashboard", CASHIER)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
