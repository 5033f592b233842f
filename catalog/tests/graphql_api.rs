//! HTTP-level tests for the GraphQL adapter.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{BACKEND_DETAIL, app, broken_app, graphql, send, send_raw};

const ADD: &str = r#"
    mutation Add($name: String!, $price: Float!, $description: String, $inStock: Boolean) {
        addProduct(name: $name, price: $price, description: $description, inStock: $inStock) {
            id name price description inStock createdAt
        }
    }
"#;

#[tokio::test]
async fn test_graphiql_is_served() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/graphql", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("graphiql"));
}

#[tokio::test]
async fn test_product_lifecycle() {
    let (app, _) = app();

    let added = graphql(
        &app,
        ADD,
        json!({ "name": "Monitor", "price": 199.99, "description": "27 inch", "inStock": false }),
    )
    .await;
    let product = &added["data"]["addProduct"];
    assert_eq!(product["id"], "1");
    assert_eq!(product["name"], "Monitor");
    assert_eq!(product["description"], "27 inch");
    assert_eq!(product["inStock"], false);

    let updated = graphql(
        &app,
        r#"mutation { updateProduct(id: "1", inStock: true) { name price inStock createdAt } }"#,
        json!({}),
    )
    .await;
    let updated = &updated["data"]["updateProduct"];
    assert_eq!(updated["inStock"], true);
    assert_eq!(updated["price"], 199.99);
    assert_eq!(updated["createdAt"], product["createdAt"]);

    let deleted = graphql(
        &app,
        r#"mutation { deleteProduct(id: "1") { id name } }"#,
        json!({}),
    )
    .await;
    assert_eq!(deleted["data"]["deleteProduct"], json!({ "id": "1", "name": "Monitor" }));

    let again = graphql(&app, r#"mutation { deleteProduct(id: "1") { id } }"#, json!({})).await;
    assert_eq!(again["data"]["deleteProduct"], Value::Null);

    let products = graphql(&app, "{ products { id } }", json!({})).await;
    assert_eq!(products["data"]["products"], json!([]));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_resolve_to_null() {
    let (app, catalog) = app();
    graphql(&app, r#"mutation { addProduct(name: "Laptop", price: 1000) { id } }"#, json!({})).await;

    for id in ["9999", "not-an-id", "+1", " 1 "] {
        let response = graphql(
            &app,
            "query($id: ID!) { product(id: $id) { id } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(response["data"]["product"], Value::Null);
        assert!(response.get("errors").is_none());

        let response = graphql(
            &app,
            "mutation($id: ID!) { updateProduct(id: $id, price: 1) { id } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(response["data"]["updateProduct"], Value::Null);
    }

    assert_eq!(catalog.get("1").await.unwrap().price, 1000.0);
}

#[tokio::test]
async fn test_validation_failures_carry_field_list() {
    let (app, catalog) = app();

    let response = graphql(&app, ADD, json!({ "name": "Lamp", "price": -1 })).await;

    let error = &response["errors"][0];
    assert_eq!(error["extensions"]["code"], "VALIDATION_FAILED");
    assert_eq!(error["extensions"]["fields"], json!(["price"]));
    assert_eq!(error["path"], json!(["addProduct"]));
    assert!(catalog.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failures_are_generic() {
    let app = broken_app();

    let response = graphql(&app, "{ products { id } }", json!({})).await;

    let error = &response["errors"][0];
    assert_eq!(error["message"], "Server error");
    assert_eq!(error["extensions"]["code"], "INTERNAL_SERVER_ERROR");
    assert!(!response.to_string().contains(BACKEND_DETAIL));
}

#[tokio::test]
async fn test_malformed_envelope_gets_graphql_shaped_error() {
    let (app, catalog) = app();

    for (content_type, body) in [
        (Some("application/json"), "{ not json"),
        (None, r#"{"query": "{ products { id } }"}"#),
    ] {
        let (status, response) = send_raw(&app, "POST", "/graphql", content_type, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["errors"][0]["extensions"]["code"], "BAD_REQUEST");
        assert!(response["errors"][0]["message"].is_string());
    }

    assert!(catalog.list().await.unwrap().is_empty());
}
