//! GraphQL adapter.
//!
//! ```graphql
//! type Product { id: ID!, name: String!, price: Float!, description: String, inStock: Boolean, createdAt: DateTime! }
//! type Query { products: [Product!]!, product(id: ID!): Product }
//! type Mutation {
//!   addProduct(name: String!, price: Float!, description: String, inStock: Boolean): Product
//!   updateProduct(id: ID!, name: String, price: Float, description: String, inStock: Boolean): Product
//!   deleteProduct(id: ID!): Product
//! }
//! ```
//!
//! Resolvers hand their arguments to the same [`Catalog`] calls the REST adapter uses, as an
//! untyped JSON object, so both protocols validate identically. A product that does not exist
//! resolves to `null`. A request body that is not a GraphQL request envelope is answered with
//! a 400 and a `{"errors": [...]}` body whose extension code is `BAD_REQUEST`.

use async_graphql::{
    EmptySubscription, Error, ErrorExtensions, ID, Object, Schema, http::GraphiQLSource,
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use tracing::debug;

use catalog_core::{
    catalog::Catalog,
    error::{CatalogError, CatalogResult},
    product::Product,
};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub const ENDPOINT: &str = "/graphql";

/// Builds the executable schema over `catalog`.
pub fn schema(catalog: Catalog) -> CatalogSchema {
    Schema::build(
        QueryRoot { catalog: catalog.clone() },
        MutationRoot { catalog },
        EmptySubscription,
    )
    .finish()
}

/// Builds the GraphQL route: GraphiQL on GET, execution on POST.
pub fn routes(catalog: Catalog) -> Router {
    Router::new()
        .route(ENDPOINT, get(graphiql).post(execute))
        .with_state(schema(catalog))
}

async fn execute(
    State(schema): State<CatalogSchema>,
    request: Result<Json<async_graphql::Request>, JsonRejection>,
) -> Response {
    match request {
        Ok(Json(request)) => Json(schema.execute(request).await).into_response(),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "rejected graphql request envelope");

            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errors": [{
                        "message": rejection.body_text(),
                        "extensions": { "code": "BAD_REQUEST" },
                    }]
                })),
            )
                .into_response()
        }
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(ENDPOINT).finish())
}

/// The `Product` object type.
pub struct ProductObject(Product);

#[Object(name = "Product")]
impl ProductObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn price(&self) -> f64 {
        self.0.price
    }

    async fn description(&self) -> Option<&str> {
        Some(self.0.description.as_str())
    }

    async fn in_stock(&self) -> Option<bool> {
        Some(self.0.in_stock)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }
}

pub struct QueryRoot {
    catalog: Catalog,
}

#[Object]
impl QueryRoot {
    /// All products, in the backend's listing order.
    async fn products(&self) -> async_graphql::Result<Vec<ProductObject>> {
        let products = self.catalog.list().await.map_err(into_field_error)?;

        Ok(products.into_iter().map(ProductObject).collect())
    }

    async fn product(&self, id: ID) -> async_graphql::Result<Option<ProductObject>> {
        found(self.catalog.get(id.as_str()).await)
    }
}

pub struct MutationRoot {
    catalog: Catalog,
}

#[Object]
impl MutationRoot {
    async fn add_product(
        &self,
        name: String,
        price: f64,
        description: Option<String>,
        in_stock: Option<bool>,
    ) -> async_graphql::Result<Option<ProductObject>> {
        let input = json!({
            "name": name,
            "price": price,
            "description": description,
            "inStock": in_stock,
        });

        found(self.catalog.create(&input).await)
    }

    /// Changes only the arguments that are given.
    async fn update_product(
        &self,
        id: ID,
        name: Option<String>,
        price: Option<f64>,
        description: Option<String>,
        in_stock: Option<bool>,
    ) -> async_graphql::Result<Option<ProductObject>> {
        let mut input = Map::new();
        if let Some(name) = name {
            input.insert("name".into(), Value::from(name));
        }
        if let Some(price) = price {
            input.insert("price".into(), Value::from(price));
        }
        if let Some(description) = description {
            input.insert("description".into(), Value::from(description));
        }
        if let Some(in_stock) = in_stock {
            input.insert("inStock".into(), Value::from(in_stock));
        }

        found(self.catalog.update(id.as_str(), &Value::Object(input)).await)
    }

    async fn delete_product(&self, id: ID) -> async_graphql::Result<Option<ProductObject>> {
        found(self.catalog.delete(id.as_str()).await)
    }
}

/// Maps a single-record outcome onto a nullable field.
fn found(result: CatalogResult<Product>) -> async_graphql::Result<Option<ProductObject>> {
    match result {
        Ok(product) => Ok(Some(ProductObject(product))),
        Err(CatalogError::NotFound(_)) => Ok(None),
        Err(err) => Err(into_field_error(err)),
    }
}

fn into_field_error(err: CatalogError) -> Error {
    match err {
        CatalogError::Validation(errors) => {
            let fields = errors
                .fields()
                .into_iter()
                .map(|field| async_graphql::Value::String(field.to_string()))
                .collect::<Vec<_>>();

            Error::new(format!("Invalid data: {errors}")).extend_with(|_, ext| {
                ext.set("code", "VALIDATION_FAILED");
                ext.set("fields", async_graphql::Value::List(fields));
            })
        }
        CatalogError::NotFound(_) => {
            Error::new("Product not found").extend_with(|_, ext| ext.set("code", "NOT_FOUND"))
        }
        // Already logged by the catalog
        CatalogError::Infrastructure(_) => Error::new("Server error")
            .extend_with(|_, ext| ext.set("code", "INTERNAL_SERVER_ERROR")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use catalog_memory::InMemoryStore;

    fn test_schema() -> CatalogSchema {
        schema(Catalog::new(InMemoryStore::new()))
    }

    async fn run(schema: &CatalogSchema, query: &str, variables: Value) -> Value {
        let response = schema
            .execute(Request::new(query).variables(Variables::from_json(variables)))
            .await;

        serde_json::to_value(&response).unwrap()
    }

    #[test]
    fn test_sdl_shape() {
        let sdl = test_schema().sdl();

        assert!(sdl.contains("type Product"));
        assert!(sdl.contains("createdAt: DateTime!"));
        assert!(sdl.contains("product(id: ID!): Product"));
        assert!(sdl.contains("deleteProduct(id: ID!): Product"));
    }

    #[tokio::test]
    async fn test_add_then_query() {
        let schema = test_schema();

        let added = run(
            &schema,
            "mutation($name: String!, $price: Float!) { addProduct(name: $name, price: $price) { id name price inStock description } }",
            json!({ "name": "Laptop", "price": 1000 }),
        )
        .await;

        assert_eq!(
            added["data"]["addProduct"],
            json!({ "id": "1", "name": "Laptop", "price": 1000.0, "inStock": true, "description": "" })
        );

        let fetched = run(&schema, r#"{ product(id: "1") { name } }"#, json!({})).await;
        assert_eq!(fetched["data"]["product"]["name"], "Laptop");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids_are_null() {
        let schema = test_schema();

        for id in ["9999", "abc"] {
            let response = run(
                &schema,
                "query($id: ID!) { product(id: $id) { id } }",
                json!({ "id": id }),
            )
            .await;

            assert_eq!(response["data"]["product"], Value::Null);
            assert!(response.get("errors").is_none());
        }
    }

    #[tokio::test]
    async fn test_validation_error_extensions() {
        let schema = test_schema();

        let response = run(
            &schema,
            r#"mutation { addProduct(name: "  ", price: -5) { id } }"#,
            json!({}),
        )
        .await;

        let error = &response["errors"][0];
        assert_eq!(error["extensions"]["code"], "VALIDATION_FAILED");
        assert_eq!(error["extensions"]["fields"], json!(["name", "price"]));
        assert_eq!(response["data"]["addProduct"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_arguments() {
        let schema = test_schema();

        run(
            &schema,
            r#"mutation { addProduct(name: "Phone", price: 500, description: "6 inch") { id } }"#,
            json!({}),
        )
        .await;

        let response = run(
            &schema,
            r#"mutation { updateProduct(id: "1", price: 450) { name price description inStock } }"#,
            json!({}),
        )
        .await;

        assert_eq!(
            response["data"]["updateProduct"],
            json!({ "name": "Phone", "price": 450.0, "description": "6 inch", "inStock": true })
        );
    }
}
