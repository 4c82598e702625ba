//! Checks against the products endpoints: root banner, listing, the
//! create → update → delete → verify-deleted cycle, and the id shape check.

use serde_json::{json, Value};

use super::{structure, Check, SERVICE_NAME};
use crate::runner::http::ApiClient;
use crate::runner::state::{RunnerState, TestResult};

const CREATE_NAME: &str = "Test Guitar Strings";
const CREATE_PRICE: f64 = 12.99;
const UPDATE_NAME: &str = "Updated Test Guitar Strings";
const UPDATE_PRICE: f64 = 15.99;

const EXPECTED_CATEGORIES: [&str; 3] = ["sheet-music", "instruments", "accessories"];

/// Payload submitted by the create check
pub fn create_fixture() -> Value {
    json!({
        "name": CREATE_NAME,
        "description": "High-quality steel guitar strings for acoustic guitars",
        "price": CREATE_PRICE,
        "category": "accessories",
        "type": "Guitar Strings",
        "brand": "D'Addario",
        "model": "EJ16",
    })
}

/// Payload submitted by the update check; changed name and price
pub fn update_fixture() -> Value {
    json!({
        "name": UPDATE_NAME,
        "description": "Premium steel guitar strings for acoustic guitars - Updated",
        "price": UPDATE_PRICE,
        "category": "accessories",
        "type": "Guitar Strings",
        "brand": "D'Addario",
        "model": "EJ16-Updated",
    })
}

/// GET /api — the root must answer 200 with the service banner
pub async fn api_root(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::ApiRoot.name();

    let response = match client.get_root().await {
        Ok(r) => r,
        Err(e) => return state.record(TestResult::fail(name, format!("Request error: {e:#}"))),
    };

    if response.status.as_u16() != 200 {
        return state.record(
            TestResult::fail(name, format!("HTTP {}", response.status.as_u16()))
                .with_details(json!({"response": response.text})),
        );
    }

    match response.require_json() {
        Ok(body) => {
            let banner_present = body
                .get("message")
                .and_then(Value::as_str)
                .map_or(false, |m| m.contains(SERVICE_NAME));

            if banner_present {
                state.record(
                    TestResult::pass(name, "API root endpoint responding correctly")
                        .with_details(json!({"response": body})),
                );
            } else {
                state.record(
                    TestResult::fail(name, "Unexpected response format")
                        .with_details(json!({"response": body})),
                );
            }
        }
        Err(e) => state.record(TestResult::fail(name, format!("{e:#}"))),
    }
}

/// GET /api/products — all seeded categories present; on pass the record
/// structures are verified too, each category reported as its own result.
pub async fn list_products(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::ListProducts.name();

    let response = match client.get_products().await {
        Ok(r) => r,
        Err(e) => return state.record(TestResult::fail(name, format!("Request error: {e:#}"))),
    };

    if response.status.as_u16() != 200 {
        return state.record(
            TestResult::fail(name, format!("HTTP {}", response.status.as_u16()))
                .with_details(json!({"response": response.text})),
        );
    }

    let body = match response.require_json() {
        Ok(body) => body.clone(),
        Err(e) => return state.record(TestResult::fail(name, format!("{e:#}"))),
    };

    let products = match body.as_array() {
        Some(products) if !products.is_empty() => products.clone(),
        _ => {
            return state.record(
                TestResult::fail(name, "No products returned or invalid format")
                    .with_details(json!({"response": body})),
            )
        }
    };

    let categories: Vec<&str> = {
        let mut seen: Vec<&str> = products
            .iter()
            .filter_map(|p| p.get("category").and_then(Value::as_str))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen
    };

    let missing: Vec<&str> = EXPECTED_CATEGORIES
        .iter()
        .copied()
        .filter(|c| !categories.contains(c))
        .collect();

    if missing.is_empty() {
        state.record(
            TestResult::pass(
                name,
                format!("Retrieved {} products with all categories", products.len()),
            )
            .with_details(json!({
                "product_count": products.len(),
                "categories": categories,
            })),
        );

        for result in structure::verify_products(&products) {
            state.record(result);
        }
    } else {
        state.record(
            TestResult::fail(name, "Missing expected product categories").with_details(json!({
                "found_categories": categories,
                "expected": EXPECTED_CATEGORIES,
            })),
        );
    }
}

/// The first listed product's id must look like a textual UUID, not a
/// store-native object id.
pub async fn uuid_shape(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::UuidShape.name();

    let response = match client.get_products().await {
        Ok(r) => r,
        Err(e) => return state.record(TestResult::fail(name, format!("Request error: {e:#}"))),
    };

    if response.status.as_u16() != 200 {
        return state.record(TestResult::fail(
            name,
            "Could not fetch products to check ids",
        ));
    }

    let first_record = response
        .json
        .as_ref()
        .and_then(Value::as_array)
        .and_then(|products| products.first());

    // An empty listing and a listed record with a bad id are different
    // findings: the first means there is nothing to judge, the second is
    // a store handing out the wrong id shape.
    match first_record {
        Some(record) => {
            let sample_id = record.get("id").and_then(Value::as_str);
            match sample_id {
                Some(id) if structure::uuid_shaped(id) => state.record(
                    TestResult::pass(name, "Products are using UUIDs correctly")
                        .with_details(json!({"sample_id": id})),
                ),
                _ => state.record(
                    TestResult::fail(name, "Products not using proper UUIDs")
                        .with_details(json!({"sample_id": sample_id})),
                ),
            }
        }
        None => state.record(TestResult::fail(name, "No products to check id format")),
    }
}

/// POST /api/products — expects exactly 201 and an echoed name; the returned
/// id is stored for the dependent update/delete steps.
pub async fn create_product(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::CreateProduct.name();
    let fixture = create_fixture();

    let response = match client.create_product(&fixture).await {
        Ok(r) => r,
        Err(e) => return state.record(TestResult::fail(name, format!("Request error: {e:#}"))),
    };

    if response.status.as_u16() != 201 {
        return state.record(
            TestResult::fail(name, format!("HTTP {}", response.status.as_u16()))
                .with_details(json!({"response": response.text})),
        );
    }

    let created = match response.require_json() {
        Ok(body) => body,
        Err(e) => return state.record(TestResult::fail(name, format!("{e:#}"))),
    };

    let id = created.get("id").and_then(Value::as_str);
    let name_echoed = created.get("name").and_then(Value::as_str) == Some(CREATE_NAME);

    match id {
        Some(id) if name_echoed => {
            state.record(
                TestResult::pass(name, "Product created successfully").with_details(json!({
                    "product_id": id,
                    "product_name": CREATE_NAME,
                })),
            );
            state.store_created_id(id.to_string());
        }
        _ => state.record(
            TestResult::fail(name, "Product created but response format incorrect")
                .with_details(json!({"response": created})),
        ),
    }
}

/// PUT /api/products/{id} — the response must echo the changed name and price
pub async fn update_product(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::UpdateProduct.name();
    let id = match state.created_product_id.clone() {
        Some(id) => id,
        None => {
            return state.record(TestResult::fail(
                name,
                "No product ID available for update test",
            ))
        }
    };

    let response = match client.update_product(&id, &update_fixture()).await {
        Ok(r) => r,
        Err(e) => return state.record(TestResult::fail(name, format!("Request error: {e:#}"))),
    };

    if response.status.as_u16() != 200 {
        return state.record(
            TestResult::fail(name, format!("HTTP {}", response.status.as_u16()))
                .with_details(json!({"response": response.text})),
        );
    }

    match response.require_json() {
        Ok(updated) => {
            let name_matches = updated.get("name").and_then(Value::as_str) == Some(UPDATE_NAME);
            let price_matches = updated.get("price").and_then(Value::as_f64) == Some(UPDATE_PRICE);

            if name_matches && price_matches {
                state.record(
                    TestResult::pass(name, "Product updated successfully").with_details(json!({
                        "product_id": id,
                        "updated_name": UPDATE_NAME,
                        "updated_price": UPDATE_PRICE,
                    })),
                );
            } else {
                state.record(
                    TestResult::fail(name, "Product update response incorrect")
                        .with_details(json!({"response": updated})),
                );
            }
        }
        Err(e) => state.record(TestResult::fail(name, format!("{e:#}"))),
    }
}

/// DELETE /api/products/{id} — expects `{"success": true}`; on pass the
/// listing is re-fetched to confirm the record is actually gone.
pub async fn delete_product(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::DeleteProduct.name();
    let id = match state.created_product_id.clone() {
        Some(id) => id,
        None => {
            return state.record(TestResult::fail(
                name,
                "No product ID available for delete test",
            ))
        }
    };

    let response = match client.delete_product(&id).await {
        Ok(r) => r,
        Err(e) => return state.record(TestResult::fail(name, format!("Request error: {e:#}"))),
    };

    if response.status.as_u16() != 200 {
        return state.record(
            TestResult::fail(name, format!("HTTP {}", response.status.as_u16()))
                .with_details(json!({"response": response.text})),
        );
    }

    let acknowledged = response
        .json
        .as_ref()
        .and_then(|body| body.get("success"))
        .and_then(Value::as_bool)
        == Some(true);

    if acknowledged {
        state.record(
            TestResult::pass(name, "Product deleted successfully")
                .with_details(json!({"product_id": id})),
        );
        verify_deleted(client, state, &id).await;
    } else {
        state.record(
            TestResult::fail(name, "Delete response format incorrect")
                .with_details(json!({"response": response.json})),
        );
    }
}

/// Confirm the deleted id no longer appears in the listing
async fn verify_deleted(client: &ApiClient, state: &mut RunnerState, id: &str) {
    let name = "Verify Product Deleted";

    let response = match client.get_products().await {
        Ok(r) => r,
        Err(e) => {
            return state.record(TestResult::fail(
                name,
                format!("Error verifying deletion: {e:#}"),
            ))
        }
    };

    if response.status.as_u16() != 200 {
        return state.record(TestResult::fail(
            name,
            "Could not verify deletion - GET products failed",
        ));
    }

    let still_listed = response
        .json
        .as_ref()
        .and_then(Value::as_array)
        .map_or(false, |products| contains_id(products, id));

    if still_listed {
        state.record(TestResult::fail(
            name,
            "Deleted product still exists in database",
        ));
    } else {
        state.record(TestResult::pass(
            name,
            "Deleted product no longer exists in database",
        ));
    }
}

fn contains_id(products: &[Value], id: &str) -> bool {
    products
        .iter()
        .any(|p| p.get("id").and_then(Value::as_str) == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve one canned HTTP response on an ephemeral port, returning the
    /// base URL to point the client at.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_root_rejects_non_200_success_status() {
        // 202 with an otherwise perfect banner body must still fail:
        // the contract is exactly 200, not any 2xx
        let base =
            one_shot_server("202 Accepted", r#"{"message":"MusicMerchant API root"}"#).await;
        let client = ApiClient::new(&base).unwrap();
        let mut state = RunnerState::new(&base);

        api_root(&client, &mut state).await;

        assert_eq!(state.results.len(), 1);
        assert!(!state.results[0].success);
        assert_eq!(state.results[0].message, "HTTP 202");
    }

    #[tokio::test]
    async fn test_update_rejects_non_200_success_status() {
        let base = one_shot_server(
            "202 Accepted",
            r#"{"name":"Updated Test Guitar Strings","price":15.99}"#,
        )
        .await;
        let client = ApiClient::new(&base).unwrap();
        let mut state = RunnerState::new(&base);
        state.store_created_id("7f1c9a52-7a6e-4d36-9c1b-2f4f0a8e3d11".to_string());

        update_product(&client, &mut state).await;

        assert_eq!(state.results.len(), 1);
        assert!(!state.results[0].success);
        assert_eq!(state.results[0].message, "HTTP 202");
    }

    #[tokio::test]
    async fn test_uuid_check_missing_id_is_a_shape_failure() {
        // A listed record without an id is a bad id shape, not an empty store
        let base = one_shot_server("200 OK", r#"[{"name":"Guitar Strap"}]"#).await;
        let client = ApiClient::new(&base).unwrap();
        let mut state = RunnerState::new(&base);

        uuid_shape(&client, &mut state).await;

        assert_eq!(state.results.len(), 1);
        assert!(!state.results[0].success);
        assert_eq!(state.results[0].message, "Products not using proper UUIDs");
        assert_eq!(
            state.results[0].details.get("sample_id"),
            Some(&Value::Null)
        );
    }

    #[tokio::test]
    async fn test_uuid_check_empty_listing() {
        let base = one_shot_server("200 OK", "[]").await;
        let client = ApiClient::new(&base).unwrap();
        let mut state = RunnerState::new(&base);

        uuid_shape(&client, &mut state).await;

        assert_eq!(state.results.len(), 1);
        assert!(!state.results[0].success);
        assert_eq!(state.results[0].message, "No products to check id format");
    }

    #[test]
    fn test_fixture_values() {
        let create = create_fixture();
        assert_eq!(create["name"], json!(CREATE_NAME));
        assert_eq!(create["price"], json!(12.99));
        assert_eq!(create["category"], json!("accessories"));
        // no id field: the server assigns one
        assert!(create.get("id").is_none());

        let update = update_fixture();
        assert_eq!(update["name"], json!(UPDATE_NAME));
        assert_eq!(update["price"], json!(15.99));
        assert_ne!(create["model"], update["model"]);
    }

    #[test]
    fn test_contains_id() {
        let products = vec![
            json!({"id": "a", "name": "first"}),
            json!({"id": "b", "name": "second"}),
            json!({"name": "no id at all"}),
        ];
        assert!(contains_id(&products, "b"));
        assert!(!contains_id(&products, "c"));
    }
}
