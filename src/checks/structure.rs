//! Field-presence verification for product records.
//!
//! The product schema is owned by the server, so records are inspected as
//! loose JSON values rather than deserialized into structs; a missing field
//! is a finding, not a parse error.

use serde_json::Value;

use crate::runner::state::TestResult;

/// Fields every product must carry regardless of category
pub const COMMON_FIELDS: [&str; 6] = ["id", "name", "description", "price", "category", "type"];

/// Category-specific fields
pub const SHEET_MUSIC_FIELDS: [&str; 3] = ["composer", "difficulty", "genre"];
pub const GEAR_FIELDS: [&str; 2] = ["brand", "model"];

/// Syntactic UUID shape: 36 characters, exactly 4 hyphens.
/// Deliberately not full RFC 4122 validation.
pub fn uuid_shaped(id: &str) -> bool {
    id.len() == 36 && id.chars().filter(|&c| c == '-').count() == 4
}

/// Verify every record's common fields, plus the category-specific fields of
/// the first record seen per category. Records missing common fields are
/// reported and skipped for category checking.
pub fn verify_products(products: &[Value]) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut sheet_music_seen = false;
    let mut instrument_seen = false;
    let mut accessory_seen = false;

    for product in products {
        let category = product.get("category").and_then(Value::as_str);

        let missing: Vec<&str> = COMMON_FIELDS
            .iter()
            .copied()
            .filter(|f| product.get(f).is_none())
            .collect();

        if !missing.is_empty() {
            results.push(
                TestResult::fail(
                    "Product Structure",
                    format!(
                        "Missing required fields in {} product",
                        category.unwrap_or("uncategorized")
                    ),
                )
                .with_details(serde_json::json!({
                    "missing_fields": missing,
                    "product_id": product.get("id"),
                })),
            );
            continue;
        }

        let name = product.get("name").and_then(Value::as_str).unwrap_or("");

        match category {
            Some("sheet-music") if !sheet_music_seen => {
                sheet_music_seen = true;
                results.push(category_result(
                    "Sheet Music Structure",
                    product,
                    name,
                    &SHEET_MUSIC_FIELDS,
                ));
            }
            Some("instruments") if !instrument_seen => {
                instrument_seen = true;
                results.push(category_result(
                    "Instrument Structure",
                    product,
                    name,
                    &GEAR_FIELDS,
                ));
            }
            Some("accessories") if !accessory_seen => {
                accessory_seen = true;
                results.push(category_result(
                    "Accessory Structure",
                    product,
                    name,
                    &GEAR_FIELDS,
                ));
            }
            _ => {}
        }
    }

    results
}

fn category_result(test_name: &str, product: &Value, name: &str, fields: &[&str]) -> TestResult {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| product.get(f).is_none())
        .collect();

    if missing.is_empty() {
        TestResult::pass(test_name, "All category-specific fields present")
            .with_details(serde_json::json!({ "product": name, "fields": fields }))
    } else {
        TestResult::fail(test_name, "Missing category-specific fields")
            .with_details(serde_json::json!({ "missing": missing, "product": name }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accessory(extra: Value) -> Value {
        let mut product = json!({
            "id": "7f1c9a52-7a6e-4d36-9c1b-2f4f0a8e3d11",
            "name": "Guitar Strap",
            "description": "Leather strap",
            "price": 19.99,
            "category": "accessories",
            "type": "Strap",
        });
        if let (Some(map), Value::Object(extra)) = (product.as_object_mut(), extra) {
            map.extend(extra);
        }
        product
    }

    #[test]
    fn test_uuid_shape() {
        assert!(uuid_shaped("7f1c9a52-7a6e-4d36-9c1b-2f4f0a8e3d11"));
        // 24-char hex, the store-native object id shape
        assert!(!uuid_shaped("507f1f77bcf86cd799439011"));
        assert!(!uuid_shaped(""));
        // right length, wrong hyphen count
        assert!(!uuid_shaped("7f1c9a52x7a6ex4d36x9c1b-2f4f0a8e3d11"));
    }

    #[test]
    fn test_all_fields_present() {
        let products = vec![accessory(json!({"brand": "Levy's", "model": "M8"}))];
        let results = verify_products(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].test_name, "Accessory Structure");
        assert!(results[0].success);
    }

    #[test]
    fn test_missing_common_field_skips_category_check() {
        let mut product = accessory(json!({"brand": "Levy's", "model": "M8"}));
        product.as_object_mut().unwrap().remove("price");

        let results = verify_products(&[product]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].test_name, "Product Structure");
        assert!(!results[0].success);
        assert_eq!(
            results[0].details.get("missing_fields"),
            Some(&json!(["price"]))
        );
    }

    #[test]
    fn test_missing_category_field() {
        let products = vec![accessory(json!({"brand": "Levy's"}))];
        let results = verify_products(&products);
        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert_eq!(results[0].details.get("missing"), Some(&json!(["model"])));
    }

    #[test]
    fn test_one_result_per_category() {
        let sheet = json!({
            "id": "1", "name": "Etude", "description": "d", "price": 9.99,
            "category": "sheet-music", "type": "Classical",
            "composer": "Chopin", "difficulty": "advanced", "genre": "romantic",
        });
        let products = vec![
            sheet.clone(),
            sheet,
            accessory(json!({"brand": "Levy's", "model": "M8"})),
            accessory(json!({"brand": "Ernie Ball", "model": "P04037"})),
        ];

        let results = verify_products(&products);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
    }
}
