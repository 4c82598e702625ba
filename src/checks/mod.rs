pub mod products;
pub mod routes;
pub mod structure;

/// The identifying string the API root must echo in its `message` field
pub const SERVICE_NAME: &str = "MusicMerchant API";

/// One step of the verification sequence. The order of `SEQUENCE` is the
/// order the steps run in and is part of the contract: create must precede
/// update and delete, and delete-verification rides on the delete step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// GET /api responds with the service banner
    ApiRoot,
    /// GET /api/products returns all seeded categories; on pass, every
    /// record's structure is verified as well
    ListProducts,
    /// Product ids are textual UUIDs, not store-native object ids
    UuidShape,
    /// POST a fixture product, remember its id
    CreateProduct,
    /// PUT changed fields against the remembered id
    UpdateProduct,
    /// DELETE the remembered id; on pass, confirm it is gone from the list
    DeleteProduct,
    /// Unknown paths answer 404
    InvalidRoutes,
    /// A non-JSON body with a JSON content-type is rejected
    MalformedJson,
    /// Updating an id that does not exist is handled gracefully
    UpdateNonexistent,
}

impl Check {
    pub const SEQUENCE: [Check; 9] = [
        Check::ApiRoot,
        Check::ListProducts,
        Check::UuidShape,
        Check::CreateProduct,
        Check::UpdateProduct,
        Check::DeleteProduct,
        Check::InvalidRoutes,
        Check::MalformedJson,
        Check::UpdateNonexistent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::ApiRoot => "API Root",
            Check::ListProducts => "GET All Products",
            Check::UuidShape => "UUID Usage",
            Check::CreateProduct => "POST Create Product",
            Check::UpdateProduct => "PUT Update Product",
            Check::DeleteProduct => "DELETE Product",
            Check::InvalidRoutes => "Invalid Routes",
            Check::MalformedJson => "Malformed JSON",
            Check::UpdateNonexistent => "Nonexistent Product Update",
        }
    }

    /// Steps that must not run without the id stored by the create check.
    /// When it is missing they fail outright, without touching the network.
    pub fn requires_created_id(&self) -> bool {
        matches!(self, Check::UpdateProduct | Check::DeleteProduct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let position = |c: Check| {
            Check::SEQUENCE
                .iter()
                .position(|&s| s == c)
                .expect("check missing from sequence")
        };

        // create precedes the steps that consume its id
        assert!(position(Check::CreateProduct) < position(Check::UpdateProduct));
        assert!(position(Check::UpdateProduct) < position(Check::DeleteProduct));
        // list precedes the shape check that reads the first record
        assert!(position(Check::ListProducts) < position(Check::UuidShape));
        assert_eq!(Check::SEQUENCE.len(), 9);
    }

    #[test]
    fn test_prerequisites() {
        assert!(Check::UpdateProduct.requires_created_id());
        assert!(Check::DeleteProduct.requires_created_id());
        assert!(!Check::CreateProduct.requires_created_id());
        assert!(!Check::InvalidRoutes.requires_created_id());
    }
}
