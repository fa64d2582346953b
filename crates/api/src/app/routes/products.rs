use productd_core::{DomainError, ProductId};
use productd_infra::read_model::ProductStore;
use productd_products::ProductDetails;

use crate::app::errors::ApiError;

/// `GET /products/{id}`
pub fn get_product(
    store: &dyn ProductStore,
    id: ProductId,
    _body: &[u8],
) -> Result<ProductDetails, ApiError> {
    store.get(id).ok_or_else(|| {
        tracing::debug!(product_id = %id, "product not found");
        DomainError::not_found().into()
    })
}

/// `POST /products/{id}/details`
///
/// Replace-on-write: the stored record becomes exactly the decoded body, with
/// `product_id` forced to the path id.
pub fn upsert_product_details(
    store: &dyn ProductStore,
    id: ProductId,
    body: &[u8],
) -> Result<ProductDetails, ApiError> {
    let details = ProductDetails::from_json_slice(body).map_err(|e| {
        tracing::debug!(product_id = %id, error = %e, "request body rejected");
        ApiError::invalid_body()
    })?;

    if let Err(e) = details.validate() {
        tracing::debug!(product_id = %id, error = %e, "product details rejected");
        return Err(e.into());
    }

    let details = details.with_product_id(id);
    store.put(id, details.clone());
    tracing::info!(product_id = %id, sku = %details.sku, "product details stored");

    Ok(details)
}
