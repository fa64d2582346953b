//! Path resolution and the `(method, shape)` dispatch table.
//!
//! Resolution order is fixed: unknown prefix → 404, bad id → 400, then a
//! table lookup whose miss is 405. Paths are percent-decoded before splitting.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::Extension;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use percent_encoding::percent_decode_str;

use productd_core::ProductId;
use productd_infra::read_model::ProductStore;
use productd_products::ProductDetails;

use crate::app::errors::ApiError;
use crate::app::routes::products;

const RESOURCE: &str = "products";

/// Path shapes under `products/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteShape {
    /// `products/{id}`
    Product,
    /// `products/{id}/details`
    ProductDetails,
}

/// A path that names a product. `shape` is `None` when the suffix after the
/// id is not one we serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPath {
    pub product_id: ProductId,
    pub shape: Option<RouteShape>,
}

pub type Handler = fn(&dyn ProductStore, ProductId, &[u8]) -> Result<ProductDetails, ApiError>;

pub struct Route {
    pub method: Method,
    pub shape: RouteShape,
    pub handler: Handler,
}

pub const ROUTES: &[Route] = &[
    Route {
        method: Method::GET,
        shape: RouteShape::Product,
        handler: products::get_product,
    },
    Route {
        method: Method::POST,
        shape: RouteShape::ProductDetails,
        handler: products::upsert_product_details,
    },
];

/// Split a request path into resource, id and shape.
///
/// The raw path is percent-decoded first, so `%31` is the digit `1` and an
/// encoded `%2F` acts as a separator.
pub fn resolve_path(path: &str) -> Result<ResolvedPath, ApiError> {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let segments: Vec<&str> = decoded.trim_matches('/').split('/').collect();

    let (id_segment, rest) = match segments.as_slice() {
        [resource, id, rest @ ..] if *resource == RESOURCE => (*id, rest),
        _ => return Err(ApiError::route_not_found()),
    };

    let product_id: ProductId = id_segment.parse()?;

    let shape = match rest {
        [] => Some(RouteShape::Product),
        ["details"] => Some(RouteShape::ProductDetails),
        _ => None,
    };

    Ok(ResolvedPath { product_id, shape })
}

pub fn lookup(method: &Method, shape: Option<RouteShape>) -> Option<&'static Route> {
    let shape = shape?;
    ROUTES
        .iter()
        .find(|route| route.method == *method && route.shape == shape)
}

/// Resolve and run one request against the store.
pub fn handle(
    store: &dyn ProductStore,
    method: &Method,
    path: &str,
    body: &[u8],
) -> Result<ProductDetails, ApiError> {
    let resolved = resolve_path(path)?;
    let route = lookup(method, resolved.shape).ok_or_else(ApiError::method_not_allowed)?;
    (route.handler)(store, resolved.product_id, body)
}

/// Catch-all axum handler; every request goes through the dispatch table.
pub async fn dispatch(
    Extension(store): Extension<Arc<dyn ProductStore>>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // An unreadable body is treated as empty; only the POST handler looks at
    // it, and an empty document fails schema decoding there.
    let body = body.unwrap_or_else(|rejection| {
        tracing::debug!(%rejection, "request body unreadable");
        Bytes::new()
    });

    match handle(store.as_ref(), &method, uri.path(), &body) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => {
            tracing::debug!(
                %method,
                path = uri.path(),
                status = err.status().as_u16(),
                error = err.body().error,
                "request rejected"
            );
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use productd_infra::read_model::InMemoryProductStore;

    use crate::app::errors::{INVALID_INPUT, METHOD_NOT_ALLOWED, NOT_FOUND};

    const VALID_BODY: &[u8] =
        br#"{"sku":"SKU-1","manufacturer":"Acme","category_id":2,"weight":10,"some_other_id":-4}"#;

    fn pid(raw: i32) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[test]
    fn resolves_both_shapes() {
        assert_eq!(
            resolve_path("/products/12").unwrap(),
            ResolvedPath {
                product_id: pid(12),
                shape: Some(RouteShape::Product)
            }
        );
        assert_eq!(
            resolve_path("/products/12/details").unwrap(),
            ResolvedPath {
                product_id: pid(12),
                shape: Some(RouteShape::ProductDetails)
            }
        );
    }

    #[test]
    fn surrounding_slashes_are_trimmed() {
        assert_eq!(resolve_path("//products/3//").unwrap().product_id, pid(3));
        assert_eq!(
            resolve_path("products/3/details/").unwrap().shape,
            Some(RouteShape::ProductDetails)
        );
    }

    #[test]
    fn percent_encoded_segments_are_decoded() {
        assert_eq!(resolve_path("/products/%31").unwrap().product_id, pid(1));
        assert_eq!(resolve_path("/%70roducts/1").unwrap().product_id, pid(1));
        assert_eq!(
            resolve_path("/products/%34%32/%64etails").unwrap(),
            ResolvedPath {
                product_id: pid(42),
                shape: Some(RouteShape::ProductDetails)
            }
        );
        assert_eq!(
            resolve_path("/products/%2D5").unwrap_err(),
            ApiError::invalid_product_id()
        );
    }

    #[test]
    fn encoded_path_reaches_stored_record() {
        let store = InMemoryProductStore::new();
        handle(&store, &Method::POST, "/products/1/details", VALID_BODY).unwrap();

        for path in ["/products/%31", "/%70roducts/1"] {
            let fetched = handle(&store, &Method::GET, path, b"").unwrap();
            assert_eq!(fetched.product_id, 1, "path {path:?}");
        }
    }

    #[test]
    fn null_field_is_stored_as_zero() {
        let store = InMemoryProductStore::new();
        let body = br#"{"sku":"S","manufacturer":"M","category_id":1,"weight":1,"some_other_id":null}"#;
        let stored = handle(&store, &Method::POST, "/products/2/details", body).unwrap();
        assert_eq!(stored.some_other_id, 0);
        assert_eq!(store.get(pid(2)).unwrap(), stored);
    }

    #[test]
    fn unknown_prefix_or_too_short_is_route_not_found() {
        for path in ["/", "", "/products", "/products/", "/items/1", "/Products/1"] {
            let err = resolve_path(path).unwrap_err();
            assert_eq!(err, ApiError::route_not_found(), "path {path:?}");
        }
    }

    #[test]
    fn bad_ids_are_invalid_input() {
        for path in ["/products/0", "/products/-5", "/products/abc", "/products//1", "/products/2147483648/details"] {
            let err = resolve_path(path).unwrap_err();
            assert_eq!(err, ApiError::invalid_product_id(), "path {path:?}");
        }
    }

    #[test]
    fn unknown_suffix_resolves_without_shape() {
        assert_eq!(resolve_path("/products/1/reviews").unwrap().shape, None);
        assert_eq!(resolve_path("/products/1/details/x").unwrap().shape, None);
    }

    #[test]
    fn table_has_one_entry_per_method_and_shape() {
        assert!(lookup(&Method::GET, Some(RouteShape::Product)).is_some());
        assert!(lookup(&Method::POST, Some(RouteShape::ProductDetails)).is_some());
        assert!(lookup(&Method::POST, Some(RouteShape::Product)).is_none());
        assert!(lookup(&Method::GET, Some(RouteShape::ProductDetails)).is_none());
        assert!(lookup(&Method::PUT, Some(RouteShape::Product)).is_none());
        assert!(lookup(&Method::GET, None).is_none());
    }

    #[test]
    fn wrong_method_or_suffix_is_method_not_allowed() {
        let store = InMemoryProductStore::new();
        let cases = [
            (Method::PUT, "/products/3"),
            (Method::DELETE, "/products/3"),
            (Method::POST, "/products/3"),
            (Method::GET, "/products/3/details"),
            (Method::GET, "/products/3/reviews"),
        ];
        for (method, path) in cases {
            let err = handle(&store, &method, path, VALID_BODY).unwrap_err();
            assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {path}");
            assert_eq!(err.body().error, METHOD_NOT_ALLOWED);
        }
    }

    #[test]
    fn id_is_checked_before_method() {
        let store = InMemoryProductStore::new();
        let err = handle(&store, &Method::PUT, "/products/abc", b"").unwrap_err();
        assert_eq!(err.body().error, INVALID_INPUT);
    }

    #[test]
    fn get_missing_product_is_not_found() {
        let store = InMemoryProductStore::new();
        let err = handle(&store, &Method::GET, "/products/9", b"").unwrap_err();
        assert_eq!(err, ApiError::product_not_found());
        assert_eq!(err.body().error, NOT_FOUND);
    }

    #[test]
    fn post_then_get_returns_record_bound_to_path_id() {
        let store = InMemoryProductStore::new();
        let stored = handle(&store, &Method::POST, "/products/4/details", VALID_BODY).unwrap();
        assert_eq!(stored.product_id, 4);

        let fetched = handle(&store, &Method::GET, "/products/4", b"").unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.sku, "SKU-1");
        assert_eq!(fetched.some_other_id, -4);
    }

    #[test]
    fn body_product_id_is_ignored() {
        let store = InMemoryProductStore::new();
        let body = br#"{"product_id":77,"sku":"S","manufacturer":"M","category_id":1,"weight":1,"some_other_id":0}"#;
        let stored = handle(&store, &Method::POST, "/products/5/details", body).unwrap();
        assert_eq!(stored.product_id, 5);
        assert!(store.get(pid(77)).is_none());
    }

    #[test]
    fn schema_violations_and_field_violations_are_distinguished() {
        let store = InMemoryProductStore::new();

        let err = handle(&store, &Method::POST, "/products/3/details", b"{not json").unwrap_err();
        assert_eq!(err, ApiError::invalid_body());

        let unknown = br#"{"sku":"S","manufacturer":"M","category_id":1,"weight":1,"foo":1}"#;
        let err = handle(&store, &Method::POST, "/products/3/details", unknown).unwrap_err();
        assert_eq!(err, ApiError::invalid_body());

        let empty_sku = br#"{"sku":"","manufacturer":"M","category_id":1,"weight":1}"#;
        let err = handle(&store, &Method::POST, "/products/3/details", empty_sku).unwrap_err();
        assert_eq!(err, ApiError::invalid_fields());

        assert!(store.is_empty());
    }
}
