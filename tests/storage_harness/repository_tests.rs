//! Macro-generated test suite for the cart and product repositories.
//!
//! The `repository_tests!` macro runs every catalog operation against a
//! backend: snapshot semantics, derived totals, not-found handling,
//! validation, identifier conflicts and concurrent cart mutations.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! repository_tests!(StoreFixture::json_files());
//! ```

/// Generate the repository test suite for one backend.
///
/// `$factory` must evaluate to a [`StoreFixture`](super::StoreFixture).
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use catalog::core::error::CatalogError;
            use catalog::core::model::{CartDraft, NewProduct, ProductStatus, ProductType};
            use catalog::repository::IdGenerator;
            use futures_util::future::join_all;
            use uuid::Uuid;

            // ==================================================================
            // Products
            // ==================================================================

            #[tokio::test]
            async fn test_create_product_generates_id_and_defaults() {
                let fixture = $factory;
                let (_, products) = fixture.repositories();

                let product = products.create(NewProduct::new("Gel", 2.5)).await.unwrap();

                assert_eq!(product.product_type, ProductType::Gel);
                assert_eq!(product.product_status, ProductStatus::InStock);
                assert_eq!(products.get(&product.product_id).await.unwrap(), product);
            }

            #[tokio::test]
            async fn test_create_product_rejects_invalid_input() {
                let fixture = $factory;
                let (_, products) = fixture.repositories();

                for input in [
                    NewProduct::new("", 1.0),
                    NewProduct::new("Bar", -0.5),
                    NewProduct::new("Bar", f64::NAN),
                ] {
                    let result = products.create(input).await;
                    assert!(matches!(result, Err(CatalogError::Validation { .. })));
                }
                assert!(products.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_get_missing_product() {
                let fixture = $factory;
                let (_, products) = fixture.repositories();

                let result = products.get(&Uuid::new_v4()).await;
                assert!(matches!(
                    result,
                    Err(CatalogError::NotFound { entity_type: "product", .. })
                ));
            }

            #[tokio::test]
            async fn test_delete_product() {
                let fixture = $factory;
                let (_, products) = fixture.repositories();
                let product = products.create(NewProduct::new("Drink", 1.0)).await.unwrap();

                let result = products.delete(&product.product_id).await.unwrap();
                assert_eq!(result.deleted_id, product.product_id);
                assert!(result.success);

                let again = products.delete(&product.product_id).await;
                assert!(matches!(again, Err(CatalogError::NotFound { .. })));
            }

            #[tokio::test]
            async fn test_failed_product_delete_reports_unsuccessful() {
                let fixture = $factory;
                let (_, products) = fixture.repositories_failing_deletes();
                let product = products.create(NewProduct::new("Sticky", 1.0)).await.unwrap();

                let result = products.delete(&product.product_id).await.unwrap();
                assert_eq!(result.deleted_id, product.product_id);
                assert!(!result.success);
                assert_eq!(products.get(&product.product_id).await.unwrap(), product);
            }

            // ==================================================================
            // Carts
            // ==================================================================

            #[tokio::test]
            async fn test_create_cart_recomputes_total() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let draft = CartDraft::named("Weekend")
                    .with_products(vec![
                        create_test_product("a", 2.0),
                        create_test_product("b", 3.0),
                    ])
                    .with_total_price(100.0);

                let cart = carts.create(draft).await.unwrap();
                assert_price(cart.total_price, 5.0);
                assert_eq!(carts.get(&cart.cart_id).await.unwrap(), cart);
            }

            #[tokio::test]
            async fn test_create_cart_rejects_empty_name() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();

                let result = carts.create(CartDraft::named("")).await;
                assert!(matches!(result, Err(CatalogError::Validation { .. })));
                assert!(carts.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_cart_replaces_contents() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let cart = carts
                    .create(CartDraft::named("Old").with_products(vec![create_test_product("a", 1.0)]))
                    .await
                    .unwrap();

                let replacement = create_test_product("b", 7.0);
                let updated = carts
                    .update(
                        &cart.cart_id,
                        CartDraft::named("New")
                            .with_products(vec![replacement.clone()])
                            .with_total_price(0.0),
                    )
                    .await
                    .unwrap();

                assert_eq!(updated.cart_id, cart.cart_id);
                assert_eq!(updated.cart_name, "New");
                assert_eq!(updated.products, vec![replacement]);
                assert_price(updated.total_price, 7.0);
                assert_eq!(carts.get(&cart.cart_id).await.unwrap(), updated);
            }

            #[tokio::test]
            async fn test_update_missing_cart() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let id = Uuid::new_v4();

                let result = carts.update(&id, CartDraft::named("x")).await;
                assert!(matches!(result, Err(CatalogError::NotFound { entity_type: "cart", .. })));
                assert!(carts.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_cart() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let cart = carts.create(CartDraft::named("c")).await.unwrap();

                let result = carts.delete(&cart.cart_id).await.unwrap();
                assert!(result.success);
                assert!(matches!(
                    carts.get(&cart.cart_id).await,
                    Err(CatalogError::NotFound { .. })
                ));
                assert!(matches!(
                    carts.delete(&cart.cart_id).await,
                    Err(CatalogError::NotFound { .. })
                ));
            }

            #[tokio::test]
            async fn test_failed_cart_delete_reports_unsuccessful() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories_failing_deletes();
                let cart = carts.create(CartDraft::named("Sticky")).await.unwrap();

                let result = carts.delete(&cart.cart_id).await.unwrap();
                assert_eq!(result.deleted_id, cart.cart_id);
                assert!(!result.success);
                assert_eq!(carts.get(&cart.cart_id).await.unwrap(), cart);
            }

            #[tokio::test]
            async fn test_update_validates_before_lookup() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();

                let result = carts.update(&Uuid::new_v4(), CartDraft::named("")).await;
                assert!(matches!(result, Err(CatalogError::Validation { .. })));
            }

            // ==================================================================
            // Cart contents
            // ==================================================================

            #[tokio::test]
            async fn test_add_remove_empty_scenario() {
                let fixture = $factory;
                let (carts, products) = fixture.repositories();
                let a = products.create(NewProduct::new("A", 10.0)).await.unwrap();
                let b = products.create(NewProduct::new("B", 15.0)).await.unwrap();
                let cart = carts.create(CartDraft::named("Shopping")).await.unwrap();
                assert_price(cart.total_price, 0.0);

                carts.add_product(&cart.cart_id, &a.product_id).await.unwrap();
                let cart = carts.add_product(&cart.cart_id, &b.product_id).await.unwrap();
                assert_eq!(cart.products, vec![a.clone(), b.clone()]);
                assert_price(cart.total_price, 25.0);

                let cart = carts.remove_product(&cart.cart_id, &a.product_id).await.unwrap();
                assert_eq!(cart.products, vec![b]);
                assert_price(cart.total_price, 15.0);

                let cart = carts.empty(&cart.cart_id).await.unwrap();
                assert!(cart.products.is_empty());
                assert_price(cart.total_price, 0.0);
                assert_eq!(carts.get(&cart.cart_id).await.unwrap(), cart);
            }

            #[tokio::test]
            async fn test_add_same_product_twice_then_remove_once() {
                let fixture = $factory;
                let (carts, products) = fixture.repositories();
                let gel = products.create(NewProduct::new("Gel", 2.0)).await.unwrap();
                let cart = carts.create(CartDraft::named("c")).await.unwrap();

                carts.add_product(&cart.cart_id, &gel.product_id).await.unwrap();
                carts.add_product(&cart.cart_id, &gel.product_id).await.unwrap();
                let cart = carts.remove_product(&cart.cart_id, &gel.product_id).await.unwrap();

                assert_eq!(cart.products.len(), 1);
                assert_price(cart.total_price, 2.0);
            }

            #[tokio::test]
            async fn test_add_missing_product_leaves_cart_unchanged() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let cart = carts
                    .create(CartDraft::named("c").with_products(vec![create_test_product("a", 1.0)]))
                    .await
                    .unwrap();

                let result = carts.add_product(&cart.cart_id, &Uuid::new_v4()).await;
                assert!(matches!(
                    result,
                    Err(CatalogError::NotFound { entity_type: "product", .. })
                ));
                assert_eq!(carts.get(&cart.cart_id).await.unwrap(), cart);
            }

            #[tokio::test]
            async fn test_add_to_missing_cart() {
                let fixture = $factory;
                let (carts, products) = fixture.repositories();
                let product = products.create(NewProduct::new("p", 1.0)).await.unwrap();

                let result = carts.add_product(&Uuid::new_v4(), &product.product_id).await;
                assert!(matches!(result, Err(CatalogError::NotFound { entity_type: "cart", .. })));
            }

            #[tokio::test]
            async fn test_remove_product_not_in_cart() {
                let fixture = $factory;
                let (carts, products) = fixture.repositories();
                let inside = products.create(NewProduct::new("in", 4.0)).await.unwrap();
                let outside = products.create(NewProduct::new("out", 6.0)).await.unwrap();
                let cart = carts.create(CartDraft::named("c")).await.unwrap();
                let cart = carts.add_product(&cart.cart_id, &inside.product_id).await.unwrap();

                let after = carts.remove_product(&cart.cart_id, &outside.product_id).await.unwrap();
                assert_eq!(after, cart);
            }

            #[tokio::test]
            async fn test_remove_requires_existing_product() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let cart = carts.create(CartDraft::named("c")).await.unwrap();

                let result = carts.remove_product(&cart.cart_id, &Uuid::new_v4()).await;
                assert!(matches!(
                    result,
                    Err(CatalogError::NotFound { entity_type: "product", .. })
                ));
            }

            #[tokio::test]
            async fn test_empty_is_idempotent() {
                let fixture = $factory;
                let (carts, _) = fixture.repositories();
                let cart = carts.create(CartDraft::named("c")).await.unwrap();

                let first = carts.empty(&cart.cart_id).await.unwrap();
                let second = carts.empty(&cart.cart_id).await.unwrap();
                assert_eq!(first, second);
                assert!(matches!(
                    carts.empty(&Uuid::new_v4()).await,
                    Err(CatalogError::NotFound { .. })
                ));
            }

            #[tokio::test]
            async fn test_snapshots_survive_product_deletion() {
                let fixture = $factory;
                let (carts, products) = fixture.repositories();
                let product = products.create(NewProduct::new("Gone soon", 5.0)).await.unwrap();
                let cart = carts.create(CartDraft::named("c")).await.unwrap();
                carts.add_product(&cart.cart_id, &product.product_id).await.unwrap();

                products.delete(&product.product_id).await.unwrap();

                let cart = carts.get(&cart.cart_id).await.unwrap();
                assert_eq!(cart.products, vec![product]);
                assert_price(cart.total_price, 5.0);
            }

            // ==================================================================
            // Identifiers and concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_id_collision_exhausts_attempts() {
                let fixture = $factory;
                let fixed = Uuid::new_v4();
                let (carts, _) = fixture.repositories_with(IdGenerator::with_source(2, move || fixed));

                let first = carts.create(CartDraft::named("first")).await.unwrap();
                assert_eq!(first.cart_id, fixed);

                let second = carts.create(CartDraft::named("second")).await;
                assert!(matches!(
                    second,
                    Err(CatalogError::Conflict { entity_type: "cart", attempts: 2 })
                ));
                assert_eq!(carts.get(&fixed).await.unwrap().cart_name, "first");
            }

            #[tokio::test]
            async fn test_concurrent_adds_are_not_lost() {
                let fixture = $factory;
                let (carts, products) = fixture.repositories();
                let product = products.create(NewProduct::new("Bar", 1.5)).await.unwrap();
                let cart = carts.create(CartDraft::named("busy")).await.unwrap();

                let results = join_all(
                    (0..10).map(|_| carts.add_product(&cart.cart_id, &product.product_id)),
                )
                .await;
                assert!(results.iter().all(Result::is_ok));

                let cart = carts.get(&cart.cart_id).await.unwrap();
                assert_eq!(cart.products.len(), 10);
                assert_price(cart.total_price, 15.0);
            }
        }
    };
}
