use rust_decimal::Decimal;

use furniture_domain::catalog::ProductStatus;
use furniture_store::domain::types::ProductFilter;
use furniture_store::error::StoreServiceError;
use furniture_store::usecase::product::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, UpdateProductInput, UpdateProductUseCase,
};

use crate::helpers::{MockProductRepo, product};

fn create_input(slug: &str) -> CreateProductInput {
    CreateProductInput {
        name: "Oak Table".to_owned(),
        slug: slug.to_owned(),
        description: String::new(),
        price: Decimal::new(45000, 2),
        images: vec![],
        category_id: None,
        specifications: None,
        stock: None,
        featured: None,
        status: None,
        metadata: None,
    }
}

// ── CreateProductUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_product_with_defaults() {
    let usecase = CreateProductUseCase {
        repo: MockProductRepo::empty(),
    };

    let created = usecase.execute(create_input("oak-table")).await.unwrap();

    assert_eq!(created.product.stock, 0);
    assert!(!created.product.featured);
    assert_eq!(created.product.status, ProductStatus::Draft);
    assert_eq!(created.product.price, Decimal::new(45000, 2));
}

#[tokio::test]
async fn should_reject_duplicate_product_slug() {
    let repo = MockProductRepo::new(vec![product(1, "oak-table")]);
    let handle = repo.products_handle();
    let usecase = CreateProductUseCase { repo };

    let result = usecase.execute(create_input("oak-table")).await;

    assert!(
        matches!(result, Err(StoreServiceError::ProductSlugAlreadyExists)),
        "expected ProductSlugAlreadyExists, got {result:?}"
    );
    assert_eq!(handle.lock().unwrap().len(), 1);
}

// ── GetProductUseCase / ListProductsUseCase ──────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_product() {
    let usecase = GetProductUseCase {
        repo: MockProductRepo::empty(),
    };

    let result = usecase.execute(3).await;
    assert!(matches!(result, Err(StoreServiceError::ProductNotFound)));
}

#[tokio::test]
async fn should_filter_products_by_price_range() {
    let mut cheap = product(1, "stool");
    cheap.price = Decimal::new(2500, 2);
    let mut pricey = product(2, "armchair");
    pricey.price = Decimal::new(89000, 2);
    let usecase = ListProductsUseCase {
        repo: MockProductRepo::new(vec![cheap, pricey]),
    };

    let filter = ProductFilter {
        min_price: Some(Decimal::new(100, 0)),
        ..Default::default()
    };
    let found = usecase.execute(filter, None).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].product.slug, "armchair");
}

// ── UpdateProductUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_allow_resubmitting_own_slug() {
    let repo = MockProductRepo::new(vec![product(1, "oak-table")]);
    let usecase = UpdateProductUseCase { repo };

    let updated = usecase
        .execute(
            1,
            UpdateProductInput {
                slug: Some("oak-table".to_owned()),
                stock: Some(12),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.product.stock, 12);
}

#[tokio::test]
async fn should_reject_slug_of_another_product() {
    let repo = MockProductRepo::new(vec![product(1, "oak-table"), product(2, "pine-table")]);
    let usecase = UpdateProductUseCase { repo };

    let result = usecase
        .execute(
            2,
            UpdateProductInput {
                slug: Some("oak-table".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreServiceError::ProductSlugAlreadyExists)
    ));
}

#[tokio::test]
async fn should_clear_category_on_null() {
    let mut stored = product(1, "oak-table");
    stored.category_id = Some(5);
    let repo = MockProductRepo::new(vec![stored]);
    let usecase = UpdateProductUseCase { repo };

    let kept = usecase
        .execute(1, UpdateProductInput::default())
        .await
        .unwrap();
    assert_eq!(kept.product.category_id, Some(5));

    let cleared = usecase
        .execute(
            1,
            UpdateProductInput {
                category_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.product.category_id, None);
}

// ── DeleteProductUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_product() {
    let usecase = DeleteProductUseCase {
        repo: MockProductRepo::empty(),
    };

    let result = usecase.execute(1).await;
    assert!(matches!(result, Err(StoreServiceError::ProductNotFound)));
}
