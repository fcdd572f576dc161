use furniture_store::error::StoreServiceError;
use furniture_store::usecase::category::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryTreeUseCase,
    GetCategoryUseCase, UpdateCategoryInput, UpdateCategoryUseCase,
};

use crate::helpers::{MockCategoryRepo, category};

fn create_input(name: &str, slug: &str, parent_id: Option<i32>) -> CreateCategoryInput {
    CreateCategoryInput {
        name: name.to_owned(),
        slug: slug.to_owned(),
        description: String::new(),
        image: None,
        parent_id,
        level: None,
        order: None,
        is_active: None,
        metadata: None,
    }
}

// ── CreateCategoryUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_root_category_with_defaults() {
    let usecase = CreateCategoryUseCase {
        repo: MockCategoryRepo::empty(),
    };

    let created = usecase
        .execute(create_input("Living Room", "living-room", None))
        .await
        .unwrap();

    assert_eq!(created.level, 0);
    assert_eq!(created.order, 0);
    assert!(created.is_active);
    assert_eq!(created.parent_id, None);
}

#[tokio::test]
async fn should_derive_level_from_parent() {
    let repo = MockCategoryRepo::new(vec![category(1, "Living Room", None, 0)]);
    let usecase = CreateCategoryUseCase { repo };

    let created = usecase
        .execute(create_input("Sofas", "sofas", Some(1)))
        .await
        .unwrap();

    assert_eq!(created.parent_id, Some(1));
    assert_eq!(created.level, 1);
}

#[tokio::test]
async fn should_keep_explicit_level() {
    let repo = MockCategoryRepo::new(vec![category(1, "Living Room", None, 0)]);
    let usecase = CreateCategoryUseCase { repo };

    let mut input = create_input("Sofas", "sofas", Some(1));
    input.level = Some(4);
    let created = usecase.execute(input).await.unwrap();

    assert_eq!(created.level, 4);
}

#[tokio::test]
async fn should_reject_duplicate_name_or_slug() {
    let repo = MockCategoryRepo::new(vec![category(1, "Sofas", None, 0)]);
    let handle = repo.categories_handle();
    let usecase = CreateCategoryUseCase { repo };

    let by_name = usecase
        .execute(create_input("Sofas", "couches", None))
        .await;
    assert!(
        matches!(by_name, Err(StoreServiceError::CategoryAlreadyExists)),
        "expected CategoryAlreadyExists, got {by_name:?}"
    );

    let by_slug = usecase
        .execute(create_input("Couches", "sofas", None))
        .await;
    assert!(matches!(
        by_slug,
        Err(StoreServiceError::CategoryAlreadyExists)
    ));
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_missing_parent() {
    let usecase = CreateCategoryUseCase {
        repo: MockCategoryRepo::empty(),
    };

    let result = usecase
        .execute(create_input("Sofas", "sofas", Some(42)))
        .await;

    assert!(
        matches!(result, Err(StoreServiceError::InvalidReference)),
        "expected InvalidReference, got {result:?}"
    );
}

// ── GetCategoryUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_parent_and_children_summaries() {
    let mut beds = category(4, "Beds", Some(2), 1);
    beds.order = 2;
    let mut wardrobes = category(3, "Wardrobes", Some(2), 1);
    wardrobes.order = 1;
    let repo = MockCategoryRepo::new(vec![
        category(1, "Home", None, 0),
        category(2, "Bedroom", Some(1), 1),
        beds,
        wardrobes,
    ]);
    let usecase = GetCategoryUseCase { repo };

    let detail = usecase.execute(2).await.unwrap();

    assert_eq!(detail.category.name, "Bedroom");
    assert_eq!(detail.parent.map(|p| p.id), Some(1));
    let children: Vec<i32> = detail.children.iter().map(|c| c.id).collect();
    assert_eq!(children, vec![3, 4]);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_category() {
    let usecase = GetCategoryUseCase {
        repo: MockCategoryRepo::empty(),
    };

    let result = usecase.execute(9).await;
    assert!(matches!(result, Err(StoreServiceError::CategoryNotFound)));
}

// ── GetCategoryTreeUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_nest_categories_under_their_parents() {
    let repo = MockCategoryRepo::new(vec![
        category(1, "Living Room", None, 0),
        category(2, "Sofas", Some(1), 1),
        category(3, "Bedroom", None, 0),
        category(4, "Corner Sofas", Some(2), 2),
    ]);
    let usecase = GetCategoryTreeUseCase { repo };

    let tree = usecase.execute().await.unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].category.id, 1);
    assert_eq!(tree[0].children[0].category.id, 2);
    assert_eq!(tree[0].children[0].children[0].category.id, 4);
    assert!(tree[1].children.is_empty());
}

// ── UpdateCategoryUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_self_parent() {
    let repo = MockCategoryRepo::new(vec![category(1, "Sofas", None, 0)]);
    let usecase = UpdateCategoryUseCase { repo };

    let result = usecase
        .execute(
            1,
            UpdateCategoryInput {
                parent_id: Some(Some(1)),
                ..Default::default()
            },
        )
        .await;

    assert!(
        matches!(result, Err(StoreServiceError::InvalidParent)),
        "expected InvalidParent, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_keeping_own_name_and_slug() {
    let repo = MockCategoryRepo::new(vec![category(1, "Sofas", None, 0)]);
    let usecase = UpdateCategoryUseCase { repo };

    let updated = usecase
        .execute(
            1,
            UpdateCategoryInput {
                name: Some("Sofas".to_owned()),
                slug: Some("sofas".to_owned()),
                order: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.order, 5);
}

#[tokio::test]
async fn should_reject_name_taken_by_another_category() {
    let repo = MockCategoryRepo::new(vec![
        category(1, "Sofas", None, 0),
        category(2, "Chairs", None, 0),
    ]);
    let usecase = UpdateCategoryUseCase { repo };

    let result = usecase
        .execute(
            2,
            UpdateCategoryInput {
                name: Some("Sofas".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreServiceError::CategoryAlreadyExists)
    ));
}

#[tokio::test]
async fn should_move_category_and_recompute_level() {
    let repo = MockCategoryRepo::new(vec![
        category(1, "Home", None, 0),
        category(2, "Bedroom", Some(1), 1),
        category(3, "Beds", None, 0),
    ]);
    let handle = repo.categories_handle();
    let usecase = UpdateCategoryUseCase { repo };

    let updated = usecase
        .execute(
            3,
            UpdateCategoryInput {
                parent_id: Some(Some(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.parent_id, Some(2));
    assert_eq!(updated.level, 2);
    let stored = handle.lock().unwrap();
    assert_eq!(stored.iter().find(|c| c.id == 3).unwrap().level, 2);
}

#[tokio::test]
async fn should_detach_category_on_null_parent() {
    let repo = MockCategoryRepo::new(vec![
        category(1, "Home", None, 0),
        category(2, "Bedroom", Some(1), 1),
    ]);
    let usecase = UpdateCategoryUseCase { repo };

    let updated = usecase
        .execute(
            2,
            UpdateCategoryInput {
                parent_id: Some(None),
                level: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.parent_id, None);
    assert_eq!(updated.level, 0);
}

#[tokio::test]
async fn should_reject_move_under_missing_parent() {
    let repo = MockCategoryRepo::new(vec![category(1, "Sofas", None, 0)]);
    let usecase = UpdateCategoryUseCase { repo };

    let result = usecase
        .execute(
            1,
            UpdateCategoryInput {
                parent_id: Some(Some(99)),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(StoreServiceError::InvalidReference)));
}

// ── DeleteCategoryUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_category_once() {
    let repo = MockCategoryRepo::new(vec![category(1, "Sofas", None, 0)]);
    let usecase = DeleteCategoryUseCase { repo };

    usecase.execute(1).await.unwrap();
    let again = usecase.execute(1).await;

    assert!(matches!(again, Err(StoreServiceError::CategoryNotFound)));
}
