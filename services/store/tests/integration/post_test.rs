use furniture_domain::blog::{PostCategory, PostStats, PostStatus};
use furniture_store::domain::types::{PostFilter, UserSummary};
use furniture_store::error::StoreServiceError;
use furniture_store::usecase::post::{
    CreatePostInput, CreatePostUseCase, GetPostUseCase, ListPostsUseCase, UpdatePostInput,
    UpdatePostUseCase,
};

use crate::helpers::{MockPostRepo, post};

fn author() -> UserSummary {
    UserSummary {
        id: 7,
        first_name: "Linh".to_owned(),
        last_name: "Tran".to_owned(),
    }
}

fn create_input(slug: &str) -> CreatePostInput {
    CreatePostInput {
        title: "Five ways to style a small flat".to_owned(),
        slug: slug.to_owned(),
        content: "Start with the sofa.".to_owned(),
        excerpt: String::new(),
        featured_image: None,
        images: vec![],
        author_id: Some(7),
        categories: vec![PostCategory::SpacePlanning],
        tags: vec!["small-spaces".to_owned()],
        status: None,
        published_at: None,
        metadata: None,
        stats: None,
    }
}

// ── CreatePostUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_draft_with_zeroed_stats_and_author() {
    let usecase = CreatePostUseCase {
        repo: MockPostRepo::new(vec![], vec![author()]),
    };

    let created = usecase.execute(create_input("small-flat")).await.unwrap();

    assert_eq!(created.post.status, PostStatus::Draft);
    assert_eq!(created.post.stats, PostStats::default());
    assert_eq!(created.author, Some(author()));
}

#[tokio::test]
async fn should_reject_duplicate_post_slug() {
    let usecase = CreatePostUseCase {
        repo: MockPostRepo::new(vec![post(1, "small-flat", None)], vec![]),
    };

    let result = usecase.execute(create_input("small-flat")).await;

    assert!(
        matches!(result, Err(StoreServiceError::PostSlugAlreadyExists)),
        "expected PostSlugAlreadyExists, got {result:?}"
    );
}

// ── GetPostUseCase / ListPostsUseCase ────────────────────────────────────────

#[tokio::test]
async fn should_return_post_without_author_when_unset() {
    let usecase = GetPostUseCase {
        repo: MockPostRepo::new(vec![post(1, "oil-your-oak", None)], vec![author()]),
    };

    let detail = usecase.execute(1).await.unwrap();
    assert_eq!(detail.author, None);
}

#[tokio::test]
async fn should_filter_posts_by_category_and_tag() {
    let mut tagged = post(1, "oil-your-oak", Some(7));
    tagged.categories = vec![PostCategory::Maintenance];
    tagged.tags = vec!["oak".to_owned()];
    let other = post(2, "pick-a-rug", Some(7));
    let usecase = ListPostsUseCase {
        repo: MockPostRepo::new(vec![tagged, other], vec![author()]),
    };

    let by_category = usecase
        .execute(
            PostFilter {
                category: Some(PostCategory::Maintenance),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].post.id, 1);

    let by_tag = usecase
        .execute(
            PostFilter {
                tag: Some("rattan".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert!(by_tag.is_empty());
}

// ── UpdatePostUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_publish_post_and_keep_untouched_fields() {
    let usecase = UpdatePostUseCase {
        repo: MockPostRepo::new(vec![post(1, "oil-your-oak", Some(7))], vec![author()]),
    };

    let updated = usecase
        .execute(
            1,
            UpdatePostInput {
                status: Some(PostStatus::Published),
                published_at: Some(crate::helpers::at()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.post.status, PostStatus::Published);
    assert_eq!(updated.post.published_at, Some(crate::helpers::at()));
    assert_eq!(updated.post.slug, "oil-your-oak");
    assert_eq!(updated.post.categories, vec![PostCategory::DesignTips]);
}

#[tokio::test]
async fn should_reject_slug_of_another_post() {
    let usecase = UpdatePostUseCase {
        repo: MockPostRepo::new(
            vec![post(1, "oil-your-oak", None), post(2, "pick-a-rug", None)],
            vec![],
        ),
    };

    let result = usecase
        .execute(
            2,
            UpdatePostInput {
                slug: Some("oil-your-oak".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(StoreServiceError::PostSlugAlreadyExists)));
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_post() {
    let usecase = UpdatePostUseCase {
        repo: MockPostRepo::empty(),
    };

    let result = usecase.execute(5, UpdatePostInput::default()).await;
    assert!(matches!(result, Err(StoreServiceError::PostNotFound)));
}
