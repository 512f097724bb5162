use generator::{
    GenerationOrchestrator, GeneratorError, InMemoryStore, MockContentGenerator, MockImageSource, QuotaStore,
};
use shared::{GenerationRequest, StoreAccount, StoreId, SubscriptionPlan};

use crate::traits::BlogService;

fn shop() -> StoreId {
    StoreId::new("latte-lab.myshopify.com").unwrap()
}

fn service(store: &InMemoryStore, response: &'static str) -> impl BlogService {
    let mut generator = MockContentGenerator::new();
    generator.expect_synthesize().returning(move |_| Ok(response.to_string()));
    let mut images = MockImageSource::new();
    images.expect_find_image().returning(|_| None);
    GenerationOrchestrator::new(generator, images, store.clone(), store.clone())
}

#[tokio::test]
async fn test_generate_through_service() {
    let store = InMemoryStore::with_accounts([StoreAccount::new(shop(), 4, SubscriptionPlan::Free)]);
    let service = service(&store, "Plain text about espresso");

    let outcome = service.generate(GenerationRequest::new("Espresso", 2), shop()).await.unwrap();
    assert!(outcome.used_fallback);
    assert_eq!(outcome.tokens_remaining, 2);

    let articles = service.articles(shop(), 10).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert!(articles[0].image_url.is_none());

    let summary = service.analytics(shop()).await.unwrap();
    assert_eq!(summary.total_posts, 1);
    assert_eq!(summary.tokens_used, 5);
}

#[tokio::test]
async fn test_unknown_store_gets_default_account() {
    let store = InMemoryStore::new();
    let service = service(&store, "");

    let account = service.account(shop()).await.unwrap();
    assert_eq!(account.subscription_plan, SubscriptionPlan::Free);
    assert_eq!(account.tokens_remaining, 7);
    assert_eq!(store.load_account(&shop()).await.unwrap(), account);
}

#[tokio::test]
async fn test_generate_rejects_over_budget() {
    let store = InMemoryStore::with_accounts([StoreAccount::new(shop(), 1, SubscriptionPlan::Free)]);
    let service = service(&store, "unused");

    let result = service.generate(GenerationRequest::new("Espresso", 2), shop()).await;
    assert!(matches!(result, Err(GeneratorError::InsufficientQuota { deficit: 1, .. })));
}
