//! Shared fixtures for generation workflow tests

#![allow(dead_code)] // Not every test binary uses every fixture

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Barrier;

use generator::{
    ContentGenerator, GenerationOrchestrator, ImageSource, InMemoryStore, MockContentGenerator, MockImageSource,
};
use shared::{ApiFailure, GenerationRequest, StoreAccount, StoreId, SubscriptionPlan};

pub const SHOP: &str = "cool-kicks.myshopify.com";
pub const TOPIC: &str = "Sustainable Sneakers";

pub fn shop() -> StoreId {
    StoreId::new(SHOP).unwrap()
}

/// Store seeded with one account for `SHOP`
pub fn store_with_tokens(tokens: u32) -> InMemoryStore {
    InMemoryStore::with_accounts([StoreAccount::new(shop(), tokens, SubscriptionPlan::Free)])
}

pub fn request(post_count: u32) -> GenerationRequest {
    let mut request = GenerationRequest::new(TOPIC, post_count);
    request.keywords = vec!["eco-friendly".to_string(), "recycled".to_string()];
    request.audience = "eco-conscious shoppers".to_string();
    request
}

/// Generator output in the requested structured shape
pub fn structured_response(count: usize) -> String {
    let posts: Vec<_> = (1..=count)
        .map(|i| {
            json!({
                "title": format!("Post {i}"),
                "metaDescription": format!("Meta {i}"),
                "content": format!("<h2>Section {i}</h2><p>Body {i}</p>"),
                "imageDescription": format!("image {i}"),
            })
        })
        .collect();
    json!({ "posts": posts }).to_string()
}

pub fn generator_returning(text: String) -> MockContentGenerator {
    let mut generator = MockContentGenerator::new();
    generator.expect_synthesize().times(1).returning(move |_| Ok(text.clone()));
    generator
}

pub fn generator_failing(failure: ApiFailure) -> MockContentGenerator {
    let mut generator = MockContentGenerator::new();
    generator.expect_synthesize().times(1).returning(move |_| Err(failure.clone()));
    generator
}

pub fn generator_never_called() -> MockContentGenerator {
    let mut generator = MockContentGenerator::new();
    generator.expect_synthesize().times(0);
    generator
}

/// Image source answering every hint with a URL derived from it
pub fn images_for_every_hint() -> MockImageSource {
    let mut images = MockImageSource::new();
    images
        .expect_find_image()
        .returning(|hint: &str| Some(format!("https://images.example/{}.jpg", hint.replace(' ', "-"))));
    images
}

pub fn images_never_called() -> MockImageSource {
    let mut images = MockImageSource::new();
    images.expect_find_image().times(0);
    images
}

pub type MemoryOrchestrator<G, I> = GenerationOrchestrator<G, I, InMemoryStore, InMemoryStore>;

pub fn orchestrator<G, I>(generator: G, images: I, store: &InMemoryStore) -> MemoryOrchestrator<G, I>
where
    G: ContentGenerator,
    I: ImageSource,
{
    GenerationOrchestrator::new(generator, images, store.clone(), store.clone())
}

/// Generator that holds every caller until `parties` callers have arrived
pub struct BarrierGenerator {
    barrier: Arc<Barrier>,
    response: String,
}

impl BarrierGenerator {
    pub fn new(parties: usize, response: String) -> Self {
        Self { barrier: Arc::new(Barrier::new(parties)), response }
    }
}

#[async_trait]
impl ContentGenerator for BarrierGenerator {
    async fn synthesize(&self, _prompt: &str) -> Result<String, ApiFailure> {
        self.barrier.wait().await;
        Ok(self.response.clone())
    }
}

/// Generator that never answers
pub struct StalledGenerator;

#[async_trait]
impl ContentGenerator for StalledGenerator {
    async fn synthesize(&self, _prompt: &str) -> Result<String, ApiFailure> {
        std::future::pending::<()>().await;
        Err(ApiFailure::Timeout)
    }
}

/// Image source that never answers
pub struct StalledImages;

#[async_trait]
impl ImageSource for StalledImages {
    async fn find_image(&self, _hint: &str) -> Option<String> {
        std::future::pending::<()>().await;
        None
    }
}
