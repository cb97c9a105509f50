//! Resolver behaviour against the scripted client.

use super::mock::ScriptedClient;
use crate::resolver::Resolver;
use std::sync::Arc;

#[tokio::test]
async fn test_service_suggestion_wins() {
    let client = Arc::new(ScriptedClient::new().with_suggestion("Photosynthesis"));
    let resolver = Resolver::new(client.clone());

    assert_eq!(resolver.suggest("photosynthsis").await, "Photosynthesis");
    assert_eq!(client.suggests(), 1);
}

#[tokio::test]
async fn test_suggestion_error_falls_back_to_dictionary() {
    let client = Arc::new(ScriptedClient::new().failing_suggest());
    let resolver = Resolver::new(client);

    assert_eq!(resolver.suggest("Histroy of Rome").await, "History of Rome");
}

#[tokio::test]
async fn test_blank_suggestion_is_ignored() {
    let client = Arc::new(ScriptedClient::new().with_suggestion("  "));
    let resolver = Resolver::new(client);

    assert_eq!(resolver.suggest("quantom").await, "quantum");
}

#[tokio::test]
async fn test_unknown_query_comes_back_unchanged() {
    let client = Arc::new(ScriptedClient::new());
    let resolver = Resolver::new(client);

    assert_eq!(resolver.suggest("asdkjaslkdj").await, "asdkjaslkdj");
}
