use shopdesk_core::config::CompletionConfig;
use shopdesk_core::errors::{CompletionError, ShopdeskError};
use shopdesk_core::models::ChatMessage;
use shopdesk_core::traits::ICompletionProvider;
use shopdesk_completion::ChatCompletionClient;

#[test]
fn missing_api_key_is_reported_by_env_var_name() {
    let config = CompletionConfig {
        api_key_env: "SHOPDESK_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
        ..Default::default()
    };
    let err = ChatCompletionClient::from_config(&config).err().unwrap();
    match err {
        ShopdeskError::CompletionError(CompletionError::MissingApiKey { env_var }) => {
            assert_eq!(env_var, "SHOPDESK_TEST_KEY_THAT_IS_NEVER_SET")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreachable_endpoint_fails_instead_of_hanging() {
    let config = CompletionConfig {
        endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let client = ChatCompletionClient::new(&config, "test-key".to_string()).unwrap();
    let err = client
        .complete("system", &[ChatMessage::human("hello")], 0.0)
        .unwrap_err();
    assert!(matches!(
        err,
        ShopdeskError::CompletionError(CompletionError::RequestFailed { .. })
    ));
}
