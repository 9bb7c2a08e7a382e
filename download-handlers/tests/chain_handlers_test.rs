//! Tests for the gatekeeping handlers: [`AuthHandler`], [`MessageFilterHandler`], [`LoggingHandler`].

use chrono::Utc;
use dlbot_core::{Chat, Handler, HandlerResponse, Message, User};
use download_handlers::{AuthHandler, LoggingHandler, MessageFilterHandler};

fn message(content: &str, username: Option<&str>, has_media: bool) -> Message {
    Message {
        id: "1".to_string(),
        content: content.to_string(),
        user: User {
            id: 10,
            username: username.map(str::to_string),
            first_name: None,
            last_name: None,
        },
        chat: Chat {
            id: 20,
            chat_type: "group".to_string(),
        },
        message_type: if has_media { "video" } else { "text" }.to_string(),
        has_media,
        created_at: Utc::now(),
    }
}

/// **Test: Listed usernames pass; unlisted, missing or empty-list senders fail with Unauthorized.**
#[tokio::test]
async fn test_auth_handler() {
    let auth = AuthHandler::new(vec!["alice".to_string(), "bob".to_string()]);

    assert!(auth.before(&message("hi", Some("alice"), false)).await.unwrap());
    assert!(auth.before(&message("hi", Some("bob"), false)).await.unwrap());

    let err = auth.before(&message("hi", Some("mallory"), false)).await.unwrap_err();
    assert!(err.is_unauthorized());
    let err = auth.before(&message("hi", None, false)).await.unwrap_err();
    assert!(err.is_unauthorized());

    let empty = AuthHandler::new(Vec::new());
    let err = empty.before(&message("hi", Some("alice"), false)).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn test_auth_is_case_sensitive() {
    let auth = AuthHandler::new(vec!["Alice".to_string()]);
    assert!(auth.is_authorized(Some("Alice")));
    assert!(!auth.is_authorized(Some("alice")));
    assert!(!auth.is_authorized(Some("")));
}

/// **Test: Filter lets short text through and stops empty, media and long messages.**
#[tokio::test]
async fn test_message_filter() {
    let filter = MessageFilterHandler::new(20);

    assert!(filter.before(&message("https://youtu.be/x", Some("a"), false)).await.unwrap());
    assert!(!filter.before(&message("", Some("a"), false)).await.unwrap());
    assert!(!filter.before(&message("  \n ", Some("a"), false)).await.unwrap());
    assert!(!filter.before(&message("caption", Some("a"), true)).await.unwrap());
    assert!(!filter
        .before(&message("https://youtu.be/0123456789", Some("a"), false))
        .await
        .unwrap());
}

/// **Test: Length is counted in characters, not bytes.**
#[tokio::test]
async fn test_message_filter_counts_chars() {
    let filter = MessageFilterHandler::new(5);
    assert!(filter.before(&message("привет", Some("a"), false)).await.is_ok_and(|ok| !ok));
    assert!(filter.before(&message("пр ив", Some("a"), false)).await.unwrap());
}

#[tokio::test]
async fn test_logging_handler_passes_through() {
    let logging = LoggingHandler;
    let msg = message("hello", Some("a"), false);

    assert!(logging.before(&msg).await.unwrap());
    assert_eq!(logging.handle(&msg).await.unwrap(), HandlerResponse::Continue);
    logging.after(&msg, &HandlerResponse::Stop).await.unwrap();
}
