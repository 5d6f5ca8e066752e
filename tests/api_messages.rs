//! Integration tests per gli endpoints dei messaggi
//!
//! Test per:
//! - GET/POST /messages
//! - GET /messages/unread
//! - PATCH /messages/{message_id}/read
//! - GET/POST /messages/private/{chat_id}
//! - POST /messages/private/{chat_id}/read

mod common;

#[cfg(test)]
mod message_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use chat_server::dtos::{CreateMessageDTO, MessageDTO};
    use chat_server::repositories::{Create, Read};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    // ============================================================
    // Test per la bacheca pubblica
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_post_and_read_public_message(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "hello", "userId": 1 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<MessageDTO>();
        assert_eq!(created.username, "alice");
        assert!(!created.is_read);

        let list = server
            .get("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .await;
        list.assert_status_ok();
        let messages = list.json::<Vec<MessageDTO>>();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].username, "alice");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_post_public_message_trims_content(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "   hi there  ", "userId": 1 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["content"], "hi there");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_post_public_message_for_other_user(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "pretending", "userId": 2 }))
            .await;

        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["error"], "Unauthorized");
        assert_eq!(state.msg.count().await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_post_public_message_blank_content(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "   ", "userId": 1 }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Content and userId are required"
        );
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_post_public_message_too_long(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "x".repeat(5001), "userId": 1 }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(state.msg.count().await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_messages_require_session(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        server.get("/messages").await.assert_status_unauthorized();
        server
            .post("/messages")
            .json(&json!({ "content": "hello", "userId": 1 }))
            .await
            .assert_status_unauthorized();
        assert_eq!(state.msg.count().await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_public_board_returns_latest_hundred(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let start = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        for i in 0..105 {
            let data = CreateMessageDTO::public(
                format!("message {}", i),
                1,
                start + Duration::seconds(i),
            );
            state.msg.create(&data).await?;
        }

        let response = server
            .get("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .await;

        response.assert_status_ok();
        let messages = response.json::<Vec<MessageDTO>>();
        assert_eq!(messages.len(), 100);
        assert_eq!(messages[0].content, "message 5");
        assert_eq!(messages[99].content, "message 104");
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_public_board_orphaned_sender(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .get("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .await;

        response.assert_status_ok();
        let messages = response.json::<Vec<MessageDTO>>();
        let usernames: Vec<&str> = messages.iter().map(|m| m.username.as_str()).collect();
        assert_eq!(usernames, vec!["alice", "bob", "Unknown User"]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_unread_public_count(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .get("/messages/unread")
            .add_header(cookie_header(), session_cookie_value(&token))
            .await;

        response.assert_status_ok();
        // "Hi everyone" di bob e il messaggio orfano; il proprio non conta
        assert_eq!(response.json::<Value>()["count"], 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_marking_public_message_lowers_unread_count(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_session(&state, 1, "alice").await;

        let before = server
            .get("/messages/unread")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await;
        assert_eq!(before.json::<Value>()["count"], 2);

        // "Hi everyone" è di bob
        let response = server
            .patch("/messages/2/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["isRead"], true);

        let after = server
            .get("/messages/unread")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await;
        assert_eq!(after.json::<Value>()["count"], 1);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_author_cannot_mark_own_public_message(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_session(&state, 1, "alice").await;

        server
            .patch("/messages/1/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await
            .assert_status_forbidden();

        let message = state.msg.read(&1).await?.expect("message exists");
        assert!(!message.is_read);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_post_public_message_with_wrong_field_type(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "hi", "userId": "1" }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "Invalid request body");
        assert!(body["details"].as_str().is_some_and(|d| d.contains("userId")));
        assert_eq!(state.msg.count().await?, 0);
        Ok(())
    }

    // ============================================================
    // Test per i messaggi privati
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_list_private_messages(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .get("/messages/private/1")
            .add_header(cookie_header(), session_cookie_value(&token))
            .await;

        response.assert_status_ok();
        let messages = response.json::<Vec<Value>>();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["content"], "Hey bob");
        assert_eq!(messages[2]["messageType"], "gif");
        assert_eq!(messages[2]["fileInfo"]["gifTitle"], "cat");
        assert!(messages.iter().all(|m| m["chatType"] == "private"));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_list_private_messages_of_foreign_chat(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        // la chat 2 è tra bob e charlie
        let response = server
            .get("/messages/private/2")
            .add_header(cookie_header(), session_cookie_value(&token))
            .await;

        response.assert_status_ok();
        assert!(response.json::<Vec<Value>>().is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats")))]
    async fn test_send_private_message_to_foreign_chat(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages/private/2")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "sneaky", "receiverId": 3 }))
            .await;

        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["error"], "Access denied to this chat");
        assert_eq!(state.msg.count().await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats")))]
    async fn test_send_private_message_wrong_receiver(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages/private/1")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({ "content": "hi", "receiverId": 3 }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(state.msg.count().await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats")))]
    async fn test_send_private_message_with_file_info(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let token = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages/private/1")
            .add_header(cookie_header(), session_cookie_value(&token))
            .json(&json!({
                "content": "report.pdf",
                "receiverId": 2,
                "messageType": "file",
                "fileInfo": { "fileName": "report.pdf", "fileSize": 2048 }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["messageType"], "file");
        assert_eq!(body["receiverId"], 2);
        assert_eq!(body["privateChatId"], 1);
        assert_eq!(body["fileInfo"]["fileName"], "report.pdf");
        assert_eq!(body["fileInfo"]["fileSize"], 2048);
        Ok(())
    }

    // ============================================================
    // Test per le conferme di lettura
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_mark_message_as_read(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_session(&state, 1, "alice").await;
        let bob = create_test_session(&state, 2, "bob").await;

        // il mittente non può segnare come letto
        server
            .patch("/messages/5/read")
            .add_header(cookie_header(), session_cookie_value(&bob))
            .await
            .assert_status_forbidden();

        let response = server
            .patch("/messages/5/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["isRead"], true);

        let message = state.msg.read(&5).await?.expect("message exists");
        assert!(message.is_read);

        server
            .patch("/messages/999/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "private_chats", "messages")))]
    async fn test_mark_chat_as_read(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_session(&state, 1, "alice").await;

        let response = server
            .post("/messages/private/1/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["updated"], 2);

        let again = server
            .post("/messages/private/1/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await;
        assert_eq!(again.json::<Value>()["updated"], 0);

        // il messaggio di bob verso charlie resta non letto
        let other = state.msg.read(&7).await?.expect("message exists");
        assert!(!other.is_read);

        server
            .post("/messages/private/2/read")
            .add_header(cookie_header(), session_cookie_value(&alice))
            .await
            .assert_status_forbidden();
        Ok(())
    }
}
