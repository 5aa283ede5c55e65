//! HTTP API integration tests.
//!
//! Tests for the messaging endpoints (health check, send, history, inbox)
//! against a server running on a local port.

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start(19080, &[]).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_send_message_then_history_and_inbox() {
    // テスト項目: 送信したメッセージが双方の履歴と受信箱に現れる
    // given (前提条件):
    let server = TestServer::start(19081, &["u1", "u2"]).await;
    let client = reqwest::Client::new();

    // when (操作): u1 が u2 に "hi" を送る
    let response = client
        .post(format!("{}/api/chats/send/u2", server.base_url()))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"message": "hi"}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果): 201 と永続化済みメッセージ
    assert_eq!(response.status(), 201);
    let message: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(message["sender_id"], "u1");
    assert_eq!(message["recipient_id"], "u2");
    assert_eq!(message["message"], "hi");
    assert!(message["id"].is_string());
    assert!(message["conversation_id"].is_string());
    assert!(message["created_at"].as_i64().unwrap() > 0);

    // then (期待する結果): 履歴はどちらの側から見ても同じ 1 件
    for (viewer, other) in [("u1", "u2"), ("u2", "u1")] {
        let history: serde_json::Value = client
            .get(format!("{}/api/chats/{}", server.base_url(), other))
            .header("x-user-id", viewer)
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["id"], message["id"]);
        assert_eq!(history[0]["message"], "hi");
    }

    // then (期待する結果): u1 の受信箱に u2 との会話が 1 件
    let inbox: serde_json::Value = client
        .get(format!("{}/api/chats", server.base_url()))
        .header("x-user-id", "u1")
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["other_participant"], "u2");
    assert_eq!(inbox[0]["last_message"]["message"], "hi");
}

#[tokio::test]
async fn test_send_validation_errors() {
    // テスト項目: 不正な送信は 400/401 で拒否され、何も永続化されない
    // given (前提条件):
    let server = TestServer::start(19082, &["u1", "u2"]).await;
    let client = reqwest::Client::new();

    // when (操作): 自分自身への送信
    let response = client
        .post(format!("{}/api/chats/send/u1", server.base_url()))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"message": "hi"}))
        .send()
        .await
        .unwrap();
    // then (期待する結果):
    assert_eq!(response.status(), 400);

    // when (操作): 未知の受信者への送信
    let response = client
        .post(format!("{}/api/chats/send/ghost", server.base_url()))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"message": "hi"}))
        .send()
        .await
        .unwrap();
    // then (期待する結果):
    assert_eq!(response.status(), 400);

    // when (操作): 空白のみの本文
    let response = client
        .post(format!("{}/api/chats/send/u2", server.base_url()))
        .header("x-user-id", "u1")
        .json(&serde_json::json!({"message": "   "}))
        .send()
        .await
        .unwrap();
    // then (期待する結果):
    assert_eq!(response.status(), 400);

    // when (操作): 認証ヘッダなし
    let response = client
        .post(format!("{}/api/chats/send/u2", server.base_url()))
        .json(&serde_json::json!({"message": "hi"}))
        .send()
        .await
        .unwrap();
    // then (期待する結果):
    assert_eq!(response.status(), 401);

    // then (期待する結果): どの失敗も履歴を作っていない
    let history: serde_json::Value = client
        .get(format!("{}/api/chats/u2", server.base_url()))
        .header("x-user-id", "u1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_history_empty_without_conversation() {
    // テスト項目: 会話が無い相手との履歴は空配列（閲覧では作成しない）
    // given (前提条件):
    let server = TestServer::start(19083, &["u1", "u2"]).await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/chats/u2", server.base_url()))
        .header("x-user-id", "u1")
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let history: serde_json::Value = response.json().await.unwrap();
    assert_eq!(history.as_array().unwrap().len(), 0);

    // then (期待する結果): 受信箱にも何も現れない
    let inbox: serde_json::Value = client
        .get(format!("{}/api/chats", server.base_url()))
        .header("x-user-id", "u1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_inbox_ordered_by_last_activity() {
    // テスト項目: 受信箱は最終アクティビティの降順で並ぶ
    // given (前提条件):
    let server = TestServer::start(19084, &["u1", "u2", "u3"]).await;
    let client = reqwest::Client::new();

    let send = |to: &str, text: &str| {
        let client = client.clone();
        let url = format!("{}/api/chats/send/{}", server.base_url(), to);
        let body = serde_json::json!({ "message": text });
        async move {
            let response = client
                .post(url)
                .header("x-user-id", "u1")
                .json(&body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 201);
        }
    };

    // when (操作): u2 との会話の後に u3 との会話が動く
    send("u2", "to u2").await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    send("u3", "to u3").await;

    // then (期待する結果): 直近に動いた u3 が先頭
    let inbox: serde_json::Value = client
        .get(format!("{}/api/chats", server.base_url()))
        .header("x-user-id", "u1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0]["other_participant"], "u3");
    assert_eq!(inbox[1]["other_participant"], "u2");
}
