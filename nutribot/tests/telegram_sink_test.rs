//! HTTP-level test for [`TelegramSink`] against a mock Telegram API server.
//! Path format is `/bot<token>/<method>`, matching teloxide requests.

use nutribot::{ReplySink, TelegramSink};

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

/// **Test: send_text posts to sendMessage for the user's chat.**
#[tokio::test]
async fn send_text_hits_send_message() {
    let mut server = mockito::Server::new_async().await;
    let send_message_path = format!("/bot{}/SendMessage", TEST_BOT_TOKEN);
    let mock_send = server
        .mock("POST", send_message_path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 1706529600,
                "chat": {"id": 123, "type": "private"},
                "from": {"id": 987654321, "is_bot": true, "first_name": "NutriBot", "username": "nutribot"},
                "text": "Hello There!"
            }
        }"#,
        )
        .create_async()
        .await;

    let url = reqwest::Url::parse(&server.url()).expect("mock server url");
    let bot = teloxide::Bot::new(TEST_BOT_TOKEN).set_api_url(url);
    let sink = TelegramSink::new(bot);

    sink.send_text(123, "Hello There!").await.expect("send_text");
    mock_send.assert_async().await;
}
