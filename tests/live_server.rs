use reqwest::{Client, StatusCode};
use swift_mock_server::{AppConfig, SwiftServer};

#[tokio::test]
async fn client_session_against_running_server() {
    let server = SwiftServer::start(AppConfig::local()).await.unwrap();
    let client = Client::builder().no_proxy().build().unwrap();

    let auth = client
        .get(&server.auth_url)
        .header("X-Auth-User", "swifttest")
        .header("X-Auth-Key", "swifttest")
        .send()
        .await
        .unwrap();
    assert_eq!(auth.status(), StatusCode::NO_CONTENT);
    let token = auth.headers()["x-auth-token"].to_str().unwrap().to_string();
    let storage_url = auth.headers()["x-storage-url"].to_str().unwrap().to_string();
    assert_eq!(storage_url, server.account_url("swifttest"));

    let put = client
        .put(format!("{}/box", storage_url))
        .header("X-Auth-Token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(put.status(), StatusCode::CREATED);

    let put = client
        .put(format!("{}/box/greeting.txt", storage_url))
        .header("X-Auth-Token", &token)
        .header("X-Object-Meta-Lang", "en")
        .body("hello world")
        .send()
        .await
        .unwrap();
    assert_eq!(put.status(), StatusCode::CREATED);

    let get = client
        .get(format!("{}/box/greeting.txt", storage_url))
        .header("X-Auth-Token", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(get.status(), StatusCode::OK);
    assert_eq!(get.headers()["x-object-meta-lang"], "en");
    assert!(get.headers().contains_key("x-trans-id"));
    assert_eq!(get.text().await.unwrap(), "hello world");

    let head = client
        .head(format!("{}/box/greeting.txt", storage_url))
        .send()
        .await
        .unwrap();
    assert_eq!(head.status(), StatusCode::OK);
    assert_eq!(head.headers()["etag"], "5eb63bbbe01eeed093cb22bb8f5acdc3");

    {
        let storage = server.storage().lock().await;
        let account = storage.account("swifttest").unwrap();
        assert_eq!(account.object_count(), 1);
        assert_eq!(account.bytes_used(), 11);
    }

    server.close().await.unwrap();
}
