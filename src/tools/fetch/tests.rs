#[cfg(test)]
mod tests {
    use crate::testing::{request, ScriptedClient};
    use crate::tools::fetch::utils::validate_status;
    use crate::tools::fetch::*;
    use crate::types::Category;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn options(concurrency: usize) -> FetchOptions {
        FetchOptions::new(concurrency, Duration::from_millis(50))
    }

    #[test]
    fn test_validate_status_accepts_2xx() {
        assert!(validate_status(200).is_ok());
        assert!(validate_status(204).is_ok());
    }

    #[test]
    fn test_validate_status_names_the_failure() {
        assert_eq!(validate_status(404).unwrap_err(), "status 404 (not found)");
        assert_eq!(validate_status(429).unwrap_err(), "status 429 (rate limited)");
        assert_eq!(validate_status(503).unwrap_err(), "status 503 (server error)");
        assert_eq!(
            validate_status(301).unwrap_err(),
            "status 301 (unfollowed redirect)"
        );
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_success_status() {
        let client = ScriptedClient::new().status("https://shop.test/x", 500, "boom");
        let err = fetch_page(&client, "https://shop.test/x", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(err.contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let client = Arc::new(
            ScriptedClient::new()
                .page("https://shop.test/1", "<html>one</html>")
                .hang("https://shop.test/2")
                .page("https://shop.test/3", "<html>three</html>")
                .fail("https://shop.test/4", "connection reset")
                .page("https://shop.test/5", "<html>five</html>"),
        );
        let items: Vec<_> = (1..=5)
            .map(|i| request(i - 1, Category::Product, &format!("https://shop.test/{i}")))
            .collect();

        let outcomes = fetch_all(client.clone(), items, &options(5)).await;

        assert_eq!(outcomes.len(), 5);
        let mut ok: Vec<_> = outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.request.url.clone())
            .collect();
        ok.sort();
        assert_eq!(
            ok,
            vec![
                "https://shop.test/1",
                "https://shop.test/3",
                "https://shop.test/5"
            ]
        );

        let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_success()).collect();
        assert_eq!(failed.len(), 2);
        for outcome in failed {
            assert!(outcome.body.is_none());
            assert!(outcome.error.as_deref().unwrap().contains("page fetch failed"));
        }
    }

    #[tokio::test]
    async fn test_fetch_all_attempts_each_item_once() {
        let client = Arc::new(ScriptedClient::new().fail("https://shop.test/a", "refused"));
        let items = vec![
            request(0, Category::Useful, "https://shop.test/a"),
            request(1, Category::Useful, "https://shop.test/b"),
        ];

        let outcomes = fetch_all(client.clone(), items, &options(2)).await;

        assert_eq!(outcomes.len(), 2);
        let mut calls = client.calls();
        calls.sort();
        assert_eq!(calls, vec!["https://shop.test/a", "https://shop.test/b"]);
        // 404 from the unknown route counts as a failure
        assert!(outcomes.iter().all(|o| !o.is_success()));
    }

    #[tokio::test]
    async fn test_fetch_all_respects_concurrency_bound() {
        let mut client = ScriptedClient::new().with_latency(Duration::from_millis(5));
        for i in 0..50 {
            client = client.page(&format!("https://shop.test/{i}"), "<html></html>");
        }
        let client = Arc::new(client);
        let items: Vec<_> = (0..50)
            .map(|i| request(i, Category::Category, &format!("https://shop.test/{i}")))
            .collect();

        let outcomes = fetch_all(client.clone(), items, &options(5)).await;

        assert_eq!(outcomes.len(), 50);
        assert!(outcomes.iter().all(|o| o.is_success()));
        assert!(
            client.peak_in_flight() <= 5,
            "peak in flight was {}",
            client.peak_in_flight()
        );
    }

    #[tokio::test]
    async fn test_fetch_all_with_runs_handler_per_outcome() {
        let client = Arc::new(
            ScriptedClient::new()
                .page("https://shop.test/a", "aaaa")
                .page("https://shop.test/b", "bb"),
        );
        let items = vec![
            request(0, Category::Product, "https://shop.test/a"),
            request(1, Category::Product, "https://shop.test/b"),
            request(2, Category::Product, "https://shop.test/missing"),
        ];

        let mut lengths = fetch_all_with(client, items, &options(3), |outcome| async move {
            outcome.body.map(|b| b.len())
        })
        .await;
        lengths.sort();

        assert_eq!(lengths, vec![None, Some(2), Some(4)]);
    }

    #[tokio::test]
    async fn test_fetch_all_deadline_fails_stragglers() {
        let client = Arc::new(
            ScriptedClient::new()
                .page("https://shop.test/fast", "ok")
                .hang("https://shop.test/slow"),
        );
        let items = vec![
            request(0, Category::Product, "https://shop.test/fast"),
            request(1, Category::Product, "https://shop.test/slow"),
        ];
        let opts = FetchOptions::new(2, Duration::from_secs(5))
            .with_deadline(Some(Duration::from_millis(50)));

        let outcomes = fetch_all(client, items, &opts).await;

        let slow = outcomes
            .iter()
            .find(|o| o.request.url.ends_with("/slow"))
            .unwrap();
        assert!(slow.error.as_deref().unwrap().contains("deadline"));
        let fast = outcomes
            .iter()
            .find(|o| o.request.url.ends_with("/fast"))
            .unwrap();
        assert!(fast.is_success());
    }

    #[tokio::test]
    async fn test_reqwest_client_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ReqwestClient::new().unwrap();
        let ok = client
            .get(&format!("{}/ok", server.uri()), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(ok, HttpResponse::ok("<html>hi</html>"));

        let err = fetch_page(
            &client,
            &format!("{}/gone", server.uri()),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert_eq!(err, "status 404 (not found)");
    }

    #[tokio::test]
    async fn test_reqwest_client_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = ReqwestClient::new().unwrap();
        let err = client
            .get(&format!("{}/slow", server.uri()), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(err.contains("timed out"), "unexpected error: {err}");
    }
}
