#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use reqwest::{Client, StatusCode};
    use serde_json::{json, Value};
    use serial_test::serial;

    use crate::config::settings::SettingsConfig;
    use crate::helpers::time::now_millis;
    use crate::server::server::router;
    use crate::tests::common::{build_reqwest_client, spawn_axum};
    use crate::token::{AccessTokenData, GoogleTokenFetcher};
    use crate::utils::constants::METADATA_HOST_ENV_VAR;

    const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/svc@x.iam/token";
    const TOKEN_INFO_PATH: &str = "/tokeninfo";

    fn settings(server: &MockServer) -> Arc<SettingsConfig> {
        let mut settings = SettingsConfig::new("svc@x.iam");
        settings.metadata.host = Some(server.base_url());
        settings.token_info.url = server.url(TOKEN_INFO_PATH);
        settings.metrics.is_enabled = true;
        Arc::new(settings)
    }

    async fn mock_token_info(server: &MockServer, token: &str) {
        let bearer = format!("Bearer {token}");
        server.mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_INFO_PATH)
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!({
                "aud": "1234",
                "scope": "https://www.googleapis.com/auth/cloud-platform",
                "expires_in": "3600",
                "email": "svc@x.iam"
            }));
        }).await;
    }

    #[tokio::test]
    #[serial]
    async fn fetches_token_from_metadata_server() -> Result<()> {
        std::env::remove_var(METADATA_HOST_ENV_VAR);
        let server = MockServer::start_async().await;
        let metadata = server.mock_async(|when, then| {
            when.method(GET)
                .path(TOKEN_PATH)
                .header("Metadata-Flavor", "Google")
                .query_param("scopes", "scope-a,scope-b");
            then.status(200).json_body(json!({
                "access_token": "meta-abc-123",
                "expires_in": 3600,
                "token_type": "Bearer"
            }));
        }).await;
        mock_token_info(&server, "meta-abc-123").await;

        let fetcher = GoogleTokenFetcher::from_settings(settings(&server), Client::new());
        let before = now_millis();
        let data = fetcher.get_access_token("scope-a scope-b").await?;
        let after = now_millis();

        metadata.assert_async().await;
        assert_eq!(data.access_token, "meta-abc-123");
        // 3600s reported, 300s margin
        assert!(data.expiry_date >= before + 3_300_000);
        assert!(data.expiry_date <= after + 3_300_000);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn http_endpoint_serves_token_and_metrics() -> Result<()> {
        std::env::remove_var(METADATA_HOST_ENV_VAR);
        let server = MockServer::start_async().await;
        let metadata = server.mock_async(|when, then| {
            when.method(GET)
                .path(TOKEN_PATH)
                .query_param("scopes", "https://www.googleapis.com/auth/cloud-platform");
            then.status(200).json_body(json!({
                "access_token": "meta-abc-123",
                "expires_in": 3600,
                "token_type": "Bearer"
            }));
        }).await;
        mock_token_info(&server, "meta-abc-123").await;

        let settings = settings(&server);
        let fetcher = GoogleTokenFetcher::from_settings(settings.clone(), Client::new());
        let (handle, addr) = spawn_axum(router(&settings, fetcher).await).await;
        let client = build_reqwest_client();

        // -------------------------------
        // default scope
        // -------------------------------

        let res = client.get(format!("http://{addr}/token")).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: AccessTokenData = res.json().await?;
        assert_eq!(body.access_token, "meta-abc-123");
        assert!(body.expiry_date > now_millis());
        metadata.assert_async().await;

        // -------------------------------
        // metrics
        // -------------------------------

        let res = client.get(format!("http://{addr}/metrics")).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let text = res.text().await?;
        assert!(text.contains("google_access_token_access_token_requests_total"), "{text}");

        handle.abort();
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn http_endpoint_maps_failures_to_status() -> Result<()> {
        std::env::remove_var(METADATA_HOST_ENV_VAR);
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path(TOKEN_PATH).query_param("scopes", "no-token");
            then.status(200).json_body(json!({ "token_type": "Bearer" }));
        }).await;
        server.mock_async(|when, then| {
            when.method(GET).path(TOKEN_PATH).query_param("scopes", "broken");
            then.status(500).body("metadata failure");
        }).await;

        let settings = settings(&server);
        let fetcher = GoogleTokenFetcher::from_settings(settings.clone(), Client::new());
        let (handle, addr) = spawn_axum(router(&settings, fetcher).await).await;
        let client = build_reqwest_client();

        let res = client
            .get(format!("http://{addr}/token"))
            .query(&[("scope", "no-token")])
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = res.json().await?;
        assert_eq!(body["error"], "invalid environment");

        let res = client
            .get(format!("http://{addr}/token"))
            .query(&[("scope", "broken")])
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        handle.abort();
        Ok(())
    }
}
