#![allow(dead_code)]

use anyhow::Result;
use gradebook_gateway::config::toml_config::ServiceConfig;
use gradebook_gateway::{build_router, AppState};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const BAD_BOOK_ID: &str = "commenting.Book%3A55203f0be7dde0815228bb41%40ODL.MIT.EDU";
pub const BAD_GRADEBOOK_ID: &str = "grading.Gradebook%3A55203f0be7dde0815228bb41%40ODL.MIT.EDU";
pub const BAD_GRADE_SYSTEM_ID: &str =
    "grading.GradebookSystem%3A55203f0be7dde0815228bb41%40ODL.MIT.EDU";
pub const BAD_COLUMN_ID: &str = "grading.GradebookColumn%3A55203f0be7dde0815228bb41%40ODL.MIT.EDU";

/// A gateway backed by a fresh in-memory service, listening on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(ServiceConfig::default()).await
    }

    pub async fn start_with(service: ServiceConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = AppState::in_memory(&service);

        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.ok();
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post(&self, path: &str, payload: &Value) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(payload).send().await?)
    }

    pub async fn put(&self, path: &str, payload: &Value) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(payload).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Sends the request and expects a 200 with a JSON body.
    pub async fn ok_json(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await?;
        assert_eq!(status, StatusCode::OK, "unexpected response: {}", body);
        Ok(body)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self.get(path).await?;
        self.ok_json(response).await
    }

    pub async fn post_json(&self, path: &str, payload: &Value) -> Result<Value> {
        let response = self.post(path, payload).await?;
        self.ok_json(response).await
    }

    pub async fn put_json(&self, path: &str, payload: &Value) -> Result<Value> {
        let response = self.put(path, payload).await?;
        self.ok_json(response).await
    }

    pub async fn count(&self, path: &str) -> Result<usize> {
        let list = self.get_json(path).await?;
        Ok(list.as_array().map(Vec::len).unwrap_or_default())
    }
}

pub fn display_text(text: &str) -> Value {
    json!({
        "formatTypeId": "TextFormats%3APLAIN%40okapia.net",
        "languageTypeId": "639-2%3AENG%40ISO",
        "scriptTypeId": "15924%3ALATN%40ISO",
        "text": text
    })
}

pub fn assert_display_text(actual: &Value, expected: &Value) {
    for key in ["formatTypeId", "languageTypeId", "scriptTypeId", "text"] {
        assert_eq!(actual[key], expected[key], "display text field {}", key);
    }
}

pub fn id_of(object: &Value) -> String {
    object["id"].as_str().unwrap_or_default().to_string()
}
