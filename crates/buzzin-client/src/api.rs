use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use buzzin_shared::protocol::{CreateLinkRequest, DeleteAck, ErrorBody};
use buzzin_shared::Link;

use crate::error::{ClientError, Result};

/// The three link operations the board needs from the server.
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// `GET /links/{userId}`, newest first.
    async fn list_links(&self, user_id: &str) -> Result<Vec<Link>>;

    /// `POST /links`.
    async fn create_link(&self, request: &CreateLinkRequest) -> Result<Link>;

    /// `DELETE /links/{id}`. Succeeds for ids that no longer exist.
    async fn delete_link(&self, id: Uuid) -> Result<DeleteAck>;
}

/// [`LinkApi`] over HTTP JSON.
#[derive(Debug, Clone)]
pub struct HttpLinkApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpLinkApi {
    /// `base_url` includes the API prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl LinkApi for HttpLinkApi {
    async fn list_links(&self, user_id: &str) -> Result<Vec<Link>> {
        let url = self.endpoint(&["links", user_id])?;
        let resp = self.client.get(url).send().await?;
        decode(resp).await
    }

    async fn create_link(&self, request: &CreateLinkRequest) -> Result<Link> {
        let url = self.endpoint(&["links"])?;
        let resp = self.client.post(url).json(request).send().await?;
        decode(resp).await
    }

    async fn delete_link(&self, id: Uuid) -> Result<DeleteAck> {
        let url = self.endpoint(&["links", &id.to_string()])?;
        let resp = self.client.delete(url).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use buzzin_shared::Platform;
    use buzzin_store::Database;
    use tokio::net::TcpListener;

    use super::*;

    /// Serve a fresh in-memory API on an ephemeral port; returns its base URL.
    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = buzzin_server::AppState::new(Database::open_in_memory().unwrap());
        tokio::spawn(buzzin_server::serve(state, listener, std::future::pending()));
        format!("http://{addr}/api")
    }

    #[test]
    fn endpoint_appends_and_encodes_segments() {
        let api = HttpLinkApi::new("http://localhost:5000/api/").unwrap();
        let url = api.endpoint(&["links", "user 1/x"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/links/user%201%2Fx");

        let api = HttpLinkApi::new("http://localhost:5000/api").unwrap();
        let url = api.endpoint(&["links"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/links");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpLinkApi::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpLinkApi::new("mailto:someone@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn create_list_delete_against_server() {
        let api = HttpLinkApi::new(&spawn_server().await).unwrap();

        assert!(api.list_links("u1").await.unwrap().is_empty());

        let created = api
            .create_link(&CreateLinkRequest::new("https://x.com/a", Platform::Twitter, "u1"))
            .await
            .unwrap();
        assert_eq!(created.platform, Platform::Twitter);
        assert_eq!(created.user_id, "u1");

        assert_eq!(api.list_links("u1").await.unwrap(), vec![created.clone()]);

        let ack = api.delete_link(created.id).await.unwrap();
        assert_eq!(ack, DeleteAck::deleted());
        api.delete_link(created.id).await.unwrap();

        assert!(api.list_links("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_failure_surfaces_status_and_message() {
        let api = HttpLinkApi::new(&spawn_server().await).unwrap();

        let err = api
            .create_link(&CreateLinkRequest::new("", Platform::Twitter, "u1"))
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing required fields");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpLinkApi::new(&format!("http://{addr}/api")).unwrap();
        assert!(matches!(
            api.list_links("u1").await,
            Err(ClientError::Http(_))
        ));
    }
}
