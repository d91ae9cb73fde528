use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{error, info};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use super::Deployer;

pub const LANDING_PAGE: &str = "<html><body><h1>Website Berhasil Dibuat!</h1></body></html>";

const DEPLOYMENTS_PATH: &str = "v13/deployments";

#[derive(Debug, Error)]
pub enum DeployError {
    /// Message taken from the API's `{"error": {"message": ...}}` payload.
    #[error("{0}")]
    Api(String),
    #[error("request failed with status code {}", .0.as_u16())]
    Status(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct DeploymentRequest<'a> {
    name: &'a str,
    files: Vec<DeploymentFile>,
}

#[derive(Debug, Serialize)]
struct DeploymentFile {
    file: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct Deployment {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct VercelClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl VercelClient {
    /// `api` is the service root, e.g. `https://api.vercel.com` or a proxy
    /// prefix such as `https://proxy/vercel`.
    pub fn new(api: &Url, token: String) -> Result<Self, url::ParseError> {
        let mut base = api.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        Ok(VercelClient {
            client: Client::new(),
            endpoint: base.join(DEPLOYMENTS_PATH)?,
            token,
        })
    }

    async fn deploy(&self, name: &str) -> Result<String, DeployError> {
        let body = DeploymentRequest {
            name,
            files: vec![DeploymentFile {
                file: "index.html",
                data: STANDARD.encode(LANDING_PAGE),
            }],
        };

        let resp = self.client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.json::<ErrorPayload>().await.ok()
                .and_then(|payload| payload.error)
                .and_then(|error| error.message);

            return Err(match message {
                Some(message) => DeployError::Api(message),
                None => DeployError::Status(status),
            });
        }

        Ok(resp.json::<Deployment>().await?.url)
    }
}

impl Deployer for VercelClient {
    async fn create_website(&self, name: &str) -> Result<String, DeployError> {
        match self.deploy(name).await {
            Ok(url) => {
                info!("website {name:?} deployed at {url}");
                Ok(url)
            }
            Err(e) => {
                error!("Error creating website {name:?}: {e}");
                Err(e)
            }
        }
    }
}
