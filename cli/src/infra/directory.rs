//! HTTP implementation of the deployment directory ports.
//!
//! Every request races against the caller's cancellation token. Transport
//! timeouts come from the `reqwest` client; nothing here retries.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use skiff_common::api::{
    DestroyDeploymentRequest, GetDeploymentResponse, ListApplicationsResponse,
    ListDeploymentsResponse,
};
use skiff_common::{ApplicationRef, DeploymentRecord, ListDeploymentsRequest};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    ApplicationCatalog, ApplicationClients, DeploymentDestroyer, DeploymentDirectory,
};
use crate::domain::config::SkiffConfig;
use crate::domain::error::{ConfigError, DirectoryError};

/// Connection settings for [`HttpDirectoryClient`].
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub address: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl DirectoryConfig {
    /// Extract connection settings from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingServerAddress`] if no address is set.
    pub fn from_config(config: &SkiffConfig) -> Result<Self, ConfigError> {
        let address = config
            .server
            .address
            .clone()
            .ok_or(ConfigError::MissingServerAddress)?;
        Ok(Self {
            address,
            token: config.server.token.clone(),
            timeout: Duration::from_secs(config.server.timeout_secs),
        })
    }
}

/// HTTP client for the deployment directory server.
pub struct HttpDirectoryClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpDirectoryClient {
    /// Create a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a valid base URL or the TLS
    /// backend cannot be initialised.
    pub fn new(config: &DirectoryConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.address)
            .map_err(|e| anyhow::anyhow!("invalid server address '{}': {e}", config.address))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "invalid server address '{}'",
            config.address
        );
        let client = Client::builder()
            .user_agent(concat!("skiff/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Build `base_url/v1/<segments...>` with each segment percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    async fn send(
        &self,
        cancel: &CancellationToken,
        request: RequestBuilder,
    ) -> Result<Response, DirectoryError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(DirectoryError::Cancelled),
            res = request.send() => res.map_err(|e| DirectoryError::Transport(e.to_string())),
        }
    }

    async fn decode<T: DeserializeOwned>(
        cancel: &CancellationToken,
        response: Response,
    ) -> Result<T, DirectoryError> {
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(DirectoryError::Cancelled),
            body = response.text() => body.map_err(|e| DirectoryError::Transport(e.to_string()))?,
        };
        serde_json::from_str(&body)
            .map_err(|e| DirectoryError::Transport(format!("invalid response body: {e}")))
    }
}

/// Turn a non-success response into a transport error carrying its body.
async fn status_error(cancel: &CancellationToken, response: Response) -> DirectoryError {
    let status = response.status();
    tokio::select! {
        biased;
        () = cancel.cancelled() => DirectoryError::Cancelled,
        body = response.text() => transport_status(status, &body.unwrap_or_default()),
    }
}

pub(crate) fn transport_status(status: StatusCode, body: &str) -> DirectoryError {
    let body = body.trim();
    if body.is_empty() {
        DirectoryError::Transport(format!("server returned {status}"))
    } else {
        DirectoryError::Transport(format!("server returned {status}: {body}"))
    }
}

impl DeploymentDirectory for HttpDirectoryClient {
    async fn get_deployment(
        &self,
        cancel: &CancellationToken,
        id: &str,
    ) -> Result<DeploymentRecord, DirectoryError> {
        let url = self.url(&["deployments", id]);
        let response = self.send(cancel, self.client.get(url)).await?;
        match response.status() {
            s if s.is_success() => {
                let body: GetDeploymentResponse = Self::decode(cancel, response).await?;
                Ok(body.deployment)
            }
            StatusCode::NOT_FOUND => Err(DirectoryError::NotFound { id: id.to_string() }),
            _ => Err(status_error(cancel, response).await),
        }
    }

    async fn list_deployments(
        &self,
        cancel: &CancellationToken,
        request: &ListDeploymentsRequest,
    ) -> Result<Vec<DeploymentRecord>, DirectoryError> {
        let url = self.url(&[
            "projects",
            &request.application.project,
            "applications",
            &request.application.application,
            "deployments",
        ]);
        let mut query = vec![("workspace", request.workspace.workspace.clone())];
        if let Some(state) = request.physical_state {
            query.push(("physical_state", state.as_str().to_string()));
        }
        if let Some(order) = request.order {
            query.push(("order", order.order.as_str().to_string()));
            query.push(("desc", order.desc.to_string()));
        }

        let response = self
            .send(cancel, self.client.get(url).query(&query))
            .await?;
        if !response.status().is_success() {
            return Err(status_error(cancel, response).await);
        }
        let body: ListDeploymentsResponse = Self::decode(cancel, response).await?;
        Ok(body.deployments)
    }
}

impl ApplicationCatalog for HttpDirectoryClient {
    async fn list_applications(
        &self,
        cancel: &CancellationToken,
        project: &str,
    ) -> Result<Vec<ApplicationRef>, DirectoryError> {
        let url = self.url(&["projects", project, "applications"]);
        let response = self.send(cancel, self.client.get(url)).await?;
        if !response.status().is_success() {
            return Err(status_error(cancel, response).await);
        }
        let body: ListApplicationsResponse = Self::decode(cancel, response).await?;
        Ok(body.applications)
    }
}

/// Directory client bound to one application.
pub struct AppClient<'a> {
    client: &'a HttpDirectoryClient,
    application: ApplicationRef,
}

impl ApplicationClients for HttpDirectoryClient {
    type App<'a>
        = AppClient<'a>
    where
        Self: 'a;

    fn app<'a>(&'a self, application: &ApplicationRef) -> AppClient<'a> {
        AppClient {
            client: self,
            application: application.clone(),
        }
    }
}

impl DeploymentDestroyer for AppClient<'_> {
    async fn destroy_deploy(
        &self,
        cancel: &CancellationToken,
        deployment: &DeploymentRecord,
    ) -> Result<(), DirectoryError> {
        if deployment.application != self.application {
            return Err(DirectoryError::Transport(format!(
                "deployment '{}' belongs to {}, not {}",
                deployment.id, deployment.application, self.application
            )));
        }
        let url = self.client.url(&[
            "projects",
            &self.application.project,
            "applications",
            &self.application.application,
            "deployments",
            &deployment.id,
            "destroy",
        ]);
        let body = DestroyDeploymentRequest {
            deployment: deployment.clone(),
        };
        let response = self
            .client
            .send(cancel, self.client.client.post(url).json(&body))
            .await?;
        if !response.status().is_success() {
            return Err(status_error(cancel, response).await);
        }
        Ok(())
    }
}
