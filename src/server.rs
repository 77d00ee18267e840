//! Running the mock service on a real TCP port.
//!
//! [`SwiftServer::start`] binds, seeds the test account and serves in a
//! background task until [`SwiftServer::close`] is called or the value is
//! dropped.

use crate::{config::AppConfig, routes, services::storage_service::StorageService};
use anyhow::{Context, Result};
use std::{
    io::{self, ErrorKind},
    net::{IpAddr, Ipv4Addr, SocketAddr},
};
use tokio::{
    net::{TcpListener, UdpSocket},
    sync::oneshot,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

pub struct SwiftServer {
    /// v1 auth endpoint, e.g. `http://10.0.0.5:8080/auth/v1.0`.
    pub auth_url: String,
    /// API base; account storage URLs are `<url>/AUTH_<account>`.
    pub url: String,
    local_addr: SocketAddr,
    service: StorageService,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<io::Result<()>>>,
}

impl SwiftServer {
    pub async fn start(cfg: AppConfig) -> Result<Self> {
        let service = StorageService::new(cfg.metadata_policy());
        service.add_account(&cfg.account, &cfg.password).await;

        let listener = bind(&cfg).await?;
        let local_addr = listener.local_addr()?;

        let host = match &cfg.advertise_host {
            Some(host) => host.clone(),
            None => advertised_ip(local_addr.ip()).await.to_string(),
        };
        let base = if host.contains(':') {
            format!("http://[{}]:{}", host, local_addr.port())
        } else {
            format!("http://{}:{}", host, local_addr.port())
        };
        let auth_url = format!("{}/auth/v1.0", base);
        let url = format!("{}/v1", base);
        let service = service.with_api_url(&url);

        let (shutdown, signal) = oneshot::channel::<()>();
        let app = routes::app(service.clone());
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await
        });

        info!("Swift mock listening on {} (auth {} api {})", local_addr, auth_url, url);

        Ok(Self {
            auth_url,
            url,
            local_addr,
            service,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle on the live store, for seeding or inspecting state in tests.
    pub fn storage(&self) -> &StorageService {
        &self.service
    }

    /// Storage URL of `account`.
    pub fn account_url(&self, account: &str) -> String {
        format!("{}/AUTH_{}", self.url, account)
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn close(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            task.await
                .context("server task panicked")?
                .context("server terminated with an error")?;
        }
        debug!("Swift mock on {} closed", self.local_addr);
        Ok(())
    }
}

impl Drop for SwiftServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn bind(cfg: &AppConfig) -> Result<TcpListener> {
    let addr = cfg.addr();
    match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(listener),
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr, err, fallback_addr
            );
            Ok(TcpListener::bind(&fallback_addr).await?)
        }
        Err(err) => Err(err).with_context(|| format!("cannot listen on {}", addr)),
    }
}

/// The address clients should use to reach a listener bound to `bound`.
///
/// Wildcard binds advertise the host's outbound IPv4 address when one can be
/// found, loopback otherwise.
async fn advertised_ip(bound: IpAddr) -> IpAddr {
    if !bound.is_unspecified() {
        return bound;
    }
    match discover_ipv4().await {
        Ok(ip) => ip,
        Err(err) => {
            debug!("no routable address found ({}), advertising loopback", err);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

/// Pick the local address the OS would route external traffic from. A UDP
/// connect sends no packets.
async fn discover_ipv4() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect((Ipv4Addr::new(192, 0, 2, 1), 9)).await?;
    let ip = socket.local_addr()?.ip();
    match ip {
        IpAddr::V4(v4) if !v4.is_unspecified() && !v4.is_loopback() => Ok(ip),
        _ => Err(io::Error::new(ErrorKind::AddrNotAvailable, "no global IPv4 address")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_bind_is_advertised_as_is() {
        let ip: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(advertised_ip(ip).await, ip);
    }

    #[tokio::test]
    async fn urls_follow_bound_port() {
        let server = SwiftServer::start(AppConfig::local()).await.unwrap();
        let port = server.local_addr().port();
        assert_ne!(port, 0);
        assert_eq!(server.auth_url, format!("http://127.0.0.1:{}/auth/v1.0", port));
        assert_eq!(server.url, format!("http://127.0.0.1:{}/v1", port));
        assert_eq!(
            server.account_url("swifttest"),
            format!("http://127.0.0.1:{}/v1/AUTH_swifttest", port)
        );
        assert!(server.storage().lock().await.account("swifttest").is_some());
        server.close().await.unwrap();
    }

    #[tokio::test]
    async fn advertise_host_overrides_bound_address() {
        let cfg = AppConfig {
            advertise_host: Some("swift.test".into()),
            ..AppConfig::local()
        };
        let server = SwiftServer::start(cfg).await.unwrap();
        assert!(server.auth_url.starts_with("http://swift.test:"));
        server.close().await.unwrap();
    }
}
