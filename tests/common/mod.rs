#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use directory_server::{AppConfig, AppState, build_router};
use products_hr::EmployeeStore;
use products_hr_client::EmployeeClient;
use tokio::{net::TcpListener, task::JoinHandle};

pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<EmployeeStore>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn seeded() -> anyhow::Result<Self> {
        Self::start(EmployeeStore::seeded()).await
    }

    pub async fn start(store: EmployeeStore) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = AppState::new(store, AppConfig::default());
        let store = state.store.clone();
        let router = build_router(state);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router.into_make_service()).await;
        });
        Ok(Self {
            addr,
            store,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> EmployeeClient {
        EmployeeClient::new(self.base_url())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
