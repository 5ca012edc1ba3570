use std::mem;
use std::net::SocketAddr;

use super::gen::Generator;
use super::upstream::FakeTmdb;
use super::{configure_db, setup_settings};

use watch_our_movies::web::Application;

pub struct TestApp {
    pub gen: Generator,
    pub tmdb: FakeTmdb,
    pub addr: SocketAddr,
    pub api_client: reqwest::Client,
}
impl TestApp {
    pub async fn new() -> TestApp {
        let tmdb = FakeTmdb::start().await;
        let mut settings = setup_settings();
        settings.tmdb.base_url = tmdb.base_url();

        let pool = configure_db(&settings.database).await;
        let app = Application::build(&settings).await.unwrap();
        let addr = app.listening_addr();
        mem::forget(tokio::spawn(app.serve_forever()));
        TestApp {
            gen: Generator { pool },
            tmdb,
            addr,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }
}
