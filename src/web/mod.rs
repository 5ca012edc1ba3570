mod error;
mod groups;
mod movies;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    extract::{FromRef, MatchedPath},
    http::HeaderValue,
    routing::get,
    Router,
};
use hyper::Request;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use uuid::Uuid;

pub use self::error::ApiError;
use crate::{
    configuration::{AppSettings, Settings},
    db::Registry,
    logic::movies::MoviesService,
    tmdb::TmdbClient,
};

#[derive(FromRef, Clone)]
struct AppState {
    registry: Registry,
    movies: MoviesService,
}

pub struct Application {
    listening_addr: SocketAddr,
    server: Server,
}

impl Application {
    pub async fn build(settings: &Settings) -> Result<Application, anyhow::Error> {
        let tracing_layer = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let method = req.method();
                let uri = req.uri();
                let matched_path = req.extensions().get::<MatchedPath>().map(|p| p.as_str());

                tracing::debug_span!("http-request", %method, %uri, matched_path, request_id = %Uuid::new_v4())
            });

        let registry = Registry::new(&settings.database).await?;
        let movies = MoviesService::new(Arc::new(TmdbClient::new(&settings.tmdb)?));

        let movies_router = Router::new()
            .route("/:movie_id/details", get(movies::details))
            .route("/search", get(movies::search))
            .route("/trending", get(movies::trending))
            .route("/genre/movie", get(movies::genre_list))
            .route("/genre", get(movies::by_genre));

        let app = Router::new()
            .route(
                "/groups/",
                get(groups::list_groups).post(groups::create_group),
            )
            .nest("/movies", movies_router)
            .layer(
                ServiceBuilder::new()
                    .layer(tracing_layer)
                    .layer(cors_layer(&settings.app)?),
            )
            .with_state(AppState { registry, movies });

        let listener = TcpListener::bind(settings.app.socket_addr()).await?;
        Ok(Self {
            listening_addr: listener.local_addr()?,
            server: Server::new(listener, app),
        })
    }
    pub async fn serve_forever(self) -> Result<(), std::io::Error> {
        info!("Web server is listening on {}", self.listening_addr);
        self.server.serve().await
    }
    pub fn listening_addr(&self) -> SocketAddr {
        self.listening_addr
    }
}

fn cors_layer(settings: &AppSettings) -> anyhow::Result<CorsLayer> {
    let origin = if settings.allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = settings
            .allowed_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

struct Server {
    listener: TcpListener,
    app: Router,
}
impl Server {
    pub fn new(listener: TcpListener, app: Router) -> Self {
        Self { listener, app }
    }

    pub async fn serve(self) -> Result<(), std::io::Error> {
        axum::serve(self.listener, self.app).await
    }
}
