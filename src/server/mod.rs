//! Development server with live reload and server-side command search

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::generator::COMMANDS_JSON;
use crate::helpers::decode_segment;
use crate::pages::{self, RenderContext};
use crate::routes::Route;
use crate::search::CommandRecord;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    config: SiteConfig,
    templates: TemplateRenderer,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.config, &self.templates)
    }
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Start the development server
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    // Create broadcast channel for live reload notifications
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: site.public_dir.clone(),
        config: site.config.clone(),
        templates: TemplateRenderer::new()?,
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(site, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/commands", get(commands_handler))
        .route("/commands/", get(commands_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Paths whose changes trigger a rebuild
fn watched_paths(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    vec![
        (site.content_dir.clone(), RecursiveMode::Recursive),
        (site.static_dir.clone(), RecursiveMode::Recursive),
        (site.config_path(), RecursiveMode::NonRecursive),
    ]
}

/// Watch for file changes and trigger reload.
///
/// Blocks on the debouncer channel, so it runs on the blocking pool.
fn watch_and_reload(site: Site, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watched_paths(&site) {
        if path.exists() {
            debouncer.watcher().watch(&path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&e.path))
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                println!();
                for event in &relevant_events {
                    println!("📝 File changed: {}", event.path.display());
                }

                // Reload site.yml as well, it may be one of the changed files
                println!("\n🔄 Regenerating...");
                match Site::new(&site.base_dir).and_then(|fresh| fresh.generate()) {
                    Ok(_) => {
                        println!("✅ Regenerated successfully!");
                        let _ = reload_tx.send(());
                    }
                    Err(e) => {
                        println!("❌ Generation failed: {}", e);
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor backups, VCS metadata and OS droppings
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.contains("node_modules")
        && !path_str.ends_with('~')
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// `GET /commands?q=term` renders the filtered index server-side
async fn commands_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<SearchQuery>,
    request: Request<Body>,
) -> Response {
    if query.q.is_empty() {
        return fallback_handler(State(state), request).await;
    }

    let records = match load_command_records(&state.public_dir).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Cannot search commands: {}", e);
            return not_found(&state);
        }
    };

    match pages::render_command_list(&state.render_context(), &records, &query.q) {
        Ok(rendered) => html_response(&state, StatusCode::OK, rendered.html),
        Err(e) => {
            tracing::error!("Failed to render command search: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn load_command_records(public_dir: &Path) -> Result<Vec<CommandRecord>> {
    let content = tokio::fs::read_to_string(public_dir.join(COMMANDS_JSON)).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Fallback handler that serves files and injects live reload script
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some(file_path) = resolve_file(&state.public_dir, request.uri().path()) else {
        return not_found(&state);
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => html_response(&state, StatusCode::OK, content),
            Err(_) => not_found(&state),
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path to an existing file under `public_dir`.
///
/// Site routes resolve to the file the generator wrote for them; anything
/// else is looked up as a plain file.
fn resolve_file(public_dir: &Path, path: &str) -> Option<PathBuf> {
    if let Some(route) = Route::parse(path) {
        let output = route.output_file();
        if stays_inside(&output) {
            let candidate = public_dir.join(output);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    let clean_path = decode_segment(path.trim_start_matches('/'));
    if !stays_inside(Path::new(&clean_path)) {
        return None;
    }

    let candidate = public_dir.join(&clean_path);
    if candidate.is_dir() {
        let index = candidate.join("index.html");
        return index.is_file().then_some(index);
    }
    if candidate.is_file() {
        return Some(candidate);
    }

    let with_html = public_dir.join(format!("{}.html", clean_path.trim_end_matches('/')));
    with_html.is_file().then_some(with_html)
}

/// Decoded paths may carry `..`, a root or a drive prefix
fn stays_inside(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// 404 with the rendered not-found page
fn not_found(state: &ServerState) -> Response {
    match pages::render_not_found(&state.render_context()) {
        Ok(rendered) => html_response(state, StatusCode::NOT_FOUND, rendered.html),
        Err(e) => {
            tracing::error!("Failed to render 404 page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

fn html_response(state: &ServerState, status: StatusCode, html: String) -> Response {
    let html = if state.live_reload {
        inject_live_reload(&html)
    } else {
        html
    };
    (status, Html(html)).into_response()
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_file() {
        let dir = TempDir::new().unwrap();
        let public = &dir.path().join("public");
        fs::create_dir_all(public.join("commands/get")).unwrap();
        fs::write(public.join("index.html"), "home").unwrap();
        fs::write(public.join("commands/get/index.html"), "get").unwrap();
        fs::write(public.join("404.html"), "missing").unwrap();

        assert_eq!(resolve_file(public, "/"), Some(public.join("index.html")));
        assert_eq!(
            resolve_file(public, "/commands/get/"),
            Some(public.join("commands/get/index.html"))
        );
        assert_eq!(resolve_file(public, "/404"), Some(public.join("404.html")));
        assert_eq!(resolve_file(public, "/commands/nope"), None);
        assert_eq!(resolve_file(public, "/../secret"), None);
    }

    #[test]
    fn test_resolve_file_stays_in_public_dir() {
        let dir = TempDir::new().unwrap();
        let public = &dir.path().join("public");
        fs::create_dir_all(public).unwrap();
        let secret = dir.path().join("secret.html");
        fs::write(&secret, "secret").unwrap();

        let encoded_absolute = secret.to_string_lossy().replace('/', "%2F");
        assert_eq!(resolve_file(public, &format!("/{}", encoded_absolute)), None);
        assert_eq!(resolve_file(public, "/%2Fetc%2Fhostname"), None);
        assert_eq!(resolve_file(public, "/..%2Fsecret.html"), None);
        assert_eq!(resolve_file(public, "/..%2Fsecret"), None);
        assert_eq!(resolve_file(public, "/docs/%2E%2E/%2E%2E/secret.html"), None);
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>hi</p></body></html>");
        assert!(html.contains("__livereload"));
        assert!(html.ends_with("</body>\n</html>"));

        let bare = inject_live_reload("<p>hi</p>");
        assert!(bare.starts_with("<p>hi</p>"));
        assert!(bare.contains("__livereload"));
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("content/commands/get.md")));
        assert!(!is_relevant(Path::new("content/.git/index")));
        assert!(!is_relevant(Path::new("content/docs/index.md~")));
    }
}
