//! HTTP viewer for the dashboards
//!
//! `channelscope serve` renders both pages per request from the configured
//! JSON exports, so edits to the exports show up on reload. The raw
//! documents are also exposed as JSON under /api/.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::load;
use crate::render;

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(error: String) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Source paths the server reads on every request.
pub struct ViewerPaths {
    pub analysis: PathBuf,
    pub media_kit: PathBuf,
}

/// Start the dashboard viewer server. Blocks serving requests until the
/// process is interrupted.
pub fn start_viewer(port: u16, paths: &ViewerPaths) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let url = format!("http://localhost:{}", port);

    eprintln!("\n\x1b[1;32m📺 channelscope\x1b[0m");
    eprintln!("   Analysis dashboard: {}", url);
    eprintln!("   Media kit:          {}/mediakit", url);
    eprintln!("   Press Ctrl+C to stop\n");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, paths) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn handle_request(request: Request, paths: &ViewerPaths) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        // Analysis dashboard
        (&Method::Get, "/") | (&Method::Get, "/analysis") => {
            respond_html(request, render_analysis_page(&paths.analysis))
        }

        // Media-kit dashboard
        (&Method::Get, "/mediakit") => {
            respond_html(request, render_media_kit_page(&paths.media_kit))
        }

        // API: raw analysis document
        (&Method::Get, "/api/analysis") => {
            let body = match load::load_analysis(&paths.analysis) {
                Ok(doc) => serde_json::to_string(&ApiResponse::success(doc))?,
                Err(e) => serde_json::to_string(&ApiResponse::<()>::failure(e.to_string()))?,
            };
            respond_json(request, body)
        }

        // API: raw media-kit document
        (&Method::Get, "/api/mediakit") => {
            let body = match load::load_media_kit(&paths.media_kit) {
                Ok(doc) => serde_json::to_string(&ApiResponse::success(doc))?,
                Err(e) => serde_json::to_string(&ApiResponse::<()>::failure(e.to_string()))?,
            };
            respond_json(request, body)
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn render_analysis_page(path: &Path) -> Result<String, String> {
    let doc = load::load_analysis(path).map_err(|e| e.to_string())?;
    let mut out = Vec::new();
    render::analysis::write(&mut out, &doc).map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

fn render_media_kit_page(path: &Path) -> Result<String, String> {
    let doc = load::load_media_kit(path).map_err(|e| e.to_string())?;
    let mut out = Vec::new();
    render::media_kit::write(&mut out, &doc).map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

fn respond_html(request: Request, page: Result<String, String>) -> std::io::Result<()> {
    match page {
        Ok(html) => {
            let response = Response::from_string(html)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
            request.respond(response)
        }
        Err(message) => {
            let body = format!(
                "<!DOCTYPE html><html><body><h1>Failed to load dashboard</h1><pre>{}</pre></body></html>",
                render::escape_html(&message)
            );
            let response = Response::from_string(body)
                .with_status_code(500)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
            request.respond(response)
        }
    }
}

fn respond_json(request: Request, body: String) -> std::io::Result<()> {
    let response = Response::from_string(body).with_header(
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
    );
    request.respond(response)
}
