//! Local HTTP server for the preview page.
//!
//! A deliberately small, synchronous server on `tiny_http`: one request at
//! a time, no shared state beyond the filesystem, matching the tool's
//! single-operator scope. The routing surface is exactly two things:
//!
//! - `POST /delete?file=<name>` — validate the name, delete the asset and
//!   its derived outputs, then regenerate the whole page (forced, in
//!   serve mode). Responds `200` with `{"ok":true}`, `400` for a missing
//!   or invalid name, `404` when the file is absent, `500` on anything
//!   unexpected.
//! - `GET`/`HEAD <path>` — static files from the base directory only.
//!   `/` maps to the generated page, `HEAD` sends headers without a body.
//!   Traversal attempts never resolve.
//!
//! Everything else is `404`. The loop runs until the process is killed.
//!
//! Request handling is split into pure helpers (`respond_delete`,
//! `resolve_static_path`, `parse_file_param`) so routing and validation
//! are testable without opening sockets.

use crate::generate;
use crate::imaging::ResizeBackend;
use crate::mutate::{self, DeleteOutcome, MutateError};
use crate::naming;
use crate::process::{self, RegenOptions};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("failed to bind 127.0.0.1:{port}: {reason}")]
    Bind { port: u16, reason: String },
}

/// Serve `dir` on `127.0.0.1:<port>` until the process is terminated.
pub fn serve(dir: &Path, port: u16, backend: &dyn ResizeBackend) -> Result<(), ServeError> {
    let server = Server::http(("127.0.0.1", port)).map_err(|e| ServeError::Bind {
        port,
        reason: e.to_string(),
    })?;

    println!(
        "Open: http://127.0.0.1:{port}/{page}",
        page = naming::PAGE_FILENAME
    );
    println!("Delete button will remove files from disk. Ctrl+C to stop.");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(dir, backend, request) {
            eprintln!("request failed: {e}");
        }
    }
    Ok(())
}

fn handle_request(
    dir: &Path,
    backend: &dyn ResizeBackend,
    request: Request,
) -> std::io::Result<()> {
    let url = request.url().to_string();
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (url.as_str(), None),
    };
    let is_head = *request.method() == Method::Head;

    match (request.method(), path) {
        (Method::Post, "/delete") => {
            let (status, body, content_type) = respond_delete(dir, backend, query);
            request.respond(
                Response::from_string(body)
                    .with_status_code(status)
                    .with_header(content_type_header(content_type)),
            )
        }
        (Method::Get | Method::Head, _) => match resolve_static_path(dir, path) {
            Some(file_path) => {
                let content_type = content_type_header(content_type_for(&file_path));
                if is_head {
                    // Headers only.
                    return request.respond(Response::empty(200).with_header(content_type));
                }
                match fs::read(&file_path) {
                    Ok(body) => {
                        request.respond(Response::from_data(body).with_header(content_type))
                    }
                    Err(e) => respond_text(request, 500, &e.to_string()),
                }
            }
            None => respond_text(request, 404, "Not found"),
        },
        _ => respond_text(request, 404, "Not found"),
    }
}

/// Delete-endpoint logic: status code, body, and content type.
fn respond_delete(
    dir: &Path,
    backend: &dyn ResizeBackend,
    query: Option<&str>,
) -> (u16, String, &'static str) {
    let Some(name) = query.and_then(parse_file_param) else {
        return (400, "Missing file=".to_string(), "text/plain");
    };

    match mutate::delete_asset(dir, &name) {
        Err(MutateError::Name(e)) => (400, e.to_string(), "text/plain"),
        Err(e) => (500, e.to_string(), "text/plain"),
        Ok(DeleteOutcome::Missing) => (404, "Not found".to_string(), "text/plain"),
        Ok(DeleteOutcome::Deleted { .. }) => {
            // Full regenerate so the served page reflects the new disk state.
            let result = process::regenerate(
                dir,
                backend,
                RegenOptions {
                    check: false,
                    force: true,
                },
            )
            .map_err(|e| e.to_string())
            .and_then(|report| {
                generate::generate(dir, &report.assets, true).map_err(|e| e.to_string())
            });
            match result {
                Ok(_) => (
                    200,
                    serde_json::json!({ "ok": true }).to_string(),
                    "application/json",
                ),
                Err(e) => (500, e, "text/plain"),
            }
        }
    }
}

/// Extract and decode the `file` parameter from a raw query string.
/// Empty values count as missing.
fn parse_file_param(query: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "file" {
            return None;
        }
        let decoded = urlencoding::decode(value).ok()?.trim().to_string();
        (!decoded.is_empty()).then_some(decoded)
    })
}

/// Map a request path to a file inside `dir`, or `None` for anything that
/// does not resolve to an existing regular file within the directory.
fn resolve_static_path(dir: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    let relative = match decoded.as_ref() {
        "/" | "" => naming::PAGE_FILENAME,
        other => other.strip_prefix('/')?,
    };
    if relative.contains("..") || relative.contains('/') || relative.contains('\\') {
        return None;
    }
    let path = dir.join(relative);
    path.is_file().then_some(path)
}

/// Content type by extension. The served directory only ever holds images
/// and the generated page, so the table is short.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

fn respond_text(request: Request, status: u16, body: &str) -> std::io::Result<()> {
    request.respond(
        Response::from_string(body)
            .with_status_code(status)
            .with_header(content_type_header("text/plain")),
    )
}

fn content_type_header(value: &str) -> Header {
    // Static names and values only; construction cannot fail.
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).unwrap()
}
