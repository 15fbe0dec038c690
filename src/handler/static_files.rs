//! Static file serving module
//!
//! Maps request paths to filesystem paths under the serving root and builds
//! the matching response. Resolution is split from serving so the path
//! rules can be tested without a running server.

use crate::handler::listing;
use crate::http::{self, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Index files tried when a directory is requested, in order.
const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Outcome of resolving a request path against the serving root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Serve this file
    File(PathBuf),
    /// Directory requested without a trailing slash; redirect to this path
    Redirect(String),
    /// Directory with no index file; render a listing
    Listing(PathBuf),
    /// Path resolves outside the root (symlink escape)
    Forbidden,
    /// No such file or directory
    NotFound,
}

/// Resolve a request path to a filesystem location under `root`.
///
/// `root` must already be canonical; the containment check compares
/// canonical paths on both sides so symlinks cannot smuggle a target out
/// of the tree.
pub fn resolve(root: &Path, request_path: &str) -> Resolution {
    let Some(relative) = decode_path(request_path) else {
        return Resolution::NotFound;
    };

    let requested = root.join(relative);

    // Missing paths and dangling symlinks both land here as 404.
    let Ok(canonical) = requested.canonicalize() else {
        return Resolution::NotFound;
    };

    if !canonical.starts_with(root) {
        return Resolution::Forbidden;
    }

    if canonical.is_dir() {
        if !request_path.ends_with('/') {
            return Resolution::Redirect(format!("{request_path}/"));
        }
        for index in INDEX_FILES {
            let candidate = canonical.join(index);
            if candidate.is_file() {
                return Resolution::File(candidate);
            }
        }
        return Resolution::Listing(canonical);
    }

    Resolution::File(canonical)
}

/// Percent-decode a request path into a root-relative path.
///
/// Segments are decoded independently, so an encoded slash cannot change
/// the path structure. Returns `None` for undecodable bytes, embedded NUL
/// or slash, and any parent-directory segment, plain or encoded — all
/// rejected before touching the filesystem.
fn decode_path(request_path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in request_path.split('/') {
        let decoded = urlencoding::decode(segment).ok()?;
        if decoded.contains('/') || decoded.contains('\0') || decoded == ".." {
            return None;
        }
        if decoded.is_empty() || decoded == "." {
            continue;
        }
        relative.push(decoded.as_ref());
    }
    Some(relative)
}

/// Serve a request path from the root directory
pub async fn serve(root: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match resolve(root, request_path) {
        Resolution::File(path) => serve_file(&path, is_head).await,
        Resolution::Redirect(target) => http::build_redirect_response(&target),
        Resolution::Listing(dir) => match listing::render(&dir, request_path) {
            Ok(html) => http::build_html_response(html, is_head),
            Err(_) => http::build_404_response(),
        },
        Resolution::Forbidden => http::build_403_response(),
        Resolution::NotFound => http::build_404_response(),
    }
}

/// Read a file and build its 200 response
async fn serve_file(path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return http::build_403_response();
        }
        Err(_) => return http::build_404_response(),
    };

    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));

    http::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified(path).as_deref(),
        is_head,
    )
}

/// Format a file's mtime as an RFC 1123 `Last-Modified` value
fn last_modified(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let when: chrono::DateTime<chrono::Utc> = modified.into();
    Some(when.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("devserve-static-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.canonicalize().unwrap()
    }

    #[test]
    fn test_resolve_file() {
        let root = temp_root("file");
        std::fs::write(root.join("page.txt"), "data").unwrap();

        assert_eq!(
            resolve(&root, "/page.txt"),
            Resolution::File(root.join("page.txt"))
        );
    }

    #[test]
    fn test_resolve_missing_is_not_found() {
        let root = temp_root("missing");
        assert_eq!(resolve(&root, "/absent.txt"), Resolution::NotFound);
    }

    #[test]
    fn test_resolve_parent_segments_rejected() {
        let root = temp_root("dotdot");
        assert_eq!(resolve(&root, "/../../etc/passwd"), Resolution::NotFound);
        assert_eq!(resolve(&root, "/a/../../etc/passwd"), Resolution::NotFound);
    }

    #[test]
    fn test_resolve_decodes_percent_encoded_names() {
        let root = temp_root("encoded");
        std::fs::write(root.join("a b.txt"), "x").unwrap();

        assert_eq!(
            resolve(&root, "/a%20b.txt"),
            Resolution::File(root.join("a b.txt"))
        );
    }

    #[test]
    fn test_resolve_rejects_hostile_encodings() {
        let root = temp_root("hostile");
        // Encoded parent segment, encoded slash, embedded NUL
        assert_eq!(resolve(&root, "/%2e%2e/etc/passwd"), Resolution::NotFound);
        assert_eq!(resolve(&root, "/a%2Fb.txt"), Resolution::NotFound);
        assert_eq!(resolve(&root, "/a%00b.txt"), Resolution::NotFound);
    }

    #[test]
    fn test_listing_links_resolve_back_to_their_files() {
        let root = temp_root("roundtrip");
        std::fs::write(root.join("a b.txt"), "x").unwrap();

        let html = crate::handler::listing::render(&root, "/").unwrap();
        assert!(html.contains("href=\"a%20b.txt\""));
        assert_eq!(
            resolve(&root, "/a%20b.txt"),
            Resolution::File(root.join("a b.txt"))
        );
    }

    #[test]
    fn test_resolve_directory_redirects_without_slash() {
        let root = temp_root("redirect");
        std::fs::create_dir_all(root.join("sub")).unwrap();

        assert_eq!(
            resolve(&root, "/sub"),
            Resolution::Redirect("/sub/".to_string())
        );
    }

    #[test]
    fn test_resolve_directory_prefers_index() {
        let root = temp_root("index");
        std::fs::write(root.join("index.html"), "<p>root</p>").unwrap();

        assert_eq!(
            resolve(&root, "/"),
            Resolution::File(root.join("index.html"))
        );
    }

    #[test]
    fn test_resolve_directory_without_index_lists() {
        let root = temp_root("listing");
        std::fs::create_dir_all(root.join("bare")).unwrap();

        assert_eq!(
            resolve(&root, "/bare/"),
            Resolution::Listing(root.join("bare"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_escape_is_forbidden() {
        let root = temp_root("symlink");
        let outside = temp_root("symlink-outside");
        std::fs::write(outside.join("secret.txt"), "secret").unwrap();
        let link = root.join("leak");
        let _ = std::fs::remove_file(&link);
        std::os::unix::fs::symlink(outside.join("secret.txt"), &link).unwrap();

        assert_eq!(resolve(&root, "/leak"), Resolution::Forbidden);
    }

    #[tokio::test]
    async fn test_serve_file_contents() {
        let root = temp_root("serve");
        std::fs::write(root.join("hello.txt"), "hello").unwrap();

        let resp = serve(&root, "/hello.txt", false).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "5");
        assert!(resp.headers().contains_key("Last-Modified"));
    }

    #[tokio::test]
    async fn test_serve_listing_links_entries() {
        let root = temp_root("serve-listing");
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::write(root.join("docs").join("a.txt"), "a").unwrap();

        let resp = serve(&root, "/docs/", false).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
