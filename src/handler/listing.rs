//! Directory listing module
//!
//! Renders a plain HTML index for directories that have no index file:
//! a sorted list of links, directories marked with a trailing slash.
//! Link targets are percent-encoded so names with spaces or reserved
//! characters survive the round trip back through path resolution.

use std::io;
use std::path::Path;

/// Render the listing page for `dir`, displayed under `request_path`.
pub fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries: Vec<(String, bool)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort();

    let title = format!("Directory listing for {}", escape_html(request_path));
    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for (name, is_dir) in entries {
        // The trailing slash on directories is path structure, not part of
        // the name, so it stays outside the encoded segment.
        let encoded = urlencoding::encode(&name);
        let (href, display) = if is_dir {
            (format!("{encoded}/"), format!("{name}/"))
        } else {
            (encoded.into_owned(), name.clone())
        };
        html.push_str(&format!(
            "<li><a href=\"{href}\">{}</a></li>\n",
            escape_html(&display)
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Escape the characters that break out of HTML text or attribute context
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("devserve-listing-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("\"x\""), "&quot;x&quot;");
        assert_eq!(escape_html("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_render_lists_files_and_directories() {
        let dir = temp_dir("render");
        std::fs::write(dir.join("b.txt"), "b").unwrap();
        std::fs::create_dir_all(dir.join("a-dir")).unwrap();

        let html = render(&dir, "/").unwrap();
        assert!(html.contains("Directory listing for /"));
        assert!(html.contains("<a href=\"b.txt\">b.txt</a>"));
        assert!(html.contains("<a href=\"a-dir/\">a-dir/</a>"));
    }

    #[test]
    fn test_render_encodes_hrefs_and_escapes_display_names() {
        let dir = temp_dir("escape");
        std::fs::write(dir.join("a&b c.txt"), "x").unwrap();

        let html = render(&dir, "/").unwrap();
        assert!(html.contains("href=\"a%26b%20c.txt\""));
        assert!(html.contains(">a&amp;b c.txt</a>"));
        assert!(!html.contains("a&b c.txt"));
    }

    #[test]
    fn test_render_keeps_directory_slash_outside_encoding() {
        let dir = temp_dir("dir-slash");
        std::fs::create_dir_all(dir.join("my docs")).unwrap();

        let html = render(&dir, "/").unwrap();
        assert!(html.contains("href=\"my%20docs/\""));
        assert!(html.contains(">my docs/</a>"));
    }

    #[test]
    fn test_render_missing_directory_errors() {
        let missing = std::env::temp_dir().join(format!("devserve-gone-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&missing);
        assert!(render(&missing, "/gone/").is_err());
    }
}
