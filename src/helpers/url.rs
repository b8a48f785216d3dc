//! URL helper functions

/// Join a base URL and a path without doubling or dropping slashes
///
/// # Examples
/// ```ignore
/// join_url("http://localhost:3000/", "/api/projects") // -> "http://localhost:3000/api/projects"
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Site path of a project detail page
pub fn project_path(slug: &str) -> String {
    format!("/projects/{}", slug)
}

/// Site path of a writing detail page
pub fn writing_path(slug: &str) -> String {
    format!("/writings/{}", slug)
}

/// Base URL for a bind address, mapping wildcard and named hosts to loopback
pub fn local_base_url(ip: &str, port: u16) -> String {
    let host = match ip {
        "localhost" | "0.0.0.0" | "" => "127.0.0.1",
        "::" => "[::1]",
        other => other,
    };
    format!("http://{}:{}", host, port)
}
