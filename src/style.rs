//! Mapbox Atlas style URL decomposition.
//!
//! An Atlas style URL has a fixed shape:
//!
//! ```text
//! scheme://host[:port]/apiSeg1/apiSeg2/username/styleId.ext?access_token=TOKEN[#fragment]
//!   0    1     2          3       4       5                  6
//! ```
//!
//! [`decompose`] validates that shape and splits it into a [`StyleDescriptor`].

use std::str::FromStr;

use crate::error::{MapsourceError, Result};

/// Port used for every `https:` style URL.
pub const HTTPS_PORT: &str = "443";

/// Port used for `http:` style URLs without an explicit port.
pub const HTTP_PORT: &str = "80";

pub(crate) const TOKEN_MARKER: &str = "access_token=";
const TOKEN_PREFIX: &str = "pk.";

/// The structural parts of one Atlas style URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleDescriptor {
    /// `http:` or `https:`, including the colon.
    pub scheme: String,
    /// Hostname without port.
    pub server: String,
    /// Port as a numeric string.
    pub port: String,
    /// Two-segment API path, e.g. `styles/v1`.
    pub api_path: String,
    /// Atlas account name.
    pub username: String,
    /// Mapbox style identifier.
    pub style_id: String,
    /// Atlas access token.
    pub token: String,
}

impl StyleDescriptor {
    /// `{scheme}//{server}`, as written to the connection `server` attribute.
    pub fn server_url(&self) -> String {
        format!("{}//{}", self.scheme, self.server)
    }

    /// `mapbox://styles/{username}/{style_id}`.
    pub fn style_url(&self) -> String {
        format!("mapbox://styles/{}/{}", self.username, self.style_id)
    }

    /// Tile request template for the connection.
    ///
    /// `{L}`, `{Z}`, `{X}`, `{Y}` and `{D}` are left for Tableau to fill in.
    pub fn url_format(&self) -> String {
        format!(
            "/{}/{}/{{L}}/tiles/{{Z}}/{{X}}/{{Y}}{{D}}?access_token={}",
            self.api_path, self.username, self.token
        )
    }
}

impl FromStr for StyleDescriptor {
    type Err = MapsourceError;

    fn from_str(s: &str) -> Result<Self> {
        decompose(s)
    }
}

/// Split an Atlas style URL into its parts.
///
/// Fails with [`MapsourceError::MalformedUrl`] when the URL does not have the
/// Atlas shape rather than returning a partially filled descriptor.
pub fn decompose(url: &str) -> Result<StyleDescriptor> {
    let malformed = |reason: &'static str| MapsourceError::malformed_url(url, reason);

    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 7 {
        return Err(malformed("expected at least 7 '/'-separated segments"));
    }

    let scheme = segments[0];
    if scheme != "http:" && scheme != "https:" {
        return Err(malformed("scheme must be http: or https:"));
    }

    let (server, explicit_port) = match segments[2].split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (segments[2], None),
    };
    if server.is_empty() {
        return Err(malformed("missing host"));
    }
    let port = match (scheme, explicit_port) {
        ("https:", _) => HTTPS_PORT,
        (_, Some(port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => port,
        (_, Some(_)) => return Err(malformed("port must be numeric")),
        (_, None) => HTTP_PORT,
    };

    if segments[3].is_empty() || segments[4].is_empty() {
        return Err(malformed("missing API path segment"));
    }
    let api_path = format!("{}/{}", segments[3], segments[4]);

    let username = segments[5];
    if username.is_empty() {
        return Err(malformed("missing username"));
    }

    let (style_id, token) = split_style_segment(segments[6]).map_err(malformed)?;

    if !token.starts_with(TOKEN_PREFIX) {
        tracing::warn!(
            style = style_id,
            "access token does not start with '{TOKEN_PREFIX}'; Tableau will reject it"
        );
    }

    tracing::debug!(
        server,
        port,
        api_path = api_path.as_str(),
        username,
        style = style_id,
        "decomposed style URL"
    );

    Ok(StyleDescriptor {
        scheme: scheme.to_string(),
        server: server.to_string(),
        port: port.to_string(),
        api_path,
        username: username.to_string(),
        style_id: style_id.to_string(),
        token: token.to_string(),
    })
}

/// Split `styleId.ext?...access_token=TOKEN...` into style id and token.
fn split_style_segment(segment: &str) -> std::result::Result<(&str, &str), &'static str> {
    let (before_query, query) = segment.split_once('?').unwrap_or((segment, ""));

    let style_id = match before_query.split_once('.') {
        Some((id, _)) => id,
        None => return Err("style segment must look like 'styleId.ext?...'"),
    };
    if style_id.is_empty() {
        return Err("missing style id");
    }

    let query = query.split('#').next().unwrap_or_default();
    let token = match query
        .split('&')
        .find_map(|pair| pair.strip_prefix(TOKEN_MARKER))
    {
        Some(token) => token,
        None => return Err("missing access_token parameter"),
    };
    if token.is_empty() {
        return Err("empty access_token parameter");
    }

    Ok((style_id, token))
}

/// Decompose every URL in order.
///
/// Stops at the first malformed URL; the error carries its position.
pub fn decompose_all<S: AsRef<str>>(urls: &[S]) -> Result<Vec<StyleDescriptor>> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| decompose(url.as_ref()).map_err(|e| e.at_index(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(err: MapsourceError) -> &'static str {
        match err {
            MapsourceError::MalformedUrl { reason, .. } => reason,
            other => panic!("expected MalformedUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_decompose_https_url() {
        let style = decompose(
            "https://api.mapbox.com/styles/v1/myuser/mystyle.json?access_token=pk.ABC123",
        )
        .unwrap();
        assert_eq!(style.scheme, "https:");
        assert_eq!(style.server, "api.mapbox.com");
        assert_eq!(style.port, "443");
        assert_eq!(style.api_path, "styles/v1");
        assert_eq!(style.username, "myuser");
        assert_eq!(style.style_id, "mystyle");
        assert_eq!(style.token, "pk.ABC123");
    }

    #[test]
    fn test_decompose_http_explicit_port_and_fragment() {
        let style =
            decompose("http://localhost:8080/styles/v1/u/s.json?access_token=pk.XYZ#frag").unwrap();
        assert_eq!(style.scheme, "http:");
        assert_eq!(style.server, "localhost");
        assert_eq!(style.port, "8080");
        assert_eq!(style.token, "pk.XYZ");
    }

    #[test]
    fn test_decompose_http_default_port() {
        let style = decompose("http://atlas.local/styles/v1/atlas-user/abc.html?access_token=pk.T")
            .unwrap();
        assert_eq!(style.port, "80");
    }

    #[test]
    fn test_https_ignores_explicit_port() {
        let style =
            decompose("https://atlas.local:8443/styles/v1/u/s.json?access_token=pk.T").unwrap();
        assert_eq!(style.server, "atlas.local");
        assert_eq!(style.port, "443");
    }

    #[test]
    fn test_token_stops_at_next_parameter() {
        let style =
            decompose("https://h/styles/v1/u/s.json?access_token=pk.T&fresh=true#12/40/-74")
                .unwrap();
        assert_eq!(style.token, "pk.T");
    }

    #[test]
    fn test_token_after_other_parameters() {
        let style = decompose("https://h/styles/v1/u/s.html?fresh=true&access_token=pk.T").unwrap();
        assert_eq!(style.token, "pk.T");
    }

    #[test]
    fn test_token_key_must_match_exactly() {
        let style =
            decompose("https://h/styles/v1/u/s.json?old_access_token=sk.STALE&access_token=pk.REAL")
                .unwrap();
        assert_eq!(style.token, "pk.REAL");
    }

    #[test]
    fn test_only_suffixed_token_key_is_missing() {
        let err = decompose("https://h/styles/v1/u/s.json?old_access_token=pk.A").unwrap_err();
        assert_eq!(reason_of(err), "missing access_token parameter");
    }

    #[test]
    fn test_token_without_pk_prefix_is_accepted() {
        let style = decompose("https://h/styles/v1/u/s.json?access_token=tk.X").unwrap();
        assert_eq!(style.token, "tk.X");
    }

    #[test]
    fn test_empty_style_id() {
        let err = decompose("https://h/styles/v1/u/.json?access_token=pk.A").unwrap_err();
        assert_eq!(reason_of(err), "missing style id");
    }

    #[test]
    fn test_empty_api_segment() {
        let err = decompose("https://h//v1/u/s.json?access_token=pk.A").unwrap_err();
        assert_eq!(reason_of(err), "missing API path segment");
    }

    #[test]
    fn test_too_few_segments() {
        let err = decompose("https://api.mapbox.com/styles/v1/myuser").unwrap_err();
        assert_eq!(
            reason_of(err),
            "expected at least 7 '/'-separated segments"
        );
    }

    #[test]
    fn test_missing_token() {
        let err = decompose("https://api.mapbox.com/styles/v1/myuser/mystyle.json").unwrap_err();
        assert_eq!(reason_of(err), "missing access_token parameter");
    }

    #[test]
    fn test_style_segment_without_extension() {
        let err = decompose("https://h/styles/v1/u/mystyle?access_token=pk.T").unwrap_err();
        assert_eq!(
            reason_of(err),
            "style segment must look like 'styleId.ext?...'"
        );
    }

    #[test]
    fn test_unknown_scheme() {
        let err = decompose("ftp://h/styles/v1/u/s.json?access_token=pk.T").unwrap_err();
        assert_eq!(reason_of(err), "scheme must be http: or https:");
    }

    #[test]
    fn test_non_numeric_port() {
        let err = decompose("http://h:abc/styles/v1/u/s.json?access_token=pk.T").unwrap_err();
        assert_eq!(reason_of(err), "port must be numeric");
    }

    #[test]
    fn test_derived_values() {
        let url = "https://api.mapbox.com/styles/v1/myuser/mystyle.json?access_token=pk.ABC";
        let style: StyleDescriptor = url.parse().unwrap();
        assert_eq!(style.server_url(), "https://api.mapbox.com");
        assert_eq!(style.style_url(), "mapbox://styles/myuser/mystyle");
        assert_eq!(
            style.url_format(),
            "/styles/v1/myuser/{L}/tiles/{Z}/{X}/{Y}{D}?access_token=pk.ABC"
        );
    }

    #[test]
    fn test_decompose_all_reports_index() {
        let urls = [
            "https://h/styles/v1/u/a.json?access_token=pk.A",
            "https://h/styles/v1/u",
        ];
        let err = decompose_all(&urls).unwrap_err();
        assert!(matches!(
            err,
            MapsourceError::MalformedUrl { index: Some(1), .. }
        ));
    }

    #[test]
    fn test_decompose_all_keeps_order() {
        let urls = vec![
            "https://h/styles/v1/u/a.json?access_token=pk.A".to_string(),
            "https://h/styles/v1/u/b.json?access_token=pk.B".to_string(),
        ];
        let styles = decompose_all(&urls).unwrap();
        let ids: Vec<_> = styles.iter().map(|s| s.style_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
