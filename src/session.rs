//! Session credential state shared by concurrent callers.
//!
//! The store holds zero or one server-issued cookie set. Whether a session
//! is active is always recomputed from the held credential; there is no
//! separate flag to drift out of sync. The client wraps this state in a
//! `tokio::sync::Mutex`, which doubles as the bootstrap serialization lock.

use reqwest::header::{HeaderMap, SET_COOKIE};

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    cookies: Option<String>,
}

impl SessionState {
    /// `Cookie` header value for the active session, if any.
    pub fn cookie_header(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.cookies.is_some()
    }

    /// Capture session cookies issued by the server.
    ///
    /// Only the `name=value` pair of each `Set-Cookie` header is kept;
    /// attributes like `Path` or `Max-Age` are for browsers, the client
    /// replays the pairs verbatim until the server rejects them.
    pub fn store_cookies(&mut self, headers: &HeaderMap) {
        let pairs: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect();
        if !pairs.is_empty() {
            self.cookies = Some(pairs.join("; "));
        }
    }

    /// Drop the held credential. The next caller observing the store will
    /// re-authenticate.
    pub fn invalidate(&mut self) {
        self.cookies = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn fresh_state_has_no_session() {
        let state = SessionState::default();
        assert!(!state.is_active());
        assert_eq!(state.cookie_header(), None);
    }

    #[test]
    fn stores_cookie_pairs_without_attributes() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("session=abc123; Path=/; HttpOnly"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("node=a1; Max-Age=3600"));

        let mut state = SessionState::default();
        state.store_cookies(&headers);

        assert!(state.is_active());
        assert_eq!(state.cookie_header(), Some("session=abc123; node=a1"));
    }

    #[test]
    fn response_without_cookies_leaves_existing_session_intact() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("session=abc123"));

        let mut state = SessionState::default();
        state.store_cookies(&headers);
        state.store_cookies(&HeaderMap::new());

        assert!(state.is_active());
    }

    #[test]
    fn invalidate_clears_the_credential() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("session=abc123"));

        let mut state = SessionState::default();
        state.store_cookies(&headers);
        state.invalidate();

        assert!(!state.is_active());
        assert_eq!(state.cookie_header(), None);
    }
}
