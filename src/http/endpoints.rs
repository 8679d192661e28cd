use url::Url;

use crate::error::HttpError;

const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";

/// Resolved URLs for every call the harness makes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    submit: Url,
    status_prefix: Url,
    login: Url,
    register: Url,
}

impl Endpoints {
    /// Resolves the configured paths against the API base URL.
    ///
    /// The base is treated as a directory, so `http://host/api` and
    /// `http://host/api/` behave the same.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is malformed or a path cannot be
    /// joined onto it.
    pub fn new(api_url: &str, submit_path: &str, status_path: &str) -> Result<Self, HttpError> {
        let mut base = Url::parse(api_url.trim()).map_err(|err| HttpError::InvalidApiUrl {
            url: api_url.to_owned(),
            source: err,
        })?;
        if base.cannot_be_a_base() {
            return Err(HttpError::ApiUrlCannotBeBase {
                url: api_url.to_owned(),
            });
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            submit: join(&base, submit_path)?,
            status_prefix: join(&base, status_path)?,
            login: join(&base, LOGIN_PATH)?,
            register: join(&base, REGISTER_PATH)?,
        })
    }

    #[must_use]
    pub const fn submit_url(&self) -> &Url {
        &self.submit
    }

    #[must_use]
    pub const fn login_url(&self) -> &Url {
        &self.login
    }

    #[must_use]
    pub const fn register_url(&self) -> &Url {
        &self.register
    }

    /// Status URL for one submission; the id is percent-encoded as a single
    /// path segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the status prefix cannot carry path segments.
    pub fn status_url(&self, submission_id: &str) -> Result<Url, HttpError> {
        let mut url = self.status_prefix.clone();
        url.path_segments_mut()
            .map_err(|()| HttpError::ApiUrlCannotBeBase {
                url: self.status_prefix.to_string(),
            })?
            .pop_if_empty()
            .push(submission_id);
        Ok(url)
    }
}

fn join(base: &Url, path: &str) -> Result<Url, HttpError> {
    base.join(path.trim().trim_start_matches('/'))
        .map_err(|err| HttpError::JoinUrlFailed {
            base: base.to_string(),
            path: path.to_owned(),
            source: err,
        })
}
