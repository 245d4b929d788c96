//! Mapping between object keys and their public URLs.

use url::Url;

/// Public URL scheme of a bucket: `<base>/<key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrls {
    base: String,
    fallback: Option<String>,
}

impl PublicUrls {
    /// Serves objects from `base`; trailing slashes are dropped.
    pub fn new(base: impl AsRef<str>) -> Self {
        Self {
            base: strip_trailing_slash(base.as_ref().trim()).to_string(),
            fallback: None,
        }
    }

    /// Also recognise URLs under `base` when mapping URLs back to keys.
    pub fn with_fallback(mut self, base: impl AsRef<str>) -> Self {
        self.fallback = Some(strip_trailing_slash(base.as_ref().trim()).to_string());
        self
    }

    /// URLs for an R2 bucket: the configured public base when set, otherwise
    /// the bucket's `r2.dev` domain. The `r2.dev` domain is always accepted
    /// when mapping back.
    pub fn for_r2_bucket(bucket: &str, configured_base: Option<&str>) -> Self {
        let domain = bucket_domain(bucket);
        let base = configured_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .unwrap_or(domain.as_str());
        Self::new(base).with_fallback(&domain)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Public URL for `key`.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base, key.trim_start_matches('/'))
    }

    /// Object key behind `url`, when `url` lives under one of this bucket's
    /// public bases.
    ///
    /// URLs on any other origin map to no key, as does an empty remainder.
    pub fn key_for(&self, url: &str) -> Option<String> {
        let url = Url::parse(url.trim()).ok()?;
        std::iter::once(self.base.as_str())
            .chain(self.fallback.as_deref())
            .find_map(|base| key_under(base, &url))
    }
}

fn key_under(base: &str, url: &Url) -> Option<String> {
    let base = Url::parse(base).ok()?;
    if base.origin() != url.origin() {
        return None;
    }

    let rest = url.path().strip_prefix(base.path().trim_end_matches('/'))?;
    if !rest.starts_with('/') {
        return None;
    }

    let key = rest.trim_start_matches('/');
    (!key.is_empty()).then(|| key.to_string())
}

/// `https://<bucket>.r2.dev`
pub fn bucket_domain(bucket: &str) -> String {
    format!("https://{bucket}.r2.dev")
}

pub fn strip_trailing_slash(value: &str) -> &str {
    value.trim_end_matches('/')
}
