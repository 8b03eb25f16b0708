//! Gallery data model: collections of screenshots, built once from the
//! config file and immutable afterward.

/// A collection of screenshots rendered onto one gallery page.
#[derive(Debug, Clone)]
pub struct Collection {
    pub slug: String,
    pub name_single: String,
    pub name_plural: String,
    /// Directory under `img/` holding this collection's source images.
    pub base_dir: String,
}

impl Collection {
    /// Singular name for a count of one, plural otherwise.
    pub fn count_label(&self, count: usize) -> &str {
        if count == 1 {
            &self.name_single
        } else {
            &self.name_plural
        }
    }
}

/// A single screenshot entry. Always has a local image file; the remote URL,
/// when present, is an override used only when URL mode is requested.
#[derive(Debug, Clone)]
pub struct Shot {
    pub name: String,
    /// Slug of the collection this shot belongs to.
    pub collection: String,
    /// Image filename under the collection's `base_dir`.
    pub filename: String,
    /// Extra caption line, e.g. "(default skin)".
    pub label: Option<String>,
    pub url: Option<HostUrl>,
}

impl Shot {
    /// In-page anchor id derived from the shot name.
    pub fn anchor(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect()
    }
}

/// A remote image URL, classified by host so we can normalize it and, where
/// the host supports it, request server-side resizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostUrl {
    /// Google Photos CDN link; everything after `=` is sizing parameters.
    Google { base: String },
    Dropbox { url: String },
    Other { url: String },
}

impl HostUrl {
    pub fn classify(url: &str) -> HostUrl {
        if url.contains("googleusercontent.com") {
            let base = url.split('=').next().unwrap_or(url).to_string();
            HostUrl::Google { base }
        } else if url.contains("dropbox.com") {
            // Strip share-page parameters and ask for the raw file instead
            let stripped = url.split('?').next().unwrap_or(url);
            HostUrl::Dropbox {
                url: format!("{}?raw=1", stripped),
            }
        } else {
            HostUrl::Other {
                url: url.to_string(),
            }
        }
    }

    /// URL with sizing parameters attached, if the host supports them.
    pub fn sized(&self, width: u32, height: u32) -> String {
        match self {
            HostUrl::Google { base } => {
                format!("{}=w{}-h{}-no?authuser=0", base, width, height)
            }
            HostUrl::Dropbox { url } | HostUrl::Other { url } => url.clone(),
        }
    }
}
