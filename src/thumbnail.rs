use url::{form_urlencoded, Url};

const MGH_MARKER: &str = "learn.mghpathology.org/index.php/";
const LEEDS_MARKER: &str = "virtualpathology.leeds.ac.uk/slides/library/view.php?path=";
const LEEDS_IMAGE_HOST: &str = "https://images.virtualpathology.leeds.ac.uk";

/// Slide hosting providers whose viewer links can be turned into thumbnail URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideHost {
    Mgh,
    Leeds,
}

impl SlideHost {
    /// Match a viewer URL against the known providers. MGH is checked before Leeds.
    pub fn detect(url: &str) -> Option<Self> {
        if url.contains(MGH_MARKER) {
            Some(Self::Mgh)
        } else if url.contains(LEEDS_MARKER) {
            Some(Self::Leeds)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlideHost::Mgh => "mgh",
            SlideHost::Leeds => "leeds",
        }
    }

    /// Build the thumbnail URL for a viewer link hosted by this provider.
    /// Returns `None` when the link lacks what the provider needs (the Leeds `path` parameter).
    pub fn thumbnail_for(self, url: &str) -> Option<String> {
        match self {
            SlideHost::Mgh => Some(format!(
                "{}/thumbnail.jpg",
                url.replacen("index.php/", "pv-http/openslide/", 1)
            )),
            SlideHost::Leeds => {
                let slide_path = query_param(url, "path")?;
                Some(format!("{LEEDS_IMAGE_HOST}{slide_path}?-1"))
            }
        }
    }
}

/// Detect the provider and derive its thumbnail in one step.
pub fn derive_thumbnail(url: &str) -> Option<(SlideHost, String)> {
    let host = SlideHost::detect(url)?;
    host.thumbnail_for(url).map(|thumb| (host, thumb))
}

// First non-empty, percent-decoded value of `key`. Links without a scheme
// still get their query read by splitting on '?'.
fn query_param(url: &str, key: &str) -> Option<String> {
    let query = match Url::parse(url) {
        Ok(parsed) => parsed.query().map(str::to_owned),
        Err(_) => url
            .split_once('?')
            .map(|(_, rest)| rest.split('#').next().unwrap_or_default().to_owned()),
    }?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}
