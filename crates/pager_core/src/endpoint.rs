use url::Url;

/// The listing URL the controller pages through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Parse an absolute listing URL. Any `#fragment` is dropped.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(raw.trim())?;
        url.set_fragment(None);
        Ok(Self { url })
    }

    /// Resolve `path` against `base`, e.g. `http://host` + `/feedback`.
    pub fn from_base(base: &str, path: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base.trim())?;
        let mut url = base.join(path.trim())?;
        url.set_fragment(None);
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// URL for one page: existing `page` pairs are replaced, other pairs kept in order.
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("page", &page.to_string());
        }
        url.to_string()
    }
}
