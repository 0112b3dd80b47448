use url::Url;

/// Decides which in-page links lead to another bulletin in the series
#[derive(Debug, Clone)]
pub struct LinkFilter {
    required_fragments: Vec<String>,
}

impl LinkFilter {
    /// Create a filter that accepts URLs containing every fragment
    pub fn new(required_fragments: Vec<String>) -> Self {
        Self { required_fragments }
    }

    /// Determine if a resolved URL should be followed
    pub fn should_follow(&self, url: &Url) -> bool {
        let url_str = url.as_str();
        self.required_fragments
            .iter()
            .all(|fragment| url_str.contains(fragment.as_str()))
    }

    /// Resolve hrefs against `base`, keep accepted ones, drop duplicates in first-seen order
    pub fn select_links<'a, I>(&self, base: &Url, hrefs: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = std::collections::HashSet::new();
        let mut links = Vec::new();

        for href in hrefs {
            let resolved = match base.join(href) {
                Ok(resolved) => resolved,
                Err(e) => {
                    ::log::trace!("Skipping unresolvable href {:?}: {}", href, e);
                    continue;
                }
            };

            if !self.should_follow(&resolved) {
                continue;
            }

            let link = resolved.to_string();
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }

        links
    }
}
