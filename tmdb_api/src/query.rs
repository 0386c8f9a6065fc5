//! Query parameters shared by the listing endpoints.

use url::Url;

/// Pagination and locale parameters for listing requests.
///
/// Every TMDB listing endpoint takes the same `page` and `language` pair; the
/// client appends them to the request URL via [`ListQuery::add_to_url`].
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// BCP 47 language tag sent with every request. Defaults to `en-US`.
    pub language: String,
}

impl Default for ListQuery {
    fn default() -> ListQuery {
        ListQuery {
            page: 1,
            language: "en-US".to_string(),
        }
    }
}

impl ListQuery {
    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Appends the pagination and locale parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("language", &self.language)
            .append_pair("page", &self.page.to_string());
        url
    }
}
