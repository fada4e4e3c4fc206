use url::Url;

/// Optional filters for the storefront product listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub is_featured: Option<bool>,
}

impl ProductQuery {
    pub fn featured() -> Self {
        Self {
            is_featured: Some(true),
            ..Default::default()
        }
    }

    pub fn in_category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: Some(category_id.into()),
            ..Default::default()
        }
    }

    /// `{api_url}/products` with only the filters that are set, keys sorted.
    pub fn to_url(&self, api_url: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/products", api_url.trim_end_matches('/')))?;

        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(category_id) = &self.category_id {
            pairs.push(("categoryId", category_id.clone()));
        }
        if let Some(color_id) = &self.color_id {
            pairs.push(("colorId", color_id.clone()));
        }
        if let Some(is_featured) = self.is_featured {
            pairs.push(("isFeatured", is_featured.to_string()));
        }
        if let Some(size_id) = &self.size_id {
            pairs.push(("sizeId", size_id.clone()));
        }

        // An empty pair list would still leave a bare '?'
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: &str = "http://localhost:3000/api/store-1";

    #[test]
    fn no_filters_no_query_string() {
        let url = ProductQuery::default().to_url(API).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/store-1/products");
    }

    #[test]
    fn keys_are_sorted_and_absent_ones_omitted() {
        let query = ProductQuery {
            size_id: Some("s1".into()),
            category_id: Some("c1".into()),
            is_featured: Some(true),
            color_id: None,
        };
        let url = query.to_url(API).unwrap();
        assert_eq!(url.query(), Some("categoryId=c1&isFeatured=true&sizeId=s1"));
    }

    #[test]
    fn false_is_still_sent() {
        let query = ProductQuery {
            is_featured: Some(false),
            ..Default::default()
        };
        assert_eq!(query.to_url(API).unwrap().query(), Some("isFeatured=false"));
    }

    #[test]
    fn values_are_encoded_and_trailing_slash_tolerated() {
        let url = ProductQuery::in_category("a&b")
            .to_url("http://localhost:3000/api/store-1/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/store-1/products?categoryId=a%26b"
        );
    }

    #[test]
    fn bad_base_is_an_error() {
        assert!(ProductQuery::featured().to_url("not a url").is_err());
    }
}
