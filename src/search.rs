//! Listing search state
//!
//! Filter values of the listings view. `keyword` and `categoryId` are
//! mirrored in the address bar so searches can be linked and reloaded.

use builder360_shared::{ListingQuery, SortOrder};

const PARAM_KEYWORD: &str = "keyword";
const PARAM_CATEGORY: &str = "categoryId";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    pub keyword: String,
    pub category_id: Option<i64>,
    pub city: String,
    pub state: String,
    pub min_rating: Option<u8>,
    pub sort_by: SortOrder,
}

impl ListingFilters {
    /// Read `keyword` and `categoryId` from a query string, with or without
    /// the leading `?`. Unknown keys and unparsable ids are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut filters = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PARAM_KEYWORD => filters.keyword = value.trim().to_string(),
                PARAM_CATEGORY => filters.category_id = value.trim().parse().ok(),
                _ => {}
            }
        }
        filters
    }

    /// Query string for the address bar, without the leading `?`.
    /// Empty values are omitted.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            serializer.append_pair(PARAM_KEYWORD, keyword);
        }
        if let Some(id) = self.category_id {
            serializer.append_pair(PARAM_CATEGORY, &id.to_string());
        }
        serializer.finish()
    }

    /// Listings path carrying the synchronised parameters
    pub fn to_location(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            "/listings".to_string()
        } else {
            format!("/listings?{}", query)
        }
    }

    pub fn to_listing_query(&self, page_size: u32) -> ListingQuery {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        ListingQuery {
            keyword: non_empty(&self.keyword),
            category_id: self.category_id,
            city: non_empty(&self.city),
            state: non_empty(&self.state),
            min_rating: self.min_rating.filter(|r| *r > 0),
            sort_by: self.sort_by,
            page: Some(1),
            page_size: Some(page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_synchronised_params() {
        let filters = ListingFilters::from_query_string("?keyword=tile+%26+grout&categoryId=4&city=Austin");
        assert_eq!(filters.keyword, "tile & grout");
        assert_eq!(filters.category_id, Some(4));
        // Only keyword and categoryId live in the address bar
        assert_eq!(filters.city, "");
    }

    #[test]
    fn query_string_round_trip() {
        let filters = ListingFilters {
            keyword: "deck builder".into(),
            category_id: Some(12),
            ..Default::default()
        };
        let qs = filters.to_query_string();
        assert_eq!(qs, "keyword=deck+builder&categoryId=12");
        assert_eq!(ListingFilters::from_query_string(&qs), filters);
    }

    #[test]
    fn empty_values_are_omitted() {
        let filters = ListingFilters {
            keyword: "   ".into(),
            city: "Austin".into(),
            ..Default::default()
        };
        assert_eq!(filters.to_query_string(), "");
        assert_eq!(filters.to_location(), "/listings");
        assert_eq!(ListingFilters::from_query_string("categoryId=&keyword="), ListingFilters::default());
    }

    #[test]
    fn builds_listing_query() {
        let filters = ListingFilters {
            keyword: " roof ".into(),
            state: "TX".into(),
            min_rating: Some(4),
            sort_by: SortOrder::Rating,
            ..Default::default()
        };
        let query = filters.to_listing_query(20);
        assert_eq!(query.keyword.as_deref(), Some("roof"));
        assert_eq!(query.city, None);
        assert_eq!(query.state.as_deref(), Some("TX"));
        assert_eq!(query.min_rating, Some(4));
        assert_eq!(query.page_size, Some(20));
    }

    #[test]
    fn clear_resets_everything() {
        let mut filters = ListingFilters::from_query_string("keyword=x&categoryId=1");
        filters.sort_by = SortOrder::Name;
        filters.clear();
        assert!(filters.is_empty());
    }
}
