use crate::{AuthPayload, Category, Listing, Paged, User, UserType};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET requests carry their parameters in the query string, never a body.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The payload found in the envelope's `data` field on success.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Path relative to the API base URL.
    fn path(&self) -> Cow<'static, str>;

    /// Query parameters. Pairs with empty values are dropped by the client.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthPayload;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/login")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub user_type: UserType,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthPayload;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/register")
    }
}

/// Fetch the profile of the token holder
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/profile")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_image_url: String,
}

impl From<&User> for UpdateProfileRequest {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            profile_image_url: user.profile_image_url.clone().unwrap_or_default(),
        }
    }
}

impl ApiRequest for UpdateProfileRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/profile")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiRequest for ChangePasswordRequest {
    type Response = serde::de::IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/change-password")
    }
}

/// Ask whether an email address is still free. The backend answers with a bool.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckEmailRequest {
    pub email: String,
}

impl ApiRequest for CheckEmailRequest {
    type Response = bool;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/auth/check-email/{}", urlencoding::encode(&self.email)))
    }
}

// =========================================================
// Listings
// =========================================================

/// Sort order understood by the listings endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Rating,
    Name,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Newest, SortOrder::Rating, SortOrder::Name];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Rating => "rating",
            SortOrder::Name => "name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Rating => "Highest Rated",
            SortOrder::Name => "Name A-Z",
        }
    }

    /// Unknown values fall back to the default order.
    pub fn parse(s: &str) -> Self {
        match s {
            "rating" => SortOrder::Rating,
            "name" => SortOrder::Name,
            _ => SortOrder::Newest,
        }
    }
}

/// `GET /listings` with filters, sort and paging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_rating: Option<u8>,
    pub sort_by: SortOrder,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ApiRequest for ListingQuery {
    type Response = Paged<Listing>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/listings")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key, value));
            }
        };
        push("keyword", self.keyword.clone());
        push("categoryId", self.category_id.map(|id| id.to_string()));
        push("city", self.city.clone());
        push("state", self.state.clone());
        push("minRating", self.min_rating.map(|r| r.to_string()));
        push("sortBy", Some(self.sort_by.as_str().to_string()));
        push("page", self.page.map(|p| p.to_string()));
        push("pageSize", self.page_size.map(|p| p.to_string()));
        params
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetListingRequest {
    pub id: i64,
}

impl ApiRequest for GetListingRequest {
    type Response = Listing;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/listings/{}", self.id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub price_range: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub website: String,
    pub business_hours: String,
    pub years_experience: Option<u32>,
}

impl ApiRequest for CreateListingRequest {
    type Response = Listing;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/listings")
    }
}

/// Listings owned by the token holder
#[derive(Debug, Serialize, Deserialize)]
pub struct MyListingsRequest;

impl ApiRequest for MyListingsRequest {
    type Response = Vec<Listing>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/listings/my-listings")
    }
}

// =========================================================
// Categories
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = Vec<Category>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/categories")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetCategoryRequest {
    pub id: i64,
}

impl ApiRequest for GetCategoryRequest {
    type Response = Category;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/categories/{}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_query_skips_unset_filters() {
        let query = ListingQuery {
            keyword: Some("plumber".into()),
            category_id: Some(3),
            page_size: Some(20),
            ..Default::default()
        };
        assert_eq!(
            query.query(),
            vec![
                ("keyword", "plumber".to_string()),
                ("categoryId", "3".to_string()),
                ("sortBy", "newest".to_string()),
                ("pageSize", "20".to_string()),
            ]
        );
    }

    #[test]
    fn dynamic_paths() {
        assert_eq!(GetListingRequest { id: 42 }.path(), "/listings/42");
        assert_eq!(GetCategoryRequest { id: 5 }.path(), "/categories/5");
        assert_eq!(
            CheckEmailRequest { email: "a+b@c.io".into() }.path(),
            "/auth/check-email/a%2Bb%40c.io"
        );
    }

    #[test]
    fn sort_order_parse_falls_back() {
        assert_eq!(SortOrder::parse("rating"), SortOrder::Rating);
        assert_eq!(SortOrder::parse("bogus"), SortOrder::Newest);
    }

    #[test]
    fn register_request_omits_missing_phone() {
        let req = RegisterRequest {
            email: "x@y.z".into(),
            password: "secret1".into(),
            first_name: "X".into(),
            last_name: "Y".into(),
            phone: None,
            user_type: UserType::Provider,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["userType"], 1);
        assert_eq!(json["firstName"], "X");
    }
}
