use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use protocol::*;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Length of the description excerpt shown on listing cards
pub const EXCERPT_LEN: usize = 100;

// =========================================================
// Domain Models
// =========================================================

/// Account role. Serialized as the backend's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserType {
    #[default]
    Customer,
    Provider,
}

impl UserType {
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Customer => "Customer",
            UserType::Provider => "Service Provider",
        }
    }
}

impl TryFrom<u8> for UserType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(UserType::Customer),
            1 => Ok(UserType::Provider),
            other => Err(format!("unknown user type code: {}", other)),
        }
    }
}

impl From<UserType> for u8 {
    fn from(kind: UserType) -> Self {
        match kind {
            UserType::Customer => 0,
            UserType::Provider => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "userId", default)]
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    pub fn is_provider(&self) -> bool {
        self.user_type == UserType::Provider
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// First letter of the first and last name, used by the avatar fallback
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn member_since(&self) -> Option<i32> {
        date::year_of(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "categoryId", alias = "id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingImage {
    #[serde(default)]
    pub image_id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "listingId", alias = "id")]
    pub id: i64,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Listing {
    /// "New" until the listing has been rated, otherwise one decimal place
    pub fn rating_label(&self) -> String {
        if self.average_rating > 0.0 {
            format!("{:.1}", self.average_rating)
        } else {
            "New".to_string()
        }
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|img| img.image_url.as_str())
    }

    /// Truncated description for cards, cut on a character boundary
    pub fn excerpt(&self) -> String {
        if self.description.chars().count() <= EXCERPT_LEN {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(EXCERPT_LEN).collect();
        format!("{}...", cut)
    }

    /// "City, State" with missing parts skipped
    pub fn location(&self) -> String {
        [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =========================================================
// Response Envelopes
// =========================================================

/// Uniform success/failure wrapper around every backend payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Payload returned by login and registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}
