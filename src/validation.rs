//! Client-side form validation
//!
//! Every check here runs before a request is built. A form that fails
//! validation never reaches the network.

use builder360_shared::{
    ChangePasswordRequest, CreateListingRequest, LoginRequest, RegisterRequest,
    UpdateProfileRequest, User, UserType,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_YEARS_EXPERIENCE: u32 = 50;

// =========================================================
// Field errors
// =========================================================

/// Error messages keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drop the error of a field the user just edited
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =========================================================
// Login
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "email", &self.email, "Email is required");
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        errors.into_result(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// =========================================================
// Registration
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub user_type: UserType,
}

impl RegistrationForm {
    /// On success the confirmation field is dropped from the request.
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");

        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Email is invalid");
        }

        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert("password", "Password must be at least 6 characters");
        }

        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        if !self.phone.is_empty() && !is_valid_phone(&self.phone) {
            errors.insert("phone", "Phone number is invalid");
        }

        errors.into_result(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: optional(&self.phone),
            user_type: self.user_type,
        })
    }
}

// =========================================================
// Profile
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_image_url: String,
}

impl From<&User> for ProfileForm {
    fn from(user: &User) -> Self {
        let req = UpdateProfileRequest::from(user);
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            profile_image_url: req.profile_image_url,
        }
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<UpdateProfileRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");
        if !self.phone.is_empty() && !is_valid_phone(&self.phone) {
            errors.insert("phone", "Phone number is invalid");
        }
        errors.into_result(UpdateProfileRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            profile_image_url: self.profile_image_url.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.current_password.is_empty() {
            errors.insert("currentPassword", "Current password is required");
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert("newPassword", "Password must be at least 6 characters");
        }
        if self.new_password != self.confirm_password {
            errors.insert("confirmPassword", "New passwords do not match");
        }
        errors.into_result(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

// =========================================================
// Listing creation wizard
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ListingStep {
    #[default]
    BasicInfo,
    Location,
    Contact,
}

impl ListingStep {
    pub const ALL: [ListingStep; 3] = [
        ListingStep::BasicInfo,
        ListingStep::Location,
        ListingStep::Contact,
    ];

    /// 1-based position shown in the progress bar
    pub fn number(&self) -> u8 {
        match self {
            ListingStep::BasicInfo => 1,
            ListingStep::Location => 2,
            ListingStep::Contact => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ListingStep::BasicInfo => "Basic Info",
            ListingStep::Location => "Location",
            ListingStep::Contact => "Contact",
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            ListingStep::BasicInfo => Some(ListingStep::Location),
            ListingStep::Location => Some(ListingStep::Contact),
            ListingStep::Contact => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            ListingStep::BasicInfo => None,
            ListingStep::Location => Some(ListingStep::BasicInfo),
            ListingStep::Contact => Some(ListingStep::Location),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

/// Raw form fields of the listing wizard, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub category_id: String,
    pub title: String,
    pub description: String,
    pub price_range: String,
    pub years_experience: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub website: String,
    pub business_hours: String,
}

impl ListingDraft {
    /// Contact details default to the provider's own
    pub fn for_user(user: Option<&User>) -> Self {
        Self {
            contact_phone: user.and_then(|u| u.phone.clone()).unwrap_or_default(),
            contact_email: user.map(|u| u.email.clone()).unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn validate_step(&self, step: ListingStep) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match step {
            ListingStep::BasicInfo => {
                if self.category_id.trim().parse::<i64>().is_err() {
                    errors.insert("categoryId", "Category is required");
                }
                require(&mut errors, "title", &self.title, "Title is required");
                require(
                    &mut errors,
                    "description",
                    &self.description,
                    "Description is required",
                );
            }
            ListingStep::Location => {
                require(&mut errors, "address", &self.address, "Address is required");
                require(&mut errors, "city", &self.city, "City is required");
                require(&mut errors, "state", &self.state, "State is required");
            }
            // Contact details are free-form
            ListingStep::Contact => {
                if let Err(msg) = self.parsed_years() {
                    errors.insert("yearsExperience", msg);
                }
            }
        }
        errors
    }

    /// Errors of every step, in one map
    pub fn validate_all(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for step in ListingStep::ALL {
            errors.merge(self.validate_step(step));
        }
        errors
    }

    fn parsed_years(&self) -> Result<Option<u32>, &'static str> {
        let raw = self.years_experience.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<u32>() {
            Ok(years) if years <= MAX_YEARS_EXPERIENCE => Ok(Some(years)),
            _ => Err("Years of experience must be a whole number between 0 and 50"),
        }
    }

    /// Validate everything and convert to the wire request.
    pub fn to_request(&self) -> Result<CreateListingRequest, FieldErrors> {
        let errors = self.validate_all();
        let (Ok(category_id), Ok(years_experience)) =
            (self.category_id.trim().parse::<i64>(), self.parsed_years())
        else {
            return Err(errors);
        };
        errors.into_result(CreateListingRequest {
            category_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price_range: self.price_range.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
            website: self.website.trim().to_string(),
            business_hours: self.business_hours.trim().to_string(),
            years_experience,
        })
    }
}

/// Step navigation over a [`ListingDraft`].
///
/// Advancing is gated by the current step's validation; going back never is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingWizard {
    pub step: ListingStep,
    pub draft: ListingDraft,
    pub errors: FieldErrors,
}

impl ListingWizard {
    pub fn new(draft: ListingDraft) -> Self {
        Self {
            step: ListingStep::BasicInfo,
            draft,
            errors: FieldErrors::new(),
        }
    }

    /// Move forward if the current step is valid. Returns whether it moved.
    pub fn advance(&mut self) -> bool {
        self.errors = self.draft.validate_step(self.step);
        if !self.errors.is_empty() {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Apply an edit and clear that field's error.
    pub fn edit(&mut self, field: &'static str, f: impl FnOnce(&mut ListingDraft)) {
        f(&mut self.draft);
        self.errors.clear_field(field);
    }

    /// Validate every step. On failure the wizard jumps back to the first
    /// step holding an error.
    pub fn submit(&mut self) -> Result<CreateListingRequest, FieldErrors> {
        match self.draft.to_request() {
            Ok(req) => {
                self.errors = FieldErrors::new();
                Ok(req)
            }
            Err(errors) => {
                if let Some(step) = ListingStep::ALL
                    .into_iter()
                    .find(|s| !self.draft.validate_step(*s).is_empty())
                {
                    self.step = step;
                }
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> ListingDraft {
        ListingDraft {
            category_id: "3".into(),
            title: "Kitchen remodels".into(),
            description: "Cabinets, counters, tiling".into(),
            years_experience: "12".into(),
            address: "1 Main St".into(),
            city: "Austin".into(),
            state: "TX".into(),
            ..Default::default()
        }
    }

    // ---------------------------------------------------------
    // Registration
    // ---------------------------------------------------------

    fn registration() -> RegistrationForm {
        RegistrationForm {
            email: "ana@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            first_name: "Ana".into(),
            last_name: "Diaz".into(),
            phone: "+1 (555) 010-0200".into(),
            user_type: UserType::Provider,
        }
    }

    #[test]
    fn registration_mismatched_passwords_blocked() {
        let form = RegistrationForm {
            confirm_password: "secret2".into(),
            ..registration()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn registration_field_checks() {
        let form = RegistrationForm {
            email: "not-an-email".into(),
            password: "123".into(),
            confirm_password: "123".into(),
            first_name: " ".into(),
            phone: "call me".into(),
            ..registration()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("phone"), Some("Phone number is invalid"));
        assert!(!errors.contains("lastName"));
    }

    #[test]
    fn registration_builds_request_without_confirmation() {
        let req = RegistrationForm {
            phone: String::new(),
            ..registration()
        }
        .validate()
        .unwrap();
        assert_eq!(req.email, "ana@example.com");
        assert_eq!(req.phone, None);
        assert_eq!(req.user_type, UserType::Provider);
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }

    #[test]
    fn password_change_must_match() {
        let form = PasswordChangeForm {
            current_password: "old-secret".into(),
            new_password: "new-secret".into(),
            confirm_password: "new-secrets".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("New passwords do not match"));
    }

    #[test]
    fn profile_form_starts_from_user() {
        let user: User = User {
            id: 1,
            email: "a@b.co".into(),
            first_name: "Ana".into(),
            last_name: "Diaz".into(),
            phone: None,
            profile_image_url: Some("https://img/a.png".into()),
            user_type: UserType::Customer,
            created_at: String::new(),
        };
        let form = ProfileForm::from(&user);
        assert_eq!(form.phone, "");
        let req = form.validate().unwrap();
        assert_eq!(req.profile_image_url, "https://img/a.png");
    }

    // ---------------------------------------------------------
    // Listing wizard
    // ---------------------------------------------------------

    #[test]
    fn step_one_blocks_without_required_fields() {
        let mut wizard = ListingWizard::new(ListingDraft::default());

        assert!(!wizard.advance());

        assert_eq!(wizard.step, ListingStep::BasicInfo);
        assert_eq!(wizard.errors.get("categoryId"), Some("Category is required"));
        assert_eq!(wizard.errors.get("title"), Some("Title is required"));
        assert_eq!(wizard.errors.get("description"), Some("Description is required"));
        assert_eq!(wizard.errors.len(), 3);
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut wizard = ListingWizard::new(ListingDraft::default());
        wizard.advance();

        wizard.edit("title", |d| d.title = "Deck building".into());

        assert!(!wizard.errors.contains("title"));
        assert!(wizard.errors.contains("description"));
    }

    #[test]
    fn walks_all_steps_and_back() {
        let mut wizard = ListingWizard::new(filled_draft());
        assert!(wizard.advance());
        assert_eq!(wizard.step, ListingStep::Location);
        assert!(wizard.advance());
        assert_eq!(wizard.step, ListingStep::Contact);
        assert!(wizard.step.is_last());
        assert!(!wizard.advance());
        assert!(wizard.back());
        assert!(wizard.back());
        assert!(!wizard.back());
        assert_eq!(wizard.step, ListingStep::BasicInfo);
    }

    #[test]
    fn location_step_requires_address_city_state() {
        let mut wizard = ListingWizard::new(ListingDraft {
            address: String::new(),
            city: String::new(),
            ..filled_draft()
        });
        assert!(wizard.advance());
        assert!(!wizard.advance());
        assert_eq!(wizard.step, ListingStep::Location);
        assert!(wizard.errors.contains("address"));
        assert!(wizard.errors.contains("city"));
        assert!(!wizard.errors.contains("state"));
    }

    #[test]
    fn submit_requires_every_step() {
        let mut wizard = ListingWizard::new(ListingDraft {
            state: String::new(),
            ..filled_draft()
        });
        wizard.step = ListingStep::Contact;

        let errors = wizard.submit().unwrap_err();

        assert!(errors.contains("state"));
        assert_eq!(wizard.step, ListingStep::Location);
    }

    #[test]
    fn submit_converts_numbers() {
        let mut wizard = ListingWizard::new(ListingDraft {
            contact_email: "pro@example.com".into(),
            ..filled_draft()
        });

        let req = wizard.submit().unwrap();

        assert_eq!(req.category_id, 3);
        assert_eq!(req.years_experience, Some(12));
        assert_eq!(req.contact_email, "pro@example.com");
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn contact_details_are_free_form() {
        let mut wizard = ListingWizard::new(ListingDraft {
            contact_phone: "555.010.0200".into(),
            contact_email: "office at example".into(),
            ..filled_draft()
        });

        let req = wizard.submit().unwrap();

        assert_eq!(req.contact_phone, "555.010.0200");
        assert_eq!(req.contact_email, "office at example");
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn years_experience_is_bounded() {
        let draft = ListingDraft {
            years_experience: "51".into(),
            ..filled_draft()
        };
        assert!(draft.validate_step(ListingStep::Contact).contains("yearsExperience"));

        let draft = ListingDraft {
            years_experience: String::new(),
            ..filled_draft()
        };
        assert_eq!(draft.to_request().unwrap().years_experience, None);
    }

    #[test]
    fn draft_defaults_contact_from_user() {
        let user = User {
            id: 2,
            email: "pro@example.com".into(),
            first_name: "P".into(),
            last_name: "R".into(),
            phone: Some("555-0100".into()),
            profile_image_url: None,
            user_type: UserType::Provider,
            created_at: String::new(),
        };
        let draft = ListingDraft::for_user(Some(&user));
        assert_eq!(draft.contact_email, "pro@example.com");
        assert_eq!(draft.contact_phone, "555-0100");
        assert_eq!(ListingDraft::for_user(None).contact_email, "");
    }
}
