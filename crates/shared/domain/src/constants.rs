//! Domain-level constants.
//!
//! These constants define the signup rules and the messages shown next to
//! form fields.

// =============================================================================
// Languages
// =============================================================================

/// English interface language code
pub const LANGUAGE_EN: &str = "en";

/// Arabic interface language code
pub const LANGUAGE_AR: &str = "ar";

/// All valid language codes
pub const VALID_LANGUAGES: &[&str] = &[LANGUAGE_EN, LANGUAGE_AR];

/// Check if a language code is valid
pub fn is_valid_language(code: &str) -> bool {
    VALID_LANGUAGES.contains(&code)
}

// =============================================================================
// Subscription
// =============================================================================

/// Monthly billing cycle
pub const PLAN_TYPE_MONTHLY: &str = "Monthly";

/// Yearly billing cycle
pub const PLAN_TYPE_YEARLY: &str = "Yearly";

/// All valid billing cycles
pub const VALID_PLAN_TYPES: &[&str] = &[PLAN_TYPE_MONTHLY, PLAN_TYPE_YEARLY];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Date format of the VAT registration date
pub const VAT_DATE_FORMAT: &str = "%Y-%m-%d";

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format";
pub const MSG_INVALID_LANGUAGE: &str = "Language must be English (en) or Arabic (ar)";
pub const MSG_INVALID_PLAN_TYPE: &str = "Plan type must be Monthly or Yearly";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const MSG_PASSWORD_LOWERCASE: &str =
    "The password must contain at least one lowercase letter.";
pub const MSG_PASSWORD_UPPERCASE: &str =
    "The password must contain at least one uppercase letter.";
pub const MSG_PASSWORD_SYMBOL: &str = "The password must contain at least one symbol.";
pub const MSG_INVALID_DATE: &str = "Date must be in YYYY-MM-DD format";
pub const MSG_CREDENTIALS_REQUIRED: &str = "Email and password are required";

// =============================================================================
// Email verification
// =============================================================================

/// Seconds before a verification code may be sent again
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

pub const MSG_CODE_SENT: &str = "A verification code has been sent to your email.";
pub const MSG_CODE_RESENT: &str = "The verification code has been sent again.";
pub const MSG_EMAIL_VERIFIED: &str = "Email verified successfully!";
pub const MSG_CODE_INCORRECT: &str = "The verification code is incorrect.";
