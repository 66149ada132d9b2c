//! Built-in copy for every field, used whenever the configuration leaves
//! `content` unset.

pub const TITLE: &str = "Please Verify Your Age";
pub const INTRO: &str =
    "For legal reasons, we need you to verify that you are of legal age before we can let you in to our site.";
pub const BUTTON: &str = "Let me in";
pub const DISCLAIMER: &str = "Disclaimer text";

pub const RADIO_YES: &str = "Yes, I am of legal age.";
pub const RADIO_NO: &str = "No, I am not of legal age.";

pub const DOB_DAY_LABEL: &str = "Day:";
pub const DOB_MONTH_LABEL: &str = "Month:";
pub const DOB_YEAR_LABEL: &str = "Year:";
pub const DOB_DAY_PLACEHOLDER: &str = "Day";
pub const DOB_MONTH_PLACEHOLDER: &str = "Month";
pub const DOB_YEAR_PLACEHOLDER: &str = "Year";

pub const CHECKBOX_LABEL: &str = "Please check this";
pub const CHECKBOX_ERROR: &str = "Sorry, you are required to check this checkbox.";

pub const COUNTRY_ERROR: &str = "Sorry, you must select your country.";
pub const LANGUAGE_ERROR: &str = "Sorry, you must select your language.";
