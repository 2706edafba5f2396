//! Field keys produced by the intake form.

// Personal
pub const FULL_NAME: &str = "full_name";
pub const DOB: &str = "dob";
pub const SSN: &str = "ssn";
pub const CITIZENSHIP: &str = "citizenship";
pub const MARITAL_STATUS: &str = "marital_status";

// Contact
pub const RESIDENTIAL_ADDRESS: &str = "residential_address";
pub const MAILING_ADDRESS_DIFFERENT: &str = "mailing_address_different";
pub const MAILING_ADDRESS: &str = "mailing_address";
pub const EMAIL: &str = "email";
pub const HOME_PHONE: &str = "home_phone";
pub const WORK_PHONE: &str = "work_phone";
pub const MOBILE_PHONE: &str = "mobile_phone";

// Employment
pub const EMPLOYMENT_STATUS: &str = "employment_status";
pub const EMPLOYER_NAME: &str = "employer_name";
pub const OCCUPATION: &str = "occupation";
pub const YEARS_EMPLOYED: &str = "years_employed";
pub const ANNUAL_INCOME: &str = "annual_income";
pub const EMPLOYER_ADDRESS: &str = "employer_address";

// Retirement
pub const FORMER_EMPLOYER: &str = "former_employer";
pub const INCOME_SOURCE: &str = "income_source";

// Financial
pub const EDUCATION_STATUS: &str = "education_status";
pub const TAX_BRACKET: &str = "tax_bracket";
pub const RISK_TOLERANCE: &str = "risk_tolerance";
pub const NET_WORTH: &str = "net_worth";
pub const LIQUID_NET_WORTH: &str = "liquid_net_worth";
pub const ASSETS_HELD_AWAY: &str = "assets_held_away";

// Spouse
pub const SPOUSE_APPLICABLE: &str = "spouse_applicable";
pub const SPOUSE_FULL_NAME: &str = "spouse_full_name";
pub const SPOUSE_DOB: &str = "spouse_dob";
pub const SPOUSE_SSN: &str = "spouse_ssn";
pub const SPOUSE_EMPLOYMENT_STATUS: &str = "spouse_employment_status";
pub const SPOUSE_EMPLOYER_NAME: &str = "spouse_employer_name";
pub const SPOUSE_OCCUPATION: &str = "spouse_occupation";

// Repeating groups
pub const DEPENDENTS: &str = "dependents";
pub const BENEFICIARIES: &str = "beneficiaries";

// Nested record fields
pub const RECORD_NAME: &str = "name";
pub const RECORD_DOB: &str = "dob";
pub const RECORD_RELATIONSHIP: &str = "relationship";
pub const RECORD_PERCENTAGE: &str = "percentage";

// Asset breakdown
pub const INCLUDE_BREAKDOWN: &str = "include_breakdown";

// Outside broker
pub const HAS_OUTSIDE_BROKER: &str = "has_outside_broker";
pub const OUTSIDE_FIRM_NAME: &str = "outside_firm_name";
pub const OUTSIDE_ACCOUNT_TYPE: &str = "outside_broker_account_type";
pub const OUTSIDE_ACCOUNT_NUMBER: &str = "outside_broker_account_number";
pub const OUTSIDE_LIQUID_AMOUNT: &str = "outside_liquid_amount";

// Trusted contact
pub const TRUSTED_CONTACT_OPT_IN: &str = "trusted_contact_opt_in";
pub const TRUSTED_FULL_NAME: &str = "trusted_full_name";
pub const TRUSTED_RELATIONSHIP: &str = "trusted_relationship";
pub const TRUSTED_PHONE: &str = "trusted_phone";
pub const TRUSTED_EMAIL: &str = "trusted_email";

// Regulatory
pub const ELECTRONIC_REGULATORY_YES: &str = "electronic_regulatory_yes";
pub const ELECTRONIC_REGULATORY_NO: &str = "electronic_regulatory_no";
