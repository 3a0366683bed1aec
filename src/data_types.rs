/*!
 * Data type definitions for normalized credit reports
 *
 * This module contains type-safe representations of the record produced by
 * the extraction engine, plus the bureau code tables (account type, portfolio
 * type, account status, ownership type) with their unknown-code fallback
 * policies.
 *
 * Every record is fully populated after extraction: missing source data
 * resolves to an empty string, zero, or an empty sequence, never to an
 * absent field.
 */

use serde::{Deserialize, Serialize};

/// The normalized credit report produced by one extraction
///
/// Transient by design: identity and timestamps are assigned by whatever
/// persistence layer receives this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreditReport {
    pub basic_details: BasicDetails,
    pub credit_score: CreditScore,
    pub report_summary: ReportSummary,
    pub credit_accounts: Vec<CreditAccount>,
    pub addresses: Vec<Address>,
    pub enquiries: EnquirySummary,
    /// Report date as found in the document header, possibly empty
    pub report_date: String,
    /// Bureau report number, possibly empty
    pub report_number: String,
}

impl CreditReport {
    /// Sum of the overdue amounts across all accounts
    pub fn total_overdue(&self) -> i64 {
        self.credit_accounts.iter().map(|a| a.amount_overdue).sum()
    }

    /// Accounts whose decoded type is a credit card
    pub fn credit_cards(&self) -> Vec<&CreditAccount> {
        self.credit_accounts
            .iter()
            .filter(|a| a.account_type.to_lowercase().contains("credit card"))
            .collect()
    }

    /// Accounts whose decoded type is a loan
    pub fn loans(&self) -> Vec<&CreditAccount> {
        self.credit_accounts
            .iter()
            .filter(|a| a.account_type.to_lowercase().contains("loan"))
            .collect()
    }

    /// Count of accounts currently reported as active
    pub fn active_account_count(&self) -> usize {
        self.credit_accounts.iter().filter(|a| a.is_active()).count()
    }
}

/// Basic personal details of the report subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetails {
    pub first_name: String,
    pub last_name: String,
    /// Always derived from first + last, never read from the source directly
    pub full_name: String,
    pub mobile_phone: String,
    /// Permanent account number (tax ID), stored uppercase
    pub pan: String,
    /// ISO `YYYY-MM-DD`, or empty when the source carries no usable date
    pub date_of_birth: String,
    pub gender: String,
}

/// Bureau credit score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScore {
    /// Bureau score in the 300-900 range; 0 means unavailable
    pub score: i64,
    pub confidence_level: String,
    /// Fixed bureau score range
    pub range: String,
}

impl Default for CreditScore {
    fn default() -> Self {
        Self {
            score: 0,
            confidence_level: String::new(),
            range: crate::constants::SCORE_RANGE.to_string(),
        }
    }
}

impl CreditScore {
    /// Whether the bureau reported a score at all (0 is the absent sentinel,
    /// not a valid score)
    pub fn is_available(&self) -> bool {
        self.score != 0
    }
}

/// Aggregate account and enquiry counts from the bureau summary blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_accounts: i64,
    pub active_accounts: i64,
    pub closed_accounts: i64,
    pub default_accounts: i64,
    pub current_balance: i64,
    pub secured_accounts_amount: i64,
    pub unsecured_accounts_amount: i64,
    #[serde(rename = "last7DaysCreditEnquiries")]
    pub last_7_days_credit_enquiries: i64,
    #[serde(rename = "last30DaysCreditEnquiries")]
    pub last_30_days_credit_enquiries: i64,
    #[serde(rename = "last90DaysCreditEnquiries")]
    pub last_90_days_credit_enquiries: i64,
}

/// One tradeline as reported by the bureau
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreditAccount {
    pub account_number: String,
    /// Subscriber (lender) name, whitespace-trimmed
    pub bank: String,
    /// Decoded account type label
    pub account_type: String,
    /// Decoded portfolio type label
    pub portfolio_type: String,
    pub open_date: String,
    pub closed_date: String,
    pub credit_limit: i64,
    pub highest_credit: i64,
    pub current_balance: i64,
    pub amount_overdue: i64,
    /// Decoded account status label
    pub account_status: String,
    pub payment_rating: String,
    pub date_reported: String,
    /// Decoded ownership type label
    pub ownership_type: String,
    /// "Yes" when the bureau flags a suit filed or wilful default, else "No"
    pub suit_filed: String,
    /// Raw written-off/settled status code, "00" when not reported
    pub written_off_status: String,
}

impl CreditAccount {
    /// Whether the decoded status reports the account as active
    pub fn is_active(&self) -> bool {
        self.account_status.contains("Active")
    }

    /// Whether the decoded status reports the account as closed
    pub fn is_closed(&self) -> bool {
        self.account_status == "Closed"
    }
}

/// One address attached to an account holder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Address {
    /// De-duplication key: exact string equality over (line1, city, postal code)
    pub fn dedup_key(&self) -> (String, String, String) {
        (self.line1.clone(), self.city.clone(), self.postal_code.clone())
    }

    /// Format as a single line address
    pub fn format_single_line(&self) -> String {
        let mut parts = Vec::new();
        for part in [&self.line1, &self.line2, &self.line3, &self.city, &self.state, &self.postal_code] {
            if !part.is_empty() {
                parts.push(part.clone());
            }
        }
        parts.join(", ")
    }
}

/// Rolling enquiry counts from the CAPS summary block
///
/// The source format carries no itemized enquiry list, only these counters.
/// The 180-day window is surfaced here only, not in [`ReportSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnquirySummary {
    #[serde(rename = "last7Days")]
    pub last_7_days: i64,
    #[serde(rename = "last30Days")]
    pub last_30_days: i64,
    #[serde(rename = "last90Days")]
    pub last_90_days: i64,
    #[serde(rename = "last180Days")]
    pub last_180_days: i64,
}

/// Account Type code (bureau tradeline type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    CreditCard,                // 10
    PersonalLoan,              // 51, 52, 53
    AutoLoan,                  // 01
    HousingLoan,               // 02
    PropertyLoan,              // 03
    LoanAgainstSecurities,     // 04
    LoanAgainstBankDeposits,   // 05
    ConsumerLoan,              // 06
    SecuredCreditCard,         // 31
    TwoWheelerLoan,            // 32
    ConstructionEquipmentLoan, // 33
    TractorLoan,               // 34
    CorporateCreditCard,       // 35
    CommercialVehicleLoan,     // 36
    TelcoWireless,             // 37
    TelcoBroadband,            // 38
    TelcoLandline,             // 39
}

impl AccountType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "10" => Some(AccountType::CreditCard),
            "51" | "52" | "53" => Some(AccountType::PersonalLoan),
            "01" => Some(AccountType::AutoLoan),
            "02" => Some(AccountType::HousingLoan),
            "03" => Some(AccountType::PropertyLoan),
            "04" => Some(AccountType::LoanAgainstSecurities),
            "05" => Some(AccountType::LoanAgainstBankDeposits),
            "06" => Some(AccountType::ConsumerLoan),
            "31" => Some(AccountType::SecuredCreditCard),
            "32" => Some(AccountType::TwoWheelerLoan),
            "33" => Some(AccountType::ConstructionEquipmentLoan),
            "34" => Some(AccountType::TractorLoan),
            "35" => Some(AccountType::CorporateCreditCard),
            "36" => Some(AccountType::CommercialVehicleLoan),
            "37" => Some(AccountType::TelcoWireless),
            "38" => Some(AccountType::TelcoBroadband),
            "39" => Some(AccountType::TelcoLandline),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::CreditCard => "Credit Card",
            AccountType::PersonalLoan => "Personal Loan",
            AccountType::AutoLoan => "Auto Loan",
            AccountType::HousingLoan => "Housing Loan",
            AccountType::PropertyLoan => "Property Loan",
            AccountType::LoanAgainstSecurities => "Loan Against Securities",
            AccountType::LoanAgainstBankDeposits => "Loan Against Bank Deposits",
            AccountType::ConsumerLoan => "Consumer Loan",
            AccountType::SecuredCreditCard => "Secured Credit Card",
            AccountType::TwoWheelerLoan => "Two-wheeler Loan",
            AccountType::ConstructionEquipmentLoan => "Construction Equipment Loan",
            AccountType::TractorLoan => "Tractor Loan",
            AccountType::CorporateCreditCard => "Corporate Credit Card",
            AccountType::CommercialVehicleLoan => "Commercial Vehicle Loan",
            AccountType::TelcoWireless => "Telco-Wireless",
            AccountType::TelcoBroadband => "Telco-Broadband",
            AccountType::TelcoLandline => "Telco-Landline",
        }
    }
}

/// Decode an account type code; unknown codes keep the raw code visible
pub fn describe_account_type(code: &str) -> String {
    match AccountType::from_code(code) {
        Some(t) => t.label().to_string(),
        None => format!("Unknown ({})", code),
    }
}

/// Portfolio Type code (R, I, S, U)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortfolioType {
    Revolving,   // R
    Installment, // I
    Secured,     // S
    Unsecured,   // U
}

impl PortfolioType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(PortfolioType::Revolving),
            "I" => Some(PortfolioType::Installment),
            "S" => Some(PortfolioType::Secured),
            "U" => Some(PortfolioType::Unsecured),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PortfolioType::Revolving => "Revolving",
            PortfolioType::Installment => "Installment",
            PortfolioType::Secured => "Secured",
            PortfolioType::Unsecured => "Unsecured",
        }
    }
}

/// Decode a portfolio type code; unknown codes pass through raw
pub fn describe_portfolio_type(code: &str) -> String {
    match PortfolioType::from_code(code) {
        Some(t) => t.label().to_string(),
        None => code.to_string(),
    }
}

/// Account Status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,          // 11, 71
    Closed,          // 13
    ActiveSuitFiled, // 53
    Settled,         // 82
    WrittenOff,      // 83
}

impl AccountStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "11" | "71" => Some(AccountStatus::Active),
            "13" => Some(AccountStatus::Closed),
            "53" => Some(AccountStatus::ActiveSuitFiled),
            "82" => Some(AccountStatus::Settled),
            "83" => Some(AccountStatus::WrittenOff),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Closed => "Closed",
            AccountStatus::ActiveSuitFiled => "Active-Suit Filed",
            AccountStatus::Settled => "Settled",
            AccountStatus::WrittenOff => "Written Off",
        }
    }
}

/// Decode an account status code; unknown codes keep the raw code visible
pub fn describe_account_status(code: &str) -> String {
    match AccountStatus::from_code(code) {
        Some(s) => s.label().to_string(),
        None => format!("Status {}", code),
    }
}

/// Account Holder (ownership) Type code (1, 2, 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnershipType {
    Individual, // 1
    Joint,      // 2
    Guarantor,  // 3
}

impl OwnershipType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(OwnershipType::Individual),
            "2" => Some(OwnershipType::Joint),
            "3" => Some(OwnershipType::Guarantor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OwnershipType::Individual => "Individual",
            OwnershipType::Joint => "Joint",
            OwnershipType::Guarantor => "Guarantor",
        }
    }
}

/// Decode an ownership type code
///
/// Unknown codes become the fixed "Unknown" sentinel rather than the raw
/// code. This is asymmetric with [`describe_portfolio_type`] on purpose: it
/// reproduces observed bureau-consumer behavior, so do not unify the two.
pub fn describe_ownership_type(code: &str) -> String {
    match OwnershipType::from_code(code) {
        Some(t) => t.label().to_string(),
        None => "Unknown".to_string(),
    }
}
