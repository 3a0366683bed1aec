/*!
 * Section extractors and report assembly
 *
 * Each extractor is a pure function of the parsed document tree returning one
 * normalized sub-record. A missing sub-tree at any depth degenerates to
 * defaults; the only fatal condition is a document without the
 * `INProfileResponse` root, handled in [`extract_report`].
 */

use std::collections::HashSet;

use crate::constants::{DEFAULT_WRITTEN_OFF_STATUS, ROOT_ELEMENT, SUIT_FILED_CODE};
use crate::data_types::*;
use crate::normalize::{format_date, to_int};
use crate::xml::XmlNode;
use crate::Result;

/// Assemble a full normalized report from a parsed document tree
///
/// Calls every section extractor exactly once, then reads the two header
/// fields. Fails only when the report root itself is absent, since without it
/// no extractor has valid input.
pub fn extract_report(doc: &XmlNode) -> Result<CreditReport> {
    let report = doc
        .child(ROOT_ELEMENT)
        .ok_or_else(|| crate::InprofileError::missing_root(ROOT_ELEMENT))?;

    Ok(CreditReport {
        basic_details: extract_basic_details(report),
        credit_score: extract_credit_score(report),
        report_summary: extract_report_summary(report),
        credit_accounts: extract_credit_accounts(report),
        addresses: extract_addresses(report),
        enquiries: extract_enquiries(report),
        report_date: report
            .at(&["Header"])
            .map(|h| h.field("ReportDate").to_string())
            .unwrap_or_default(),
        report_number: report
            .at(&["CreditProfileHeader"])
            .map(|h| h.field("ReportNumber").to_string())
            .unwrap_or_default(),
    })
}

/// The account-details list, normalized to a slice in one place
fn account_details(report: &XmlNode) -> &[XmlNode] {
    report
        .child("CAIS_Account")
        .map(|n| n.children("CAIS_Account_DETAILS"))
        .unwrap_or(&[])
}

/// Holder details of the first reported account, used as a fallback source
/// for basic details when the application section is incomplete
fn first_holder_details(report: &XmlNode) -> Option<&XmlNode> {
    account_details(report)
        .first()
        .and_then(|account| account.child("CAIS_Holder_Details"))
}

/// Resolve one basic-details field: applicant value wins, holder value is the
/// fallback, empty string when neither is present
fn resolve_field(
    applicant: Option<&XmlNode>,
    applicant_field: &str,
    holder: Option<&XmlNode>,
    holder_field: &str,
) -> String {
    let from_applicant = applicant.map(|n| n.field(applicant_field)).unwrap_or("");
    if !from_applicant.is_empty() {
        return from_applicant.to_string();
    }
    holder
        .map(|n| n.field(holder_field))
        .unwrap_or("")
        .to_string()
}

pub(crate) fn extract_basic_details(report: &XmlNode) -> BasicDetails {
    let applicant = report.at(&[
        "Current_Application",
        "Current_Application_Details",
        "Current_Applicant_Details",
    ]);
    let holder = first_holder_details(report);

    let first_name = resolve_field(applicant, "First_Name", holder, "First_Name_Non_Normalized");
    let last_name = resolve_field(applicant, "Last_Name", holder, "Surname_Non_Normalized");
    let full_name = format!("{} {}", first_name, last_name).trim().to_string();
    let date_of_birth = resolve_field(
        applicant,
        "Date_Of_Birth_Applicant",
        holder,
        "Date_of_birth",
    );

    BasicDetails {
        full_name,
        first_name,
        last_name,
        mobile_phone: resolve_field(applicant, "MobilePhoneNumber", holder, "Telephone_Number"),
        pan: resolve_field(applicant, "IncomeTaxPan", holder, "Income_TAX_PAN"),
        date_of_birth: format_date(&date_of_birth),
        gender: resolve_field(applicant, "Gender_Code", holder, "Gender_Code"),
    }
}

pub(crate) fn extract_credit_score(report: &XmlNode) -> CreditScore {
    let score = report.child("SCORE");
    CreditScore {
        score: score.map(|s| to_int(s.field("BureauScore"))).unwrap_or(0),
        confidence_level: score
            .map(|s| s.field("BureauScoreConfidLevel").to_string())
            .unwrap_or_default(),
        ..Default::default()
    }
}

pub(crate) fn extract_report_summary(report: &XmlNode) -> ReportSummary {
    let summary = report.at(&["CAIS_Account", "CAIS_Summary"]);
    let accounts = summary.and_then(|s| s.child("Credit_Account"));
    let outstanding = summary.and_then(|s| s.child("Total_Outstanding_Balance"));
    let caps = report.child("TotalCAPS_Summary");

    let int_field = |node: Option<&XmlNode>, name: &str| -> i64 {
        node.map(|n| to_int(n.field(name))).unwrap_or(0)
    };

    ReportSummary {
        total_accounts: int_field(accounts, "CreditAccountTotal"),
        active_accounts: int_field(accounts, "CreditAccountActive"),
        closed_accounts: int_field(accounts, "CreditAccountClosed"),
        default_accounts: int_field(accounts, "CreditAccountDefault"),
        current_balance: int_field(outstanding, "Outstanding_Balance_All"),
        secured_accounts_amount: int_field(outstanding, "Outstanding_Balance_Secured"),
        unsecured_accounts_amount: int_field(outstanding, "Outstanding_Balance_UnSecured"),
        last_7_days_credit_enquiries: int_field(caps, "TotalCAPSLast7Days"),
        last_30_days_credit_enquiries: int_field(caps, "TotalCAPSLast30Days"),
        last_90_days_credit_enquiries: int_field(caps, "TotalCAPSLast90Days"),
    }
}

pub(crate) fn extract_credit_accounts(report: &XmlNode) -> Vec<CreditAccount> {
    account_details(report)
        .iter()
        .map(|account| {
            let written_off = account.field("Written_off_Settled_Status");
            CreditAccount {
                account_number: account.field("Account_Number").to_string(),
                bank: account.field("Subscriber_Name").trim().to_string(),
                account_type: describe_account_type(account.field("Account_Type")),
                portfolio_type: describe_portfolio_type(account.field("Portfolio_Type")),
                open_date: format_date(account.field("Open_Date")),
                closed_date: format_date(account.field("Date_Closed")),
                credit_limit: to_int(account.field("Credit_Limit_Amount")),
                highest_credit: to_int(account.field("Highest_Credit_or_Original_Loan_Amount")),
                current_balance: to_int(account.field("Current_Balance")),
                amount_overdue: to_int(account.field("Amount_Past_Due")),
                account_status: describe_account_status(account.field("Account_Status")),
                payment_rating: account.field("Payment_Rating").to_string(),
                date_reported: format_date(account.field("Date_Reported")),
                ownership_type: describe_ownership_type(account.field("AccountHoldertypeCode")),
                suit_filed: if account.field("SuitFiled_WilfulDefault") == SUIT_FILED_CODE {
                    "Yes".to_string()
                } else {
                    "No".to_string()
                },
                written_off_status: if written_off.is_empty() {
                    DEFAULT_WRITTEN_OFF_STATUS.to_string()
                } else {
                    written_off.to_string()
                },
            }
        })
        .collect()
}

pub(crate) fn extract_addresses(report: &XmlNode) -> Vec<Address> {
    let mut seen = HashSet::new();
    let mut addresses = Vec::new();

    for account in account_details(report) {
        let Some(details) = account.child("CAIS_Holder_Address_Details") else {
            continue;
        };
        let address = Address {
            line1: details.field("First_Line_Of_Address_non_normalized").to_string(),
            line2: details.field("Second_Line_Of_Address_non_normalized").to_string(),
            line3: details.field("Third_Line_Of_Address_non_normalized").to_string(),
            city: details.field("City_non_normalized").to_string(),
            state: details.field("State_non_normalized").to_string(),
            postal_code: details.field("ZIP_Postal_Code_non_normalized").to_string(),
        };
        // An address without a first line is not worth keeping, whatever else
        // it carries.
        if address.line1.is_empty() {
            continue;
        }
        if seen.insert(address.dedup_key()) {
            addresses.push(address);
        }
    }

    addresses
}

pub(crate) fn extract_enquiries(report: &XmlNode) -> EnquirySummary {
    let caps = report.child("TotalCAPS_Summary");
    let int_field = |name: &str| -> i64 {
        caps.map(|n| to_int(n.field(name))).unwrap_or(0)
    };

    EnquirySummary {
        last_7_days: int_field("TotalCAPSLast7Days"),
        last_30_days: int_field("TotalCAPSLast30Days"),
        last_90_days: int_field("TotalCAPSLast90Days"),
        last_180_days: int_field("TotalCAPSLast180Days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> XmlNode {
        XmlNode::parse(xml).unwrap()
    }

    fn report_node(doc: &XmlNode) -> &XmlNode {
        doc.child(ROOT_ELEMENT).unwrap()
    }

    #[test]
    fn test_applicant_takes_precedence_over_holder() {
        let doc = parse(
            "<INProfileResponse>
               <Current_Application><Current_Application_Details><Current_Applicant_Details>
                 <First_Name>Rahul</First_Name>
                 <Last_Name>Sharma</Last_Name>
               </Current_Applicant_Details></Current_Application_Details></Current_Application>
               <CAIS_Account><CAIS_Account_DETAILS>
                 <CAIS_Holder_Details>
                   <First_Name_Non_Normalized>RAHUL K</First_Name_Non_Normalized>
                   <Surname_Non_Normalized>SHARMA</Surname_Non_Normalized>
                   <Income_TAX_PAN>abcde1234f</Income_TAX_PAN>
                 </CAIS_Holder_Details>
               </CAIS_Account_DETAILS></CAIS_Account>
             </INProfileResponse>",
        );
        let details = extract_basic_details(report_node(&doc));

        assert_eq!(details.first_name, "Rahul");
        assert_eq!(details.last_name, "Sharma");
        assert_eq!(details.full_name, "Rahul Sharma");
        // PAN is absent from the applicant section, so the holder wins.
        assert_eq!(details.pan, "abcde1234f");
    }

    #[test]
    fn test_holder_fallback_when_applicant_missing() {
        let doc = parse(
            "<INProfileResponse>
               <CAIS_Account><CAIS_Account_DETAILS>
                 <CAIS_Holder_Details>
                   <First_Name_Non_Normalized>ANITA</First_Name_Non_Normalized>
                   <Surname_Non_Normalized>DESAI</Surname_Non_Normalized>
                   <Date_of_birth>19900715</Date_of_birth>
                 </CAIS_Holder_Details>
               </CAIS_Account_DETAILS></CAIS_Account>
             </INProfileResponse>",
        );
        let details = extract_basic_details(report_node(&doc));

        assert_eq!(details.full_name, "ANITA DESAI");
        assert_eq!(details.date_of_birth, "1990-07-15");
        assert_eq!(details.mobile_phone, "");
    }

    #[test]
    fn test_full_name_trims_when_one_part_missing() {
        let doc = parse(
            "<INProfileResponse>
               <Current_Application><Current_Application_Details><Current_Applicant_Details>
                 <First_Name>Priya</First_Name>
               </Current_Applicant_Details></Current_Application_Details></Current_Application>
             </INProfileResponse>",
        );
        let details = extract_basic_details(report_node(&doc));
        assert_eq!(details.full_name, "Priya");
    }

    #[test]
    fn test_account_fields_decode_and_default() {
        let doc = parse(
            "<INProfileResponse><CAIS_Account><CAIS_Account_DETAILS>
               <Account_Number>XXXX1234</Account_Number>
               <Subscriber_Name>  HDFC BANK  </Subscriber_Name>
               <Account_Type>10</Account_Type>
               <Portfolio_Type>R</Portfolio_Type>
               <Open_Date>20200315</Open_Date>
               <Credit_Limit_Amount>250000</Credit_Limit_Amount>
               <Current_Balance>12000</Current_Balance>
               <Account_Status>11</Account_Status>
               <AccountHoldertypeCode>1</AccountHoldertypeCode>
               <SuitFiled_WilfulDefault>01</SuitFiled_WilfulDefault>
             </CAIS_Account_DETAILS></CAIS_Account></INProfileResponse>",
        );
        let accounts = extract_credit_accounts(report_node(&doc));
        assert_eq!(accounts.len(), 1);

        let account = &accounts[0];
        assert_eq!(account.bank, "HDFC BANK");
        assert_eq!(account.account_type, "Credit Card");
        assert_eq!(account.portfolio_type, "Revolving");
        assert_eq!(account.open_date, "2020-03-15");
        assert_eq!(account.closed_date, "");
        assert_eq!(account.credit_limit, 250000);
        assert_eq!(account.highest_credit, 0);
        assert_eq!(account.account_status, "Active");
        assert_eq!(account.ownership_type, "Individual");
        assert_eq!(account.suit_filed, "Yes");
        assert_eq!(account.written_off_status, "00");
    }

    #[test]
    fn test_suit_filed_defaults_to_no() {
        let doc = parse(
            "<INProfileResponse><CAIS_Account><CAIS_Account_DETAILS>
               <SuitFiled_WilfulDefault>00</SuitFiled_WilfulDefault>
             </CAIS_Account_DETAILS></CAIS_Account></INProfileResponse>",
        );
        let accounts = extract_credit_accounts(report_node(&doc));
        assert_eq!(accounts[0].suit_filed, "No");
    }

    #[test]
    fn test_accounts_absent_yields_empty_vec() {
        let doc = parse("<INProfileResponse/>");
        assert!(extract_credit_accounts(report_node(&doc)).is_empty());
        assert!(extract_addresses(report_node(&doc)).is_empty());
    }

    #[test]
    fn test_account_order_is_preserved() {
        let doc = parse(
            "<INProfileResponse><CAIS_Account>
               <CAIS_Account_DETAILS><Account_Number>B2</Account_Number></CAIS_Account_DETAILS>
               <CAIS_Account_DETAILS><Account_Number>A1</Account_Number></CAIS_Account_DETAILS>
             </CAIS_Account></INProfileResponse>",
        );
        let accounts = extract_credit_accounts(report_node(&doc));
        assert_eq!(accounts[0].account_number, "B2");
        assert_eq!(accounts[1].account_number, "A1");
    }

    #[test]
    fn test_addresses_deduplicate_on_line1_city_postal() {
        let doc = parse(
            "<INProfileResponse><CAIS_Account>
               <CAIS_Account_DETAILS><CAIS_Holder_Address_Details>
                 <First_Line_Of_Address_non_normalized>12 MG Road</First_Line_Of_Address_non_normalized>
                 <City_non_normalized>Pune</City_non_normalized>
                 <ZIP_Postal_Code_non_normalized>411001</ZIP_Postal_Code_non_normalized>
               </CAIS_Holder_Address_Details></CAIS_Account_DETAILS>
               <CAIS_Account_DETAILS><CAIS_Holder_Address_Details>
                 <First_Line_Of_Address_non_normalized>12 MG Road</First_Line_Of_Address_non_normalized>
                 <Second_Line_Of_Address_non_normalized>Near Station</Second_Line_Of_Address_non_normalized>
                 <City_non_normalized>Pune</City_non_normalized>
                 <ZIP_Postal_Code_non_normalized>411001</ZIP_Postal_Code_non_normalized>
               </CAIS_Holder_Address_Details></CAIS_Account_DETAILS>
               <CAIS_Account_DETAILS><CAIS_Holder_Address_Details>
                 <First_Line_Of_Address_non_normalized>12 MG Road</First_Line_Of_Address_non_normalized>
                 <City_non_normalized>Mumbai</City_non_normalized>
                 <ZIP_Postal_Code_non_normalized>400001</ZIP_Postal_Code_non_normalized>
               </CAIS_Holder_Address_Details></CAIS_Account_DETAILS>
             </CAIS_Account></INProfileResponse>",
        );
        let addresses = extract_addresses(report_node(&doc));
        // First-seen wins within a duplicate triple.
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].city, "Pune");
        assert_eq!(addresses[0].line2, "");
        assert_eq!(addresses[1].city, "Mumbai");
    }

    #[test]
    fn test_address_without_line1_is_skipped() {
        let doc = parse(
            "<INProfileResponse><CAIS_Account>
               <CAIS_Account_DETAILS><CAIS_Holder_Address_Details>
                 <City_non_normalized>Pune</City_non_normalized>
                 <ZIP_Postal_Code_non_normalized>411001</ZIP_Postal_Code_non_normalized>
               </CAIS_Holder_Address_Details></CAIS_Account_DETAILS>
             </CAIS_Account></INProfileResponse>",
        );
        assert!(extract_addresses(report_node(&doc)).is_empty());
    }

    #[test]
    fn test_summary_and_enquiries_share_the_caps_block() {
        let doc = parse(
            "<INProfileResponse>
               <CAIS_Account><CAIS_Summary>
                 <Credit_Account>
                   <CreditAccountTotal>5</CreditAccountTotal>
                   <CreditAccountActive>3</CreditAccountActive>
                   <CreditAccountClosed>2</CreditAccountClosed>
                   <CreditAccountDefault>1</CreditAccountDefault>
                 </Credit_Account>
                 <Total_Outstanding_Balance>
                   <Outstanding_Balance_All>500000</Outstanding_Balance_All>
                   <Outstanding_Balance_Secured>400000</Outstanding_Balance_Secured>
                   <Outstanding_Balance_UnSecured>100000</Outstanding_Balance_UnSecured>
                 </Total_Outstanding_Balance>
               </CAIS_Summary></CAIS_Account>
               <TotalCAPS_Summary>
                 <TotalCAPSLast7Days>1</TotalCAPSLast7Days>
                 <TotalCAPSLast30Days>2</TotalCAPSLast30Days>
                 <TotalCAPSLast90Days>4</TotalCAPSLast90Days>
                 <TotalCAPSLast180Days>6</TotalCAPSLast180Days>
               </TotalCAPS_Summary>
             </INProfileResponse>",
        );
        let report = report_node(&doc);

        let summary = extract_report_summary(report);
        assert_eq!(summary.total_accounts, 5);
        assert_eq!(summary.active_accounts, 3);
        assert_eq!(summary.closed_accounts, 2);
        assert_eq!(summary.default_accounts, 1);
        assert_eq!(summary.current_balance, 500000);
        assert_eq!(summary.secured_accounts_amount, 400000);
        assert_eq!(summary.unsecured_accounts_amount, 100000);
        assert_eq!(summary.last_7_days_credit_enquiries, 1);
        assert_eq!(summary.last_30_days_credit_enquiries, 2);
        assert_eq!(summary.last_90_days_credit_enquiries, 4);

        let enquiries = extract_enquiries(report);
        assert_eq!(enquiries.last_7_days, 1);
        assert_eq!(enquiries.last_30_days, 2);
        assert_eq!(enquiries.last_90_days, 4);
        // The 180-day window only surfaces here.
        assert_eq!(enquiries.last_180_days, 6);
    }

    #[test]
    fn test_missing_summary_blocks_contribute_zeros() {
        let doc = parse("<INProfileResponse/>");
        let summary = extract_report_summary(report_node(&doc));
        assert_eq!(summary, ReportSummary::default());

        let enquiries = extract_enquiries(report_node(&doc));
        assert_eq!(enquiries, EnquirySummary::default());
    }

    #[test]
    fn test_score_defaults_when_block_missing() {
        let doc = parse("<INProfileResponse/>");
        let score = extract_credit_score(report_node(&doc));
        assert_eq!(score.score, 0);
        assert_eq!(score.confidence_level, "");
        assert_eq!(score.range, "300-900");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let doc = parse("<SomethingElse><SCORE><BureauScore>720</BureauScore></SCORE></SomethingElse>");
        let err = extract_report(&doc).unwrap_err();
        assert!(matches!(err, crate::InprofileError::MissingRoot { .. }));
        assert!(err.to_string().contains("INProfileResponse"));
    }

    #[test]
    fn test_header_fields_default_empty() {
        let doc = parse("<INProfileResponse/>");
        let report = extract_report(&doc).unwrap();
        assert_eq!(report.report_date, "");
        assert_eq!(report.report_number, "");
    }
}
