//! Configuration types for the export engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `export.yaml`.

use serde::{Deserialize, Serialize};

use crate::models::PayCodeKind;

/// The external pay codes written to Daily Import rows.
///
/// Codes are configuration, not computed: payroll assigns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCodes {
    /// Code for regular-time hours.
    #[serde(default = "default_regular_code")]
    pub regular: String,
    /// Code for overtime hours.
    #[serde(default = "default_overtime_code")]
    pub overtime: String,
    /// Code for subsistence payments.
    #[serde(default = "default_subsistence_code")]
    pub subsistence: String,
}

fn default_regular_code() -> String {
    "211".to_string()
}

fn default_overtime_code() -> String {
    "212".to_string()
}

fn default_subsistence_code() -> String {
    "261".to_string()
}

impl Default for PayCodes {
    fn default() -> Self {
        Self {
            regular: default_regular_code(),
            overtime: default_overtime_code(),
            subsistence: default_subsistence_code(),
        }
    }
}

impl PayCodes {
    /// Returns the code for a kind of pay.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_export::config::PayCodes;
    /// use timesheet_export::models::PayCodeKind;
    ///
    /// let codes = PayCodes::default();
    /// assert_eq!(codes.code_for(PayCodeKind::Overtime), "212");
    /// ```
    pub fn code_for(&self, kind: PayCodeKind) -> &str {
        match kind {
            PayCodeKind::Regular => &self.regular,
            PayCodeKind::Overtime => &self.overtime,
            PayCodeKind::Subsistence => &self.subsistence,
        }
    }
}

/// Settings for one deployment of the export engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Pay codes for Daily Import rows.
    #[serde(default)]
    pub pay_codes: PayCodes,
    /// Literal written to the Daily Import "Post To Payroll" column.
    #[serde(default = "default_post_to_payroll")]
    pub post_to_payroll: String,
    /// Label whose right-hand neighbour receives the export date in Daily Time.
    #[serde(default = "default_date_label")]
    pub date_label: String,
}

fn default_post_to_payroll() -> String {
    "Y".to_string()
}

fn default_date_label() -> String {
    "DATA DATE".to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pay_codes: PayCodes::default(),
            post_to_payroll: default_post_to_payroll(),
            date_label: default_date_label(),
        }
    }
}
