use serde::Deserialize;

use super::OfxDateTime;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "STATUS", rename_all = "UPPERCASE")]
pub struct StatusV1 {
    pub code: i32,
    pub severity: Severity,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "SONRS")]
pub struct SignonResponse {
    #[serde(rename = "STATUS")]
    pub status: Option<StatusV1>,
    #[serde(rename = "DTSERVER")]
    pub server_date: Option<OfxDateTime>,
    #[serde(rename = "LANGUAGE")]
    pub language: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename = "SIGNONMSGSRSV1")]
pub struct SignonMessageSetV1 {
    #[serde(rename = "SONRS")]
    pub signon_response: Option<SignonResponse>,
}
