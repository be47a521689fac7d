use crate::error::OfxParseWarning;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OfxContentType {
    /// `DATA:OFXSGML`, used by 1.x documents.
    OfxSgml,
    /// 2.x documents, which carry an XML processing instruction instead of a `DATA` element.
    OfxXml,
    Unknown(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OfxSecurity {
    None,
    Type1,
    Unknown(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OfxEncoding {
    UsAscii,
    Utf8,
    Unknown(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OfxCharset {
    Latin1,
    WindowsLatin1,
    None,
    Unknown(String),
}

const SGML_HEADER_VERSIONS: [u32; 1] = [100];
const SGML_VERSIONS: [u32; 5] = [102, 103, 151, 160, 161];
const XML_HEADER_VERSIONS: [u32; 1] = [200];
const XML_VERSIONS: [u32; 8] = [200, 201, 202, 203, 210, 211, 220, 230];

/// The header segment of an OFX document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfxHeader<'a> {
    /// The version of the header portion of the document. `100` (SGML) and `200` (XML) are the
    /// only valid values; other values are tolerated, yielding a warning.
    pub header_version: u32,
    /// The content type of the document.
    pub data: OfxContentType,
    /// The version of the content portion of the document.
    pub version: u32,
    /// The type of application-level security used for the `<OFX>` block. Valid values are `NONE`
    /// and `TYPE1`; other values are tolerated, yielding a warning.
    pub security: OfxSecurity,
    /// The text encoding used for character data.
    pub encoding: OfxEncoding,
    /// The character set used for character data. Valid values are `ISO-8859-1`, `1252` and `NONE`;
    /// other values are tolerated, yielding a warning.
    pub charset: OfxCharset,
    /// Unused.
    pub compression: &'a str,
    /// Intended to be used in conjunction with `new_file_uid` for file-based error recovery.
    pub old_file_uid: &'a str,
    /// Uniquely identifies a request file.
    pub new_file_uid: &'a str,
}

impl<'a> OfxHeader<'a> {
    /// Lists the header values that were accepted but are not recognized.
    pub fn warnings(&self) -> Vec<OfxParseWarning> {
        let (header_versions, versions): (&[u32], &[u32]) = match self.data {
            OfxContentType::OfxXml => (&XML_HEADER_VERSIONS, &XML_VERSIONS),
            _ => (&SGML_HEADER_VERSIONS, &SGML_VERSIONS),
        };

        let mut warnings = Vec::new();
        if !header_versions.contains(&self.header_version) {
            warnings.push(OfxParseWarning::UnrecognizedOfxHeaderVersion(
                self.header_version,
            ));
        }
        if !versions.contains(&self.version) {
            warnings.push(OfxParseWarning::UnrecognizedVersion(self.version));
        }
        if let OfxContentType::Unknown(v) = &self.data {
            warnings.push(OfxParseWarning::UnrecognizedContentType(v.clone()));
        }
        if let OfxSecurity::Unknown(v) = &self.security {
            warnings.push(OfxParseWarning::UnrecognizedSecurity(v.clone()));
        }
        if let OfxEncoding::Unknown(v) = &self.encoding {
            warnings.push(OfxParseWarning::UnrecognizedEncoding(v.clone()));
        }
        if let OfxCharset::Unknown(v) = &self.charset {
            warnings.push(OfxParseWarning::UnrecognizedCharset(v.clone()));
        }
        warnings
    }
}
