use std::fmt;

const PREFIX: &str = "ATS0";
const SUFFIX_LEN: usize = 3;

/// Validated employee identifier: `ATS0` followed by three digits, `ATS0000` excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn parse(raw: &str) -> Option<Self> {
        Self::is_valid(raw).then(|| EmployeeId(raw.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        let Some(suffix) = raw.strip_prefix(PREFIX) else {
            return false;
        };

        suffix.len() == SUFFIX_LEN
            && suffix.bytes().all(|b| b.is_ascii_digit())
            && suffix != "000"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
