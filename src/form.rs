use serde::Deserialize;

/// The six free-text fields of one form submission.
///
/// Missing form keys deserialize to empty strings, so a partially posted
/// form still yields a record that can be checked with [`Submission::is_ready`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub product_name: String,
    pub company_url: String,
    pub product_category: String,
    pub competitors_url: String,
    pub value_proposition: String,
    pub target_customer: String,
}

impl Submission {
    /// Both required fields are present. No other validation happens.
    pub fn is_ready(&self) -> bool {
        !self.product_name.is_empty() && !self.company_url.is_empty()
    }
}
