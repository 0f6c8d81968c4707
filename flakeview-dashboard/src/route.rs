use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but RFC 3986 unreserved characters
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Location of the project flaky tests view, used to build chart links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRoute {
    base_path: String,
    project: String,
}

impl ViewRoute {
    pub fn new(base_path: &str, project: impl Into<String>) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            project: project.into(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// `{base_path}/projects/{project}/flaky_tests/?date={date}`
    pub fn href(&self, date: Option<&str>) -> String {
        let mut href = format!(
            "{}/projects/{}/flaky_tests/",
            self.base_path,
            encode_component(&self.project)
        );
        if let Some(date) = date {
            href.push_str("?date=");
            href.push_str(&encode_component(date));
        }
        href
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}
