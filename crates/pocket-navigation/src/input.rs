//! Input resolution for address bar
//!
//! 1. Domain-shaped input → navigate
//! 2. Anything else, or input the URL parser rejects → search
//!
//! The domain check is a loose heuristic rather than a URL grammar. It looks
//! for an optional scheme, an optional short subdomain label, then
//! `label.tld`. The first TLD character must be a letter, `0`, `.` or `9`,
//! which matches what earlier releases accepted.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::display::strip_prefix_ignore_case;
use crate::error::NavigationError;
use crate::Result;

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";

/// Prefixes the domain check may skip over. The scheme itself is optional.
const ADDRESS_PREFIXES: [&str; 4] = ["https://", "http://", "ftp://", "://"];

/// Prefixes that are kept as-is instead of getting `https://` prepended.
const KNOWN_SCHEMES: [&str; 3] = ["https://", "http://", "ftp://"];

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputResolution {
    /// Navigate to a URL
    Navigate(String),
    /// Perform a search
    Search(String),
}

impl InputResolution {
    pub fn url(&self) -> &str {
        match self {
            InputResolution::Navigate(url) | InputResolution::Search(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            InputResolution::Navigate(url) | InputResolution::Search(url) => url,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, InputResolution::Search(_))
    }
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Result<Self> {
        validate_template(&template)?;
        Ok(Self {
            search_template: template,
        })
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        validate_template(&template)?;
        self.search_template = template;
        Ok(())
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Resolve user input into an absolute URL
    pub fn resolve(&self, input: &str) -> InputResolution {
        let trimmed = input.trim();

        if looks_like_address(trimmed) {
            let candidate = if has_known_scheme(trimmed) {
                trimmed.to_string()
            } else {
                format!("https://{}", trimmed)
            };

            match Url::parse(&candidate) {
                Ok(_) => return InputResolution::Navigate(candidate),
                Err(e) => {
                    tracing::debug!(input = %trimmed, error = %e, "Address rejected, searching instead");
                }
            }
        }

        InputResolution::Search(self.build_search_url(input))
    }

    /// Build search URL from the raw query
    fn build_search_url(&self, query: &str) -> String {
        self.search_template.replace("%s", &encode_query(query))
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-encode like `encodeURIComponent`: unreserved characters plus
/// `!'()*` are left as typed.
fn encode_query(query: &str) -> String {
    let mut encoded = urlencoding::encode(query).into_owned();
    for (escaped, literal) in KEPT_MARKS {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, literal);
        }
    }
    encoded
}

const KEPT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

fn validate_template(template: &str) -> Result<()> {
    if !template.contains("%s") {
        return Err(NavigationError::MissingPlaceholder(template.to_string()));
    }
    Url::parse(&template.replace("%s", "query"))?;
    Ok(())
}

fn has_known_scheme(input: &str) -> bool {
    KNOWN_SCHEMES
        .iter()
        .any(|scheme| strip_prefix_ignore_case(input, scheme).is_some())
}

fn looks_like_address(input: &str) -> bool {
    ADDRESS_PREFIXES
        .iter()
        .filter_map(|prefix| strip_prefix_ignore_case(input, prefix))
        .any(|rest| host_like(rest.as_bytes()))
        || host_like(input.as_bytes())
}

/// Optional 2-3 character label and a dot, followed by `label.tld`
fn host_like(input: &[u8]) -> bool {
    let short = input.iter().take_while(|b| b.is_ascii_alphanumeric()).count();
    let with_subdomain = (2..=3).contains(&short)
        && input.get(short) == Some(&b'.')
        && domain_like(&input[short + 1..]);

    with_subdomain || domain_like(input)
}

fn domain_like(input: &[u8]) -> bool {
    let label = input.iter().take_while(|&&b| is_label_byte(b)).count();

    label > 0
        && input.get(label) == Some(&b'.')
        && input.get(label + 1).is_some_and(|&b| is_tld_byte(b))
}

fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_tld_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'0' | b'.' | b'9')
}
