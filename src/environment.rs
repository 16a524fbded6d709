use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Default address of a backend running on the operator's machine.
pub const LOCAL_API_URL: &str = "http://127.0.0.1:8000";

/// Represents the backend deployments the dashboard can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running locally on the default port.
    #[default]
    Local,
    /// Any other backend, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL of the backend REST API.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_API_URL.to_string(),
            Environment::Custom { api_url } => api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "local" => Ok(Environment::Local),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: trimmed.trim_end_matches('/').to_string(),
                })
            }
            _ => Err(format!(
                "Invalid API URL: {}. Expected `local` or an http(s) URL.",
                trimmed
            )),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { api_url } => write!(f, "Custom ({})", api_url),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "https://collections.example.com/".parse::<Environment>(),
            Ok(Environment::Custom {
                api_url: "https://collections.example.com".to_string()
            })
        );
        assert!("ftp://nope".parse::<Environment>().is_err());
    }

    #[test]
    fn test_api_url_has_no_trailing_slash() {
        let env = Environment::Custom {
            api_url: "http://10.0.0.5:8000/".to_string(),
        };
        assert_eq!(env.api_url(), "http://10.0.0.5:8000");
        assert_eq!(Environment::Local.api_url(), LOCAL_API_URL);
    }
}
