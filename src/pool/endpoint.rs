//! Backend address parsing.

use std::fmt;

use url::Url;

use crate::pool::PoolError;

/// Host and port a backend pool connects to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Parse a connection URL such as `postgres://db-a:5432/crm`.
    ///
    /// Database schemes without an explicit port fall back to the
    /// well-known port of that database.
    pub fn parse(raw: &str) -> Result<Self, PoolError> {
        let url = Url::parse(raw).map_err(|e| PoolError::InvalidAddress(format!("{raw}: {e}")))?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| PoolError::InvalidAddress(format!("{raw}: missing host")))?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();

        let port = url
            .port()
            .or_else(|| default_port(url.scheme()))
            .or_else(|| url.port_or_known_default())
            .ok_or_else(|| PoolError::InvalidAddress(format!("{raw}: missing port")))?;

        Ok(Self { host, port })
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "postgres" | "postgresql" => Some(5432),
        "mysql" | "mariadb" => Some(3306),
        "h2" => Some(9092),
        "redis" => Some(6379),
        _ => None,
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_port() {
        let ep = Endpoint::parse("postgres://db-a:6543/crm").unwrap();
        assert_eq!(ep.host, "db-a");
        assert_eq!(ep.port, 6543);
        assert_eq!(ep.to_string(), "db-a:6543");
    }

    #[test]
    fn test_scheme_default_port() {
        assert_eq!(Endpoint::parse("postgresql://db/crm").unwrap().port, 5432);
        assert_eq!(Endpoint::parse("mysql://db").unwrap().port, 3306);
        assert_eq!(Endpoint::parse("h2://localhost/mem").unwrap().port, 9092);
    }

    #[test]
    fn test_ipv6_host() {
        let ep = Endpoint::parse("postgres://[::1]:5432/app").unwrap();
        assert_eq!(ep.host, "::1");
        assert_eq!(ep.to_string(), "[::1]:5432");
    }

    #[test]
    fn test_rejects_missing_parts() {
        assert!(matches!(
            Endpoint::parse("tcp://db-a"),
            Err(PoolError::InvalidAddress(_))
        ));
        assert!(Endpoint::parse("db-a:5432").is_err());
        assert!(Endpoint::parse("not a url").is_err());
    }
}
