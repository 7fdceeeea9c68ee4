// src/recipe/requirement.rs

//! Requirement references (`name/version@user/channel`)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reference to another package this recipe depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    /// Exact version, or a bracketed range like `[>=19.2.3]`
    pub version: String,
    pub user: Option<String>,
    pub channel: Option<String>,
}

impl Requirement {
    /// Whether the version is a range expression rather than a pin
    pub fn is_range(&self) -> bool {
        self.version.starts_with('[') && self.version.ends_with(']')
    }

    /// The range expression without brackets, if this is a range
    pub fn range(&self) -> Option<&str> {
        if self.is_range() {
            Some(self.version[1..self.version.len() - 1].trim())
        } else {
            None
        }
    }
}

impl FromStr for Requirement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (reference, user_channel) = match s.split_once('@') {
            Some((reference, rest)) => (reference, Some(rest)),
            None => (s, None),
        };

        let (name, version) = reference
            .split_once('/')
            .ok_or_else(|| Error::ParseError(format!("Requirement '{}' is missing a version", s)))?;

        if name.is_empty() || version.is_empty() {
            return Err(Error::ParseError(format!(
                "Requirement '{}' must be name/version",
                s
            )));
        }
        if version.starts_with('[') != version.ends_with(']') {
            return Err(Error::ParseError(format!(
                "Unbalanced version range in requirement '{}'",
                s
            )));
        }

        let (user, channel) = match user_channel {
            Some(uc) => {
                let (user, channel) = uc.split_once('/').ok_or_else(|| {
                    Error::ParseError(format!("Requirement '{}' must use @user/channel", s))
                })?;
                if user.is_empty() || channel.is_empty() {
                    return Err(Error::ParseError(format!(
                        "Requirement '{}' has an empty user or channel",
                        s
                    )));
                }
                (Some(user.to_string()), Some(channel.to_string()))
            }
            None => (None, None),
        };

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            user,
            channel,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if let (Some(user), Some(channel)) = (&self.user, &self.channel) {
            write!(f, "@{}/{}", user, channel)?;
        }
        Ok(())
    }
}
