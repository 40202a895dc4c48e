//! Supported JDK toolchains and the global activation command table.

use std::fmt;
use std::str::FromStr;

/// A supported JDK toolchain version.
///
/// The fleet only ever builds against these four; anything else in a
/// descriptor is rejected during classification, before any build starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Jdk {
    Jdk8,
    Jdk11,
    Jdk17,
    Jdk21,
}

impl Jdk {
    /// All supported versions, in dispatch order.
    pub const ALL: [Jdk; 4] = [Jdk::Jdk8, Jdk::Jdk11, Jdk::Jdk17, Jdk::Jdk21];

    /// The version string as it appears in `project.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Jdk::Jdk8 => "8",
            Jdk::Jdk11 => "11",
            Jdk::Jdk17 => "17",
            Jdk::Jdk21 => "21",
        }
    }

    /// The version name `jenv global` expects for this JDK.
    pub fn jenv_name(&self) -> &'static str {
        match self {
            Jdk::Jdk8 => "1.8",
            Jdk::Jdk11 => "11",
            Jdk::Jdk17 => "17",
            Jdk::Jdk21 => "21",
        }
    }
}

impl FromStr for Jdk {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8" => Ok(Jdk::Jdk8),
            "11" => Ok(Jdk::Jdk11),
            "17" => Ok(Jdk::Jdk17),
            "21" => Ok(Jdk::Jdk21),
            _ => Err(format!(
                "unsupported JDK version '{}'; expected one of 8, 11, 17, 21",
                s
            )),
        }
    }
}

impl fmt::Display for Jdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_versions() {
        assert_eq!("8".parse::<Jdk>().unwrap(), Jdk::Jdk8);
        assert_eq!("11".parse::<Jdk>().unwrap(), Jdk::Jdk11);
        assert_eq!("17".parse::<Jdk>().unwrap(), Jdk::Jdk17);
        assert_eq!("21".parse::<Jdk>().unwrap(), Jdk::Jdk21);
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        assert!("99".parse::<Jdk>().is_err());
        assert!("".parse::<Jdk>().is_err());
        assert!("1.8".parse::<Jdk>().is_err());
    }

    #[test]
    fn test_jenv_names() {
        assert_eq!(Jdk::Jdk8.jenv_name(), "1.8");
        assert_eq!(Jdk::Jdk21.jenv_name(), "21");
    }

    #[test]
    fn test_dispatch_order() {
        let names: Vec<_> = Jdk::ALL.iter().map(|j| j.as_str()).collect();
        assert_eq!(names, ["8", "11", "17", "21"]);
    }
}
