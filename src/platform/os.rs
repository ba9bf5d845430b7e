// blazestd - platform/os.rs
//
// Compile-time platform name detection.

use std::fmt;
use std::str::FromStr;

/// Operating system family the runtime was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Win32,
    Win64,
    Darwin,
    Linux,
    Unix,
    Posix,
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFly,
    SunOs,
    Unknown,
}

impl Platform {
    /// Every platform name, in the order the names are listed to Blaze.
    pub const ALL: [Platform; 12] = [
        Platform::Win32,
        Platform::Win64,
        Platform::Darwin,
        Platform::Linux,
        Platform::Unix,
        Platform::Posix,
        Platform::FreeBsd,
        Platform::OpenBsd,
        Platform::NetBsd,
        Platform::DragonFly,
        Platform::SunOs,
        Platform::Unknown,
    ];

    /// Platform of the current build target.
    pub fn current() -> Self {
        detect(std::env::consts::OS, cfg!(windows), cfg!(unix))
    }

    /// Lowercase name as reported to Blaze programs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Win32 => "win32",
            Platform::Win64 => "win64",
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
            Platform::Unix => "unix",
            Platform::Posix => "posix",
            Platform::FreeBsd => "freebsd",
            Platform::OpenBsd => "openbsd",
            Platform::NetBsd => "netbsd",
            Platform::DragonFly => "dragonfly",
            Platform::SunOs => "sunos",
            Platform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform name '{}'", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Map a target to its platform name.
///
/// Windows wins outright and always reports `win32`, whatever the pointer
/// width. Apple and Linux targets come next. Every other unix, the BSDs and
/// illumos included, reports `unix`. The remaining names are never produced
/// by detection; they exist so callers can name them.
pub fn detect(target_os: &str, windows: bool, unix: bool) -> Platform {
    if windows {
        Platform::Win32
    } else if matches!(target_os, "macos" | "ios" | "tvos" | "watchos" | "visionos") {
        Platform::Darwin
    } else if matches!(target_os, "linux" | "android") {
        Platform::Linux
    } else if unix {
        Platform::Unix
    } else {
        Platform::Unknown
    }
}

/// Name of the platform this runtime was compiled for.
pub fn platform() -> &'static str {
    Platform::current().as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_is_one_of_known_names() {
        let name = platform();
        assert!(
            Platform::ALL.iter().any(|p| p.as_str() == name),
            "unexpected platform name {name}"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_detected() {
        assert_eq!(platform(), "linux");
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_detected_as_darwin() {
        assert_eq!(platform(), "darwin");
    }

    #[test]
    fn test_detect_table() {
        let rows = [
            ("windows", true, false, Platform::Win32),
            ("macos", false, true, Platform::Darwin),
            ("ios", false, true, Platform::Darwin),
            ("linux", false, true, Platform::Linux),
            ("android", false, true, Platform::Linux),
            ("freebsd", false, true, Platform::Unix),
            ("openbsd", false, true, Platform::Unix),
            ("netbsd", false, true, Platform::Unix),
            ("dragonfly", false, true, Platform::Unix),
            ("illumos", false, true, Platform::Unix),
            ("solaris", false, true, Platform::Unix),
            ("uefi", false, false, Platform::Unknown),
        ];
        for (os, windows, unix, expected) in rows {
            assert_eq!(detect(os, windows, unix), expected, "target_os = {os}");
        }
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_is_always_win32() {
        assert_eq!(platform(), "win32");
    }

    #[test]
    fn test_names_parse_back() {
        for p in Platform::ALL {
            assert_eq!(p.as_str().parse::<Platform>().unwrap(), p);
        }
        assert_eq!(" Linux ".parse::<Platform>().unwrap(), Platform::Linux);
        assert!("beos".parse::<Platform>().is_err());
    }
}
