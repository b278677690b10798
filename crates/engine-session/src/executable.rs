//! Selection of the bundled Stockfish binary for the current platform.

use std::path::{Path, PathBuf};

/// Directory holding the pre-built engine binaries.
pub const DEFAULT_ASSETS_DIR: &str = "assets/engines";

/// Operating system the bundled binaries were built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    /// Parse the `platform` setting. Case-insensitive; `None` for anything else.
    pub fn from_setting(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("windows") {
            Some(Platform::Windows)
        } else if value.eq_ignore_ascii_case("linux") {
            Some(Platform::Linux)
        } else {
            None
        }
    }
}

/// CPU feature level a binary was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuVariant {
    Bmi2,
    Popcnt,
    #[default]
    Default,
}

impl CpuVariant {
    /// Parse the `variant` setting.
    ///
    /// Matching is exact and case-sensitive; anything other than `BMI2` or
    /// `POPCNT` (including `bmi2`) selects [`CpuVariant::Default`].
    pub fn from_setting(value: &str) -> Self {
        match value {
            "BMI2" => CpuVariant::Bmi2,
            "POPCNT" => CpuVariant::Popcnt,
            _ => CpuVariant::Default,
        }
    }
}

/// File name of the binary for a known platform.
pub fn binary_name(platform: Platform, variant: CpuVariant) -> &'static str {
    match (platform, variant) {
        (Platform::Windows, CpuVariant::Bmi2) => "stockfish_9_x64_bmi2.exe",
        (Platform::Windows, CpuVariant::Popcnt) => "stockfish_9_x64_popcnt.exe",
        (Platform::Windows, CpuVariant::Default) => "stockfish_9_x64.exe",
        (Platform::Linux, CpuVariant::Bmi2) => "stockfish-9-bmi2",
        // There is no plain Linux build; POPCNT is the baseline there
        (Platform::Linux, CpuVariant::Popcnt | CpuVariant::Default) => "stockfish-9-popcnt",
    }
}

/// File name used when the platform setting is not recognized.
///
/// The Windows fallback is the plain x64 build, `stockfish_9_x64.exe`;
/// no `x63` binary is shipped. `host_os` is compared against [`std::env::consts::OS`] values.
pub fn fallback_binary_name(host_os: &str) -> &'static str {
    if host_os.to_lowercase().contains("win") {
        "stockfish_9_x64.exe"
    } else {
        "stockfish-9-64"
    }
}

/// Resolve the engine executable from the `platform`/`variant` settings.
///
/// Deterministic for a given `(platform, variant, host_os)`. An unrecognized
/// platform logs a warning and falls back to sniffing `host_os`, ignoring the
/// variant.
pub fn resolve_for_host(
    assets_dir: &Path,
    platform: &str,
    variant: &str,
    host_os: &str,
) -> PathBuf {
    let name = match Platform::from_setting(platform) {
        Some(platform) => binary_name(platform, CpuVariant::from_setting(variant)),
        None => {
            tracing::warn!(
                "Unrecognized platform '{}' in configuration, autodetecting platform and loading defaults",
                platform
            );
            fallback_binary_name(host_os)
        }
    };
    assets_dir.join(name)
}

/// [`resolve_for_host`] for the OS this process runs on.
pub fn resolve(assets_dir: &Path, platform: &str, variant: &str) -> PathBuf {
    resolve_for_host(assets_dir, platform, variant, std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> &'static Path {
        Path::new(DEFAULT_ASSETS_DIR)
    }

    #[test]
    fn test_windows_variants() {
        assert_eq!(
            resolve_for_host(assets(), "windows", "BMI2", "linux"),
            PathBuf::from("assets/engines/stockfish_9_x64_bmi2.exe")
        );
        assert_eq!(
            resolve_for_host(assets(), "Windows", "POPCNT", "linux"),
            PathBuf::from("assets/engines/stockfish_9_x64_popcnt.exe")
        );
        assert_eq!(
            resolve_for_host(assets(), "WINDOWS", "DEFAULT", "linux"),
            PathBuf::from("assets/engines/stockfish_9_x64.exe")
        );
    }

    #[test]
    fn test_linux_variants() {
        assert_eq!(
            resolve_for_host(assets(), "linux", "BMI2", "windows"),
            PathBuf::from("assets/engines/stockfish-9-bmi2")
        );
        assert_eq!(
            resolve_for_host(assets(), "linux", "POPCNT", "windows"),
            PathBuf::from("assets/engines/stockfish-9-popcnt")
        );
        assert_eq!(
            resolve_for_host(assets(), "linux", "DEFAULT", "windows"),
            PathBuf::from("assets/engines/stockfish-9-popcnt")
        );
    }

    #[test]
    fn test_unknown_variant_uses_default() {
        assert_eq!(CpuVariant::from_setting("AVX512"), CpuVariant::Default);
        assert_eq!(
            resolve_for_host(assets(), "windows", "AVX512", "windows"),
            PathBuf::from("assets/engines/stockfish_9_x64.exe")
        );
    }

    #[test]
    fn test_variant_matching_is_case_sensitive() {
        assert_eq!(CpuVariant::from_setting("BMI2"), CpuVariant::Bmi2);
        assert_eq!(CpuVariant::from_setting("bmi2"), CpuVariant::Default);
        assert_eq!(CpuVariant::from_setting("Popcnt"), CpuVariant::Default);
        assert_eq!(CpuVariant::from_setting(" POPCNT"), CpuVariant::Default);
        assert_eq!(
            resolve_for_host(assets(), "linux", "bmi2", "linux"),
            PathBuf::from("assets/engines/stockfish-9-popcnt")
        );
    }

    #[test]
    fn test_windows_fallback_is_the_x64_build() {
        assert_eq!(fallback_binary_name("windows"), "stockfish_9_x64.exe");
        assert_ne!(fallback_binary_name("windows"), "stockfish_9_x63.exe");
        assert_eq!(fallback_binary_name("linux"), "stockfish-9-64");
    }

    #[test]
    fn test_unknown_platform_sniffs_host() {
        assert_eq!(
            resolve_for_host(assets(), "auto", "BMI2", "windows"),
            PathBuf::from("assets/engines/stockfish_9_x64.exe")
        );
        assert_eq!(
            resolve_for_host(assets(), "auto", "BMI2", "macos"),
            PathBuf::from("assets/engines/stockfish-9-64")
        );
        assert_eq!(
            resolve_for_host(assets(), "", "DEFAULT", "linux"),
            PathBuf::from("assets/engines/stockfish-9-64")
        );
    }

    #[test]
    fn test_custom_assets_dir() {
        assert_eq!(
            resolve_for_host(Path::new("/opt/engines"), "linux", "BMI2", "linux"),
            PathBuf::from("/opt/engines/stockfish-9-bmi2")
        );
    }
}
