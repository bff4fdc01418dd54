//! Language hints for profile selection.
//!
//! A [`LanguageHint`] is a caller-supplied tag naming the source toolchain
//! that produced a module. It selects which import-name set and entry-point
//! candidate order the harness uses; the `Generic` default offers every
//! known convention at once.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source-toolchain tag selecting an import/export naming profile.
///
/// Unknown toolchains should use [`LanguageHint::Generic`], which satisfies
/// all known conventions simultaneously; unused import names are simply
/// never called by a given module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageHint {
    /// TypeScript/AssemblyScript-style modules (`console_log`, `abort`).
    Typescript,
    /// Python-to-Wasm modules (`log`, entry point `helloWorld`).
    Python,
    /// Java-to-Wasm modules (`print`, entry point `helloWorld`).
    Java,
    /// Try every known convention (the safe default).
    #[default]
    Generic,
}

impl LanguageHint {
    /// All hints, for help text and exhaustive testing.
    pub const ALL: [LanguageHint; 4] = [
        LanguageHint::Typescript,
        LanguageHint::Python,
        LanguageHint::Java,
        LanguageHint::Generic,
    ];

    /// The lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageHint::Typescript => "typescript",
            LanguageHint::Python => "python",
            LanguageHint::Java => "java",
            LanguageHint::Generic => "generic",
        }
    }
}

impl std::fmt::Display for LanguageHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(LanguageHint::Typescript),
            "python" | "py" => Ok(LanguageHint::Python),
            "java" => Ok(LanguageHint::Java),
            "generic" => Ok(LanguageHint::Generic),
            other => Err(format!(
                "unknown language hint '{other}' (expected typescript, python, java, or generic)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_generic() {
        assert_eq!(LanguageHint::default(), LanguageHint::Generic);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("typescript".parse(), Ok(LanguageHint::Typescript));
        assert_eq!("ts".parse(), Ok(LanguageHint::Typescript));
        assert_eq!("PYTHON".parse(), Ok(LanguageHint::Python));
        assert_eq!("java".parse(), Ok(LanguageHint::Java));
        assert_eq!("generic".parse(), Ok(LanguageHint::Generic));
        assert!("cobol".parse::<LanguageHint>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for hint in LanguageHint::ALL {
            assert_eq!(hint.to_string().parse(), Ok(hint));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LanguageHint::Java).unwrap();
        assert_eq!(json, "\"java\"");
        let hint: LanguageHint = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(hint, LanguageHint::Python);
    }
}
