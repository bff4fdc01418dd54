//! Declarative language profiles.
//!
//! Different source toolchains compiled to WebAssembly conventionally name
//! their host logging import differently (`console_log` for TypeScript,
//! `print` for Java, `log` elsewhere) and export their entry point under
//! different names. Rather than branching on the toolchain throughout the
//! harness, each [`LanguageHint`] maps to one static [`Profile`] row naming
//! the import set and the entry-point candidate order. Adding a new
//! toolchain convention means adding one row here.

use wasm_harness_common::LanguageHint;

/// The import namespace every known convention uses.
pub const ENV_NAMESPACE: &str = "env";

/// One row of the profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// The hint this profile belongs to.
    pub hint: LanguageHint,

    /// Import names (in `env`) that take `(ptr, len)` and log the decoded
    /// string. The generic profile offers all known names at once; unused
    /// ones are simply never called by a given module.
    pub log_imports: &'static [&'static str],

    /// Whether the no-argument `abort` import is offered.
    pub provide_abort: bool,

    /// Entry-point candidate names, tried in order; first present wins.
    pub entry_candidates: &'static [&'static str],
}

const GENERIC: Profile = Profile {
    hint: LanguageHint::Generic,
    log_imports: &["log", "console_log", "print"],
    provide_abort: true,
    entry_candidates: &["main", "helloWorld", "run"],
};

const TYPESCRIPT: Profile = Profile {
    hint: LanguageHint::Typescript,
    log_imports: &["console_log"],
    provide_abort: true,
    entry_candidates: &["main", "run"],
};

const PYTHON: Profile = Profile {
    hint: LanguageHint::Python,
    log_imports: &["log"],
    provide_abort: false,
    entry_candidates: &["helloWorld"],
};

const JAVA: Profile = Profile {
    hint: LanguageHint::Java,
    log_imports: &["print"],
    provide_abort: false,
    entry_candidates: &["helloWorld"],
};

impl Profile {
    /// Look up the profile for a hint.
    pub fn for_hint(hint: LanguageHint) -> &'static Profile {
        match hint {
            LanguageHint::Typescript => &TYPESCRIPT,
            LanguageHint::Python => &PYTHON,
            LanguageHint::Java => &JAVA,
            LanguageHint::Generic => &GENERIC,
        }
    }

    /// Returns `true` if this profile offers the given `env` function name.
    pub fn offers(&self, name: &str) -> bool {
        self.log_imports.contains(&name) || (self.provide_abort && name == "abort")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_offers_all_conventions() {
        let profile = Profile::for_hint(LanguageHint::Generic);

        assert!(profile.offers("log"));
        assert!(profile.offers("console_log"));
        assert!(profile.offers("print"));
        assert!(profile.offers("abort"));
        assert_eq!(profile.entry_candidates, &["main", "helloWorld", "run"]);
    }

    #[test]
    fn test_python_profile_is_narrow() {
        let profile = Profile::for_hint(LanguageHint::Python);

        assert!(profile.offers("log"));
        assert!(!profile.offers("console_log"));
        assert!(!profile.offers("print"));
        assert!(!profile.offers("abort"));
        assert_eq!(profile.entry_candidates, &["helloWorld"]);
    }

    #[test]
    fn test_java_profile() {
        let profile = Profile::for_hint(LanguageHint::Java);

        assert!(profile.offers("print"));
        assert!(!profile.offers("log"));
        assert_eq!(profile.entry_candidates, &["helloWorld"]);
    }

    #[test]
    fn test_typescript_profile() {
        let profile = Profile::for_hint(LanguageHint::Typescript);

        assert!(profile.offers("console_log"));
        assert!(profile.offers("abort"));
        assert!(!profile.offers("print"));
        assert_eq!(profile.entry_candidates, &["main", "run"]);
    }

    #[test]
    fn test_every_hint_has_a_profile() {
        for hint in LanguageHint::ALL {
            let profile = Profile::for_hint(hint);
            assert_eq!(profile.hint, hint);
            assert!(!profile.log_imports.is_empty());
            assert!(!profile.entry_candidates.is_empty());
        }
    }
}
