// ==========================================
// Voltway Industrial OS - i18n
// ==========================================
// rust-i18n, English (default) and Simplified Chinese
// The rust_i18n::i18n! macro is invoked in lib.rs
// ==========================================

/// Current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale ("en" or "zh-CN")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a key without arguments
///
/// # Example
/// ```no_run
/// use voltway_ios::i18n::t;
/// let msg = t("assistant.stalled");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a key and substitute `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use voltway_ios::i18n::t_with_args;
/// let msg = t_with_args("alerts.below_threshold", &[("part", "P300"), ("qty", "12"), ("min", "50")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // locale is process-global and tests run in parallel
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("assistant.stalled"), "Hugo core logic stalled.");

        set_locale("zh-CN");
        assert_eq!(t("assistant.stalled"), "Hugo 核心逻辑停滞。");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("context.build_potential", &[("product", "S1_V1"), ("units", "45")]);
        assert_eq!(msg, "Build potential S1_V1: 45 units");
    }
}
