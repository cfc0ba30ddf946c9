// i18n.rs
//
// Runtime UI strings:
// - Built-in table: assets/i18n.json compiled in, format { "<lang>": { "key": "value" } }
// - Override: assets/i18n/<lang>.json next to the executable or in the working dir
// - Lookup: tr("key") / tr_with("key", &[("name", ...)]) with {name} placeholders
// - Missing keys fall back to English, then to the key itself

use once_cell::sync::{Lazy, OnceCell};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

pub const FALLBACK_LANG: &str = "en";

/// Languages shipped in the built-in table, with their native names.
pub const LANGUAGES: [(&str, &str); 3] = [("en", "English"), ("ko", "한국어"), ("zh-Hans", "简体中文")];

type Table = HashMap<String, String>;

static BUILTIN: Lazy<HashMap<String, Table>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/i18n.json")).unwrap_or_else(|e| {
        log::error!("built-in i18n table is invalid: {e}");
        HashMap::new()
    })
});

#[derive(Debug, Clone)]
struct I18n {
    lang: String,
    map: Table,
    fallback_map: Table,
}

static I18N: OnceCell<RwLock<I18n>> = OnceCell::new();

fn load_json_map(path: &Path) -> Option<Table> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(map) => Some(map),
        Err(e) => {
            log::warn!("ignoring {}: {e}", path.display());
            None
        }
    }
}

fn find_override_file(lang: &str) -> Option<PathBuf> {
    let rel = Path::new("assets").join("i18n").join(format!("{lang}.json"));

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&rel)));

    beside_exe
        .into_iter()
        .chain(std::iter::once(rel.clone()))
        .find(|p| p.exists())
}

fn load_lang(lang: &str) -> Table {
    let mut map = BUILTIN.get(lang).cloned().unwrap_or_default();
    if let Some(extra) = find_override_file(lang).and_then(|p| load_json_map(&p)) {
        map.extend(extra);
    }
    map
}

/// Selects the UI language. Safe to call again to switch at runtime.
pub fn init(lang: impl Into<String>) {
    let lang = lang.into();
    let map = load_lang(&lang);
    if map.is_empty() {
        log::warn!("no strings for language '{lang}', using {FALLBACK_LANG}");
    }
    let fallback_map = if lang == FALLBACK_LANG {
        map.clone()
    } else {
        load_lang(FALLBACK_LANG)
    };

    let i = I18n {
        lang,
        map,
        fallback_map,
    };

    if let Some(lock) = I18N.get() {
        if let Ok(mut w) = lock.write() {
            *w = i;
        }
    } else {
        let _ = I18N.set(RwLock::new(i));
    }
}

pub fn current_lang() -> String {
    I18N.get()
        .and_then(|l| l.read().ok().map(|i| i.lang.clone()))
        .unwrap_or_else(|| FALLBACK_LANG.to_string())
}

/// Localized text for `key`; the key itself if no table has it.
pub fn tr(key: &str) -> String {
    let Some(i) = I18N.get().and_then(|l| l.read().ok()) else {
        return BUILTIN
            .get(FALLBACK_LANG)
            .and_then(|m| m.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string());
    };

    i.map
        .get(key)
        .or_else(|| i.fallback_map.get(key))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

/// Localized text with `{name}` placeholders substituted. Unknown
/// placeholders are left as-is.
pub fn tr_with(key: &str, args: &[(&str, String)]) -> String {
    let mut s = tr(key);
    for (k, v) in args {
        s = s.replace(&format!("{{{k}}}"), v);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_languages_share_english_keys() {
        let en = BUILTIN.get("en").expect("english table");
        for (code, _) in LANGUAGES {
            let table = BUILTIN.get(code).unwrap_or_else(|| panic!("missing {code}"));
            for key in en.keys() {
                assert!(table.contains_key(key), "{code} lacks {key}");
            }
        }
    }

    #[test]
    fn unknown_key_returns_key() {
        assert_eq!(tr("no.such.key"), "no.such.key");
    }

    #[test]
    fn placeholders_are_substituted() {
        init("en");
        let s = tr_with(
            "status.image",
            &[("index", "2".to_string()), ("count", "3".to_string())],
        );
        assert!(s.contains('2') && s.contains('3'), "{s}");
        assert!(!s.contains("{index}"));
    }
}
