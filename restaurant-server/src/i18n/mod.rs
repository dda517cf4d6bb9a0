//! 多语言 (fi / en)
//!
//! 语言由 `lang` 查询参数决定 (不区分大小写)，只支持 `fi` 和 `en`，
//! 其他值一律回退到默认语言 `fi`。
//!
//! 翻译表在编译时嵌入 (`locales/*.json`)，进程启动后第一次使用时解析一次，
//! 之后只读。查找顺序：当前语言 → 默认语言 → key 本身。

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::LazyLock;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    Fi,
    En,
}

impl Lang {
    pub const DEFAULT: Lang = Lang::Fi;

    pub fn code(self) -> &'static str {
        match self {
            Lang::Fi => "fi",
            Lang::En => "en",
        }
    }

    /// Parse a language code, case-insensitive
    pub fn parse(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "fi" => Some(Lang::Fi),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Resolve the `lang` query value, falling back to the default
    pub fn resolve(param: Option<&str>) -> Lang {
        param.and_then(Lang::parse).unwrap_or(Lang::DEFAULT)
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for Lang {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let param = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang);
        Ok(Lang::resolve(param.as_deref()))
    }
}

type Table = HashMap<String, String>;

/// Translation tables for every language
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<Lang, Table>,
}

impl Catalog {
    pub fn new(tables: HashMap<Lang, Table>) -> Self {
        Self { tables }
    }

    fn embedded() -> Self {
        let sources = [
            (Lang::Fi, include_str!("../../locales/fi.json")),
            (Lang::En, include_str!("../../locales/en.json")),
        ];

        let tables = sources
            .into_iter()
            .map(|(lang, source)| {
                let table = serde_json::from_str::<Table>(source).unwrap_or_else(|e| {
                    tracing::error!(lang = lang.code(), error = %e, "Invalid translation table");
                    Table::new()
                });
                (lang, table)
            })
            .collect();

        Self { tables }
    }

    /// Look `key` up in `lang`, then in the default language, then give the key back
    pub fn lookup<'a>(&'a self, key: &'a str, lang: Lang) -> &'a str {
        let find = |lang: Lang| {
            self.tables
                .get(&lang)
                .and_then(|table| table.get(key))
                .map(String::as_str)
        };
        find(lang).or_else(|| find(Lang::DEFAULT)).unwrap_or(key)
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::embedded);

/// Translate `key` for display in `lang`
pub fn translate(key: &str, lang: Lang) -> &str {
    CATALOG.lookup(key, lang)
}

/// Translator bound to one request's language, handed to templates
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    lang: Lang,
}

impl Translator {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(key, self.lang)
    }

    /// Current language code (`fi` / `en`)
    pub fn lang(&self) -> &'static str {
        self.lang.code()
    }

    /// Append the language to a site path: `/menu` → `/menu?lang=fi`
    pub fn link(&self, path: &str) -> String {
        with_lang(path, self.lang)
    }
}

/// `path` with `lang=<code>` added to its query
pub fn with_lang(path: &str, lang: Lang) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}lang={}", path, separator, lang.code())
}
