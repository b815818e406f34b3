//! English/Arabic switching with matching text direction.
//!
//! Markup carries per-language annotations: `data-en` / `data-ar` for
//! display text and `data-placeholder-en` / `data-placeholder-ar` for
//! input-like elements. Switching rewrites every annotated element from the
//! target language's annotation. An element without that annotation keeps
//! whatever it currently shows.

#[cfg(test)]
#[path = "locale_test.rs"]
mod locale_test;

use crate::config::SiteConfig;
use crate::consts::RTL_CLASS;
use crate::document::{DocumentView, Effect};
use crate::preferences::{PreferenceStore, read_or_absent, write_or_warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Ar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Language {
    /// Decode the stored code. Anything but `"ar"` means English.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("ar") => Self::Ar,
            _ => Self::En,
        }
    }

    /// BCP 47 code, also the stored value.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    #[must_use]
    pub fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    /// Short label naming this language on the toggle.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ar => "AR",
        }
    }

    #[must_use]
    pub fn text_attribute(self) -> &'static str {
        match self {
            Self::En => "data-en",
            Self::Ar => "data-ar",
        }
    }

    #[must_use]
    pub fn placeholder_attribute(self) -> &'static str {
        match self {
            Self::En => "data-placeholder-en",
            Self::Ar => "data-placeholder-ar",
        }
    }
}

/// `INPUT` and `TEXTAREA` show placeholders instead of text content.
#[must_use]
pub fn is_input_like(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("input") || tag_name.eq_ignore_ascii_case("textarea")
}

#[derive(Debug, Clone)]
pub struct LocalizationController<N> {
    language: Language,
    toggle: N,
    label: Option<N>,
    root: Option<N>,
    body: Option<N>,
    storage_key: String,
}

impl<N: Clone> LocalizationController<N> {
    /// Resolve the toggle and its label. `None` when the page has no toggle.
    pub fn mount<D: DocumentView<Node = N>>(doc: &D, config: &SiteConfig) -> Option<Self> {
        let toggle = doc.query(&config.selectors.language_toggle)?;
        let label = doc.query_within(&toggle, &config.selectors.language_label);
        Some(Self {
            language: Language::En,
            toggle,
            label,
            root: doc.root(),
            body: doc.body(),
            storage_key: config.storage.language.clone(),
        })
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_node(&self) -> &N {
        &self.toggle
    }

    /// Load the stored language and apply it unless it is the default.
    pub fn initialize<D, S>(&mut self, doc: &D, store: &mut S) -> Vec<Effect<N>>
    where
        D: DocumentView<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        let stored = read_or_absent(&*store, &self.storage_key);
        match Language::from_stored(stored.as_deref()) {
            Language::En => {
                self.language = Language::En;
                Vec::new()
            }
            Language::Ar => self.apply_language(doc, store, Language::Ar),
        }
    }

    /// Switch to the other language.
    pub fn toggle<D, S>(&mut self, doc: &D, store: &mut S) -> Vec<Effect<N>>
    where
        D: DocumentView<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        let next = self.language.other();
        self.apply_language(doc, store, next)
    }

    /// Render `language` across the document and persist it.
    ///
    /// Sets `dir`/`lang` on the root together so the two never disagree,
    /// flips the body RTL class, relabels the toggle with the other
    /// language, and rewrites annotated elements.
    pub fn apply_language<D, S>(&mut self, doc: &D, store: &mut S, language: Language) -> Vec<Effect<N>>
    where
        D: DocumentView<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        self.language = language;
        let mut effects = Vec::new();

        if let Some(root) = &self.root {
            effects.push(Effect::set_attribute(root.clone(), "dir", language.direction().as_str()));
            effects.push(Effect::set_attribute(root.clone(), "lang", language.code()));
        }
        if let Some(body) = &self.body {
            effects.push(Effect::toggle_class(body.clone(), RTL_CLASS, language == Language::Ar));
        }
        if let Some(label) = &self.label {
            effects.push(Effect::set_text(label.clone(), language.other().label()));
        }
        effects.extend(translate(doc, language));

        write_or_warn(store, &self.storage_key, language.code());
        log::debug!("language applied: {}", language.code());
        effects
    }
}

/// Rewrite every element annotated for `language`.
pub fn translate<D: DocumentView>(doc: &D, language: Language) -> Vec<Effect<D::Node>> {
    let text_attr = language.text_attribute();
    let placeholder_attr = language.placeholder_attribute();
    let selector = format!("[{text_attr}], [{placeholder_attr}]");

    doc.query_all(&selector)
        .into_iter()
        .filter_map(|node| {
            if is_input_like(&doc.tag_name(&node)) {
                let placeholder = doc.attribute(&node, placeholder_attr)?;
                Some(Effect::set_attribute(node, "placeholder", placeholder))
            } else {
                let text = doc.attribute(&node, text_attr)?;
                Some(Effect::set_text(node, text))
            }
        })
        .collect()
}
