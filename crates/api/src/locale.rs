//! `Accept-Language` resolution.
//!
//! The endpoints consume the resolved value (it is recorded on request
//! spans); message localization itself happens elsewhere.

/// A language this deployment serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
    Nl,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Nl => "nl",
        }
    }

    /// Match a language tag by its primary subtag (`de-AT` counts as `de`).
    fn from_language_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        if primary.eq_ignore_ascii_case("en") {
            Some(Self::En)
        } else if primary.eq_ignore_ascii_case("de") {
            Some(Self::De)
        } else if primary.eq_ignore_ascii_case("fr") {
            Some(Self::Fr)
        } else if primary.eq_ignore_ascii_case("nl") {
            Some(Self::Nl)
        } else {
            None
        }
    }
}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the first supported language from an `Accept-Language` header.
///
/// Quality parameters are ignored beyond the ordering the client already
/// expressed; an absent header, or one naming no supported language,
/// resolves to English.
pub fn resolve(header: Option<&str>) -> Locale {
    let Some(header) = header else {
        return Locale::default();
    };

    header
        .split(',')
        .filter_map(|item| {
            let tag = item.split(';').next()?.trim();
            Locale::from_language_tag(tag)
        })
        .next()
        .unwrap_or_default()
}
