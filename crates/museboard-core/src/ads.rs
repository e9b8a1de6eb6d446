//! Ad copy generation.
//!
//! A fixed table of category templates stands in for a generative model: each
//! known category maps to a title and a body that embed the product description.
//! Anything else falls back to a generic template.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_FORMAT: &str = "social_media";
pub const DEFAULT_TONE: &str = "persuasive";

/// Title prefix length for the named category templates, in characters.
const CATEGORY_TITLE_CHARS: usize = 30;
/// Title prefix length for the generic fallback template, in characters.
const FALLBACK_TITLE_CHARS: usize = 40;

/// Categories with a dedicated template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdCategory {
    Restaurant,
    Fashion,
    Tech,
    Courses,
}

impl AdCategory {
    pub const ALL: [AdCategory; 4] = [
        AdCategory::Restaurant,
        AdCategory::Fashion,
        AdCategory::Tech,
        AdCategory::Courses,
    ];

    /// Exact, case-sensitive match against the category key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AdCategory::Restaurant => "restaurant",
            AdCategory::Fashion => "fashion",
            AdCategory::Tech => "tech",
            AdCategory::Courses => "courses",
        }
    }

    fn title_lead(self) -> &'static str {
        match self {
            AdCategory::Restaurant => "Savor the Flavor",
            AdCategory::Fashion => "Step Into Style",
            AdCategory::Tech => "Innovate Today",
            AdCategory::Courses => "Master New Skills",
        }
    }

    fn content(self, description: &str) -> String {
        match self {
            AdCategory::Restaurant => format!(
                "Experience the taste of {description}! Fresh ingredients, authentic flavors, \
                 and unforgettable moments await. Book your table today and discover why we're \
                 the talk of the town. \u{1f37d}\u{fe0f} BOOK NOW"
            ),
            AdCategory::Fashion => format!(
                "Elevate your wardrobe with {description}. Trendsetting designs that make you \
                 stand out. Limited collection available. Express yourself through fashion. \
                 \u{1f457} SHOP NOW"
            ),
            AdCategory::Tech => format!(
                "Transform your workflow with {description}. Cutting-edge technology meets \
                 intuitive design. Join thousands of satisfied users who've made the switch. \
                 \u{1f4bb} GET STARTED"
            ),
            AdCategory::Courses => format!(
                "Unlock your potential with {description}. Expert-led courses designed for \
                 real-world success. Start learning today and advance your career. \
                 \u{1f4da} ENROLL NOW"
            ),
        }
    }
}

impl std::fmt::Display for AdCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated title and body for one ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdCopy {
    pub title: String,
    pub content: String,
}

/// Fill the template for `category` with `description`.
///
/// Unknown categories (including empty and `"general"`) use the generic
/// template. Never fails and always returns a non-empty title and content.
#[must_use]
pub fn generate_ad_copy(category: &str, description: &str) -> AdCopy {
    match AdCategory::from_key(category) {
        Some(known) => AdCopy {
            title: format!(
                "{}: {}",
                known.title_lead(),
                char_prefix(description, CATEGORY_TITLE_CHARS)
            ),
            content: known.content(description),
        },
        None => AdCopy {
            title: format!(
                "Discover: {}",
                char_prefix(description, FALLBACK_TITLE_CHARS)
            ),
            content: format!(
                "Don't miss out on {description}! Limited time offer. Act now and experience \
                 the difference. \u{2728} LEARN MORE"
            ),
        },
    }
}

/// First `max_chars` characters of `s`, never splitting a code point.
fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
