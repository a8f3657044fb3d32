//! Query-string encoding of [`ViewState`].
//!
//! Decoding never fails: anything that is not a known id or a sane offset is
//! read as its default.

use std::collections::HashSet;

use super::ViewState;
use crate::error::FilterKind;
use crate::filters::FilterLookup;

const OFFSET_PARAM: &str = "offset";

/// Bidirectional mapping between [`ViewState`] and its canonical query string.
#[derive(Debug, Clone, Copy)]
pub struct ViewStateCodec {
    page_size: u32,
}

impl ViewStateCodec {
    /// `page_size` must be non-zero; config validation guarantees it.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Parse a query string (with or without the leading `?`).
    pub fn decode<L>(&self, query: &str, lookup: &L) -> ViewState
    where
        L: FilterLookup + ?Sized,
    {
        let mut state = ViewState::default();
        let mut seen = HashSet::new();

        for (key, value) in parse_pairs(query) {
            // First occurrence of a key wins
            if !seen.insert(key.clone()) {
                continue;
            }

            match key.as_str() {
                k if k == FilterKind::Category.param() => {
                    state.category_id = parse_id(&value, FilterKind::Category, lookup);
                }
                k if k == FilterKind::Publisher.param() => {
                    state.publisher_id = parse_id(&value, FilterKind::Publisher, lookup);
                }
                OFFSET_PARAM => {
                    state.offset = self.parse_offset(&value);
                }
                _ => {}
            }
        }

        state
    }

    /// Canonical query string without the leading `?`; empty for the default state.
    pub fn encode(&self, state: &ViewState) -> String {
        let mut pairs = Vec::with_capacity(3);
        if let Some(id) = state.category_id {
            pairs.push(format!("{}={}", FilterKind::Category.param(), id));
        }
        if let Some(id) = state.publisher_id {
            pairs.push(format!("{}={}", FilterKind::Publisher.param(), id));
        }
        if state.offset > 0 {
            pairs.push(format!("{}={}", OFFSET_PARAM, state.offset));
        }
        pairs.join("&")
    }

    /// `path` followed by the canonical query, e.g. `/?category=3`.
    pub fn location(&self, path: &str, state: &ViewState) -> String {
        let query = self.encode(state);
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }

    fn parse_offset(&self, value: &str) -> u32 {
        match value.parse::<u32>() {
            Ok(offset) => offset - offset % self.page_size,
            Err(_) => 0,
        }
    }
}

fn parse_id<L>(value: &str, kind: FilterKind, lookup: &L) -> Option<u32>
where
    L: FilterLookup + ?Sized,
{
    value
        .parse::<u32>()
        .ok()
        .filter(|&id| id >= 1 && lookup.contains(kind, id))
}

fn parse_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> ViewStateCodec {
        ViewStateCodec::new(12)
    }

    /// Categories 1..=5 and publishers 1..=9 exist.
    fn known(kind: FilterKind, id: u32) -> bool {
        match kind {
            FilterKind::Category => id <= 5,
            FilterKind::Publisher => id <= 9,
        }
    }

    #[test]
    fn test_default_state_encodes_to_empty() {
        assert_eq!(codec().encode(&ViewState::default()), "");
        assert_eq!(codec().location("/", &ViewState::default()), "/");
    }

    #[test]
    fn test_encode_orders_and_omits_defaults() {
        let c = codec();
        assert_eq!(c.encode(&ViewState::new(Some(3), None, 0)), "category=3");
        assert_eq!(
            c.encode(&ViewState::new(Some(3), Some(7), 0)),
            "category=3&publisher=7"
        );
        assert_eq!(c.encode(&ViewState::new(None, None, 12)), "offset=12");
        assert_eq!(
            c.location("/", &ViewState::new(None, Some(2), 24)),
            "/?publisher=2&offset=24"
        );
    }

    #[test]
    fn test_decode_accepts_leading_question_mark_and_any_order() {
        let c = codec();
        let expected = ViewState::new(Some(3), Some(7), 0);
        assert_eq!(c.decode("?category=3&publisher=7", &known), expected);
        assert_eq!(c.decode("publisher=7&category=3", &known), expected);
    }

    #[test]
    fn test_decode_normalizes_malformed_values() {
        let c = codec();
        assert_eq!(
            c.decode("category=abc&publisher=-2&offset=-12", &known),
            ViewState::default()
        );
        assert_eq!(c.decode("category=0", &known), ViewState::default());
        assert_eq!(c.decode("offset=99999999999", &known), ViewState::default());
        assert_eq!(c.decode("category=&offset", &known), ViewState::default());
    }

    #[test]
    fn test_decode_drops_unknown_ids() {
        let state = codec().decode("category=42&publisher=9", &known);
        assert_eq!(state, ViewState::new(None, Some(9), 0));
    }

    #[test]
    fn test_decode_rounds_offset_down_to_page_boundary() {
        assert_eq!(codec().decode("offset=30", &known).offset, 24);
        assert_eq!(codec().decode("offset=11", &known).offset, 0);
    }

    #[test]
    fn test_decode_first_occurrence_wins_and_ignores_unknown_keys() {
        let state = codec().decode("category=2&category=4&sort=title&&offset=12", &known);
        assert_eq!(state, ViewState::new(Some(2), None, 12));
    }

    #[test]
    fn test_decode_percent_encoded_values() {
        let state = codec().decode("category=%33&of%66set=%32%34", &known);
        assert_eq!(state, ViewState::new(Some(3), None, 24));
    }

    #[test]
    fn test_decode_of_encode_is_identity_for_valid_states() {
        let c = codec();
        let states = [
            ViewState::default(),
            ViewState::new(Some(5), None, 0),
            ViewState::new(None, Some(1), 36),
            ViewState::new(Some(1), Some(9), 120),
        ];
        for state in states {
            assert_eq!(c.decode(&c.encode(&state), &known), state);
        }
    }

    #[test]
    fn test_unloaded_catalog_rejects_every_id() {
        let nothing = |_: FilterKind, _: u32| false;
        let state = codec().decode("category=1&publisher=1&offset=12", &nothing);
        assert_eq!(state, ViewState::new(None, None, 12));
    }
}
