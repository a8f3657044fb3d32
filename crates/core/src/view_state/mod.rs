//! The listing's view state and its URL representation.

mod codec;

pub use codec::ViewStateCodec;

use crate::error::FilterKind;

/// Filters plus pagination offset, as shown in the address bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViewState {
    pub category_id: Option<u32>,
    pub publisher_id: Option<u32>,
    pub offset: u32,
}

impl ViewState {
    pub fn new(category_id: Option<u32>, publisher_id: Option<u32>, offset: u32) -> Self {
        Self {
            category_id,
            publisher_id,
            offset,
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            category_id: self.category_id,
            publisher_id: self.publisher_id,
        }
    }

    pub fn filter(&self, kind: FilterKind) -> Option<u32> {
        match kind {
            FilterKind::Category => self.category_id,
            FilterKind::Publisher => self.publisher_id,
        }
    }

    /// Same filters with `kind` set to `value`, pagination restarted.
    pub fn with_filter(&self, kind: FilterKind, value: Option<u32>) -> Self {
        let mut next = Self {
            offset: 0,
            ..*self
        };
        match kind {
            FilterKind::Category => next.category_id = value,
            FilterKind::Publisher => next.publisher_id = value,
        }
        next
    }

    pub fn has_filters(&self) -> bool {
        self.category_id.is_some() || self.publisher_id.is_some()
    }
}

/// The filter pair identifying which dataset a listing holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub category_id: Option<u32>,
    pub publisher_id: Option<u32>,
}

impl Fingerprint {
    /// Unfiltered catalog.
    pub const ALL: Fingerprint = Fingerprint {
        category_id: None,
        publisher_id: None,
    };
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |v: Option<u32>| v.map_or_else(|| "all".to_string(), |id| id.to_string());
        write!(
            f,
            "category={} publisher={}",
            show(self.category_id),
            show(self.publisher_id)
        )
    }
}
