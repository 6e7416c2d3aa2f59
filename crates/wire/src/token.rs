use std::{fmt, str::FromStr};

/// Prefix on list-reply row ids that marks a category selection.
pub const CATEGORY_SELECT_PREFIX: &str = "category_select~";

/// First segment of the older token form that carries no category.
const LEGACY_MARKER: &str = "lead_generate";

const SEPARATOR: char = '~';

/// Correlation token round-tripped through an outbound flow-form send and
/// its eventual reply.
///
/// The channel protocol echoes only this string back, so it is the sole link
/// between a form reply and the lead it belongs to. Two shapes are in the
/// wild: `lead_generate~{leadId}` (older sends, no category) and
/// `{leadId}~{categoryId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowToken {
    /// Older form carrying only the lead id.
    Legacy { lead_id: String },
    /// Current form binding the lead to the category the form was sent for.
    Category {
        lead_id: String,
        category_id: String,
    },
}

impl FlowToken {
    #[must_use]
    pub fn lead_id(&self) -> &str {
        match self {
            Self::Legacy { lead_id } | Self::Category { lead_id, .. } => lead_id,
        }
    }

    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::Legacy { .. } => None,
            Self::Category { category_id, .. } => Some(category_id),
        }
    }
}

impl fmt::Display for FlowToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy { lead_id } => write!(f, "{LEGACY_MARKER}{SEPARATOR}{lead_id}"),
            Self::Category {
                lead_id,
                category_id,
            } => write!(f, "{lead_id}{SEPARATOR}{category_id}"),
        }
    }
}

/// The token matched neither known shape.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized correlation token: {token:?}")]
pub struct TokenParseError {
    pub token: String,
}

impl FromStr for FlowToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || TokenParseError {
            token: s.to_string(),
        };
        let (first, rest) = s.split_once(SEPARATOR).ok_or_else(reject)?;
        if first.is_empty() || rest.is_empty() {
            return Err(reject());
        }
        // A literal legacy marker in the first segment wins over reading it
        // as a lead id.
        if first == LEGACY_MARKER {
            return Ok(Self::Legacy {
                lead_id: rest.to_string(),
            });
        }
        Ok(Self::Category {
            lead_id: first.to_string(),
            category_id: rest.to_string(),
        })
    }
}
