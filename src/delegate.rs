//! Delegated click handling for participant removal controls.
//!
//! Removal controls are plain elements carrying a class and two data
//! attributes. One listener on a stable ancestor hands whatever was clicked to
//! [`RemovalTag::from_element`], so controls created by later renders need no
//! wiring of their own.

pub const REMOVE_CONTROL_CLASS: &str = "delete-btn";
pub const ACTIVITY_ATTR: &str = "data-activity";
pub const PARTICIPANT_ATTR: &str = "data-participant";

/// Minimal element surface needed to recognise a removal control.
pub trait TaggedElement {
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemovalTag {
    pub activity: String,
    pub participant: String,
}

impl RemovalTag {
    pub fn new(activity: impl Into<String>, participant: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            participant: participant.into(),
        }
    }

    /// Reads the tag off a clicked element. `None` for anything that is not a
    /// removal control or is missing either attribute.
    pub fn from_element<E: TaggedElement + ?Sized>(el: &E) -> Option<Self> {
        if !el.has_class(REMOVE_CONTROL_CLASS) {
            return None;
        }
        let activity = el.attribute(ACTIVITY_ATTR)?;
        let participant = el.attribute(PARTICIPANT_ATTR)?;
        Some(Self {
            activity,
            participant,
        })
    }
}
