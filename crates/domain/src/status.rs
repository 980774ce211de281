//! Status lookup table: how each motion tag is displayed.
//!
//! The table is static and never mutated. Unknown tags have no entry;
//! callers check membership and skip rendering instead of falling back
//! to a default.

use crate::motion::{MotionEvent, MotionTag};

/// DOM id of the status card element.
pub const CARD_ELEMENT_ID: &str = "status-card";
/// DOM id of the status image element.
pub const IMAGE_ELEMENT_ID: &str = "status-image";
/// DOM id of the status text element.
pub const TEXT_ELEMENT_ID: &str = "status-message";
/// DOM id of the one-time placeholder shown before the first event.
pub const PLACEHOLDER_ELEMENT_ID: &str = "status-placeholder";

/// Every border class the renderer may have applied to the card.
pub const BORDER_CLASSES: [&str; 3] = ["border-secondary", "border-warning", "border-danger"];
/// Every text class the renderer may have applied to the message.
pub const TEXT_CLASSES: [&str; 3] = ["text-muted", "text-warning", "text-danger"];

/// Message and image shown for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub message: &'static str,
    pub image_path: &'static str,
}

/// CSS presentation applied for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub border_class: &'static str,
    pub text_class: &'static str,
    pub image_filter: &'static str,
}

/// One immutable row of the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    pub tag: MotionTag,
    pub display: StatusDisplay,
    pub style: StatusStyle,
}

static STATUS_TABLE: [StatusPresentation; 3] = [
    StatusPresentation {
        tag: MotionTag::Inactive,
        display: StatusDisplay {
            message: "has not been around the door!",
            image_path: "/static/images/inactive_dog.png",
        },
        style: StatusStyle {
            border_class: "border-secondary",
            text_class: "text-muted",
            image_filter: "grayscale(100%) brightness(75%)",
        },
    },
    StatusPresentation {
        tag: MotionTag::Detected,
        display: StatusDisplay {
            message: "is around the door. Be ready!",
            image_path: "/static/images/happy_dog.png",
        },
        style: StatusStyle {
            border_class: "border-warning",
            text_class: "text-warning",
            image_filter: "grayscale(20%) brightness(95%)",
        },
    },
    StatusPresentation {
        tag: MotionTag::Potty,
        display: StatusDisplay {
            message: "is waiting to go out!",
            image_path: "/static/images/need_potty.png",
        },
        style: StatusStyle {
            border_class: "border-danger",
            text_class: "text-danger",
            image_filter: "grayscale(0%) brightness(100%)",
        },
    },
];

impl MotionTag {
    /// The table row for this tag.
    #[must_use]
    pub fn presentation(self) -> &'static StatusPresentation {
        match self {
            Self::Inactive => &STATUS_TABLE[0],
            Self::Detected => &STATUS_TABLE[1],
            Self::Potty => &STATUS_TABLE[2],
        }
    }
}

/// Whether `tag` has an entry in the table.
#[must_use]
pub fn contains(tag: &str) -> bool {
    lookup(tag).is_some()
}

/// Look up the presentation for a raw tag; `None` for unknown tags.
#[must_use]
pub fn lookup(tag: &str) -> Option<&'static StatusPresentation> {
    tag.parse::<MotionTag>().ok().map(MotionTag::presentation)
}

/// `(message, image_path)` for a raw tag.
#[must_use]
pub fn lookup_display(tag: &str) -> Option<StatusDisplay> {
    lookup(tag).map(|row| row.display)
}

/// CSS presentation for a raw tag.
#[must_use]
pub fn lookup_style(tag: &str) -> Option<StatusStyle> {
    lookup(tag).map(|row| row.style)
}

/// Presentation for a channel payload, when it carries a known motion tag.
#[must_use]
pub fn for_payload(payload: &serde_json::Value) -> Option<&'static StatusPresentation> {
    MotionEvent::from_payload(payload).and_then(|event| lookup(&event.motion))
}
