//! Action bindings derived from rendered elements.
//!
//! Every re-render of a region replaces that region's bindings wholesale, so
//! a row rendered twice never ends up with two handlers.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::element::Element;
use crate::surface::Region;

/// Attribute carrying the action name on a button.
pub const ACTION_ATTR: &str = "data-action";

/// Attribute carrying an owned file's id.
pub const FILE_ID_ATTR: &str = "data-file-id";

/// Attribute carrying an inbound share's id.
pub const SHARE_ID_ATTR: &str = "data-shared-file-id";

/// A user-triggerable action on a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Save an owned file locally.
    Download,
    /// Start the share workflow for an owned file.
    Share,
    /// Delete an owned file.
    Delete,
    /// Accept an inbound share.
    Accept,
    /// Reject an inbound share.
    Reject,
}

impl Action {
    /// All actions, in menu order.
    pub const ALL: [Action; 5] = [
        Self::Download,
        Self::Share,
        Self::Delete,
        Self::Accept,
        Self::Reject,
    ];

    /// Value of the `data-action` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Share => "share",
            Self::Delete => "delete",
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }

    /// Parse a `data-action` value.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == raw)
    }

    /// Attribute holding the target id for this action.
    pub fn target_attr(self) -> &'static str {
        match self {
            Self::Download | Self::Share | Self::Delete => FILE_ID_ATTR,
            Self::Accept | Self::Reject => SHARE_ID_ATTR,
        }
    }

    /// Region whose rows carry this action.
    pub fn region(self) -> Region {
        match self {
            Self::Download | Self::Share | Self::Delete => Region::FileList,
            Self::Accept | Self::Reject => Region::SharedList,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attached handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// What the handler does.
    pub action: Action,
    /// Target id exactly as rendered; may be empty or non-numeric.
    pub target: String,
    /// Human-readable label (the button's `aria-label`).
    pub label: String,
}

/// Bindings for every region, one per rendered button.
#[derive(Debug, Default)]
pub struct ActionBindings {
    by_region: HashMap<Region, Vec<Binding>>,
}

impl ActionBindings {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach everything bound for `region`, then attach one binding per
    /// `data-action` button found in `root`. Returns the number attached.
    pub fn rebind(&mut self, region: Region, root: &Element) -> usize {
        let mut attached: Vec<Binding> = Vec::new();

        for el in root.descendants() {
            let Some(action) = el.get_attr(ACTION_ATTR).and_then(Action::parse) else {
                continue;
            };
            let target = el.get_attr(action.target_attr()).unwrap_or_default();
            attached.push(Binding {
                action,
                target: target.to_string(),
                label: el
                    .get_attr("aria-label")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{action} {target}")),
            });
        }

        let count = attached.len();
        let previous = self.by_region.insert(region, attached).map_or(0, |v| v.len());
        debug!(region = %region, detached = previous, attached = count, "Rebound actions");
        count
    }

    /// Drop the binding for one target in `region`, e.g. after a row is removed.
    pub fn unbind_target(&mut self, region: Region, target: &str) {
        if let Some(bindings) = self.by_region.get_mut(&region) {
            bindings.retain(|b| b.target != target);
        }
    }

    /// Bindings of one region in render order.
    pub fn region(&self, region: Region) -> &[Binding] {
        self.by_region.get(&region).map_or(&[], Vec::as_slice)
    }

    /// Every binding, file list first.
    pub fn all(&self) -> Vec<Binding> {
        [Region::FileList, Region::SharedList]
            .into_iter()
            .flat_map(|region| self.region(region).iter().cloned())
            .collect()
    }

    /// Look up the binding for `(action, target)`.
    pub fn find(&self, action: Action, target: &str) -> Option<&Binding> {
        self.region(action.region())
            .iter()
            .find(|b| b.action == action && b.target == target)
    }

    /// Total number of bindings.
    pub fn len(&self) -> usize {
        self.by_region.values().map(Vec::len).sum()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
