// ── Channel suggestions ──
//
// Proposes channel rows from an EEP profile's declared channel range.
// A profile without a usable range yields an empty suggestion, never an
// error.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::model::ProfileCatalog;

/// Upper bound on generated rows, guarding against absurd declared ranges.
pub const MAX_SUGGESTED_CHANNELS: usize = 256;

/// Default label for a suggested or freshly added channel row.
pub fn default_label(channel: impl fmt::Display) -> String {
    format!("Channel {channel}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedChannel {
    pub channel: u32,
    pub label: String,
}

impl SuggestedChannel {
    pub fn new(channel: u32) -> Self {
        Self {
            channel,
            label: default_label(channel),
        }
    }
}

/// Ordered channel rows proposed for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSuggestion {
    pub profile: String,
    pub channels: Vec<SuggestedChannel>,
}

impl ChannelSuggestion {
    pub fn empty(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            channels: Vec::new(),
        }
    }

    /// Build from bare channel numbers (the add-on's own suggestion
    /// endpoint). Numbers that cannot be a channel are dropped.
    pub fn from_numbers(profile: impl Into<String>, numbers: impl IntoIterator<Item = i64>) -> Self {
        let channels = numbers
            .into_iter()
            .filter_map(|n| u32::try_from(n).ok())
            .take(MAX_SUGGESTED_CHANNELS)
            .map(SuggestedChannel::new)
            .collect();
        Self {
            profile: profile.into(),
            channels,
        }
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.channels.iter().map(|c| c.channel).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

/// Suggest channels for `profile_id` from a fetched catalog.
///
/// Returns the inclusive ascending enumeration of the profile's
/// `channel_min..=channel_max`. Unknown profiles, missing bounds and
/// reversed ranges give an empty suggestion. Negative bounds are clipped
/// to zero.
pub fn suggest_channels(catalog: &ProfileCatalog, profile_id: &str) -> ChannelSuggestion {
    let Some(profile) = catalog.get(profile_id) else {
        info!(eep = profile_id, "unknown profile, no channel suggestions");
        return ChannelSuggestion::empty(profile_id);
    };
    let Some((min, max)) = profile.channel_range() else {
        info!(eep = %profile.eep, "profile declares no channel range, no suggestions");
        return ChannelSuggestion::empty(&profile.eep);
    };
    if min > max {
        info!(eep = %profile.eep, min, max, "profile channel range is reversed, no suggestions");
        return ChannelSuggestion::empty(&profile.eep);
    }

    let start = min.max(0);
    let end = max.min(i64::from(u32::MAX));
    if start > end {
        info!(eep = %profile.eep, min, max, "profile channel range is out of bounds, no suggestions");
        return ChannelSuggestion::empty(&profile.eep);
    }
    let span = usize::try_from(end.saturating_sub(start).saturating_add(1)).unwrap_or(usize::MAX);
    if span > MAX_SUGGESTED_CHANNELS {
        warn!(
            eep = %profile.eep,
            span,
            limit = MAX_SUGGESTED_CHANNELS,
            "channel range truncated"
        );
    }

    let suggestion = ChannelSuggestion::from_numbers(&profile.eep, start..=end);
    info!(eep = %profile.eep, count = suggestion.len(), "suggested channels");
    suggestion
}
