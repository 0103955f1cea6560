//! Support channel routing.
//!
//! Channels carry a recent-activity counter updated out of band; routing
//! turns the counters into a traffic share per channel plus a binary
//! fast/busy label, so the user can pick a quiet channel. Ranking is pure:
//! it never mutates the counters and returns channels in the order the
//! configuration supplied them.

use serde::Serialize;

use studykart_core::ChannelId;

use crate::models::catalog::SupportChannel;

/// Traffic share at or above which a channel is labelled busy, in percent.
const BUSY_THRESHOLD_PERCENT: u64 = 30;

/// Synthesized when the admin has not published any support channels.
fn default_channel() -> SupportChannel {
    SupportChannel {
        id: ChannelId::new("def"),
        name: "Main Support".to_string(),
        number: "8227070298".to_string(),
        daily_clicks: 0,
    }
}

/// Binary load label for a support channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLabel {
    Fast,
    Busy,
}

impl TrafficLabel {
    /// Label text as shown in the channel picker.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Fast => "✅ Fast Response",
            Self::Busy => "⚠️ High Traffic",
        }
    }
}

/// A support channel annotated with its traffic share.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedChannel {
    #[serde(flatten)]
    pub channel: SupportChannel,
    /// This channel's share of all recent clicks, rounded to whole percent.
    pub traffic_percent: u64,
    pub label: TrafficLabel,
}

/// Annotate channels with traffic share and load labels.
///
/// An empty list resolves to the single built-in default channel. The
/// share divisor has a floor of one, so a zero-traffic list reports 0%
/// rather than dividing by zero. No sort is applied.
#[must_use]
pub fn rank_channels(channels: &[SupportChannel]) -> Vec<RankedChannel> {
    let channels = if channels.is_empty() {
        vec![default_channel()]
    } else {
        channels.to_vec()
    };

    let total_clicks: u64 = channels.iter().map(|c| c.daily_clicks).sum();
    let divisor = total_clicks.max(1);

    channels
        .into_iter()
        .map(|channel| {
            let traffic_percent = traffic_share(channel.daily_clicks, divisor);
            let label = if traffic_percent < BUSY_THRESHOLD_PERCENT {
                TrafficLabel::Fast
            } else {
                TrafficLabel::Busy
            };

            RankedChannel {
                channel,
                traffic_percent,
                label,
            }
        })
        .collect()
}

/// Percentage of `clicks` over `divisor`, rounded half-up.
const fn traffic_share(clicks: u64, divisor: u64) -> u64 {
    (clicks * 100 + divisor / 2) / divisor
}
