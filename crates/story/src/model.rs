//! Decoded story records.
//!
//! Records are built once per decode call and never mutated afterwards.
//! Optional fields serialize only when present, so an absent value is never
//! confused with zero downstream.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dictionary::EVENT_KINDS;
use crate::quantized::Quantized;

/// 7 days × 24 hours.
pub const HEATMAP_LEN: usize = 168;

/// Axis names of a session fingerprint vector, in wire order.
pub const FINGERPRINT_DIMENSIONS: [&str; 8] = [
    "length",
    "intensity",
    "autonomy",
    "night",
    "weekend",
    "focus",
    "breadth",
    "iteration",
];

/// A V1 or V2 story. V2 labels are resolved through the dictionaries before
/// the record is built, so both versions share this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyStory {
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub projects: i64,
    pub sessions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<i64>,
    pub hours: f64,
    pub days: i64,
    pub traits: Vec<String>,
    pub collaboration_style: String,
    pub work_pace: String,
    pub peak_project: String,
    pub peak_project_messages: i64,
    pub max_concurrent: i64,
    pub longest_session_hours: f64,
    pub monthly_activity: [i64; 12],
    pub top_projects: Vec<LegacyProject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyProject {
    pub name: String,
    pub messages: i64,
    pub days: i64,
}

/// The current story format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryV3 {
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub projects: i64,
    pub sessions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<i64>,
    pub hours: f64,
    pub days: i64,
    /// Activity by weekday (Sunday first) and hour; index is `day * 24 + hour`.
    pub heatmap: Vec<i64>,
    pub monthly_activity: [i64; 12],
    pub monthly_hours: [f64; 12],
    pub monthly_sessions: [i64; 12],
    pub session_durations: [i64; 10],
    pub agent_ratios: [i64; 10],
    pub message_lengths: [i64; 8],
    pub trait_scores: TraitScores,
    pub top_projects: Vec<Project>,
    pub co_occurrence: Vec<ProjectLink>,
    pub timeline: Vec<TimelineEvent>,
    pub fingerprints: Vec<SessionFingerprint>,
    pub longest_session_hours: f64,
    pub streaks: Streaks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_over_year: Option<YearOverYear>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    pub name: String,
    pub messages: i64,
    pub hours: f64,
    pub days: i64,
    pub sessions: i64,
    pub agent_ratio: Quantized,
}

/// Two top projects worked on during the same days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectLink {
    pub project_a: usize,
    pub project_b: usize,
    pub shared_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    /// Day of year, zero based.
    pub day: i64,
    /// Raw kind index; unknown kinds are preserved, see [`TimelineEvent::kind_label`].
    #[serde(rename = "type")]
    pub kind: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_index: Option<usize>,
}

impl TimelineEvent {
    pub fn kind_label(&self) -> Option<&'static str> {
        usize::try_from(self.kind)
            .ok()
            .and_then(|i| EVENT_KINDS.get(i))
            .copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionFingerprint {
    /// Minutes.
    pub duration: i64,
    pub messages: i64,
    pub is_agent: bool,
    pub hour: i64,
    pub weekday: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_index: Option<usize>,
    /// One score per [`FINGERPRINT_DIMENSIONS`] entry.
    pub fingerprint: [Quantized; 8],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    pub longest: i64,
    pub current: i64,
    pub longest_gap: i64,
    pub weekend_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub total: i64,
    pub input: i64,
    pub output: i64,
    pub cache_read: i64,
    pub cache_create: i64,
    pub models: BTreeMap<String, i64>,
}

/// Previous-year totals used for year-over-year comparisons.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearOverYear {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    pub messages: i64,
    pub hours: f64,
    pub sessions: i64,
    pub projects: i64,
    pub days: i64,
}

macro_rules! trait_kinds {
    ($($variant:ident => $field:ident, $key:literal, [$low:literal, $mid:literal, $high:literal];)*) => {
        /// The ten scored behaviour traits.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TraitKind {
            $($variant,)*
        }

        impl TraitKind {
            pub const ALL: [TraitKind; 10] = [$(TraitKind::$variant,)*];

            /// Short key used in the wire map.
            pub fn wire_key(self) -> &'static str {
                match self {
                    $(TraitKind::$variant => $key,)*
                }
            }

            /// Long name, also accepted as a wire key.
            pub fn name(self) -> &'static str {
                match self {
                    $(TraitKind::$variant => stringify!($field),)*
                }
            }

            /// Labels for low, middling and high scores.
            pub(crate) fn labels(self) -> [&'static str; 3] {
                match self {
                    $(TraitKind::$variant => [$low, $mid, $high],)*
                }
            }
        }

        /// Behaviour trait scores, each in `0..=100`.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
        pub struct TraitScores {
            $(pub $field: Quantized,)*
        }

        impl TraitScores {
            pub fn get(&self, kind: TraitKind) -> Quantized {
                match kind {
                    $(TraitKind::$variant => self.$field,)*
                }
            }

            pub(crate) fn set(&mut self, kind: TraitKind, score: Quantized) {
                match kind {
                    $(TraitKind::$variant => self.$field = score,)*
                }
            }
        }
    };
}

trait_kinds! {
    Delegation => delegation, "dl", ["Hands-On", "Collaborative", "Delegator"];
    DeepWork => deep_work, "dw", ["Quick Hits", "Focused", "Deep Diver"];
    Breadth => breadth, "br", ["Specialist", "Versatile", "Polyglot"];
    NightOwl => night_owl, "no", ["Early Bird", "Daytime", "Night Owl"];
    ContextSwitching => context_switching, "cx", ["Single-Tasker", "Juggler", "Multitasker"];
    AgentUsage => agent_usage, "ag", ["Solo", "Assisted", "Agent Orchestrator"];
    Iteration => iteration, "it", ["One-Shot", "Refiner", "Iterator"];
    Planning => planning, "pl", ["Improviser", "Pragmatist", "Planner"];
    Consistency => consistency, "cs", ["Sporadic", "Regular", "Metronome"];
    Burstiness => burstiness, "bu", ["Steady", "Rhythmic", "Bursty"];
}

impl TraitScores {
    /// Scores paired with their trait, in [`TraitKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, Quantized)> + '_ {
        TraitKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// A decoded story of any supported version.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VersionedStory {
    V1(LegacyStory),
    V2(LegacyStory),
    V3(StoryV3),
}

impl VersionedStory {
    /// Version tag read from the wire.
    pub fn version_tag(&self) -> i64 {
        match self {
            VersionedStory::V1(story) | VersionedStory::V2(story) => story.version,
            VersionedStory::V3(story) => story.version,
        }
    }

    pub fn year(&self) -> Option<i64> {
        match self {
            VersionedStory::V1(story) | VersionedStory::V2(story) => story.year,
            VersionedStory::V3(story) => story.year,
        }
    }

    pub fn messages(&self) -> Option<i64> {
        match self {
            VersionedStory::V1(story) | VersionedStory::V2(story) => story.messages,
            VersionedStory::V3(story) => story.messages,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            VersionedStory::V1(story) | VersionedStory::V2(story) => story.name.as_deref(),
            VersionedStory::V3(story) => story.name.as_deref(),
        }
    }

    pub fn as_v3(&self) -> Option<&StoryV3> {
        match self {
            VersionedStory::V3(story) => Some(story),
            _ => None,
        }
    }
}

impl From<StoryV3> for VersionedStory {
    fn from(story: StoryV3) -> Self {
        VersionedStory::V3(story)
    }
}
