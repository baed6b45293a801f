//! The fixed catalogue of scalar quest fields.
//!
//! Every quest document carries the same 24 scalar elements in the same order:
//! 16 integer-valued "basic" fields followed by 8 free-text fields. The element
//! names are case-sensitive and consumed verbatim by the game engine.

use std::fmt;
use std::str::FromStr;

use crate::RecordError;

/// Number of scalar fields on every quest.
pub const FIELD_COUNT: usize = 24;

/// How a scalar field is interpreted at the document boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Edited as text, written as a base-10 integer.
    Basic,
    /// Free-form text, written unmodified.
    Text,
}

/// One of the fixed scalar fields, declared in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestField {
    UniqId,
    Model,
    Model2,
    Level,
    Pos,
    Pos2,
    ManagedId,
    Active,
    Unknown,
    Immediate,
    ResetQuest,
    Type,
    StartTargetType,
    StartTargetId,
    Target,
    TargetValue,
    TitleTab,
    TitleText,
    Body,
    Simple,
    Helper,
    Process,
    Complete,
    Expert,
}

const SAMPLE_BODY: &str = "You haven't been explore to the whole area yet, have you? If you go farther to the right, you will see a high ground.\n\nTalk to the Terriermon there, and he'll show you how to get to the top where you will be able to look down at the whole region.";
const SAMPLE_COMPLETE: &str = "There's nothing like the view from the top! If you have to get to a higher ground, you have come to the right Digimon!";

impl QuestField {
    /// The integer-valued fields, in document order.
    pub const BASIC: [QuestField; 16] = [
        QuestField::UniqId,
        QuestField::Model,
        QuestField::Model2,
        QuestField::Level,
        QuestField::Pos,
        QuestField::Pos2,
        QuestField::ManagedId,
        QuestField::Active,
        QuestField::Unknown,
        QuestField::Immediate,
        QuestField::ResetQuest,
        QuestField::Type,
        QuestField::StartTargetType,
        QuestField::StartTargetId,
        QuestField::Target,
        QuestField::TargetValue,
    ];

    /// The free-text fields, in document order.
    pub const TEXT: [QuestField; 8] = [
        QuestField::TitleTab,
        QuestField::TitleText,
        QuestField::Body,
        QuestField::Simple,
        QuestField::Helper,
        QuestField::Process,
        QuestField::Complete,
        QuestField::Expert,
    ];

    /// Every scalar field, basic fields first.
    pub const ALL: [QuestField; FIELD_COUNT] = [
        QuestField::UniqId,
        QuestField::Model,
        QuestField::Model2,
        QuestField::Level,
        QuestField::Pos,
        QuestField::Pos2,
        QuestField::ManagedId,
        QuestField::Active,
        QuestField::Unknown,
        QuestField::Immediate,
        QuestField::ResetQuest,
        QuestField::Type,
        QuestField::StartTargetType,
        QuestField::StartTargetId,
        QuestField::Target,
        QuestField::TargetValue,
        QuestField::TitleTab,
        QuestField::TitleText,
        QuestField::Body,
        QuestField::Simple,
        QuestField::Helper,
        QuestField::Process,
        QuestField::Complete,
        QuestField::Expert,
    ];

    /// Element name used in quest documents.
    pub fn name(self) -> &'static str {
        match self {
            QuestField::UniqId => "UniqID",
            QuestField::Model => "Model",
            QuestField::Model2 => "Model2",
            QuestField::Level => "Level",
            QuestField::Pos => "Pos",
            QuestField::Pos2 => "Pos2",
            QuestField::ManagedId => "ManagedID",
            QuestField::Active => "Active",
            QuestField::Unknown => "Unknown",
            QuestField::Immediate => "Immediate",
            QuestField::ResetQuest => "ResetQuest",
            QuestField::Type => "Type",
            QuestField::StartTargetType => "StartTargetType",
            QuestField::StartTargetId => "StartTargetID",
            QuestField::Target => "Target",
            QuestField::TargetValue => "TargetValue",
            QuestField::TitleTab => "TitleTab",
            QuestField::TitleText => "TitleText",
            QuestField::Body => "Body",
            QuestField::Simple => "Simple",
            QuestField::Helper => "Helper",
            QuestField::Process => "Process",
            QuestField::Complete => "Complete",
            QuestField::Expert => "Expert",
        }
    }

    pub fn kind(self) -> FieldKind {
        if self.index() < Self::BASIC.len() {
            FieldKind::Basic
        } else {
            FieldKind::Text
        }
    }

    /// Position of this field in [`QuestField::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Value a fresh or reset quest starts with.
    pub fn default_value(self) -> &'static str {
        match self {
            QuestField::UniqId => "2886",
            QuestField::Level => "30",
            QuestField::Pos => "5",
            QuestField::Active | QuestField::Type | QuestField::Target => "1",
            QuestField::StartTargetId => "93610",
            QuestField::TargetValue => "93613",
            QuestField::Model
            | QuestField::Model2
            | QuestField::Pos2
            | QuestField::ManagedId
            | QuestField::Unknown
            | QuestField::Immediate
            | QuestField::ResetQuest
            | QuestField::StartTargetType => "0",
            QuestField::TitleTab => "Silver Lake",
            QuestField::TitleText => "View from the Top",
            QuestField::Body => SAMPLE_BODY,
            QuestField::Helper => "Speak with Terriermon",
            QuestField::Process => "Go on, then. Fly away like me!",
            QuestField::Complete => SAMPLE_COMPLETE,
            QuestField::Simple | QuestField::Expert => "",
        }
    }
}

impl fmt::Display for QuestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuestField {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| RecordError::UnknownField(s.to_string()))
    }
}
