//! The quest being edited.
//!
//! A `QuestRecord` owns the 24 scalar fields (kept as raw text, exactly as the
//! user typed them) and the three ordered sub-record sequences. Nothing here
//! checks values; integer coercion happens when the record is encoded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::FIELD_COUNT;
use crate::{
    Condition, Goal, QuestField, RecordError, Reward, SequenceKind, ValidationError, parse_basic_value,
    sample_conditions, sample_goals, sample_rewards,
};

/// Raw text of every scalar field, indexed by [`QuestField::index`].
///
/// Persisted as a name-to-text table. Unknown names are rejected on load and
/// missing names load as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
struct FieldValues([String; FIELD_COUNT]);

impl FieldValues {
    fn defaults() -> Self {
        Self(QuestField::ALL.map(|field| field.default_value().to_string()))
    }
}

impl TryFrom<BTreeMap<String, String>> for FieldValues {
    type Error = RecordError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut values: [String; FIELD_COUNT] = Default::default();
        for (name, text) in map {
            let field: QuestField = name.parse()?;
            values[field.index()] = text;
        }
        Ok(Self(values))
    }
}

impl From<FieldValues> for BTreeMap<String, String> {
    fn from(values: FieldValues) -> Self {
        QuestField::ALL
            .into_iter()
            .zip(values.0)
            .map(|(field, text)| (field.name().to_string(), text))
            .collect()
    }
}

/// One quest: scalar fields plus conditions, goals and rewards in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRecord {
    fields: FieldValues,
    #[serde(default)]
    conditions: Vec<Condition>,
    #[serde(default)]
    goals: Vec<Goal>,
    #[serde(default)]
    rewards: Vec<Reward>,
}

impl Default for QuestRecord {
    fn default() -> Self {
        Self {
            fields: FieldValues::defaults(),
            conditions: Vec::new(),
            goals: Vec::new(),
            rewards: Vec::new(),
        }
    }
}

impl QuestRecord {
    /// A record whose scalar fields are all empty and whose sequences are empty.
    ///
    /// This is the starting point for decoding: any element missing from a
    /// document leaves its field empty.
    pub fn blank() -> Self {
        Self {
            fields: FieldValues(Default::default()),
            ..Self::default()
        }
    }

    /// Default fields plus the sample conditions, goals and rewards.
    pub fn sample() -> Self {
        let mut record = Self::default();
        record.load_sample();
        record
    }

    /// Replace all three sequences with the sample content; scalar fields are kept.
    pub fn load_sample(&mut self) {
        self.conditions = sample_conditions();
        self.goals = sample_goals();
        self.rewards = sample_rewards();
    }

    /// Restore every scalar field to its default and empty all sequences.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ---- scalar fields ----

    pub fn value(&self, field: QuestField) -> &str {
        &self.fields.0[field.index()]
    }

    pub fn set(&mut self, field: QuestField, text: impl Into<String>) {
        self.fields.0[field.index()] = text.into();
    }

    /// Current text of the field called `name`.
    pub fn get_field(&self, name: &str) -> Result<&str, RecordError> {
        let field: QuestField = name.parse()?;
        Ok(self.value(field))
    }

    /// Store raw text for the field called `name`. The text is not checked here.
    pub fn set_field(&mut self, name: &str, text: impl Into<String>) -> Result<(), RecordError> {
        let field: QuestField = name.parse()?;
        self.set(field, text);
        Ok(())
    }

    /// Integer value of a basic field as it will be encoded.
    pub fn basic_value(&self, field: QuestField) -> Result<i64, ValidationError> {
        parse_basic_value(field, self.value(field))
    }

    /// Default file name for saving this quest: `Quest_{UniqID}_{TitleTab}.xml`.
    pub fn suggested_file_name(&self) -> String {
        let title: String = self
            .value(QuestField::TitleTab)
            .trim()
            .chars()
            .map(|c| if matches!(c, ' ' | '/' | '\\') { '_' } else { c })
            .collect();
        format!("Quest_{}_{}.xml", self.value(QuestField::UniqId).trim(), title)
    }

    // ---- sequences ----

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    /// Lengths of the condition, goal and reward sequences.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.conditions.len(), self.goals.len(), self.rewards.len())
    }

    pub fn append_condition(&mut self, condition: Condition) -> usize {
        push(&mut self.conditions, condition)
    }

    pub fn append_goal(&mut self, goal: Goal) -> usize {
        push(&mut self.goals, goal)
    }

    pub fn append_reward(&mut self, reward: Reward) -> usize {
        push(&mut self.rewards, reward)
    }

    pub fn replace_condition(&mut self, index: usize, condition: Condition) -> Result<(), RecordError> {
        replace_at(&mut self.conditions, SequenceKind::Condition, index, condition)
    }

    pub fn replace_goal(&mut self, index: usize, goal: Goal) -> Result<(), RecordError> {
        replace_at(&mut self.goals, SequenceKind::Goal, index, goal)
    }

    pub fn replace_reward(&mut self, index: usize, reward: Reward) -> Result<(), RecordError> {
        replace_at(&mut self.rewards, SequenceKind::Reward, index, reward)
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<Condition, RecordError> {
        remove_at(&mut self.conditions, SequenceKind::Condition, index)
    }

    pub fn remove_goal(&mut self, index: usize) -> Result<Goal, RecordError> {
        remove_at(&mut self.goals, SequenceKind::Goal, index)
    }

    pub fn remove_reward(&mut self, index: usize) -> Result<Reward, RecordError> {
        remove_at(&mut self.rewards, SequenceKind::Reward, index)
    }
}

fn push<T>(items: &mut Vec<T>, value: T) -> usize {
    items.push(value);
    items.len() - 1
}

fn replace_at<T>(items: &mut [T], kind: SequenceKind, index: usize, value: T) -> Result<(), RecordError> {
    let len = items.len();
    let slot = items
        .get_mut(index)
        .ok_or(RecordError::IndexOutOfRange { kind, index, len })?;
    *slot = value;
    Ok(())
}

fn remove_at<T>(items: &mut Vec<T>, kind: SequenceKind, index: usize) -> Result<T, RecordError> {
    if index >= items.len() {
        return Err(RecordError::IndexOutOfRange {
            kind,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i64) -> Goal {
        Goal {
            goal_type: 4,
            goal_id: id,
            goal_amount: 1,
            ..Goal::default()
        }
    }

    #[test]
    fn defaults_match_catalogue() {
        let record = QuestRecord::default();
        assert_eq!(record.get_field("UniqID"), Ok("2886"));
        assert_eq!(record.get_field("StartTargetID"), Ok("93610"));
        assert_eq!(record.get_field("TitleTab"), Ok("Silver Lake"));
        assert_eq!(record.counts(), (0, 0, 0));
    }

    #[test]
    fn unknown_field_names_are_rejected() {
        let mut record = QuestRecord::default();
        assert_eq!(
            record.get_field("Goals"),
            Err(RecordError::UnknownField("Goals".into()))
        );
        assert!(record.set_field("uniqid", "1").is_err());
        assert_eq!(record.get_field("UniqID"), Ok("2886"));
    }

    #[test]
    fn set_field_stores_raw_text() {
        let mut record = QuestRecord::default();
        record.set_field("Level", "not yet").expect("known field");
        assert_eq!(record.value(QuestField::Level), "not yet");
        assert!(record.basic_value(QuestField::Level).is_err());
    }

    #[test]
    fn append_returns_new_index() {
        let mut record = QuestRecord::default();
        assert_eq!(record.append_condition(Condition::new(1, 30, 0)), 0);
        assert_eq!(record.append_condition(Condition::new(3, 44, 0)), 1);
        assert_eq!(record.append_reward(Reward::money(0, 800)), 0);
        assert_eq!(record.counts(), (2, 0, 1));
    }

    #[test]
    fn replace_keeps_position() {
        let mut record = QuestRecord::default();
        for id in [10, 20, 30] {
            record.append_goal(goal(id));
        }
        record.replace_goal(1, goal(99)).expect("in range");
        let ids: Vec<i64> = record.goals().iter().map(|g| g.goal_id).collect();
        assert_eq!(ids, vec![10, 99, 30]);
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut record = QuestRecord::default();
        for id in [10, 20, 30] {
            record.append_goal(goal(id));
        }
        let removed = record.remove_goal(0).expect("in range");
        assert_eq!(removed.goal_id, 10);
        let ids: Vec<i64> = record.goals().iter().map(|g| g.goal_id).collect();
        assert_eq!(ids, vec![20, 30]);
    }

    #[test]
    fn out_of_range_is_never_clamped() {
        let mut record = QuestRecord::default();
        record.append_condition(Condition::new(1, 30, 0));
        assert_eq!(
            record.replace_condition(1, Condition::default()),
            Err(RecordError::IndexOutOfRange {
                kind: SequenceKind::Condition,
                index: 1,
                len: 1,
            })
        );
        assert!(record.remove_reward(0).is_err());
        assert_eq!(record.conditions(), &[Condition::new(1, 30, 0)]);
    }

    #[test]
    fn reset_restores_defaults_and_clears_sequences() {
        let mut record = QuestRecord::sample();
        record.set(QuestField::UniqId, "1");
        record.set(QuestField::Expert, "tips");
        record.reset();
        assert_eq!(record, QuestRecord::default());
    }

    #[test]
    fn load_sample_keeps_scalar_fields() {
        let mut record = QuestRecord::default();
        record.set(QuestField::UniqId, "4000");
        record.append_goal(goal(1));
        record.load_sample();
        assert_eq!(record.value(QuestField::UniqId), "4000");
        assert_eq!(record.counts(), (2, 1, 2));
        assert_eq!(record.rewards()[1].reward_item, 400_000);
    }

    #[test]
    fn suggested_file_name_sanitises_title() {
        let mut record = QuestRecord::default();
        assert_eq!(record.suggested_file_name(), "Quest_2886_Silver_Lake.xml");
        record.set(QuestField::TitleTab, "A/B\\C D");
        assert_eq!(record.suggested_file_name(), "Quest_2886_A_B_C_D.xml");
    }

    #[test]
    fn persists_through_toml() {
        let mut record = QuestRecord::sample();
        record.set(QuestField::Simple, "line one\nline two");
        let text = toml::to_string_pretty(&record).expect("serialize");
        let back: QuestRecord = toml::from_str(&text).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn persisted_unknown_field_is_an_error() {
        let text = "[fields]\nUniqID = \"1\"\nBogus = \"2\"\n";
        let err = toml::from_str::<QuestRecord>(text).expect_err("unknown field");
        assert!(err.to_string().contains("Bogus"), "{err}");
    }

    #[test]
    fn persisted_missing_fields_load_empty() {
        let text = "[fields]\nUniqID = \"77\"\n";
        let record: QuestRecord = toml::from_str(text).expect("deserialize");
        assert_eq!(record.value(QuestField::UniqId), "77");
        assert_eq!(record.value(QuestField::Level), "");
        assert_eq!(record.counts(), (0, 0, 0));
    }
}
