//! Translation between [`QuestRecord`] and the `QuestInfo` document schema.

use log::debug;
use quest_data::{Condition, Goal, QuestField, QuestRecord, Reward, RewardPayload};

use crate::CodecError;
use crate::tree::XmlElement;

const ROOT: &str = "QuestInfo";

const CONDITION_COUNT: &str = "condition";
const CONDITIONS: &str = "QuestConditions";
const CONDITION: &str = "QuestCondition";

const GOAL_COUNT: &str = "Goals";
const GOALS: &str = "QuestGoals";
const GOAL: &str = "QuestGoal";

const REWARD_COUNT: &str = "RewardNumber";
const REWARDS: &str = "RewardQuantities";
const REWARD: &str = "RewardQuantity";
const REWARD_MONEY: &str = "QuestRewardMoney";
const REWARD_MONEY_ITEM: &str = "QuestRewardMoneyItem";
const REWARD_ITEMS: &str = "QuestRewardItems";
const REWARD_ITEMS_ITEM: &str = "QuestRewardItemsItem";

const QUEST_ITEMS: &str = "QuestItems";
const EVENT: &str = "Event";
const EVENT_ID: &str = "EventId";
const EVENT_SLOTS: usize = 4;

/// Build the `QuestInfo` document for `record`.
///
/// Elements are emitted in the fixed schema order. Grouping elements for empty
/// sequences are left out entirely, and each reward writes exactly one of its
/// money/item branches while the other stays an empty sibling.
///
/// Fails with [`CodecError::InvalidFieldValue`] on the first basic field whose
/// text is not an integer.
pub fn encode(record: &QuestRecord) -> Result<XmlElement, CodecError> {
    let mut root = XmlElement::new(ROOT);

    for field in QuestField::BASIC {
        let value = record.basic_value(field)?;
        root.push(int_leaf(field.name(), value));
    }
    for field in QuestField::TEXT {
        root.push(XmlElement::leaf(field.name(), record.value(field)));
    }

    let conditions = record.conditions();
    root.push(count_leaf(CONDITION_COUNT, conditions.len()));
    if !conditions.is_empty() {
        root.push(group(CONDITIONS, conditions.iter().map(encode_condition)));
    }

    let goals = record.goals();
    root.push(count_leaf(GOAL_COUNT, goals.len()));
    if !goals.is_empty() {
        root.push(group(GOALS, goals.iter().map(encode_goal)));
    }

    let rewards = record.rewards();
    root.push(count_leaf(REWARD_COUNT, rewards.len()));
    if !rewards.is_empty() {
        root.push(group(REWARDS, rewards.iter().map(encode_reward)));
    }

    root.push(XmlElement::new(QUEST_ITEMS));
    let mut event = XmlElement::new(EVENT);
    for _ in 0..EVENT_SLOTS {
        event.push(XmlElement::leaf(EVENT_ID, "0"));
    }
    root.push(event);

    Ok(root)
}

fn encode_condition(condition: &Condition) -> XmlElement {
    XmlElement::new(CONDITION)
        .with_child(int_leaf("ConditionType", condition.condition_type))
        .with_child(int_leaf("ConditionId", condition.condition_id))
        .with_child(int_leaf("ConditionCount", condition.condition_count))
}

fn encode_goal(goal: &Goal) -> XmlElement {
    XmlElement::new(GOAL)
        .with_child(int_leaf("GoalType", goal.goal_type))
        .with_child(int_leaf("GoalId", goal.goal_id))
        .with_child(int_leaf("GoalCount", goal.goal_count))
        .with_child(int_leaf("goalAmount", goal.goal_amount))
        .with_child(int_leaf("CurTypeCount", goal.cur_type_count))
        .with_child(int_leaf("SubValue", goal.sub_value))
        .with_child(int_leaf("SubValue1", goal.sub_value1))
}

fn encode_reward(reward: &Reward) -> XmlElement {
    let mut money = XmlElement::new(REWARD_MONEY);
    let mut items = XmlElement::new(REWARD_ITEMS);
    match reward.payload() {
        RewardPayload::Money { amount } => money.push(
            XmlElement::new(REWARD_MONEY_ITEM)
                .with_child(int_leaf("RewardMoney", amount))
                .with_child(XmlElement::leaf("RewardUnk", "0")),
        ),
        RewardPayload::Item { item, amount } => items.push(
            XmlElement::new(REWARD_ITEMS_ITEM)
                .with_child(int_leaf("RewardItem", item))
                .with_child(int_leaf("RewardAmount", amount)),
        ),
    }

    XmlElement::new(REWARD)
        .with_child(int_leaf("Reward", reward.reward))
        .with_child(int_leaf("RewardType", reward.reward_type))
        .with_child(money)
        .with_child(items)
}

fn group(name: &str, entries: impl Iterator<Item = XmlElement>) -> XmlElement {
    let mut element = XmlElement::new(name);
    element.children.extend(entries);
    element
}

fn int_leaf(name: &str, value: i64) -> XmlElement {
    XmlElement::leaf(name, value.to_string())
}

fn count_leaf(name: &str, count: usize) -> XmlElement {
    XmlElement::leaf(name, count.to_string())
}

/// Rebuild a [`QuestRecord`] from a parsed document.
///
/// Scalar fields take the raw text of their element, or stay empty when the
/// element is missing. Sequence leaves that are missing or not integers become
/// `0`. The count elements are ignored since counts are derived from the
/// sequences. Both reward branches are read whatever `RewardType` says.
pub fn decode(root: &XmlElement) -> QuestRecord {
    if root.name != ROOT {
        debug!("decoding quest from unexpected root element <{}>", root.name);
    }

    let mut record = QuestRecord::blank();
    for field in QuestField::ALL {
        if let Some(text) = root.child_text(field.name()) {
            record.set(field, text);
        }
    }

    if let Some(conditions) = root.child(CONDITIONS) {
        for entry in conditions.children_named(CONDITION) {
            record.append_condition(Condition {
                condition_type: int_child(entry, "ConditionType"),
                condition_id: int_child(entry, "ConditionId"),
                condition_count: int_child(entry, "ConditionCount"),
            });
        }
    }

    if let Some(goals) = root.child(GOALS) {
        for entry in goals.children_named(GOAL) {
            record.append_goal(Goal {
                goal_type: int_child(entry, "GoalType"),
                goal_id: int_child(entry, "GoalId"),
                goal_count: int_child(entry, "GoalCount"),
                goal_amount: int_child(entry, "goalAmount"),
                cur_type_count: int_child(entry, "CurTypeCount"),
                sub_value: int_child(entry, "SubValue"),
                sub_value1: int_child(entry, "SubValue1"),
            });
        }
    }

    if let Some(rewards) = root.child(REWARDS) {
        for entry in rewards.children_named(REWARD) {
            record.append_reward(decode_reward(entry));
        }
    }

    log_count_mismatch(root, CONDITION_COUNT, record.conditions().len());
    log_count_mismatch(root, GOAL_COUNT, record.goals().len());
    log_count_mismatch(root, REWARD_COUNT, record.rewards().len());

    record
}

fn decode_reward(entry: &XmlElement) -> Reward {
    let mut reward = Reward {
        reward: int_child(entry, "Reward"),
        reward_type: int_child(entry, "RewardType"),
        ..Reward::default()
    };

    if let Some(money) = entry.child(REWARD_MONEY).and_then(|m| m.child(REWARD_MONEY_ITEM)) {
        reward.reward_money = int_child(money, "RewardMoney");
    }
    if let Some(items) = entry.child(REWARD_ITEMS).and_then(|i| i.child(REWARD_ITEMS_ITEM)) {
        reward.reward_item = int_child(items, "RewardItem");
        reward.reward_amount = int_child(items, "RewardAmount");
    }
    reward
}

/// Integer value of a sequence leaf; missing or non-numeric text reads as 0.
fn int_child(parent: &XmlElement, name: &str) -> i64 {
    let Some(text) = parent.child_text(name) else {
        return 0;
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        debug!("<{}>/<{name}> is not an integer ('{trimmed}'), using 0", parent.name);
        0
    })
}

fn log_count_mismatch(root: &XmlElement, name: &str, actual: usize) {
    if let Some(text) = root.child_text(name)
        && text.trim() != actual.to_string()
    {
        debug!("<{name}> says '{}' but {actual} entries were decoded", text.trim());
    }
}
