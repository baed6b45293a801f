use serde::{Deserialize, Serialize};

/// Prerequisite a player must satisfy before the quest is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub condition_type: i64,
    pub condition_id: i64,
    pub condition_count: i64,
}

impl Condition {
    pub fn new(condition_type: i64, condition_id: i64, condition_count: i64) -> Self {
        Self {
            condition_type,
            condition_id,
            condition_count,
        }
    }
}

/// Objective tracked while the quest is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Goal {
    pub goal_type: i64,
    pub goal_id: i64,
    pub goal_count: i64,
    pub goal_amount: i64,
    pub cur_type_count: i64,
    pub sub_value: i64,
    pub sub_value1: i64,
}

/// Payout granted on completion.
///
/// All five leaves are kept in memory regardless of `reward_type`; only the
/// leaves selected by [`Reward::payload`] are written to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reward {
    pub reward: i64,
    pub reward_type: i64,
    pub reward_money: i64,
    pub reward_item: i64,
    pub reward_amount: i64,
}

/// What a reward actually pays out, selected by its `reward_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardPayload {
    Money { amount: i64 },
    Item { item: i64, amount: i64 },
}

impl Reward {
    /// Money reward (`reward_type` 0).
    pub fn money(reward: i64, amount: i64) -> Self {
        Self {
            reward,
            reward_type: 0,
            reward_money: amount,
            ..Self::default()
        }
    }

    /// Item reward; `reward_type` must be non-zero to be encoded as an item.
    pub fn item(reward: i64, reward_type: i64, item: i64, amount: i64) -> Self {
        Self {
            reward,
            reward_type,
            reward_item: item,
            reward_amount: amount,
            ..Self::default()
        }
    }

    pub fn payload(&self) -> RewardPayload {
        if self.reward_type == 0 {
            RewardPayload::Money {
                amount: self.reward_money,
            }
        } else {
            RewardPayload::Item {
                item: self.reward_item,
                amount: self.reward_amount,
            }
        }
    }
}

/// Conditions shipped with the editor as sample content.
pub fn sample_conditions() -> Vec<Condition> {
    vec![Condition::new(1, 30, 0), Condition::new(3, 44, 0)]
}

pub fn sample_goals() -> Vec<Goal> {
    vec![Goal {
        goal_type: 4,
        goal_id: 93609,
        goal_count: 0,
        goal_amount: 1,
        cur_type_count: 0,
        sub_value: 0,
        sub_value1: 0,
    }]
}

pub fn sample_rewards() -> Vec<Reward> {
    vec![Reward::money(0, 800), Reward::item(0, 1, 400_000, 0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_follows_discriminant_only() {
        let mut reward = Reward {
            reward: 2,
            reward_type: 0,
            reward_money: 800,
            reward_item: 55,
            reward_amount: 3,
        };
        assert_eq!(reward.payload(), RewardPayload::Money { amount: 800 });

        reward.reward_type = 7;
        assert_eq!(reward.payload(), RewardPayload::Item { item: 55, amount: 3 });
        // switching the discriminant never discards the other branch's values
        assert_eq!(reward.reward_money, 800);
    }

    #[test]
    fn constructors_fill_only_their_branch() {
        let money = Reward::money(0, 800);
        assert_eq!(money.reward_type, 0);
        assert_eq!((money.reward_item, money.reward_amount), (0, 0));

        let item = Reward::item(0, 1, 400_000, 1);
        assert_eq!(item.reward_money, 0);
        assert_eq!(item.payload(), RewardPayload::Item { item: 400_000, amount: 1 });
    }
}
