use quest_data::{QuestField, Reward};
use quest_xml::{CodecError, decode_str};

#[test]
fn external_document_decodes_leniently() {
    let record = decode_str(include_str!("fixtures/quest_lenient.xml")).expect("decode ok");

    assert_eq!(record.value(QuestField::UniqId), "4100");
    // scalar text is kept raw; coercion happens on encode
    assert_eq!(record.value(QuestField::Level), " 12 ");
    assert_eq!(record.basic_value(QuestField::Level), Ok(12));
    assert_eq!(record.value(QuestField::Body), "First line\nsecond line");
    assert_eq!(record.value(QuestField::Model), "");
    assert_eq!(record.value(QuestField::Expert), "");

    // stated counts are ignored, missing groups are empty
    assert!(record.conditions().is_empty());
    assert!(record.goals().is_empty());
    assert_eq!(
        record.rewards(),
        &[
            Reward {
                reward: 2,
                reward_type: 0,
                reward_money: 1500,
                reward_item: 31,
                reward_amount: 2,
            },
            Reward {
                reward: 0,
                reward_type: 5,
                ..Reward::default()
            },
            Reward {
                reward: 1,
                reward_type: 1,
                reward_money: 0,
                reward_item: 0,
                reward_amount: 4,
            },
        ]
    );
}

#[test]
fn decoded_external_document_reencodes_by_discriminant() {
    let record = decode_str(include_str!("fixtures/quest_lenient.xml")).expect("decode ok");
    let xml = quest_xml::encode_to_string(&record).expect("encode ok");
    assert!(xml.contains("<Level>12</Level>"));
    assert!(xml.contains("<Model>0</Model>"));
    assert!(xml.contains("<RewardNumber>3</RewardNumber>"));
    assert!(xml.contains("<condition>0</condition>"));
    // the money reward drops its stray item branch
    assert!(!xml.contains("<RewardItem>31</RewardItem>"));
    assert!(xml.contains("<RewardMoney>1500</RewardMoney>"));
}

#[test]
fn unbalanced_document_is_rejected() {
    let src = "<QuestInfo>\n  <QuestGoals>\n    <QuestGoal>\n  </QuestGoals>\n</QuestInfo>";
    assert!(matches!(decode_str(src), Err(CodecError::MalformedDocument(_))));
}

#[test]
fn empty_root_is_a_valid_empty_quest() {
    let record = decode_str("<QuestInfo/>").expect("decode ok");
    assert_eq!(record.counts(), (0, 0, 0));
    assert!(QuestField::ALL.iter().all(|f| record.value(*f).is_empty()));
}
