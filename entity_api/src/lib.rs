use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

pub use entity::{
    conversation_state, customer_status, customers, daily_devotion, devotional_plans,
    onboarding_step, plan_status, themes, Id,
};

pub mod customer;
pub mod devotional_plan;
pub mod error;

/// Seeds a demo customer with an in-flight 7-day plan. Development tooling
/// only; production records arrive from the upstream platform services.
pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();

    let demo_days: Vec<daily_devotion::DailyDevotion> = [
        (
            "Psalm 23:1",
            "The Lord is my shepherd; I shall not want.",
            "Rest begins with trusting the one who leads.",
            "Where do you most need to let someone else lead this week?",
        ),
        (
            "Isaiah 40:31",
            "They that wait upon the Lord shall renew their strength.",
            "Waiting is not wasted time.",
            "What are you waiting on right now, and how is it shaping you?",
        ),
        (
            "Philippians 4:6",
            "Be anxious for nothing, but in everything by prayer let your requests be made known.",
            "Anxiety shrinks when it is spoken aloud.",
            "Name one worry you can hand over today.",
        ),
        (
            "Matthew 11:28",
            "Come to me, all you who are weary and burdened, and I will give you rest.",
            "An invitation, not a demand.",
            "What burden have you been carrying alone?",
        ),
        (
            "Lamentations 3:22-23",
            "His compassions fail not. They are new every morning.",
            "Each morning resets the account.",
            "What would starting fresh look like tomorrow morning?",
        ),
        (
            "Proverbs 3:5",
            "Trust in the Lord with all your heart and lean not on your own understanding.",
            "Understanding follows trust more often than it precedes it.",
            "Where are you demanding an explanation before you will move?",
        ),
        (
            "Joshua 1:9",
            "Be strong and courageous. Do not be afraid; do not be discouraged.",
            "Courage is a companion, not a feeling.",
            "What is one brave step you can take this week?",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(
        |(index, (verse_reference, verse_text, reflection, journal_prompt))| {
            daily_devotion::DailyDevotion {
                day_number: Some(index as i32 + 1),
                verse_reference: Some(verse_reference.to_string()),
                verse_text: Some(verse_text.to_string()),
                reflection: Some(reflection.to_string()),
                journal_prompt: Some(journal_prompt.to_string()),
            }
        },
    )
    .collect();

    customers::ActiveModel {
        id: Set("cust-demo-001".to_owned()),
        phone: Set("+15551234567".to_owned()),
        status: Set(customer_status::CustomerStatus::Active),
        active_plan_id: Set(Some("plan-demo-001".to_owned())),
        first_name: Set(Some("Amy".to_owned())),
        next_plan_message_scheduled_for: Set(Some(now.into())),
        next_devotional_scheduled_for: Set(None),
        next_check_in_scheduled_for: Set(Some((now + Duration::days(7)).into())),
        timezone: Set(Some("America/Chicago".to_owned())),
        preferred_time_of_day: Set(Some("morning".to_owned())),
        current_life_season: Set(Some("starting a new job".to_owned())),
        extracted_themes: Set(themes::Themes(vec![
            "trust".to_owned(),
            "patience".to_owned(),
        ])),
        conversation_state: Set(conversation_state::ConversationState::Active),
        last_devotional_sent_at: Set(None),
        onboarding_step: Set(None),
        onboarding_step_updated_at: Set(None),
        beta_program: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .unwrap();

    devotional_plans::ActiveModel {
        id: Set("plan-demo-001".to_owned()),
        customer_id: Set("cust-demo-001".to_owned()),
        plan_number: Set(Some(1)),
        status: Set(plan_status::PlanStatus::Active),
        started_at: Set(Some(now.into())),
        completed_at: Set(None),
        life_season: Set(Some("starting a new job".to_owned())),
        themes: Set(themes::Themes(vec!["trust".to_owned()])),
        current_day: Set(Some(1)),
        days: Set(daily_devotion::PlanDays(demo_days)),
        check_in_sent: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .unwrap();
}
