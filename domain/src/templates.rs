//! Message body templates.
//!
//! Pure text construction; no I/O and no failure modes. Devotional content is
//! pre-authored upstream, so a missing content field renders as an empty
//! segment rather than an error. The welcome bodies must stay in sync with
//! the downstream message handler's templates.

/// Formats one day of a devotional plan with its day counter.
pub fn daily_devotion_text(
    verse_reference: Option<&str>,
    verse_text: Option<&str>,
    reflection: Option<&str>,
    journal_prompt: Option<&str>,
    day_number: i32,
) -> String {
    format!(
        "📖 Day {day_number} of 7\n\n\"{verse}\"\n— {reference}\n\n{reflection}\n\n📝 Journal Prompt: {prompt}",
        verse = verse_text.unwrap_or_default(),
        reference = verse_reference.unwrap_or_default(),
        reflection = reflection.unwrap_or_default(),
        prompt = journal_prompt.unwrap_or_default(),
    )
}

/// Welcome body for the registration path: asks for the customer's season of
/// life.
pub fn registration_welcome_text() -> String {
    "Welcome to Words in Season! We're here to walk with you through life's seasons. \n\n\
     Tell us: What season of life are you in right now? (For example: facing a challenge, \
     celebrating a victory, seeking direction, etc.)"
        .to_owned()
}

/// Welcome body for the subscription-activation path: step 1 of the two-step
/// onboarding flow (background first, season second), with the SMS compliance
/// footer.
pub fn subscription_welcome_text(first_name: Option<&str>) -> String {
    let greeting = match first_name {
        Some(name) if !name.is_empty() => format!("Hey {name}! 🌿"),
        _ => "Hey! 🌿".to_owned(),
    };

    format!(
        "{greeting}\n\
         Before we begin, we'd love to get to know you a little better.\n\n\
         In 2–3 sentences, tell us about yourself — your background, what you do, \
         and anything that helps us understand who you are (your job, stage of life, or passions).\n\n\
         This helps us personalize your devotionals even more, so each one truly speaks to \
         not only your season but you as a person!\n\n\
         Reply STOP to unsubscribe or HELP for help. Msg & data rates may apply."
    )
}

/// Fixed season check-in body for the recurring scheduler.
pub fn season_check_in_text() -> String {
    "Hi! It's been a while. How are things going? \
     Has your season of life changed since we last talked? \
     Feel free to share what's on your heart."
        .to_owned()
}
