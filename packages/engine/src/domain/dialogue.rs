//! Phrase pools, keyed by category

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogueCategory {
    Greet,
    Idle,
    Click,
    Drag,
    Landing,
    Worried,
    Encourage,
    Summary,
    Sleep,
    Wakeup,
    Tired,
    Notice,
    Weather,
    Topping,
    FruitStart,
    FruitFound,
    BathStart,
    Bath,
    BathFruit,
    HideStart,
    Peek,
    Eat,
    ToastStart,
    Toasted,
    Burnt,
}

impl DialogueCategory {
    pub const ALL: [DialogueCategory; 25] = [
        DialogueCategory::Greet,
        DialogueCategory::Idle,
        DialogueCategory::Click,
        DialogueCategory::Drag,
        DialogueCategory::Landing,
        DialogueCategory::Worried,
        DialogueCategory::Encourage,
        DialogueCategory::Summary,
        DialogueCategory::Sleep,
        DialogueCategory::Wakeup,
        DialogueCategory::Tired,
        DialogueCategory::Notice,
        DialogueCategory::Weather,
        DialogueCategory::Topping,
        DialogueCategory::FruitStart,
        DialogueCategory::FruitFound,
        DialogueCategory::BathStart,
        DialogueCategory::Bath,
        DialogueCategory::BathFruit,
        DialogueCategory::HideStart,
        DialogueCategory::Peek,
        DialogueCategory::Eat,
        DialogueCategory::ToastStart,
        DialogueCategory::Toasted,
        DialogueCategory::Burnt,
    ];

    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            DialogueCategory::Greet => &[
                "Hi there! Let's do our best today~",
                "Hey! So happy to see you ヾ(≧▽≦*)o",
                "Welcome back! I waited for you~",
                "Oh, you're here! (◕ᴗ◕✿)",
                "What a lovely day~",
            ],
            DialogueCategory::Idle => &[
                "Anything I can help with?",
                "Click me if you want to play~",
                "Bored? Come chat with me~",
                "I'm right here with you ♪(´▽｀)",
                "Hmm... what's on the schedule today?",
            ],
            DialogueCategory::Click => &[
                "Hehe, you found me~",
                "That tickles! (>﹏<)",
                "Want to tell me something?",
                "Eep! You poked me~",
                "Haha, I'm here!",
            ],
            DialogueCategory::Drag => &[
                "Where are we going~",
                "Careful, careful, don't drop me!",
                "Wheee, I'm flying~",
                "So high up!",
                "Ooh, a new view~",
            ],
            DialogueCategory::Landing => &[
                "Oof! Crumbs everywhere...",
                "Boing! I'm okay!",
                "Landed it~",
            ],
            DialogueCategory::Worried => &[
                "T-too fast!",
                "Whoa whoa whoa!",
                "My crust!",
            ],
            DialogueCategory::Encourage => &[
                "You're the best! Keep going! 💪",
                "Believe in yourself, you can do it!",
                "Every step counts, keep it up~",
                "Hard times don't last, you'll get through!",
                "I'm always on your side! (ง •̀_•́)ง",
                "Today's effort is tomorrow's reward~",
                "Taking a break matters too~",
            ],
            DialogueCategory::Summary => &[
                "Let me look at today's numbers...",
                "Gathering the data for you~",
            ],
            DialogueCategory::Sleep => &[
                "So sleepy... let me rest a bit...",
                "zzZ...zzZ...",
                "Good night... sweet dreams...",
                "Napping now... wake me if you need me...",
            ],
            DialogueCategory::Wakeup => &[
                "Mm... I'm up, I'm up!",
                "Ahh~ that was a good nap~",
                "I'm back and full of energy!",
                "Oops, did I oversleep?",
            ],
            DialogueCategory::Tired => &["So tired... I need a little rest..."],
            DialogueCategory::Notice => &[
                "📢 There's a new notice!",
                "Ding dong~ a message arrived!",
                "Hey, something new came in!",
                "Heads up! Something needs attention~",
            ],
            DialogueCategory::Weather => &[
                "Sunny mood today~ ☀️",
                "I have a feeling today will go smoothly~",
                "I kinda want a snack...",
                "A great day to get things done!",
            ],
            DialogueCategory::Topping => &[
                "New look!",
                "How do I look now?",
                "Fresh spread~",
            ],
            DialogueCategory::FruitStart => &[
                "I smell berries over there~",
                "Snack time! Let me find some fruit.",
            ],
            DialogueCategory::FruitFound => &[
                "Got one!",
                "Look what I picked~",
                "Fresh fruit!",
            ],
            DialogueCategory::BathStart => &[
                "Bath time~",
                "Time to wash off the crumbs!",
            ],
            DialogueCategory::Bath => &[
                "Splish splash~",
                "Ahh, warm water...",
                "Rub-a-dub-dub~",
            ],
            DialogueCategory::BathFruit => &[
                "Washing my fruit too~",
                "Clean fruit is tasty fruit!",
            ],
            DialogueCategory::HideStart => &[
                "Hide and seek! Don't look~",
                "I'll be right back...",
            ],
            DialogueCategory::Peek => &[
                "Peekaboo~",
                "Can you see me?",
                "Shh, I'm hiding!",
            ],
            DialogueCategory::Eat => &[
                "Nom nom nom~",
                "Delicious!",
            ],
            DialogueCategory::ToastStart => &[
                "Time for a warm-up~",
                "Into the toaster I go!",
            ],
            DialogueCategory::Toasted => &[
                "Golden and crispy~",
                "Perfectly toasted!",
                "Warm and cozy now~",
            ],
            DialogueCategory::Burnt => &[
                "Uh oh... a little too crispy!",
                "I'm burnt! (╥﹏╥)",
                "Smoky... cough cough...",
            ],
        }
    }
}

/// Time-of-day reminder for the `remind` action
pub fn reminder_for_hour(hour: u32) -> &'static str {
    match hour {
        h if h < 9 => "Good morning! A brand new day~",
        h if h < 12 => "Morning work time, you got this!",
        h if h < 14 => "Lunch time! Remember to eat and rest~",
        h if h < 18 => "Afternoon already, keep it up!",
        h if h < 22 => "Evening now, balance work and rest~",
        _ => "It's late, get some sleep soon~",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_phrases() {
        for cat in DialogueCategory::ALL {
            assert!(!cat.phrases().is_empty(), "{:?}", cat);
            assert!(cat.phrases().iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn reminders_cover_the_day() {
        assert_eq!(reminder_for_hour(7), "Good morning! A brand new day~");
        assert_eq!(reminder_for_hour(12), "Lunch time! Remember to eat and rest~");
        assert_eq!(reminder_for_hour(23), "It's late, get some sleep soon~");
        assert_ne!(reminder_for_hour(13), reminder_for_hour(14));
    }
}
