use serde::{Deserialize, Serialize};

/// Spread on the toast. Cycling walks the declaration order and wraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topping {
    #[default]
    None,
    Butter,
    Jam,
    Honey,
    Chocolate,
}

impl Topping {
    pub const ALL: [Topping; 5] = [
        Topping::None,
        Topping::Butter,
        Topping::Jam,
        Topping::Honey,
        Topping::Chocolate,
    ];

    /// Every topping except `None`
    pub const SPREADS: [Topping; 4] = [Topping::Butter, Topping::Jam, Topping::Honey, Topping::Chocolate];

    pub fn index(self) -> usize {
        match self {
            Topping::None => 0,
            Topping::Butter => 1,
            Topping::Jam => 2,
            Topping::Honey => 3,
            Topping::Chocolate => 4,
        }
    }

    pub fn next(self) -> Topping {
        Topping::ALL[(self.index() + 1) % Topping::ALL.len()]
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Topping::None => "topping-none",
            Topping::Butter => "topping-butter",
            Topping::Jam => "topping-jam",
            Topping::Honey => "topping-honey",
            Topping::Chocolate => "topping-chocolate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Topping::None => "plain",
            Topping::Butter => "butter",
            Topping::Jam => "jam",
            Topping::Honey => "honey",
            Topping::Chocolate => "chocolate",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Topping::None => "🍞",
            Topping::Butter => "🧈",
            Topping::Jam => "🍓",
            Topping::Honey => "🍯",
            Topping::Chocolate => "🍫",
        }
    }
}

/// Things the pet can carry around
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeldItem {
    Strawberry,
    Blueberry,
    Apple,
}

impl HeldItem {
    pub const FRUITS: [HeldItem; 3] = [HeldItem::Strawberry, HeldItem::Blueberry, HeldItem::Apple];

    pub fn id(self) -> &'static str {
        match self {
            HeldItem::Strawberry => "strawberry",
            HeldItem::Blueberry => "blueberry",
            HeldItem::Apple => "apple",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            HeldItem::Strawberry => "item-strawberry",
            HeldItem::Blueberry => "item-blueberry",
            HeldItem::Apple => "item-apple",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            HeldItem::Strawberry => "🍓",
            HeldItem::Blueberry => "🫐",
            HeldItem::Apple => "🍎",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_is_identity() {
        for start in Topping::ALL {
            let mut t = start;
            for _ in 0..Topping::ALL.len() {
                t = t.next();
            }
            assert_eq!(t, start);
        }
    }

    #[test]
    fn cycle_visits_every_topping_once() {
        let mut seen = Vec::new();
        let mut t = Topping::None;
        for _ in 0..Topping::ALL.len() {
            seen.push(t);
            t = t.next();
        }
        assert_eq!(seen, Topping::ALL.to_vec());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Topping::Honey).unwrap(), "\"honey\"");
        let t: Topping = serde_json::from_str("\"chocolate\"").unwrap();
        assert_eq!(t, Topping::Chocolate);
    }
}
