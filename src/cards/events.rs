use serde::{Deserialize, Serialize};

/// One round-scoped Event card. The active event's rules text applies to the
/// whole table for the round it is face up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCard {
    pub id: String,
    pub name: String,
    pub description: String,
}

struct EventCardDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

const EVENT_CARDS: &[EventCardDef] = &[
    EventCardDef {
        id: "ev1",
        name: "The Last Confession",
        description: "If a Secret is targeted by a Reveal action this round, it is discarded (returned to the bottom of its Zone Deck) immediately after its Reveal Effect resolves.",
    },
    EventCardDef {
        id: "ev2",
        name: "Distraction",
        description: "When a Secret is Exploited return it to the hand. (A Mask cannot Exploit more than one Secret in a turn)",
    },
    EventCardDef {
        id: "ev3",
        name: "Royal Protection",
        description: "Players Gain Immunity (Gold Loss) and Immunity (Gold Steal) this round.",
    },
    EventCardDef {
        id: "ev4",
        name: "Whispers Amplified",
        description: "For this round, the first Reveal action taken by each player costs only 1 Information. Any subsequent Reveal actions taken by any player this round cost 2 Information.",
    },
    EventCardDef {
        id: "ev5",
        name: "False Allegations",
        description: "Discard any number of Secrets from your hand. For each Secret discarded, draw 1 Secret from any Zone Deck of your choice (excluding the Royal Chamber Zone Deck).",
    },
    EventCardDef {
        id: "ev6",
        name: "Blackmail",
        description: "Each player Must Pay 1 Gold per Secret currently in their hand. If unable to Pay the full amount, they Must discard Secrets until they can.",
    },
    EventCardDef {
        id: "ev7",
        name: "Courtly Feast",
        description: "Each player May choose to Gain 3 Gold or 1 Trust. Players Must choose one.",
    },
    EventCardDef {
        id: "ev8",
        name: "Foreign Envoys",
        description: "Draw an additional Victory Condition card. You now have two Victory Conditions; fulfilling either wins you the game.",
    },
    EventCardDef {
        id: "ev9",
        name: "Signs of Intrusion",
        description: "If you currently have two Victory Conditions, you Must choose and discard one.",
    },
    EventCardDef {
        id: "ev10",
        name: "Another Mask",
        description: "For this round, each player May Exploit a Secret in the temporary Eclipse Mask slot in addition to their normal limit of 3 Exploited Secrets.",
    },
];

/// A fresh copy of the full event deck, in table order (callers shuffle).
pub fn all_event_cards() -> Vec<EventCard> {
    EVENT_CARDS
        .iter()
        .map(|def| EventCard {
            id: def.id.to_owned(),
            name: def.name.to_owned(),
            description: def.description.to_owned(),
        })
        .collect()
}
