use serde::{Deserialize, Serialize};

/// A secret personal win predicate, assigned once per player at game start.
/// The predicate itself is adjudicated by the host at the table; the server
/// only stores and reveals the text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryCondition {
    pub id: String,
    pub name: String,
    pub description: String,
}

struct VictoryConditionDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

const VICTORY_CONDITIONS: &[VictoryConditionDef] = &[
    VictoryConditionDef {
        id: "vc1",
        name: "Architect of Chaos",
        description: "You win immediately if during your turn, you have Successfully Revealed 2 Secrets or more, AND the current Suspicion is 10 or higher.",
    },
    VictoryConditionDef {
        id: "vc2",
        name: "Diplomatic Victory",
        description: "You win immediately if during your turn you achieve a state where Suspicion is 2 or lower, your Trust is 15 or higher, AND you have the highest Trust among all players (or are tied for the highest).",
    },
    VictoryConditionDef {
        id: "vc3",
        name: "Information Broker",
        description: "You win immediately if at the End of your Turn you possess 9 Information, AND you have Successfully Revealed at least 2 Secrets during this turn.",
    },
    VictoryConditionDef {
        id: "vc4",
        name: "King's Favourite",
        description: "You win immediately if during your turn your Trust > 16 AND Trust is higher than the average Trust score of the other two players by at least 5 points.",
    },
    VictoryConditionDef {
        id: "vc5",
        name: "Master Manipulator",
        description: "Special: if an opponent fulfills the condition to win by Exploiting The Queen's Trap on their turn, you may immediately reveal this Victory Condition and win the game instead of them. You also win if The Queen's Trap has been successfully Exploited by you for the previous full round.",
    },
    VictoryConditionDef {
        id: "vc6",
        name: "Mastermind",
        description: "You win immediately if during your Return Exploits phase you return 1 Exotic Secret AND 1 Rare Secret to your hand that were not Successfully targeted by a Reveal action during the previous round.",
    },
    VictoryConditionDef {
        id: "vc7",
        name: "Masterstroke Turn",
        description: "You win immediately if during your turn you Successfully gain the Exploitation Effect from at least four different Secret cards, including at least one Common, one Rare, AND one Exotic Secret.",
    },
    VictoryConditionDef {
        id: "vc8",
        name: "Resourceful Turnabout",
        description: "You win immediately if during your turn the cumulative gains from Secret Exploit and/or Reveal effects activated during this turn reach 5 or more Trust AND 5 or more Gold.",
    },
    VictoryConditionDef {
        id: "vc9",
        name: "Secret Betrayal",
        description: "You win immediately if during your turn, your action directly causes an opponent's elimination by ensuring their Trust is <= Suspicion, and your Trust was lower than theirs before your action resolved.",
    },
    VictoryConditionDef {
        id: "vc10",
        name: "Secrecy Hoarder",
        description: "You win immediately if during your turn, after resolving your Exploits, you possess 6 or more Secrecy AND have 3 Royal Chamber Secrets currently Exploited.",
    },
    VictoryConditionDef {
        id: "vc11",
        name: "Shadow Master",
        description: "You win immediately if during your Return Exploits phase, none of your Exploited Secrets from the previous round were Successfully Revealed, AND the current Suspicion level is 9 or higher.",
    },
    VictoryConditionDef {
        id: "vc12",
        name: "The Financier",
        description: "You win immediately if during your turn, upon gaining Gold from the Exploit effect of your 3rd (or subsequent) different Secret this turn, you possess 17 or more Gold.",
    },
    VictoryConditionDef {
        id: "vc13",
        name: "The Great Heist",
        description: "You win immediately if during your turn you perform an action that involves Stealing Gold, Information, or Trust, AND at that moment you possess 10 or more Gold, 6 or more Information, and the current Suspicion is 5 or lower.",
    },
    VictoryConditionDef {
        id: "vc14",
        name: "The Survivor",
        description: "You win immediately if at the End of your Turn, Trust > Suspicion (min 6), AND you started this turn with Trust <= Suspicion. While your Trust is <= Suspicion you gain temporary Immunity to elimination until the end of your next turn.",
    },
    VictoryConditionDef {
        id: "vc15",
        name: "Total Domination",
        description: "You win immediately if during your turn you possess (in hand or Exploited) the required Secret from each zone simultaneously: Smuggler's Network, City Watch, Customs Inspection, Hidden Pact, Sanctuary Seal, and Sovereign's Command.",
    },
    VictoryConditionDef {
        id: "vc16",
        name: "Underdog Victory",
        description: "You win immediately if during your turn, you choose to use this card's ability to Raise Suspicion by 2, and doing so causes all players currently in the game to have their Trust equal to or lower than the new Suspicion level.",
    },
    VictoryConditionDef {
        id: "vc17",
        name: "War Planner",
        description: "You win immediately if during your turn, after resolving your Exploits, you have Exploited 3 Secrets (at least one Rare or Exotic) during this turn AND possess 10 or more Secret cards in your hand.",
    },
    VictoryConditionDef {
        id: "vc18",
        name: "Zonal Supremacy",
        description: "You win immediately if during your turn you possess the highest number of Secrets from all zones (in hand or Exploited), or are tied for the highest.",
    },
];

/// A fresh copy of the full Victory Condition pool (callers shuffle).
pub fn all_victory_conditions() -> Vec<VictoryCondition> {
    VICTORY_CONDITIONS
        .iter()
        .map(|def| VictoryCondition {
            id: def.id.to_owned(),
            name: def.name.to_owned(),
            description: def.description.to_owned(),
        })
        .collect()
}

/// Look up a Victory Condition definition by id.
pub fn victory_condition(id: &str) -> Option<VictoryCondition> {
    VICTORY_CONDITIONS
        .iter()
        .find(|def| def.id == id)
        .map(|def| VictoryCondition {
            id: def.id.to_owned(),
            name: def.name.to_owned(),
            description: def.description.to_owned(),
        })
}
