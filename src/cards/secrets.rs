use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::zones::ZoneName;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Exotic,
}

/// Master definition of one Secret card type. Physical duplicates share the
/// base id; `copies` says how many instances the zone deck starts with.
#[derive(Clone, Debug, Serialize)]
pub struct SecretCardDef {
    pub id: &'static str,
    pub name: &'static str,
    pub zone: ZoneName,
    pub rarity: Rarity,
    pub exploit_effect: &'static str,
    pub reveal_effect: &'static str,
    pub flavor: &'static str,
    #[serde(skip)]
    pub copies: u8,
}

const fn card(
    id: &'static str,
    name: &'static str,
    zone: ZoneName,
    rarity: Rarity,
    exploit_effect: &'static str,
    reveal_effect: &'static str,
    flavor: &'static str,
    copies: u8,
) -> SecretCardDef {
    SecretCardDef {
        id,
        name,
        zone,
        rarity,
        exploit_effect,
        reveal_effect,
        flavor,
        copies,
    }
}

use Rarity::{Common, Exotic, Rare};
use ZoneName::*;

pub static SECRET_CARDS: &[SecretCardDef] = &[
    // --- Docks and Gates ---
    card(
        "dg_common1",
        "Port Authority Bribe",
        DocksAndGates,
        Common,
        "Gain 2 Gold. You May Adjust Suspicion by 1.",
        "The Revealing Player Must Steal 2 Gold from you. You Lose 2 Gold. The Revealing Player Must Raise Suspicion by 1.",
        "Pay a small fee to ensure smooth passage through the busy docks.",
        3,
    ),
    card(
        "dg_common2",
        "Coastal Spy",
        DocksAndGates,
        Common,
        "Gain 1 Information. You May Pay 1 Gold to Gain Insight on 1 target Secret in an opponent's hand.",
        "The Revealing Player chooses: You Lose 3 Information, OR you Lose 1 Trust.",
        "A network of eyes along the coastline, exchanging secrets for favors.",
        3,
    ),
    card(
        "dg_common3",
        "Shipment Delay",
        DocksAndGates,
        Common,
        "You Must Steal 1 Gold from one target player. Apply Delay to one target opponent's Exploited Secret.",
        "Discard 1 Secret from your hand. Apply Delay to this Secret.",
        "A whispered word at the docks causes the cargo to be 'misplaced'.",
        3,
    ),
    card(
        "dg_common4",
        "Smuggler's Network",
        DocksAndGates,
        Common,
        "Steal 2 Gold from one target player. You May Raise Suspicion by 1.",
        "Lose 1 Gold. Lose 1 Trust. The Revealing Player Must Raise Suspicion by 1.",
        "Hidden routes and Secret deals flow through the shadows.",
        3,
    ),
    card(
        "dg_common5",
        "Pirates' Location",
        DocksAndGates,
        Common,
        "Pay 1 Gold to Gain 1 Information. Each other player Must choose one: Lose 1 Gold OR Lose 1 Information.",
        "Lose 1 Trust.",
        "A map passed down through whispers, leading to treasures hidden in dangerous waters.",
        3,
    ),
    card(
        "dg_rare1",
        "The Hidden Sail",
        DocksAndGates,
        Rare,
        "Gain the Ability to: Sell Secrets from your hand for 4 Gold each, or your Exploited Secrets for 2 Gold each, until your next turn. Sold Secrets are Discarded.",
        "Discard this Secret. Discard 1 additional Secret from your hand. The Revealing Player May Raise Suspicion by 2.",
        "A discreet vessel waits in the harbor, ready to sail into the unknown.",
        2,
    ),
    card(
        "dg_rare2",
        "Merchant's Letter",
        DocksAndGates,
        Rare,
        "Gain 3 Gold. Gain Insight on 2 target Secrets in opponents' hands. You May Exchange the positions of those 2 Secrets.",
        "Discard 1 Secret from your hand. Lose 2 Trust.",
        "A letter sealed with wax, promising trade secrets and untold riches.",
        2,
    ),
    card(
        "dg_exotic1",
        "Whispers of the Tide",
        DocksAndGates,
        Exotic,
        "Gain 2 Gold. Gain 2 Information. You May immediately perform 1 Reveal action targeting any Mask.",
        "Lose 3 Trust. Choose 1 adjacent Exploited Secret you control: immediately trigger its Reveal Effect.",
        "The waves carry secrets, and soon, they'll reach the ears they're meant for.",
        1,
    ),
    // --- Eastern Town Square ---
    card(
        "ets_common1",
        "Common Gossip",
        EasternTownSquare,
        Common,
        "Adjust Suspicion by 2.",
        "The Revealing Player Gains Insight on one Secret in your hand, and chooses: Apply Delay to it OR Pay 2 Gold to Steal it.",
        "A rumor spreads through the market, but its true weight is yet to be felt.",
        3,
    ),
    card(
        "ets_common2",
        "Merchant's Offer",
        EasternTownSquare,
        Common,
        "Gain 2 Gold. If your Trust is 10 or higher, you May Pay 1 Gold to Gain Immunity (Gold Steal).",
        "Discard this Secret and Lose Immunity (Gold Steal).",
        "A tempting offer, but there's always a price to pay for convenience.",
        3,
    ),
    card(
        "ets_common3",
        "Tavern Brawl",
        EasternTownSquare,
        Common,
        "Immediately perform 1 Reveal action targeting the Mask this Secret is assigned to. This Secret is not affected by this Reveal action.",
        "Lose 3 Gold.",
        "A fight erupts, and with it, secrets are exposed in the chaos.",
        3,
    ),
    card(
        "ets_common4",
        "Old Friend in the Square",
        EasternTownSquare,
        Common,
        "Gain Insight on the top 3 Secrets of any one target Zone Deck. You May Exchange 1 of them with 1 Secret from your hand of the same Zone.",
        "Lose 1 Gold and Lose 1 Trust, OR Discard this Secret.",
        "Old alliances are tested when familiar faces cross paths in the square.",
        3,
    ),
    card(
        "ets_common5",
        "City Watch",
        EasternTownSquare,
        Common,
        "You May Adjust Suspicion by 1. You May Pay 1 Gold to Gain 1 Trust and May Adjust Suspicion by 1 again.",
        "Lose 1 Gold. Lose 1 Trust. Lose 1 Information.",
        "The watchful eyes of the city never miss a coin or a secret.",
        3,
    ),
    card(
        "ets_rare1",
        "The Informant",
        EasternTownSquare,
        Rare,
        "Gain the ability to: Pay 1 Gold to Must Steal 2 Information from any target player.",
        "The Revealing Player Must Steal 2 Information from you. Discard this Secret.",
        "Whispers in the dark corners can reveal more than any royal decree.",
        2,
    ),
    card(
        "ets_rare2",
        "Ambush in the Alley",
        EasternTownSquare,
        Rare,
        "Apply Delay to all other Secrets currently Exploited on the same Mask as this Secret.",
        "Lose 1 Trust. Discard this Secret. The Revealing Player Must Raise Suspicion by 1.",
        "The shadows conceal a dagger's strike.",
        2,
    ),
    card(
        "ets_exotic1",
        "Bribed Guards",
        EasternTownSquare,
        Exotic,
        "Pay 2 Gold to Draw 3 Secrets from your current Zone Deck. Keep 2 and Discard the third. You May Adjust Suspicion by 2.",
        "You Must Lose 3 Gold and Lose 2 Trust. If you cannot Lose the full 3 Gold, you Must Lose 1 additional Trust instead.",
        "A few coins in the right hands can silence the watchful eyes.",
        1,
    ),
    // --- Western Town Square (mirrors the eastern square) ---
    card(
        "wts_common1",
        "Common Gossip",
        WesternTownSquare,
        Common,
        "Adjust Suspicion by 2.",
        "The Revealing Player Gains Insight on one Secret in your hand, and chooses: Apply Delay to it OR Pay 2 Gold to Steal it.",
        "A rumor spreads through the market, but its true weight is yet to be felt.",
        3,
    ),
    card(
        "wts_common2",
        "Merchant's Offer",
        WesternTownSquare,
        Common,
        "Gain 2 Gold. If your Trust is 10 or higher, you May Pay 1 Gold to Gain Immunity (Gold Steal).",
        "Discard this Secret and Lose Immunity (Gold Steal).",
        "A tempting offer, but there's always a price to pay for convenience.",
        3,
    ),
    card(
        "wts_common3",
        "Tavern Brawl",
        WesternTownSquare,
        Common,
        "Immediately perform 1 Reveal action targeting the Mask this Secret is assigned to. This Secret is not affected by this Reveal action.",
        "Lose 3 Gold.",
        "A fight erupts, and with it, secrets are exposed in the chaos.",
        3,
    ),
    card(
        "wts_common4",
        "Old Friend in the Square",
        WesternTownSquare,
        Common,
        "Gain Insight on the top 3 Secrets of any one target Zone Deck. You May Exchange 1 of them with 1 Secret from your hand of the same Zone.",
        "Lose 1 Gold and Lose 1 Trust, OR Discard this Secret.",
        "Old alliances are tested when familiar faces cross paths in the square.",
        3,
    ),
    card(
        "wts_common5",
        "City Watch",
        WesternTownSquare,
        Common,
        "You May Adjust Suspicion by 1. You May Pay 1 Gold to Gain 1 Trust and May Adjust Suspicion by 1 again.",
        "Lose 1 Gold. Lose 1 Trust. Lose 1 Information.",
        "The watchful eyes of the city never miss a coin or a secret.",
        3,
    ),
    card(
        "wts_rare1",
        "The Informant",
        WesternTownSquare,
        Rare,
        "Gain the ability to: Pay 1 Gold to Must Steal 2 Information from any target player.",
        "The Revealing Player Must Steal 2 Information from you. Discard this Secret.",
        "Whispers in the dark corners can reveal more than any royal decree.",
        2,
    ),
    card(
        "wts_rare2",
        "Ambush in the Alley",
        WesternTownSquare,
        Rare,
        "Apply Delay to all other Secrets currently Exploited on the same Mask as this Secret.",
        "Lose 1 Trust. Discard this Secret. The Revealing Player Must Raise Suspicion by 1.",
        "The shadows conceal a dagger's strike.",
        2,
    ),
    card(
        "wts_exotic1",
        "Bribed Guards",
        WesternTownSquare,
        Exotic,
        "Pay 2 Gold to Draw 3 Secrets from your current Zone Deck. Keep 2 and Discard the third. You May Adjust Suspicion by 2.",
        "You Must Lose 3 Gold and Lose 2 Trust. If you cannot Lose the full 3 Gold, you Must Lose 1 additional Trust instead.",
        "A few coins in the right hands can silence the watchful eyes.",
        1,
    ),
    // --- Trading Bailey ---
    card(
        "tb_common1",
        "Merchant's Favor",
        TradingBailey,
        Common,
        "Move your character to an adjacent zone. Draw 2 Secrets from that zone's deck; Pay 1 Gold and 1 Information for each you wish to Keep.",
        "The Revealing Player Gains this Secret's Exploitation effect and Steals this Secret from you.",
        "A deal struck in the shadows, one that could tip the balance in your favor.",
        3,
    ),
    card(
        "tb_common2",
        "Courier's Trail",
        TradingBailey,
        Common,
        "Draw 1 Secret from another bordering zone and Keep it.",
        "Discard 1 Secret from your hand (the Revealing Player chooses which).",
        "A hurried message left behind, revealing more than intended.",
        3,
    ),
    card(
        "tb_common3",
        "Trade Route Blockade",
        TradingBailey,
        Common,
        "Gain 1 Gold for each player character in your current zone and all adjacent zones. You May Move one target opponent's character to an adjacent zone.",
        "Lose 3 Gold. The Revealing Player Moves your character to this zone or an adjacent zone.",
        "The flow of goods is halted, and so too are your plans.",
        3,
    ),
    card(
        "tb_common4",
        "Market Gossip",
        TradingBailey,
        Common,
        "Perform the Draw phase again, drawing only from the Trading Bailey deck.",
        "Discard this Secret. Discard 1 additional Secret from your hand.",
        "Whispers of deals and Secrets spread quickly in the crowded stalls.",
        3,
    ),
    card(
        "tb_common5",
        "Customs Inspection",
        TradingBailey,
        Common,
        "Gain 1 Information. Gain Insight on one target Secret in another player's hand; Adjust Suspicion by 1 or 2 based on its rarity.",
        "The Revealing Player Steals 1 Trust from you. Discard this Secret. You cannot move during your next End of Turn phase.",
        "A routine check reveals more than just the cargo.",
        3,
    ),
    card(
        "tb_rare1",
        "Smuggler's Shortcut",
        TradingBailey,
        Rare,
        "Move your character to any zone. Draw 2 Secrets from that zone's deck; You May Use one's Exploitation effect immediately, then Discard both.",
        "The Revealing Player Gains Insight on your hand, then Steals 1 Secret of their choice from it.",
        "The shadows offer a quicker path, but danger lurks around every corner.",
        2,
    ),
    card(
        "tb_rare2",
        "Guild Alliance",
        TradingBailey,
        Rare,
        "Gain Immunity (Gold Loss) and Immunity (Gold Steal) until your next turn. If another player's character is in your zone, you Must Steal 3 Gold from that player.",
        "The Revealing Player Steals 2 Trust from you.",
        "An agreement forged in shadows, bound by mutual interests and silent promises.",
        2,
    ),
    card(
        "tb_exotic1",
        "Golden Caravan",
        TradingBailey,
        Exotic,
        "Gain 3 Gold. Move your character to any zone. Draw 1 Secret from any position in that zone's deck.",
        "The Revealing Player Steals all your Gold (minimum 4, topped up from the supply).",
        "A convoy laden with wealth, where every stop hides a potential deal or betrayal.",
        1,
    ),
    // --- Courtyard ---
    card(
        "cy_common1",
        "Noble Whisper",
        Courtyard,
        Common,
        "Choose one zone. Gain 2 Information for each player character currently in that zone.",
        "Exchange this Secret with the top Secret of the Courtyard deck. The Revealing Player May Adjust Suspicion by 1.",
        "A quiet conversation in the shadows, where power is Exchanged in hushed tones.",
        3,
    ),
    card(
        "cy_common2",
        "Misplaced Loyalty",
        Courtyard,
        Common,
        "For each other Secret currently Exploited on the same Mask as this one, you Steal 2 Information from that Secret's owner.",
        "The Revealing Player Must Steal one Exploited Secret of their choice from your Masks.",
        "Their allegiance wavers, but the consequences of betrayal are yours to bear.",
        3,
    ),
    card(
        "cy_common3",
        "Hidden Pact",
        Courtyard,
        Common,
        "Gain 1 Trust. Each other player with a Secret Exploited on the same Mask May Pay you 1 Gold to Gain 1 Trust.",
        "Apply Delay to this Secret. The Revealing Player Must Steal 1 Information from you.",
        "A Secret agreement, forged in the shadows, waiting for the right moment to be revealed.",
        3,
    ),
    card(
        "cy_common4",
        "Hidden Grudge",
        Courtyard,
        Common,
        "Choose 2 players. Steal 1 Gold from each. Each chosen player May Pay 1 Gold OR 2 Information to make the other chosen player Lose 1 Trust.",
        "Lose 1 Trust. The Revealing Player May Raise Suspicion by 1.",
        "Beneath the smiles and pleasantries, an old rivalry brews.",
        3,
    ),
    card(
        "cy_common5",
        "Unwelcome Gift",
        Courtyard,
        Common,
        "Move this Secret onto one target opponent's empty Mask slot; it is now considered Exploited by them, to no benefit.",
        "Lose 2 Trust. Discard this Secret.",
        "You didn't ask for it, but it's yours now.",
        3,
    ),
    card(
        "cy_rare1",
        "Extortion Bargain",
        Courtyard,
        Rare,
        "The next Common or Rare Secret you Exploit this turn becomes Concealed immediately after you Exploit it.",
        "The Mask slot this Secret was on cannot have Secrets Exploited onto it during your next Exploit Secrets phase. Discard this Secret.",
        "A whispered threat can hold more power than a shouted command.",
        2,
    ),
    card(
        "cy_rare2",
        "Spy in the Shadows",
        Courtyard,
        Rare,
        "Gain 1 Information for each Secret currently Exploited on the board (including this one).",
        "Choose one: Lose 2 Trust, OR Discard this Secret and one additional Secret from your hand.",
        "A passing glance reveals more than words ever could.",
        2,
    ),
    card(
        "cy_exotic1",
        "The King's Ear",
        Courtyard,
        Exotic,
        "Discard all Exploited Secrets except this one. End the Exploitation Phase.",
        "You Must Discard 3 Secrets, starting from your hand, then from your Exploited Secrets (including this one).",
        "A whisper to the throne carries more weight than a thousand voices.",
        1,
    ),
    // --- Cathedral ---
    card(
        "cat_common1",
        "The Whispering Priest",
        Cathedral,
        Common,
        "Gain 1 Gold. Gain 1 Information. Gain Insight on 1 target Secret in an opponent's hand, then Gain Gold or Information based on its rarity.",
        "Lose 2 Gold. Lose 2 Information. Discard this Secret.",
        "Behind confessions lies a web of quiet influence.",
        3,
    ),
    card(
        "cat_common2",
        "Charity Dive",
        Cathedral,
        Common,
        "Pay 1 Gold to Gain 2 Trust.",
        "The Revealing Player Must Steal 2 Gold and 1 Trust from you.",
        "A generous hand reaches out, but who truly benefits from the gift?",
        3,
    ),
    card(
        "cat_common3",
        "Silent Witness",
        Cathedral,
        Common,
        "Gain 2 Information for each other Secret currently Exploited on the Mask where this Secret is placed.",
        "Discard this Secret. The Revealing Player Steals 1 Information from you and Gains 1 additional Information from the supply.",
        "Some truths are too dangerous to speak, but eyes cannot unsee.",
        3,
    ),
    card(
        "cat_common4",
        "Sanctuary Seal",
        Cathedral,
        Common,
        "Choose 1 other Exploited Common Secret you control. Grant it Immunity (Reveal Effects) until your next turn.",
        "The Revealing Player May grant one of their Exploited Common Secrets Immunity (Reveal Effects) until their next turn.",
        "Within these walls, even the shadows hold their silence.",
        3,
    ),
    card(
        "cat_common5",
        "Confession of Secrets",
        Cathedral,
        Common,
        "Gain Insight on 2 target Secrets in opponents' hands. You May Pay 1 Gold OR 1 Information to Steal one of them.",
        "Discard this Secret. The Revealing Player Draws 1 Secret from the deck of the zone your character is in.",
        "The confessional hides more than sins.",
        3,
    ),
    card(
        "cat_rare1",
        "The Cardinal's Decree",
        Cathedral,
        Rare,
        "If your Trust is the highest among all players, each other player Loses 1 Trust (they May Pay you 1 Gold OR 1 Information to prevent it); otherwise, Gain 2 Trust.",
        "The Revealing Player Must Steal 2 Trust from you.",
        "His word carries the weight of unquestionable authority.",
        2,
    ),
    card(
        "cat_rare2",
        "Infiltrator's Report",
        Cathedral,
        Rare,
        "Choose one other Secret currently Exploited on the same Mask as this Secret. Copy its Exploitation effect.",
        "Discard this Secret. The Revealing Player Steals 1 Trust from you and Gains Insight on one Secret in your hand.",
        "An outsider's eyes see what the familiar overlook.",
        2,
    ),
    card(
        "cat_exotic1",
        "Crypt of Promises",
        Cathedral,
        Exotic,
        "Choose up to 2 other Secrets from your hand and Discard them. For each, Gain 3 Gold and Trust based on its rarity.",
        "The Revealing Player Must Steal 2 Gold and 2 Trust from you, then Discards this Secret.",
        "Buried beneath stone are oaths never meant to be kept.",
        1,
    ),
    // --- Royal Chamber ---
    card(
        "rc_common1",
        "The King's Secret Keeper",
        RoyalChamber,
        Common,
        "Pay 2 Gold to return 1 of your other Exploited Secrets to your hand immediately. You May Spend X Secrecy to return this Secret to your hand.",
        "Lose 1 Trust. Discard one other Exploited Secret you control.",
        "A trusted confidant, guarding the kingdom's darkest truths.",
        3,
    ),
    card(
        "rc_common2",
        "The Crown's Favor",
        RoyalChamber,
        Common,
        "Gain 2 Gold. If your Gold total is highest among all players, Gain 1 Trust as well.",
        "The Revealing Player Steals this Secret from you.",
        "A rare privilege granted by the throne, shifting the balance of power.",
        3,
    ),
    card(
        "rc_common3",
        "Whispers in the Court",
        RoyalChamber,
        Common,
        "Gain 2 Information. You May Pay X Secrecy to Raise Suspicion and Gain 1 Information per 2 points of current Suspicion.",
        "The Revealing Player Adjusts Suspicion by 2 and Gains 1 Trust.",
        "Secrets exchanged in hushed tones, where trust can be both a weapon and a shield.",
        3,
    ),
    card(
        "rc_common4",
        "Royal Messenger's Note",
        RoyalChamber,
        Common,
        "Gain 1 Secrecy. You May Pay 1 Secrecy to Gain 2 temporary Secrecy until the end of your turn.",
        "The Revealing Player Must Steal 1 Secrecy and May Pay 1 Secrecy to Discard 1 of your Exploited Secrets.",
        "A sealed letter that carries weight.",
        3,
    ),
    card(
        "rc_common5",
        "Sovereign's Command",
        RoyalChamber,
        Common,
        "Choose one: Steal 2 Gold and 1 Information from one target player, OR Force one target player to Lose 1 Trust.",
        "Discard this Secret. The Revealing Player May Use this Secret.",
        "A rare and dangerous letter, its words hold the potential to undo alliances.",
        3,
    ),
    card(
        "rc_rare1",
        "Crown's Hidden Truth",
        RoyalChamber,
        Rare,
        "Choose one Immunity (Gold, Information or Trust Loss) until the next turn. You May Pay X Secrecy for the matching Steal Immunity.",
        "Discard this Secret. The Revealing Player Must Steal 2 Information and May Raise Suspicion by up to 3.",
        "Beneath the gleam of the crown lies a Secret that could shatter thrones.",
        2,
    ),
    card(
        "rc_rare2",
        "Crown's Shadow",
        RoyalChamber,
        Rare,
        "Draw 3 Secrets from any one Zone Deck. You May immediately Use one drawn Secret's Exploitation effect, then Discard all 3.",
        "Discard this Secret. The Revealing Player Gains this Secret's Exploitation effect and May Keep the Secret they Use.",
        "Loyal to none, seen by none, yet feared by all.",
        2,
    ),
    card(
        "rc_exotic1",
        "The Queen's Trap",
        RoyalChamber,
        Exotic,
        "Pay 2 Secrecy to place this Secret permanently onto one of your Mask slots. You win at the start of your turn if it stayed Exploited for the previous 3 full rounds.",
        "Lose 3 Trust.",
        "A cunning move, where loyalty is the bait and ambition the snare.",
        1,
    ),
];

static CARDS_BY_ID: Lazy<HashMap<&'static str, &'static SecretCardDef>> =
    Lazy::new(|| SECRET_CARDS.iter().map(|c| (c.id, c)).collect());

/// Look up a Secret card type by base id.
pub fn secret_card(id: &str) -> Option<&'static SecretCardDef> {
    CARDS_BY_ID.get(id).copied()
}

pub fn cards_in_zone(zone: ZoneName) -> impl Iterator<Item = &'static SecretCardDef> {
    SECRET_CARDS.iter().filter(move |c| c.zone == zone)
}
