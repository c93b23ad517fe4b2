/// Static lore tables: galaxies, ship and planet art, name pools, copilot lines.
///
/// Nothing here is mutated at runtime. Generation code picks from these pools.

pub struct GalaxyInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub distance: &'static str,
    pub faction: &'static str,
    pub art: &'static [&'static str],
}

/// Warp visits galaxies in this order, wrapping after the last entry.
pub const GALAXIES: &[GalaxyInfo] = &[
    GalaxyInfo {
        name: "Andromeda",
        kind: "Spiral",
        distance: "2.5 Mly",
        faction: "Andromedan Union",
        art: &["   .   *    .", "  *  🌀  .  *", "   .    *   "],
    },
    GalaxyInfo {
        name: "Sombrero",
        kind: "Elliptical",
        distance: "29 Mly",
        faction: "Sombrero Coalition",
        art: &["  .---. 🌀", " /     \\", " \\_____/ "],
    },
    GalaxyInfo {
        name: "Whirlpool",
        kind: "Barred Spiral",
        distance: "23 Mly",
        faction: "Independent",
        art: &["  .-'-.", " ( 🌀 )", "  `-.-'"],
    },
    GalaxyInfo {
        name: "Triangulum",
        kind: "Spiral",
        distance: "3 Mly",
        faction: "Triangulum Pact",
        art: &["   /\\  ", "  /🌀\\ ", " /__\\ "],
    },
    GalaxyInfo {
        name: "MilkyWay-Neighbor",
        kind: "Irregular",
        distance: "0.8 Mly",
        faction: "None",
        art: &["  * . *", "  . 🌀 .", "  * . *"],
    },
];

pub fn galaxy(index: usize) -> &'static GalaxyInfo {
    &GALAXIES[index % GALAXIES.len()]
}

/// Index of the galaxy that follows `index` in warp order.
pub fn next_galaxy(index: usize) -> usize {
    (index + 1) % GALAXIES.len()
}

pub fn galaxy_by_name(name: &str) -> Option<&'static GalaxyInfo> {
    GALAXIES.iter().find(|g| g.name == name)
}

pub const SHIP_VARIANTS: &[&[&str]] = &[
    &["  /\\  ", " /==\\ ", "/_||_\\"],
    &["   /^\\   ", "  /_=_\\  ", " /_/ \\_\\"],
    &["   __/\\__  ", "  /-====-\\ ", "   \\____/  "],
    &["   __|__  ", "  /_/ \\_\\ ", "   \\_=_/  "],
];

pub const PLANET_ARTS: &[&[&str]] = &[
    &["  _~_ ", " (   )", "  '-' "],
    &["  .-. ", " ( O )", "  '-' "],
    &["  ___ ", " ( o )", "  '_' "],
    &["  *** ", " * O *", "  *** "],
];

pub const PLANET_TYPES: &[&str] = &["Terrestrial", "Gas Giant", "Ice", "Oceanic", "Volcanic", "Desert"];
pub const ATMOSPHERES: &[&str] = &["N₂/O₂", "CO₂", "H₂/He", "Thin", "Toxic"];
pub const LIFE_SIGNS: &[&str] = &["None", "Microbial", "Simple", "Complex"];
pub const PLANET_DESCRIPTIONS: &[&str] = &[
    "Rocky world", "Ringed giant", "Frozen cliffs",
    "Deep oceans", "Volcanic plains", "Bright sands",
];

pub const SYSTEM_PREFIXES: &[&str] = &["Alfa", "Beta", "Delta", "Sigma", "Zeta", "Tau"];

/// `{}` is replaced with the system name.
pub const SYSTEM_HISTORIES: &[&str] = &[
    "{} once hosted ancient probes.",
    "{} is known for crystal nebulae.",
    "{} holds ruined orbital platforms.",
    "{} has a stable binary pair that affects tides.",
];

/// Three in five systems carry no threat.
pub const THREATS: &[Option<&str>] = &[
    None, Some("Radiation Storm"), Some("Pirate Drones"), None, None,
];

pub const TASK_TYPES: &[&str] = &[
    "Scan for life", "Analyze composition", "Collect sample", "Map magnetosphere",
];

pub const ASSIGNING_AUTHORITY: &str = "Earth Command";

pub const AI_HINTS: &[&str] = &[
    "Sensors detect a faint signal ahead.",
    "Recommend scanning the nearby system.",
    "Warp vector alignment nominal.",
    "Energy signature from uncharted debris.",
    "Suggest collecting the glowing caches.",
];

pub const COPILOT_PERSONA: &[&str] = &[
    "AI: Scanning for microbiosignatures... standby.",
    "AI: Logging historical records for this star system.",
    "AI: Threat scanners nominal, but remain vigilant.",
];

pub const OPENING_CREW_LOG: &[&str] = &[
    "Captain's Log: Voyager commissioned.",
    "Engineer: Fusion cores stable.",
    "XO: Crew ready.",
];

pub const ARRIVAL_SIGNOFFS: &[&str] = &["Be vigilant.", "Good luck, Captain."];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn galaxy_order_wraps() {
        let last = GALAXIES.len() - 1;
        assert_eq!(next_galaxy(last), 0);
        assert_eq!(next_galaxy(0), 1);
        assert_eq!(galaxy(GALAXIES.len()).name, GALAXIES[0].name);
    }

    #[test]
    fn galaxy_lookup_by_name() {
        assert_eq!(galaxy_by_name("Whirlpool").map(|g| g.kind), Some("Barred Spiral"));
        assert!(galaxy_by_name("Nowhere").is_none());
    }

    #[test]
    fn threat_pool_is_two_in_five() {
        let threats = THREATS.iter().filter(|t| t.is_some()).count();
        assert_eq!((threats, THREATS.len()), (2, 5));
    }
}
