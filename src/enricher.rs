//! Presentation enrichment: nicknames and habitat coordinates
//!
//! Purely cosmetic layer. Nicknames carry no uniqueness guarantee and
//! sampled coordinates are not clamped to valid geographic ranges; the
//! habitat table is configured to keep them plausible. The random source
//! is injected so tests can seed it.

use crate::models::{Coordinate, SpeciesLabel};
use rand::seq::SliceRandom;
use rand::Rng;

/// Decorative nicknames assigned to classified penguins
pub const NICKNAMES: &[&str] = &[
    "Pingu",
    "Capitán Hielo",
    "Doña Nieve",
    "Waddles",
    "Picoloco",
    "Frostina",
    "Don Esmoquin",
    "Aletas",
    "Copito",
    "Comandante Glaciar",
];

/// Sampling region for a species: center point plus a per-axis spread
/// in degrees. Coordinates are drawn uniformly and independently in
/// [center - spread, center + spread] on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitatRegion {
    pub center: Coordinate,
    pub spread_deg: f64,
}

/// Static habitat table. Every label has a region; Unknown doubles as
/// the fallback for anything unmapped.
pub fn habitat_region(label: SpeciesLabel) -> HabitatRegion {
    match label {
        // Ross Sea colonies
        SpeciesLabel::Adelie => HabitatRegion {
            center: Coordinate {
                lat: -77.0,
                lon: 166.0,
            },
            spread_deg: 10.0,
        },
        // Antarctic Peninsula / South Shetlands
        SpeciesLabel::Chinstrap => HabitatRegion {
            center: Coordinate {
                lat: -62.0,
                lon: -58.0,
            },
            spread_deg: 4.0,
        },
        // Falklands and northern peninsula
        SpeciesLabel::Gentoo => HabitatRegion {
            center: Coordinate {
                lat: -51.7,
                lon: -59.0,
            },
            spread_deg: 3.0,
        },
        // Somewhere in the Southern Ocean
        SpeciesLabel::Unknown => HabitatRegion {
            center: Coordinate {
                lat: -65.0,
                lon: 0.0,
            },
            spread_deg: 15.0,
        },
    }
}

/// Pick a nickname and synthesize a plausible sighting coordinate
pub fn enrich(label: SpeciesLabel, rng: &mut impl Rng) -> (String, Coordinate) {
    let nickname = NICKNAMES
        .choose(rng)
        .copied()
        .unwrap_or("Pingu")
        .to_string();

    let region = habitat_region(label);
    let coordinate = Coordinate {
        lat: rng.gen_range(region.center.lat - region.spread_deg..=region.center.lat + region.spread_deg),
        lon: rng.gen_range(region.center.lon - region.spread_deg..=region.center.lon + region.spread_deg),
    };

    (nickname, coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn coordinates_stay_within_habitat_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for label in [
            SpeciesLabel::Adelie,
            SpeciesLabel::Chinstrap,
            SpeciesLabel::Gentoo,
            SpeciesLabel::Unknown,
        ] {
            let region = habitat_region(label);
            for _ in 0..500 {
                let (_, coord) = enrich(label, &mut rng);
                assert!(coord.lat >= region.center.lat - region.spread_deg);
                assert!(coord.lat <= region.center.lat + region.spread_deg);
                assert!(coord.lon >= region.center.lon - region.spread_deg);
                assert!(coord.lon <= region.center.lon + region.spread_deg);
            }
        }
    }

    #[test]
    fn adelie_samples_land_in_ross_sea_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (_, coord) = enrich(SpeciesLabel::Adelie, &mut rng);
            assert!((-87.0..=-67.0).contains(&coord.lat));
            assert!((156.0..=176.0).contains(&coord.lon));
        }
    }

    #[test]
    fn nickname_comes_from_fixed_list() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let (nickname, _) = enrich(SpeciesLabel::Gentoo, &mut rng);
            assert!(NICKNAMES.contains(&nickname.as_str()));
        }
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        assert_eq!(
            enrich(SpeciesLabel::Chinstrap, &mut a),
            enrich(SpeciesLabel::Chinstrap, &mut b)
        );
    }
}
