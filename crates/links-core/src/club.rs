use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Broad club family. Only `Putter` changes how a shot launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubCategory {
    Wood,
    Iron,
    Wedge,
    Putter,
    /// Anything unrecognized; launched as a full swing.
    #[serde(other)]
    Other,
}

impl ClubCategory {
    pub fn is_putter(self) -> bool {
        self == Self::Putter
    }
}

/// Launch characteristics of one club at full power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub name: String,
    pub short_name: String,
    /// Face loft in degrees.
    pub loft: f32,
    /// Ball exit speed in m/s.
    pub ball_speed: f32,
    /// Launch angle in degrees above horizontal.
    pub launch_angle: f32,
    /// Nominal backspin in rpm.
    pub backspin: f32,
    /// Typical carry in yards.
    pub max_distance: f32,
    pub category: ClubCategory,
}

impl Club {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        short_name: &str,
        loft: f32,
        ball_speed: f32,
        launch_angle: f32,
        backspin: f32,
        max_distance: f32,
        category: ClubCategory,
    ) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name.to_string(),
            loft,
            ball_speed,
            launch_angle,
            backspin,
            max_distance,
            category,
        }
    }
}

/// The standard thirteen-club bag, longest first, putter last.
pub fn standard_bag() -> Vec<Club> {
    use ClubCategory::*;
    vec![
        Club::new("Driver", "1W", 10.5, 67.0, 12.0, 2700.0, 260.0, Wood),
        Club::new("3 Wood", "3W", 15.0, 62.0, 14.0, 3500.0, 230.0, Wood),
        Club::new("5 Wood", "5W", 18.0, 58.0, 16.0, 4000.0, 210.0, Wood),
        Club::new("4 Iron", "4i", 23.0, 54.0, 18.0, 4500.0, 190.0, Iron),
        Club::new("5 Iron", "5i", 26.0, 51.0, 20.0, 5000.0, 180.0, Iron),
        Club::new("6 Iron", "6i", 30.0, 48.0, 22.0, 5500.0, 170.0, Iron),
        Club::new("7 Iron", "7i", 34.0, 45.0, 24.0, 6500.0, 155.0, Iron),
        Club::new("8 Iron", "8i", 38.0, 42.0, 26.0, 7500.0, 140.0, Iron),
        Club::new("9 Iron", "9i", 42.0, 39.0, 28.0, 8000.0, 130.0, Iron),
        Club::new("Pitching Wedge", "PW", 46.0, 36.0, 30.0, 8500.0, 120.0, Wedge),
        Club::new("Sand Wedge", "SW", 56.0, 28.0, 34.0, 9500.0, 80.0, Wedge),
        Club::new("Lob Wedge", "LW", 60.0, 24.0, 38.0, 10000.0, 60.0, Wedge),
        // Putt speed comes from the power meter, not the club
        Club::new("Putter", "PT", 3.0, 0.0, 2.0, 300.0, 0.0, Putter),
    ]
}

/// Look up a club by full or short name.
pub fn club_by_name<'a>(bag: &'a [Club], name: &str) -> Option<&'a Club> {
    bag.iter().find(|c| c.name == name || c.short_name == name)
}

/// Suggest a club for the remaining distance (yards) from the given lie.
///
/// On the green or within a yard the putter is always chosen. Otherwise the
/// full-swing club whose comfortable carry (90% of max) is closest wins.
pub fn recommend_club(bag: &[Club], distance_yards: f32, lie: Surface) -> Option<&Club> {
    if distance_yards < 1.0 || lie == Surface::Green {
        return bag.iter().find(|c| c.category.is_putter());
    }

    bag.iter()
        .filter(|c| !c.category.is_putter())
        .min_by(|a, b| {
            let da = (a.max_distance * 0.9 - distance_yards).abs();
            let db = (b.max_distance * 0.9 - distance_yards).abs();
            da.total_cmp(&db)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_has_thirteen_clubs_with_putter_last() {
        let bag = standard_bag();
        assert_eq!(bag.len(), 13);
        assert!(bag.last().unwrap().category.is_putter());
        assert_eq!(
            bag.iter().filter(|c| c.category.is_putter()).count(),
            1,
            "exactly one putter"
        );
    }

    #[test]
    fn lookup_by_short_or_full_name() {
        let bag = standard_bag();
        assert_eq!(club_by_name(&bag, "7i").unwrap().name, "7 Iron");
        assert_eq!(club_by_name(&bag, "Sand Wedge").unwrap().short_name, "SW");
        assert!(club_by_name(&bag, "Spoon").is_none());
    }

    #[test]
    fn putter_on_green_regardless_of_distance() {
        let bag = standard_bag();
        let club = recommend_club(&bag, 40.0, Surface::Green).unwrap();
        assert!(club.category.is_putter());
    }

    #[test]
    fn putter_when_nearly_holed() {
        let bag = standard_bag();
        let club = recommend_club(&bag, 0.5, Surface::Fairway).unwrap();
        assert!(club.category.is_putter());
    }

    #[test]
    fn driver_for_long_hole() {
        let bag = standard_bag();
        let club = recommend_club(&bag, 250.0, Surface::Tee).unwrap();
        assert_eq!(club.short_name, "1W");
    }

    #[test]
    fn seven_iron_for_one_forty() {
        // 0.9 * 155 = 139.5 is the closest comfortable carry to 140
        let bag = standard_bag();
        let club = recommend_club(&bag, 140.0, Surface::Fairway).unwrap();
        assert_eq!(club.short_name, "7i");
    }

    #[test]
    fn empty_bag_recommends_nothing() {
        assert!(recommend_club(&[], 100.0, Surface::Fairway).is_none());
    }

    #[test]
    fn unknown_category_parses_as_other() {
        let text = r#"
            name = "Chipper"
            short_name = "CH"
            loft = 37.0
            ball_speed = 20.0
            launch_angle = 20.0
            backspin = 4000.0
            max_distance = 40.0
            category = "hybrid"
        "#;
        let club: Club = toml::from_str(text).unwrap();
        assert_eq!(club.category, ClubCategory::Other);
        assert!(!club.category.is_putter());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn off_the_green_beyond_a_yard_never_putts(
                distance in 1.0f32..400.0,
                lie in prop::sample::select(vec![
                    Surface::Tee,
                    Surface::Fairway,
                    Surface::Rough,
                    Surface::Bunker,
                ]),
            ) {
                let bag = standard_bag();
                let club = recommend_club(&bag, distance, lie).unwrap();
                prop_assert!(!club.category.is_putter());
                // No other full-swing club is a closer fit
                let gap = (club.max_distance * 0.9 - distance).abs();
                for other in bag.iter().filter(|c| !c.category.is_putter()) {
                    prop_assert!(gap <= (other.max_distance * 0.9 - distance).abs());
                }
            }
        }
    }
}
