//! Deterministic geography and occupation generation using curated
//! lists.
//!
//! Covers the two free-text profile fields. All generation is
//! deterministic (same RNG stream = same strings).

use crate::rng::StreamRng;

/// Deterministic address generator using curated place lists.
pub struct GeographyGenerator;

impl GeographyGenerator {
    /// Generate a full mailing address deterministically.
    pub fn generate_address(rng: &mut StreamRng) -> String {
        let number = 100 + rng.next_u64_below(9_900);
        let street = rng.pick(Self::street_names());
        let suffix = rng.pick(Self::street_suffixes());
        let city = rng.pick(Self::cities());
        let state = rng.pick(Self::states());
        let zip = 10_000 + rng.next_u64_below(89_999);
        format!("{number} {street} {suffix}, {city}, {state} {zip}")
    }

    fn street_names() -> &'static [&'static str] {
        &[
            "Oak", "Maple", "Cedar", "Pine", "Elm", "Walnut", "Chestnut", "Willow",
            "Birch", "Spruce", "Magnolia", "Juniper", "Sycamore", "Poplar", "Aspen",
            "Main", "Church", "Park", "Lake", "Hill", "River", "Ridge", "Valley",
            "Meadow", "Sunset", "Highland", "Prospect", "Franklin", "Washington",
            "Jefferson", "Madison", "Monroe", "Jackson", "Lincoln", "Grant",
            "Harrison", "Cleveland", "Garfield", "Sherman", "Colonial", "Heritage",
            "Liberty", "Union", "Commerce", "Market", "Broad", "Spring", "Summit",
        ]
    }

    fn street_suffixes() -> &'static [&'static str] {
        &[
            "Street", "Avenue", "Boulevard", "Drive", "Lane", "Road", "Court",
            "Place", "Terrace", "Way", "Circle", "Crossing",
        ]
    }

    fn cities() -> &'static [&'static str] {
        &[
            "Springfield", "Riverton", "Fairview", "Georgetown", "Salem", "Clinton",
            "Madison", "Greenville", "Bristol", "Franklin", "Clayton", "Dayton",
            "Lexington", "Milton", "Auburn", "Ashland", "Burlington", "Manchester",
            "Oxford", "Arlington", "Dover", "Hudson", "Kingston", "Newport",
            "Winchester", "Lancaster", "Centerville", "Oakdale", "Brookfield",
            "Lakewood", "Hillsboro", "Riverside", "Glenwood", "Westfield",
            "Middletown", "Chester", "Monroe", "Florence", "Trenton", "Aurora",
        ]
    }

    fn states() -> &'static [&'static str] {
        &[
            "AL", "AZ", "CA", "CO", "CT", "FL", "GA", "IA", "ID", "IL", "IN", "KS",
            "KY", "MA", "MD", "ME", "MI", "MN", "MO", "NC", "NE", "NH", "NJ", "NM",
            "NV", "NY", "OH", "OK", "OR", "PA", "SC", "TN", "TX", "UT", "VA", "VT",
            "WA", "WI", "WV", "WY",
        ]
    }
}

/// Deterministic occupation generator using a curated list.
pub struct OccupationGenerator;

impl OccupationGenerator {
    pub fn generate(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::occupations())
    }

    fn occupations() -> &'static [&'static str] {
        &[
            "Accountant", "Actuary", "Administrative assistant", "Architect",
            "Attorney", "Auditor", "Baker", "Bank teller", "Biologist",
            "Bus driver", "Carpenter", "Chef", "Chemist", "Civil engineer",
            "Claims adjuster", "Construction manager", "Copywriter", "Dentist",
            "Dietitian", "Economist", "Electrician", "Elementary school teacher",
            "Financial analyst", "Firefighter", "Graphic designer",
            "Human resources specialist", "Insurance underwriter",
            "Interior designer", "IT support specialist", "Journalist",
            "Laboratory technician", "Librarian", "Logistics coordinator",
            "Machinist", "Marketing manager", "Mechanical engineer",
            "Medical assistant", "Nurse", "Occupational therapist", "Optician",
            "Paralegal", "Pharmacist", "Photographer", "Physical therapist",
            "Physician", "Plumber", "Police officer", "Professor",
            "Project manager", "Psychologist", "Real estate agent",
            "Receptionist", "Research scientist", "Restaurant manager",
            "Retail manager", "Sales representative", "Social worker",
            "Software developer", "Statistician", "Surveyor", "Systems analyst",
            "Translator", "Truck driver", "Veterinarian", "Web developer",
            "Welder",
        ]
    }
}
